//! 認証関連のデータモデル
//!
//! ユーザーレコードとJWTクレーム

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ロール未設定のユーザーに適用されるロール
pub const DEFAULT_ROLE: &str = "user";

/// 管理者ロール
pub const ADMIN_ROLE: &str = "admin";

/// ユーザー
///
/// `password_hash` を含むため、このままHTTPレスポンスに載せてはならない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// ストアが割り当てるID（不変）
    pub id: Uuid,
    /// ユーザー名（一意、大文字小文字を区別）
    pub username: String,
    /// ソルト付き一方向ハッシュ（PHC文字列）
    pub password_hash: String,
    /// ロール（未設定のレコードも存在し得る）
    pub role: Option<String>,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

impl User {
    /// トークンに埋め込む実効ロールを返す（未設定なら "user"）
    pub fn effective_role(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.is_empty() => role,
            _ => DEFAULT_ROLE,
        }
    }
}

/// JWTクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// ユーザーID
    pub sub: String,
    /// ロール
    pub role: String,
    /// 発行日時（Unix timestamp）
    pub iat: usize,
    /// 有効期限（Unix timestamp）
    pub exp: usize,
}
