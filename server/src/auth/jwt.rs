//! JWT生成と検証（jsonwebtoken, HS256）

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tuckshop_common::auth::{Claims, ADMIN_ROLE};
use tuckshop_common::error::AuthError;

/// 管理者トークンの既定有効期限（時間）
pub const DEFAULT_ADMIN_TOKEN_TTL_HOURS: i64 = 8;

/// その他ロールのトークンの既定有効期限（時間）
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// ロール別のトークン有効期限
///
/// 管理者セッションは短くする
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// "admin" ロールの有効期限
    pub admin: Duration,
    /// それ以外のロールの有効期限
    pub default: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            admin: Duration::hours(DEFAULT_ADMIN_TOKEN_TTL_HOURS),
            default: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }
}

impl TokenLifetimes {
    /// ロールに応じた有効期限
    pub fn for_role(&self, role: &str) -> Duration {
        if role == ADMIN_ROLE {
            self.admin
        } else {
            self.default
        }
    }
}

/// JWTトークンを生成
///
/// # Arguments
/// * `user_id` - ユーザーID（`sub`）
/// * `role` - ユーザーロール
/// * `lifetime` - 有効期間
/// * `secret` - JWTシークレットキー
///
/// # Returns
/// * `Ok(String)` - JWTトークン（3つのドット区切り部分）
/// * `Err(AuthError)` - 生成失敗
pub fn create_jwt(
    user_id: &str,
    role: &str,
    lifetime: Duration,
    secret: &str,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(lifetime)
        .ok_or_else(|| AuthError::Internal("Failed to calculate expiration time".to_string()))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    // Header::default() は HS256
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("Failed to create JWT: {}", e)))
}

/// JWTトークンを検証
///
/// # Returns
/// * `Ok(Claims)` - 検証済みクレーム
/// * `Err(AuthError::Unauthorized)` - 無効なトークン、署名不一致、期限切れなど
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::Unauthorized(format!("Invalid token: {}", e)))
}
