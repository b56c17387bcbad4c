//! 認証サービス
//!
//! 資格情報の検証とセッショントークンの発行

use crate::auth::jwt::{self, TokenLifetimes};
use crate::auth::password::{self, PasswordPolicy};
use crate::db::UserStore;
use serde::Deserialize;
use std::sync::Arc;
use tuckshop_common::auth::Claims;
use tuckshop_common::error::{AuthError, AuthResult};

/// ログインリクエスト
///
/// 欠落したフィールドは `None` として受け取り、検証で400にする
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// ユーザー名
    #[serde(default)]
    pub username: Option<String>,
    /// パスワード
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// 新しいリクエストを作成
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// 両方のフィールドが存在し空でないことを検証
    pub fn credentials(&self) -> AuthResult<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username, password))
            }
            _ => Err(AuthError::MissingCredentials),
        }
    }
}

/// 認証サービスの設定
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// JWT署名用シークレット
    pub jwt_secret: String,
    /// ロール別トークン有効期限
    pub token_lifetimes: TokenLifetimes,
    /// パスワードハッシュのコスト
    pub password_policy: PasswordPolicy,
}

/// 認証サービス
///
/// ストアは構築時に注入する。クローンは安価（内部はArc）。
#[derive(Clone)]
pub struct AuthService {
    store: UserStore,
    settings: Arc<AuthSettings>,
    // 未知のユーザー名でも同じコストの検証を行うためのダミーハッシュ
    dummy_hash: Arc<str>,
}

impl AuthService {
    /// 認証サービスを作成
    ///
    /// # Errors
    /// パスワードポリシーが不正な場合
    pub fn new(store: UserStore, settings: AuthSettings) -> AuthResult<Self> {
        let dummy_hash = password::hash_password("tuckshop-dummy", &settings.password_policy)?;
        Ok(Self {
            store,
            settings: Arc::new(settings),
            dummy_hash: dummy_hash.into(),
        })
    }

    /// 資格情報ストア
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// ユーザー名とパスワードで認証し、JWTを発行
    ///
    /// # Returns
    /// * `Ok(String)` - 署名済みトークン
    /// * `Err(AuthError::MissingCredentials)` - ユーザー名またはパスワードが空
    /// * `Err(AuthError::InvalidCredentials)` - ユーザー不在またはパスワード不一致
    /// * `Err(AuthError::Internal)` - ストア・ハッシュ・署名の失敗
    pub async fn login(&self, request: &LoginRequest) -> AuthResult<String> {
        let (username, password) = request.credentials()?;

        let user = self.store.find_by_username(username).await?;

        let Some(user) = user else {
            // ユーザー不在でも検証コストを支払い、応答時間から存在を推測させない
            self.verify_blocking(password, &self.dummy_hash).await?;
            tracing::warn!(username = %username, "Login failed: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify_blocking(password, &user.password_hash).await? {
            tracing::warn!(username = %username, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let role = user.effective_role();
        let token = jwt::create_jwt(
            &user.id.to_string(),
            role,
            self.settings.token_lifetimes.for_role(role),
            &self.settings.jwt_secret,
        )?;

        tracing::info!(user_id = %user.id, role = %role, "Login succeeded");
        Ok(token)
    }

    /// トークンを検証してクレームを返す
    pub fn verify_token(&self, token: &str) -> AuthResult<Claims> {
        jwt::verify_jwt(token, &self.settings.jwt_secret)
    }

    /// パスワード検証（CPUバウンドのためブロッキングスレッドで実行）
    async fn verify_blocking(&self, password: &str, hash: &str) -> AuthResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
    }
}
