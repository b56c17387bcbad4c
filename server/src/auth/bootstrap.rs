//! 起動時の既定管理者アカウント作成
//!
//! "admin" レコードが存在しなければ作成する。繰り返し起動しても、
//! 複数プロセスが同時に起動しても、管理者レコードは1件だけになる。

use crate::auth::password::{hash_password, PasswordPolicy};
use crate::db::UserStore;
use tuckshop_common::auth::ADMIN_ROLE;
use tuckshop_common::error::{AuthError, ServerError, StoreError};
use uuid::Uuid;

/// 既定管理者のユーザー名
pub const ADMIN_USERNAME: &str = "admin";

/// ブートストラップの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// 管理者を新規作成した
    Created(Uuid),
    /// 既に存在していた（同時起動で他プロセスが先に作成した場合を含む）
    AlreadyExists,
}

/// 既定管理者が存在することを保証する
///
/// # Arguments
/// * `store` - 資格情報ストア
/// * `admin_password` - 作成時に設定するパスワード
/// * `policy` - パスワードハッシュのコスト
///
/// # Returns
/// * `Ok(BootstrapOutcome)` - 処理成功
/// * `Err(ServerError)` - ストア障害またはハッシュ化失敗（起動を中止する）
pub async fn ensure_default_admin(
    store: &UserStore,
    admin_password: &str,
    policy: &PasswordPolicy,
) -> Result<BootstrapOutcome, ServerError> {
    if store.find_by_username(ADMIN_USERNAME).await?.is_some() {
        tracing::debug!("Default admin already exists, skipping creation");
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    let password = admin_password.to_string();
    let policy = *policy;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &policy))
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))??;

    match store
        .insert(ADMIN_USERNAME, &password_hash, ADMIN_ROLE)
        .await
    {
        Ok(id) => {
            tracing::info!(user_id = %id, "Default admin user created");
            Ok(BootstrapOutcome::Created(id))
        }
        Err(StoreError::DuplicateUsername(_)) => {
            tracing::info!("Default admin was created concurrently, skipping creation");
            Ok(BootstrapOutcome::AlreadyExists)
        }
        Err(e) => {
            tracing::error!("Failed to create default admin: {}", e);
            Err(e.into())
        }
    }
}
