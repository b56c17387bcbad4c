//! ユーザー（資格情報）ストア
//!
//! ユーザー名は完全一致・大文字小文字を区別して照合する。
//! 更新・削除操作は提供しない。

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tuckshop_common::auth::User;
use tuckshop_common::error::StoreError;
use uuid::Uuid;

/// SQLiteバックエンドの資格情報ストア
///
/// プールは内部で同時実行安全なため、クローンして複数リクエストで共有できる
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// 接続済みプールからストアを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 内部の接続プール
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// ユーザー名でユーザーを検索
    ///
    /// # Arguments
    /// * `username` - ユーザー名（完全一致）
    ///
    /// # Returns
    /// * `Ok(Some(User))` - ユーザーが見つかった
    /// * `Ok(None)` - ユーザーが見つからなかった
    /// * `Err(StoreError)` - 検索失敗
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    /// IDでユーザーを検索
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    /// ユーザーを作成
    ///
    /// # Arguments
    /// * `username` - ユーザー名
    /// * `password_hash` - ハッシュ化済みパスワード
    /// * `role` - ロール
    ///
    /// # Returns
    /// * `Ok(Uuid)` - 新しく割り当てられたユーザーID
    /// * `Err(StoreError::DuplicateUsername)` - ユーザー名が既に存在する
    /// * `Err(StoreError::Database)` - その他の作成失敗
    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, role, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateUsername(username.to_string())
            }
            other => StoreError::Database(format!("Failed to create user: {}", other)),
        })?;

        Ok(id)
    }

    /// 登録ユーザー数
    pub async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to count users: {}", e)))
    }
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    role: Option<String>,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, StoreError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StoreError::Database(format!("Corrupt user id '{}': {}", self.id, e)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::Database(format!("Corrupt created_at for {}: {}", id, e)))?
            .with_timezone(&Utc);

        Ok(User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
            created_at,
        })
    }
}
