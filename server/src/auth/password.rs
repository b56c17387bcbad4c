//! パスワードハッシュ化と検証
//!
//! 新規ハッシュはArgon2id（メモリハード・ソルト付き・コスト可変）。
//! 旧デプロイメントで作成されたbcryptハッシュ（$2a$/$2b$/$2y$）は検証のみ対応。

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use tuckshop_common::error::AuthError;

/// Argon2idのコストパラメータ
///
/// 既定値はargon2クレートの推奨値（19 MiB, 2 iterations, 1 lane）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// メモリコスト（KiB）
    pub memory_kib: u32,
    /// 反復回数
    pub iterations: u32,
    /// 並列度
    pub parallelism: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordPolicy {
    /// パラメータの妥当性を検証
    pub fn validate(&self) -> Result<(), AuthError> {
        self.params().map(|_| ())
    }

    fn params(&self) -> Result<Params, AuthError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| AuthError::Internal(format!("Invalid Argon2 parameters: {}", e)))
    }

    fn hasher(&self) -> Result<Argon2<'static>, AuthError> {
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params()?))
    }
}

/// パスワードをArgon2idでハッシュ化
///
/// # Arguments
/// * `password` - ハッシュ化するパスワード
/// * `policy` - コストパラメータ
///
/// # Returns
/// * `Ok(String)` - PHC文字列（$argon2id$で始まる）
/// * `Err(AuthError)` - ハッシュ化失敗
pub fn hash_password(password: &str, policy: &PasswordPolicy) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    policy
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// コストパラメータはハッシュ文字列自体から読み取る
///
/// # Arguments
/// * `password` - 検証する平文パスワード
/// * `hash` - 保存済みハッシュ文字列
///
/// # Returns
/// * `Ok(true)` - パスワード一致
/// * `Ok(false)` - パスワード不一致
/// * `Err(AuthError)` - ハッシュ形式が不正
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    if is_bcrypt_hash(hash) {
        return bcrypt::verify(password, hash)
            .map_err(|e| AuthError::Internal(format!("Failed to verify bcrypt hash: {}", e)));
    }

    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Unrecognised password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Internal(format!(
            "Failed to verify password: {}",
            e
        ))),
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}
