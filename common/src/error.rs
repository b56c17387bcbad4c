//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Message returned when the login payload lacks a username or password
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Username and password are required";

/// Message returned for every failed credential check
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Message returned for a bearer token that fails verification
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Message returned in place of any internal failure detail
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Credential store error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this username already exists
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),
}

/// Authentication error type
///
/// `Display` of each variant is what clients see, except `Internal`,
/// whose detail is only written to the log.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing or empty
    #[error("Username and password are required")]
    MissingCredentials,

    /// Unknown user or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired or badly signed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Store, hashing or signing failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Server startup error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// Credential store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication layer error (hashing, signing)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias (Store)
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias (Auth)
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type alias (Server)
pub type ServerResult<T> = Result<T, ServerError>;
