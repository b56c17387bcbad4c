//! データベースアクセス層
//!
//! SQLite（sqlx）による資格情報ストア

/// データベースマイグレーション
pub mod migrations;

/// ユーザー（資格情報）ストア
pub mod users;

pub use migrations::initialize_database;
pub use users::UserStore;
