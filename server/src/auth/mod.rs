//! 認証モジュール

/// パスワードハッシュ化・検証（argon2, 旧bcryptハッシュの検証）
pub mod password;

/// JWT生成・検証（jsonwebtoken）
pub mod jwt;

/// 認証サービス（ログイン、トークン検証）
pub mod service;

/// 起動時の既定管理者アカウント作成
pub mod bootstrap;

/// 認証ミドルウェア（Bearerトークン）
pub mod middleware;

pub use service::{AuthService, AuthSettings, LoginRequest};
