//! Tuckshop Common Library
//!
//! ユーザー・トークンの共通型定義とエラー型を提供

#![warn(missing_docs)]

/// 認証関連のデータモデル
pub mod auth;

/// エラー型定義
pub mod error;
