//! Tuckshop Server
//!
//! 資格情報の検証とセッショントークン発行、フロントエンドの静的配信

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// 認証・トークン発行
pub mod auth;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

use std::path::PathBuf;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 認証サービス
    pub auth: auth::AuthService,
    /// 静的ファイルのルートディレクトリ
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    /// アプリケーション状態を作成
    pub fn new(auth: auth::AuthService, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            auth,
            static_dir: Arc::new(static_dir.into()),
        }
    }
}
