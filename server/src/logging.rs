//! ロギング初期化ユーティリティ
//!
//! `tracing` による構造化ロギングを標準出力へ出力する。
//! `TUCKSHOP_LOG_DIR` が設定されていれば、日次ローテーションのJSONライン形式ファイルにも出力する。

use std::{
    env,
    io::{self, Error},
    path::PathBuf,
    sync::OnceLock,
};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイルベース名（JSON Lines）
pub const LOG_FILE_BASE: &str = "tuckshop-server.jsonl";

const LOG_DIR_ENV: &str = "TUCKSHOP_LOG_DIR";
const LOG_LEVEL_ENV: &str = "TUCKSHOP_LOG_LEVEL";
const ALT_LEVEL_ENV: &str = "RUST_LOG";
const DEFAULT_LEVEL: &str = "info";

static LOGGER_GUARD: OnceLock<Result<LoggerGuard, io::Error>> = OnceLock::new();

struct LoggerGuard {
    _file_guard: Option<WorkerGuard>,
}

/// ログ出力を初期化する。2回目以降の呼び出しは初回の結果を返す。
pub fn init() -> io::Result<()> {
    match LOGGER_GUARD.get_or_init(configure_logger) {
        Ok(_) => Ok(()),
        Err(err) => Err(io::Error::new(err.kind(), err.to_string())),
    }
}

/// ファイル出力先ディレクトリ（未設定ならファイル出力しない）
pub fn log_dir() -> Option<PathBuf> {
    env::var(LOG_DIR_ENV)
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

/// 環境変数からフィルタを構築（優先順位: TUCKSHOP_LOG_LEVEL > RUST_LOG > info）
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_from_env(ALT_LEVEL_ENV))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

fn configure_logger() -> io::Result<LoggerGuard> {
    let (file_layer, file_guard) = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let (writer, guard) = non_blocking(rolling::daily(&dir, LOG_FILE_BASE));
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(false)
                .with_span_list(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // 標準出力レイヤー（人間が読みやすい形式）
    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(Error::other)?;

    if let Some(dir) = log_dir() {
        tracing::info!(category = "system", "Server logs written to {}", dir.display());
    }

    Ok(LoggerGuard {
        _file_guard: file_guard,
    })
}
