//! Tuckshop Server Entry Point

use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tuckshop_common::error::{ServerError, ServerResult};
use tuckshop_server::{
    api,
    auth::{bootstrap, AuthService},
    cli::{Cli, Commands},
    config::Config,
    db, logging, AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command(), Config::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: Config) -> ServerResult<()> {
    info!("Tuckshop Server v{}", env!("CARGO_PKG_VERSION"));
    config.warn_insecure_defaults();
    config
        .password_policy
        .validate()
        .map_err(|e| ServerError::Config(e.to_string()))?;
    config.validate_layout()?;

    // ストアに接続できなければ起動しない
    let pool = db::initialize_database(&config.database_url).await?;
    let store = db::UserStore::new(pool);
    info!("Credential store ready ({} users)", store.count().await?);

    bootstrap::ensure_default_admin(&store, &config.admin_password, &config.password_policy)
        .await?;

    if command == Commands::Bootstrap {
        info!("Bootstrap complete");
        return Ok(());
    }

    let auth = AuthService::new(store, config.auth_settings())?;
    let state = AppState::new(auth, config.static_dir.clone());
    let router = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        "Server listening on {} (static root: {})",
        bind_addr,
        config.static_dir.display()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
