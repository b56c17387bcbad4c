//! CLI module for tuckshop-server

use clap::{Parser, Subcommand};

/// Tuckshop Server - credential verification and session tokens for the Tuckshop frontend
#[derive(Parser, Debug)]
#[command(name = "tuckshop-server")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    TUCKSHOP_HOST                   Bind address (default: 0.0.0.0)
    TUCKSHOP_PORT / PORT            Listen port (default: 5000)
    TUCKSHOP_DATABASE_URL           Database URL (default: sqlite://tuckshop.db)
    TUCKSHOP_STATIC_DIR             Frontend bundle root (default: public)
    TUCKSHOP_JWT_SECRET             JWT signing key (default: insecure placeholder)
    TUCKSHOP_ADMIN_PASSWORD         Initial admin password (default: insecure "admin")
    TUCKSHOP_ADMIN_TOKEN_TTL_HOURS  Admin token lifetime (default: 8)
    TUCKSHOP_TOKEN_TTL_HOURS        Token lifetime for other roles (default: 24)
    TUCKSHOP_ARGON2_MEMORY_KIB      Argon2 memory cost (default: 19456)
    TUCKSHOP_LOG_LEVEL              Log level (default: info)
    TUCKSHOP_LOG_DIR                Also write JSON logs to this directory
"#)]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Ensure the default admin exists, then start the HTTP server
    Serve,
    /// Ensure the default admin exists, then exit
    Bootstrap,
}

impl Cli {
    /// The command to run, `serve` when none was given
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
