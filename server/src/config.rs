//! Configuration management via environment variables
//!
//! Every setting is read from a `TUCKSHOP_*` variable first, then from the
//! shorter legacy name used by earlier deployments (`JWT_SECRET`, `PORT`, ...).

use crate::auth::jwt::{TokenLifetimes, DEFAULT_ADMIN_TOKEN_TTL_HOURS, DEFAULT_TOKEN_TTL_HOURS};
use crate::auth::password::PasswordPolicy;
use crate::auth::AuthSettings;
use std::path::{Component, Path, PathBuf};
use tuckshop_common::error::{ServerError, ServerResult};

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default database URL (SQLite file in the working directory)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tuckshop.db";

/// Default static frontend root
///
/// Kept apart from the database file so the store is never reachable over HTTP.
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Placeholder signing secret. INSECURE: set `TUCKSHOP_JWT_SECRET` in production.
pub const DEFAULT_JWT_SECRET: &str = "secret";

/// Password given to the bootstrapped admin. INSECURE: set
/// `TUCKSHOP_ADMIN_PASSWORD` before first start in production.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Get an environment variable with fallback to a legacy name
///
/// Unlike a deprecated name, the legacy names are still honoured silently
/// because the hosting platforms set them (`PORT`, `DATABASE_URL`).
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - Neither variable is set
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    std::env::var(new_name)
        .or_else(|_| std::env::var(old_name))
        .ok()
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Unparsable values fall back to `default` with a warning.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    match get_env_with_fallback(new_name, old_name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid value '{}' for {}", raw, new_name);
            default
        }),
        None => default,
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Credential store connection string
    pub database_url: String,
    /// Root directory of the static frontend bundle
    pub static_dir: PathBuf,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Password for the bootstrapped admin account
    pub admin_password: String,
    /// Token lifetimes per role
    pub token_lifetimes: TokenLifetimes,
    /// Argon2 cost parameters
    pub password_policy: PasswordPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            token_lifetimes: TokenLifetimes::default(),
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl Config {
    /// Read the configuration from the environment
    pub fn from_env() -> Self {
        let defaults = PasswordPolicy::default();
        let password_policy = PasswordPolicy {
            memory_kib: get_env_with_fallback_parse(
                "TUCKSHOP_ARGON2_MEMORY_KIB",
                "ARGON2_MEMORY_KIB",
                defaults.memory_kib,
            ),
            iterations: get_env_with_fallback_parse(
                "TUCKSHOP_ARGON2_ITERATIONS",
                "ARGON2_ITERATIONS",
                defaults.iterations,
            ),
            parallelism: get_env_with_fallback_parse(
                "TUCKSHOP_ARGON2_PARALLELISM",
                "ARGON2_PARALLELISM",
                defaults.parallelism,
            ),
        };

        let token_lifetimes = TokenLifetimes {
            admin: chrono::Duration::hours(get_env_with_fallback_parse(
                "TUCKSHOP_ADMIN_TOKEN_TTL_HOURS",
                "ADMIN_TOKEN_TTL_HOURS",
                DEFAULT_ADMIN_TOKEN_TTL_HOURS,
            )),
            default: chrono::Duration::hours(get_env_with_fallback_parse(
                "TUCKSHOP_TOKEN_TTL_HOURS",
                "TOKEN_TTL_HOURS",
                DEFAULT_TOKEN_TTL_HOURS,
            )),
        };

        Self {
            host: get_env_with_fallback_or("TUCKSHOP_HOST", "HOST", DEFAULT_HOST),
            port: get_env_with_fallback_parse("TUCKSHOP_PORT", "PORT", DEFAULT_PORT),
            database_url: get_env_with_fallback_or(
                "TUCKSHOP_DATABASE_URL",
                "DATABASE_URL",
                DEFAULT_DATABASE_URL,
            ),
            static_dir: PathBuf::from(get_env_with_fallback_or(
                "TUCKSHOP_STATIC_DIR",
                "STATIC_DIR",
                DEFAULT_STATIC_DIR,
            )),
            jwt_secret: get_env_with_fallback_or(
                "TUCKSHOP_JWT_SECRET",
                "JWT_SECRET",
                DEFAULT_JWT_SECRET,
            ),
            admin_password: get_env_with_fallback_or(
                "TUCKSHOP_ADMIN_PASSWORD",
                "ADMIN_PASSWORD",
                DEFAULT_ADMIN_PASSWORD,
            ),
            token_lifetimes,
            password_policy,
        }
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings handed to the auth service
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt_secret.clone(),
            token_lifetimes: self.token_lifetimes,
            password_policy: self.password_policy,
        }
    }

    /// Filesystem path of the SQLite database, `None` for in-memory databases
    pub fn database_path(&self) -> Option<PathBuf> {
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }

    /// Refuse a layout where the static root would expose the database
    ///
    /// Relative paths are resolved against the current directory.
    pub fn validate_layout(&self) -> ServerResult<()> {
        self.validate_layout_in(&std::env::current_dir()?)
    }

    /// [`Config::validate_layout`] with relative paths resolved against `base_dir`
    pub fn validate_layout_in(&self, base_dir: &Path) -> ServerResult<()> {
        let Some(db_path) = self.database_path() else {
            return Ok(());
        };
        let db_path = resolve(base_dir, &db_path);
        let static_root = resolve(base_dir, &self.static_dir);

        // -wal / -shm はデータベースファイルと同じディレクトリに作られる
        if db_path.starts_with(&static_root) {
            return Err(ServerError::Config(format!(
                "database {} is inside the static root {}; set TUCKSHOP_STATIC_DIR or TUCKSHOP_DATABASE_URL so they do not overlap",
                db_path.display(),
                static_root.display()
            )));
        }
        Ok(())
    }

    /// Log a warning for every insecure default still in effect
    pub fn warn_insecure_defaults(&self) {
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!(
                "TUCKSHOP_JWT_SECRET not set, using default (not recommended for production)"
            );
        }
        if self.admin_password == DEFAULT_ADMIN_PASSWORD {
            tracing::warn!(
                "TUCKSHOP_ADMIN_PASSWORD not set, default admin will use the insecure default password"
            );
        }
    }
}

/// Absolute, lexically normalised path; symlinks are followed when the path exists
fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    let joined = base_dir.join(path);
    if let Ok(canonical) = joined.canonicalize() {
        return canonical;
    }
    // 存在しないファイルは親ディレクトリを正規化して結合する
    if let (Some(parent), Some(name)) = (joined.parent(), joined.file_name()) {
        if let Ok(parent) = parent.canonicalize() {
            return parent.join(name);
        }
    }

    let mut normalised = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalised.pop();
            }
            other => normalised.push(other),
        }
    }
    normalised
}
