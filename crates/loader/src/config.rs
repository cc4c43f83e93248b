use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

/// Database connection settings, from flags or environment variables.
///
/// `.env` is loaded before parsing, so it feeds the same variables.
///
/// | Env Var                   | Default        |
/// |---------------------------|----------------|
/// | `DATABASE_URL`            | required       |
/// | `DB_MAX_CONNECTIONS`      | `5`            |
/// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`           |
/// | `MOVIEDB_DOCUMENTS_DIR`   | `./yaml_files` |
#[derive(Debug, Clone, Args)]
pub struct DbConfig {
    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Upper bound on pooled connections. Documents are loaded one at a
    /// time, so a small pool suffices.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a connection before giving up.
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 10)]
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Connect a pool with these settings.
    pub async fn connect(&self) -> Result<moviedb_db::DbPool, sqlx::Error> {
        moviedb_db::create_pool(
            &self.database_url,
            self.max_connections,
            self.acquire_timeout(),
        )
        .await
    }
}

/// Default directory scanned by `moviedb load`.
pub const DEFAULT_DOCUMENTS_DIR: &str = "./yaml_files";

/// Where `moviedb load` looks for documents.
#[derive(Debug, Clone, Args)]
pub struct LoadArgs {
    /// Directory containing `*.yaml` / `*.yml` movie documents.
    #[arg(env = "MOVIEDB_DOCUMENTS_DIR", default_value = DEFAULT_DOCUMENTS_DIR)]
    pub dir: PathBuf,
}
