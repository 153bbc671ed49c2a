use std::env;
use std::path::PathBuf;

pub const CARDINFO_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";
pub const CARDSETS_URL: &str = "https://db.ygoprodeck.com/api/v7/cardsets.php";

pub const DEFAULT_LIMIT: usize = 64;
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 999;

pub const DB_PATH_VAR: &str = "YGO_DB_PATH";
pub const ADMIN_TOKEN_VAR: &str = "YGO_ADMIN_TOKEN";

/// Runtime configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// DuckDB database file.
    pub database_path: PathBuf,
    /// Shared secret the boundary layer compares against for admin operations.
    pub admin_token: Option<String>,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let database_path = env::var(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());
        let admin_token = env::var(ADMIN_TOKEN_VAR).ok().filter(|t| !t.is_empty());

        Self {
            database_path,
            admin_token,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            admin_token: None,
        }
    }
}

pub fn default_database_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("ygo-catalog").join("catalog.duckdb")
    } else {
        PathBuf::from(".ygo-catalog").join("catalog.duckdb")
    }
}
