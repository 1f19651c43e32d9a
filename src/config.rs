//! Service configuration, read from `MUVHR_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::access::PermissionTable;
use crate::error::{ConfigError, StoreError};
use crate::store::{JsonFileStore, LibSqlStore, RecordStore};

/// Which record store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per collection under `data_dir`.
    Json,
    /// A libSQL database file at `db_path`.
    LibSql,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" | "file" | "mock" => Ok(Self::Json),
            "libsql" | "sqlite" | "db" => Ok(Self::LibSql),
            other => Err(format!("expected json or libsql, got {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub store: StoreBackend,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    /// Optional JSON file replacing the built-in permission table.
    pub permissions_path: Option<PathBuf>,
    /// Write sample data for missing collections at startup.
    pub seed: bool,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
    pub upload_dir: PathBuf,
    /// Directory for daily-rolling log files. Stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store: StoreBackend::Json,
            data_dir: PathBuf::from("./mock"),
            db_path: PathBuf::from("./data/muvhr.db"),
            permissions_path: None,
            seed: true,
            cors_origins: vec!["*".to_string()],
            upload_dir: PathBuf::from("./uploads"),
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let bind = match get("MUVHR_BIND") {
            Some(raw) => raw.parse().map_err(|e| invalid("MUVHR_BIND", e))?,
            None => defaults.bind,
        };
        let store = match get("MUVHR_STORE") {
            Some(raw) => raw.parse().map_err(|e| invalid("MUVHR_STORE", e))?,
            None => defaults.store,
        };
        let seed = match get("MUVHR_SEED") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid("MUVHR_SEED", format!("expected true or false, got {raw}"))
            })?,
            None => defaults.seed,
        };
        let cors_origins = match get("MUVHR_CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            bind,
            store,
            data_dir: get("MUVHR_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            db_path: get("MUVHR_DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path),
            permissions_path: get("MUVHR_PERMISSIONS").map(PathBuf::from),
            seed,
            cors_origins,
            upload_dir: get("MUVHR_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            log_dir: get("MUVHR_LOG_DIR").map(PathBuf::from),
        })
    }

    /// The configured permission table, or the built-in one.
    pub fn permission_table(&self) -> Result<PermissionTable, ConfigError> {
        match &self.permissions_path {
            Some(path) => {
                let table = PermissionTable::from_file(path)?;
                info!(path = %path.display(), "Loaded permission table");
                Ok(table)
            }
            None => Ok(PermissionTable::default()),
        }
    }

    pub async fn open_store(&self) -> Result<Arc<dyn RecordStore>, StoreError> {
        Ok(match self.store {
            StoreBackend::Json => {
                info!(dir = %self.data_dir.display(), "Using JSON file store");
                Arc::new(JsonFileStore::new(&self.data_dir))
            }
            StoreBackend::LibSql => Arc::new(LibSqlStore::new_local(&self.db_path).await?),
        })
    }
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
