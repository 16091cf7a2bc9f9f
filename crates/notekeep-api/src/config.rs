//! Server configuration read from the environment.
//!
//! | Variable             | Default                        |
//! |----------------------|--------------------------------|
//! | `HOST`               | `0.0.0.0`                      |
//! | `PORT`               | `3000`                         |
//! | `NOTES_STORAGE`      | `postgres` (`memory` for dev)  |
//! | `DATABASE_URL`       | `postgres://localhost/notekeep`|
//! | `DB_MAX_CONNECTIONS` | `10`                           |
//! | `AUTH_TOKENS`        | unset (`token=user,...`)       |
//! | `ALLOWED_ORIGINS`    | `http://localhost:3000`        |
//! | `MAX_BODY_BYTES`     | `1048576`                      |
//! | `LOG_FORMAT`         | `text` (or `json`)             |
//! | `LOG_FILE`           | unset (stdout)                 |
//! | `LOG_ANSI`           | auto                           |

use std::net::SocketAddr;
use std::str::FromStr;

use notekeep_core::defaults;
use notekeep_core::{Error, Result};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/notekeep";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Where notes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            "memory" => Ok(StorageKind::Memory),
            other => Err(Error::Config(format!(
                "NOTES_STORAGE must be 'postgres' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Log to this file (rotated daily) instead of stdout.
    pub file: Option<String>,
    /// Force ANSI colors on or off.
    pub ansi: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageKind,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Raw `token=user` pairs for the static resolver.
    pub auth_tokens: Option<String>,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub log: LogConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            storage: StorageKind::Postgres,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: defaults::DB_MAX_CONNECTIONS,
            auth_tokens: None,
            allowed_origins: split_list(DEFAULT_ALLOWED_ORIGINS),
            max_body_bytes: defaults::MAX_BODY_BYTES,
            log: LogConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match var("NOTES_STORAGE") {
            Some(raw) => raw.parse()?,
            None => base.storage,
        };
        let auth_tokens = var("AUTH_TOKENS");
        if storage == StorageKind::Memory && auth_tokens.is_none() {
            return Err(Error::Config(
                "AUTH_TOKENS is required when NOTES_STORAGE=memory".to_string(),
            ));
        }

        let format = match var("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            host: var("HOST").unwrap_or(base.host),
            port: parse_number(var("PORT"), "PORT", base.port)?,
            storage,
            database_url: var("DATABASE_URL").unwrap_or(base.database_url),
            db_max_connections: parse_number(
                var("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                base.db_max_connections,
            )?,
            auth_tokens,
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or(base.allowed_origins),
            max_body_bytes: parse_number(var("MAX_BODY_BYTES"), "MAX_BODY_BYTES", base.max_body_bytes)?,
            log: LogConfig {
                format,
                file: var("LOG_FILE"),
                ansi: var("LOG_ANSI").map(|v| v == "true" || v == "1"),
            },
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid HOST/PORT: {}", e)))
    }
}

fn parse_number<T: FromStr>(raw: Option<String>, name: &str, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a number, got '{}'", name, value))),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
