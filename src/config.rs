use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

use crate::errors::AppError;
use crate::service::rsvp::RsvpScope;

pub const STORE_VAR: &str = "COMMUNITY_EVENTS_STORE";
pub const RSVP_SCOPE_VAR: &str = "COMMUNITY_EVENTS_RSVP_SCOPE";
pub const SQLITE_MAX_CONNECTIONS_VAR: &str = "COMMUNITY_EVENTS_SQLITE_MAX_CONNECTIONS";

const DEFAULT_SQLITE_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File(PathBuf),
    Sqlite(String),
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "memory" {
            return Ok(StoreBackend::Memory);
        }
        if let Some(dir) = raw.strip_prefix("file:") {
            if dir.is_empty() {
                return Err(AppError::Config(format!("{STORE_VAR}: file backend needs a directory")));
            }
            return Ok(StoreBackend::File(PathBuf::from(dir)));
        }
        if let Some(url) = raw.strip_prefix("sqlite:") {
            // accept both `sqlite:events.db` and `sqlite:sqlite://events.db`
            let url = if url.starts_with("sqlite:") {
                url.to_string()
            } else {
                format!("sqlite:{url}")
            };
            return Ok(StoreBackend::Sqlite(url));
        }
        Err(AppError::Config(format!("{STORE_VAR}: unknown backend '{raw}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    pub rsvp_scope: RsvpScope,
    pub sqlite_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            rsvp_scope: RsvpScope::default(),
            sqlite_max_connections: DEFAULT_SQLITE_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup(STORE_VAR) {
            Some(raw) => StoreBackend::parse(&raw)?,
            None => StoreBackend::Memory,
        };
        let rsvp_scope = match lookup(RSVP_SCOPE_VAR) {
            Some(raw) => match raw.trim() {
                "shared" => RsvpScope::Shared,
                "per-user" | "per_user" => RsvpScope::PerUser,
                other => {
                    return Err(AppError::Config(format!(
                        "{RSVP_SCOPE_VAR}: expected 'shared' or 'per-user', got '{other}'"
                    )))
                }
            },
            None => RsvpScope::default(),
        };
        let sqlite_max_connections = match lookup(SQLITE_MAX_CONNECTIONS_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::Config(format!(
                        "{SQLITE_MAX_CONNECTIONS_VAR}: expected a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_SQLITE_MAX_CONNECTIONS,
        };
        Ok(Self {
            store,
            rsvp_scope,
            sqlite_max_connections,
        })
    }
}
