pub mod event;
pub mod file;
pub mod memory;
pub mod rsvp;
pub mod sqlite;
pub mod user;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::{Config, StoreBackend},
    errors::AppError,
};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const USER_KEY: &str = "user";
pub const RSVPS_KEY: &str = "userRsvps";
pub const CREATED_EVENTS_KEY: &str = "userCreatedEvents";

/// Asynchronous string-keyed storage. A successful `set` or `remove` is durable.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

pub async fn init_store(config: &Config) -> Result<SharedStore, AppError> {
    let store: SharedStore = match &config.store {
        StoreBackend::Memory => {
            warn!("using in-memory store, nothing will survive a restart");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::File(dir) => Arc::new(FileStore::open(dir).await?),
        StoreBackend::Sqlite(url) => {
            Arc::new(SqliteStore::connect(url, config.sqlite_max_connections).await?)
        }
    };
    info!("store ready: {:?}", config.store);
    Ok(store)
}

/// Reads and decodes `key`. Unparseable content is logged and reported as absent.
pub async fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!("{}, treating as absent: {}", AppError::MalformedData(key.to_string()), err);
            Ok(None)
        }
    }
}

/// Like [`read_json`], but unparseable content is a `MalformedData` error. Used before
/// overwriting a value, so a corrupted blob is never replaced.
pub async fn read_json_strict<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str::<T>(&raw).map(Some).map_err(|err| {
        warn!("{}, refusing to overwrite: {}", AppError::MalformedData(key.to_string()), err);
        AppError::MalformedData(key.to_string())
    })
}

pub async fn write_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_json_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("k", "{not json".to_string()).await.unwrap();
        let value: Option<Vec<String>> = read_json(&store, "k").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn wrong_shape_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("k", r#"{"id":1}"#.to_string()).await.unwrap();
        let value: Option<Vec<String>> = read_json(&store, "k").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn strict_read_reports_malformed_json() {
        let store = MemoryStore::new();
        let value: Option<Vec<String>> = read_json_strict(&store, "k").await.unwrap();
        assert!(value.is_none());

        store.set("k", "[1,".to_string()).await.unwrap();
        let err = read_json_strict::<Vec<String>>(&store, "k").await.unwrap_err();
        assert_eq!(err, AppError::MalformedData("k".to_string()));
    }

    #[tokio::test]
    async fn round_trips_through_json() {
        let store = MemoryStore::new();
        write_json(&store, "k", &vec!["1", "3"]).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some(r#"["1","3"]"#));
        let value: Option<Vec<String>> = read_json(&store, "k").await.unwrap();
        assert_eq!(value, Some(vec!["1".to_string(), "3".to_string()]));
    }

    #[tokio::test]
    async fn memory_backend_is_the_default() {
        let store = init_store(&Config::default()).await.unwrap();
        assert!(store.get(USER_KEY).await.unwrap().is_none());
    }
}
