use super::{read_json, write_json, KeyValueStore};
use crate::{errors::AppError, models::EventId};

/// Reads the set under `key`, dropping repeated ids left by older writers.
pub async fn get(key: &str, store: &dyn KeyValueStore) -> Result<Vec<EventId>, AppError> {
    let ids: Vec<EventId> = read_json(store, key).await?.unwrap_or_default();
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Ok(unique)
}

pub async fn set(key: &str, ids: &[EventId], store: &dyn KeyValueStore) -> Result<(), AppError> {
    write_json(store, key, ids).await
}
