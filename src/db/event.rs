use super::{read_json, read_json_strict, write_json, KeyValueStore, CREATED_EVENTS_KEY};
use crate::{errors::AppError, models::Event};

pub async fn get_all(store: &dyn KeyValueStore) -> Result<Vec<Event>, AppError> {
    Ok(read_json(store, CREATED_EVENTS_KEY).await?.unwrap_or_default())
}

/// Absent is empty, corrupted content is `MalformedData`.
pub async fn get_all_strict(store: &dyn KeyValueStore) -> Result<Vec<Event>, AppError> {
    Ok(read_json_strict(store, CREATED_EVENTS_KEY).await?.unwrap_or_default())
}

/// Overwrites the whole user-created list.
pub async fn set_all(events: &[Event], store: &dyn KeyValueStore) -> Result<(), AppError> {
    write_json(store, CREATED_EVENTS_KEY, events).await
}
