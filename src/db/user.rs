use super::{read_json, write_json, KeyValueStore, USER_KEY};
use crate::{errors::AppError, models::User};

pub async fn get(store: &dyn KeyValueStore) -> Result<Option<User>, AppError> {
    read_json(store, USER_KEY).await
}

pub async fn set(user: &User, store: &dyn KeyValueStore) -> Result<(), AppError> {
    write_json(store, USER_KEY, user).await
}

pub async fn clear(store: &dyn KeyValueStore) -> Result<(), AppError> {
    store.remove(USER_KEY).await
}
