use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use std::time::Duration;

use async_trait::async_trait;

use super::{KeyValueStore, MemoryStore};
use crate::errors::AppError;

/// Memory store that counts writes and can be told to fail them.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    next_read_delay: Mutex<Option<Duration>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// The next `get` sleeps for `delay` after reading, before returning.
    pub fn delay_next_read(&self, delay: Duration) {
        *self.next_read_delay.lock().unwrap() = Some(delay);
    }

    /// Seeds a raw value without counting it as a write.
    pub async fn put_raw(&self, key: &str, raw: &str) {
        self.inner.set(key, raw.to_string()).await.unwrap();
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("injected read failure".to_string()));
        }
        let value = self.inner.get(key).await;
        let delay = self.next_read_delay.lock().unwrap().take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        value
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("injected write failure".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("injected write failure".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key).await
    }
}
