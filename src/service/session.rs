use log::{error, info};
use tokio::sync::{watch, Mutex};

use crate::{
    db::{self, SharedStore},
    dto::LoginUserRequest,
    errors::AppError,
    models::User,
};

/// Owns the `user` key and publishes the signed-in user to subscribers.
pub struct SessionManager {
    store: SharedStore,
    current: watch::Sender<Option<User>>,
    write_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(store: SharedStore) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            store,
            current,
            write_lock: Mutex::new(()),
        }
    }

    /// Persisted session, if any. A corrupted record counts as signed out.
    pub async fn load_session(&self) -> Result<Option<User>, AppError> {
        let _guard = self.write_lock.lock().await;
        let user = db::user::get(self.store.as_ref()).await?;
        self.current.send_replace(user.clone());
        Ok(user)
    }

    /// Accepts any non-empty credentials. The password is never stored.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        LoginUserRequest::new(email, password).validate()?;

        let user = User::new(email);
        let _guard = self.write_lock.lock().await;
        if let Err(err) = db::user::set(&user, self.store.as_ref()).await {
            error!("failed to persist session for {}: {}", user.email, err);
            return Err(err);
        }
        self.current.send_replace(Some(user.clone()));
        info!("signed in {} as {}", user.email, user.id);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        db::user::clear(self.store.as_ref()).await?;
        if let Some(user) = self.current.send_replace(None) {
            info!("signed out {}", user.email);
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }
}
