use log::{error, info};
use tokio::sync::{watch, Mutex};

use crate::{
    db::{self, SharedStore, RSVPS_KEY},
    errors::AppError,
    models::{EventId, User},
};

/// Where RSVP sets live in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsvpScope {
    /// One `userRsvps` set for whoever is signed in on this device.
    Shared,
    /// `userRsvps:<user id>`, so switching accounts does not inherit RSVPs.
    #[default]
    PerUser,
}

impl RsvpScope {
    /// `None` when the scope needs a user and there is none.
    pub fn key_for(self, user: Option<&User>) -> Option<String> {
        match (self, user) {
            (RsvpScope::Shared, _) => Some(RSVPS_KEY.to_string()),
            (RsvpScope::PerUser, Some(user)) => Some(format!("{RSVPS_KEY}:{}", user.id)),
            (RsvpScope::PerUser, None) => None,
        }
    }
}

pub fn is_rsvped(event_id: &str, rsvps: &[EventId]) -> bool {
    rsvps.iter().any(|id| id == event_id)
}

/// Owns the RSVP keys and publishes the signed-in user's set.
pub struct RsvpTracker {
    store: SharedStore,
    scope: RsvpScope,
    view: watch::Sender<Vec<EventId>>,
    write_lock: Mutex<()>,
}

impl RsvpTracker {
    pub fn new(store: SharedStore, scope: RsvpScope) -> Self {
        let (view, _) = watch::channel(Vec::new());
        Self {
            store,
            scope,
            view,
            write_lock: Mutex::new(()),
        }
    }

    pub fn scope(&self) -> RsvpScope {
        self.scope
    }

    /// Reads the stored set and publishes it. Holds the write lock so a load never
    /// publishes a set older than a toggle that finished first.
    pub async fn load_rsvps(&self, user: Option<&User>) -> Result<Vec<EventId>, AppError> {
        let _guard = self.write_lock.lock().await;
        let rsvps = match self.scope.key_for(user) {
            Some(key) => db::rsvp::get(&key, self.store.as_ref()).await?,
            None => Vec::new(),
        };
        self.view.send_replace(rsvps.clone());
        Ok(rsvps)
    }

    /// Flips membership of `event_id` and overwrites the stored set.
    pub async fn toggle_rsvp(
        &self,
        event_id: &str,
        current_user: Option<&User>,
    ) -> Result<Vec<EventId>, AppError> {
        let user = current_user.ok_or(AppError::AuthenticationRequired)?;
        let key = self
            .scope
            .key_for(Some(user))
            .ok_or(AppError::AuthenticationRequired)?;

        let _guard = self.write_lock.lock().await;
        let mut rsvps = db::rsvp::get(&key, self.store.as_ref()).await?;
        let going = if is_rsvped(event_id, &rsvps) {
            rsvps.retain(|id| id != event_id);
            false
        } else {
            rsvps.push(event_id.to_string());
            true
        };
        if let Err(err) = db::rsvp::set(&key, &rsvps, self.store.as_ref()).await {
            error!("failed to save rsvp for event {}: {}", event_id, err);
            return Err(err);
        }
        self.view.send_replace(rsvps.clone());
        info!(
            "{} {} event {}",
            user.email,
            if going { "is going to" } else { "cancelled" },
            event_id
        );
        Ok(rsvps)
    }

    pub fn current(&self) -> Vec<EventId> {
        self.view.borrow().clone()
    }

    /// Forgets the in-memory set. Stored sets are untouched.
    pub fn clear_view(&self) {
        self.view.send_replace(Vec::new());
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<EventId>> {
        self.view.subscribe()
    }
}
