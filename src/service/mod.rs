pub mod event;
pub mod log;
pub mod rsvp;
pub mod session;

use std::sync::Arc;

use crate::{
    config::Config,
    db::{self, SharedStore},
    errors::AppError,
    models::{EventId, User},
};

use self::{event::EventCatalog, rsvp::{RsvpScope, RsvpTracker}, session::SessionManager};

/// The three services every screen talks to. Cloning shares them.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub catalog: Arc<EventCatalog>,
    pub rsvps: Arc<RsvpTracker>,
}

impl AppState {
    pub fn new(store: SharedStore, rsvp_scope: RsvpScope) -> Self {
        Self {
            session: Arc::new(SessionManager::new(store.clone())),
            catalog: Arc::new(EventCatalog::new(store.clone())),
            rsvps: Arc::new(RsvpTracker::new(store, rsvp_scope)),
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let store = db::init_store(config).await?;
        Ok(Self::new(store, config.rsvp_scope))
    }

    /// Loads the stored session and that session's RSVP set.
    pub async fn restore(&self) -> Result<(Option<User>, Vec<EventId>), AppError> {
        let user = self.session.load_session().await?;
        let rsvps = self.rsvps.load_rsvps(user.as_ref()).await?;
        Ok((user, rsvps))
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.session.authenticate(email, password).await?;
        // the previous account's set must not outlive its session
        self.rsvps.clear_view();
        // a failed reload keeps the session with an empty view
        if let Err(err) = self.rsvps.load_rsvps(Some(&user)).await {
            ::log::warn!("signed in but could not load rsvps: {}", err);
        }
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.logout().await?;
        self.rsvps.clear_view();
        Ok(())
    }
}
