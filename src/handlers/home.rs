use log::error;
use tokio::sync::watch;

use super::{Lifecycle, Notice, Route, ScreenOutcome};
use crate::{
    errors::AppError,
    models::{Event, EventId, User},
    service::{rsvp::is_rsvped, AppState},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub event: Event,
    pub has_rsvped: bool,
}

impl EventCard {
    pub fn button_label(&self) -> &'static str {
        if self.has_rsvped {
            "✓ RSVP'd"
        } else {
            "RSVP"
        }
    }
}

/// The catalog feed with per-event RSVP buttons.
pub struct HomeScreen {
    state: AppState,
    lifecycle: Lifecycle,
    user: Option<User>,
    rsvps: Vec<EventId>,
    session_rx: watch::Receiver<Option<User>>,
    rsvps_rx: watch::Receiver<Vec<EventId>>,
}

impl HomeScreen {
    pub fn new(state: AppState) -> Self {
        let session_rx = state.session.subscribe();
        let rsvps_rx = state.rsvps.subscribe();
        Self {
            state,
            lifecycle: Lifecycle::default(),
            user: None,
            rsvps: Vec::new(),
            session_rx,
            rsvps_rx,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    pub async fn on_mount(&mut self) -> ScreenOutcome {
        self.reload().await
    }

    /// Picks up whatever other screens changed since this one last looked.
    pub fn on_focus(&mut self) {
        self.user = self.session_rx.borrow_and_update().clone();
        self.rsvps = self.rsvps_rx.borrow_and_update().clone();
    }

    /// Pull-to-refresh: reads the store again.
    pub async fn refresh(&mut self) -> ScreenOutcome {
        self.reload().await
    }

    async fn reload(&mut self) -> ScreenOutcome {
        let res = self.state.restore().await;
        if !self.lifecycle.is_mounted() {
            return ScreenOutcome::discarded();
        }
        match res {
            Ok((user, rsvps)) => {
                self.user = user;
                self.rsvps = rsvps;
                ScreenOutcome::none()
            }
            Err(err) => {
                error!("[{} : {}] failed to load session: {}", file!(), line!(), err);
                ScreenOutcome::notice(Notice::from(&err))
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn needs_login_prompt(&self) -> bool {
        self.user.is_none()
    }

    pub fn cards(&self) -> Vec<EventCard> {
        self.state
            .catalog
            .list_seed_events()
            .iter()
            .map(|event| EventCard {
                event: event.clone(),
                has_rsvped: is_rsvped(&event.id, &self.rsvps),
            })
            .collect()
    }

    pub fn is_rsvped(&self, event_id: &str) -> bool {
        is_rsvped(event_id, &self.rsvps)
    }

    pub async fn rsvp(&mut self, event_id: &str) -> ScreenOutcome {
        self.on_focus();
        let res = self.state.rsvps.toggle_rsvp(event_id, self.user.as_ref()).await;
        if !self.lifecycle.is_mounted() {
            return ScreenOutcome::discarded();
        }
        match res {
            Ok(rsvps) => {
                self.rsvps = rsvps;
                ScreenOutcome::notice(Notice::success("Your RSVP has been updated!"))
            }
            Err(AppError::AuthenticationRequired) => ScreenOutcome::notice(Notice::new(
                "Please Login",
                "You need to be logged in to RSVP for events",
            ))
            .with_redirect(Route::Profile),
            Err(err) => {
                error!("[{} : {}] failed to update rsvp: {}", file!(), line!(), err);
                ScreenOutcome::notice(Notice::error("Failed to update your RSVP"))
            }
        }
    }

    pub fn open_create_event(&self) -> ScreenOutcome {
        ScreenOutcome::redirect(Route::CreateEvent)
    }

    pub fn open_profile(&self) -> ScreenOutcome {
        ScreenOutcome::redirect(Route::Profile)
    }
}
