//! Screen controllers. Each screen keeps its own view state, talks only to the
//! services in [`AppState`](crate::service::AppState) and answers every user
//! action with a [`ScreenOutcome`].

pub mod create_event;
pub mod home;
pub mod profile;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::errors::AppError;

/// A message the user has to see, e.g. as an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn success(message: &str) -> Self {
        Self::new("Success", message)
    }

    pub fn error(message: &str) -> Self {
        Self::new("Error", message)
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::AuthenticationRequired => Notice::new("Please Login", err.user_message()),
            _ => Notice::error(err.user_message()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    CreateEvent,
    Profile,
    Back,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenOutcome {
    pub notice: Option<Notice>,
    pub redirect: Option<Route>,
    /// The screen was unmounted before the result arrived and ignored it.
    pub discarded: bool,
}

impl ScreenOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }

    pub fn redirect(route: Route) -> Self {
        Self {
            redirect: Some(route),
            ..Self::default()
        }
    }

    pub fn with_redirect(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    pub fn discarded() -> Self {
        Self {
            discarded: true,
            ..Self::default()
        }
    }
}

/// Mounted flag shared between a screen and whatever can dismiss it.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    mounted: Arc<AtomicBool>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl Lifecycle {
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}
