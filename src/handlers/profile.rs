use log::error;
use tokio::sync::watch;

use super::{Lifecycle, Notice, ScreenOutcome};
use crate::{
    dto::{AuthMode, LoginUserRequest},
    models::{Event, EventId, User},
    service::{event::seed_events_in, AppState},
};

/// Login / signup form while signed out, the member's RSVPs while signed in.
pub struct ProfileScreen {
    state: AppState,
    lifecycle: Lifecycle,
    user: Option<User>,
    rsvps: Vec<EventId>,
    mode: AuthMode,
    pub email: String,
    pub password: String,
    logout_pending: bool,
    session_rx: watch::Receiver<Option<User>>,
    rsvps_rx: watch::Receiver<Vec<EventId>>,
}

impl ProfileScreen {
    pub fn new(state: AppState) -> Self {
        let session_rx = state.session.subscribe();
        let rsvps_rx = state.rsvps.subscribe();
        Self {
            state,
            lifecycle: Lifecycle::default(),
            user: None,
            rsvps: Vec::new(),
            mode: AuthMode::default(),
            email: String::new(),
            password: String::new(),
            logout_pending: false,
            session_rx,
            rsvps_rx,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    pub async fn on_mount(&mut self) -> ScreenOutcome {
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
                error!("[{} : {}] failed to load profile: {}", file!(), line!(), err);
                ScreenOutcome::notice(Notice::from(&err))
            }
        }
    }

    pub fn on_focus(&mut self) {
        self.user = self.session_rx.borrow_and_update().clone();
        self.rsvps = self.rsvps_rx.borrow_and_update().clone();
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub async fn submit_auth(&mut self) -> ScreenOutcome {
        if LoginUserRequest::new(&self.email, &self.password).validate().is_err() {
            return ScreenOutcome::notice(Notice::error("Please fill in all fields"));
        }

        let res = self.state.authenticate(&self.email, &self.password).await;
        if !self.lifecycle.is_mounted() {
            return ScreenOutcome::discarded();
        }
        match res {
            Ok(user) => {
                self.user = Some(user);
                self.rsvps = self.state.rsvps.current();
                self.email.clear();
                self.password.clear();
                ScreenOutcome::notice(Notice::success(self.mode.success_message()))
            }
            Err(err) => {
                error!("[{} : {}] authentication failed: {}", file!(), line!(), err);
                ScreenOutcome::notice(Notice::error("Authentication failed"))
            }
        }
    }

    /// The member's RSVPs, looked up in the built-in catalog only.
    pub fn rsvped_events(&self) -> Vec<Event> {
        seed_events_in(&self.rsvps)
    }

    pub fn rsvp_count(&self) -> usize {
        self.rsvped_events().len()
    }

    pub fn request_logout(&mut self) -> ScreenOutcome {
        self.logout_pending = true;
        ScreenOutcome::notice(Notice::new("Logout", "Are you sure you want to logout?"))
    }

    pub fn cancel_logout(&mut self) {
        self.logout_pending = false;
    }

    pub fn is_logout_pending(&self) -> bool {
        self.logout_pending
    }

    pub async fn confirm_logout(&mut self) -> ScreenOutcome {
        if !self.logout_pending {
            return ScreenOutcome::none();
        }
        self.logout_pending = false;

        let res = self.state.logout().await;
        if !self.lifecycle.is_mounted() {
            return ScreenOutcome::discarded();
        }
        match res {
            Ok(()) => {
                self.user = None;
                self.rsvps.clear();
                ScreenOutcome::none()
            }
            Err(err) => {
                error!("[{} : {}] failed to log out: {}", file!(), line!(), err);
                ScreenOutcome::notice(Notice::error("Failed to log out"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        db::{testing::RecordingStore, USER_KEY},
        service::rsvp::RsvpScope,
    };

    fn state(scope: RsvpScope) -> (Arc<RecordingStore>, AppState) {
        let store = Arc::new(RecordingStore::new());
        (store.clone(), AppState::new(store, scope))
    }

    async fn signed_in(scope: RsvpScope) -> (Arc<RecordingStore>, ProfileScreen) {
        let (store, state) = state(scope);
        let mut profile = ProfileScreen::new(state);
        profile.on_mount().await;
        profile.email = "a@b.com".to_string();
        profile.password = "x".to_string();
        profile.submit_auth().await;
        (store, profile)
    }

    #[tokio::test]
    async fn empty_form_is_rejected() {
        let (store, state) = state(RsvpScope::PerUser);
        let mut profile = ProfileScreen::new(state);
        profile.email = "a@b.com".to_string();
        let outcome = profile.submit_auth().await;
        assert_eq!(outcome, ScreenOutcome::notice(Notice::error("Please fill in all fields")));
        assert_eq!(store.writes(), 0);
        assert_eq!(profile.email, "a@b.com");
    }

    #[tokio::test]
    async fn login_and_signup_messages() {
        let (_, state) = state(RsvpScope::PerUser);
        let mut profile = ProfileScreen::new(state);
        profile.email = "a@b.com".to_string();
        profile.password = "x".to_string();
        let outcome = profile.submit_auth().await;
        assert_eq!(outcome.notice, Some(Notice::success("Logged in successfully!")));
        assert!(profile.email.is_empty() && profile.password.is_empty());

        profile.toggle_mode();
        assert_eq!(profile.mode(), AuthMode::Signup);
        profile.email = "c@d.com".to_string();
        profile.password = "y".to_string();
        let outcome = profile.submit_auth().await;
        assert_eq!(outcome.notice, Some(Notice::success("Account created!")));
        assert_eq!(profile.user().unwrap().email, "c@d.com");
    }

    #[tokio::test]
    async fn failed_write_shows_authentication_failed() {
        let (store, state) = state(RsvpScope::PerUser);
        store.fail_writes(true);
        let mut profile = ProfileScreen::new(state);
        profile.email = "a@b.com".to_string();
        profile.password = "x".to_string();
        let outcome = profile.submit_auth().await;
        assert_eq!(outcome.notice, Some(Notice::error("Authentication failed")));
        assert!(profile.user().is_none());
        assert_eq!(profile.email, "a@b.com");
    }

    #[tokio::test]
    async fn rsvps_made_on_home_show_up_on_focus() {
        let (_, mut profile) = signed_in(RsvpScope::PerUser).await;
        let user = profile.user().cloned();
        profile.state.rsvps.toggle_rsvp("3", user.as_ref()).await.unwrap();
        profile.state.rsvps.toggle_rsvp("1", user.as_ref()).await.unwrap();
        assert_eq!(profile.rsvp_count(), 0);

        profile.on_focus();
        let names: Vec<String> = profile.rsvped_events().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["React Native Meetup", "Mobile App Design Conference"]);
        assert_eq!(profile.rsvp_count(), 2);
    }

    #[tokio::test]
    async fn created_events_are_not_listed_as_rsvps() {
        let (_, mut profile) = signed_in(RsvpScope::PerUser).await;
        let user = profile.user().cloned();
        profile.state.rsvps.toggle_rsvp("custom-id", user.as_ref()).await.unwrap();
        profile.on_focus();
        assert!(profile.rsvped_events().is_empty());
    }

    #[tokio::test]
    async fn logout_needs_confirmation() {
        let (store, mut profile) = signed_in(RsvpScope::Shared).await;
        let user = profile.user().cloned();
        profile.state.rsvps.toggle_rsvp("2", user.as_ref()).await.unwrap();
        profile.on_focus();

        assert_eq!(profile.confirm_logout().await, ScreenOutcome::none());
        assert!(profile.user().is_some());

        let prompt = profile.request_logout();
        assert_eq!(prompt.notice.unwrap().title, "Logout");
        profile.cancel_logout();
        assert!(!profile.is_logout_pending());
        assert_eq!(profile.confirm_logout().await, ScreenOutcome::none());
        assert!(profile.user().is_some());

        profile.request_logout();
        profile.confirm_logout().await;
        assert!(profile.user().is_none());
        assert_eq!(profile.rsvp_count(), 0);
        assert_eq!(store.raw(USER_KEY).await, None);
    }

    #[tokio::test]
    async fn failed_logout_keeps_the_member_signed_in() {
        let (store, mut profile) = signed_in(RsvpScope::PerUser).await;
        store.fail_writes(true);
        profile.request_logout();
        let outcome = profile.confirm_logout().await;
        assert_eq!(outcome.notice, Some(Notice::error("Failed to log out")));
        assert!(profile.user().is_some());
    }
}
