use log::error;

use super::{Lifecycle, Notice, Route, ScreenOutcome};
use crate::{dto::NewEventDto, service::AppState};

pub struct CreateEventScreen {
    state: AppState,
    lifecycle: Lifecycle,
}

impl CreateEventScreen {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    pub async fn submit(&mut self, draft: NewEventDto) -> ScreenOutcome {
        if draft.validate().is_err() {
            return ScreenOutcome::notice(Notice::error("Please fill in all fields"));
        }

        let user = match self.state.session.load_session().await {
            Ok(user) => user,
            Err(err) => {
                error!("[{} : {}] failed to read session: {}", file!(), line!(), err);
                return self.finish(ScreenOutcome::notice(Notice::error("Failed to create event")));
            }
        };
        let Some(user) = user else {
            return self.finish(
                ScreenOutcome::notice(Notice::error("You must be logged in to create an event"))
                    .with_redirect(Route::Back),
            );
        };

        let outcome = match self.state.catalog.create_event(draft, &user.id).await {
            Ok(_) => ScreenOutcome::notice(Notice::success("Event created successfully!"))
                .with_redirect(Route::Back),
            Err(err) => {
                error!("[{} : {}] failed to create event: {}", file!(), line!(), err);
                ScreenOutcome::notice(Notice::error("Failed to create event"))
            }
        };
        self.finish(outcome)
    }

    pub fn cancel(&self) -> ScreenOutcome {
        ScreenOutcome::redirect(Route::Back)
    }

    fn finish(&self, outcome: ScreenOutcome) -> ScreenOutcome {
        if self.lifecycle.is_mounted() {
            outcome
        } else {
            ScreenOutcome::discarded()
        }
    }
}
