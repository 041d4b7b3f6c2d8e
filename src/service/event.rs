use std::sync::OnceLock;

use chrono::{Duration, Utc};
use log::{error, info};
use tokio::sync::Mutex;

use crate::{
    db::{self, SharedStore},
    dto::NewEventDto,
    errors::AppError,
    models::{new_id, Event, EventId},
};

static SEED_EVENTS: OnceLock<Vec<Event>> = OnceLock::new();

fn seed(
    id: &str,
    name: &str,
    description: &str,
    days_ahead: i64,
    location: &str,
    attendees: u32,
    created_by: &str,
) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        date: Utc::now() + Duration::days(days_ahead),
        location: location.to_string(),
        attendees,
        created_by: created_by.to_string(),
    }
}

/// The built-in catalog. Dates are fixed relative to the first call in this process.
pub fn list_seed_events() -> &'static [Event] {
    SEED_EVENTS.get_or_init(|| {
        vec![
            seed(
                "1",
                "React Native Meetup",
                "Join us for an exciting discussion about React Native best practices and new features.",
                7,
                "San Francisco, CA",
                45,
                "user1",
            ),
            seed(
                "2",
                "Web Development Workshop",
                "Learn modern web development techniques with hands-on coding sessions.",
                14,
                "New York, NY",
                32,
                "user2",
            ),
            seed(
                "3",
                "Mobile App Design Conference",
                "Explore the latest trends in mobile app design and user experience.",
                21,
                "Austin, TX",
                78,
                "user3",
            ),
            seed(
                "4",
                "JavaScript Fundamentals",
                "Master the fundamentals of JavaScript programming language.",
                3,
                "Seattle, WA",
                56,
                "user4",
            ),
        ]
    })
}

/// Seed events whose id is in `ids`, in catalog order. User-created events are not included.
pub fn seed_events_in(ids: &[EventId]) -> Vec<Event> {
    list_seed_events()
        .iter()
        .filter(|event| ids.contains(&event.id))
        .cloned()
        .collect()
}

/// Owns the `userCreatedEvents` key.
pub struct EventCatalog {
    store: SharedStore,
    write_lock: Mutex<()>,
}

impl EventCatalog {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn list_seed_events(&self) -> &'static [Event] {
        list_seed_events()
    }

    pub async fn create_event(&self, dto: NewEventDto, author_id: &str) -> Result<Event, AppError> {
        dto.validate()?;

        let event = Event {
            id: new_id(),
            name: dto.name,
            description: dto.description,
            date: dto.date,
            location: dto.location,
            attendees: 1,
            created_by: author_id.to_string(),
        };

        // read-append-write of the whole list, one writer at a time
        let _guard = self.write_lock.lock().await;
        let mut events = db::event::get_all_strict(self.store.as_ref()).await?;
        events.push(event.clone());
        if let Err(err) = db::event::set_all(&events, self.store.as_ref()).await {
            error!("failed to save event '{}': {}", event.name, err);
            return Err(err);
        }
        info!("event {} '{}' created by {}", event.id, event.name, author_id);
        Ok(event)
    }

    pub async fn list_user_created_events(&self) -> Result<Vec<Event>, AppError> {
        db::event::get_all(self.store.as_ref()).await
    }
}
