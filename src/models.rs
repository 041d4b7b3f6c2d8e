use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EventId = String;
pub type UserId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
}

impl User {
    pub fn new(email: &str) -> Self {
        Self {
            id: new_id(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub attendees: u32,
    pub created_by: UserId,
}

/// Random identifier for users and user-created events.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_uses_camel_case_on_disk() {
        let event = Event {
            id: "abc".to_string(),
            name: "Board games".to_string(),
            description: "Bring your own".to_string(),
            date: Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap(),
            location: "Library".to_string(),
            attendees: 1,
            created_by: "u1".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["createdBy"], "u1");
        assert_eq!(json["date"], "2026-03-01T18:30:00Z");
    }

    #[test]
    fn reads_iso_dates_with_milliseconds() {
        let raw = r#"{"id":"x1","name":"n","description":"d","date":"2026-03-01T18:30:00.000Z",
            "location":"l","attendees":3,"createdBy":"u"}"#;
        let event: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(event.attendees, 3);
        assert_eq!(event.date, Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = User::new("a@b.com");
        let b = User::new("a@b.com");
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }
}
