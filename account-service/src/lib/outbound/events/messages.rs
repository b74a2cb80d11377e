use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::events::UserRegisteredEvent;

/// Serializable envelope for all user-related events.
///
/// Infrastructure representation of domain events for subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum UserEventMessage {
    UserRegistered(UserRegisteredMessage),
}

impl UserEventMessage {
    pub fn event_type(&self) -> &'static str {
        match self {
            UserEventMessage::UserRegistered(_) => "user_registered",
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            UserEventMessage::UserRegistered(m) => &m.user_id,
        }
    }
}

/// Serializable message for UserRegistered domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegisteredMessage {
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

impl From<&UserRegisteredEvent> for UserRegisteredMessage {
    fn from(event: &UserRegisteredEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            user_id: event.user_id.clone(),
            username: event.username.clone(),
            email: event.email.clone(),
            registered_at: event.registered_at,
        }
    }
}

impl From<&UserRegisteredEvent> for UserEventMessage {
    fn from(event: &UserRegisteredEvent) -> Self {
        UserEventMessage::UserRegistered(UserRegisteredMessage::from(event))
    }
}
