use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::User;

/// Domain event published after a new account is stored.
///
/// Carries a snapshot of the public user data; never the password hash.
#[derive(Debug, Clone)]
pub struct UserRegisteredEvent {
    pub event_id: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

impl UserRegisteredEvent {
    /// Create a new UserRegistered event from a user entity.
    ///
    /// # Arguments
    /// * `user` - User entity that was created
    ///
    /// # Returns
    /// UserRegisteredEvent with unique event ID and user snapshot
    pub fn new(user: &User) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            user_id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            registered_at: user.created_at,
        }
    }
}
