use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenKind;
use auth::TokenPair;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::events::UserRegisteredEvent;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::EventPublisher;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for registration, login and token rotation.
///
/// Stateless between calls: tokens are never recorded server-side, so a
/// rotated-out refresh token stays usable until it expires.
pub struct AuthService<UR, EP>
where
    UR: UserRepository,
    EP: EventPublisher,
{
    repository: Arc<UR>,
    event_publisher: Arc<EP>,
    authenticator: Arc<Authenticator>,
}

impl<UR, EP> AuthService<UR, EP>
where
    UR: UserRepository,
    EP: EventPublisher,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `event_publisher` - Domain event publishing implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(
        repository: Arc<UR>,
        event_publisher: Arc<EP>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            authenticator,
        }
    }

    fn issue_pair(&self, user_id: &UserId) -> Result<TokenPair, AuthError> {
        Ok(self.authenticator.issue_pair(user_id)?)
    }

    fn verify_subject(&self, token: &str, kind: TokenKind) -> Result<UserId, AuthError> {
        let claims = self.authenticator.verify(token, kind)?;
        UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::Malformed(format!("Invalid subject: {}", e)))
    }
}

#[async_trait]
impl<UR, EP> AuthServicePort for AuthService<UR, EP>
where
    UR: UserRepository,
    EP: EventPublisher,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        let event = UserRegisteredEvent::new(&created_user);
        if let Err(e) = self.event_publisher.publish_user_registered(&event).await {
            tracing::error!(
                "Failed to publish UserRegistered event for user {}: {}",
                created_user.id,
                e
            );
        }

        Ok(created_user)
    }

    async fn issue_tokens(&self, user_id: &UserId) -> Result<TokenPair, AuthError> {
        self.issue_pair(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        let Ok(username) = Username::new(command.username) else {
            return Err(self.authenticator.reject_unknown_user(&command.password).into());
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login rejected: unknown username");
            return Err(self.authenticator.reject_unknown_user(&command.password).into());
        };

        self.authenticator
            .verify_password(&command.password, &user.password_hash)
            .map_err(|e| {
                tracing::debug!(user_id = %user.id, "Login rejected: {}", e);
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue_pair(&user.id)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let user_id = self.verify_subject(refresh_token, TokenKind::Refresh)?;

        tracing::debug!(user_id = %user_id, "Rotating token pair");
        self.issue_pair(&user_id)
    }

    async fn authenticate(&self, access_token: &str) -> Result<UserId, AuthError> {
        self.verify_subject(access_token, TokenKind::Access)
    }
}
