use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for the authentication flow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a new account.
    ///
    /// # Returns
    /// Created user entity (carries the new `UserId`)
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `EmailTaken` - Email is already registered
    /// * `Store` / `Internal` - Persistence or hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Issue a fresh token pair for an already identified user.
    ///
    /// # Errors
    /// * `Internal` - Token signing failed
    async fn issue_tokens(&self, user_id: &UserId) -> Result<TokenPair, AuthError>;

    /// Check username and password and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Store` / `Internal` - Persistence, hashing or signing failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a brand-new pair (both tokens rotated).
    ///
    /// # Errors
    /// * `InvalidSignature`, `Expired`, `KindMismatch`, `Malformed` - Token rejected
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Resolve an access token to the user it was issued for.
    ///
    /// # Errors
    /// * `InvalidSignature`, `Expired`, `KindMismatch`, `Malformed` - Token rejected
    async fn authenticate(&self, access_token: &str) -> Result<UserId, AuthError>;
}
