use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetimes applied to freshly issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(30),
        }
    }
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds
    pub access_expires_in: i64,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Stand-in hash checked when no account matches a login.
///
/// Same Argon2id parameters as freshly hashed passwords, so a miss costs as
/// much as a wrong password. No password verifies against it.
const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bi11c2VyLXNhbHQ$BwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyAhIiMkJSY";

/// Authentication coordinator combining password hashing and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: TokenCodec,
    lifetimes: TokenLifetimes,
}

impl Authenticator {
    /// Create an authenticator reading the wall clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `lifetimes` - Access and refresh token lifetimes
    pub fn new(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self::with_clock(jwt_secret, lifetimes, Arc::new(SystemClock))
    }

    /// Create an authenticator with an explicit time source.
    pub fn with_clock(jwt_secret: &[u8], lifetimes: TokenLifetimes, clock: Arc<dyn Clock>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            codec: TokenCodec::new(jwt_secret, clock),
            lifetimes,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Reject a login for which no stored hash exists.
    ///
    /// Runs a full verification against a stand-in hash first, so the caller
    /// cannot tell an unknown username from a wrong password by response time.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, UNKNOWN_USER_HASH);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a fresh access and refresh token for `subject`.
    ///
    /// # Errors
    /// * `TokenError` - Signing failed
    pub fn issue_pair(&self, subject: impl ToString) -> Result<TokenPair, TokenError> {
        let subject = subject.to_string();
        let issued_at = self.codec.now();

        let access_token = self.codec.encode(&Claims::new(
            &subject,
            TokenKind::Access,
            issued_at,
            self.lifetimes.access,
        ))?;
        let refresh_token = self.codec.encode(&Claims::new(
            &subject,
            TokenKind::Refresh,
            issued_at,
            self.lifetimes.refresh,
        ))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer",
            access_expires_in: self.lifetimes.access.num_seconds(),
            refresh_expires_in: self.lifetimes.refresh.num_seconds(),
        })
    }

    /// Verify a token of the given kind and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Malformed, bad signature, expired or wrong kind
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        self.codec.verify(token, kind)
    }
}
