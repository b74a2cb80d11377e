use auth::AuthenticationError;
use auth::TokenError;
use auth::TokenKind;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Errors of the login / registration / refresh flow.
///
/// Every variant is terminal for the request; nothing here is retried.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Email already exists: {0}")]
    EmailTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Expected {expected} token, got {actual} token")]
    KindMismatch {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("Token is malformed: {0}")]
    Malformed(String),

    // Infrastructure errors
    #[error("Credential store error: {0}")]
    Store(UserError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            TokenError::Expired => AuthError::Expired,
            TokenError::KindMismatch { expected, actual } => {
                AuthError::KindMismatch { expected, actual }
            }
            TokenError::Malformed(msg) => AuthError::Malformed(msg),
            TokenError::EncodingFailed(msg) => {
                AuthError::Internal(format!("Token generation failed: {}", msg))
            }
        }
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => {
                AuthError::Internal(format!("Password verification failed: {}", e))
            }
            AuthenticationError::TokenError(e) => e.into(),
        }
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => AuthError::UsernameTaken(username),
            UserError::EmailAlreadyExists(email) => AuthError::EmailTaken(email),
            other => AuthError::Store(other),
        }
    }
}
