//! Authentication utilities library
//!
//! Provides the token and password plumbing used by the account service:
//! - Kind-tagged JWT issuance and verification (HS256)
//! - Injectable clock for deterministic expiry
//! - Password hashing (Argon2id)
//! - Access/refresh token pair issuance
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenKind, TokenError};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::with_system_clock(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("user123", TokenKind::Refresh, Duration::days(30)).unwrap();
//!
//! let claims = codec.verify(&token, TokenKind::Refresh).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! // A refresh token is never accepted where an access token is expected
//! assert!(matches!(
//!     codec.verify(&token, TokenKind::Access),
//!     Err(TokenError::KindMismatch { .. })
//! ));
//! ```
//!
//! ## Login and refresh
//! ```
//! use auth::{Authenticator, TokenKind, TokenLifetimes};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", TokenLifetimes::default());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a pair
//! auth.verify_password("password123", &hash).unwrap();
//! let pair = auth.issue_pair("user123").unwrap();
//!
//! // Refresh: verify the refresh token, rotate both tokens
//! let claims = auth.verify(&pair.refresh_token, TokenKind::Refresh).unwrap();
//! let rotated = auth.issue_pair(&claims.sub).unwrap();
//! assert_ne!(rotated.refresh_token, pair.refresh_token);
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use authenticator::TokenPair;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
