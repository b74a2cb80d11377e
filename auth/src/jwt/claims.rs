use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Purpose a token was issued for.
///
/// Carried in the `kind` claim so a refresh token can never pass as an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in every issued token.
///
/// Timestamps are Unix seconds, following RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Token purpose
    pub kind: TokenKind,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Build claims for `subject` issued at `issued_at` and living for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identifier of the token owner
    /// * `kind` - Access or refresh
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime; `exp = iat + ttl`
    pub fn new(
        subject: impl ToString,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.to_string(),
            kind,
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// A token is valid strictly before its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
