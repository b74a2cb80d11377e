use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::TokenError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Signs and verifies kind-tagged tokens.
///
/// Tokens are compact JWTs signed with HS256. The signing secret and the clock
/// are both supplied at construction; nothing is read from global state.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Create a new codec with a secret key and a time source.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `clock` - Time source used for `iat`/`exp` and for expiry checks
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load secrets from configuration or the environment, never from code
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock,
        }
    }

    /// Create a codec that reads the wall clock.
    pub fn with_system_clock(secret: &[u8]) -> Self {
        Self::new(secret, Arc::new(SystemClock))
    }

    /// Current time according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Current time according to the injected clock, as Unix seconds.
    pub fn now_timestamp(&self) -> i64 {
        self.now().timestamp()
    }

    /// Issue a signed token.
    ///
    /// # Arguments
    /// * `subject` - Token owner identifier
    /// * `kind` - Access or refresh
    /// * `ttl` - Lifetime counted from now
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(
        &self,
        subject: impl ToString,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, kind, self.now(), ttl);
        self.encode(&claims)
    }

    /// Sign already-built claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked before any claim is looked at.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `expected_kind` - Kind the consuming endpoint accepts
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed or its claims have the wrong shape
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Expired` - Current time is at or past `exp`
    /// * `KindMismatch` - Token was issued for the other purpose
    pub fn verify(&self, token: &str, expected_kind: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is judged against the injected clock below.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if claims.is_expired(self.now_timestamp()) {
            return Err(TokenError::Expired);
        }

        if claims.kind != expected_kind {
            return Err(TokenError::KindMismatch {
                expected: expected_kind,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::clock::ManualClock;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn codec_with_clock() -> (TokenCodec, Arc<ManualClock>) {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        (TokenCodec::new(SECRET, clock.clone()), clock)
    }

    fn corrupt_signature(token: &str) -> String {
        let (message, signature) = token.rsplit_once('.').expect("token has three segments");
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", message, chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issue_and_verify() {
        let (codec, _) = codec_with_clock();

        for kind in [TokenKind::Access, TokenKind::Refresh] {
            let token = codec
                .issue("user123", kind, Duration::minutes(15))
                .expect("Failed to issue token");
            assert_eq!(token.split('.').count(), 3);

            let claims = codec.verify(&token, kind).expect("Failed to verify token");
            assert_eq!(claims.sub, "user123");
            assert_eq!(claims.kind, kind);
            assert_eq!(claims.exp - claims.iat, 15 * 60);
        }
    }

    #[test]
    fn test_verify_kind_mismatch() {
        let (codec, _) = codec_with_clock();

        let refresh = codec
            .issue("user123", TokenKind::Refresh, Duration::days(30))
            .unwrap();
        assert_eq!(
            codec.verify(&refresh, TokenKind::Access),
            Err(TokenError::KindMismatch {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        );

        let access = codec
            .issue("user123", TokenKind::Access, Duration::minutes(15))
            .unwrap();
        assert!(matches!(
            codec.verify(&access, TokenKind::Refresh),
            Err(TokenError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_zero_ttl_is_expired() {
        let (codec, _) = codec_with_clock();

        let token = codec
            .issue("user123", TokenKind::Access, Duration::zero())
            .unwrap();
        assert_eq!(
            codec.verify(&token, TokenKind::Access),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_verify_after_clock_passes_expiry() {
        let (codec, clock) = codec_with_clock();

        let token = codec
            .issue("user123", TokenKind::Access, Duration::minutes(15))
            .unwrap();

        clock.advance(Duration::minutes(14));
        assert!(codec.verify(&token, TokenKind::Access).is_ok());

        clock.advance(Duration::minutes(1));
        assert_eq!(
            codec.verify(&token, TokenKind::Access),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_verify_corrupted_signature() {
        let (codec, _) = codec_with_clock();

        let token = codec
            .issue("user123", TokenKind::Access, Duration::minutes(15))
            .unwrap();

        assert_eq!(
            codec.verify(&corrupt_signature(&token), TokenKind::Access),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_swapped_payload() {
        let (codec, _) = codec_with_clock();

        let access = codec
            .issue("user123", TokenKind::Access, Duration::minutes(15))
            .unwrap();
        let refresh = codec
            .issue("user123", TokenKind::Refresh, Duration::days(30))
            .unwrap();

        // Refresh payload grafted onto the access token's header and signature
        let access_parts: Vec<&str> = access.split('.').collect();
        let refresh_parts: Vec<&str> = refresh.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            access_parts[0], refresh_parts[1], access_parts[2]
        );

        assert_eq!(
            codec.verify(&forged, TokenKind::Refresh),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec1 = TokenCodec::with_system_clock(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::with_system_clock(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1
            .issue("user123", TokenKind::Access, Duration::minutes(15))
            .unwrap();

        assert_eq!(
            codec2.verify(&token, TokenKind::Access),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_malformed_token() {
        let (codec, _) = codec_with_clock();

        assert!(matches!(
            codec.verify("not-a-token", TokenKind::Access),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            codec.verify("invalid.token.here", TokenKind::Access),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            codec.verify("", TokenKind::Access),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_verify_signed_but_foreign_claims() {
        let (codec, _) = codec_with_clock();

        // Correctly signed, but missing the kind/iat/exp/jti claims
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": "user123" }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            codec.verify(&token, TokenKind::Access),
            Err(TokenError::Malformed(_))
        ));
    }
}
