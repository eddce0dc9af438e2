use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,

    pub email: String,

    /// Issued-at (Unix seconds).
    pub iat: i64,

    /// Expiry (Unix seconds).
    pub exp: i64,
}

/// Issues and verifies signed session tokens (HS256 JWT).
///
/// Constructed once at startup from the configured signing secret and handed
/// to whoever mints or checks tokens; rotating the secret invalidates every
/// outstanding token.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mints a token for the user, valid for `ttl` from now.
    pub fn issue(
        &self,
        user_id: &str,
        email: &str,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validates a token and returns its claims.
    ///
    /// Fails closed: malformed tokens, bad signatures, and expired timestamps
    /// all come back as `None`. Callers treat `None` as "unauthenticated",
    /// never as a server fault.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

/// Generate a random signing secret (64 character hex string).
#[must_use]
pub fn generate_secret() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret() -> TokenService {
        TokenService::new("test-secret-do-not-use-in-production")
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let service = with_secret();
        let token = service
            .issue("user-123", "reader@example.com", Duration::days(1))
            .unwrap();

        let claims = service.verify(&token).expect("fresh token should verify");
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "reader@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = with_secret()
            .issue("user-123", "reader@example.com", Duration::days(1))
            .unwrap();

        let other = TokenService::new("a-completely-different-secret");
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = with_secret();
        // Well past the validator's leeway window.
        let token = service
            .issue("user-123", "reader@example.com", Duration::hours(-2))
            .unwrap();

        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = with_secret();
        let token = service
            .issue("user-123", "reader@example.com", Duration::days(1))
            .unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(service.verify(&tampered).is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        let service = with_secret();
        assert!(service.verify("").is_none());
        assert!(service.verify("not.a.jwt").is_none());
        assert!(service.verify("definitely-not-a-jwt").is_none());
    }

    #[test]
    fn test_generate_secret_shape() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(secret, generate_secret());
    }
}
