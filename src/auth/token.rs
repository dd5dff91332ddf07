use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims embedded in a login token. Stateless: nothing is persisted,
/// verification is signature plus expiry only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub id: i32,
    pub exp: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch or malformed token
    Invalid,
    /// Signature was fine but the embedded expiry has passed
    Expired,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Invalid => write!(f, "token invalid"),
            TokenError::Expired => write!(f, "token expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Sign a token carrying the user's identity, expiring `ttl_seconds`
/// from now. Forging one requires the secret.
pub fn issue(
    username: &str,
    user_id: i32,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = Utc::now().timestamp() + ttl_seconds;

    let claims = Claims {
        username: username.to_string(),
        id: user_id,
        exp: usize::try_from(exp).unwrap_or(0),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and verify a token, returning the original claims.
pub fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_then_verify_round_trips_claims() {
        let token = issue("testuser", 42, SECRET, 3600).unwrap();
        let claims = verify(&token, SECRET).unwrap();

        assert_eq!(claims.username, "testuser");
        assert_eq!(claims.id, 42);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = issue("testuser", 42, SECRET, 3600).unwrap();
        assert_eq!(verify(&token, "other-secret"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let token = issue("testuser", 42, SECRET, 3600).unwrap();
        let mut tampered = token;
        tampered.push('x');
        assert_eq!(verify(&tampered, SECRET), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(verify("not.a.jwt", SECRET), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_is_expired() {
        // Past the default 60-second leeway
        let token = issue("testuser", 42, SECRET, -120).unwrap();
        assert_eq!(verify(&token, SECRET), Err(TokenError::Expired));
    }
}
