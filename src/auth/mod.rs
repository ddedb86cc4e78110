use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by a session token issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    pub fn new(sub: Uuid, name: impl Into<String>, ttl_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(ttl_hours as i64)).timestamp();

        Self {
            sub,
            name: name.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session secret not configured")]
    MissingSecret,

    #[error("session token generation failed: {0}")]
    Generation(String),

    #[error("invalid session token: {0}")]
    Invalid(String),
}

/// HS256 keys shared with the identity provider
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(secret: &str) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn issue(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| SessionError::Generation(e.to_string()))
    }

    /// Decode and validate signature and expiry
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map_err(|e| SessionError::Invalid(e.to_string()))?;

        Ok(token_data.claims)
    }
}
