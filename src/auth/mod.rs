use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed token lifetime. Login responses advertise this as "1h".
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: identity.into(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("token generation failed: {0}")]
    Generation(String),
}

/// Why verification failed. Clients see a single undifferentiated 403;
/// the distinction only reaches the logs.
#[derive(Debug, PartialEq, Error)]
pub enum VerifyError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is expired")]
    Expired,
    #[error("token is malformed: {0}")]
    Malformed(String),
}

/// Issues and verifies the HS256 bearer tokens handed out by login.
/// Pure computation over the signing secret and the clock; no state.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Fails only on an empty secret, which is a startup error rather
    /// than anything a request can hit.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn issue(&self, identity: &str) -> Result<String, TokenError> {
        let claims = Claims::new(identity);

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                _ => VerifyError::Malformed(e.to_string()),
            }),
        }
    }
}
