// ABOUTME: HS256 bearer token issuing and validation
// ABOUTME: Tokens carry the user id as `sub` and expire after a configured window

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens with a shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: TimeDelta,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: i64) -> AuthResult<Self> {
        if secret.is_empty() {
            return Err(AuthError::Configuration("JWT secret must not be empty".into()));
        }
        if expiry_hours <= 0 {
            return Err(AuthError::Configuration(format!(
                "Token expiry must be positive, got {} hours",
                expiry_hours
            )));
        }

        let expiry = TimeDelta::try_hours(expiry_hours).ok_or_else(|| {
            AuthError::Configuration(format!("Token expiry of {} hours is too large", expiry_hours))
        })?;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        })
    }

    pub fn issue(&self, user_id: &str, email: &str) -> AuthResult<String> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user_id: &str, email: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let expires_at = now.checked_add_signed(self.expiry).ok_or_else(|| {
            AuthError::Configuration("Token expiry falls outside the supported date range".into())
        })?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("expiry_hours", &self.expiry.num_hours())
            .finish_non_exhaustive()
    }
}
