use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::extractors::AuthenticatedIdentity;
use crate::config::Config;
use crate::error::AppError;
use crate::models::Account;

/// Claims carried by every credential token.
///
/// On the wire: `{"accountId": "42", "username": "alice", "exp": 1718000000}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The account id, string-encoded.
    pub account_id: String,
    pub username: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Parses the claims into a request identity. `None` if `accountId` is not an integer.
    pub fn identity(&self) -> Option<AuthenticatedIdentity> {
        let account_id = self.account_id.trim().parse::<i32>().ok()?;
        Some(AuthenticatedIdentity {
            account_id,
            username: self.username.clone(),
        })
    }
}

/// Source of the current time for token issuance and expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Token capability: issue a signed token for an account and verify one presented by a client.
pub trait TokenService: Send + Sync {
    fn issue(&self, account: &Account) -> Result<String, AppError>;

    /// Checks signature and expiry, returning the decoded claims.
    fn verify(&self, token: &str) -> Result<Claims, AppError>;

    /// Verifies the token and resolves it to an identity, failing closed on a bad `accountId`.
    fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, AppError> {
        let claims = self.verify(token)?;
        claims.identity().ok_or_else(|| {
            AppError::Unauthorized("Invalid token: accountId claim is not numeric".into())
        })
    }
}

/// HS512 JWT implementation of [`TokenService`].
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self::with_clock(secret, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        // Expiry is checked against `clock` in `verify`, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            clock,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, account: &Account) -> Result<String, AppError> {
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalServerError("Token expiry is out of range".into()))?;
        let claims = Claims {
            account_id: account.id.to_string(),
            username: account.username.clone(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature).into());
        }
        Ok(claims)
    }
}
