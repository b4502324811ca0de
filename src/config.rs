use std::env;

use crate::error::ConfigError;

/// Minimum signing key length. HS512 keys shorter than the 512-bit hash output are rejected.
pub const MIN_JWT_SECRET_BYTES: usize = 64;

/// Highest accepted bcrypt cost. Each step doubles hashing time; 16 already takes seconds.
pub const MAX_BCRYPT_COST: u32 = 16;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 8760;

/// Runtime configuration, read once at startup and shared immutably afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    /// Browser origin allowed by CORS. When unset, cross-origin requests are refused.
    pub frontend_url: Option<String>,
    pub bcrypt_cost: u32,
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::WeakSecret {
                actual: jwt_secret.len(),
                minimum: MIN_JWT_SECRET_BYTES,
            });
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST, "an integer")?;
        if !(4..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                expected: "between 4 and 16",
                value: bcrypt_cost.to_string(),
            });
        }

        let token_ttl_hours: i64 = parse_or(&lookup, "TOKEN_TTL_HOURS", 24, "an integer")?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_HOURS",
                expected: "between 1 and 8760 hours",
                value: token_ttl_hours.to_string(),
            });
        }

        Ok(Self {
            database_url,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                5,
                "an integer",
            )?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080, "a port number")?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            frontend_url: lookup("FRONTEND_URL").filter(|url| !url.is_empty()),
            bcrypt_cost,
            token_ttl_hours,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value: raw,
        }),
        None => Ok(default),
    }
}
