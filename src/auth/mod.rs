//! Authentication and authorization.
//!
//! - [`password`]: bcrypt hashing and verification.
//! - [`token`]: HS512 credential tokens and the [`TokenService`] capability.
//! - [`service`]: registration and login ([`AuthService`]).
//! - [`middleware`] and [`extractors`]: the per-request guard that turns a bearer token into an
//!   [`AuthenticatedIdentity`].

pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedIdentity;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use service::{AccountAuthService, AuthService, INVALID_CREDENTIALS};
pub use token::{Claims, Clock, FixedClock, JwtTokenService, SystemClock, TokenService};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Represents the payload for a new account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 20 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 3, max = 20),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Password for the new account.
    /// Must be between 6 and 30 characters long.
    #[validate(length(min = 6, max = 30))]
    pub password: String,
}

/// Response structure after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The signed bearer token.
    pub token: String,
    /// The id of the authenticated account.
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let empty_username = LoginRequest {
            username: "".to_string(),
            password: "secret1".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = LoginRequest {
            username: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            username: "test_user-123".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_username_register = RegisterRequest {
            username: "test user!".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_username_register.validate().is_err());

        let short_username_register = RegisterRequest {
            username: "tu".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_username_register.validate().is_err());

        let long_username_register = RegisterRequest {
            username: "u".repeat(21),
            password: "password123".to_string(),
        };
        assert!(long_username_register.validate().is_err());

        let short_password_register = RegisterRequest {
            username: "alice".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password_register.validate().is_err());

        let long_password_register = RegisterRequest {
            username: "alice".to_string(),
            password: "p".repeat(31),
        };
        assert!(long_password_register.validate().is_err());
    }

    #[test]
    fn test_auth_response_wire_names() {
        let json = serde_json::to_value(AuthResponse {
            token: "t".to_string(),
            user_id: 5,
        })
        .unwrap();
        assert_eq!(json["token"], "t");
        assert_eq!(json["userId"], 5);
    }
}
