use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::password::{hash_password, hash_password_blocking, verify_password_blocking};
use crate::auth::token::TokenService;
use crate::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::store::{AccountStore, USERNAME_TAKEN};

/// The single message for every failed login, whether the username exists or not.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Auth capability consumed by the `/api/auth` handlers.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and returns a token for it.
    /// Fails with `AppError::Conflict` if the username is taken (ignoring case).
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError>;

    /// Checks credentials and returns a fresh token.
    /// Fails with `AppError::Unauthorized(INVALID_CREDENTIALS)` for any bad username/password pair.
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError>;
}

/// [`AuthService`] backed by an [`AccountStore`], bcrypt and a [`TokenService`].
pub struct AccountAuthService {
    accounts: Arc<dyn AccountStore>,
    tokens: Arc<dyn TokenService>,
    bcrypt_cost: u32,
    // Verified against when the username is unknown, so both failure paths pay for one bcrypt run.
    dummy_hash: String,
}

impl AccountAuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        tokens: Arc<dyn TokenService>,
        bcrypt_cost: u32,
    ) -> Result<Self, AppError> {
        let dummy_hash = hash_password("timing-parity-placeholder", bcrypt_cost)?;
        Ok(Self {
            accounts,
            tokens,
            bcrypt_cost,
            dummy_hash,
        })
    }
}

#[async_trait]
impl AuthService for AccountAuthService {
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        if self
            .accounts
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            log::info!("Registration refused: username {:?} is taken", request.username);
            return Err(AppError::Conflict(USERNAME_TAKEN.into()));
        }

        let password_hash = hash_password_blocking(request.password, self.bcrypt_cost).await?;
        // A concurrent registration may still win here; the store reports it as a Conflict.
        let account = self
            .accounts
            .create_account(&request.username, &password_hash)
            .await?;
        log::info!("Registered account {} ({})", account.id, account.username);

        let token = self.tokens.issue(&account)?;
        Ok(AuthResponse {
            token,
            user_id: account.id,
        })
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let account = self.accounts.find_by_username(&request.username).await?;

        let stored_hash = account
            .as_ref()
            .map(|a| a.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());
        let verified = match verify_password_blocking(request.password, stored_hash).await {
            Ok(verified) => verified,
            Err(e) => {
                log::warn!("Password verification error: {}", e);
                false
            }
        };

        match account {
            Some(account) if verified => {
                log::info!("Account {} logged in", account.id);
                let token = self.tokens.issue(&account)?;
                Ok(AuthResponse {
                    token,
                    user_id: account.id,
                })
            }
            _ => {
                log::info!("Failed login attempt for username {:?}", request.username);
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
    }
}
