use std::sync::Arc;

use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest};

use crate::auth::{AccountAuthService, AuthService, TokenService};
use crate::error::AppError;
use crate::routes;
use crate::store::{AccountStore, ProjectStore, TaskStore};

/// Everything the HTTP layer needs, wired once at startup and shared by all workers.
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<dyn AuthService>,
    pub tokens: Arc<dyn TokenService>,
    pub projects: Arc<dyn ProjectStore>,
    pub tasks: Arc<dyn TaskStore>,
}

impl AppServices {
    /// Wires the auth service and resource stores on top of a single backing store.
    pub fn new<S>(
        store: Arc<S>,
        tokens: Arc<dyn TokenService>,
        bcrypt_cost: u32,
    ) -> Result<Self, AppError>
    where
        S: AccountStore + ProjectStore + TaskStore + 'static,
    {
        let accounts: Arc<dyn AccountStore> = store.clone();
        let auth = AccountAuthService::new(accounts, Arc::clone(&tokens), bcrypt_cost)?;
        let projects: Arc<dyn ProjectStore> = store.clone();
        let tasks: Arc<dyn TaskStore> = store;

        Ok(Self {
            auth: Arc::new(auth),
            tokens,
            projects,
            tasks,
        })
    }

    /// Registers the services as app data and mounts `/health` and `/api`.
    /// Malformed JSON bodies are answered through `AppError` like every other failure.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::from(Arc::clone(&self.auth)))
            .app_data(web::Data::from(Arc::clone(&self.tokens)))
            .app_data(web::Data::from(Arc::clone(&self.projects)))
            .app_data(web::Data::from(Arc::clone(&self.tasks)))
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config));
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}
