use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The verified caller of a protected request.
///
/// `AuthMiddleware` inserts this into the request extensions after verifying the bearer
/// token; handlers take it as an argument and pass `account_id` on to the stores.
/// If it is absent (the middleware did not run) extraction fails with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub account_id: i32,
    pub username: String,
}

impl FromRequest for AuthenticatedIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedIdentity>().cloned() {
            Some(identity) => ready(Ok(identity)),
            None => {
                let err = AppError::Unauthorized("Authentication required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
