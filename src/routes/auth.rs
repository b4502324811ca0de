use crate::{
    auth::{AuthService, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new account
///
/// Creates the account and returns an authentication token.
///
/// ## Responses:
/// - `201 Created`: `{token, userId}`.
/// - `409 Conflict`: the username is already taken (case-insensitive).
/// - `422 Unprocessable Entity`: username or password fails validation.
#[post("/register")]
pub async fn register(
    auth: web::Data<dyn AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let response = auth.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Login
///
/// Authenticates an account and returns an authentication token.
///
/// ## Responses:
/// - `200 OK`: `{token, userId}`.
/// - `401 Unauthorized`: unknown username or wrong password (same message for both).
#[post("/login")]
pub async fn login(
    auth: web::Data<dyn AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let response = auth.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
