#![allow(dead_code)]

use std::sync::Arc;

use actix_web::test;
use chrono::Duration;
use serde_json::json;
use taskboard::auth::{AuthResponse, JwtTokenService, TokenService};
use taskboard::store::MemoryStore;
use taskboard::AppServices;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef0123456789abcdef0123456789";

// bcrypt's minimum cost keeps the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(SECRET, Duration::hours(24)))
}

pub fn services() -> AppServices {
    AppServices::new(Arc::new(MemoryStore::new()), token_service(), TEST_BCRYPT_COST)
        .expect("Failed to build services")
}

pub struct TestUser {
    pub id: i32,
    pub token: String,
}

pub async fn register_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> Result<TestUser, String> {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let auth_response: AuthResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse registration response: {}", e))?;

    Ok(TestUser {
        id: auth_response.user_id,
        token: auth_response.token,
    })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
