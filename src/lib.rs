#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Accounts, bearer-token authentication, and owner-scoped projects and tasks behind an"]
#![doc = "actix-web JSON API. The binary (`main.rs`) reads configuration, connects the PostgreSQL"]
#![doc = "store and serves [`app::AppServices`]; the test suite wires the same services over"]
#![doc = "[`store::MemoryStore`]."]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use app::AppServices;
pub use error::AppError;
