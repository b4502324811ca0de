use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    /// The title of the project.
    /// Must be between 3 and 100 characters.
    #[validate(length(min = 3, max = 100))]
    pub title: String,

    /// An optional description.
    /// Maximum length of 500 characters if provided.
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// A project as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Set by the server when the project is created.
    pub creation_date: DateTime<Utc>,
    /// Owning account. Only used for authorization, never sent to clients.
    #[serde(skip_serializing, default)]
    pub user_id: i32,
}
