//! Persistence seams.
//!
//! Handlers and the auth service only see these traits. `PgStore` backs them with
//! PostgreSQL; `MemoryStore` keeps everything in-process and is what the test suite runs
//! against. Every resource operation takes the caller's account id so ownership is
//! enforced in the query itself rather than after the fact.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Account, Project, ProjectInput, Task, TaskInput};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Message returned when a username collides with an existing account.
pub const USERNAME_TAKEN: &str = "Username is already taken.";

/// The credential store: account lookup and creation.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Finds an account by username, ignoring case.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    /// Persists a new account.
    ///
    /// Returns `AppError::Conflict` when the username is already taken (case-insensitively),
    /// including when a concurrent registration wins the race.
    async fn create_account(&self, username: &str, password_hash: &str)
        -> Result<Account, AppError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, owner_id: i32, input: ProjectInput)
        -> Result<Project, AppError>;

    async fn list_projects(&self, owner_id: i32) -> Result<Vec<Project>, AppError>;

    /// Returns the project only if it exists and belongs to `owner_id`.
    async fn find_project(&self, owner_id: i32, project_id: i32)
        -> Result<Option<Project>, AppError>;

    /// Deletes the project and its tasks. Returns `false` if nothing owned by `owner_id` matched.
    async fn delete_project(&self, owner_id: i32, project_id: i32) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists the tasks of a project, or `None` when the project is not visible to `owner_id`.
    async fn list_tasks(&self, owner_id: i32, project_id: i32)
        -> Result<Option<Vec<Task>>, AppError>;

    /// Adds a task, or returns `None` when the project is not visible to `owner_id`.
    async fn add_task(
        &self,
        owner_id: i32,
        project_id: i32,
        input: TaskInput,
    ) -> Result<Option<Task>, AppError>;

    async fn update_task(
        &self,
        owner_id: i32,
        task_id: i32,
        input: TaskInput,
    ) -> Result<Option<Task>, AppError>;

    async fn delete_task(&self, owner_id: i32, task_id: i32) -> Result<bool, AppError>;
}
