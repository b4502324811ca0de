use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{AccountStore, ProjectStore, TaskStore, USERNAME_TAKEN};
use crate::error::AppError;
use crate::models::{Account, Project, ProjectInput, Task, TaskInput};

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies the embedded migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("Database migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        // Stored usernames are ASCII; LOWER() could fold a non-ASCII input onto one.
        if !username.is_ascii() {
            return Ok(None);
        }
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password_hash FROM accounts WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (username, password_hash) VALUES ($1, $2)
             RETURNING id, username, password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // The unique index on LOWER(username) is the serialization point for concurrent signups.
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(USERNAME_TAKEN.into())
            }
            other => other.into(),
        })
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn create_project(
        &self,
        owner_id: i32,
        input: ProjectInput,
    ) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (title, description, user_id) VALUES ($1, $2, $3)
             RETURNING id, title, description, creation_date, user_id",
        )
        .bind(input.title)
        .bind(input.description)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn list_projects(&self, owner_id: i32) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, title, description, creation_date, user_id
             FROM projects WHERE user_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    async fn find_project(
        &self,
        owner_id: i32,
        project_id: i32,
    ) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, title, description, creation_date, user_id
             FROM projects WHERE id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn delete_project(&self, owner_id: i32, project_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(project_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks(
        &self,
        owner_id: i32,
        project_id: i32,
    ) -> Result<Option<Vec<Task>>, AppError> {
        if self.find_project(owner_id, project_id).await?.is_none() {
            return Ok(None);
        }
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, due_date, is_completed, project_id
             FROM tasks WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(tasks))
    }

    async fn add_task(
        &self,
        owner_id: i32,
        project_id: i32,
        input: TaskInput,
    ) -> Result<Option<Task>, AppError> {
        // The SELECT yields no row unless the project belongs to the caller.
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, due_date, is_completed, project_id)
             SELECT $1, $2, $3, p.id FROM projects p WHERE p.id = $4 AND p.user_id = $5
             RETURNING id, title, due_date, is_completed, project_id",
        )
        .bind(input.title)
        .bind(input.due_date)
        .bind(input.is_completed)
        .bind(project_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn update_task(
        &self,
        owner_id: i32,
        task_id: i32,
        input: TaskInput,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks t SET title = $1, due_date = $2, is_completed = $3
             FROM projects p
             WHERE t.id = $4 AND t.project_id = p.id AND p.user_id = $5
             RETURNING t.id, t.title, t.due_date, t.is_completed, t.project_id",
        )
        .bind(input.title)
        .bind(input.due_date)
        .bind(input.is_completed)
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete_task(&self, owner_id: i32, task_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM tasks t USING projects p
             WHERE t.id = $1 AND t.project_id = p.id AND p.user_id = $2",
        )
        .bind(task_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
