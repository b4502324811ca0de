use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for adding or updating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 3 and 100 characters.
    #[validate(length(min = 3, max = 100))]
    pub title: String,

    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,

    /// Whether the task is done. Defaults to `false` when omitted.
    #[serde(default)]
    pub is_completed: bool,
}

/// A task as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    /// The project this task belongs to.
    pub project_id: i32,
}

impl Task {
    /// Builds a task from `TaskInput` for the given project.
    pub fn new(id: i32, project_id: i32, input: TaskInput) -> Self {
        Self {
            id,
            title: input.title,
            due_date: input.due_date,
            is_completed: input.is_completed,
            project_id,
        }
    }

    /// Overwrites the editable fields with `input`.
    pub fn apply(&mut self, input: TaskInput) {
        self.title = input.title;
        self.due_date = input.due_date;
        self.is_completed = input.is_completed;
    }
}
