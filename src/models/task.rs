use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// Any status may be set from any other; there is no enforced workflow.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created, not started.
    Open,
    /// Currently being worked on.
    InProgress,
    /// Finished.
    Done,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskInput {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200, message = "title should not be empty"))]
    pub title: String,

    /// Must be between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000, message = "description should not be empty"))]
    pub description: String,
}

/// Body of `PATCH /tasks/{id}/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTaskStatusInput {
    pub status: TaskStatus,
}

/// Represents a task as stored in the database and returned by the API.
///
/// The owner is kept server-side only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Identifier of the user who owns the task.
    #[serde(skip_serializing, default)]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for `GET /tasks`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring matched against title or description.
    pub search: Option<String>,
}

impl TaskFilter {
    /// The search term, if one was given and is not empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Applies the filter to an in-memory task. Ownership is checked separately.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => {
                let needle = term.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

impl Task {
    /// Creates a new `OPEN` task owned by `user_id`.
    pub fn new(input: CreateTaskInput, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: TaskStatus::Open,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}
