//! Persistence seams for users and tasks.
//!
//! Every task operation takes the owner's id alongside the task id, and
//! implementations must apply both in a single predicate.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskFilter, TaskStatus, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user. Fails with `AppError::Conflict` when the username is taken.
    async fn create_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks owned by `owner` that match `filter`, oldest first.
    async fn list_tasks(&self, owner: Uuid, filter: &TaskFilter) -> Result<Vec<Task>, AppError>;

    async fn find_task(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, AppError>;

    async fn insert_task(&self, task: &Task) -> Result<Task, AppError>;

    /// Returns `None` when no task matches `(id, owner)`.
    async fn update_task_status(
        &self,
        id: Uuid,
        owner: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, AppError>;

    /// Returns the number of deleted rows (0 or 1).
    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<u64, AppError>;
}
