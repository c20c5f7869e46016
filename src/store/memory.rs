use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{Task, TaskFilter, TaskStatus, User};

/// In-process store holding users and tasks behind async locks.
///
/// Tasks are kept in insertion order, which is also creation order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username already exists".into()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, owner: Uuid, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|t| t.user_id == owner && filter.matches(t))
            .cloned()
            .collect())
    }

    async fn find_task(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == owner)
            .cloned())
    }

    async fn insert_task(&self, task: &Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(AppError::Conflict("Record already exists".into()));
        }
        tasks.push(task.clone());
        Ok(task.clone())
    }

    async fn update_task_status(
        &self,
        id: Uuid,
        owner: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner)
            .map(|task| {
                task.status = status;
                task.updated_at = Utc::now();
                task.clone()
            }))
    }

    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<u64, AppError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.user_id == owner));
        Ok((before - tasks.len()) as u64)
    }
}
