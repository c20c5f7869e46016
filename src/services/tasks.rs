use std::sync::Arc;

use log::debug;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{CreateTaskInput, Task, TaskFilter, TaskStatus, User};
use crate::store::TaskStore;

/// Task operations scoped to the requesting user.
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    pub async fn get_tasks(&self, filter: &TaskFilter, user: &User) -> Result<Vec<Task>, AppError> {
        self.tasks.list_tasks(user.id, filter).await
    }

    /// Tasks owned by someone else are reported exactly like missing ones.
    pub async fn get_task_by_id(&self, id: Uuid, user: &User) -> Result<Task, AppError> {
        self.tasks
            .find_task(id, user.id)
            .await?
            .ok_or_else(|| AppError::task_not_found(id))
    }

    /// Creates an `OPEN` task owned by `user`.
    pub async fn create_task(&self, input: CreateTaskInput, user: &User) -> Result<Task, AppError> {
        input.validate()?;
        let task = self.tasks.insert_task(&Task::new(input, user.id)).await?;
        debug!("User {} created task {}", user.id, task.id);
        Ok(task)
    }

    pub async fn update_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        user: &User,
    ) -> Result<Task, AppError> {
        let task = self.get_task_by_id(id, user).await?;
        // Deleted between the lookup and the update.
        self.tasks
            .update_task_status(task.id, user.id, status)
            .await?
            .ok_or_else(|| AppError::task_not_found(id))
    }

    pub async fn delete_task(&self, id: Uuid, user: &User) -> Result<(), AppError> {
        if self.tasks.delete_task(id, user.id).await? == 0 {
            return Err(AppError::task_not_found(id));
        }
        debug!("User {} deleted task {}", user.id, id);
        Ok(())
    }
}
