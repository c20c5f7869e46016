use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskInput, TaskFilter, UpdateTaskStatusInput},
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse};
use uuid::Uuid;

/// Retrieves the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `status` (optional): `OPEN`, `IN_PROGRESS` or `DONE`.
/// - `search` (optional): case-insensitive substring of the title or description.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks, oldest first.
/// - `400 Bad Request`: unknown status value.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    filter: web::Query<TaskFilter>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let tasks = state.tasks.get_tasks(&filter, &user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The body is `{"title": ..., "description": ...}`; the task always starts `OPEN`.
///
/// ## Responses:
/// - `201 Created`: the created task.
/// - `400 Bad Request`: malformed body or empty title/description.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<CreateTaskInput>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let task = state.tasks.create_task(task_data.into_inner(), &user.0).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: the task does not exist or belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let task = state.tasks.get_task_by_id(task_id.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Sets the status of a task.
///
/// The body is `{"status": "OPEN" | "IN_PROGRESS" | "DONE"}`. Any status may follow any other.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: unknown status value.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: the task does not exist or belongs to another user.
#[patch("/{id}/status")]
pub async fn update_task_status(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    body: web::Json<UpdateTaskStatusInput>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let task = state
        .tasks
        .update_task_status(task_id.into_inner(), body.status, &user.0)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: the task does not exist or belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.tasks.delete_task(task_id.into_inner(), &user.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
