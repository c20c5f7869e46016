pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error, web};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers every route. `/tasks` is wrapped by `AuthMiddleware`.
///
/// Expects a `web::Data<AppState>` to be registered on the `App`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(message).into()
    }))
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    // A path id that is not a UUID cannot name an existing task.
    .app_data(web::PathConfig::default().error_handler(|_err, req| {
        AppError::task_not_found(req.match_info().get("id").unwrap_or_default()).into()
    }))
    .service(health::health)
    .service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::signin),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task_status)
            .service(tasks::delete_task),
    );
}
