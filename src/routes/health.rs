use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use log::warn;
use serde_json::json;

use crate::state::AppState;

/// Health check endpoint
///
/// Reports whether the storage backend answers.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.auth.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "storage": "up",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "storage": "down",
                "timestamp": Utc::now()
            }))
        }
    }
}
