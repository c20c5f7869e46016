use crate::{auth::AuthCredentials, error::AppError, state::AppState};
use actix_web::{post, web, HttpResponse};

/// Sign up
///
/// Creates a new user account.
///
/// ## Responses:
/// - `201 Created`: empty body.
/// - `400 Bad Request`: malformed body or credentials failing validation.
/// - `409 Conflict`: the username is already taken.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    credentials: web::Json<AuthCredentials>,
) -> Result<HttpResponse, AppError> {
    state.auth.sign_up(credentials.into_inner()).await?;
    Ok(HttpResponse::Created().finish())
}

/// Sign in
///
/// Authenticates a user and returns `{"accessToken": "..."}`.
/// Wrong passwords and unknown usernames both answer `401` with the same body.
#[post("/signin")]
pub async fn signin(
    state: web::Data<AppState>,
    credentials: web::Json<AuthCredentials>,
) -> Result<HttpResponse, AppError> {
    let token = state.auth.sign_in(credentials.into_inner()).await?;
    Ok(HttpResponse::Ok().json(token))
}
