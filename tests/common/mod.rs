#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;
use tasktrack::routes;
use tasktrack::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(TEST_SECRET, 3600, 4))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Signs a user up and in, returning the access token.
pub async fn signup_and_signin(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let credentials = json!({ "username": username, "password": password });

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "signup failed for {}", username);

    let req = test::TestRequest::post()
        .uri("/auth/signin")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "signin failed for {}", username);

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["accessToken"]
        .as_str()
        .expect("accessToken missing from signin response")
        .to_string()
}
