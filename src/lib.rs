#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "A multi-user task tracker: users sign up and sign in with a username and password,"]
#![doc = "receive a signed access token, and manage their own tasks through the `/tasks` routes."]
#![doc = "Every task operation is scoped to the authenticated owner."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
