#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Account registration and login, bearer-token authentication, and per-user"]
#![doc = "task CRUD. The binary (`main.rs`) loads configuration, picks a store and"]
#![doc = "mounts [`routes::config`] under `/api`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

pub use crate::error::AppError;
pub use crate::state::AppState;
