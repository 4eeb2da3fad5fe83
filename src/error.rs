//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a request can run into, from a missing bearer token to a store outage,
//! ends up as one of its variants and is rendered as a JSON body at the request boundary.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers and middleware can
//! return it directly. `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `bcrypt::BcryptError` and actix's `BlockingError` allow the `?` operator to be used freely.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message shown to callers for any server-side failure.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific HTTP status. Server-side variants carry a
/// detail string that is logged but never sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required field is missing or malformed (HTTP 400).
    BadRequest(String),
    /// A task payload broke one or more validation rules (HTTP 400).
    /// Carries every violation, not just the first one.
    ValidationFailed(Vec<String>),
    /// Credentials or the bearer token are missing or wrong (HTTP 401).
    Unauthorized(String),
    /// A bearer token was presented but failed verification (HTTP 403).
    Forbidden(String),
    /// The resource does not exist or belongs to someone else (HTTP 404).
    NotFound(String),
    /// The write collides with an existing record, e.g. a registered email (HTTP 409).
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the backing store (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationFailed(msgs) => write!(f, "Validation Failed: {}", msgs.join("; ")),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Server-side variants are logged here with their full detail and replaced by a
/// generic message in the response body.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::ValidationFailed(msgs) => builder.json(json!({ "errors": msgs })),
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => builder.json(json!({ "error": msg })),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                builder.json(json!({ "error": INTERNAL_ERROR_MESSAGE }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// A unique-constraint violation becomes `AppError::Conflict`, worded for the
/// email index when that is the constraint hit; anything else is a
/// `DatabaseError`. Missing rows never get here: lookups return `Option`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(conflict_message(db.constraint()).into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

const EMAIL_CONSTRAINT: &str = "users_email_key";

fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(EMAIL_CONSTRAINT) => "A user with this email already exists",
        _ => "A record with this identifier already exists",
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationFailed`.
///
/// Messages are ordered by field name so responses are stable.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        let mut fields: Vec<_> = error.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let messages = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("'{}' is invalid", field),
                })
            })
            .collect();

        AppError::ValidationFailed(messages)
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

/// Raised when a blocking job (password hashing) was cancelled before finishing.
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}
