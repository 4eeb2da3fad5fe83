//! Structural validation of task payloads.
//!
//! Payloads are checked as raw JSON so that type mistakes (`"completed": "yes"`)
//! are reported alongside every other violation instead of aborting
//! deserialization at the first bad field. Rules are evaluated independently and
//! all failures are collected into `validator::ValidationErrors`.
//!
//! Server-controlled fields (`id`, `userId`, `createdAt`) and unknown keys are
//! ignored; they never reach the store.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;
use crate::models::{NewTask, TaskPatch, TaskPriority};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// Validates a creation payload and applies defaults.
pub fn validate_new_task(payload: &Value) -> Result<NewTask, AppError> {
    let body = as_object(payload)?;
    let (patch, errors) = inspect(body, Mode::Create);

    match patch.title {
        Some(title) if errors.is_empty() => Ok(NewTask {
            title,
            description: patch.description.unwrap_or_default(),
            completed: patch.completed.unwrap_or(false),
            priority: patch.priority.unwrap_or_default(),
            due_date: patch.due_date.flatten(),
        }),
        _ => Err(errors.into()),
    }
}

/// Validates an update payload. Every field is optional, but present fields
/// must satisfy the same rules as on creation.
pub fn validate_task_update(payload: &Value) -> Result<TaskPatch, AppError> {
    let body = as_object(payload)?;
    let (patch, errors) = inspect(body, Mode::Update);

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors.into())
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn is_valid_due_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, AppError> {
    payload
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Task payload must be a JSON object".into()))
}

fn inspect(body: &Map<String, Value>, mode: Mode) -> (TaskPatch, ValidationErrors) {
    let mut errors = ValidationErrors::new();
    let mut patch = TaskPatch::default();

    match body.get("title") {
        None if mode == Mode::Update => {}
        Some(Value::String(title)) if !title.trim().is_empty() => {
            patch.title = Some(title.trim().to_string());
        }
        None => errors.add(
            "title",
            violation("required", "'title' is required and must be a non-empty string"),
        ),
        Some(_) => errors.add(
            "title",
            violation("non_empty", "'title' must be a non-empty string"),
        ),
    }

    match body.get("description") {
        None => {}
        Some(Value::Null) => patch.description = Some(String::new()),
        Some(Value::String(description)) => patch.description = Some(description.clone()),
        Some(_) => errors.add(
            "description",
            violation("type", "'description' must be a string"),
        ),
    }

    match body.get("completed") {
        None => {}
        Some(Value::Bool(completed)) => patch.completed = Some(*completed),
        Some(_) => errors.add(
            "completed",
            violation("type", "'completed' must be a boolean"),
        ),
    }

    match body.get("priority") {
        None => {}
        Some(value) => match value.as_str().and_then(TaskPriority::from_name) {
            Some(priority) => patch.priority = Some(priority),
            None => errors.add(
                "priority",
                violation(
                    "one_of",
                    format!(
                        "'priority' must be one of: {}",
                        TaskPriority::NAMES.join(", ")
                    ),
                ),
            ),
        },
    }

    match body.get("dueDate") {
        None => {}
        Some(Value::Null) => patch.due_date = Some(None),
        Some(Value::String(due)) if is_valid_due_date(due) => {
            patch.due_date = Some(Some(due.clone()));
        }
        Some(_) => errors.add(
            "dueDate",
            violation("date", "'dueDate' must be a valid date"),
        ),
    }

    (patch, errors)
}

fn violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
