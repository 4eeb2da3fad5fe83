use crate::{auth::AuthenticatedUser, error::AppError, state::AppState};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::{json, Value};

/// Retrieves every task owned by the authenticated user.
///
/// No ordering is guaranteed beyond what the store returns.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `401 Unauthorized` / `403 Forbidden`: missing or invalid bearer token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list(&user.id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description` (optional): string, defaults to `""`.
/// - `completed` (optional): boolean, defaults to `false`.
/// - `priority` (optional): `low`, `medium` or `high`, defaults to `medium`.
/// - `dueDate` (optional): `YYYY-MM-DD` or RFC 3339 timestamp.
///
/// Any `id` or `userId` in the body is ignored; the owner is always the caller.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: `{ "errors": [...] }` listing every violated rule.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.create(&user.id, &task_data).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.get(&user.id, &task_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task the caller owns.
///
/// Only the fields present in the body change. `id` and `userId` cannot be
/// reassigned.
///
/// ## Responses:
/// - `200 OK`: `{ "message": ..., "task": ... }`
/// - `400 Bad Request`: `{ "errors": [...] }`
/// - `404 Not Found`: no such task, or it belongs to another user.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
    task_data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.update(&user.id, &task_id, &task_data).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Task updated",
        "task": task
    })))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `200 OK`: `{ "message": ... }`
/// - `404 Not Found`: no such task, or it belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.tasks.delete(&user.id, &task_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted" })))
}
