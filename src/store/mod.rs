//! Persistence seams for accounts and tasks.
//!
//! Handlers and services only see these traits. Every task method that targets a
//! single record takes both the task id and the owner id, and the store matches on
//! both at once: a task owned by someone else is reported exactly like a missing one.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Task, TaskPatch, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user. Fails with `AppError::Conflict` if the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

/// Task store.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: &Task) -> Result<(), AppError>;

    /// All tasks owned by `owner_id`, in store order.
    async fn find_tasks_by_owner(&self, owner_id: &str) -> Result<Vec<Task>, AppError>;

    async fn find_owned_task(&self, id: &str, owner_id: &str) -> Result<Option<Task>, AppError>;

    /// Applies `patch` atomically and returns the updated task, or `None` if no
    /// task matches both `id` and `owner_id`.
    async fn update_owned_task(
        &self,
        id: &str,
        owner_id: &str,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, AppError>;

    /// Removes the task and returns it, or `None` if no task matches both ids.
    async fn delete_owned_task(&self, id: &str, owner_id: &str) -> Result<Option<Task>, AppError>;
}
