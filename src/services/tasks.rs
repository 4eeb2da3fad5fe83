use serde_json::Value;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::Task;
use crate::store::TaskStore;
use crate::validation::{validate_new_task, validate_task_update};

const TASK_NOT_FOUND: &str = "Task not found";

/// Ownership-scoped CRUD over the task store.
///
/// Every method takes the caller's id as `owner_id`; it is the only source of
/// ownership. Whatever the payload says about `id` or `userId` is ignored.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Task>, AppError> {
        self.store.find_tasks_by_owner(owner_id).await
    }

    pub async fn get(&self, owner_id: &str, id: &str) -> Result<Task, AppError> {
        self.store
            .find_owned_task(id, owner_id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, owner_id: &str, payload: &Value) -> Result<Task, AppError> {
        let input = validate_new_task(payload)?;
        let task = Task::new(input, owner_id);
        self.store.insert_task(&task).await?;

        log::info!("User {} created task {}", owner_id, task.id);
        Ok(task)
    }

    /// Validation runs before the lookup, so an invalid payload is rejected
    /// even when the task does not exist.
    pub async fn update(&self, owner_id: &str, id: &str, payload: &Value) -> Result<Task, AppError> {
        let patch = validate_task_update(payload)?;
        let task = self
            .store
            .update_owned_task(id, owner_id, &patch)
            .await?
            .ok_or_else(not_found)?;

        log::debug!("User {} updated task {}", owner_id, id);
        Ok(task)
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError> {
        self.store
            .delete_owned_task(id, owner_id)
            .await?
            .ok_or_else(not_found)?;

        log::info!("User {} deleted task {}", owner_id, id);
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound(TASK_NOT_FOUND.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryStore::new()))
    }

    #[actix_rt::test]
    async fn test_create_forces_owner_and_defaults() {
        let tasks = service();
        let task = tasks
            .create("alice", &json!({ "title": "x", "userId": "mallory", "id": "fixed" }))
            .await
            .unwrap();

        assert_eq!(task.user_id, "alice");
        assert_ne!(task.id, "fixed");
        assert!(!task.completed);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.description, "");
    }

    #[actix_rt::test]
    async fn test_get_round_trip() {
        let tasks = service();
        let created = tasks
            .create(
                "alice",
                &json!({
                    "title": "Groceries",
                    "description": "Bread and milk",
                    "priority": "high",
                    "dueDate": "2025-10-25"
                }),
            )
            .await
            .unwrap();

        let fetched = tasks.get("alice", &created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[actix_rt::test]
    async fn test_update_cannot_change_identity() {
        let tasks = service();
        let created = tasks.create("alice", &json!({ "title": "x" })).await.unwrap();

        let updated = tasks
            .update(
                "alice",
                &created.id,
                &json!({ "completed": true, "id": "other", "userId": "bob" }),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, "alice");
        assert!(updated.completed);
        assert_eq!(updated.title, "x");
    }

    #[actix_rt::test]
    async fn test_invalid_update_is_rejected_before_lookup() {
        let tasks = service();
        let created = tasks.create("alice", &json!({ "title": "x" })).await.unwrap();

        let blank = tasks.update("alice", &created.id, &json!({ "title": "  " })).await;
        assert!(matches!(blank, Err(AppError::ValidationFailed(_))));

        let urgent = tasks
            .update("alice", "does-not-exist", &json!({ "priority": "urgent" }))
            .await;
        assert!(matches!(urgent, Err(AppError::ValidationFailed(_))));

        assert_eq!(tasks.get("alice", &created.id).await.unwrap().title, "x");
    }

    #[actix_rt::test]
    async fn test_foreign_tasks_look_missing() {
        let tasks = service();
        let created = tasks.create("alice", &json!({ "title": "private" })).await.unwrap();

        let not_found = AppError::NotFound(TASK_NOT_FOUND.into());
        assert_eq!(tasks.get("bob", &created.id).await.unwrap_err(), not_found);
        assert_eq!(
            tasks
                .update("bob", &created.id, &json!({ "title": "mine now" }))
                .await
                .unwrap_err(),
            not_found
        );
        assert_eq!(tasks.delete("bob", &created.id).await.unwrap_err(), not_found);
        assert_eq!(tasks.delete("alice", "missing").await.unwrap_err(), not_found);
        assert!(tasks.list("bob").await.unwrap().is_empty());

        tasks.delete("alice", &created.id).await.unwrap();
        assert!(tasks.list("alice").await.unwrap().is_empty());
    }
}
