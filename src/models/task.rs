use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority. Used when a task is created without one.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TaskPriority {
    /// Wire names of every priority, in ascending order.
    pub const NAMES: [&'static str; 3] = ["low", "medium", "high"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a task entity as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4 string).
    pub id: String,
    /// Identifier of the user who owns the task. Set once, from the caller's token.
    pub user_id: String,
    /// The title of the task, trimmed.
    pub title: String,
    /// Free-form description, empty when not given.
    pub description: String,
    pub completed: bool,
    pub priority: TaskPriority,
    /// Due date exactly as submitted (`YYYY-MM-DD` or RFC 3339).
    pub due_date: Option<String>,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
}

/// A validated task creation payload with defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: TaskPriority,
    pub due_date: Option<String>,
}

/// A validated partial update. `None` leaves the stored value untouched.
///
/// `due_date` is doubly optional: `Some(None)` clears the stored date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<String>>,
}

impl Task {
    /// Creates a new `Task` owned by `owner_id`.
    /// Sets `created_at` to the current time and `id` to a new UUID.
    pub fn new(input: NewTask, owner_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            title: input.title,
            description: input.description,
            completed: input.completed,
            priority: input.priority,
            due_date: input.due_date,
            created_at: Utc::now(),
        }
    }

    /// Applies a partial update. Identity, ownership and creation time never change.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}
