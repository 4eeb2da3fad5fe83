pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskPatch, TaskPriority};
pub use user::{User, UserProfile};
