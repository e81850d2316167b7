use std::error::Error;

use async_trait::async_trait;

use crate::draft::{TaskCreate, TaskPatch};
use crate::task::{Task, TaskId, UserId};

/// Where task records live, as seen from the store: the REST backend in production,
/// or an in-memory stand-in (see [`InMemorySource`](crate::memory::InMemorySource)) in tests.
#[async_trait]
pub trait TaskSource {
    /// Returns one page of the tasks owned by `user_id`. Pages are numbered from 1.
    async fn tasks_for_user(&self, user_id: UserId, page: u32, per_page: u32) -> Result<Vec<Task>, Box<dyn Error>>;

    /// Returns the task with this id
    async fn task_by_id(&self, task_id: TaskId) -> Result<Task, Box<dyn Error>>;

    /// Creates a task and returns the record the backend stored (with its assigned id)
    async fn create_task(&self, new_task: &TaskCreate) -> Result<Task, Box<dyn Error>>;

    /// Applies `patch` to the identified task and returns the updated record
    async fn update_task(&self, task_id: TaskId, patch: &TaskPatch) -> Result<Task, Box<dyn Error>>;

    /// Deletes the identified task
    async fn delete_task(&self, task_id: TaskId) -> Result<(), Box<dyn Error>>;
}
