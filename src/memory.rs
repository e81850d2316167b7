//! This module provides an in-memory task source
//!
//! It stands in for the remote backend in integration tests and offline demos, behaving
//! the way the real service does: sequential ids, per-user filtering, pages numbered
//! from 1, field-by-field patch application.

use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::draft::{TaskCreate, TaskPatch};
use crate::mock_behaviour::MockBehaviour;
use crate::task::{Task, TaskId, UserId};
use crate::traits::TaskSource;

/// A task source that keeps its records in memory
#[derive(Debug, Default)]
pub struct InMemorySource {
    state: Mutex<State>,
    /// Lets tests make chosen operations fail (see [`MockBehaviour`])
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    /// The last id handed out; the backend numbers records from 1
    last_id: TaskId,
    requests_served: u32,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source whose operations can be made to fail through `mock_behaviour`
    pub fn with_mock_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            state: Mutex::default(),
            mock_behaviour: Some(mock_behaviour),
        }
    }

    /// Materialize a record directly, bypassing the request path (handy to seed tests)
    pub fn populate(&self, new_task: &TaskCreate) -> TaskId {
        let mut state = self.state.lock().unwrap();
        let task = materialize(&mut state, new_task);
        let task_id = task.id();
        state.tasks.push(task);
        task_id
    }

    /// How many requests this source has served so far, failed ones included
    pub fn requests_served(&self) -> u32 {
        self.state.lock().unwrap().requests_served
    }

    /// Count the incoming request, then ask the mock behaviour (if any) whether to serve it
    fn enter<F>(&self, allow: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn Error>>,
    {
        self.state.lock().unwrap().requests_served += 1;
        match &self.mock_behaviour {
            None => Ok(()),
            Some(mock_behaviour) => allow(&mut mock_behaviour.lock().unwrap()),
        }
    }
}

/// Build the stored record for a creation payload: next id, unfinished status, stamped now
fn materialize(state: &mut State, new_task: &TaskCreate) -> Task {
    state.last_id += 1;
    Task::new_with_parameters(
        state.last_id,
        new_task.name.clone(),
        new_task.description.clone(),
        new_task.priority,
        false,
        Some(new_task.start_date),
        Some(new_task.due_date),
        Some(new_task.user_id),
        Some(Utc::now().naive_utc()),
    )
}

#[async_trait]
impl TaskSource for InMemorySource {
    async fn tasks_for_user(&self, user_id: UserId, page: u32, per_page: u32) -> Result<Vec<Task>, Box<dyn Error>> {
        self.enter(|mock_behaviour| mock_behaviour.can_tasks_for_user())?;
        if page == 0 {
            return Err("Pages are numbered from 1".into());
        }

        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.user_id() == Some(user_id))
            .skip((page as usize - 1) * per_page as usize)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn task_by_id(&self, task_id: TaskId) -> Result<Task, Box<dyn Error>> {
        self.enter(|mock_behaviour| mock_behaviour.can_task_by_id())?;

        let state = self.state.lock().unwrap();
        match state.tasks.iter().find(|task| task.id() == task_id) {
            None => Err("Task not found".into()),
            Some(task) => Ok(task.clone()),
        }
    }

    async fn create_task(&self, new_task: &TaskCreate) -> Result<Task, Box<dyn Error>> {
        self.enter(|mock_behaviour| mock_behaviour.can_create_task())?;

        let mut state = self.state.lock().unwrap();
        let task = materialize(&mut state, new_task);
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task_id: TaskId, patch: &TaskPatch) -> Result<Task, Box<dyn Error>> {
        self.enter(|mock_behaviour| mock_behaviour.can_update_task())?;

        let mut state = self.state.lock().unwrap();
        match state.tasks.iter_mut().find(|task| task.id() == task_id) {
            None => Err("Task not found".into()),
            Some(task) => {
                patch.apply_to(task);
                Ok(task.clone())
            }
        }
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), Box<dyn Error>> {
        self.enter(|mock_behaviour| mock_behaviour.can_delete_task())?;

        let mut state = self.state.lock().unwrap();
        match state.tasks.iter().position(|task| task.id() == task_id) {
            None => Err("Task not found".into()),
            Some(index) => {
                state.tasks.remove(index);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::task::Priority;

    fn creation(name: &str, user_id: UserId) -> TaskCreate {
        TaskCreate {
            name: name.to_string(),
            description: "some description".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            priority: Priority::High,
            user_id,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids_and_unfinished_status() {
        let source = InMemorySource::new();

        let first = source.create_task(&creation("Task A", 1)).await.unwrap();
        let second = source.create_task(&creation("Task B", 1)).await.unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(first.status(), false);
        assert!(first.created_at().is_some());
    }

    #[tokio::test]
    async fn filters_by_user_and_paginates_from_one() {
        let source = InMemorySource::new();
        for index in 0..5 {
            source.populate(&creation(&format!("Mine {}", index), 1));
        }
        source.populate(&creation("Someone else's", 2));

        let page = source.tasks_for_user(1, 1, 3).await.unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].name(), "Mine 0");

        let page = source.tasks_for_user(1, 2, 3).await.unwrap();
        assert_eq!(page.len(), 2);

        let page = source.tasks_for_user(1, 3, 3).await.unwrap();
        assert!(page.is_empty());

        assert!(source.tasks_for_user(1, 0, 3).await.is_err());
    }

    #[tokio::test]
    async fn patches_only_the_carried_fields() {
        let source = InMemorySource::new();
        let task_id = source.populate(&creation("Task A", 1));

        let updated = source.update_task(task_id, &TaskPatch::status_only(true)).await.unwrap();
        assert_eq!(updated.status(), true);
        assert_eq!(updated.name(), "Task A");
        assert_eq!(updated.priority(), Priority::High);
    }

    #[tokio::test]
    async fn unknown_ids_are_reported() {
        let source = InMemorySource::new();

        assert!(source.task_by_id(1).await.is_err());
        assert!(source.update_task(1, &TaskPatch::status_only(true)).await.is_err());
        assert!(source.delete_task(1).await.is_err());
    }

    #[tokio::test]
    async fn every_request_is_counted() {
        let source = InMemorySource::new();
        assert_eq!(source.requests_served(), 0);

        let _ = source.create_task(&creation("Task A", 1)).await;
        let _ = source.tasks_for_user(1, 1, 10).await;
        let _ = source.task_by_id(999).await;
        assert_eq!(source.requests_served(), 3);
    }
}
