//! This module maintains a local mirror of one user's tasks and keeps it consistent
//! with the backend across mutations
//!
//! The backend owns the durable copy; between fetches, the [`TaskStore`] owns the
//! authoritative local copy. Mutations follow the server's confirmation: `create`,
//! `update` and a confirmed removal re-fetch the canonical list afterwards, while a
//! confirmed toggle patches the one task in place and fetches nothing.

use chrono::Local;

use crate::draft::{TaskDraft, TaskEdit, TaskPatch};
use crate::session::Session;
use crate::task::{Task, TaskId};
use crate::traits::TaskSource;

pub mod notice;
use notice::{Notice, NoticeBoard};

/// Page used when re-fetching the whole collection
const FULL_FETCH_PAGE: u32 = 1;
/// Large enough to cover a whole account in one page
const FULL_FETCH_PER_PAGE: u32 = 1000;

/// A queryable local mirror of one user's tasks.
///
/// Operations return whether they succeeded and post their outcome to a notice board
/// (a single most-recent, dismissible message); errors never propagate out of the store
/// and never leave the collection half-updated. Derived views ([`Self::unfinished`],
/// [`Self::completed`], [`Self::paginated`]) are recomputed from the collection on every
/// read, so they are consistent immediately after any completed operation.
pub struct TaskStore<S: TaskSource> {
    source: S,
    session: Session,
    tasks: Vec<Task>,
    notices: NoticeBoard,
    pending_removal: Option<TaskId>,
}

impl<S: TaskSource> TaskStore<S> {
    /// Create an empty store for this session. Call [`Self::load`] to populate it.
    pub fn new(source: S, session: Session) -> Self {
        Self {
            source,
            session,
            tasks: Vec::new(),
            notices: NoticeBoard::new(),
            pending_removal: None,
        }
    }

    /// The source this store fetches from
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every mirrored task, in collection order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The mirrored task with this id
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Tasks not completed yet, in collection order
    pub fn unfinished(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.status() == false).collect()
    }

    /// Completed tasks, in collection order
    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.status()).collect()
    }

    /// The `page_index`-th slice of `page_size` tasks (pages numbered from 0), in collection
    /// order. An out-of-range page yields an empty slice, not an error.
    pub fn paginated(&self, page_index: usize, page_size: usize) -> &[Task] {
        let start = page_index.saturating_mul(page_size);
        if start >= self.tasks.len() {
            return &[];
        }
        let end = start.saturating_add(page_size).min(self.tasks.len());
        &self.tasks[start..end]
    }

    /// The most recent operation outcome still worth displaying
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    /// Drop the displayed notice
    pub fn dismiss_notice(&mut self) {
        self.notices.dismiss();
    }

    /// Replace the local collection with the server's view of it.
    ///
    /// On failure the collection is kept exactly as it was and the failure is reported;
    /// partial results are never applied.
    pub async fn load(&mut self) -> bool {
        match self.fetch_all().await {
            Ok(tasks) => {
                log::debug!("Mirroring {} tasks for user {}", tasks.len(), self.session.user_id());
                self.tasks = tasks;
                true
            }
            Err(err) => {
                log::warn!("Unable to fetch the tasks of user {}: {}", self.session.user_id(), err);
                self.notices.post_error("Failed to fetch tasks.");
                false
            }
        }
    }

    /// Validate and submit a new task.
    ///
    /// A draft that fails validation is reported and produces no request at all. Once the
    /// backend accepts, the canonical list is re-fetched rather than merging the returned
    /// record into the collection.
    pub async fn create(&mut self, draft: TaskDraft) -> bool {
        let payload = match draft.into_payload(Local::now().date_naive()) {
            Ok(payload) => payload,
            Err(err) => {
                self.notices.post_error(&err.to_string());
                return false;
            }
        };

        match self.source.create_task(&payload).await {
            Ok(created) => {
                log::debug!("Created task {} ({})", created.id(), created.name());
                self.refresh_after_mutation().await;
                self.notices.post_success("Task created successfully!");
                true
            }
            Err(err) => {
                log::warn!("Unable to create task: {}", err);
                self.notices.post_error("Failed to process task.");
                false
            }
        }
    }

    /// Validate and submit a full edit of the identified task, then re-fetch the list
    pub async fn update(&mut self, task_id: TaskId, edit: TaskEdit) -> bool {
        let patch = match edit.into_payload(Local::now().date_naive()) {
            Ok(patch) => patch,
            Err(err) => {
                self.notices.post_error(&err.to_string());
                return false;
            }
        };

        match self.source.update_task(task_id, &patch).await {
            Ok(_) => {
                self.refresh_after_mutation().await;
                self.notices.post_success("Task updated successfully!");
                true
            }
            Err(err) => {
                log::warn!("Unable to update task {}: {}", task_id, err);
                self.notices.post_error("Failed to update task.");
                false
            }
        }
    }

    /// Flip the completion status of one task.
    ///
    /// The request carries only the new status. The local copy changes after the backend
    /// confirms, and only that one field changes; nothing is re-fetched. Until the
    /// confirmation arrives the collection keeps the old status, so a failure has nothing
    /// to roll back.
    pub async fn toggle_status(&mut self, task_id: TaskId) -> bool {
        let new_status = match self.task(task_id) {
            Some(task) => task.status() == false,
            None => {
                log::warn!("Cannot toggle task {}: not in the local collection", task_id);
                self.notices.post_error("Failed to update task status.");
                return false;
            }
        };

        match self.source.update_task(task_id, &TaskPatch::status_only(new_status)).await {
            Ok(_) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == task_id) {
                    task.set_status(new_status);
                }
                true
            }
            Err(err) => {
                log::warn!("Unable to update the status of task {}: {}", task_id, err);
                self.notices.post_error("Failed to update task status.");
                false
            }
        }
    }

    /// First phase of a removal: remember which task awaits confirmation
    pub fn request_removal(&mut self, task_id: TaskId) {
        self.pending_removal = Some(task_id);
    }

    /// The task currently awaiting removal confirmation
    pub fn pending_removal(&self) -> Option<TaskId> {
        self.pending_removal
    }

    /// Abandon the pending removal
    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Second phase of a removal: delete the task whose removal was requested, then re-fetch
    /// the list. On failure the pending request is kept, so the confirmation can be retried.
    pub async fn confirm_removal(&mut self) -> bool {
        let task_id = match self.pending_removal {
            Some(task_id) => task_id,
            None => {
                log::warn!("No removal is awaiting confirmation");
                return false;
            }
        };

        match self.source.delete_task(task_id).await {
            Ok(()) => {
                self.pending_removal = None;
                self.refresh_after_mutation().await;
                self.notices.post_success("Task deleted successfully!");
                true
            }
            Err(err) => {
                log::warn!("Unable to delete task {}: {}", task_id, err);
                self.notices.post_error("Failed to delete task.");
                false
            }
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        self.source
            .tasks_for_user(self.session.user_id(), FULL_FETCH_PAGE, FULL_FETCH_PER_PAGE)
            .await
    }

    /// Re-fetch the canonical list after a confirmed mutation. The mutation itself already
    /// succeeded, so a failure here only logs: the success notice stays on display.
    async fn refresh_after_mutation(&mut self) {
        match self.fetch_all().await {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => log::warn!("Unable to refresh the collection after a mutation: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::error::Error;

    use async_trait::async_trait;

    use crate::draft::TaskCreate;
    use crate::task::{Priority, UserId};

    /// A source for view tests: the store is seeded directly and must never hit the network
    struct UnreachableSource;

    #[async_trait]
    impl TaskSource for UnreachableSource {
        async fn tasks_for_user(&self, _user_id: UserId, _page: u32, _per_page: u32) -> Result<Vec<Task>, Box<dyn Error>> {
            Err("This test expects no fetch".into())
        }
        async fn task_by_id(&self, _task_id: TaskId) -> Result<Task, Box<dyn Error>> {
            Err("This test expects no fetch".into())
        }
        async fn create_task(&self, _new_task: &TaskCreate) -> Result<Task, Box<dyn Error>> {
            Err("This test expects no request".into())
        }
        async fn update_task(&self, _task_id: TaskId, _patch: &TaskPatch) -> Result<Task, Box<dyn Error>> {
            Err("This test expects no request".into())
        }
        async fn delete_task(&self, _task_id: TaskId) -> Result<(), Box<dyn Error>> {
            Err("This test expects no request".into())
        }
    }

    fn sample_task(id: TaskId, status: bool) -> Task {
        Task::new_with_parameters(
            id,
            format!("Task {}", id),
            "some description".to_string(),
            Priority::Medium,
            status,
            None,
            None,
            Some(42),
            None,
        )
    }

    fn seeded_store(statuses: &[bool]) -> TaskStore<UnreachableSource> {
        let mut store = TaskStore::new(UnreachableSource, Session::new(42, "token"));
        store.tasks = statuses
            .iter()
            .enumerate()
            .map(|(index, status)| sample_task(index as TaskId + 1, *status))
            .collect();
        store
    }

    #[test]
    fn views_partition_the_collection() {
        let store = seeded_store(&[false, true, false, false, true]);

        let unfinished = store.unfinished();
        let completed = store.completed();
        assert_eq!(unfinished.len() + completed.len(), store.tasks().len());

        // Disjoint: no id shows up on both sides
        for task in &unfinished {
            assert!(completed.iter().all(|other| other.id() != task.id()));
        }

        // Collection order is preserved within each side
        let unfinished_ids: Vec<TaskId> = unfinished.iter().map(|task| task.id()).collect();
        assert_eq!(unfinished_ids, vec![1, 3, 4]);
        let completed_ids: Vec<TaskId> = completed.iter().map(|task| task.id()).collect();
        assert_eq!(completed_ids, vec![2, 5]);
    }

    #[test]
    fn views_are_pure_rederivations() {
        let store = seeded_store(&[false, true, false]);

        let first: Vec<TaskId> = store.unfinished().iter().map(|task| task.id()).collect();
        let second: Vec<TaskId> = store.unfinished().iter().map(|task| task.id()).collect();
        assert_eq!(first, second);

        let first: Vec<TaskId> = store.completed().iter().map(|task| task.id()).collect();
        let second: Vec<TaskId> = store.completed().iter().map(|task| task.id()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn pagination_slices_in_collection_order() {
        let store = seeded_store(&[false; 7]);

        let page: Vec<TaskId> = store.paginated(0, 3).iter().map(|task| task.id()).collect();
        assert_eq!(page, vec![1, 2, 3]);
        let page: Vec<TaskId> = store.paginated(1, 3).iter().map(|task| task.id()).collect();
        assert_eq!(page, vec![4, 5, 6]);

        // Only the final non-empty page comes up short
        let page: Vec<TaskId> = store.paginated(2, 3).iter().map(|task| task.id()).collect();
        assert_eq!(page, vec![7]);
    }

    #[test]
    fn pagination_out_of_range_is_empty() {
        let store = seeded_store(&[false, true, false]);

        assert!(store.paginated(1, 3).is_empty());
        assert!(store.paginated(100, 10).is_empty());
        assert!(store.paginated(usize::MAX, usize::MAX).is_empty());

        let empty = seeded_store(&[]);
        assert!(empty.paginated(0, 10).is_empty());
    }

    #[tokio::test]
    async fn rejected_draft_posts_its_message_and_skips_the_source() {
        let mut store = seeded_store(&[false]);

        let draft = TaskDraft {
            name: "Write report".to_string(),
            description: "".to_string(),
            user_id: Some(42),
            ..TaskDraft::default()
        };
        // UnreachableSource would error loudly if the store built a request
        assert_eq!(store.create(draft).await, false);

        let notice = store.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.text(), "Name and description are required");
        assert_eq!(store.tasks().len(), 1);
    }

    #[tokio::test]
    async fn toggling_an_unknown_task_fails_without_a_request() {
        let mut store = seeded_store(&[false]);

        assert_eq!(store.toggle_status(999).await, false);
        assert_eq!(store.notice().unwrap().text(), "Failed to update task status.");
        assert_eq!(store.tasks()[0].status(), false);
    }

    #[tokio::test]
    async fn confirming_without_a_request_is_a_no_op() {
        let mut store = seeded_store(&[false]);

        assert_eq!(store.confirm_removal().await, false);
        assert_eq!(store.tasks().len(), 1);
        assert!(store.notice().is_none());
    }
}
