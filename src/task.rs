//! Tasks, as the backend stores them

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Backend-assigned task identifier
pub type TaskId = i64;
/// Identifier of the user who owns a task
pub type UserId = i64;

/// How urgent a task is.
///
/// The backend stores this as a plain string; these are the three values it knows about.
/// New tasks default to `High`, matching the creation form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::High
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// A user-owned to-do item, mirrored from the server.
///
/// The server assigns `id` at creation and it never changes afterwards. `status` is a plain
/// boolean: `false` is "unfinished", `true` is "completed", and there is no state in between.
/// Scheduling dates cross the wire as `YYYY-MM-DD` strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,

    name: String,
    description: String,
    priority: Priority,

    /// `false` until a confirmed toggle (or an explicit update) completes the task
    status: bool,

    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,

    /// The list endpoint leaves the owner out of its records, so this can be absent on the wire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,

    /// Backend bookkeeping, read-only on this side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<NaiveDateTime>,
}

impl Task {
    /// Create a Task instance from parts, e.g. when a backend stand-in materializes a record
    pub fn new_with_parameters(
        id: TaskId,
        name: String,
        description: String,
        priority: Priority,
        status: bool,
        start_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        user_id: Option<UserId>,
        created_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            priority,
            status,
            start_date,
            due_date,
            user_id,
            created_at,
        }
    }

    pub fn id(&self) -> TaskId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn priority(&self) -> Priority { self.priority }
    pub fn status(&self) -> bool { self.status }
    pub fn start_date(&self) -> Option<NaiveDate> { self.start_date }
    pub fn due_date(&self) -> Option<NaiveDate> { self.due_date }
    pub fn user_id(&self) -> Option<UserId> { self.user_id }
    pub fn created_at(&self) -> Option<&NaiveDateTime> { self.created_at.as_ref() }

    pub fn set_name(&mut self, new_name: String) {
        self.name = new_name;
    }

    pub fn set_description(&mut self, new_description: String) {
        self.description = new_description;
    }

    pub fn set_priority(&mut self, new_priority: Priority) {
        self.priority = new_priority;
    }

    /// Set the completion status. The store only calls this once the server has confirmed
    /// the matching update.
    pub fn set_status(&mut self, new_status: bool) {
        self.status = new_status;
    }

    pub fn set_start_date(&mut self, new_start_date: Option<NaiveDate>) {
        self.start_date = new_start_date;
    }

    pub fn set_due_date(&mut self, new_due_date: Option<NaiveDate>) {
        self.due_date = new_due_date;
    }
}
