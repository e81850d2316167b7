//! What the task forms submit: drafts, edits, and the payloads they become
//!
//! A [`TaskDraft`] or [`TaskEdit`] is checked locally, with the same rules and messages the
//! forms display, before any request is built. Only a draft that passes turns into a wire
//! payload ([`TaskCreate`] or [`TaskPatch`]).

use std::error::Error;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, UserId};

/// A new task as captured by the creation form, before it has been accepted anywhere
#[derive(Clone, Debug, Default)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    /// An externally-selected day (e.g. a click on a calendar view). Left empty, the
    /// submission date is used instead.
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub user_id: Option<UserId>,
}

impl TaskDraft {
    /// Check the draft the way the creation form does, before any network traffic
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err("Name and description are required".into());
        }
        let due_date = match self.due_date {
            None => return Err("Due date is required".into()),
            Some(date) => date,
        };
        if let Some(start_date) = self.start_date {
            if start_date > due_date {
                return Err("Start date cannot be after due date".into());
            }
        }
        if self.user_id.is_none() {
            return Err("User ID is missing".into());
        }
        Ok(())
    }

    /// Validate, then build the creation payload. A missing start date resolves to `today`.
    pub fn into_payload(self, today: NaiveDate) -> Result<TaskCreate, Box<dyn Error>> {
        self.validate()?;
        let due_date = self.due_date.ok_or("Due date is required")?;
        let user_id = self.user_id.ok_or("User ID is missing")?;
        Ok(TaskCreate {
            name: self.name,
            description: self.description,
            start_date: self.start_date.unwrap_or(today),
            due_date,
            priority: self.priority,
            user_id,
        })
    }
}

/// A full edit of an existing task, as captured by the update form
#[derive(Clone, Debug, Default)]
pub struct TaskEdit {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// `Some` lands the task directly in that state; `None` leaves the status alone
    pub status: Option<bool>,
}

impl TaskEdit {
    /// Prefill the form from the task being edited
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name().to_string(),
            description: task.description().to_string(),
            priority: task.priority(),
            start_date: task.start_date(),
            due_date: task.due_date(),
            status: None,
        }
    }

    /// Check the edit the way the update form does. A due date strictly before `today`
    /// (the current date at start of day) is rejected.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Box<dyn Error>> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err("Name and description are required".into());
        }
        if self.start_date.is_none() {
            return Err("Start date is required".into());
        }
        match self.due_date {
            None => return Err("Due date is required".into()),
            Some(due_date) => {
                if due_date < today {
                    return Err("Please select a valid due date".into());
                }
            }
        }
        Ok(())
    }

    /// Validate, then build the update payload carrying every edited field
    pub fn into_payload(self, today: NaiveDate) -> Result<TaskPatch, Box<dyn Error>> {
        self.validate(today)?;
        Ok(TaskPatch {
            name: Some(self.name),
            description: Some(self.description),
            start_date: self.start_date,
            due_date: self.due_date,
            priority: Some(self.priority),
            status: self.status,
        })
    }
}

/// The body of a creation request (`POST /task`).
///
/// It never carries an id; the backend assigns one and returns the stored record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskCreate {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub user_id: UserId,
}

/// The body of an update request (`PUT /task/{id}`).
///
/// Every field is optional and `None` fields are left out of the JSON body entirely,
/// so a status toggle goes over the wire as `{"status": <bool>}` and nothing else.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl TaskPatch {
    /// The patch a confirmed toggle sends: the new status, nothing else
    pub fn status_only(status: bool) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Apply the carried fields to a task, leaving absent fields untouched
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.set_name(name.clone());
        }
        if let Some(description) = &self.description {
            task.set_description(description.clone());
        }
        if let Some(start_date) = self.start_date {
            task.set_start_date(Some(start_date));
        }
        if let Some(due_date) = self.due_date {
            task.set_due_date(Some(due_date));
        }
        if let Some(priority) = self.priority {
            task.set_priority(priority);
        }
        if let Some(status) = self.status {
            task.set_status(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn valid_draft() -> TaskDraft {
        TaskDraft {
            name: "Write report".to_string(),
            description: "Q3 summary".to_string(),
            priority: Priority::High,
            start_date: Some(date(2025, 1, 1)),
            due_date: Some(date(2025, 1, 5)),
            user_id: Some(42),
        }
    }

    #[test]
    fn draft_rejects_blank_name_and_description() {
        let mut draft = valid_draft();
        draft.name = "".to_string();
        assert_eq!(draft.validate().unwrap_err().to_string(), "Name and description are required");

        let mut draft = valid_draft();
        draft.description = "   \t".to_string();
        assert_eq!(draft.validate().unwrap_err().to_string(), "Name and description are required");
    }

    #[test]
    fn draft_rejects_missing_due_date() {
        let mut draft = valid_draft();
        draft.due_date = None;
        assert_eq!(draft.validate().unwrap_err().to_string(), "Due date is required");
    }

    #[test]
    fn draft_rejects_start_after_due_regardless_of_other_fields() {
        let mut draft = valid_draft();
        draft.start_date = Some(date(2025, 1, 6));
        assert_eq!(draft.validate().unwrap_err().to_string(), "Start date cannot be after due date");

        // Equal dates are fine
        let mut draft = valid_draft();
        draft.start_date = draft.due_date;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_rejects_missing_user() {
        let mut draft = valid_draft();
        draft.user_id = None;
        assert_eq!(draft.validate().unwrap_err().to_string(), "User ID is missing");
    }

    #[test]
    fn payload_defaults_start_date_to_today() {
        let mut draft = valid_draft();
        draft.start_date = None;
        let payload = draft.into_payload(date(2025, 1, 2)).unwrap();
        assert_eq!(payload.start_date, date(2025, 1, 2));
        assert_eq!(payload.due_date, date(2025, 1, 5));
    }

    #[test]
    fn edit_rejects_due_date_in_the_past() {
        let today = date(2025, 3, 10);
        let mut edit = TaskEdit {
            name: "Task".to_string(),
            description: "desc".to_string(),
            priority: Priority::Medium,
            start_date: Some(date(2025, 3, 1)),
            due_date: Some(date(2025, 3, 9)),
            status: None,
        };
        assert_eq!(edit.validate(today).unwrap_err().to_string(), "Please select a valid due date");

        // Today itself is still a valid due date
        edit.due_date = Some(today);
        assert!(edit.validate(today).is_ok());
    }

    #[test]
    fn edit_requires_both_dates() {
        let today = date(2025, 3, 10);
        let edit = TaskEdit {
            name: "Task".to_string(),
            description: "desc".to_string(),
            due_date: Some(date(2025, 3, 11)),
            ..TaskEdit::default()
        };
        assert_eq!(edit.validate(today).unwrap_err().to_string(), "Start date is required");

        let edit = TaskEdit {
            name: "Task".to_string(),
            description: "desc".to_string(),
            start_date: Some(date(2025, 3, 11)),
            ..TaskEdit::default()
        };
        assert_eq!(edit.validate(today).unwrap_err().to_string(), "Due date is required");
    }

    #[test]
    fn toggle_patch_serializes_to_status_alone() {
        let patch = TaskPatch::status_only(true);
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "status": true }));
    }
}
