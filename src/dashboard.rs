//! Read models for the dashboard endpoints
//!
//! These are computed server-side; the client only displays them.

use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// Account-wide totals (`GET /task/dashboard/{user_id}`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_task: u32,
    pub total_overdue_tasks: u32,
    pub total_completed_tasks: u32,
    pub total_remaining_tasks: u32,
}

/// Per-priority overdue/completed counts (`GET /task/dashboard/barchart/{user_id}`).
/// `overdue[i]` and `completed[i]` line up with `categories[i]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BarChartData {
    pub categories: Vec<String>,
    pub overdue: Vec<u32>,
    pub completed: Vec<u32>,
}

/// Tasks started per day over the last seven days (`GET /task/dashboard/linechart/{user_id}`).
/// `days` holds abbreviated weekday labels, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineChartData {
    pub days: Vec<String>,
    pub counts: Vec<u32>,
}

/// Recently completed and upcoming tasks (`GET /task/dashboard/overview/{user_id}`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskOverview {
    pub completed: Vec<CompletedTaskSummary>,
    pub upcoming: Vec<UpcomingTaskSummary>,
}

/// One row of the "recently completed" overview table.
/// Dates come pre-formatted by the server (`DD-MM-YYYY`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedTaskSummary {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub start_date: Option<String>,
    pub completed_date: Option<String>,
}

/// One row of the "upcoming" overview table.
/// Dates come pre-formatted by the server (`DD-MM-YYYY`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpcomingTaskSummary {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
}
