//! Schedule (solution) model.
//!
//! A schedule is the fully dated copy of a validated task set: every task
//! carries its CPM times and its criticality. The input task set is never
//! modified.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Task;

/// Earliest/latest times computed for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpmTimes {
    /// Earliest possible start.
    pub early_start: NaiveDate,
    /// `early_start + duration`.
    pub early_finish: NaiveDate,
    /// Latest start that does not delay the project.
    pub late_start: NaiveDate,
    /// Latest finish that does not delay the project.
    pub late_finish: NaiveDate,
}

impl CpmTimes {
    /// Slack (total float) in days: `late_start - early_start`.
    #[inline]
    pub fn slack_days(&self) -> i64 {
        (self.late_start - self.early_start).num_days()
    }

    /// Zero-slack tasks are critical.
    #[inline]
    pub fn is_critical(&self) -> bool {
        self.slack_days() == 0
    }
}

/// A task with its computed dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// The input task, unchanged.
    pub task: Task,
    /// Computed start (= early start).
    pub start: NaiveDate,
    /// Computed end (= early finish).
    pub end: NaiveDate,
    /// Latest start.
    pub late_start: NaiveDate,
    /// Latest finish.
    pub late_finish: NaiveDate,
    /// Slack in days.
    pub slack_days: i64,
    /// Whether the task has zero slack.
    pub is_critical: bool,
}

impl ScheduledTask {
    /// Builds a record from a task and its CPM times.
    pub fn new(task: Task, times: CpmTimes) -> Self {
        Self {
            task,
            start: times.early_start,
            end: times.early_finish,
            late_start: times.late_start,
            late_finish: times.late_finish,
            slack_days: times.slack_days(),
            is_critical: times.is_critical(),
        }
    }

    /// Task identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.task.id
    }

    /// Scheduled duration (end - start) in days.
    #[inline]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
