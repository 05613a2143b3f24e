//! Schedule summary metrics.
//!
//! Computes the headline indicators of a dated schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Task count | Tasks in the schedule |
//! | Critical count | Tasks with zero slack |
//! | Total duration | Latest end minus earliest start, in days |
//! | Start / End | Earliest start and latest end |
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ScheduledTask;

/// Schedule headline indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Number of scheduled tasks.
    pub task_count: usize,
    /// Number of critical tasks.
    pub critical_count: usize,
    /// Project length in days.
    pub total_duration_days: i64,
    /// Earliest start. `None` for an empty schedule.
    pub start: Option<NaiveDate>,
    /// Latest end. `None` for an empty schedule.
    pub end: Option<NaiveDate>,
}

impl ScheduleSummary {
    /// Computes the summary from scheduled tasks.
    pub fn calculate(tasks: &[ScheduledTask]) -> Self {
        let start = tasks.iter().map(|t| t.start).min();
        let end = tasks.iter().map(|t| t.end).max();
        let total_duration_days = match (start, end) {
            (Some(start), Some(end)) => (end - start).num_days(),
            _ => 0,
        };

        Self {
            task_count: tasks.len(),
            critical_count: tasks.iter().filter(|t| t.is_critical).count(),
            total_duration_days,
            start,
            end,
        }
    }
}
