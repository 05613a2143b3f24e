//! Critical Path Method scheduler.
//!
//! # Algorithm
//!
//! 1. Sequence tasks topologically.
//! 2. Forward pass (topological order): a task without dependencies starts
//!    at its explicit start or the anchor date; any other task starts at the
//!    latest early finish of its dependencies. `EF = ES + duration`.
//! 3. Backward pass (reverse order): the horizon is the latest early finish
//!    of the project. A task without successors finishes at the horizon;
//!    any other finishes at the earliest late start of its successors.
//!    `LS = LF - duration`.
//! 4. `slack = LS - ES`; zero-slack tasks are critical.
//!
//! Both passes are plain loops over the sequence, so depth is bounded by
//! nothing but the task count. Results go to a fresh map; input tasks are
//! never touched, and re-running on the same input gives the same result.
//!
//! # Complexity
//! O(V + E)
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::ScheduleConfig;
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::models::{CpmTimes, Task};
use crate::validation::ValidatedTaskSet;

use super::ScheduleReport;

/// Two-pass CPM scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_cpm::config::ValidationConfig;
/// use u_cpm::models::{TaskRecord, TaskTable};
/// use u_cpm::scheduler::CpmScheduler;
/// use u_cpm::validation::validate;
///
/// let table = TaskTable::from_records(vec![
///     TaskRecord::new("A", 5).with_dependencies(""),
///     TaskRecord::new("B", 3).with_dependencies("A"),
/// ]);
/// let tasks = validate(&table, &ValidationConfig::default())
///     .into_validated()
///     .unwrap();
///
/// let day0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let report = CpmScheduler::new().with_anchor_date(day0).schedule(&tasks).unwrap();
///
/// assert_eq!(report.summary.total_duration_days, 8);
/// assert_eq!(report.critical_chain, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CpmScheduler {
    config: ScheduleConfig,
}

impl CpmScheduler {
    /// Creates a scheduler anchored at today's date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler from configuration.
    pub fn with_config(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Pins the date used for tasks without an explicit start.
    pub fn with_anchor_date(mut self, date: NaiveDate) -> Self {
        self.config.anchor_date = Some(date);
        self
    }

    /// Computes CPM times for every task.
    ///
    /// # Errors
    /// [`Error::DateOutOfRange`] if a date leaves the calendar range.
    pub fn compute_times(&self, tasks: &ValidatedTaskSet) -> Result<HashMap<String, CpmTimes>> {
        let graph = DependencyGraph::from_tasks(tasks.tasks());
        self.compute_with_graph(tasks.tasks(), &graph)
    }

    /// Schedules the task set and builds the report.
    ///
    /// # Errors
    /// [`Error::DateOutOfRange`] if a date leaves the calendar range.
    pub fn schedule(&self, tasks: &ValidatedTaskSet) -> Result<ScheduleReport> {
        let graph = DependencyGraph::from_tasks(tasks.tasks());
        let times = self.compute_with_graph(tasks.tasks(), &graph)?;
        let report = ScheduleReport::build(tasks, &graph, &times);

        info!(
            "Scheduled {} tasks: {} critical, {} day(s)",
            report.summary.task_count,
            report.summary.critical_count,
            report.summary.total_duration_days
        );
        Ok(report)
    }

    fn compute_with_graph(
        &self,
        tasks: &[Task],
        graph: &DependencyGraph,
    ) -> Result<HashMap<String, CpmTimes>> {
        let anchor = self.config.anchor();
        let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        let order = graph.topological_order();

        // Forward pass
        let mut early: HashMap<&str, (NaiveDate, NaiveDate)> = HashMap::with_capacity(order.len());
        for &id in &order {
            let Some(task) = by_id.get(id) else {
                continue;
            };
            let early_start = graph
                .edges_into(id)
                .filter_map(|dep| early.get(dep).map(|&(_, finish)| finish))
                .max()
                .unwrap_or_else(|| task.start_date.unwrap_or(anchor));
            let early_finish = add_days(task, early_start, task.duration_days)?;
            early.insert(id, (early_start, early_finish));
        }

        let Some(horizon) = early.values().map(|&(_, finish)| finish).max() else {
            return Ok(HashMap::new());
        };
        debug!("Forward pass complete, project horizon {}", horizon);

        // Backward pass
        let mut times: HashMap<String, CpmTimes> = HashMap::with_capacity(order.len());
        for &id in order.iter().rev() {
            let (Some(task), Some(&(early_start, early_finish))) = (by_id.get(id), early.get(id))
            else {
                continue;
            };
            let late_finish = graph
                .successors(id)
                .iter()
                .filter_map(|succ| times.get(succ).map(|t| t.late_start))
                .min()
                .unwrap_or(horizon);
            let late_start = sub_days(task, late_finish, task.duration_days)?;

            times.insert(
                id.to_string(),
                CpmTimes {
                    early_start,
                    early_finish,
                    late_start,
                    late_finish,
                },
            );
        }

        Ok(times)
    }
}

fn add_days(task: &Task, base: NaiveDate, days: i64) -> Result<NaiveDate> {
    u64::try_from(days)
        .ok()
        .and_then(|d| base.checked_add_days(Days::new(d)))
        .ok_or_else(|| out_of_range(task, base, days))
}

fn sub_days(task: &Task, base: NaiveDate, days: i64) -> Result<NaiveDate> {
    u64::try_from(days)
        .ok()
        .and_then(|d| base.checked_sub_days(Days::new(d)))
        .ok_or_else(|| out_of_range(task, base, -days))
}

fn out_of_range(task: &Task, base: NaiveDate, days: i64) -> Error {
    Error::DateOutOfRange {
        task: task.id.clone(),
        base,
        days,
    }
}
