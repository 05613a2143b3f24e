//! Configuration for validation and scheduling.
//!
//! All types deserialize with defaults for missing keys, so a host can
//! load a partial document (JSON, TOML, ...) and override only what it needs.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default format of explicit start dates.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tuning for the structural validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// A dependency chain longer than `task_count * long_chain_ratio`
    /// raises a warning.
    pub long_chain_ratio: f64,
    /// The chain check only runs when the task count exceeds this.
    pub long_chain_min_tasks: usize,
    /// `chrono` format string for explicit start dates.
    pub date_format: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            long_chain_ratio: 0.7,
            long_chain_min_tasks: 10,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ValidationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the long-chain warning ratio.
    pub fn with_long_chain_ratio(mut self, ratio: f64) -> Self {
        self.long_chain_ratio = ratio;
        self
    }

    /// Sets the task count above which the long-chain check runs.
    pub fn with_long_chain_min_tasks(mut self, min_tasks: usize) -> Self {
        self.long_chain_min_tasks = min_tasks;
        self
    }

    /// Sets the start date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Chain length (in tasks) above which a warning is raised, or `None`
    /// when the task set is too small to be checked.
    pub fn long_chain_threshold(&self, task_count: usize) -> Option<f64> {
        (task_count > self.long_chain_min_tasks)
            .then(|| task_count as f64 * self.long_chain_ratio)
    }
}

/// Scheduling options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Start used for root tasks without an explicit start.
    /// `None` = today's local date.
    pub anchor_date: Option<NaiveDate>,
}

impl ScheduleConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the anchor date (deterministic runs, tests).
    pub fn with_anchor_date(mut self, date: NaiveDate) -> Self {
        self.anchor_date = Some(date);
        self
    }

    /// The effective anchor date.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Configuration for a full planning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Validator tuning.
    pub validation: ValidationConfig,
    /// Scheduler options.
    pub schedule: ScheduleConfig,
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the validator tuning.
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// Sets the scheduler options.
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }
}
