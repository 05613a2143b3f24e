//! Task model.
//!
//! A task is the unit of work to be scheduled: an identity, a duration in
//! whole days and the tasks that must finish before it may start
//! (finish-to-start).
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SideField;

/// A validated task with typed values.
///
/// Produced by validation from a [`TaskRecord`](super::TaskRecord); never
/// mutated by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Duration in whole days (> 0).
    pub duration_days: i64,
    /// Prerequisite task ids, in the order given.
    pub dependencies: Vec<String>,
    /// Explicit earliest start. Only honored for tasks without dependencies.
    pub start_date: Option<NaiveDate>,
    /// Side-column values, passed through as given.
    pub attributes: BTreeMap<SideField, String>,
}

impl Task {
    /// Creates a new task with the given ID and duration.
    pub fn new(id: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            duration_days,
            dependencies: Vec::new(),
            start_date: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a prerequisite task ID.
    pub fn with_dependency(mut self, dependency_id: impl Into<String>) -> Self {
        self.dependencies.push(dependency_id.into());
        self
    }

    /// Sets the explicit start date.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Adds a side-column value.
    pub fn with_attribute(mut self, field: SideField, value: impl Into<String>) -> Self {
        self.attributes.insert(field, value.into());
        self
    }
}
