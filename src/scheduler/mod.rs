//! CPM scheduling and schedule reporting.
//!
//! Turns a validated task set into a dated schedule.
//!
//! # Algorithm
//!
//! `CpmScheduler` runs the classic two-pass Critical Path Method over the
//! topological sequence of the dependency graph. It only accepts a
//! [`ValidatedTaskSet`](crate::validation::ValidatedTaskSet), so it never
//! sees cycles or dangling references.
//!
//! # Report
//!
//! `ScheduleReport` carries the dated tasks, a `ScheduleSummary` (task
//! count, critical count, total duration, project window) and one
//! exemplar critical chain.
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod cpm;
mod kpi;
mod report;

pub use cpm::CpmScheduler;
pub use kpi::ScheduleSummary;
pub use report::ScheduleReport;
