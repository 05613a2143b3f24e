//! Critical Path Method scheduling for dependency-linked task sets.
//!
//! Validates a table of tasks (ids, durations, free-text dependency lists,
//! optional start dates), then computes earliest/latest dates, slack and
//! the critical path.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TaskRecord`, `TaskTable`, `Task`,
//!   `CpmTimes`, `ScheduledTask`
//! - **`parser`**: Free-text dependency lists
//! - **`graph`**: Dependency graph, cycle detection, topological order
//! - **`validation`**: Structural checks, accumulated errors and warnings
//! - **`scheduler`**: Forward/backward CPM passes and the schedule report
//! - **`planner`**: The whole pipeline in one call
//! - **`config`**: Validator and scheduler options
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_cpm::config::{PlannerConfig, ScheduleConfig};
//! use u_cpm::models::{TaskRecord, TaskTable};
//! use u_cpm::planner::plan;
//!
//! let table = TaskTable::from_records(vec![
//!     TaskRecord::new("A", 5).with_dependencies(""),
//!     TaskRecord::new("B", 3).with_dependencies("A"),
//!     TaskRecord::new("C", 4).with_dependencies("A"),
//!     TaskRecord::new("D", 2).with_dependencies("B"),
//! ]);
//! let config = PlannerConfig::new().with_schedule(
//!     ScheduleConfig::new().with_anchor_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
//! );
//!
//! let report = plan(&table, &config).unwrap();
//! assert_eq!(report.critical_chain, vec!["A", "B", "D"]);
//! assert_eq!(report.task("C").unwrap().slack_days, 1);
//! ```
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod parser;
pub mod planner;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
