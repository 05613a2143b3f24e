//! End-to-end planning pipeline.
//!
//! `TaskTable` → validate → certify → schedule → `ScheduleReport`.
//!
//! Each stage only runs when the previous one succeeded. A failed
//! validation returns every finding at once through [`Error::Invalid`].

use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::models::TaskTable;
use crate::scheduler::{CpmScheduler, ScheduleReport};
use crate::validation::validate;

/// Runs the whole pipeline with a fixed configuration.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_cpm::config::{PlannerConfig, ScheduleConfig};
/// use u_cpm::models::{TaskRecord, TaskTable};
/// use u_cpm::planner::Planner;
///
/// let table = TaskTable::from_records(vec![
///     TaskRecord::new("design", 3).with_dependencies(""),
///     TaskRecord::new("build", 5).with_dependencies("design"),
/// ]);
/// let config = PlannerConfig::new().with_schedule(
///     ScheduleConfig::new().with_anchor_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
/// );
///
/// let report = Planner::with_config(config).plan(&table).unwrap();
/// assert_eq!(report.summary.total_duration_days, 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a planner from configuration.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validates and schedules a task table.
    ///
    /// # Errors
    /// - [`Error::Invalid`] if validation finds any error.
    /// - [`Error::DateOutOfRange`] if a computed date is not representable.
    pub fn plan(&self, table: &TaskTable) -> Result<ScheduleReport> {
        info!("Planning {} task record(s)", table.len());

        let report = validate(table, &self.config.validation);
        for warning in &report.warnings {
            warn!("{}", warning);
        }

        let validated = report.into_validated().inspect_err(|err| {
            if let Error::Invalid { errors, .. } = err {
                warn!("Validation failed with {} error(s)", errors.len());
            }
        })?;

        CpmScheduler::with_config(self.config.schedule.clone()).schedule(&validated)
    }
}

/// Validates and schedules a task table.
///
/// Shorthand for `Planner::with_config(config.clone()).plan(table)`.
pub fn plan(table: &TaskTable, config: &PlannerConfig) -> Result<ScheduleReport> {
    Planner::with_config(config.clone()).plan(table)
}
