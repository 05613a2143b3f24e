//! Input validation for project scheduling.
//!
//! Checks structural integrity of the task table before scheduling.
//! All checks run and accumulate into two lists, so one invocation
//! surfaces the complete defect set:
//!
//! | Check | Severity |
//! |-------|----------|
//! | Empty table, missing required field | error, stops further checks |
//! | Duplicate ids | error |
//! | Invalid durations / start dates | error |
//! | Malformed dependency text | error |
//! | Dangling references | error |
//! | Cycles (DAG validation) | error |
//! | Self-dependencies | error |
//! | Isolated tasks | warning |
//! | Non-numeric / negative side fields | warning / error |
//! | Blank task ids | error |
//! | Long dependency chain | warning |
//! | Overlapping explicit starts | warning |
//!
//! A run with zero errors yields a [`ValidatedTaskSet`], the only input the
//! scheduler accepts.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

mod checks;
mod issue;

pub use checks::{parse_duration_days, parse_numeric, parse_start_date};
pub use issue::{ValidationError, ValidationErrorKind, ValidationWarning, ValidationWarningKind};

use serde::Serialize;
use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::{Error, Result};
use crate::models::{Field, Task, TaskTable};
use checks::Checks;

/// Outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Blocking defects.
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings.
    pub warnings: Vec<ValidationWarning>,
    tasks: Vec<Task>,
}

impl ValidationReport {
    /// Whether scheduling may proceed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether an error of the given kind was found.
    pub fn has_error(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind() == kind)
    }

    /// Whether a warning of the given kind was found.
    pub fn has_warning(&self, kind: ValidationWarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind() == kind)
    }

    /// The typed task set. Empty unless [`is_ok`](Self::is_ok).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Certifies the task set for scheduling.
    ///
    /// # Errors
    /// [`Error::Invalid`] with every error and warning if any error was found.
    pub fn into_validated(self) -> Result<ValidatedTaskSet> {
        if !self.is_ok() {
            return Err(Error::Invalid {
                errors: self.errors,
                warnings: self.warnings,
            });
        }
        Ok(ValidatedTaskSet {
            tasks: self.tasks,
            warnings: self.warnings,
        })
    }

    fn error(&mut self, error: ValidationError) {
        debug!("Validation error: {}", error);
        self.errors.push(error);
    }

    fn warning(&mut self, warning: ValidationWarning) {
        debug!("Validation warning: {}", warning);
        self.warnings.push(warning);
    }
}

/// A task set certified duplicate-free, fully referenced and acyclic,
/// with valid durations.
///
/// Only obtainable through [`ValidationReport::into_validated`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedTaskSet {
    tasks: Vec<Task>,
    warnings: Vec<ValidationWarning>,
}

impl ValidatedTaskSet {
    /// Tasks in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Warnings raised while validating.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false: an empty table fails validation.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Validates a task table.
///
/// Never fails: every defect is reported in the returned report.
pub fn validate(table: &TaskTable, config: &ValidationConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if table.is_empty() {
        report.error(ValidationError::EmptyTaskSet);
        return report;
    }

    for field in Field::REQUIRED {
        if !table.has_field(field) {
            report.error(ValidationError::MissingField { field });
        }
    }
    if !report.is_ok() {
        return report;
    }

    let checks = Checks::new(table, config);

    if let Some(e) = checks.duplicate_ids() {
        report.error(e);
    }
    if let Some(e) = checks.invalid_durations() {
        report.error(e);
    }
    if let Some(e) = checks.invalid_start_dates() {
        report.error(e);
    }
    for e in checks.malformed_dependencies() {
        report.error(e);
    }
    for e in checks.dangling_references() {
        report.error(e);
    }
    for e in checks.cycles() {
        report.error(e);
    }
    if let Some(e) = checks.self_dependencies() {
        report.error(e);
    }
    if let Some(w) = checks.isolated_tasks() {
        report.warning(w);
    }
    let (side_errors, side_warnings) = checks.side_fields();
    for w in side_warnings {
        report.warning(w);
    }
    for e in side_errors {
        report.error(e);
    }
    if let Some(e) = checks.invalid_task_ids() {
        report.error(e);
    }
    if let Some(w) = checks.long_chain() {
        report.warning(w);
    }
    if let Some(w) = checks.schedule_overlaps() {
        report.warning(w);
    }

    if report.is_ok() {
        report.tasks = coerce_tasks(table, checks.parsed(), config);
    }

    debug!(
        "Validated {} tasks: {} error(s), {} warning(s)",
        table.len(),
        report.errors.len(),
        report.warnings.len()
    );
    report
}

/// Builds typed tasks. Only called once every value is known to coerce.
fn coerce_tasks(table: &TaskTable, parsed: &[Vec<String>], config: &ValidationConfig) -> Vec<Task> {
    let has_start = table.has_field(Field::Start);

    table
        .records
        .iter()
        .zip(parsed)
        .filter_map(|(record, dependencies)| {
            let duration_days = parse_duration_days(&record.duration)?;
            let start_date = if has_start {
                parse_start_date(record.start.as_deref(), &config.date_format).ok()?
            } else {
                None
            };
            let attributes = record
                .side_fields
                .iter()
                .filter(|(field, _)| table.has_field(Field::Side(**field)))
                .map(|(field, value)| (*field, value.clone()))
                .collect();

            Some(Task {
                id: record.id.clone(),
                duration_days,
                dependencies: dependencies.clone(),
                start_date,
                attributes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SideField, TaskRecord};
    use chrono::NaiveDate;

    fn table(records: Vec<TaskRecord>) -> TaskTable {
        TaskTable::from_records(records)
    }

    fn run(records: Vec<TaskRecord>) -> ValidationReport {
        validate(&table(records), &ValidationConfig::default())
    }

    fn sample_records() -> Vec<TaskRecord> {
        vec![
            TaskRecord::new("A", 5).with_dependencies(""),
            TaskRecord::new("B", 3).with_dependencies("A"),
            TaskRecord::new("C", 4).with_dependencies("A"),
            TaskRecord::new("D", 2).with_dependencies("B"),
        ]
    }

    #[test]
    fn test_valid_input() {
        let report = run(sample_records());
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
        assert_eq!(report.tasks().len(), 4);
        assert_eq!(report.tasks()[3].dependencies, vec!["B"]);
        assert_eq!(report.tasks()[0].duration_days, 5);
    }

    #[test]
    fn test_empty_table() {
        let report = run(vec![]);
        assert_eq!(report.errors, vec![ValidationError::EmptyTaskSet]);
    }

    #[test]
    fn test_missing_required_field_stops() {
        let table = TaskTable::new([Field::Id, Field::Dependencies])
            .with_record(TaskRecord::new("A", 1).with_dependencies("A"));
        let report = validate(&table, &ValidationConfig::default());

        assert_eq!(
            report.errors,
            vec![ValidationError::MissingField {
                field: Field::Duration
            }]
        );
    }

    #[test]
    fn test_duplicate_task_id() {
        let report = run(vec![
            TaskRecord::new("A", 1),
            TaskRecord::new("B", 1),
            TaskRecord::new("A", 2),
        ]);

        assert!(!report.is_ok());
        assert_eq!(
            report.errors,
            vec![ValidationError::DuplicateIds {
                ids: vec!["A".into()]
            }]
        );
        assert!(report.tasks().is_empty());
    }

    #[test]
    fn test_invalid_durations() {
        let report = run(vec![
            TaskRecord::new("A", 0),
            TaskRecord::new("B", -3),
            TaskRecord::new("C", "soon"),
            TaskRecord::new("D", 2),
        ]);

        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidDurations {
                tasks: vec!["A".into(), "B".into(), "C".into()]
            }]
        );
    }

    #[test]
    fn test_invalid_start_dates() {
        let report = run(vec![
            TaskRecord::new("A", 1).with_start("2024-01-01"),
            TaskRecord::new("B", 1).with_start("01/02/2024"),
            TaskRecord::new("C", 1),
        ]);

        assert!(report.has_error(ValidationErrorKind::InvalidStartDate));
        assert!(report.errors.contains(&ValidationError::InvalidStartDates {
            tasks: vec!["B".into()]
        }));
    }

    #[test]
    fn test_custom_date_format() {
        let config = ValidationConfig::default().with_date_format("%d.%m.%Y");
        let report = validate(
            &table(vec![TaskRecord::new("A", 1).with_start("15.03.2024")]),
            &config,
        );
        assert!(report.is_ok());
        assert_eq!(
            report.tasks()[0].start_date,
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_malformed_dependencies() {
        let report = run(vec![
            TaskRecord::new("A", 1),
            TaskRecord::new("B", 1).with_dependencies("[A]"),
            TaskRecord::new("C", 1).with_dependencies("A,,B"),
        ]);

        let malformed: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.kind() == ValidationErrorKind::MalformedDependencies)
            .collect();
        assert_eq!(malformed.len(), 2);
        assert!(malformed[0].to_string().contains("'B': [A]"));
        assert!(malformed[1].to_string().contains("'C': A,,B"));
    }

    #[test]
    fn test_dangling_reference() {
        let report = run(vec![TaskRecord::new("X", 1).with_dependencies("Y")]);

        assert_eq!(
            report.errors,
            vec![ValidationError::DanglingReference {
                task: "X".into(),
                dependency: "Y".into(),
            }]
        );
    }

    #[test]
    fn test_dangling_reference_every_pair() {
        let report = run(vec![
            TaskRecord::new("X", 1).with_dependencies("Y, Z, Y"),
            TaskRecord::new("W", 1).with_dependencies("Y"),
        ]);

        let pairs: Vec<String> = report
            .errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::DanglingReference { task, dependency } => {
                    Some(format!("{task}->{dependency}"))
                }
                _ => None,
            })
            .collect();
        assert_eq!(pairs, vec!["X->Y", "X->Z", "X->Y", "W->Y"]);
    }

    #[test]
    fn test_cyclic_dependency() {
        // A depends on B, B on C, C on A
        let report = run(vec![
            TaskRecord::new("A", 1).with_dependencies("B"),
            TaskRecord::new("B", 1).with_dependencies("C"),
            TaskRecord::new("C", 1).with_dependencies("A"),
        ]);

        let cycles: Vec<_> = report
            .errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::CyclicDependency { cycle } => Some(cycle),
                _ => None,
            })
            .collect();
        assert_eq!(cycles.len(), 1);
        assert!(["A", "B", "C"].iter().all(|id| cycles[0].contains(id)));
        assert!(report.clone().into_validated().is_err());
    }

    #[test]
    fn test_self_dependency_not_a_cycle() {
        let report = run(vec![
            TaskRecord::new("A", 1).with_dependencies("A"),
            TaskRecord::new("B", 1).with_dependencies("A"),
        ]);

        assert_eq!(
            report.errors,
            vec![ValidationError::SelfDependencies {
                tasks: vec!["A".into()]
            }]
        );
        assert!(!report.has_error(ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_isolated_tasks_warning() {
        let report = run(vec![
            TaskRecord::new("A", 1).with_dependencies(""),
            TaskRecord::new("B", 1).with_dependencies("A"),
            TaskRecord::new("Z", 1).with_dependencies("nan"),
        ]);

        assert!(report.is_ok());
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::IsolatedTasks {
                tasks: vec!["Z".into()]
            }]
        );
    }

    #[test]
    fn test_no_isolation_check_without_dependency_field() {
        let report = run(vec![TaskRecord::new("A", 1), TaskRecord::new("B", 1)]);
        assert!(report.is_ok());
        assert!(!report.has_warning(ValidationWarningKind::IsolatedTask));
    }

    #[test]
    fn test_no_isolation_check_for_single_task() {
        let report = run(vec![TaskRecord::new("A", 1).with_dependencies("")]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_side_fields() {
        let report = run(vec![
            TaskRecord::new("A", 1)
                .with_side_field(SideField::Workers, 2)
                .with_side_field(SideField::Cost, "cheap"),
            TaskRecord::new("B", 1)
                .with_side_field(SideField::Workers, -1)
                .with_side_field(SideField::Cost, -50),
        ]);

        assert_eq!(
            report.errors,
            vec![ValidationError::NegativeValues {
                field: SideField::Workers,
                tasks: vec!["B".into()]
            }]
        );
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::NonNumericValues {
                field: SideField::Cost,
                tasks: vec!["A".into()]
            }]
        );
    }

    #[test]
    fn test_missing_side_value_is_warning() {
        let report = run(vec![
            TaskRecord::new("A", 1).with_side_field(SideField::Priority, 1),
            TaskRecord::new("B", 1),
        ]);

        assert!(report.is_ok());
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::NonNumericValues {
                field: SideField::Priority,
                tasks: vec!["B".into()]
            }]
        );
    }

    #[test]
    fn test_invalid_task_ids() {
        let report = run(vec![TaskRecord::new("  ", 1), TaskRecord::new("A", 1)]);
        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidTaskIds {
                ids: vec!["  ".into()]
            }]
        );
    }

    #[test]
    fn test_long_chain_warning() {
        // 12 tasks in a single chain: 12 > 12 * 0.7
        let records: Vec<TaskRecord> = (0..12)
            .map(|i| {
                let record = TaskRecord::new(format!("T{i}"), 1);
                if i == 0 {
                    record.with_dependencies("")
                } else {
                    record.with_dependencies(format!("T{}", i - 1))
                }
            })
            .collect();

        let report = run(records.clone());
        assert!(report.is_ok());
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::LongDependencyChain {
                length: 12,
                task_count: 12
            }]
        );

        let relaxed = ValidationConfig::default().with_long_chain_ratio(1.0);
        let report = validate(&table(records), &relaxed);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_long_chain_not_checked_for_small_sets() {
        let report = run(vec![
            TaskRecord::new("A", 1).with_dependencies(""),
            TaskRecord::new("B", 1).with_dependencies("A"),
            TaskRecord::new("C", 1).with_dependencies("B"),
        ]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_schedule_overlap_warning() {
        let report = run(vec![
            TaskRecord::new("A", 5).with_start("2024-01-01"),
            TaskRecord::new("B", 2).with_start("2024-01-03"),
            TaskRecord::new("C", 1).with_start("2024-02-01"),
            TaskRecord::new("D", 1),
        ]);

        assert!(report.is_ok());
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::ScheduleOverlaps {
                pairs: vec![("A".into(), "B".into())]
            }]
        );
    }

    #[test]
    fn test_all_checks_accumulate() {
        let report = run(vec![
            TaskRecord::new("A", 0).with_dependencies("B"),
            TaskRecord::new("B", 1).with_dependencies("A"),
            TaskRecord::new("B", 1).with_dependencies("ghost"),
            TaskRecord::new("S", 1).with_dependencies("S"),
        ]);

        assert!(report.has_error(ValidationErrorKind::DuplicateId));
        assert!(report.has_error(ValidationErrorKind::InvalidDuration));
        assert!(report.has_error(ValidationErrorKind::DanglingReference));
        assert!(report.has_error(ValidationErrorKind::CyclicDependency));
        assert!(report.has_error(ValidationErrorKind::SelfDependency));
    }

    #[test]
    fn test_into_validated() {
        let validated = run(sample_records()).into_validated().unwrap();
        assert_eq!(validated.len(), 4);
        assert!(validated.warnings().is_empty());

        let err = run(vec![TaskRecord::new("X", 1).with_dependencies("Y")])
            .into_validated()
            .unwrap_err();
        match err {
            Error::Invalid { errors, .. } => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
