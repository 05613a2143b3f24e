//! Validation findings.
//!
//! Two severities only: errors block scheduling, warnings never do.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::Cycle;
use crate::models::{Field, SideField};
use crate::parser::SyntaxDefect;

/// A blocking validation defect.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// The table has no rows.
    #[error("task set is empty")]
    EmptyTaskSet,

    /// A required field is absent from the schema.
    #[error("missing required field '{field}'")]
    MissingField {
        /// The absent field.
        field: Field,
    },

    /// Ids shared by more than one task.
    #[error("duplicate task ids: {}", quoted(.ids))]
    DuplicateIds {
        /// Each duplicated id, once, in input order.
        ids: Vec<String>,
    },

    /// Durations that are not whole, finite, positive numbers.
    #[error("invalid durations: {}", quoted(.tasks))]
    InvalidDurations {
        /// Affected tasks.
        tasks: Vec<String>,
    },

    /// Explicit start dates that do not parse.
    #[error("invalid start dates: {}", quoted(.tasks))]
    InvalidStartDates {
        /// Affected tasks.
        tasks: Vec<String>,
    },

    /// Raw dependency text with a syntax defect.
    #[error("{defect} in dependencies of task '{task}': {raw}")]
    MalformedDependencies {
        /// Task owning the dependency field.
        task: String,
        /// The raw text as given.
        raw: String,
        /// What is wrong with it.
        defect: SyntaxDefect,
    },

    /// A dependency on an id that is not in the task set.
    #[error("task '{task}' depends on missing task '{dependency}'")]
    DanglingReference {
        /// The dependent task.
        task: String,
        /// The id that does not exist.
        dependency: String,
    },

    /// Tasks listing themselves as a dependency.
    #[error("self-dependencies: {}", quoted(.tasks))]
    SelfDependencies {
        /// Affected tasks.
        tasks: Vec<String>,
    },

    /// A dependency cycle among existing tasks.
    #[error("cyclic dependency: {cycle}")]
    CyclicDependency {
        /// The cycle, in edge direction.
        cycle: Cycle,
    },

    /// Negative values in a side field where they make no sense.
    #[error("negative values in '{field}': {}", quoted(.tasks))]
    NegativeValues {
        /// The side field.
        field: SideField,
        /// Affected tasks.
        tasks: Vec<String>,
    },

    /// Ids that are blank after trimming.
    #[error("invalid task ids: {}", quoted(.ids))]
    InvalidTaskIds {
        /// The offending ids, as given.
        ids: Vec<String>,
    },
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No rows.
    EmptyTaskSet,
    /// Required field absent from the schema.
    MissingField,
    /// Two tasks share the same ID.
    DuplicateId,
    /// Duration not a positive whole number.
    InvalidDuration,
    /// Start date does not parse.
    InvalidStartDate,
    /// Dependency text has invalid characters or empty elements.
    MalformedDependencies,
    /// A task references a predecessor that doesn't exist.
    DanglingReference,
    /// A task depends on itself.
    SelfDependency,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// Negative side-field value.
    NegativeValue,
    /// Blank task id.
    InvalidTaskId,
}

impl ValidationError {
    /// The error category.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::EmptyTaskSet => ValidationErrorKind::EmptyTaskSet,
            Self::MissingField { .. } => ValidationErrorKind::MissingField,
            Self::DuplicateIds { .. } => ValidationErrorKind::DuplicateId,
            Self::InvalidDurations { .. } => ValidationErrorKind::InvalidDuration,
            Self::InvalidStartDates { .. } => ValidationErrorKind::InvalidStartDate,
            Self::MalformedDependencies { .. } => ValidationErrorKind::MalformedDependencies,
            Self::DanglingReference { .. } => ValidationErrorKind::DanglingReference,
            Self::SelfDependencies { .. } => ValidationErrorKind::SelfDependency,
            Self::CyclicDependency { .. } => ValidationErrorKind::CyclicDependency,
            Self::NegativeValues { .. } => ValidationErrorKind::NegativeValue,
            Self::InvalidTaskIds { .. } => ValidationErrorKind::InvalidTaskId,
        }
    }
}

impl ValidationErrorKind {
    /// A short hint on how to fix this kind of defect.
    pub fn remedy(self) -> &'static str {
        match self {
            Self::EmptyTaskSet => "Provide at least one task",
            Self::MissingField => "Add the missing column to the input",
            Self::DuplicateId => "Make task names unique",
            Self::InvalidDuration => "Durations must be positive whole numbers of days",
            Self::InvalidStartDate => "Write start dates in the configured date format",
            Self::MalformedDependencies => "Use a plain comma-separated list of task names",
            Self::DanglingReference => "Check the task names used in dependencies",
            Self::SelfDependency => "A task cannot depend on itself",
            Self::CyclicDependency => "Remove circular references between tasks",
            Self::NegativeValue => "Replace negative values with positive ones",
            Self::InvalidTaskId => "Give every task a non-empty name",
        }
    }
}

/// A non-blocking validation finding.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValidationWarning {
    /// Tasks with neither dependencies nor successors.
    #[error("isolated tasks (no links): {}", quoted(.tasks))]
    IsolatedTasks {
        /// Affected tasks.
        tasks: Vec<String>,
    },

    /// Missing or non-numeric side-field values.
    #[error("non-numeric values in '{field}': {}", quoted(.tasks))]
    NonNumericValues {
        /// The side field.
        field: SideField,
        /// Affected tasks.
        tasks: Vec<String>,
    },

    /// The longest dependency chain spans most of the task set.
    #[error("very long dependency chain ({length} of {task_count} tasks)")]
    LongDependencyChain {
        /// Tasks in the longest chain.
        length: usize,
        /// Tasks in the set.
        task_count: usize,
    },

    /// Explicit start intervals that overlap. Informational: dependencies
    /// are applied by the scheduler afterwards.
    #[error("possible schedule conflicts: {} overlap(s)", .pairs.len())]
    ScheduleOverlaps {
        /// Overlapping task pairs, in input order.
        pairs: Vec<(String, String)>,
    },
}

/// Categories of validation warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationWarningKind {
    /// Task without links.
    IsolatedTask,
    /// Side-field value not numeric.
    NonNumericValue,
    /// Chain longer than the configured share of tasks.
    LongDependencyChain,
    /// Overlapping explicit intervals.
    ScheduleOverlap,
}

impl ValidationWarning {
    /// The warning category.
    pub fn kind(&self) -> ValidationWarningKind {
        match self {
            Self::IsolatedTasks { .. } => ValidationWarningKind::IsolatedTask,
            Self::NonNumericValues { .. } => ValidationWarningKind::NonNumericValue,
            Self::LongDependencyChain { .. } => ValidationWarningKind::LongDependencyChain,
            Self::ScheduleOverlaps { .. } => ValidationWarningKind::ScheduleOverlap,
        }
    }
}

fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
