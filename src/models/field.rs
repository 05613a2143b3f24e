//! Canonical input fields.
//!
//! The ingestion layer maps arbitrary column headers onto this closed set
//! of fields. The core never sees raw header names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical field of the task table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Task identity (required).
    Id,
    /// Task duration in days (required).
    Duration,
    /// Free-text list of prerequisite task ids.
    Dependencies,
    /// Explicit earliest start date.
    Start,
    /// Optional numeric side-column.
    Side(SideField),
}

impl Field {
    /// Fields every schema must carry.
    pub const REQUIRED: [Field; 2] = [Field::Id, Field::Duration];

    /// Whether the schema cannot be processed without this field.
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("id"),
            Self::Duration => f.write_str("duration"),
            Self::Dependencies => f.write_str("dependencies"),
            Self::Start => f.write_str("start"),
            Self::Side(side) => side.fmt(f),
        }
    }
}

/// Optional numeric side-columns carried through scheduling untouched.
///
/// Non-numeric values are reported as warnings. Negative values are an
/// error only where a negative quantity is meaningless (worker count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideField {
    /// Number of workers assigned to the task.
    Workers,
    /// Relative task priority.
    Priority,
    /// Task cost.
    Cost,
}

impl SideField {
    /// All side fields, in report order.
    pub const ALL: [SideField; 3] = [SideField::Workers, SideField::Priority, SideField::Cost];

    /// Whether a negative value in this field blocks scheduling.
    pub fn rejects_negative(self) -> bool {
        matches!(self, Self::Workers)
    }
}

impl fmt::Display for SideField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workers => f.write_str("workers"),
            Self::Priority => f.write_str("priority"),
            Self::Cost => f.write_str("cost"),
        }
    }
}
