//! Raw task records as delivered by the ingestion layer.
//!
//! Values are kept as text exactly as read. Coercion (numbers, dates,
//! dependency lists) happens during validation so that every defect can
//! be reported against the offending task and its raw value.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Field, SideField};

/// One row of the input table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    /// Task identifier, as given.
    pub id: String,
    /// Duration in days, numeric-coercible text.
    pub duration: String,
    /// Free-text dependency list (e.g. `"A, B"`). `None` = no value.
    pub dependencies: Option<String>,
    /// Explicit start date text. `None` = no value.
    pub start: Option<String>,
    /// Optional numeric side-columns.
    pub side_fields: BTreeMap<SideField, String>,
}

impl TaskRecord {
    /// Creates a record with an id and a duration.
    pub fn new(id: impl Into<String>, duration: impl ToString) -> Self {
        Self {
            id: id.into(),
            duration: duration.to_string(),
            ..Self::default()
        }
    }

    /// Sets the raw dependency text.
    pub fn with_dependencies(mut self, raw: impl Into<String>) -> Self {
        self.dependencies = Some(raw.into());
        self
    }

    /// Sets the raw start date text.
    pub fn with_start(mut self, raw: impl Into<String>) -> Self {
        self.start = Some(raw.into());
        self
    }

    /// Sets a side-column value.
    pub fn with_side_field(mut self, field: SideField, raw: impl ToString) -> Self {
        self.side_fields.insert(field, raw.to_string());
        self
    }
}

/// The complete input: the schema (which fields exist) plus the rows.
///
/// Row order is significant. It drives every deterministic ordering
/// in validation messages, topological sequencing and the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskTable {
    /// Fields present in the source schema.
    pub fields: BTreeSet<Field>,
    /// Task rows in input order.
    pub records: Vec<TaskRecord>,
}

impl TaskTable {
    /// Creates an empty table with the given schema.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            records: Vec::new(),
        }
    }

    /// Creates a table whose schema is inferred from the records.
    ///
    /// `Id` and `Duration` are always present; optional fields are present
    /// when at least one record carries a value for them.
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        let mut fields: BTreeSet<Field> = Field::REQUIRED.into_iter().collect();
        for record in &records {
            if record.dependencies.is_some() {
                fields.insert(Field::Dependencies);
            }
            if record.start.is_some() {
                fields.insert(Field::Start);
            }
            fields.extend(record.side_fields.keys().map(|&side| Field::Side(side)));
        }
        Self { fields, records }
    }

    /// Appends a record.
    pub fn with_record(mut self, record: TaskRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Whether the schema carries the given field.
    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
