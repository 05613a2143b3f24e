//! Individual structural checks.
//!
//! Every check is independent and returns its findings; none short-circuits
//! another. The record order of the table drives the order of ids inside
//! each finding.

use chrono::{Days, NaiveDate};
use std::collections::{HashMap, HashSet};

use crate::config::ValidationConfig;
use crate::graph::DependencyGraph;
use crate::models::{Field, SideField, TaskRecord, TaskTable};
use crate::parser::{parse_dependencies, syntax_defects};

use super::{ValidationError, ValidationWarning};

/// Parses a duration in whole days. `None` if not a finite, positive,
/// whole number.
pub fn parse_duration_days(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Parses an explicit start date. Blank or absent values are `Ok(None)`.
pub fn parse_start_date(
    raw: Option<&str>,
    format: &str,
) -> Result<Option<NaiveDate>, chrono::ParseError> {
    match raw.map(str::trim).filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, format).map(Some),
    }
}

/// Parses a side-field value. `None` if missing or not a finite number.
pub fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Shared state for one validation run: parsed dependencies and the graph.
pub(super) struct Checks<'a> {
    table: &'a TaskTable,
    config: &'a ValidationConfig,
    parsed: Vec<Vec<String>>,
    graph: DependencyGraph,
}

impl<'a> Checks<'a> {
    pub(super) fn new(table: &'a TaskTable, config: &'a ValidationConfig) -> Self {
        let has_dependencies = table.has_field(Field::Dependencies);
        let parsed: Vec<Vec<String>> = table
            .records
            .iter()
            .map(|r| {
                if has_dependencies {
                    parse_dependencies(r.dependencies.as_deref())
                } else {
                    Vec::new()
                }
            })
            .collect();

        let graph = DependencyGraph::build(
            table
                .records
                .iter()
                .zip(&parsed)
                .map(|(r, deps)| (r.id.as_str(), deps.iter().map(String::as_str))),
        );

        Self {
            table,
            config,
            parsed,
            graph,
        }
    }

    /// Parsed dependencies per record, in record order.
    pub(super) fn parsed(&self) -> &[Vec<String>] {
        &self.parsed
    }

    fn rows(&self) -> impl Iterator<Item = (&'a TaskRecord, &[String])> {
        self.table
            .records
            .iter()
            .zip(self.parsed.iter().map(Vec::as_slice))
    }

    fn has_dependencies(&self) -> bool {
        self.table.has_field(Field::Dependencies)
    }

    pub(super) fn duplicate_ids(&self) -> Option<ValidationError> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.table.records {
            *counts.entry(record.id.as_str()).or_insert(0) += 1;
        }

        let mut seen = HashSet::new();
        let ids: Vec<String> = self
            .table
            .records
            .iter()
            .map(|r| r.id.as_str())
            .filter(|id| counts.get(id).copied().unwrap_or(0) > 1 && seen.insert(*id))
            .map(str::to_string)
            .collect();

        (!ids.is_empty()).then_some(ValidationError::DuplicateIds { ids })
    }

    pub(super) fn invalid_durations(&self) -> Option<ValidationError> {
        let tasks: Vec<String> = self
            .table
            .records
            .iter()
            .filter(|r| parse_duration_days(&r.duration).is_none())
            .map(|r| r.id.clone())
            .collect();

        (!tasks.is_empty()).then_some(ValidationError::InvalidDurations { tasks })
    }

    pub(super) fn invalid_start_dates(&self) -> Option<ValidationError> {
        if !self.table.has_field(Field::Start) {
            return None;
        }

        let tasks: Vec<String> = self
            .table
            .records
            .iter()
            .filter(|r| parse_start_date(r.start.as_deref(), &self.config.date_format).is_err())
            .map(|r| r.id.clone())
            .collect();

        (!tasks.is_empty()).then_some(ValidationError::InvalidStartDates { tasks })
    }

    pub(super) fn malformed_dependencies(&self) -> Vec<ValidationError> {
        if !self.has_dependencies() {
            return Vec::new();
        }

        self.table
            .records
            .iter()
            .flat_map(|r| {
                let raw = r.dependencies.as_deref();
                syntax_defects(raw)
                    .into_iter()
                    .map(move |defect| ValidationError::MalformedDependencies {
                        task: r.id.clone(),
                        raw: raw.unwrap_or_default().to_string(),
                        defect,
                    })
            })
            .collect()
    }

    pub(super) fn dangling_references(&self) -> Vec<ValidationError> {
        self.rows()
            .flat_map(move |(record, deps)| {
                deps.iter()
                    .filter(move |dep| !self.graph.contains(dep))
                    .map(move |dep| ValidationError::DanglingReference {
                        task: record.id.clone(),
                        dependency: dep.clone(),
                    })
            })
            .collect()
    }

    pub(super) fn cycles(&self) -> Vec<ValidationError> {
        self.graph
            .find_cycles()
            .into_iter()
            .map(|cycle| ValidationError::CyclicDependency { cycle })
            .collect()
    }

    pub(super) fn self_dependencies(&self) -> Option<ValidationError> {
        let tasks: Vec<String> = self
            .rows()
            .filter(|(record, deps)| deps.iter().any(|d| *d == record.id))
            .map(|(record, _)| record.id.clone())
            .collect();

        (!tasks.is_empty()).then_some(ValidationError::SelfDependencies { tasks })
    }

    pub(super) fn isolated_tasks(&self) -> Option<ValidationWarning> {
        if !self.has_dependencies() || self.table.len() <= 1 {
            return None;
        }

        let tasks: Vec<String> = self
            .graph
            .ids()
            .filter(|id| self.graph.is_isolated(id))
            .map(str::to_string)
            .collect();

        (!tasks.is_empty()).then_some(ValidationWarning::IsolatedTasks { tasks })
    }

    pub(super) fn side_fields(&self) -> (Vec<ValidationError>, Vec<ValidationWarning>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for field in SideField::ALL {
            if !self.table.has_field(Field::Side(field)) {
                continue;
            }

            let mut non_numeric = Vec::new();
            let mut negative = Vec::new();
            for record in &self.table.records {
                match parse_numeric(record.side_fields.get(&field).map(String::as_str)) {
                    None => non_numeric.push(record.id.clone()),
                    Some(value) if value < 0.0 && field.rejects_negative() => {
                        negative.push(record.id.clone())
                    }
                    Some(_) => {}
                }
            }

            if !non_numeric.is_empty() {
                warnings.push(ValidationWarning::NonNumericValues {
                    field,
                    tasks: non_numeric,
                });
            }
            if !negative.is_empty() {
                errors.push(ValidationError::NegativeValues {
                    field,
                    tasks: negative,
                });
            }
        }

        (errors, warnings)
    }

    pub(super) fn invalid_task_ids(&self) -> Option<ValidationError> {
        let ids: Vec<String> = self
            .table
            .records
            .iter()
            .filter(|r| r.id.trim().is_empty())
            .map(|r| r.id.clone())
            .collect();

        (!ids.is_empty()).then_some(ValidationError::InvalidTaskIds { ids })
    }

    pub(super) fn long_chain(&self) -> Option<ValidationWarning> {
        if !self.has_dependencies() {
            return None;
        }
        let task_count = self.table.len();
        let threshold = self.config.long_chain_threshold(task_count)?;

        let length = self.graph.longest_chain();
        (length as f64 > threshold)
            .then_some(ValidationWarning::LongDependencyChain { length, task_count })
    }

    pub(super) fn schedule_overlaps(&self) -> Option<ValidationWarning> {
        if !self.table.has_field(Field::Start) {
            return None;
        }

        let intervals: Vec<(&str, NaiveDate, NaiveDate)> = self
            .table
            .records
            .iter()
            .filter_map(|r| {
                let start = parse_start_date(r.start.as_deref(), &self.config.date_format)
                    .ok()
                    .flatten()?;
                let days = u64::try_from(parse_duration_days(&r.duration)?).ok()?;
                let end = start.checked_add_days(Days::new(days))?;
                Some((r.id.as_str(), start, end))
            })
            .collect();

        let mut pairs = Vec::new();
        for (i, (id_a, start_a, end_a)) in intervals.iter().enumerate() {
            for (id_b, start_b, end_b) in intervals.iter().skip(i + 1) {
                if start_a <= end_b && start_b <= end_a {
                    pairs.push((id_a.to_string(), id_b.to_string()));
                }
            }
        }

        (!pairs.is_empty()).then_some(ValidationWarning::ScheduleOverlaps { pairs })
    }
}
