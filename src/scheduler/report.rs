//! Schedule report.
//!
//! The dated task list, its summary, and one representative critical chain.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::graph::DependencyGraph;
use crate::models::{CpmTimes, ScheduledTask, TaskRecord, TaskTable};
use crate::validation::{ValidatedTaskSet, ValidationWarning};

use super::ScheduleSummary;

/// Result of scheduling a validated task set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Scheduled tasks in input order.
    pub tasks: Vec<ScheduledTask>,
    /// Headline metrics.
    pub summary: ScheduleSummary,
    /// One chain of critical tasks from a root to a terminal task.
    ///
    /// Parallel critical paths may exist; only the first one found by
    /// input order is listed here. Use [`ScheduleReport::critical_tasks`]
    /// for all of them.
    pub critical_chain: Vec<String>,
    /// Non-blocking findings carried over from validation.
    pub warnings: Vec<ValidationWarning>,
}

impl ScheduleReport {
    pub(super) fn build(
        validated: &ValidatedTaskSet,
        graph: &DependencyGraph,
        times: &HashMap<String, CpmTimes>,
    ) -> Self {
        let tasks: Vec<ScheduledTask> = validated
            .tasks()
            .iter()
            .filter_map(|task| {
                times
                    .get(&task.id)
                    .map(|t| ScheduledTask::new(task.clone(), *t))
            })
            .collect();

        let critical: HashSet<&str> = tasks
            .iter()
            .filter(|t| t.is_critical)
            .map(ScheduledTask::id)
            .collect();

        Self {
            summary: ScheduleSummary::calculate(&tasks),
            critical_chain: critical_chain(graph, &critical),
            warnings: validated.warnings().to_vec(),
            tasks,
        }
    }

    /// Looks up a scheduled task.
    pub fn task(&self, id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// All critical tasks, in input order.
    pub fn critical_tasks(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter().filter(|t| t.is_critical)
    }

    /// Ids of all critical tasks, in input order.
    pub fn critical_ids(&self) -> Vec<&str> {
        self.critical_tasks().map(ScheduledTask::id).collect()
    }

    /// Converts the schedule back to a table with computed starts filled in,
    /// written with `date_format`.
    ///
    /// Feeding the result to the pipeline again, validated with the same
    /// format, yields the same dates.
    pub fn to_table(&self, date_format: &str) -> TaskTable {
        let records = self
            .tasks
            .iter()
            .map(|scheduled| {
                let task = &scheduled.task;
                let mut record = TaskRecord::new(task.id.clone(), task.duration_days)
                    .with_dependencies(task.dependencies.join(", "))
                    .with_start(scheduled.start.format(date_format).to_string());
                for (field, value) in &task.attributes {
                    record = record.with_side_field(*field, value);
                }
                record
            })
            .collect();

        TaskTable::from_records(records)
    }
}

/// Walks from the first critical root, always taking the first critical
/// successor.
fn critical_chain(graph: &DependencyGraph, critical: &HashSet<&str>) -> Vec<String> {
    let Some(mut current) = graph.roots().find(|id| critical.contains(id)) else {
        return Vec::new();
    };

    let mut chain = vec![current.to_string()];
    // Acyclic input, so the walk ends after at most len() steps.
    for _ in 0..graph.len() {
        let next = graph
            .successors(current)
            .iter()
            .map(String::as_str)
            .find(|succ| critical.contains(succ));
        match next {
            Some(succ) => {
                chain.push(succ.to_string());
                current = succ;
            }
            None => break,
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ValidationConfig, DEFAULT_DATE_FORMAT};
    use crate::models::{Field, SideField};
    use crate::scheduler::CpmScheduler;
    use crate::validation::validate;
    use chrono::NaiveDate;

    fn report(records: Vec<TaskRecord>) -> ScheduleReport {
        let validated = validate(
            &TaskTable::from_records(records),
            &ValidationConfig::default(),
        )
        .into_validated()
        .unwrap();
        CpmScheduler::new()
            .with_anchor_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .schedule(&validated)
            .unwrap()
    }

    #[test]
    fn test_chain_follows_first_critical_successor() {
        let r = report(vec![
            TaskRecord::new("A", 2).with_dependencies(""),
            TaskRecord::new("B", 3).with_dependencies("A"),
            TaskRecord::new("C", 3).with_dependencies("A"),
            TaskRecord::new("D", 1).with_dependencies("B, C"),
        ]);

        assert_eq!(r.critical_ids(), vec!["A", "B", "C", "D"]);
        assert_eq!(r.critical_chain, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_chain_starts_at_first_critical_root() {
        let r = report(vec![
            TaskRecord::new("short", 1).with_dependencies(""),
            TaskRecord::new("long", 4).with_dependencies(""),
            TaskRecord::new("end", 1).with_dependencies("short, long"),
        ]);

        assert!(!r.task("short").unwrap().is_critical);
        assert_eq!(r.critical_chain, vec!["long", "end"]);
    }

    #[test]
    fn test_tasks_keep_input_order_and_attributes() {
        let r = report(vec![
            TaskRecord::new("Z", 1).with_side_field(SideField::Workers, 3),
            TaskRecord::new("A", 1),
        ]);

        let ids: Vec<&str> = r.tasks.iter().map(ScheduledTask::id).collect();
        assert_eq!(ids, vec!["Z", "A"]);
        assert_eq!(
            r.task("Z").unwrap().task.attributes.get(&SideField::Workers),
            Some(&"3".to_string())
        );
    }

    #[test]
    fn test_to_table_fills_starts() {
        let r = report(vec![
            TaskRecord::new("A", 2).with_dependencies(""),
            TaskRecord::new("B", 1).with_dependencies("A"),
        ]);
        let table = r.to_table(DEFAULT_DATE_FORMAT);

        assert!(table.has_field(Field::Start));
        assert_eq!(table.records[1].start.as_deref(), Some("2024-01-03"));
        assert_eq!(table.records[1].dependencies.as_deref(), Some("A"));
    }

    #[test]
    fn test_to_table_uses_given_format() {
        let r = report(vec![TaskRecord::new("A", 2)]);
        let table = r.to_table("%d.%m.%Y");
        assert_eq!(table.records[0].start.as_deref(), Some("01.01.2024"));
    }

    #[test]
    fn test_report_serializes() {
        let r = report(vec![TaskRecord::new("A", 2)]);
        let json = serde_json::to_string(&r).unwrap();
        let back: ScheduleReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
