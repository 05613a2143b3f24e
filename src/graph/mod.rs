//! Dependency graph over task identifiers.
//!
//! The graph is derived, never stored: it is rebuilt from the task set for
//! every run. Each node keeps its dependencies exactly as parsed (order and
//! repeats included) and the inverse successor set restricted to ids that
//! exist. Dangling references therefore stay visible on the dependent task
//! but never become edges.
//!
//! Iteration follows input order everywhere; the backing `HashMap` is only
//! used for lookup.
//!
//! # Algorithms
//!
//! - [`DependencyGraph::find_cycles`]: iterative DFS cycle enumeration
//! - [`DependencyGraph::topological_order`]: iterative DFS post-order
//! - [`DependencyGraph::longest_chain`]: longest dependency chain (in tasks)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3-22.4

mod cycles;
mod topology;

pub use cycles::Cycle;

use std::collections::HashMap;
use tracing::debug;

use crate::models::Task;

/// Adjacency of a single task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphNode {
    /// Dependency ids as parsed, dangling and repeated ones included.
    pub dependencies: Vec<String>,
    /// Ids of existing tasks that depend on this one, in input order.
    pub successors: Vec<String>,
}

/// Forward and reverse adjacency over task ids.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    order: Vec<String>,
    nodes: HashMap<String, GraphNode>,
}

impl DependencyGraph {
    /// Builds the graph from `(id, dependencies)` pairs in input order.
    ///
    /// A repeated id keeps the adjacency of its first occurrence; duplicates
    /// are a validation error and never reach scheduling. Self-references
    /// stay in the dependency list but do not produce a successor edge.
    pub fn build<'a, I, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, D)>,
        D: IntoIterator<Item = &'a str>,
    {
        let mut order = Vec::new();
        let mut nodes: HashMap<String, GraphNode> = HashMap::new();

        for (id, dependencies) in entries {
            if nodes.contains_key(id) {
                debug!("Ignoring repeated task id '{}' while building graph", id);
                continue;
            }
            let node = GraphNode {
                dependencies: dependencies.into_iter().map(str::to_string).collect(),
                successors: Vec::new(),
            };
            order.push(id.to_string());
            nodes.insert(id.to_string(), node);
        }

        for id in &order {
            let dependencies = nodes
                .get(id)
                .map(|node| node.dependencies.clone())
                .unwrap_or_default();
            for dependency in dependencies {
                if dependency == *id {
                    continue;
                }
                if let Some(target) = nodes.get_mut(&dependency) {
                    if !target.successors.contains(id) {
                        target.successors.push(id.clone());
                    }
                }
            }
        }

        debug!("Built dependency graph with {} tasks", order.len());
        Self { order, nodes }
    }

    /// Builds the graph from validated tasks.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self::build(
            tasks
                .iter()
                .map(|t| (t.id.as_str(), t.dependencies.iter().map(String::as_str))),
        )
    }

    /// Whether a task with this id exists.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of distinct task ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Task ids in input order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Adjacency of a task.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Dependencies of a task as parsed. Empty for unknown ids.
    pub fn dependencies(&self, id: &str) -> &[String] {
        self.nodes
            .get(id)
            .map(|n| n.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Successors of a task. Empty for unknown ids.
    pub fn successors(&self, id: &str) -> &[String] {
        self.nodes
            .get(id)
            .map(|n| n.successors.as_slice())
            .unwrap_or(&[])
    }

    /// Dependencies that are real edges: existing tasks other than `id`.
    pub fn edges_into<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.dependencies(id)
            .iter()
            .map(String::as_str)
            .filter(move |dep| *dep != id && self.contains(dep))
    }

    /// Tasks with no dependencies at all, in input order.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.ids().filter(|id| self.dependencies(id).is_empty())
    }

    /// Whether a task has neither dependencies nor successors.
    pub fn is_isolated(&self, id: &str) -> bool {
        self.dependencies(id).is_empty() && self.successors(id).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn graph(entries: &[(&'static str, Vec<&'static str>)]) -> DependencyGraph {
        DependencyGraph::build(entries.iter().map(|(id, deps)| (*id, deps.iter().copied())))
    }

    #[test]
    fn test_build_forward_and_reverse() {
        let g = graph(&[("A", vec![]), ("B", vec!["A"]), ("C", vec!["A"]), ("D", vec!["B"])]);

        assert_eq!(g.len(), 4);
        assert_eq!(g.dependencies("D"), ["B"]);
        assert_eq!(g.successors("A"), ["B", "C"]);
        assert_eq!(g.successors("B"), ["D"]);
        assert!(g.successors("D").is_empty());
    }

    #[test]
    fn test_dangling_reference_is_not_an_edge() {
        let g = graph(&[("X", vec!["Y"])]);

        assert_eq!(g.dependencies("X"), ["Y"]);
        assert!(!g.contains("Y"));
        assert_eq!(g.edges_into("X").count(), 0);
    }

    #[test]
    fn test_repeated_dependency_single_successor() {
        let g = graph(&[("A", vec![]), ("B", vec!["A", "A"])]);
        assert_eq!(g.dependencies("B"), ["A", "A"]);
        assert_eq!(g.successors("A"), ["B"]);
    }

    #[test]
    fn test_self_reference_not_a_successor() {
        let g = graph(&[("A", vec!["A"])]);
        assert!(g.successors("A").is_empty());
        assert_eq!(g.edges_into("A").count(), 0);
        assert!(!g.is_isolated("A"));
    }

    #[test]
    fn test_repeated_id_keeps_first() {
        let g = graph(&[("A", vec![]), ("A", vec!["B"]), ("B", vec![])]);
        assert_eq!(g.len(), 2);
        assert!(g.dependencies("A").is_empty());
    }

    #[test]
    fn test_roots_and_isolation() {
        let g = graph(&[("A", vec![]), ("B", vec!["A"]), ("Z", vec![])]);
        assert_eq!(g.roots().collect::<Vec<_>>(), vec!["A", "Z"]);
        assert!(g.is_isolated("Z"));
        assert!(!g.is_isolated("A"));
        assert!(!g.is_isolated("B"));
    }

    #[test]
    fn test_ids_follow_input_order() {
        let g = graph(&[("z", vec![]), ("a", vec![]), ("m", vec![])]);
        assert_eq!(g.ids().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_unknown_id() {
        let g = graph(&[("A", vec![])]);
        assert!(g.node("nope").is_none());
        assert!(g.dependencies("nope").is_empty());
        assert!(g.successors("nope").is_empty());
    }
}
