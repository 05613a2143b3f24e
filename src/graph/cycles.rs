//! Cycle enumeration.
//!
//! # Algorithm
//! Depth-first search from every task in input order, following dependency
//! edges to existing tasks (self-references excluded: they are reported
//! separately). The current path is kept as an explicit stack with a
//! companion `on_path` set; a dependency already on the path closes a
//! cycle, which is the path suffix starting at that dependency.
//!
//! Two global sets keep the search linear and the report free of repeats:
//! - `finished`: nodes whose whole dependency closure was explored without
//!   meeting a cycle. Never entered again.
//! - `reported`: members of cycles already found. Treated as dead ends, so
//!   a later search from a different start reports the next independent
//!   cycle instead of rediscovering the same one.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (back edges)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::DependencyGraph;

/// A dependency cycle, listed in edge direction (each id depends on the next,
/// the last depends on the first).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cycle {
    /// Distinct members, starting at the node where the cycle was closed.
    pub nodes: Vec<String>,
}

impl Cycle {
    /// Whether the cycle passes through the given task.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n == id)
    }

    /// Number of distinct tasks in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a cycle has at least one member.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Renders as `A → B → C → A`.
impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node} → ")?;
        }
        match self.nodes.first() {
            Some(first) => f.write_str(first),
            None => Ok(()),
        }
    }
}

impl DependencyGraph {
    /// Finds every distinct cycle, in discovery order.
    ///
    /// Cycles sharing a node with an already reported cycle are not
    /// reported again; independent cycles all are.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let mut finished: HashSet<&str> = HashSet::new();
        let mut reported: HashSet<&str> = HashSet::new();
        let mut rendered: HashSet<String> = HashSet::new();
        let mut cycles = Vec::new();

        for start in self.ids() {
            while !finished.contains(start) && !reported.contains(start) {
                let Some(members) = self.search_cycle(start, &mut finished, &reported) else {
                    break;
                };
                reported.extend(members.iter().copied());
                let cycle = Cycle {
                    nodes: members.into_iter().map(str::to_string).collect(),
                };
                if rendered.insert(cycle.to_string()) {
                    cycles.push(cycle);
                }
            }
        }

        cycles
    }

    /// Whether the graph has at least one cycle.
    pub fn has_cycles(&self) -> bool {
        !self.find_cycles().is_empty()
    }

    /// Iterative DFS from `start`. Returns the first cycle met, if any.
    ///
    /// Nodes fully explored are added to `finished`. When a cycle is found
    /// the search stops; nodes still on the path stay unfinished so a
    /// retry can explore their remaining edges.
    fn search_cycle<'a>(
        &'a self,
        start: &'a str,
        finished: &mut HashSet<&'a str>,
        reported: &HashSet<&'a str>,
    ) -> Option<Vec<&'a str>> {
        let mut path: Vec<&'a str> = vec![start];
        let mut cursors: Vec<usize> = vec![0];
        let mut on_path: HashSet<&'a str> = HashSet::from([start]);

        while let (Some(&node), Some(cursor)) = (path.last(), cursors.last_mut()) {
            let dependencies = self.dependencies(node);
            let mut next = None;
            while let Some(dep) = dependencies.get(*cursor) {
                *cursor += 1;
                if dep != node && self.contains(dep) {
                    next = Some(dep.as_str());
                    break;
                }
            }

            match next {
                Some(dep) if on_path.contains(dep) => {
                    let from = path.iter().position(|&n| n == dep)?;
                    return Some(path.split_off(from));
                }
                Some(dep) if finished.contains(dep) || reported.contains(dep) => {}
                Some(dep) => {
                    path.push(dep);
                    cursors.push(0);
                    on_path.insert(dep);
                }
                None => {
                    finished.insert(node);
                    on_path.remove(node);
                    path.pop();
                    cursors.pop();
                }
            }
        }

        None
    }
}
