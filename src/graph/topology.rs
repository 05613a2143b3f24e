//! Topological sequencing and chain length.
//!
//! # Algorithm
//! Iterative DFS post-order over dependency edges. Entry points are the
//! tasks without prerequisites (input order), then every task not yet
//! visited (input order). A task is emitted only after all of its
//! dependencies have been emitted.
//!
//! A node is marked visited on entry, so a cycle is cut at the back edge
//! instead of looping. The output is then still a permutation of all ids,
//! just not a valid order along the cut edges. Validation rejects cyclic
//! input before scheduling, so the scheduler never sees such an order.
//!
//! # Complexity
//! O(V + E)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

use std::collections::{HashMap, HashSet};

use super::DependencyGraph;

impl DependencyGraph {
    /// Orders task ids so that each appears after all of its dependencies.
    ///
    /// Every id appears exactly once, even on malformed (cyclic) input.
    pub fn topological_order(&self) -> Vec<&str> {
        let mut visited: HashSet<&str> = HashSet::with_capacity(self.len());
        let mut order: Vec<&str> = Vec::with_capacity(self.len());

        for entry in self.roots().chain(self.ids()) {
            if !visited.insert(entry) {
                continue;
            }

            let mut stack: Vec<(&str, usize)> = vec![(entry, 0)];
            while let Some((node, cursor)) = stack.last_mut() {
                let node = *node;
                let dependencies = self.dependencies(node);
                let mut next = None;
                while let Some(dep) = dependencies.get(*cursor) {
                    *cursor += 1;
                    if dep != node && self.contains(dep) && !visited.contains(dep.as_str()) {
                        next = Some(dep.as_str());
                        break;
                    }
                }

                match next {
                    Some(dep) => {
                        visited.insert(dep);
                        stack.push((dep, 0));
                    }
                    None => {
                        order.push(node);
                        stack.pop();
                    }
                }
            }
        }

        order
    }

    /// Number of tasks in the longest dependency chain.
    ///
    /// Dependencies not yet placed (only possible on cyclic input) count as
    /// zero, which keeps the result bounded by the task count.
    pub fn longest_chain(&self) -> usize {
        let mut depth: HashMap<&str, usize> = HashMap::with_capacity(self.len());

        for id in self.topological_order() {
            let longest_dependency = self
                .edges_into(id)
                .filter_map(|dep| depth.get(dep).copied())
                .max()
                .unwrap_or(0);
            depth.insert(id, longest_dependency + 1);
        }

        depth.into_values().max().unwrap_or(0)
    }
}
