// src/dag/graph.rs

//! Insertion-ordered directed graph with acyclicity enforced on every
//! mutation.
//!
//! The graph is generic over its node type so it can be used standalone:
//! the [`Scheduler`](crate::dag::Scheduler) keys it by `TaskId`, while
//! config validation keys it by task name.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use thiserror::Error;

/// Returned by [`DependencyGraph::add_edge`] when the edge would close a
/// cycle. Carries the rejected edge; the graph itself is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("edge {from:?} -> {to:?} would close a dependency cycle")]
pub struct CycleError<N: fmt::Debug> {
    pub from: N,
    pub to: N,
}

/// Directed acyclic graph stored as an insertion-ordered adjacency map.
///
/// Every completed mutation leaves the graph acyclic: `add_edge` revalidates
/// the whole node set and rolls the mutation back before reporting a
/// [`CycleError`]. Nodes are never removed.
#[derive(Debug, Clone)]
pub struct DependencyGraph<N> {
    /// Node to ordered successor list. Map order is insertion order, which
    /// drives the determinism of [`topological_order`](Self::topological_order).
    nodes: IndexMap<N, Vec<N>>,
}

impl<N> DependencyGraph<N>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }

    /// Add a node with an empty successor list. Idempotent: adding a node
    /// that already exists keeps its successors and its insertion position.
    pub fn add_node(&mut self, node: N) {
        self.nodes.entry(node).or_default();
    }

    /// Add the edge `from -> to`, materializing either endpoint as a node if
    /// it is not present yet.
    ///
    /// If the edge closes a cycle, the mutation is undone (the appended
    /// successor and any node materialized by this call are removed) and
    /// `CycleError { from, to }` is returned, so the graph is acyclic after
    /// every completed call.
    pub fn add_edge(&mut self, from: N, to: N) -> Result<(), CycleError<N>> {
        let from_was_new = !self.nodes.contains_key(&from);
        self.add_node(from);
        let to_was_new = !self.nodes.contains_key(&to);
        self.add_node(to);
        self.nodes[&from].push(to);

        // A topological order that misses nodes is the cycle signal.
        if self.topological_order().len() == self.nodes.len() {
            return Ok(());
        }

        if let Some(successors) = self.nodes.get_mut(&from) {
            successors.pop();
        }
        if to_was_new {
            self.nodes.shift_remove(&to);
        }
        if from_was_new {
            self.nodes.shift_remove(&from);
        }
        Err(CycleError { from, to })
    }

    /// Number of incoming edges per node, in insertion order. Covers every
    /// node: `add_edge` materializes edge targets as keys, so nodes that only
    /// ever appear as targets are counted too.
    pub fn in_degrees(&self) -> IndexMap<N, usize> {
        let mut degrees: IndexMap<N, usize> = self.nodes.keys().map(|&node| (node, 0)).collect();
        for successors in self.nodes.values() {
            for succ in successors {
                if let Some(count) = degrees.get_mut(succ) {
                    *count += 1;
                }
            }
        }
        degrees
    }

    /// Deterministic topological order via Kahn's algorithm.
    ///
    /// Zero-in-degree nodes seed a FIFO queue in insertion order; peeling an
    /// edge that brings a successor to in-degree zero appends that successor
    /// to the queue tail. Ties are therefore broken by insertion order first,
    /// discovery order second. Runs in O(nodes + edges).
    ///
    /// For an acyclic graph the result is a permutation of all nodes. A graph
    /// holding a cycle would produce a strictly shorter sequence, which is
    /// how `add_edge` detects and rejects cycle-closing edges.
    pub fn topological_order(&self) -> Vec<N> {
        let mut in_degrees = self.in_degrees();
        let mut to_visit: VecDeque<N> = self
            .nodes
            .keys()
            .copied()
            .filter(|node| in_degrees[node] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(node) = to_visit.pop_front() {
            if let Some(successors) = self.nodes.get(&node) {
                for &succ in successors {
                    if let Some(count) = in_degrees.get_mut(&succ) {
                        *count -= 1;
                        if *count == 0 {
                            to_visit.push_back(succ);
                        }
                    }
                }
            }
            order.push(node);
        }
        order
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: N) -> bool {
        self.nodes.contains_key(&node)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes.keys().copied()
    }

    /// Successors of `node` in the order their edges were added. Empty for
    /// unknown nodes.
    pub fn successors(&self, node: N) -> &[N] {
        self.nodes.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<N> Default for DependencyGraph<N>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
