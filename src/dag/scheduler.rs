// src/dag/scheduler.rs

//! Task registration and ordered execution on top of [`DependencyGraph`].
//!
//! The scheduler owns the graph and a registry of task closures. `run()`
//! executes every registered task exactly once, strictly sequentially, in
//! the graph's topological order, feeding each task the result of its
//! declared predecessor.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::dag::graph::DependencyGraph;
use crate::errors::{BoxError, Result, RundagError};

/// Opaque handle identifying one registered task.
///
/// Every [`Scheduler::register`] call mints a fresh id, so two registrations
/// never compare equal even when they wrap the same closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// A unit of work. Receives the predecessor's result, or `None` for an
/// entry task, and produces this task's result.
pub type TaskFn<T> = Box<dyn FnMut(Option<&T>) -> std::result::Result<T, BoxError>>;

struct TaskEntry<T> {
    name: String,
    run: TaskFn<T>,
    depends_on: Option<TaskId>,
}

/// Single-threaded task scheduler.
///
/// Each task declares at most one predecessor, at registration time. Because
/// ids are minted per registration, a task can never acquire a second
/// incoming edge through this API; multi-predecessor shapes are only
/// constructible on a standalone [`DependencyGraph`].
pub struct Scheduler<T> {
    graph: DependencyGraph<TaskId>,
    tasks: HashMap<TaskId, TaskEntry<T>>,
    next_id: u64,
}

impl<T: 'static> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            graph: DependencyGraph::new(),
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a task, optionally depending on a previously registered one.
    ///
    /// `name` labels the task in errors and log events; identity is the
    /// returned [`TaskId`]. Fails with [`RundagError::UnknownDependency`] if
    /// `depends_on` was not issued by this scheduler.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        task: TaskFn<T>,
        depends_on: Option<TaskId>,
    ) -> Result<TaskId> {
        if let Some(dep) = depends_on {
            if !self.tasks.contains_key(&dep) {
                return Err(RundagError::UnknownDependency(dep));
            }
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;

        self.graph.add_node(id);
        if let Some(dep) = depends_on {
            self.graph.add_edge(dep, id)?;
        }

        let name = name.into();
        debug!(task = %name, ?id, ?depends_on, "registered task");
        self.tasks.insert(
            id,
            TaskEntry {
                name,
                run: task,
                depends_on,
            },
        );
        Ok(id)
    }

    /// Execute all registered tasks in topological order.
    ///
    /// Entry tasks are invoked with `None`; dependent tasks with a reference
    /// to their predecessor's result. The first task failure aborts the run:
    /// no later task executes and the partial results are dropped. On
    /// success, returns the results of every task, keyed by id, in execution
    /// order. The mapping is rebuilt from scratch on every call.
    pub fn run(&mut self) -> Result<IndexMap<TaskId, T>> {
        let order = self.graph.topological_order();
        debug!(tasks = order.len(), "starting run");

        let mut results: IndexMap<TaskId, T> = IndexMap::with_capacity(order.len());
        for id in order {
            let Some(entry) = self.tasks.get_mut(&id) else {
                continue;
            };
            let input = entry.depends_on.and_then(|dep| results.get(&dep));
            let output = (entry.run)(input).map_err(|source| RundagError::Task {
                name: entry.name.clone(),
                source,
            })?;
            debug!(task = %entry.name, "task completed");
            results.insert(id, output);
        }

        debug!(tasks = results.len(), "run finished");
        Ok(results)
    }

    /// The order `run()` would execute tasks in, without executing anything.
    pub fn execution_order(&self) -> Vec<TaskId> {
        self.graph.topological_order()
    }

    /// Diagnostic name the task was registered under.
    pub fn name_of(&self, id: TaskId) -> Option<&str> {
        self.tasks.get(&id).map(|entry| entry.name.as_str())
    }

    /// The underlying dependency graph.
    pub fn graph(&self) -> &DependencyGraph<TaskId> {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T: 'static> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
