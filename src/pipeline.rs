// src/pipeline.rs

//! Shell-command pipelines built from a validated config.
//!
//! Each config task becomes one scheduler task that runs `shell -c cmd`
//! synchronously. A task's stdout is its result; a dependent task receives
//! its predecessor's stdout on stdin.

use std::collections::HashMap;
use std::io::Write;
use std::process::{Command, Stdio};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::model::ConfigFile;
use crate::dag::graph::DependencyGraph;
use crate::dag::scheduler::{Scheduler, TaskFn, TaskId};
use crate::errors::{BoxError, Result, RundagError};

/// A runnable pipeline of shell commands.
pub struct Pipeline {
    scheduler: Scheduler<String>,
}

impl Pipeline {
    /// Build a pipeline from a validated [`ConfigFile`].
    ///
    /// Tasks are registered dependency-first (topological order over the
    /// task names), so every `after` target holds a [`TaskId`] by the time
    /// its dependents are registered.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut names: DependencyGraph<&str> = DependencyGraph::new();
        for name in cfg.task.keys() {
            names.add_node(name.as_str());
        }
        for (name, task) in cfg.task.iter() {
            if let Some(dep) = task.after.as_deref() {
                names
                    .add_edge(dep, name.as_str())
                    .map_err(|err| RundagError::DagCycle(err.to_string()))?;
            }
        }

        let shell = cfg.pipeline.shell.clone();
        let mut scheduler = Scheduler::new();
        let mut ids: HashMap<&str, TaskId> = HashMap::new();

        for name in names.topological_order() {
            let Some(task) = cfg.task.get(name) else {
                continue;
            };
            let depends_on = task
                .after
                .as_deref()
                .and_then(|dep| ids.get(dep).copied());
            let id = scheduler.register(name, shell_task(shell.clone(), name, &task.cmd), depends_on)?;
            ids.insert(name, id);
        }

        Ok(Self { scheduler })
    }

    /// Run every task once, strictly sequentially. Returns the stdout of
    /// each task keyed by task name, in execution order. The first failing
    /// command aborts the run.
    pub fn run(&mut self) -> Result<IndexMap<String, String>> {
        let results = self.scheduler.run()?;
        Ok(results
            .into_iter()
            .map(|(id, output)| {
                let name = self.scheduler.name_of(id).unwrap_or_default().to_string();
                (name, output)
            })
            .collect())
    }

    /// Task names in the order `run()` would execute them.
    pub fn execution_order(&self) -> Vec<String> {
        self.scheduler
            .execution_order()
            .into_iter()
            .filter_map(|id| self.scheduler.name_of(id).map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduler.is_empty()
    }
}

/// Build the task closure for one config task.
fn shell_task(shell: Option<String>, name: &str, cmd: &str) -> TaskFn<String> {
    let name = name.to_string();
    let cmd = cmd.to_string();

    Box::new(move |input: Option<&String>| -> std::result::Result<String, BoxError> {
        info!(task = %name, cmd = %cmd, "starting task process");

        // Build a shell command appropriate for the platform.
        let mut command = match shell.as_deref() {
            Some(shell) => {
                let mut c = Command::new(shell);
                c.arg("-c").arg(&cmd);
                c
            }
            None if cfg!(windows) => {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(&cmd);
                c
            }
            None => {
                let mut c = Command::new("sh");
                c.arg("-c").arg(&cmd);
                c
            }
        };

        command
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let mut child = command
            .spawn()
            .map_err(|err| format!("spawning process for task '{name}': {err}"))?;

        if let Some(input) = input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(input.as_bytes())?;
            }
            // stdin is dropped here, closing the pipe.
        }

        let output = child
            .wait_with_output()
            .map_err(|err| format!("waiting for process of task '{name}': {err}"))?;

        let code = output.status.code().unwrap_or(-1);
        debug!(task = %name, exit_code = code, "task process exited");

        if !output.status.success() {
            return Err(format!("command exited with status {code}").into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    })
}
