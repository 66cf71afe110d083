// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::dag::graph::DependencyGraph;
use crate::errors::{Result, RundagError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RundagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.pipeline, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_task_references(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn validate_task_references(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if let Some(dep) = task.after.as_deref() {
            if !cfg.task.contains_key(dep) {
                return Err(RundagError::Config(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(RundagError::Config(format!(
                    "task '{}' cannot depend on itself in `after`",
                    name
                )));
            }
        }
    }
    Ok(())
}

/// Build the dependency graph over task names and let edge insertion report
/// the offending edge if the `after` relation holds a cycle.
///
/// Edge direction: dep -> task. For:
///
/// ```toml
/// [task.count]
/// after = "fetch"
/// ```
///
/// we add the edge `fetch -> count`.
fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    let mut graph: DependencyGraph<&str> = DependencyGraph::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        if let Some(dep) = task.after.as_deref() {
            graph
                .add_edge(dep, name.as_str())
                .map_err(|err| RundagError::DagCycle(err.to_string()))?;
        }
    }

    Ok(())
}
