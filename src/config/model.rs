// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level pipeline definition as read from a TOML file, prior to
/// validation:
///
/// ```toml
/// [pipeline]
/// shell = "bash"
///
/// [task.fetch]
/// cmd = "curl -s https://example.org/data.csv"
///
/// [task.count]
/// cmd = "wc -l"
/// after = "fetch"
/// ```
///
/// Use [`ConfigFile::try_from`] (or `config::loader::load_and_validate`) to
/// obtain the validated form.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour from `[pipeline]`.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineSection {
    /// Shell used to run task commands (`<shell> -c <cmd>`).
    ///
    /// If `None`, a platform default is used: `sh` on Unix, `cmd` on
    /// Windows.
    #[serde(default)]
    pub shell: Option<String>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// The command to execute.
    pub cmd: String,

    /// Name of the single task this one depends on. The dependency's stdout
    /// is fed to this command's stdin.
    #[serde(default)]
    pub after: Option<String>,
}

/// Validated configuration. Invariants held after construction:
///
/// - every `after` names an existing task,
/// - no task depends on itself,
/// - the dependency relation is acyclic.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub pipeline: PipelineSection,
    pub task: BTreeMap<String, TaskConfig>,
}

impl ConfigFile {
    /// Construct without validation. Only `config::validate` should call
    /// this, after the checks have passed.
    pub(crate) fn new_unchecked(
        pipeline: PipelineSection,
        task: BTreeMap<String, TaskConfig>,
    ) -> Self {
        Self { pipeline, task }
    }
}
