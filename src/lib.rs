// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod table;

use std::fs::File;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::pipeline::Pipeline;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - pipeline construction
/// - a single run
/// - (optional) CSV serialization of the results
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let mut pipeline = Pipeline::from_config(&cfg)?;

    if args.dry_run {
        print_dry_run(&cfg, &pipeline);
        return Ok(());
    }

    let results = pipeline.run()?;
    info!(tasks = results.len(), "pipeline run finished");

    if let Some(path) = args.results.as_deref() {
        write_results_csv(path, &results)?;
        info!(path = %path, "results written");
    }

    Ok(())
}

/// Serialize the results mapping as CSV (`task,output`) to `path`.
fn write_results_csv(path: &str, results: &IndexMap<String, String>) -> Result<()> {
    let header = ["task".to_string(), "output".to_string()];
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|(name, output)| vec![name.clone(), output.trim_end().to_string()])
        .collect();

    let file = File::create(path)?;
    table::build_table(&rows, Some(&header), file)?;
    Ok(())
}

/// Simple dry-run output: print tasks, deps and the planned order.
fn print_dry_run(cfg: &ConfigFile, pipeline: &Pipeline) {
    println!("rundag dry-run");
    if let Some(ref shell) = cfg.pipeline.shell {
        println!("  pipeline.shell = {shell}");
    }
    println!();

    println!("tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        println!("  - {name}");
        println!("      cmd: {}", task.cmd);
        if let Some(ref after) = task.after {
            println!("      after: {after}");
        }
    }

    println!();
    println!("execution order: {}", pipeline.execution_order().join(" -> "));

    debug!("dry-run complete (no execution)");
}
