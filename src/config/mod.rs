// src/config/mod.rs

//! Pipeline definition files.
//!
//! - [`model`] is the TOML data model (raw and validated forms).
//! - [`loader`] reads files from disk.
//! - [`validate`] turns a [`RawConfigFile`] into a [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, PipelineSection, RawConfigFile, TaskConfig};
