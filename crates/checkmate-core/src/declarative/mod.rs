//! Declarative check plans driven by TOML configuration.
//!
//! A plan names subjects (paths taken from environment variables or
//! literal paths), the probes each must satisfy, fallbacks to try when a
//! subject does not pass, and children checked below it. Running a plan
//! drives the same [`Checks`](crate::Checks) chains a caller would write
//! by hand.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! Plan (pure domain model)
//!   ↓ Plan::run(&Checks)
//! report lines + bool
//! ```

use std::fs;
use std::path::{Path, PathBuf};

pub mod config_dto;
pub mod loader;
pub mod model;
mod run;

pub use loader::LoadError;
pub use model::{Child, Fallback, Label, ModelError, Plan, Probe, Source, Subject};

/// Errors from reading, parsing and validating a plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The plan file could not be read.
    #[error("Failed to read plan {path}: {source}")]
    Io {
        /// Plan file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Domain model validation failed.
    #[error("{0}")]
    Load(#[from] LoadError),
}

/// Parses TOML content into a validated plan.
///
/// An empty document yields an empty plan.
///
/// # Errors
///
/// Returns an error if TOML parsing or model validation fails.
pub fn load_plan_from_toml(content: &str) -> Result<Plan, PlanError> {
    let dto: config_dto::PlanDto = toml::from_str(content)?;
    Ok(loader::load(dto)?)
}

impl Plan {
    /// Parses a plan from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or model validation fails.
    pub fn parse(content: &str) -> Result<Self, PlanError> {
        load_plan_from_toml(content)
    }

    /// Reads and parses a plan file.
    ///
    /// Relative literal paths in the plan stay relative; see
    /// [`Plan::with_base_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid plan.
    pub fn from_file(path: &Path) -> Result<Self, PlanError> {
        let content = fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Output;
    use tempfile::TempDir;

    #[test]
    fn parses_full_plan() {
        let plan = Plan::parse(
            r#"
width = 40
output = "stderr"

[[subject]]
name = "app config"
path = "conf"
expect = ["exists", "is-dir", "non-empty"]

  [[subject.child]]
  name = "app.toml"
  expect = ["is-file", "readable"]
"#,
        )
        .unwrap();

        assert_eq!(plan.report.width, 40);
        assert_eq!(plan.report.output, Output::Stderr);
        assert_eq!(plan.subjects[0].source, Source::Path(PathBuf::from("conf")));
        assert_eq!(plan.subjects[0].children[0].name.as_str(), "app.toml");
    }

    #[test]
    fn empty_document_is_empty_plan() {
        assert!(Plan::parse("").unwrap().is_empty());
    }

    #[test]
    fn toml_syntax_error() {
        let err = Plan::parse("[[subject]\nname = ").unwrap_err();
        assert!(matches!(err, PlanError::Toml(_)));
    }

    #[test]
    fn validation_error() {
        let err = Plan::parse("[[subject]]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, PlanError::Load(LoadError::AmbiguousSource { .. })));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("checkmate.toml");

        let err = Plan::from_file(&missing).unwrap_err();
        assert!(matches!(err, PlanError::Io { .. }));
        assert!(err.to_string().contains("checkmate.toml"));
    }

    #[test]
    fn from_file_reads_plan() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("checkmate.toml");
        fs::write(&file, "[[subject]]\nname = \"tmp\"\npath = \"/tmp\"\n").unwrap();

        let plan = Plan::from_file(&file).unwrap();
        assert_eq!(plan.subjects.len(), 1);
    }
}
