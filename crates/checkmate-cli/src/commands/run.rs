//! Run command implementation.

use anyhow::{bail, Context, Result};
use checkmate_core::declarative::Plan;
use checkmate_core::{Checks, ChecksConfig, RecordingLogger};

use crate::config_resolver::PlanSource;
use crate::OutputFormat;

/// Runs the run command.
pub fn run(source: &PlanSource, format: OutputFormat, width: Option<usize>) -> Result<()> {
    let Some(path) = source.path() else {
        bail!("No check plan found. Run `checkmate init` to create one.");
    };
    if source.is_global() {
        tracing::info!("Using global plan: {}", path.display());
    }

    let mut plan = Plan::from_file(path)
        .with_context(|| format!("Failed to load plan: {}", path.display()))?;
    if let Some(base) = source.base_dir() {
        plan = plan.with_base_dir(base);
    }

    let report = ChecksConfig {
        width: width.unwrap_or(plan.report.width),
        output: plan.report.output,
    };

    let recorder = RecordingLogger::new();
    let mut builder = Checks::builder().logger(recorder.clone());
    // JSON owns stdout; the aligned lines would corrupt it.
    if matches!(format, OutputFormat::Text) {
        builder = builder.config(&report);
    }
    let checks = builder.build();

    tracing::debug!("Running {} subject(s) from {}", plan.subjects.len(), path.display());

    let passed = plan.run(&checks);

    super::output::print(&recorder.records(), passed, format)?;

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}
