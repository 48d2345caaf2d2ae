//! Report summary formatting.

use anyhow::Result;
use checkmate_core::{CheckRecord, Summary};
use serde::Serialize;

use crate::OutputFormat;

/// JSON document printed with `--format json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    passed: bool,
    summary: Summary,
    checks: &'a [CheckRecord],
}

/// Prints the end-of-run summary in the specified format.
pub fn print(records: &[CheckRecord], passed: bool, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(records, passed),
        OutputFormat::Json => return print_json(records, passed),
    }
    Ok(())
}

fn print_text(records: &[CheckRecord], passed: bool) {
    let summary = Summary::from_records(records);
    let color = if passed {
        "\x1b[32m"
    } else if summary.failed + summary.errored > 0 {
        "\x1b[31m"
    } else {
        "\x1b[33m"
    };

    println!();
    println!("{color}{summary}\x1b[0m");
}

fn print_json(records: &[CheckRecord], passed: bool) -> Result<()> {
    let json = render_json(records, passed)?;
    println!("{json}");
    Ok(())
}

fn render_json(records: &[CheckRecord], passed: bool) -> Result<String> {
    let report = JsonReport {
        passed,
        summary: Summary::from_records(records),
        checks: records,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
