//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_PLAN: &str = r#"# checkmate check plan
#
# Each [[subject]] is a path taken from an environment variable (env)
# or given literally (path). Its probes run in order; the first one that
# does not hold skips the rest.
#
# Probes: defined, exists, is-dir, is-file, readable, non-empty

# Column at which PASS/FAIL/WARN/SKIP/ERROR are aligned
width = 50

# Where the report goes: "stdout", "stderr" or "none"
output = "stdout"

[[subject]]
name = "HOME"
env = "HOME"
expect = ["exists", "is-dir", "readable"]

# [[subject]]
# name = "JAVA_HOME"
# env = "JAVA_HOME"
# expect = ["exists", "is-dir"]
# on-false = "warn"            # report WARN instead of FAIL
#
#   # Tried in order while the subject does not pass
#   [[subject.fallback]]
#   name = "default java"
#   path = "/usr/lib/jvm/default"
#
#   # Checked below whichever path passed
#   [[subject.child]]
#   name = "bin/java"
#   expect = ["is-file"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let plan_path = Path::new("checkmate.toml");

    if plan_path.exists() && !force {
        bail!(
            "Check plan already exists at {}. Use --force to overwrite.",
            plan_path.display()
        );
    }

    std::fs::write(plan_path, DEFAULT_PLAN)?;

    println!("Created checkmate.toml");
    println!("\nNext steps:");
    println!("  1. Edit checkmate.toml to describe your subjects");
    println!("  2. Run: checkmate run");

    Ok(())
}
