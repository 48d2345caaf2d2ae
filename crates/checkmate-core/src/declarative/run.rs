//! Runs a validated plan through check chains.

use super::model::{Child, Plan, Probe, Source, Subject};
use crate::chain::Checks;
use crate::object::ObjectChecks;
use crate::types::WhenFalse;

use std::env;
use std::path::PathBuf;
use tracing::debug;

impl Plan {
    /// Runs every subject on `checks` and returns true if all of them,
    /// and all of their children, passed.
    ///
    /// Subjects are independent: a failing subject does not skip the next.
    #[must_use]
    pub fn run(&self, checks: &Checks) -> bool {
        let mut passed = true;
        for subject in &self.subjects {
            let ok = run_subject(checks, subject);
            debug!("Subject `{}` finished, passed: {}", subject.name, ok);
            passed &= ok;
        }
        passed
    }
}

fn run_subject(checks: &Checks, subject: &Subject) -> bool {
    let mut chain = bind(checks, subject);
    chain = apply(chain, &subject.probes, subject.when_false);

    for fallback in &subject.fallbacks {
        if chain.result() {
            break;
        }
        let name = fallback.name.as_str();
        if !defined(checks, name, &fallback.source, subject.when_false) {
            debug!("Fallback `{}` is not defined", name);
            continue;
        }
        chain = chain.or_else(name, || fallback.source.resolve());
        chain = apply(chain, &subject.probes, subject.when_false);
    }

    let mut passed = chain.result();
    for child in &subject.children {
        passed &= run_child(chain.clone(), child);
    }
    passed
}

fn bind(checks: &Checks, subject: &Subject) -> ObjectChecks<PathBuf> {
    let name = subject.name.as_str();
    match &subject.source {
        Source::Env(var) => definition_check(checks, name, var, subject.when_false)
            .object_with(name, || subject.source.resolve()),
        Source::Path(path) => checks.object(name, path.clone()),
    }
}

/// Runs `<name> is defined` for env sources; literal paths need no check.
fn defined(checks: &Checks, name: &str, source: &Source, when_false: WhenFalse) -> bool {
    match source {
        Source::Env(var) => definition_check(checks, name, var, when_false).result(),
        Source::Path(_) => true,
    }
}

fn definition_check(checks: &Checks, name: &str, var: &str, when_false: WhenFalse) -> Checks {
    checks.check_with(
        &format!("{name} is defined"),
        || env::var_os(var).is_some(),
        when_false,
    )
}

fn run_child(parent: ObjectChecks<PathBuf>, child: &Child) -> bool {
    let rel = child.name.as_str();
    let chain = parent.map(rel, |path| path.join(rel));
    apply(chain, &child.probes, child.when_false).result()
}

fn apply(
    chain: ObjectChecks<PathBuf>,
    probes: &[Probe],
    when_false: WhenFalse,
) -> ObjectChecks<PathBuf> {
    probes.iter().fold(chain, |chain, &probe| {
        chain.check_with(probe.label(), |path| probe.test(path), when_false)
    })
}

#[cfg(test)]
mod tests {
    use crate::chain::Checks;
    use crate::declarative::Plan;
    use crate::print::SharedBuffer;
    use crate::recording::RecordingLogger;
    use crate::types::Status;
    use std::fs;
    use tempfile::TempDir;

    fn recorded(plan: &Plan) -> (bool, Vec<(String, Status)>) {
        let recorder = RecordingLogger::new();
        let checks = Checks::builder().logger(recorder.clone()).build();
        let ok = plan.run(&checks);
        let lines = recorder
            .records()
            .into_iter()
            .map(|r| (r.name, r.status))
            .collect();
        (ok, lines)
    }

    fn plan(toml: &str, base: &std::path::Path) -> Plan {
        Plan::parse(toml).unwrap().with_base_dir(base)
    }

    #[test]
    fn passing_subject_with_child() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("bin")).unwrap();
        fs::write(tmp.path().join("bin/java"), "#!/bin/sh").unwrap();

        let plan = plan(
            r#"
[[subject]]
name = "java"
path = "."
expect = ["exists", "is-dir"]

  [[subject.child]]
  name = "bin/java"
  expect = ["is-file", "non-empty"]
"#,
            tmp.path(),
        );

        let (ok, lines) = recorded(&plan);
        assert!(ok);
        assert_eq!(
            lines,
            vec![
                ("java exists".to_string(), Status::Pass),
                ("java is directory".to_string(), Status::Pass),
                ("java bin/java is file".to_string(), Status::Pass),
                ("java bin/java is not empty".to_string(), Status::Pass),
            ]
        );
    }

    #[test]
    fn failing_subject_skips_rest_and_silences_children() {
        let tmp = TempDir::new().unwrap();
        let plan = plan(
            r#"
[[subject]]
name = "data"
path = "missing"
expect = ["exists", "is-dir"]

  [[subject.child]]
  name = "index"
  expect = ["is-file"]
"#,
            tmp.path(),
        );

        let (ok, lines) = recorded(&plan);
        assert!(!ok);
        assert_eq!(
            lines,
            vec![
                ("data exists".to_string(), Status::Fail),
                ("data is directory".to_string(), Status::Skip),
            ]
        );
    }

    #[test]
    fn fallback_takes_over() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("default")).unwrap();

        let plan = plan(
            r#"
[[subject]]
name = "custom"
path = "custom"
expect = ["exists", "is-dir"]
on-false = "warn"

  [[subject.fallback]]
  name = "first"
  path = "also-missing"

  [[subject.fallback]]
  name = "default"
  path = "default"

  [[subject.fallback]]
  name = "never"
  path = "never"
"#,
            tmp.path(),
        );

        let (ok, lines) = recorded(&plan);
        assert!(ok);
        assert_eq!(
            lines,
            vec![
                ("custom exists".to_string(), Status::Warn),
                ("custom is directory".to_string(), Status::Skip),
                ("first exists".to_string(), Status::Warn),
                ("first is directory".to_string(), Status::Skip),
                ("default exists".to_string(), Status::Pass),
                ("default is directory".to_string(), Status::Pass),
            ]
        );
    }

    #[test]
    fn unset_env_subject_fails_definition_check() {
        let plan = Plan::parse(
            r#"
[[subject]]
name = "CHECKMATE_RUN_TEST_UNSET"
env = "CHECKMATE_RUN_TEST_UNSET"
expect = ["exists"]
"#,
        )
        .unwrap();

        let (ok, lines) = recorded(&plan);
        assert!(!ok);
        assert_eq!(
            lines,
            vec![("CHECKMATE_RUN_TEST_UNSET is defined".to_string(), Status::Fail)]
        );
    }

    #[test]
    fn set_env_subject_binds_its_value() {
        let tmp = TempDir::new().unwrap();
        std::env::set_var("CHECKMATE_RUN_TEST_SET", tmp.path());

        let plan = Plan::parse(
            r#"
[[subject]]
name = "CHECKMATE_RUN_TEST_SET"
env = "CHECKMATE_RUN_TEST_SET"
expect = ["is-dir"]
"#,
        )
        .unwrap();

        let (ok, lines) = recorded(&plan);
        assert!(ok);
        assert_eq!(
            lines,
            vec![
                ("CHECKMATE_RUN_TEST_SET is defined".to_string(), Status::Pass),
                ("CHECKMATE_RUN_TEST_SET is directory".to_string(), Status::Pass),
            ]
        );
    }

    #[test]
    fn unset_env_fallback_reports_definition_and_moves_on() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("default")).unwrap();

        let plan = plan(
            r#"
[[subject]]
name = "custom"
path = "custom"
expect = ["exists"]

  [[subject.fallback]]
  name = "CHECKMATE_RUN_TEST_UNSET_FALLBACK"
  env = "CHECKMATE_RUN_TEST_UNSET_FALLBACK"

  [[subject.fallback]]
  name = "default"
  path = "default"
"#,
            tmp.path(),
        );

        let (ok, lines) = recorded(&plan);
        assert!(ok);
        assert_eq!(
            lines,
            vec![
                ("custom exists".to_string(), Status::Fail),
                (
                    "CHECKMATE_RUN_TEST_UNSET_FALLBACK is defined".to_string(),
                    Status::Fail
                ),
                ("default exists".to_string(), Status::Pass),
            ]
        );
    }

    #[test]
    fn set_env_fallback_binds_its_value() {
        let tmp = TempDir::new().unwrap();
        std::env::set_var("CHECKMATE_RUN_TEST_SET_FALLBACK", tmp.path());

        let plan = plan(
            r#"
[[subject]]
name = "custom"
path = "custom"
expect = ["is-dir"]
on-false = "warn"

  [[subject.fallback]]
  name = "CHECKMATE_RUN_TEST_SET_FALLBACK"
  env = "CHECKMATE_RUN_TEST_SET_FALLBACK"
"#,
            tmp.path(),
        );

        let (ok, lines) = recorded(&plan);
        assert!(ok);
        assert_eq!(
            lines,
            vec![
                ("custom is directory".to_string(), Status::Warn),
                (
                    "CHECKMATE_RUN_TEST_SET_FALLBACK is defined".to_string(),
                    Status::Pass
                ),
                (
                    "CHECKMATE_RUN_TEST_SET_FALLBACK is directory".to_string(),
                    Status::Pass
                ),
            ]
        );
    }

    #[test]
    fn probe_io_error_is_reported() {
        let tmp = TempDir::new().unwrap();
        let plan = plan(
            "[[subject]]\nname = \"log\"\npath = \"app.log\"\nexpect = [\"readable\"]\n",
            tmp.path(),
        );

        let recorder = RecordingLogger::new();
        let checks = Checks::builder().logger(recorder.clone()).build();
        assert!(!plan.run(&checks));

        let records = recorder.records();
        assert_eq!(records[0].status, Status::Error);
        assert!(records[0].reason.as_deref().unwrap().starts_with("Error: "));
    }

    #[test]
    fn subjects_are_independent() {
        let tmp = TempDir::new().unwrap();
        let plan = plan(
            r#"
[[subject]]
name = "a"
path = "missing"
expect = ["exists"]

[[subject]]
name = "b"
path = "."
expect = ["exists"]
"#,
            tmp.path(),
        );

        let out = SharedBuffer::new();
        let checks = Checks::builder().print(out.clone(), 20).build();
        assert!(!plan.run(&checks));
        assert_eq!(
            out.contents(),
            "a exists . . . . . FAIL\n\
             b exists . . . . . PASS\n"
        );
    }
}
