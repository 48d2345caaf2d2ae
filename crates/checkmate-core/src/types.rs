//! Core types for check outcomes and predicate results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status token printed for a finished check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The predicate held.
    Pass,
    /// The predicate did not hold and the check was marked as failed.
    Fail,
    /// The predicate did not hold and the check was marked as a warning.
    Warn,
    /// The check was not evaluated because an earlier check did not pass.
    Skip,
    /// The predicate itself returned an error.
    Error,
}

impl Status {
    /// Returns the upper-case token used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Warn => "WARN",
            Self::Skip => "SKIP",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of a single named check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Check passed.
    Pass,
    /// Check failed, optionally with a reason.
    Fail(Option<String>),
    /// Check produced a warning, optionally with a reason.
    Warn(Option<String>),
    /// Check was skipped.
    Skip,
    /// Evaluating the check raised an error.
    Error(String),
}

impl Outcome {
    /// Returns the status token for this outcome.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Pass => Status::Pass,
            Self::Fail(_) => Status::Fail,
            Self::Warn(_) => Status::Warn,
            Self::Skip => Status::Skip,
            Self::Error(_) => Status::Error,
        }
    }

    /// Returns the attached reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Fail(reason) | Self::Warn(reason) => reason.as_deref(),
            Self::Error(reason) => Some(reason),
            Self::Pass | Self::Skip => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}  {reason}", self.status()),
            None => write!(f, "{}", self.status()),
        }
    }
}

/// How a check reports a predicate that did not hold.
///
/// Both policies stop the chain: later checks are reported as skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhenFalse {
    /// Report the check as `FAIL`.
    #[default]
    Fail,
    /// Report the check as `WARN`.
    Warn,
}

/// Value a predicate may return.
///
/// `Ok(true)` passes, `Ok(false)` is reported according to [`WhenFalse`],
/// and `Err(reason)` is reported as `ERROR  reason`.
pub trait Verdict {
    /// Collapses the predicate's return value into a verdict.
    ///
    /// # Errors
    ///
    /// Returns the text to print after `ERROR` when the predicate failed
    /// to produce an answer.
    fn verdict(self) -> Result<bool, String>;
}

impl Verdict for bool {
    fn verdict(self) -> Result<bool, String> {
        Ok(self)
    }
}

/// `None` means the predicate had no answer, which counts as false.
impl Verdict for Option<bool> {
    fn verdict(self) -> Result<bool, String> {
        Ok(self.unwrap_or(false))
    }
}

impl<E: fmt::Display> Verdict for Result<bool, E> {
    fn verdict(self) -> Result<bool, String> {
        self.map_err(|e| describe_error(&e))
    }
}

impl<E: fmt::Display> Verdict for Result<(), E> {
    fn verdict(self) -> Result<bool, String> {
        self.map(|()| true).map_err(|e| describe_error(&e))
    }
}

/// Formats an error as `"<TypeName>: <message>"`.
///
/// The type name is the last path segment of the error type, without
/// generic arguments (`std::io::Error` renders as `Error`). `Box`, `Arc`
/// and `Rc` are looked through, so a `Box<dyn Error + Send + Sync>`
/// renders as `Error` and a `Box<ParseIntError>` as `ParseIntError`.
#[must_use]
pub fn describe_error<E: fmt::Display + ?Sized>(err: &E) -> String {
    format!("{}: {err}", short_type_name(std::any::type_name::<E>()))
}

/// Smart pointers named by their pointee instead.
const CONTAINERS: &[&str] = &["Box", "Arc", "Rc"];

fn short_type_name(full: &str) -> &str {
    let full = full.trim().trim_start_matches("dyn ");
    let (base, args) = match full.split_once('<') {
        Some((base, rest)) => (base, rest.strip_suffix('>')),
        None => (full, None),
    };
    let name = base.rsplit("::").next().unwrap_or(base);

    match args {
        Some(inner) if CONTAINERS.contains(&name) => {
            // `dyn Error + Send + Sync`: the principal trait comes first.
            short_type_name(inner.split(" + ").next().unwrap_or(inner))
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NullPointer;

    impl fmt::Display for NullPointer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("null")
        }
    }

    #[test]
    fn outcome_display_includes_reason_after_two_spaces() {
        assert_eq!(Outcome::Pass.to_string(), "PASS");
        assert_eq!(Outcome::Fail(None).to_string(), "FAIL");
        assert_eq!(
            Outcome::Warn(Some("disk almost full".into())).to_string(),
            "WARN  disk almost full"
        );
        assert_eq!(Outcome::Error("boom".into()).to_string(), "ERROR  boom");
    }

    #[test]
    fn describe_error_uses_short_type_name() {
        assert_eq!(describe_error(&NullPointer), "NullPointer: null");
    }

    #[test]
    fn describe_error_strips_module_path() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert_eq!(describe_error(&err), "Error: no such file");
    }

    #[test]
    fn describe_error_looks_through_boxes() {
        let parse = || "x1".parse::<u8>().unwrap_err();

        let boxed: Box<dyn std::error::Error> = parse().into();
        assert_eq!(describe_error(&boxed), "Error: invalid digit found in string");

        let shared: Box<dyn std::error::Error + Send + Sync> = parse().into();
        assert_eq!(describe_error(&shared), "Error: invalid digit found in string");

        let concrete = std::sync::Arc::new(Box::new(parse()));
        assert_eq!(
            describe_error(&concrete),
            "ParseIntError: invalid digit found in string"
        );
    }

    #[test]
    fn boxed_error_verdict() {
        let err: Result<bool, Box<dyn std::error::Error>> =
            "x1".parse::<u8>().map(|_| true).map_err(Into::into);
        assert_eq!(
            err.verdict(),
            Err("Error: invalid digit found in string".to_string())
        );
    }

    #[test]
    fn absent_answer_counts_as_false() {
        assert_eq!(None::<bool>.verdict(), Ok(false));
        assert_eq!(Some(true).verdict(), Ok(true));
    }

    #[test]
    fn result_verdicts() {
        let ok: Result<(), NullPointer> = Ok(());
        assert_eq!(ok.verdict(), Ok(true));

        let err: Result<bool, NullPointer> = Err(NullPointer);
        assert_eq!(err.verdict(), Err("NullPointer: null".to_string()));
    }

    #[test]
    fn when_false_defaults_to_fail() {
        assert_eq!(WhenFalse::default(), WhenFalse::Fail);
    }
}
