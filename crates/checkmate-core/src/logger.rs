//! Logger capability: turns a check name into a one-shot result handle.

use crate::types::Outcome;
use std::sync::Arc;

/// Receiver for the outcome of a single check.
///
/// Implemented by logger back ends. Callers interact with [`CheckHandle`]
/// instead, which guarantees the outcome is delivered at most once.
pub trait Record {
    /// Delivers the outcome of the check this record was created for.
    fn record(self: Box<Self>, outcome: &Outcome);
}

struct FnRecord<F>(F);

impl<F: FnOnce(&Outcome)> Record for FnRecord<F> {
    fn record(self: Box<Self>, outcome: &Outcome) {
        (self.0)(outcome);
    }
}

struct Discard;

impl Record for Discard {
    fn record(self: Box<Self>, _outcome: &Outcome) {}
}

/// One-shot result sink for a single named check.
///
/// Every terminal method consumes the handle, so exactly one outcome can
/// be reported per check.
#[must_use = "a check handle must be finished with pass, fail, warn, skip or error"]
pub struct CheckHandle<'a> {
    sink: Box<dyn Record + 'a>,
}

impl<'a> CheckHandle<'a> {
    /// Wraps a [`Record`] implementation.
    pub fn new(record: impl Record + 'a) -> Self {
        Self {
            sink: Box::new(record),
        }
    }

    /// Creates a handle that calls `f` with the outcome.
    pub fn from_fn(f: impl FnOnce(&Outcome) + 'a) -> Self {
        Self::new(FnRecord(f))
    }

    /// Creates a handle that drops the outcome.
    pub fn discard() -> Self {
        Self::new(Discard)
    }

    /// Reports an arbitrary outcome.
    pub fn report(self, outcome: &Outcome) {
        self.sink.record(outcome);
    }

    /// Marks the check as passed.
    pub fn pass(self) {
        self.report(&Outcome::Pass);
    }

    /// Marks the check as failed.
    pub fn fail(self) {
        self.report(&Outcome::Fail(None));
    }

    /// Marks the check as failed with a reason.
    pub fn fail_with(self, reason: impl Into<String>) {
        self.report(&Outcome::Fail(Some(reason.into())));
    }

    /// Marks the check as a warning.
    pub fn warn(self) {
        self.report(&Outcome::Warn(None));
    }

    /// Marks the check as a warning with a reason.
    pub fn warn_with(self, reason: impl Into<String>) {
        self.report(&Outcome::Warn(Some(reason.into())));
    }

    /// Marks the check as skipped.
    pub fn skip(self) {
        self.report(&Outcome::Skip);
    }

    /// Marks the check as errored.
    pub fn error(self, reason: impl Into<String>) {
        self.report(&Outcome::Error(reason.into()));
    }
}

/// Capability that produces a [`CheckHandle`] for each named check.
///
/// Implementations must not panic or return errors: output failures are
/// the implementation's own concern.
///
/// # Example
///
/// ```
/// use checkmate_core::{CheckHandle, CheckLogger, Outcome};
///
/// struct Stderr;
///
/// impl CheckLogger for Stderr {
///     fn log(&self, name: &str) -> CheckHandle<'_> {
///         let name = name.to_string();
///         CheckHandle::from_fn(move |outcome: &Outcome| eprintln!("{name}: {outcome}"))
///     }
/// }
/// ```
pub trait CheckLogger: Send + Sync {
    /// Starts a check called `name`.
    fn log(&self, name: &str) -> CheckHandle<'_>;
}

impl<L: CheckLogger + ?Sized> CheckLogger for Arc<L> {
    fn log(&self, name: &str) -> CheckHandle<'_> {
        (**self).log(name)
    }
}

/// Type alias for shared logger trait objects.
pub type LoggerRef = Arc<dyn CheckLogger>;

/// Logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl CheckLogger for NoopLogger {
    fn log(&self, _name: &str) -> CheckHandle<'_> {
        CheckHandle::discard()
    }
}

/// Fan-out logger forwarding every check to an ordered list of loggers.
///
/// `log` starts the check on every logger immediately, in registration
/// order; the returned handle forwards its outcome in the same order.
#[derive(Default)]
pub struct LoggerList {
    loggers: Vec<LoggerRef>,
}

impl LoggerList {
    /// Creates a fan-out over `loggers`.
    #[must_use]
    pub fn new(loggers: Vec<LoggerRef>) -> Self {
        Self { loggers }
    }

    /// Returns the number of wrapped loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Returns true if no loggers are wrapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl CheckLogger for LoggerList {
    fn log(&self, name: &str) -> CheckHandle<'_> {
        let handles: Vec<CheckHandle<'_>> = self.loggers.iter().map(|l| l.log(name)).collect();

        CheckHandle::from_fn(move |outcome: &Outcome| {
            for handle in handles {
                handle.report(outcome);
            }
        })
    }
}
