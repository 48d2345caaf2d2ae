//! Context-free check chains and their builder.

use crate::config::{ChecksConfig, Output};
use crate::error::ChecksFailed;
use crate::logger::{CheckHandle, CheckLogger, LoggerList, LoggerRef, NoopLogger};
use crate::object::ObjectChecks;
use crate::print::PrintLogger;
use crate::types::{Verdict, WhenFalse};

use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

/// Builder for configuring a [`Checks`] chain.
#[derive(Default)]
pub struct ChecksBuilder {
    loggers: Vec<LoggerRef>,
}

impl ChecksBuilder {
    /// Creates a builder with no loggers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a logger. Loggers receive checks in the order they were added.
    #[must_use]
    pub fn logger<L: CheckLogger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Arc::new(logger));
        self
    }

    /// Adds an already shared logger.
    #[must_use]
    pub fn logger_arc(mut self, logger: LoggerRef) -> Self {
        self.loggers.push(logger);
        self
    }

    /// Adds a [`PrintLogger`] writing to `out`.
    #[must_use]
    pub fn print(self, out: impl Write + Send + 'static, width: usize) -> Self {
        self.logger(PrintLogger::new(out, width))
    }

    /// Adds a [`PrintLogger`] writing to standard output.
    #[must_use]
    pub fn stdout(self, width: usize) -> Self {
        self.logger(PrintLogger::stdout(width))
    }

    /// Adds a [`PrintLogger`] writing to standard error.
    #[must_use]
    pub fn stderr(self, width: usize) -> Self {
        self.logger(PrintLogger::stderr(width))
    }

    /// Adds the printer described by `config`, if any.
    #[must_use]
    pub fn config(self, config: &ChecksConfig) -> Self {
        match config.output {
            Output::Stdout => self.stdout(config.width),
            Output::Stderr => self.stderr(config.width),
            Output::None => self,
        }
    }

    /// Returns the number of registered loggers.
    #[must_use]
    pub fn logger_count(&self) -> usize {
        self.loggers.len()
    }

    /// Builds the chain.
    ///
    /// With no loggers the chain reports nowhere; a single logger is used
    /// directly; several are combined in a [`LoggerList`].
    #[must_use]
    pub fn build(self) -> Checks {
        let mut loggers = self.loggers;
        let logger: LoggerRef = match loggers.len() {
            0 => Arc::new(NoopLogger),
            1 => loggers.remove(0),
            _ => Arc::new(LoggerList::new(loggers)),
        };
        Checks::new(logger)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainState {
    Active,
    Skipping,
}

/// A chain of context-free checks.
///
/// The chain stays active while checks pass. The first check that fails,
/// warns or errors switches it to skipping: every later check is reported
/// as `SKIP` and its predicate is never called.
///
/// Chaining methods take `&self` and return a new chain, so a base chain
/// can start several independent sequences.
///
/// # Example
///
/// ```
/// use checkmate_core::{Checks, SharedBuffer};
///
/// let out = SharedBuffer::new();
/// let checks = Checks::builder().print(out.clone(), 30).build();
///
/// let ok = checks
///     .check("config is present", || true)
///     .check("config is valid", || false)
///     .check("config is applied", || -> bool { unreachable!() })
///     .result();
///
/// assert!(!ok);
/// assert_eq!(
///     out.contents(),
///     "config is present. . . . . . PASS\n\
///      config is valid. . . . . . . FAIL\n\
///      config is applied. . . . . . SKIP\n"
/// );
/// ```
#[derive(Clone)]
pub struct Checks {
    logger: LoggerRef,
    state: ChainState,
}

impl Checks {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ChecksBuilder {
        ChecksBuilder::new()
    }

    /// Creates an active chain reporting to `logger`.
    #[must_use]
    pub fn new(logger: LoggerRef) -> Self {
        Self {
            logger,
            state: ChainState::Active,
        }
    }

    fn with_state(&self, state: ChainState) -> Self {
        Self {
            logger: Arc::clone(&self.logger),
            state,
        }
    }

    /// Starts a check whose outcome the caller reports by hand.
    ///
    /// Works in either state; a skipping chain can use it to record an
    /// explicit `SKIP` line.
    pub fn begin(&self, name: &str) -> CheckHandle<'_> {
        self.logger.log(name)
    }

    /// Runs a check reported as `FAIL` when the predicate does not hold.
    #[must_use]
    pub fn check<V: Verdict>(&self, name: &str, predicate: impl FnOnce() -> V) -> Self {
        self.check_with(name, predicate, WhenFalse::Fail)
    }

    /// Runs a check reported according to `when_false` when the predicate
    /// does not hold.
    ///
    /// On a skipping chain the check is reported as `SKIP` regardless of
    /// `when_false`.
    #[must_use]
    pub fn check_with<V: Verdict>(
        &self,
        name: &str,
        predicate: impl FnOnce() -> V,
        when_false: WhenFalse,
    ) -> Self {
        match self.state {
            ChainState::Skipping => {
                self.begin(name).skip();
                self.with_state(ChainState::Skipping)
            }
            ChainState::Active => {
                if evaluate(self.begin(name), predicate, when_false) {
                    self.with_state(ChainState::Active)
                } else {
                    debug!("Check `{}` did not pass, skipping the rest of the chain", name);
                    self.with_state(ChainState::Skipping)
                }
            }
        }
    }

    /// Returns the chain unchanged if every check passed, otherwise the
    /// error produced by `err`.
    ///
    /// # Errors
    ///
    /// Returns `err()` if the chain is skipping.
    pub fn or_throw<E>(self, err: impl FnOnce() -> E) -> Result<Self, E> {
        match self.state {
            ChainState::Active => Ok(self),
            ChainState::Skipping => Err(err()),
        }
    }

    /// Like [`or_throw`](Self::or_throw) with [`ChecksFailed::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ChecksFailed`] if the chain is skipping.
    pub fn or_fail(self) -> Result<Self, ChecksFailed> {
        self.or_throw(ChecksFailed::default)
    }

    /// Starts checks on `value`, labelled `description` in the report.
    #[must_use]
    pub fn object<T>(&self, description: &str, value: T) -> ObjectChecks<T> {
        match self.state {
            ChainState::Active => ObjectChecks::active(Arc::clone(&self.logger), value, description),
            ChainState::Skipping => ObjectChecks::ignoring(Arc::clone(&self.logger)),
        }
    }

    /// Starts checks on the value produced by `supplier`.
    ///
    /// On a skipping chain `supplier` is never called, so it may rely on
    /// the preconditions checked earlier in the chain.
    #[must_use]
    pub fn object_with<T>(&self, description: &str, supplier: impl FnOnce() -> T) -> ObjectChecks<T> {
        match self.state {
            ChainState::Active => {
                ObjectChecks::active(Arc::clone(&self.logger), supplier(), description)
            }
            ChainState::Skipping => {
                debug!("Not creating `{}`: chain is skipping", description);
                ObjectChecks::ignoring(Arc::clone(&self.logger))
            }
        }
    }

    /// Returns true if every check so far passed.
    #[must_use]
    pub fn result(&self) -> bool {
        self.state == ChainState::Active
    }
}

/// Evaluates `predicate`, reports the outcome on `handle` and returns
/// whether the check passed.
///
/// A panicking predicate is reported as `ERROR  panic: <message>`.
pub(crate) fn evaluate<V: Verdict>(
    handle: CheckHandle<'_>,
    predicate: impl FnOnce() -> V,
    when_false: WhenFalse,
) -> bool {
    let verdict = match panic::catch_unwind(AssertUnwindSafe(predicate)) {
        Ok(value) => value.verdict(),
        Err(payload) => Err(format!("panic: {}", panic_message(payload.as_ref()))),
    };

    match verdict {
        Ok(true) => {
            handle.pass();
            true
        }
        Ok(false) => {
            match when_false {
                WhenFalse::Fail => handle.fail(),
                WhenFalse::Warn => handle.warn(),
            }
            false
        }
        Err(reason) => {
            handle.error(reason);
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown payload"
    }
}
