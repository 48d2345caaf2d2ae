//! Check chains bound to a subject value.

use crate::chain::evaluate;
use crate::error::ChecksFailed;
use crate::logger::{CheckLogger, LoggerRef};
use crate::types::{Verdict, WhenFalse};

use tracing::debug;

#[derive(Clone)]
enum Subject<T> {
    /// Every check so far passed.
    Active { value: T, prefix: String },
    /// A check did not pass; later checks are reported as skipped.
    Skipping { prefix: String },
    /// The subject was never created; nothing is reported.
    Ignoring,
}

/// A chain of checks on a subject value.
///
/// Check names are rendered as `"<prefix> <description>"`, where the prefix
/// starts as the object's description and grows with each labelled
/// [`map`](Self::map).
///
/// After a check does not pass, later checks are reported as `SKIP`,
/// `map` transforms are never run and the chain yields nothing until
/// [`or`](Self::or) supplies a fallback subject.
///
/// # Example
///
/// ```
/// use checkmate_core::{Checks, SharedBuffer, WhenFalse};
///
/// let out = SharedBuffer::new();
/// let checks = Checks::builder().print(out.clone(), 40).build();
///
/// let color = checks
///     .object("favorite color", "")
///     .check_with("is defined", |s| !s.is_empty(), WhenFalse::Warn)
///     .or("default color", "green")
///     .check("is known", |s| ["red", "green"].contains(s))
///     .get_or_fail()
///     .unwrap();
///
/// assert_eq!(color, "green");
/// assert_eq!(
///     out.contents(),
///     "favorite color is defined. . . . . . . WARN\n\
///      default color is known . . . . . . . . PASS\n"
/// );
/// ```
#[derive(Clone)]
pub struct ObjectChecks<T> {
    logger: LoggerRef,
    state: Subject<T>,
}

impl<T> ObjectChecks<T> {
    pub(crate) fn active(logger: LoggerRef, value: T, prefix: &str) -> Self {
        Self {
            logger,
            state: Subject::Active {
                value,
                prefix: prefix.to_string(),
            },
        }
    }

    pub(crate) fn ignoring(logger: LoggerRef) -> Self {
        Self {
            logger,
            state: Subject::Ignoring,
        }
    }

    /// Runs a check on the subject, reported as `FAIL` when the predicate
    /// does not hold.
    #[must_use]
    pub fn check<V: Verdict>(self, description: &str, predicate: impl FnOnce(&T) -> V) -> Self {
        self.check_with(description, predicate, WhenFalse::Fail)
    }

    /// Runs a check on the subject, reported according to `when_false`
    /// when the predicate does not hold.
    #[must_use]
    pub fn check_with<V: Verdict>(
        self,
        description: &str,
        predicate: impl FnOnce(&T) -> V,
        when_false: WhenFalse,
    ) -> Self {
        let state = match self.state {
            Subject::Active { value, prefix } => {
                let name = join(&prefix, description);
                if evaluate(self.logger.log(&name), || predicate(&value), when_false) {
                    Subject::Active { value, prefix }
                } else {
                    debug!("Check `{}` did not pass, skipping the rest of the chain", name);
                    Subject::Skipping { prefix }
                }
            }
            Subject::Skipping { prefix } => {
                self.logger.log(&join(&prefix, description)).skip();
                Subject::Skipping { prefix }
            }
            Subject::Ignoring => Subject::Ignoring,
        };

        Self {
            logger: self.logger,
            state,
        }
    }

    /// Transforms the subject and extends the prefix with `description`.
    ///
    /// The transform only runs while every check has passed.
    #[must_use]
    pub fn map<R>(self, description: &str, f: impl FnOnce(T) -> R) -> ObjectChecks<R> {
        self.map_prefixed(|prefix| join(&prefix, description), f)
    }

    /// Transforms the subject, keeping the current prefix.
    #[must_use]
    pub fn map_value<R>(self, f: impl FnOnce(T) -> R) -> ObjectChecks<R> {
        self.map_prefixed(|prefix| prefix, f)
    }

    fn map_prefixed<R>(
        self,
        prefix_fn: impl FnOnce(String) -> String,
        f: impl FnOnce(T) -> R,
    ) -> ObjectChecks<R> {
        let state = match self.state {
            Subject::Active { value, prefix } => Subject::Active {
                value: f(value),
                prefix: prefix_fn(prefix),
            },
            Subject::Skipping { .. } | Subject::Ignoring => Subject::Ignoring,
        };

        ObjectChecks {
            logger: self.logger,
            state,
        }
    }

    /// Switches to `fallback` if an earlier check did not pass.
    ///
    /// An active chain is returned unchanged. Otherwise a fresh active
    /// chain is started on `fallback`, labelled `description`.
    #[must_use]
    pub fn or(self, description: &str, fallback: T) -> Self {
        self.or_else(description, || fallback)
    }

    /// Like [`or`](Self::or), but only builds the fallback when it is needed.
    #[must_use]
    pub fn or_else(self, description: &str, fallback: impl FnOnce() -> T) -> Self {
        if self.result() {
            return self;
        }

        debug!("Falling back to `{}`", description);
        Self::active(self.logger, fallback(), description)
    }

    /// Returns the subject if every check passed, otherwise the error
    /// produced by `err`.
    ///
    /// # Errors
    ///
    /// Returns `err()` if any check did not pass.
    pub fn get_or_throw<E>(self, err: impl FnOnce() -> E) -> Result<T, E> {
        match self.state {
            Subject::Active { value, .. } => Ok(value),
            Subject::Skipping { .. } | Subject::Ignoring => Err(err()),
        }
    }

    /// Like [`get_or_throw`](Self::get_or_throw) with [`ChecksFailed::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ChecksFailed`] if any check did not pass.
    pub fn get_or_fail(self) -> Result<T, ChecksFailed> {
        self.get_or_throw(ChecksFailed::default)
    }

    /// Returns the chain unchanged if every check passed, otherwise the
    /// error produced by `err`.
    ///
    /// # Errors
    ///
    /// Returns `err()` if any check did not pass.
    pub fn or_throw<E>(self, err: impl FnOnce() -> E) -> Result<Self, E> {
        if self.result() {
            Ok(self)
        } else {
            Err(err())
        }
    }

    /// Like [`or_throw`](Self::or_throw) with [`ChecksFailed::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ChecksFailed`] if any check did not pass.
    pub fn or_fail(self) -> Result<Self, ChecksFailed> {
        self.or_throw(ChecksFailed::default)
    }

    /// Returns true if every check so far passed.
    #[must_use]
    pub fn result(&self) -> bool {
        matches!(self.state, Subject::Active { .. })
    }

    /// Returns the subject while the chain is active.
    #[must_use]
    pub fn subject(&self) -> Option<&T> {
        match &self.state {
            Subject::Active { value, .. } => Some(value),
            Subject::Skipping { .. } | Subject::Ignoring => None,
        }
    }

    /// Returns the current name prefix, unless the subject was never created.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match &self.state {
            Subject::Active { prefix, .. } | Subject::Skipping { prefix } => Some(prefix),
            Subject::Ignoring => None,
        }
    }
}

fn join(prefix: &str, description: &str) -> String {
    format!("{prefix} {description}")
}
