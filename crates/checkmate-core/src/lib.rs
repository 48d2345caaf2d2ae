//! # checkmate-core
//!
//! Fluent check chains for startup and deployment validation.
//!
//! A chain runs named boolean checks in order and reports each one as a
//! single aligned line (`PASS`, `FAIL`, `WARN`, `SKIP` or `ERROR`). The
//! first check that does not pass short-circuits the rest of the chain.
//!
//! - [`Checks`] for context-free checks
//! - [`ObjectChecks`] for checks on a subject, with `map` and `or` fallbacks
//! - [`CheckLogger`] for report back ends ([`PrintLogger`], [`LoggerList`],
//!   [`RecordingLogger`])
//! - [`declarative`] for TOML-driven check plans
//!
//! ## Example
//!
//! ```
//! use checkmate_core::{Checks, ChecksFailed, SharedBuffer};
//! use std::path::PathBuf;
//!
//! let out = SharedBuffer::new();
//! let checks = Checks::builder().print(out.clone(), 50).build();
//!
//! let home: Result<PathBuf, ChecksFailed> = checks
//!     .object("JAVA_HOME", PathBuf::from("/definitely/not/here"))
//!     .check("exists", |p| p.exists())
//!     .check("is directory", |p| p.is_dir())
//!     .get_or_fail();
//!
//! assert!(home.is_err());
//! assert_eq!(
//!     out.contents(),
//!     "JAVA_HOME exists . . . . . . . . . . . . . . . . FAIL\n\
//!      JAVA_HOME is directory . . . . . . . . . . . . . SKIP\n"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod config;
mod error;
mod logger;
mod object;
mod print;
mod recording;
mod types;

/// TOML-driven check plans.
pub mod declarative;

pub use chain::{Checks, ChecksBuilder};
pub use config::{ChecksConfig, ConfigError, Output};
pub use error::ChecksFailed;
pub use logger::{CheckHandle, CheckLogger, LoggerList, LoggerRef, NoopLogger, Record};
pub use object::ObjectChecks;
pub use print::{leader, PrintLogger, SharedBuffer, DEFAULT_WIDTH};
pub use recording::{CheckRecord, RecordingLogger, Summary};
pub use types::{describe_error, Outcome, Status, Verdict, WhenFalse};
