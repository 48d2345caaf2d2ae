//! Domain model for check plans.
//!
//! All invariants are enforced at construction time by the loader.

use crate::config::ChecksConfig;
use crate::types::WhenFalse;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors for invalid model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Labels are used in check names and must not be blank.
    #[error("name must not be empty")]
    EmptyName,

    /// The probe name is not one of the known probes.
    #[error("unknown probe `{0}`, expected one of: defined, exists, is-dir, is-file, readable, non-empty")]
    UnknownProbe(String),

    /// The policy is neither `fail` nor `warn`.
    #[error("unknown policy `{0}`, expected: fail, warn")]
    UnknownPolicy(String),
}

/// A filesystem test run against a subject path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    /// The path is not empty.
    Defined,
    /// Something exists at the path.
    Exists,
    /// The path is a directory.
    IsDir,
    /// The path is a regular file.
    IsFile,
    /// The file can be opened or the directory listed.
    Readable,
    /// The file has content or the directory has entries.
    NonEmpty,
}

impl Probe {
    /// Parses a probe from its kebab-case name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownProbe`] for unrecognized names.
    pub fn parse(name: &str) -> Result<Self, ModelError> {
        match name {
            "defined" => Ok(Self::Defined),
            "exists" => Ok(Self::Exists),
            "is-dir" => Ok(Self::IsDir),
            "is-file" => Ok(Self::IsFile),
            "readable" => Ok(Self::Readable),
            "non-empty" => Ok(Self::NonEmpty),
            other => Err(ModelError::UnknownProbe(other.to_string())),
        }
    }

    /// Returns the description used in the check name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Defined => "is defined",
            Self::Exists => "exists",
            Self::IsDir => "is directory",
            Self::IsFile => "is file",
            Self::Readable => "is readable",
            Self::NonEmpty => "is not empty",
        }
    }

    /// Runs the probe against `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the filesystem cannot answer.
    pub fn test(self, path: &Path) -> io::Result<bool> {
        match self {
            Self::Defined => Ok(!path.as_os_str().is_empty()),
            Self::Exists => path.try_exists(),
            Self::IsDir => Ok(path.is_dir()),
            Self::IsFile => Ok(path.is_file()),
            Self::Readable => {
                if path.is_dir() {
                    fs::read_dir(path).map(|_| true)
                } else {
                    fs::File::open(path).map(|_| true)
                }
            }
            Self::NonEmpty => {
                if path.is_dir() {
                    Ok(fs::read_dir(path)?.next().is_some())
                } else {
                    Ok(fs::metadata(path)?.len() > 0)
                }
            }
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses `fail` or `warn`.
///
/// # Errors
///
/// Returns [`ModelError::UnknownPolicy`] for anything else.
pub fn parse_policy(value: &str) -> Result<WhenFalse, ModelError> {
    match value {
        "fail" => Ok(WhenFalse::Fail),
        "warn" => Ok(WhenFalse::Warn),
        other => Err(ModelError::UnknownPolicy(other.to_string())),
    }
}

/// A validated, non-blank label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Creates a new label.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if `name` is blank.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a subject's path comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Value of an environment variable.
    Env(String),
    /// A literal path.
    Path(PathBuf),
}

impl Source {
    /// Resolves the source to a path. An unset variable resolves to an
    /// empty path.
    #[must_use]
    pub fn resolve(&self) -> PathBuf {
        match self {
            Self::Env(var) => std::env::var_os(var).map(PathBuf::from).unwrap_or_default(),
            Self::Path(path) => path.clone(),
        }
    }

    fn rebase(&mut self, base: &Path) {
        if let Self::Path(path) = self {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// An alternative subject tried when the previous one did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    /// Prefix used once the fallback is in use.
    pub name: Label,
    /// Where the fallback path comes from.
    pub source: Source,
}

/// A path below its subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    /// Relative path, also appended to the name prefix.
    pub name: Label,
    /// Probes to run.
    pub probes: Vec<Probe>,
    /// Policy for probes that do not hold.
    pub when_false: WhenFalse,
}

/// A checked path with its probes, fallbacks and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Prefix for every check on this subject.
    pub name: Label,
    /// Where the path comes from.
    pub source: Source,
    /// Probes to run, in order.
    pub probes: Vec<Probe>,
    /// Policy for probes that do not hold.
    pub when_false: WhenFalse,
    /// Alternatives tried in order.
    pub fallbacks: Vec<Fallback>,
    /// Paths below the subject.
    pub children: Vec<Child>,
}

/// A validated check plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Report settings.
    pub report: ChecksConfig,
    /// Subjects, in order.
    pub subjects: Vec<Subject>,
}

impl Plan {
    /// Returns true if the plan has no subjects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Resolves relative literal paths against `base`.
    #[must_use]
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        for subject in &mut self.subjects {
            subject.source.rebase(base);
            for fallback in &mut subject.fallbacks {
                fallback.source.rebase(base);
            }
        }
        self
    }
}
