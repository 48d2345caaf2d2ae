//! Check plan resolution with global fallback.
//!
//! The plan is looked up in a fixed order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{dir}/checkmate.toml` or `{dir}/.checkmate.toml`
//! 3. `$CHECKMATE_CONFIG_DIR/config.toml`, else `~/.checkmate/config.toml`
//! 4. Nothing found

use std::path::{Path, PathBuf};

/// Where the plan was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the directory being checked.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// No plan anywhere.
    NotFound,
}

impl PlanSource {
    /// Returns the plan file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Directory that relative paths in the plan are resolved against.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.path().and_then(Path::parent)
    }

    /// Returns `true` if the plan came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Plan file names looked up in the checked directory, in order.
const PROJECT_PLAN_NAMES: &[&str] = &["checkmate.toml", ".checkmate.toml"];

/// Plan file name inside the global config directory.
const GLOBAL_PLAN_NAME: &str = "config.toml";

/// Resolves the plan for `dir`.
#[must_use]
pub fn resolve(dir: &Path, explicit: Option<&Path>) -> PlanSource {
    resolve_in(dir, explicit, global_config_dir())
}

/// Takes the global directory as a parameter so tests need no env vars.
fn resolve_in(dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> PlanSource {
    if let Some(path) = explicit {
        return PlanSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = PROJECT_PLAN_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.exists())
    {
        tracing::debug!("Found project plan: {}", found.display());
        return PlanSource::Project(found);
    }

    match global_dir.map(|d| d.join(GLOBAL_PLAN_NAME)) {
        Some(candidate) if candidate.exists() => {
            tracing::debug!("Found global plan: {}", candidate.display());
            PlanSource::Global(candidate)
        }
        _ => PlanSource::NotFound,
    }
}

/// Returns the global config directory.
///
/// `$CHECKMATE_CONFIG_DIR` wins over `~/.checkmate/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("CHECKMATE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".checkmate"))
}
