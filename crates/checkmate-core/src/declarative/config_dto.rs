//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to domain model types via the loader.

use crate::config::ChecksConfig;
use serde::Deserialize;

/// Raw TOML representation of a check plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanDto {
    /// Report settings (`width`, `output`) at the top level.
    #[serde(flatten)]
    pub report: ChecksConfig,

    /// Subjects to check, in order.
    #[serde(rename = "subject", default)]
    pub subjects: Vec<SubjectDto>,
}

/// TOML representation of a checked path.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectDto {
    /// Label used as the check name prefix.
    pub name: String,
    /// Environment variable holding the path (mutually exclusive with `path`).
    #[serde(default)]
    pub env: Option<String>,
    /// Literal path (mutually exclusive with `env`).
    #[serde(default)]
    pub path: Option<String>,
    /// Probe names to run, in order.
    #[serde(default)]
    pub expect: Vec<String>,
    /// Policy for probes that do not hold (default: "fail").
    #[serde(rename = "on-false", default = "default_policy_str")]
    pub on_false: String,
    /// Alternatives tried in order when the subject's probes do not pass.
    #[serde(rename = "fallback", default)]
    pub fallbacks: Vec<SourceDto>,
    /// Paths below the subject, checked after it passes.
    #[serde(rename = "child", default)]
    pub children: Vec<ChildDto>,
}

/// TOML representation of a fallback source.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDto {
    /// Label used as the check name prefix once the fallback is in use.
    pub name: String,
    /// Environment variable holding the path.
    #[serde(default)]
    pub env: Option<String>,
    /// Literal path.
    #[serde(default)]
    pub path: Option<String>,
}

/// TOML representation of a path relative to its subject.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildDto {
    /// Relative path, also used to extend the check name prefix.
    pub name: String,
    /// Probe names to run, in order.
    #[serde(default)]
    pub expect: Vec<String>,
    /// Policy for probes that do not hold (default: "fail").
    #[serde(rename = "on-false", default = "default_policy_str")]
    pub on_false: String,
}

fn default_policy_str() -> String {
    "fail".to_string()
}
