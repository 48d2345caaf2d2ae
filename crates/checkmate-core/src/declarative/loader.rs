//! DTO → Domain model conversion with validation.

use crate::types::WhenFalse;

use super::config_dto::{ChildDto, PlanDto, SourceDto, SubjectDto};
use super::model::{
    parse_policy, Child, Fallback, Label, ModelError, Plan, Probe, Source, Subject,
};
use std::path::PathBuf;

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "subject[0].expect[1]").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// The `env` and `path` fields are both set or both missing.
    #[error("{context}: exactly one of `env` or `path` must be set")]
    AmbiguousSource {
        /// Where the conflict occurred.
        context: String,
    },
}

fn validation(context: impl Into<String>) -> impl FnOnce(ModelError) -> LoadError {
    let context = context.into();
    move |source| LoadError::Validation { context, source }
}

/// Converts a `PlanDto` to a validated `Plan`.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: PlanDto) -> Result<Plan, LoadError> {
    let subjects = dto
        .subjects
        .into_iter()
        .enumerate()
        .map(|(i, s)| load_subject(&format!("subject[{i}]"), s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Plan {
        report: dto.report,
        subjects,
    })
}

fn load_subject(context: &str, dto: SubjectDto) -> Result<Subject, LoadError> {
    let name = Label::new(&dto.name).map_err(validation(format!("{context}.name")))?;
    let source = load_source(context, dto.env, dto.path)?;
    let probes = load_probes(context, &dto.expect)?;
    let when_false = load_policy(context, &dto.on_false)?;

    let fallbacks = dto
        .fallbacks
        .into_iter()
        .enumerate()
        .map(|(i, f)| load_fallback(&format!("{context}.fallback[{i}]"), f))
        .collect::<Result<Vec<_>, _>>()?;

    let children = dto
        .children
        .into_iter()
        .enumerate()
        .map(|(i, c)| load_child(&format!("{context}.child[{i}]"), c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Subject {
        name,
        source,
        probes,
        when_false,
        fallbacks,
        children,
    })
}

fn load_fallback(context: &str, dto: SourceDto) -> Result<Fallback, LoadError> {
    Ok(Fallback {
        name: Label::new(&dto.name).map_err(validation(format!("{context}.name")))?,
        source: load_source(context, dto.env, dto.path)?,
    })
}

fn load_child(context: &str, dto: ChildDto) -> Result<Child, LoadError> {
    Ok(Child {
        name: Label::new(&dto.name).map_err(validation(format!("{context}.name")))?,
        probes: load_probes(context, &dto.expect)?,
        when_false: load_policy(context, &dto.on_false)?,
    })
}

fn load_source(
    context: &str,
    env: Option<String>,
    path: Option<String>,
) -> Result<Source, LoadError> {
    match (env, path) {
        (Some(var), None) => {
            Label::new(&var).map_err(validation(format!("{context}.env")))?;
            Ok(Source::Env(var))
        }
        (None, Some(path)) => {
            Label::new(&path).map_err(validation(format!("{context}.path")))?;
            Ok(Source::Path(PathBuf::from(path)))
        }
        _ => Err(LoadError::AmbiguousSource {
            context: context.to_string(),
        }),
    }
}

fn load_probes(context: &str, names: &[String]) -> Result<Vec<Probe>, LoadError> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Probe::parse(name).map_err(validation(format!("{context}.expect[{i}]")))
        })
        .collect()
}

fn load_policy(context: &str, value: &str) -> Result<WhenFalse, LoadError> {
    parse_policy(value).map_err(validation(format!("{context}.on-false")))
}
