//! Text rewriting applied to resolved token values.
//!
//! A transform is an ordered list of steps; a token lists transforms by name
//! and they run in that order. Misconfigured steps (missing attributes, bad
//! regexes, unknown types) are noted and skipped, so a value always comes out.

use crate::runtime::RuntimeEnvelope;
use crate::types::{StepKind, Transform, TransformStep};

/// Upper bound on fixed-point rounds for a `recurse = true` step.
pub const MAX_ROUNDS: usize = 64;

/// Applies the transforms named in `names` to `value`.
///
/// `owner` names the token (or token field) in notes about undefined
/// transforms.
pub fn apply_named(
    env: &mut RuntimeEnvelope<'_>,
    owner: &str,
    names: &[String],
    value: String,
) -> String {
    let config = env.config;
    names.iter().fold(value, |value, name| match config.transform(name) {
        Some(transform) => apply(env, transform, value),
        None => {
            env.note(format!("{owner}: transform {name:?} is not defined"));
            value
        }
    })
}

/// Applies every step of `transform` in order.
pub fn apply(env: &mut RuntimeEnvelope<'_>, transform: &Transform, value: String) -> String {
    transform
        .steps
        .iter()
        .enumerate()
        .fold(value, |value, (index, step)| {
            apply_step(env, &transform.name, index, step, value)
        })
}

fn apply_step(
    env: &mut RuntimeEnvelope<'_>,
    transform: &str,
    index: usize,
    step: &TransformStep,
    value: String,
) -> String {
    let owner = format!("transform {transform:?} step {index} ({})", step.kind);
    let recurse = step.recurse;
    match &step.kind {
        StepKind::StripPrefix | StepKind::StripSuffix => {
            let Some(affix) = step.value.clone() else {
                env.note(format!("{owner}: value is required"));
                return value;
            };
            let prefix = step.kind == StepKind::StripPrefix;
            let strip = move |text: &str| {
                let text = text.trim();
                let stripped = if prefix {
                    text.strip_prefix(affix.as_str())
                } else {
                    text.strip_suffix(affix.as_str())
                };
                stripped.unwrap_or(text).to_string()
            };
            settle(env, &owner, recurse, value, strip)
        }
        StepKind::Remove => {
            if let Some(pattern) = &step.regex {
                let Some(regex) = env.regex(&owner, pattern) else {
                    return value;
                };
                settle(env, &owner, recurse, value, move |text| {
                    regex.replace_all(text, "").into_owned()
                })
            } else if let Some(literal) = step.value.clone() {
                settle(env, &owner, recurse, value, move |text| {
                    text.replace(literal.as_str(), "")
                })
            } else {
                env.note(format!("{owner}: value or regex is required"));
                value
            }
        }
        StepKind::Replace => {
            let Some(with) = step.with.clone() else {
                env.note(format!("{owner}: with is required"));
                return value;
            };
            if let Some(pattern) = &step.regex {
                let Some(regex) = env.regex(&owner, pattern) else {
                    return value;
                };
                settle(env, &owner, recurse, value, move |text| {
                    regex.replace_all(text, with.as_str()).into_owned()
                })
            } else if let Some(literal) = step.value.clone() {
                settle(env, &owner, recurse, value, move |text| {
                    text.replace(literal.as_str(), with.as_str())
                })
            } else {
                env.note(format!("{owner}: value or regex is required"));
                value
            }
        }
        StepKind::TrimSpace => value.trim().to_string(),
        StepKind::FixSpace => value.split_whitespace().collect::<Vec<_>>().join(" "),
        StepKind::Lower => value.to_lowercase(),
        StepKind::Upper => value.to_uppercase(),
        StepKind::Unknown(kind) => {
            env.note(format!("{owner}: unknown step type {kind:?}"));
            value
        }
    }
}

/// Runs `f` once, or until the text stops changing when `recurse` is set.
fn settle<F>(
    env: &mut RuntimeEnvelope<'_>,
    owner: &str,
    recurse: bool,
    value: String,
    f: F,
) -> String
where
    F: Fn(&str) -> String,
{
    let mut current = f(&value);
    if !recurse {
        return current;
    }
    for _ in 1..MAX_ROUNDS {
        let next = f(&current);
        if next == current {
            return current;
        }
        current = next;
    }
    env.note(format!("{owner}: no fixed point after {MAX_ROUNDS} rounds"));
    current
}
