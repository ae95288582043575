//! Semantic checks over a loaded or merged config.
//!
//! Loading never rejects a config for what it means; this pass reports
//! problems the runtime would otherwise only surface as fallbacks or internal
//! notes. Tooling that checks configs fails on
//! [`ValidationReport::has_errors`].

use crate::types::template_names;
use crate::types::{Config, StepKind, TokenSource, Transform};
use crate::resolve::RegexCache;
use crate::traits::NamedBlock;
use std::collections::HashSet;
use std::fmt;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum IssueLevel {
    Warning,
    Error,
}

/// One finding, attributed to a block such as `token "service"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub level: IssueLevel,
    pub block: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.level, self.block, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.level == IssueLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.level == IssueLevel::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn warn(&mut self, block: String, message: impl Into<String>) {
        self.issues.push(Issue {
            level: IssueLevel::Warning,
            block,
            message: message.into(),
        });
    }

    fn error(&mut self, block: String, message: impl Into<String>) {
        self.issues.push(Issue {
            level: IssueLevel::Error,
            block,
            message: message.into(),
        });
    }

    fn check_regex(&mut self, block: &str, attr: &str, pattern: Option<&String>) {
        if let Some(pattern) = pattern {
            if let (Err(err), _) = RegexCache::new().compile(pattern) {
                self.error(block.to_string(), format!("{attr}: {err}"));
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{issue}")?;
        }
        Ok(())
    }
}

fn label(kind: &str, name: &str) -> String {
    format!("{kind} {name:?}")
}

fn duplicates<T: NamedBlock>(report: &mut ValidationReport, kind: &str, blocks: &[T]) {
    let mut seen = HashSet::new();
    for block in blocks {
        if !seen.insert(block.name()) {
            report.warn(
                label(kind, block.name()),
                "declared more than once; the last one wins",
            );
        }
    }
}

/// Validates `config` and returns every finding.
pub fn validate(config: &Config) -> ValidationReport {
    let mut report = ValidationReport::default();

    duplicates(&mut report, "token", &config.tokens);
    duplicates(&mut report, "parameter", &config.parameters);
    duplicates(&mut report, "hint", &config.hints);
    duplicates(&mut report, "stack_match", &config.stack_matches);
    duplicates(&mut report, "template", &config.templates);
    duplicates(&mut report, "transform", &config.transforms);

    for token in &config.tokens {
        let block = label("token", &token.name);
        let implied = token.implied_sources();
        if token.source.is_none() && implied.len() > 1 {
            report.warn(
                block.clone(),
                format!(
                    "source is ambiguous; inferred {} from {implied:?}",
                    token.effective_source()
                ),
            );
        }
        if token.pattern.is_some() || token.replace.is_some() {
            report.warn(
                block.clone(),
                "pattern and replace are reserved and have no effect",
            );
        }
        match token.effective_source() {
            TokenSource::Parameter if config.parameter(token.parameter_key()).is_none() => {
                report.warn(
                    block.clone(),
                    format!("parameter {:?} is not defined", token.parameter_key()),
                );
            }
            TokenSource::CallStack | TokenSource::ErrorStack if token.stack_matches.is_empty() => {
                report.warn(
                    block.clone(),
                    "call stack source without stack_matches never resolves",
                );
            }
            _ => {}
        }
        for name in &token.stack_matches {
            if config.stack_match(name).is_none() {
                report.error(
                    block.clone(),
                    format!("stack_match {name:?} is not defined"),
                );
            }
        }
        let field_transforms = token.field_transforms.values().flatten();
        for name in token.transforms.iter().chain(field_transforms) {
            if config.transform(name).is_none() {
                report.error(block.clone(), format!("transform {name:?} is not defined"));
            }
        }
        if !token.field_transforms.is_empty()
            && token.effective_source() != TokenSource::Diagnostic
        {
            report.warn(
                block.clone(),
                "field_transforms only apply to diagnostic tokens",
            );
        }
    }

    for hint in &config.hints {
        let block = label("hint", &hint.name);
        if hint.error_contains.is_none() && hint.regex_match.is_none() {
            report.error(block.clone(), "needs error_contains or regex_match");
        }
        report.check_regex(&block, "regex_match", hint.regex_match.as_ref());
    }

    for stack_match in &config.stack_matches {
        let block = label("stack_match", &stack_match.name);
        report.check_regex(&block, "called_from", stack_match.called_from.as_ref());
        report.check_regex(&block, "called_after", stack_match.called_after.as_ref());
    }

    for template in &config.templates {
        if !template_names::is_canonical(&template.name) {
            report.warn(
                label("template", &template.name),
                "not a canonical template name; it is never rendered",
            );
        }
        if let Err(err) = crate::template::ParsedTemplate::parse(&template.name, &template.format) {
            report.error(label("template", &template.name), err.to_string());
        }
    }

    for transform in &config.transforms {
        validate_transform(&mut report, transform);
    }

    report
}

fn validate_transform(report: &mut ValidationReport, transform: &Transform) {
    let block = label("transform", &transform.name);
    for (index, step) in transform.steps.iter().enumerate() {
        let at = format!("step {index} ({})", step.kind);
        match &step.kind {
            StepKind::StripPrefix | StepKind::StripSuffix if step.value.is_none() => {
                report.error(block.clone(), format!("{at}: needs value"));
            }
            StepKind::Remove if step.value.is_none() && step.regex.is_none() => {
                report.error(block.clone(), format!("{at}: needs value or regex"));
            }
            StepKind::Replace
                if step.with.is_none() || (step.value.is_none() && step.regex.is_none()) =>
            {
                report.error(
                    block.clone(),
                    format!("{at}: needs with and one of value or regex"),
                );
            }
            StepKind::Unknown(kind) => {
                report.error(block.clone(), format!("{at}: unknown step type {kind:?}"));
            }
            _ => {}
        }
        report.check_regex(&block, &at, step.regex.as_ref());
    }
}
