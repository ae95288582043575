//! In-memory representation of one `smarterr.hcl` file.
//!
//! Blocks reference each other by name only; lookups happen during token
//! resolution, never while the model is built. Every block type implements
//! [`NamedBlock`] so the merger can override by name without looking at the
//! block body.

use crate::traits::NamedBlock;
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical template names consumed by the entry points.
pub mod template_names {
    /// Summary for a bare error.
    pub const ERROR_SUMMARY: &str = "error_summary";
    /// Detail for a bare error.
    pub const ERROR_DETAIL: &str = "error_detail";
    /// Summary when enriching an incoming diagnostic.
    pub const DIAGNOSTIC_SUMMARY: &str = "diagnostic_summary";
    /// Detail when enriching an incoming diagnostic.
    pub const DIAGNOSTIC_DETAIL: &str = "diagnostic_detail";
    pub const LOG_ERROR: &str = "log_error";
    pub const LOG_WARN: &str = "log_warn";
    pub const LOG_INFO: &str = "log_info";

    /// All canonical names, in the order the orchestrator consults them.
    pub const CANONICAL: [&str; 7] = [
        ERROR_SUMMARY,
        ERROR_DETAIL,
        DIAGNOSTIC_SUMMARY,
        DIAGNOSTIC_DETAIL,
        LOG_ERROR,
        LOG_WARN,
        LOG_INFO,
    ];

    /// Returns true if `name` is one of the canonical template names.
    pub fn is_canonical(name: &str) -> bool {
        CANONICAL.contains(&name)
    }
}

/// How an unresolved token is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenErrorMode {
    /// `[unresolved token: <name>] (<reason>)`
    Detailed,
    /// The token name itself.
    Placeholder,
    /// The empty string.
    #[default]
    Empty,
}

/// Whether the hint matcher stops at the first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HintMatchMode {
    #[default]
    All,
    First,
}

/// Where a token takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenSource {
    Parameter,
    Context,
    Arg,
    CallStack,
    ErrorStack,
    Error,
    Hints,
    Diagnostic,
}

/// The `smarterr { ... }` settings block. Every field is optional so that a
/// more specific file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    pub debug: Option<bool>,
    pub token_error_mode: Option<TokenErrorMode>,
    pub hint_join_char: Option<String>,
    pub hint_match_mode: Option<HintMatchMode>,
}

impl Settings {
    pub const DEFAULT_HINT_JOIN: &'static str = "\n";

    #[inline]
    pub fn debug(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    #[inline]
    pub fn token_error_mode(&self) -> TokenErrorMode {
        self.token_error_mode.unwrap_or_default()
    }

    #[inline]
    pub fn hint_join_char(&self) -> &str {
        self.hint_join_char.as_deref().unwrap_or(Self::DEFAULT_HINT_JOIN)
    }

    #[inline]
    pub fn hint_match_mode(&self) -> HintMatchMode {
        self.hint_match_mode.unwrap_or_default()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.debug.is_none()
            && self.token_error_mode.is_none()
            && self.hint_join_char.is_none()
            && self.hint_match_mode.is_none()
    }

    /// Overlays `other` on top of `self`.
    ///
    /// Fields present in `other` win, except `debug`, which stays `true`
    /// once any layer turned it on.
    pub fn merge_from(&mut self, other: &Settings) {
        self.debug = match (self.debug, other.debug) {
            (Some(true), _) => Some(true),
            (current, None) => current,
            (_, next) => next,
        };
        if other.token_error_mode.is_some() {
            self.token_error_mode = other.token_error_mode;
        }
        if other.hint_join_char.is_some() {
            self.hint_join_char = other.hint_join_char.clone();
        }
        if other.hint_match_mode.is_some() {
            self.hint_match_mode = other.hint_match_mode;
        }
    }
}

/// A named value resolved per call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub name: String,
    pub source: Option<TokenSource>,
    pub parameter: Option<String>,
    pub context: Option<String>,
    pub arg: Option<String>,
    pub stack_matches: Vec<String>,
    /// Parsed and preserved, never used during resolution.
    pub pattern: Option<String>,
    /// Parsed and preserved, never used during resolution.
    pub replace: Option<String>,
    pub transforms: Vec<String>,
    pub field_transforms: BTreeMap<String, Vec<String>>,
}

impl Token {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: TokenSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Sources implied by the populated fields, in inference priority order.
    pub fn implied_sources(&self) -> Vec<TokenSource> {
        let mut found = Vec::new();
        if self.parameter.is_some() {
            found.push(TokenSource::Parameter);
        }
        if self.context.is_some() {
            found.push(TokenSource::Context);
        }
        if self.arg.is_some() {
            found.push(TokenSource::Arg);
        }
        if !self.stack_matches.is_empty() {
            found.push(TokenSource::CallStack);
        }
        found
    }

    /// The declared source, or the one inferred from the first populated
    /// field (parameter, context, arg, stack matches), else `parameter`.
    pub fn effective_source(&self) -> TokenSource {
        self.source
            .or_else(|| self.implied_sources().into_iter().next())
            .unwrap_or(TokenSource::Parameter)
    }

    /// Parameter key to look up; defaults to the token's own name.
    pub fn parameter_key(&self) -> &str {
        self.parameter.as_deref().unwrap_or(&self.name)
    }

    /// Context key to look up; defaults to the token's own name.
    pub fn context_key(&self) -> &str {
        self.context.as_deref().unwrap_or(&self.name)
    }

    /// Argument key to look up; defaults to the token's own name.
    pub fn arg_key(&self) -> &str {
        self.arg.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A suggestion emitted when the error text matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hint {
    pub name: String,
    pub error_contains: Option<String>,
    pub regex_match: Option<String>,
    pub suggestion: String,
}

/// Specificity group of a stack match; groups are tried in declaration order
/// of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    Both,
    AfterOnly,
    FromOnly,
    Neither,
}

impl Specificity {
    pub const ORDER: [Specificity; 4] =
        [Specificity::Both, Specificity::AfterOnly, Specificity::FromOnly, Specificity::Neither];
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StackMatch {
    pub name: String,
    /// Regex over the function name of the frame under test.
    pub called_from: Option<String>,
    /// Regex over the function name of the next-deeper frame.
    pub called_after: Option<String>,
    pub display: String,
}

impl StackMatch {
    pub fn specificity(&self) -> Specificity {
        match (&self.called_from, &self.called_after) {
            (Some(_), Some(_)) => Specificity::Both,
            (None, Some(_)) => Specificity::AfterOnly,
            (Some(_), None) => Specificity::FromOnly,
            (None, None) => Specificity::Neither,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Template {
    pub name: String,
    pub format: String,
}

impl Template {
    pub fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
        }
    }
}

/// Step kinds understood by the transform engine.
///
/// Unrecognized kinds are kept as [`StepKind::Unknown`] so that loading stays
/// a pure deserialization; the engine reports and skips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    StripPrefix,
    StripSuffix,
    Remove,
    Replace,
    TrimSpace,
    FixSpace,
    Lower,
    Upper,
    #[strum(default)]
    Unknown(String),
}

impl StepKind {
    pub fn as_str(&self) -> &str {
        match self {
            StepKind::StripPrefix => "strip_prefix",
            StepKind::StripSuffix => "strip_suffix",
            StepKind::Remove => "remove",
            StepKind::Replace => "replace",
            StepKind::TrimSpace => "trim_space",
            StepKind::FixSpace => "fix_space",
            StepKind::Lower => "lower",
            StepKind::Upper => "upper",
            StepKind::Unknown(kind) => kind,
        }
    }

    /// Parses a step label; never fails, unknown labels become `Unknown`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| StepKind::Unknown(label.to_string()))
    }
}

impl core::fmt::Display for StepKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransformStep {
    pub kind: StepKind,
    pub value: Option<String>,
    pub regex: Option<String>,
    pub with: Option<String>,
    pub recurse: bool,
}

impl TransformStep {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            value: None,
            regex: None,
            with: None,
            recurse: false,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    pub fn with(mut self, with: impl Into<String>) -> Self {
        self.with = Some(with.into());
        self
    }

    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub name: String,
    pub steps: Vec<TransformStep>,
}

impl Transform {
    pub fn new(name: impl Into<String>, steps: Vec<TransformStep>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

macro_rules! named_block {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NamedBlock for $ty {
                #[inline]
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

named_block!(Token, Parameter, Hint, StackMatch, Template, Transform);

/// One parsed configuration file, or the merge of several.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub settings: Settings,
    pub tokens: Vec<Token>,
    pub parameters: Vec<Parameter>,
    pub hints: Vec<Hint>,
    pub stack_matches: Vec<StackMatch>,
    pub templates: Vec<Template>,
    pub transforms: Vec<Transform>,
}

fn find<'a, T: NamedBlock>(blocks: &'a [T], name: &str) -> Option<&'a T> {
    // later declarations shadow earlier ones, matching the merger
    blocks.iter().rev().find(|block| block.name() == name)
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the file declared nothing.
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
            && self.tokens.is_empty()
            && self.parameters.is_empty()
            && self.hints.is_empty()
            && self.stack_matches.is_empty()
            && self.templates.is_empty()
            && self.transforms.is_empty()
    }

    pub fn token(&self, name: &str) -> Option<&Token> {
        find(&self.tokens, name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        find(&self.parameters, name)
    }

    pub fn hint(&self, name: &str) -> Option<&Hint> {
        find(&self.hints, name)
    }

    pub fn stack_match(&self, name: &str) -> Option<&StackMatch> {
        find(&self.stack_matches, name)
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        find(&self.templates, name)
    }

    pub fn transform(&self, name: &str) -> Option<&Transform> {
        find(&self.transforms, name)
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_hint(mut self, hint: Hint) -> Self {
        self.hints.push(hint);
        self
    }

    pub fn with_stack_match(mut self, stack_match: StackMatch) -> Self {
        self.stack_matches.push(stack_match);
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }
}
