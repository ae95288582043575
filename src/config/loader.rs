//! Parses one `smarterr.hcl` file into a [`Config`].
//!
//! Loading is a pure deserialization: names are not cross-checked and
//! regexes are not compiled (see [`validate`](crate::config::validate) for
//! that). Unknown blocks or attributes, wrong value types and missing labels
//! fail the load.

use crate::error::{SmarterrError, SmarterrResult};
use crate::traits::FileSystem;
use crate::types::{
    Config, Hint, Parameter, Settings, StackMatch, StepKind, Template, Token, TokenSource,
    Transform, TransformStep,
};
use hcl::expr::{Expression, HeredocStripMode, ObjectKey, TemplateExpr};
use hcl::structure::{Block, Body};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Reads `path` from `fs` and parses it.
pub fn load_file(fs: &dyn FileSystem, path: &str) -> SmarterrResult<Config> {
    let bytes = fs
        .read(path)
        .map_err(|err| SmarterrError::config_load(path, err))?;
    load_config(&bytes, path)
}

/// Parses raw bytes; `path` is only used in error messages.
///
/// An empty (or whitespace-only) file yields an empty config.
pub fn load_config(bytes: &[u8], path: &str) -> SmarterrResult<Config> {
    let text = std::str::from_utf8(bytes).map_err(|err| SmarterrError::config_load(path, err))?;
    if text.trim().is_empty() {
        return Ok(Config::default());
    }
    let body = hcl::parse(text).map_err(|err| SmarterrError::config_load(path, err))?;
    ConfigReader { path }.read(&body)
}

struct ConfigReader<'a> {
    path: &'a str,
}

impl ConfigReader<'_> {
    fn fail(&self, message: impl Into<String>) -> SmarterrError {
        SmarterrError::config_load(self.path, message.into())
    }

    fn read(&self, body: &Body) -> SmarterrResult<Config> {
        if let Some(attr) = body.attributes().next() {
            return Err(self.fail(format!(
                "unexpected top-level attribute {:?}",
                attr.key()
            )));
        }
        let mut config = Config::default();
        for block in body.blocks() {
            let reader = BlockReader::new(self, block);
            match block.identifier() {
                "smarterr" => {
                    let settings = reader.settings()?;
                    config.settings.merge_from(&settings);
                }
                "token" => config.tokens.push(reader.token()?),
                "parameter" => config.parameters.push(reader.parameter()?),
                "hint" => config.hints.push(reader.hint()?),
                "stack_match" => config.stack_matches.push(reader.stack_match()?),
                "template" => config.templates.push(reader.template()?),
                "transform" => config.transforms.push(reader.transform()?),
                other => return Err(self.fail(format!("unsupported block type {other:?}"))),
            }
        }
        Ok(config)
    }
}

/// Typed accessors over one block's attributes.
struct BlockReader<'a> {
    config: &'a ConfigReader<'a>,
    block: &'a Block,
}

impl<'a> BlockReader<'a> {
    fn new(config: &'a ConfigReader<'a>, block: &'a Block) -> Self {
        Self { config, block }
    }

    fn describe(&self) -> String {
        match self.block.labels().first() {
            Some(label) => format!("{} {:?}", self.block.identifier(), label.as_str()),
            None => self.block.identifier().to_string(),
        }
    }

    fn fail(&self, message: impl AsRef<str>) -> SmarterrError {
        self.config.fail(format!("{}: {}", self.describe(), message.as_ref()))
    }

    fn label(&self) -> SmarterrResult<String> {
        match self.block.labels() {
            [label] => Ok(label.as_str().to_string()),
            labels => Err(self.fail(format!(
                "expected exactly one label, found {}",
                labels.len()
            ))),
        }
    }

    fn no_labels(&self) -> SmarterrResult<()> {
        if self.block.labels().is_empty() {
            Ok(())
        } else {
            Err(self.fail("block takes no labels"))
        }
    }

    /// Rejects attributes outside `allowed` and any nested block not in `blocks`.
    fn only(&self, allowed: &[&str], blocks: &[&str]) -> SmarterrResult<()> {
        let body = self.block.body();
        if let Some(attr) = body.attributes().find(|a| !allowed.contains(&a.key())) {
            return Err(self.fail(format!("unsupported attribute {:?}", attr.key())));
        }
        if let Some(block) = body.blocks().find(|b| !blocks.contains(&b.identifier())) {
            return Err(self.fail(format!(
                "unsupported block {:?}",
                block.identifier()
            )));
        }
        Ok(())
    }

    fn expr(&self, key: &str) -> Option<&'a Expression> {
        let body: &'a Body = self.block.body();
        body.attributes()
            .filter(|a| a.key() == key)
            .last()
            .map(|a| a.expr())
    }

    fn string(&self, key: &str) -> SmarterrResult<Option<String>> {
        match self.expr(key) {
            None => Ok(None),
            Some(expr) => expr_string(expr)
                .map(Some)
                .ok_or_else(|| self.fail(format!("attribute {key:?} must be a string"))),
        }
    }

    fn required_string(&self, key: &str) -> SmarterrResult<String> {
        self.string(key)?.ok_or_else(|| self.fail(format!("missing attribute {key:?}")))
    }

    fn bool(&self, key: &str) -> SmarterrResult<Option<bool>> {
        match self.expr(key) {
            None => Ok(None),
            Some(Expression::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(self.fail(format!("attribute {key:?} must be a bool"))),
        }
    }

    fn strings(&self, key: &str) -> SmarterrResult<Vec<String>> {
        match self.expr(key) {
            None => Ok(Vec::new()),
            Some(expr) => expr_strings(expr).ok_or_else(|| {
                self.fail(format!("attribute {key:?} must be a list of strings"))
            }),
        }
    }

    fn string_lists(&self, key: &str) -> SmarterrResult<BTreeMap<String, Vec<String>>> {
        let invalid = || {
            self.fail(format!(
                "attribute {key:?} must map field names to lists of strings"
            ))
        };
        match self.expr(key) {
            None => Ok(BTreeMap::new()),
            Some(Expression::Object(object)) => object
                .iter()
                .map(|(k, v)| {
                    let key = object_key(k).ok_or_else(invalid)?;
                    let list = expr_strings(v).ok_or_else(invalid)?;
                    Ok((key, list))
                })
                .collect(),
            Some(_) => Err(invalid()),
        }
    }

    fn parse<T: FromStr>(&self, key: &str) -> SmarterrResult<Option<T>> {
        match self.string(key)? {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| {
                    self.fail(format!("attribute {key:?} has unsupported value {raw:?}"))
                }),
        }
    }

    fn settings(&self) -> SmarterrResult<Settings> {
        self.no_labels()?;
        self.only(
            &["debug", "token_error_mode", "hint_join_char", "hint_match_mode"],
            &[],
        )?;
        Ok(Settings {
            debug: self.bool("debug")?,
            token_error_mode: self.parse("token_error_mode")?,
            hint_join_char: self.string("hint_join_char")?,
            hint_match_mode: self.parse("hint_match_mode")?,
        })
    }

    fn token(&self) -> SmarterrResult<Token> {
        self.only(
            &[
                "source",
                "parameter",
                "context",
                "arg",
                "stack_matches",
                "pattern",
                "replace",
                "transforms",
                "field_transforms",
            ],
            &[],
        )?;
        Ok(Token {
            name: self.label()?,
            source: self.parse::<TokenSource>("source")?,
            parameter: self.string("parameter")?,
            context: self.string("context")?,
            arg: self.string("arg")?,
            stack_matches: self.strings("stack_matches")?,
            pattern: self.string("pattern")?,
            replace: self.string("replace")?,
            transforms: self.strings("transforms")?,
            field_transforms: self.string_lists("field_transforms")?,
        })
    }

    fn parameter(&self) -> SmarterrResult<Parameter> {
        self.only(&["value"], &[])?;
        Ok(Parameter {
            name: self.label()?,
            value: self.required_string("value")?,
        })
    }

    fn hint(&self) -> SmarterrResult<Hint> {
        self.only(&["error_contains", "regex_match", "suggestion"], &[])?;
        Ok(Hint {
            name: self.label()?,
            error_contains: self.string("error_contains")?,
            regex_match: self.string("regex_match")?,
            suggestion: self.required_string("suggestion")?,
        })
    }

    fn stack_match(&self) -> SmarterrResult<StackMatch> {
        self.only(&["called_from", "called_after", "display"], &[])?;
        Ok(StackMatch {
            name: self.label()?,
            called_from: self.string("called_from")?,
            called_after: self.string("called_after")?,
            display: self.required_string("display")?,
        })
    }

    fn template(&self) -> SmarterrResult<Template> {
        self.only(&["format"], &[])?;
        Ok(Template {
            name: self.label()?,
            format: self.required_string("format")?,
        })
    }

    fn transform(&self) -> SmarterrResult<Transform> {
        self.only(&[], &["step"])?;
        let name = self.label()?;
        let steps = self
            .block
            .body()
            .blocks()
            .map(|step| BlockReader::new(self.config, step).step())
            .collect::<SmarterrResult<Vec<_>>>()?;
        Ok(Transform { name, steps })
    }

    fn step(&self) -> SmarterrResult<TransformStep> {
        self.only(&["value", "regex", "with", "recurse"], &[])?;
        Ok(TransformStep {
            kind: StepKind::from_label(&self.label()?),
            value: self.string("value")?,
            regex: self.string("regex")?,
            with: self.string("with")?,
            recurse: self.bool("recurse")?.unwrap_or(false),
        })
    }
}

fn expr_string(expr: &Expression) -> Option<String> {
    match expr {
        Expression::String(value) => Some(value.clone()),
        Expression::TemplateExpr(template) => Some(template_text(template)),
        _ => None,
    }
}

fn expr_strings(expr: &Expression) -> Option<Vec<String>> {
    match expr {
        Expression::Array(items) => items.iter().map(expr_string).collect(),
        _ => None,
    }
}

fn object_key(key: &ObjectKey) -> Option<String> {
    match key {
        ObjectKey::Identifier(ident) => Some(ident.as_str().to_string()),
        ObjectKey::Expression(expr) => expr_string(expr),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Template expressions are kept as literal text; only the `$${`/`%%{`
/// escapes are undone since smarterr templates use `{{ }}` instead.
fn template_text(template: &TemplateExpr) -> String {
    let raw = match template {
        TemplateExpr::QuotedString(text) => text.clone(),
        TemplateExpr::Heredoc(heredoc) => match heredoc.strip {
            HeredocStripMode::Indent => strip_indent(&heredoc.template),
            _ => heredoc.template.clone(),
        },
    };
    raw.replace("$${", "${").replace("%%{", "%{")
}

/// Removes the common leading whitespace of all non-blank lines (`<<-EOT`).
fn strip_indent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let cut = indent.min(line.len() - line.trim_start().len());
        out.push_str(&line[cut..]);
    }
    out
}
