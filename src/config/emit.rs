//! Prints a [`Config`] back in block syntax.
//!
//! Loading the output yields a config equal to the input, which is what the
//! `config` command of the CLI relies on when it prints a merged config.

use crate::error::{SmarterrError, SmarterrResult};
use crate::types::{Config, Settings, Token, TransformStep};
use hcl::expr::{Expression, Object, ObjectKey};
use hcl::structure::{Block, BlockBuilder, Body};

impl Config {
    /// Renders the config as HCL text.
    pub fn to_hcl(&self) -> SmarterrResult<String> {
        hcl::format::to_string(&self.to_body()).map_err(|err| {
            SmarterrError::semantic(format!("printing config: {err}"))
        })
    }

    /// The config as an HCL document.
    pub fn to_body(&self) -> Body {
        let mut body = Body::builder();
        if !self.settings.is_empty() {
            body = body.add_block(settings_block(&self.settings));
        }
        for parameter in &self.parameters {
            body = body.add_block(
                Block::builder("parameter")
                    .add_label(parameter.name.as_str())
                    .add_attribute(("value", parameter.value.as_str()))
                    .build(),
            );
        }
        for token in &self.tokens {
            body = body.add_block(token_block(token));
        }
        for hint in &self.hints {
            let block = Block::builder("hint").add_label(hint.name.as_str());
            let block = optional(block, "error_contains", &hint.error_contains);
            let block = optional(block, "regex_match", &hint.regex_match);
            let block = block.add_attribute(("suggestion", hint.suggestion.as_str()));
            body = body.add_block(block.build());
        }
        for stack_match in &self.stack_matches {
            let block = Block::builder("stack_match").add_label(stack_match.name.as_str());
            let block = optional(block, "called_from", &stack_match.called_from);
            let block = optional(block, "called_after", &stack_match.called_after);
            let block = block.add_attribute(("display", stack_match.display.as_str()));
            body = body.add_block(block.build());
        }
        for template in &self.templates {
            body = body.add_block(
                Block::builder("template")
                    .add_label(template.name.as_str())
                    .add_attribute(("format", template.format.as_str()))
                    .build(),
            );
        }
        for transform in &self.transforms {
            let block = Block::builder("transform").add_label(transform.name.as_str());
            let block = transform
                .steps
                .iter()
                .fold(block, |block, step| block.add_block(step_block(step)));
            body = body.add_block(block.build());
        }
        body.build()
    }
}

fn settings_block(settings: &Settings) -> Block {
    let mut block = Block::builder("smarterr");
    if let Some(debug) = settings.debug {
        block = block.add_attribute(("debug", debug));
    }
    if let Some(mode) = settings.token_error_mode {
        block = block.add_attribute(("token_error_mode", mode.to_string()));
    }
    block = optional(block, "hint_join_char", &settings.hint_join_char);
    if let Some(mode) = settings.hint_match_mode {
        block = block.add_attribute(("hint_match_mode", mode.to_string()));
    }
    block.build()
}

fn token_block(token: &Token) -> Block {
    let mut block = Block::builder("token").add_label(token.name.as_str());
    if let Some(source) = token.source {
        block = block.add_attribute(("source", source.to_string()));
    }
    block = optional(block, "parameter", &token.parameter);
    block = optional(block, "context", &token.context);
    block = optional(block, "arg", &token.arg);
    block = list(block, "stack_matches", &token.stack_matches);
    block = optional(block, "pattern", &token.pattern);
    block = optional(block, "replace", &token.replace);
    block = list(block, "transforms", &token.transforms);
    if !token.field_transforms.is_empty() {
        let fields: Object<ObjectKey, Expression> = token
            .field_transforms
            .iter()
            .map(|(field, names)| {
                let key = ObjectKey::Expression(Expression::String(field.clone()));
                (key, strings(names))
            })
            .collect();
        block = block.add_attribute(("field_transforms", Expression::Object(fields)));
    }
    block.build()
}

fn step_block(step: &TransformStep) -> Block {
    let block = Block::builder("step").add_label(step.kind.as_str());
    let block = optional(block, "value", &step.value);
    let block = optional(block, "regex", &step.regex);
    let mut block = optional(block, "with", &step.with);
    if step.recurse {
        block = block.add_attribute(("recurse", true));
    }
    block.build()
}

fn optional(block: BlockBuilder, key: &str, value: &Option<String>) -> BlockBuilder {
    match value {
        Some(value) => block.add_attribute((key, value.as_str())),
        None => block,
    }
}

fn list(block: BlockBuilder, key: &str, values: &[String]) -> BlockBuilder {
    if values.is_empty() {
        block
    } else {
        block.add_attribute((key, strings(values)))
    }
}

fn strings(values: &[String]) -> Expression {
    Expression::Array(values.iter().cloned().map(Expression::String).collect())
}
