//! Token resolution.
//!
//! Every token declared in the effective config is resolved once per call,
//! in declaration order, from its source. Tokens that cannot be resolved get
//! the fallback chosen by `token_error_mode`; transforms only apply to values
//! that actually resolved.
//!
//! # Examples
//!
//! ```
//! use smarterr::context::Context;
//! use smarterr::debug::DebugOutput;
//! use smarterr::resolve::resolve_tokens;
//! use smarterr::runtime::RuntimeEnvelope;
//! use smarterr::types::{Config, Parameter, Token, TokenValue};
//!
//! let mut service = Token::new("service");
//! service.parameter = Some("service".into());
//! let config = Config::new()
//!     .with_parameter(Parameter::new("service", "CloudWatch"))
//!     .with_token(service);
//!
//! let context = Context::new();
//! let mut env = RuntimeEnvelope::new(&config, &context, DebugOutput::new().trace("1"));
//! let values = resolve_tokens(&mut env);
//! assert_eq!(values["service"], TokenValue::from("CloudWatch"));
//! ```

pub mod hints;
pub mod regex_cache;
pub mod stack_match;
pub mod transform;

pub use regex_cache::RegexCache;

use crate::runtime::RuntimeEnvelope;
use crate::types::{StructuredValue, Token, TokenSource, TokenValue, TokenValues};

/// Resolves every configured token.
pub fn resolve_tokens(env: &mut RuntimeEnvelope<'_>) -> TokenValues {
    let config = env.config;
    let mut values = TokenValues::new();
    for token in &config.tokens {
        let value = resolve_token(env, token);
        values.insert(token.name.clone(), value);
    }
    values
}

/// Resolves a single token, fallback and transforms included.
pub fn resolve_token(env: &mut RuntimeEnvelope<'_>, token: &Token) -> TokenValue {
    let source = token.effective_source();
    if source == TokenSource::Diagnostic {
        return resolve_diagnostic(env, token);
    }
    match resolve_text(env, token, source) {
        Ok(raw) => {
            let owner = format!("token {:?}", token.name);
            TokenValue::Text(transform::apply_named(env, &owner, &token.transforms, raw))
        }
        Err(reason) => {
            env.trace.log(format_args!("unresolved token {:?}: {reason}", token.name));
            TokenValue::Text(env.fallback(&token.name, &reason))
        }
    }
}

/// Raw text for a token, or the reason it has none.
fn resolve_text(
    env: &mut RuntimeEnvelope<'_>,
    token: &Token,
    source: TokenSource,
) -> Result<String, String> {
    match source {
        TokenSource::Parameter => {
            let key = token.parameter_key();
            env.config
                .parameter(key)
                .map(|p| p.value.clone())
                .ok_or_else(|| format!("parameter {key:?} is not defined"))
        }
        TokenSource::Context => {
            let key = token.context_key();
            env.context
                .value(key)
                .map(ToString::to_string)
                .ok_or_else(|| format!("context value {key:?} is not set"))
        }
        TokenSource::Arg => {
            let key = token.arg_key();
            env.args
                .get(key)
                .filter(|value| !value.is_null())
                .map(ToString::to_string)
                .ok_or_else(|| format!("arg {key:?} was not supplied"))
        }
        TokenSource::CallStack => {
            let frames = std::mem::take(&mut env.frames);
            let hit = stack_match::resolve(env, token, &frames);
            env.frames = frames;
            hit.ok_or_else(|| "no stack match".to_string())
        }
        TokenSource::ErrorStack => match env.error_frames.take() {
            Some(frames) => {
                let hit = stack_match::resolve(env, token, &frames);
                env.error_frames = Some(frames);
                hit.ok_or_else(|| "no stack match in error stack".to_string())
            }
            None => Err("error carries no stack".to_string()),
        },
        TokenSource::Error => env.error_text.clone().ok_or_else(|| "no error".to_string()),
        TokenSource::Hints => {
            let text = env.hint_text().unwrap_or_default();
            Ok(hints::suggestions(env, &text))
        }
        TokenSource::Diagnostic => Err("diagnostic token resolved as text".to_string()),
    }
}

fn resolve_diagnostic(env: &mut RuntimeEnvelope<'_>, token: &Token) -> TokenValue {
    let Some(diag) = env.diagnostic.as_ref() else {
        env.trace.log(format_args!(
            "unresolved token {:?}: no incoming diagnostic",
            token.name
        ));
        let fallback = env.fallback(&token.name, "no incoming diagnostic");
        return TokenValue::Structured(StructuredValue::uniform(&fallback));
    };
    let mut value = StructuredValue::from(diag);
    for (field, names) in &token.field_transforms {
        let owner = format!("token {:?} field {field:?}", token.name);
        let Some(slot) = value.field_mut(field) else {
            env.note(format!("{owner}: diagnostics have no such field"));
            continue;
        };
        let raw = std::mem::take(slot);
        let transformed = transform::apply_named(env, &owner, names, raw);
        if let Some(slot) = value.field_mut(field) {
            *slot = transformed;
        }
    }
    TokenValue::Structured(value)
}
