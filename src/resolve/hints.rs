use crate::runtime::RuntimeEnvelope;
use crate::types::{HintMatchMode, Hint};

/// Collects the suggestions of every hint matching `text`, in declaration
/// order, joined with the configured join string.
///
/// With `hint_match_mode = "first"` only the first hit is returned. A hint
/// with a bad regex never matches.
pub fn suggestions(env: &mut RuntimeEnvelope<'_>, text: &str) -> String {
    let config = env.config;
    let mode = config.settings.hint_match_mode();
    let mut hits: Vec<&str> = Vec::new();
    for hint in &config.hints {
        if matches(env, hint, text) {
            hits.push(&hint.suggestion);
            if mode == HintMatchMode::First {
                break;
            }
        }
    }
    hits.join(config.settings.hint_join_char())
}

fn matches(env: &mut RuntimeEnvelope<'_>, hint: &Hint, text: &str) -> bool {
    if hint.error_contains.is_none() && hint.regex_match.is_none() {
        return false;
    }
    if let Some(needle) = &hint.error_contains {
        if !text.contains(needle.as_str()) {
            return false;
        }
    }
    match &hint.regex_match {
        Some(pattern) => env
            .regex(&format!("hint {:?}", hint.name), pattern)
            .is_some_and(|regex| regex.is_match(text)),
        None => true,
    }
}
