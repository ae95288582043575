//! Call-stack matching for `call_stack` and `error_stack` tokens.
//!
//! A token's stack matches are split into specificity groups (both
//! regexes, `called_after` only, `called_from` only, neither). Groups are
//! tried most specific first; within a group every frame is tried in order
//! against every match in declaration order, and the first hit wins.

use crate::runtime::RuntimeEnvelope;
use crate::testing;
use crate::types::{CallFrame, Specificity, StackMatch, Token};
use regex::Regex;

struct Compiled<'c> {
    stack_match: &'c StackMatch,
    called_from: Option<Regex>,
    called_after: Option<Regex>,
}

impl Compiled<'_> {
    fn is_match(&self, frames: &[CallFrame], index: usize) -> bool {
        let frame = &frames[index];
        testing::run_stack_match_hook(self.stack_match, frame);
        if let Some(regex) = &self.called_from {
            if !regex.is_match(&frame.function) {
                return false;
            }
        }
        if let Some(regex) = &self.called_after {
            match frames.get(index + 1) {
                Some(deeper) if regex.is_match(&deeper.function) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Returns the `display` text of the first satisfied stack match.
pub fn resolve(
    env: &mut RuntimeEnvelope<'_>,
    token: &Token,
    frames: &[CallFrame],
) -> Option<String> {
    let config = env.config;
    let owner = format!("token {:?}", token.name);
    let mut compiled = Vec::with_capacity(token.stack_matches.len());
    for name in &token.stack_matches {
        let Some(stack_match) = config.stack_match(name) else {
            env.note(format!("{owner}: stack_match {name:?} is not defined"));
            continue;
        };
        let label = format!("stack_match {name:?}");
        let called_from = compile(env, &label, stack_match.called_from.as_deref());
        let called_after = compile(env, &label, stack_match.called_after.as_deref());
        // a match whose regex failed to compile can never be satisfied
        if let (Some(called_from), Some(called_after)) = (called_from, called_after) {
            compiled.push(Compiled {
                stack_match,
                called_from,
                called_after,
            });
        }
    }

    for group in Specificity::ORDER {
        let members: Vec<&Compiled<'_>> =
            compiled
                .iter()
                .filter(|c| c.stack_match.specificity() == group)
                .collect();
        if members.is_empty() {
            continue;
        }
        for index in 0..frames.len() {
            if let Some(hit) = members.iter().find(|c| c.is_match(frames, index)) {
                env.trace.log(format_args!(
                    "{owner}: stack_match {:?} matched frame {}",
                    hit.stack_match.name, frames[index]
                ));
                return Some(hit.stack_match.display.clone());
            }
        }
    }
    None
}

/// `Some(None)` for an absent pattern, `None` for a pattern that failed.
fn compile(
    env: &mut RuntimeEnvelope<'_>,
    owner: &str,
    pattern: Option<&str>,
) -> Option<Option<Regex>> {
    match pattern {
        None => Some(None),
        Some(pattern) => env.regex(owner, pattern).map(Some),
    }
}
