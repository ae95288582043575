use crate::error::SmarterrError;
use regex::Regex;
use std::collections::HashMap;

/// Compiles each pattern at most once per call.
///
/// Failures are memoized too, so a bad pattern referenced by several hints
/// or frames is reported once.
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: HashMap<String, Result<Regex, SmarterrError>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled pattern and whether this lookup compiled it.
    pub fn compile(&mut self, pattern: &str) -> (Result<Regex, SmarterrError>, bool) {
        if let Some(cached) = self.compiled.get(pattern) {
            return (cached.clone(), false);
        }
        let result =
            Regex::new(pattern).map_err(|err| SmarterrError::regex(pattern, describe(&err)));
        self.compiled.insert(pattern.to_string(), result.clone());
        (result, true)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// The last line of a (possibly multi-line) regex error.
fn describe(err: &regex::Error) -> String {
    let text = err.to_string();
    let line = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or(text.as_str());
    line.trim().trim_start_matches("error: ").to_string()
}
