use crate::types::Diagnostic;
use std::collections::BTreeMap;
use std::fmt;

/// Structured value produced by `diagnostic` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredValue {
    pub summary: String,
    pub detail: String,
    pub severity: String,
}

impl StructuredValue {
    pub const FIELDS: [&'static str; 3] = ["summary", "detail", "severity"];

    /// Every field set to the same text; used for unresolved structured tokens.
    pub fn uniform(text: &str) -> Self {
        Self {
            summary: text.to_string(),
            detail: text.to_string(),
            severity: text.to_string(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "summary" => Some(&self.summary),
            "detail" => Some(&self.detail),
            "severity" => Some(&self.severity),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "summary" => Some(&mut self.summary),
            "detail" => Some(&mut self.detail),
            "severity" => Some(&mut self.severity),
            _ => None,
        }
    }
}

impl From<&Diagnostic> for StructuredValue {
    fn from(diag: &Diagnostic) -> Self {
        Self {
            summary: diag.summary.clone(),
            detail: diag.detail.clone(),
            severity: diag.severity.as_ref().to_string(),
        }
    }
}

/// The resolved value of one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    Text(String),
    Structured(StructuredValue),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            TokenValue::Structured(_) => None,
        }
    }

    /// Truthiness for `{{if}}`: non-empty text, or any non-empty field.
    pub fn is_truthy(&self) -> bool {
        match self {
            TokenValue::Text(text) => !text.is_empty(),
            TokenValue::Structured(value) => !value.summary.is_empty() || !value.detail.is_empty(),
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(text) => f.write_str(text),
            TokenValue::Structured(value) => write!(f, "{}: {}", value.summary, value.detail),
        }
    }
}

impl From<String> for TokenValue {
    fn from(text: String) -> Self {
        TokenValue::Text(text)
    }
}

impl From<&str> for TokenValue {
    fn from(text: &str) -> Self {
        TokenValue::Text(text.to_string())
    }
}

/// Token name to resolved value; the input of template rendering.
pub type TokenValues = BTreeMap<String, TokenValue>;
