use strum::{AsRefStr, Display, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity of a host-facing diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

/// A summary/detail pair as the host displays it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    #[inline]
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    #[inline]
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Error, summary, detail)
    }

    #[inline]
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Warning, summary, detail)
    }

    #[inline]
    pub fn info(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, summary, detail)
    }

    /// Summary and detail joined by a newline, as seen by the hint matcher
    /// when enriching a diagnostic.
    pub fn text(&self) -> String {
        match (self.summary.is_empty(), self.detail.is_empty()) {
            (false, false) => format!("{}\n{}", self.summary, self.detail),
            (false, true) => self.summary.clone(),
            (true, _) => self.detail.clone(),
        }
    }
}

/// The append-by-value host collection.
pub type Diagnostics = Vec<Diagnostic>;
