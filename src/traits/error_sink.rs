use crate::types::{Diagnostic, Diagnostics};

/// A host diagnostics collection that the entry points mutate in place.
///
/// Implementors only need to store a diagnostic and answer whether an equal
/// one is already present; the latter drives enrichment de-duplication.
pub trait ErrorSink {
    /// Stores one diagnostic.
    fn push(&mut self, diagnostic: Diagnostic);

    /// Returns true if an equal diagnostic is already stored.
    fn contains(&self, diagnostic: &Diagnostic) -> bool;

    /// Stores an error-severity diagnostic.
    fn add_error(&mut self, summary: String, detail: String) {
        self.push(Diagnostic::error(summary, detail));
    }
}

impl ErrorSink for Diagnostics {
    #[inline]
    fn push(&mut self, diagnostic: Diagnostic) {
        Vec::push(self, diagnostic);
    }

    #[inline]
    fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.as_slice().contains(diagnostic)
    }
}
