//! Per-call state shared by resolution and rendering.

use crate::context::Context;
use crate::debug::DebugTrace;
use crate::resolve::RegexCache;
use crate::types::{Accumulator, Args, CallStack, Config, Diagnostic, TokenErrorMode, Value};
use regex::Regex;

/// Everything one entry-point call knows.
///
/// The envelope owns the internal-notes accumulator; whatever ends up there
/// is appended to the rendered detail under `[smarterr diagnostics]`.
#[derive(Debug)]
pub struct RuntimeEnvelope<'a> {
    pub config: &'a Config,
    pub context: &'a Context,
    /// Text of the reported error; `None` when enriching a diagnostic.
    pub error_text: Option<String>,
    /// Frames captured when a traced error was created.
    pub error_frames: Option<CallStack>,
    /// Frames of the reporting call, innermost first.
    pub frames: CallStack,
    pub args: Args,
    /// The incoming diagnostic being enriched.
    pub diagnostic: Option<Diagnostic>,
    pub trace: DebugTrace,
    notes: Accumulator<String>,
    regexes: RegexCache,
}

impl<'a> RuntimeEnvelope<'a> {
    pub fn new(config: &'a Config, context: &'a Context, trace: DebugTrace) -> Self {
        let mut trace = trace;
        if config.settings.debug() {
            trace.enable();
        }
        Self {
            config,
            context,
            error_text: None,
            error_frames: None,
            frames: Vec::new(),
            args: Args::default(),
            diagnostic: None,
            trace,
            notes: Accumulator::new(),
            regexes: RegexCache::new(),
        }
    }

    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = Some(text.into());
        self
    }

    pub fn with_error_frames(mut self, frames: Option<CallStack>) -> Self {
        self.error_frames = frames;
        self
    }

    pub fn with_frames(mut self, frames: CallStack) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }

    /// Parses the caller's key/value list, noting malformed input.
    pub fn with_args(mut self, items: &[Value]) -> Self {
        let before = self.notes.len();
        self.args = Args::parse(items, &mut self.notes);
        for note in self.notes.iter().skip(before) {
            self.trace.log(format_args!("{note}"));
        }
        self
    }

    /// Records an internal diagnostic (once per distinct message).
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.trace.log(format_args!("{message}"));
        self.notes.push_unique(message);
    }

    pub fn notes(&self) -> &Accumulator<String> {
        &self.notes
    }

    /// Compiles `pattern`; a bad pattern is noted under `owner` and yields `None`.
    pub fn regex(&mut self, owner: &str, pattern: &str) -> Option<Regex> {
        let (result, fresh) = self.regexes.compile(pattern);
        match result {
            Ok(regex) => Some(regex),
            Err(err) => {
                if fresh {
                    self.note(format!("{owner}: {}", err.annotation()));
                }
                None
            }
        }
    }

    pub fn token_error_mode(&self) -> TokenErrorMode {
        self.config.settings.token_error_mode()
    }

    /// The substitution used for a token that could not be resolved.
    pub fn fallback(&self, name: &str, reason: &str) -> String {
        fallback(self.token_error_mode(), name, reason)
    }

    /// Text the hint matcher inspects.
    pub fn hint_text(&self) -> Option<String> {
        match (&self.error_text, &self.diagnostic) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(diag)) => Some(diag.text()),
            (None, None) => None,
        }
    }

    /// Appends the notes section to `detail`, if there are notes.
    pub fn append_notes(&self, detail: &mut String) {
        self.notes.append_to(detail);
    }
}

/// Applies `mode` to an unresolved token.
pub fn fallback(mode: TokenErrorMode, name: &str, reason: &str) -> String {
    match mode {
        TokenErrorMode::Detailed => format!("[unresolved token: {name}] ({reason})"),
        TokenErrorMode::Placeholder => name.to_string(),
        TokenErrorMode::Empty => String::new(),
    }
}
