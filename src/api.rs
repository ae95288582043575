//! Entry points.
//!
//! Every entry point appends exactly one diagnostic per reported error (or
//! per distinct enriched diagnostic), whatever goes wrong inside. Failures
//! fall back to the original text with a bracketed `[smarterr ...]`
//! annotation; a panic while reading the error or rendering it is caught
//! and reported the same way. Log templates are emitted after the diagnostic
//! was appended, and a panicking error or log sink never escapes the call.

use crate::context::Context;
use crate::debug::DebugTrace;
use crate::environment::Environment;
use crate::error::SmarterrError;
use crate::global;
use crate::resolve::resolve_tokens;
use crate::runtime::RuntimeEnvelope;
use crate::stack;
use crate::template::render_template;
use crate::traits::{ErrorSink, FileSystem, LogFields, LogLevel};
use crate::types::template_names::{
    DIAGNOSTIC_DETAIL, DIAGNOSTIC_SUMMARY, ERROR_DETAIL, ERROR_SUMMARY, LOG_ERROR, LOG_INFO,
    LOG_WARN,
};
use crate::types::{CallStack, Diagnostic, Diagnostics, TokenValues, TracedError, Value};
use std::any::Any;
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};

/// Words of the original error kept as a last-resort summary.
pub const FALLBACK_SUMMARY_WORDS: usize = 3;

/// Summary used when the original error has no text at all.
pub const SUMMARY_PLACEHOLDER: &str = "unknown error";

const LOG_TEMPLATES: [(LogLevel, &str); 3] =
    [(LogLevel::Error, LOG_ERROR), (LogLevel::Warn, LOG_WARN), (LogLevel::Info, LOG_INFO)];

/// The first `count` words of `text`, or the placeholder when it has none.
pub fn first_words(text: &str, count: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().take(count).collect();
    if words.is_empty() {
        SUMMARY_PLACEHOLDER.to_string()
    } else {
        words.join(" ")
    }
}

fn annotate(detail: &mut String, err: &SmarterrError) {
    if !detail.is_empty() {
        detail.push_str("\n\n");
    }
    detail.push_str(&err.annotation());
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs `f`, turning a panic into [`SmarterrError::Panic`].
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, SmarterrError> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| SmarterrError::Panic(panic_message(&*payload)))
}

/// A rendered diagnostic plus the log events to emit once it is stored.
struct Outcome {
    diagnostic: Diagnostic,
    logs: Vec<(LogLevel, String)>,
    fields: LogFields,
}

impl Outcome {
    fn bare(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic,
            logs: Vec::new(),
            fields: LogFields::new(),
        }
    }
}

/// What is being reported.
enum Subject<'e> {
    Error {
        text: String,
        frames: Option<CallStack>,
    },
    Diagnostic(&'e Diagnostic),
}

impl Subject<'_> {
    /// Reads the text and traced frames of `err`. Fails when its `Display`
    /// (or `source` chain) panics.
    fn from_error(err: &(dyn StdError + 'static)) -> Result<Self, SmarterrError> {
        guarded(|| Subject::Error {
            text: err.to_string(),
            frames: TracedError::find(err).map(|traced| traced.frames().to_vec()),
        })
    }

    /// The diagnostic appended when nothing can be rendered.
    fn fallback(&self, failure: &SmarterrError) -> Diagnostic {
        match self {
            Subject::Error { text, .. } => {
                let mut detail = text.clone();
                annotate(&mut detail, failure);
                Diagnostic::error(first_words(text, FALLBACK_SUMMARY_WORDS), detail)
            }
            Subject::Diagnostic(diag) => {
                let mut fallback = (*diag).clone();
                annotate(&mut fallback.detail, failure);
                fallback
            }
        }
    }
}

impl Environment {
    /// Renders `err` and returns `diags` with one diagnostic appended.
    ///
    /// `args` is a flat list of alternating keys and values, see
    /// [`kv!`](crate::kv).
    pub fn append_error(
        &self,
        ctx: &Context,
        mut diags: Diagnostics,
        err: &(dyn StdError + 'static),
        args: &[Value],
    ) -> Diagnostics {
        self.add_error(ctx, &mut diags, err, args);
        diags
    }

    /// Renders `err` into a host-owned collection.
    pub fn add_error<S: ErrorSink + ?Sized>(
        &self,
        ctx: &Context,
        sink: &mut S,
        err: &(dyn StdError + 'static),
        args: &[Value],
    ) {
        let ctx = with_correlation_id(ctx);
        let outcome = match Subject::from_error(err) {
            Ok(subject) => self.report(&ctx, &subject, args),
            Err(failure) => {
                tracing::error!(
                    correlation_id = ctx.correlation_id(),
                    error = %failure,
                    "smarterr could not read the error text"
                );
                let unreadable = Subject::Error {
                    text: String::new(),
                    frames: None,
                };
                Outcome::bare(unreadable.fallback(&failure))
            }
        };
        if let Err(failure) = guarded(|| sink.push(outcome.diagnostic.clone())) {
            tracing::error!(
                correlation_id = ctx.correlation_id(),
                error = %failure,
                "error sink panicked"
            );
            return;
        }
        self.emit_logs(&ctx, &outcome);
    }

    /// Copies `incoming` into `diags`, replacing each summary and detail
    /// with the configured diagnostic templates. Severity is kept.
    ///
    /// A diagnostic equal to one already in `diags` is skipped, both before
    /// and after enrichment.
    pub fn enrich_append(
        &self,
        ctx: &Context,
        mut diags: Diagnostics,
        incoming: &[Diagnostic],
        args: &[Value],
    ) -> Diagnostics {
        let ctx = with_correlation_id(ctx);
        for diag in incoming {
            if ErrorSink::contains(&diags, diag) {
                continue;
            }
            let outcome = self.report(&ctx, &Subject::Diagnostic(diag), args);
            if ErrorSink::contains(&diags, &outcome.diagnostic) {
                continue;
            }
            diags.push(outcome.diagnostic.clone());
            self.emit_logs(&ctx, &outcome);
        }
        diags
    }

    fn report(&self, ctx: &Context, subject: &Subject<'_>, args: &[Value]) -> Outcome {
        let trace = self
            .debug_output()
            .trace(ctx.correlation_id().unwrap_or_default());
        let Some(fs) = self.filesystem() else {
            trace.log(format_args!("no filesystem configured"));
            return Outcome::bare(subject.fallback(&SmarterrError::Initialization));
        };
        let render = || self.render(fs.as_ref(), ctx, subject, args, trace.clone());
        match guarded(render) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                trace.log(format_args!("{err}"));
                tracing::warn!(
                    correlation_id = ctx.correlation_id(),
                    error = %err,
                    "smarterr fallback"
                );
                Outcome::bare(subject.fallback(&err))
            }
            Err(err) => {
                trace.log(format_args!("recovered {}", err.annotation()));
                tracing::error!(
                    correlation_id = ctx.correlation_id(),
                    error = %err,
                    "smarterr recovered a panic"
                );
                Outcome::bare(subject.fallback(&err))
            }
        }
    }

    fn render(
        &self,
        fs: &dyn FileSystem,
        ctx: &Context,
        subject: &Subject<'_>,
        args: &[Value],
        trace: DebugTrace,
    ) -> Result<Outcome, SmarterrError> {
        let frames = match ctx.frames() {
            Some(frames) => frames.to_vec(),
            None => stack::capture(),
        };
        let paths = stack::stack_paths(&frames, self.base_dir());
        let effective = self.effective_config(fs, &paths)?;

        let mut env = RuntimeEnvelope::new(&effective.config, ctx, trace).with_frames(frames);
        env.trace.log(format_args!(
            "stack paths {paths:?}, configs {:?}",
            effective.sources
        ));
        env = match subject {
            Subject::Error { text, frames } => {
                env.with_error_text(text.clone())
                    .with_error_frames(frames.clone())
            }
            Subject::Diagnostic(diag) => env.with_diagnostic((*diag).clone()),
        };
        let mut env = env.with_args(args);

        let mut values = resolve_tokens(&mut env);
        let mut failures = Vec::new();
        let diagnostic = match subject {
            Subject::Error { text, .. } => {
                let summary = match render_template(&env, ERROR_SUMMARY, &mut values) {
                    None => text.clone(),
                    Some(Ok(summary)) => summary,
                    Some(Err(err)) => {
                        failures.push(err);
                        first_words(text, FALLBACK_SUMMARY_WORDS)
                    }
                };
                let detail = render_or(&env, ERROR_DETAIL, &mut values, text, &mut failures);
                Diagnostic::error(summary, detail)
            }
            Subject::Diagnostic(diag) => {
                let summary = render_or(
                    &env,
                    DIAGNOSTIC_SUMMARY,
                    &mut values,
                    &diag.summary,
                    &mut failures,
                );
                let detail = render_or(
                    &env,
                    DIAGNOSTIC_DETAIL,
                    &mut values,
                    &diag.detail,
                    &mut failures,
                );
                Diagnostic::new(diag.severity, summary, detail)
            }
        };

        let mut logs = Vec::new();
        for (level, name) in LOG_TEMPLATES {
            match render_template(&env, name, &mut values) {
                Some(Ok(message)) if !message.is_empty() => logs.push((level, message)),
                Some(Err(err)) => env.note(err.annotation()),
                _ => {}
            }
        }

        let mut diagnostic = diagnostic;
        for failure in &failures {
            env.trace.log(format_args!("{failure}"));
            annotate(&mut diagnostic.detail, failure);
        }
        env.append_notes(&mut diagnostic.detail);

        let mut fields: LogFields = env
            .args
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(id) = ctx.correlation_id() {
            fields.insert("correlation_id".to_string(), id.to_string());
        }
        Ok(Outcome {
            diagnostic,
            logs,
            fields,
        })
    }

    /// Sends the rendered log events. A panicking sink loses only its own
    /// event; the diagnostic is already stored.
    fn emit_logs(&self, ctx: &Context, outcome: &Outcome) {
        let sink = self.log_sink();
        for (level, message) in &outcome.logs {
            let sent = guarded(|| sink.log(*level, ctx, message, &outcome.fields));
            if let Err(failure) = sent {
                tracing::error!(
                    correlation_id = ctx.correlation_id(),
                    error = %failure,
                    "log sink panicked"
                );
            }
        }
    }
}

/// Renders `name`, keeping `original` when the template is absent and
/// recording a failure when it does not render.
fn render_or(
    env: &RuntimeEnvelope<'_>,
    name: &str,
    values: &mut TokenValues,
    original: &str,
    failures: &mut Vec<SmarterrError>,
) -> String {
    match render_template(env, name, values) {
        None => original.to_string(),
        Some(Ok(text)) => text,
        Some(Err(err)) => {
            failures.push(err);
            original.to_string()
        }
    }
}

fn with_correlation_id(ctx: &Context) -> Context {
    match ctx.correlation_id() {
        Some(_) => ctx.clone(),
        None => ctx
            .clone()
            .with_correlation_id(global::next_correlation_id()),
    }
}

/// [`Environment::append_error`] on the process-wide environment.
pub fn append_error(
    ctx: &Context,
    diags: Diagnostics,
    err: &(dyn StdError + 'static),
    args: &[Value],
) -> Diagnostics {
    global::environment().append_error(ctx, diags, err, args)
}

/// [`Environment::add_error`] on the process-wide environment.
pub fn add_error<S: ErrorSink + ?Sized>(
    ctx: &Context,
    sink: &mut S,
    err: &(dyn StdError + 'static),
    args: &[Value],
) {
    global::environment().add_error(ctx, sink, err, args);
}

/// [`Environment::enrich_append`] on the process-wide environment.
pub fn enrich_append(
    ctx: &Context,
    diags: Diagnostics,
    incoming: &[Diagnostic],
    args: &[Value],
) -> Diagnostics {
    global::environment().enrich_append(ctx, diags, incoming, args)
}
