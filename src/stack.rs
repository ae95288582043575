//! Call-stack capture.
//!
//! Frames come from [`std::backtrace::Backtrace`], innermost first, with the
//! formatter's own frames (and the std machinery between them and the
//! caller) skipped. The file of each remaining frame is mapped to a path
//! relative to the configured base directory; frames outside the base are
//! kept for stack matching but contribute no stack path.

use crate::traits::filesystem::normalize;
use crate::types::{CallFrame, CallStack};
use std::backtrace::Backtrace;

/// Function-name prefixes of frames that belong to the capture itself.
const INTERNAL_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "__rust",
    "rust_begin_unwind",
    "smarterr::stack::",
    "smarterr::api::",
    "smarterr::environment::",
    "smarterr::global::",
    "smarterr::types::traced_error::",
];

/// Captures the caller's stack, innermost first.
pub fn capture() -> CallStack {
    let trace = Backtrace::force_capture();
    skip_internal(parse_backtrace(&trace.to_string()))
}

/// Parses the text form of a backtrace.
///
/// Each frame starts with a `N: function` line and may be followed by an
/// `at file:line:column` line. Frames without a location keep an empty file.
pub fn parse_backtrace(text: &str) -> CallStack {
    let mut frames = CallStack::new();
    for line in text.lines().map(str::trim) {
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                let (file, line_no) = split_location(location);
                frame.file = file;
                frame.line = line_no;
            }
            continue;
        }
        let Some((index, function)) = line.split_once(": ") else {
            continue;
        };
        if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
            frames.push(CallFrame::new(strip_hash(function.trim()), ""));
        }
    }
    frames
}

fn split_location(location: &str) -> (String, Option<u32>) {
    let mut parts = location.rsplitn(3, ':');
    let last = parts.next();
    let middle = parts.next();
    let rest = parts.next();
    match (rest, middle, last) {
        (Some(file), Some(line), Some(_col)) if line.parse::<u32>().is_ok() => {
            (file.to_string(), line.parse().ok())
        }
        _ => match location.rsplit_once(':') {
            Some((file, line)) if line.parse::<u32>().is_ok() => {
                (file.to_string(), line.parse().ok())
            }
            _ => (location.to_string(), None),
        },
    }
}

/// Drops the `::h0123456789abcdef` suffix of legacy mangled names.
fn strip_hash(function: &str) -> String {
    match function.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => {
            head.to_string()
        }
        _ => function.to_string(),
    }
}

fn is_internal(function: &str) -> bool {
    let name = function.trim_start_matches('<');
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Removes the leading run of internal frames.
fn skip_internal(frames: CallStack) -> CallStack {
    let start = frames
        .iter()
        .position(|f| !is_internal(&f.function))
        .unwrap_or(frames.len());
    frames.into_iter().skip(start).collect()
}

/// Returns the tail of `file` starting at the `base_dir` component, or
/// `None` when the file does not live below the base.
///
/// An empty base matches every file with a known path.
pub fn relative_to_base(file: &str, base_dir: &str) -> Option<String> {
    let file = normalize(file);
    if file.is_empty() {
        return None;
    }
    let base = normalize(base_dir);
    if base.is_empty() {
        return Some(file);
    }
    let needle = format!("{base}/");
    if file.starts_with(&needle) {
        return Some(file);
    }
    file.find(&format!("/{needle}"))
        .map(|pos| file[pos + 1..].to_string())
}

/// Stack paths for discovery, in frame order.
pub fn stack_paths(frames: &[CallFrame], base_dir: &str) -> Vec<String> {
    frames
        .iter()
        .filter_map(|frame| relative_to_base(&frame.file, base_dir))
        .collect()
}
