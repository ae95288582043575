use pretty_assertions::assert_eq;
use smarterr::traits::ErrorSink;
use smarterr::types::{Diagnostic, Diagnostics, Severity};

#[test]
fn severity_labels() {
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
    assert_eq!(Diagnostic::default().severity, Severity::Error);
}

#[test]
fn diagnostics_are_an_error_sink() {
    let mut diags = Diagnostics::new();
    diags.push(Diagnostic::info("a", "b"));
    assert!(ErrorSink::contains(&diags, &Diagnostic::info("a", "b")));
    assert!(!ErrorSink::contains(&diags, &Diagnostic::error("a", "b")));
}
