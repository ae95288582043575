use super::environment;
use crate::common::called_from;
use pretty_assertions::assert_eq;
use smarterr::kv;
use smarterr::types::{Diagnostic, Severity};

const FILE: &str = "/work/provider/internal/service/rds/instance.rs";

const ENRICH_CONFIG: &str = r#"
token "diag" {
  source = "diagnostic"
  field_transforms = {
    summary = ["no_period"]
  }
}

token "id" {
  arg = "id"
}

transform "no_period" {
  step "strip_suffix" {
    value = "."
  }
}

template "diagnostic_summary" {
  format = "RDS DB Instance ({{.id}}): {{.diag.summary}}"
}

template "diagnostic_detail" {
  format = "{{.diag.detail}}"
}
"#;

#[test]
fn equal_incoming_diagnostics_are_appended_once() {
    let env = environment(&[("internal/smarterr/smarterr.hcl", ENRICH_CONFIG)]);
    let ctx = called_from("f", FILE);
    let incoming = vec![
        Diagnostic::error("creation failed.", "quota"),
        Diagnostic::error("creation failed.", "quota"),
        Diagnostic::warning("engine deprecated.", "upgrade"),
    ];
    let diags = env.enrich_append(&ctx, Vec::new(), &incoming, &kv!["id", "db-1"]);
    assert_eq!(
        diags,
        vec![
            Diagnostic::error("RDS DB Instance (db-1): creation failed", "quota"),
            Diagnostic::new(
                Severity::Warning,
                "RDS DB Instance (db-1): engine deprecated",
                "upgrade"
            ),
        ]
    );
}

#[test]
fn already_present_diagnostics_are_skipped() {
    let env = environment(&[("internal/smarterr/smarterr.hcl", ENRICH_CONFIG)]);
    let ctx = called_from("f", FILE);
    let existing = vec![Diagnostic::error("RDS DB Instance (db-1): creation failed", "quota")];
    let incoming = vec![
        // enriches to the existing entry
        Diagnostic::error("creation failed.", "quota"),
        // equal to the existing entry before enrichment
        Diagnostic::error("RDS DB Instance (db-1): creation failed", "quota"),
    ];
    let diags = env.enrich_append(&ctx, existing.clone(), &incoming, &kv!["id", "db-1"]);
    assert_eq!(diags, existing);
}

#[test]
fn without_diagnostic_templates_the_incoming_is_kept() {
    let env = environment(&[("internal/smarterr/smarterr.hcl", "")]);
    let ctx = called_from("f", FILE);
    let incoming = vec![Diagnostic::info("note", "details")];
    let diags = env.enrich_append(&ctx, Vec::new(), &incoming, &kv![]);
    assert_eq!(diags, incoming);
}
