use pretty_assertions::assert_eq;
use smarterr::traits::MemFs;
use smarterr::{kv, Context, Diagnostic, Environment};
use std::io;

const ROOT_CONFIG: &str = r#"
parameter "thing" {
  value = "thing"
}

token "thing" {
  parameter = "thing"
}

stack_match "create" {
  called_from = "resource_widget_create"
  display     = "creating"
}

stack_match "read" {
  called_from = "resource_widget_read"
  display     = "reading"
}

token "happening" {
  source        = "call_stack"
  stack_matches = ["create", "read"]
}

template "error_summary" {
  format = "{{.happening}} {{.thing}}"
}
"#;

/// Runs under the live stack: no explicit frames on the context.
#[inline(never)]
fn resource_widget_create(env: &Environment) -> Vec<Diagnostic> {
    env.append_error(
        &Context::new(),
        Vec::new(),
        &io::Error::other("quota reached"),
        &kv![],
    )
}

#[test]
fn live_stack_drives_discovery_and_call_stack_tokens() {
    let fs = MemFs::new()
        .with_file("tests/smarterr.hcl", ROOT_CONFIG)
        .with_file("tests/api/smarterr.hcl", r#"parameter "thing" { value = "widget" }"#)
        .with_file("tests/config/smarterr.hcl", r#"parameter "thing" { value = "sibling" }"#);
    let env = Environment::new().with_filesystem(fs, "tests");

    let diags = resource_widget_create(&env);
    assert_eq!(
        diags,
        vec![Diagnostic::error("creating widget", "quota reached")]
    );
}
