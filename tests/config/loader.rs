use pretty_assertions::assert_eq;
use smarterr::config::{load_config, load_file};
use smarterr::traits::MemFs;
use smarterr::types::{
    HintMatchMode, StepKind, TokenErrorMode, TokenSource, TransformStep,
};
use smarterr::SmarterrError;

const FULL: &str = r#"
smarterr {
  debug            = true
  token_error_mode = "detailed"
  hint_join_char   = " | "
  hint_match_mode  = "first"
}

parameter "service" {
  value = "CloudWatch"
}

token "happening" {
  source        = "call_stack"
  stack_matches = ["create", "read"]
}

token "diag" {
  source = "diagnostic"
  field_transforms = {
    summary = ["clean"]
    detail  = ["clean", "shout"]
  }
}

hint "kms" {
  error_contains = "KMS"
  suggestion     = "check KMS"
}

stack_match "create" {
  called_from = "resource[a-zA-Z0-9]*Create"
  display     = "creating"
}

template "error_summary" {
  format = "{{.happening}} {{.service}}: {{.error}}"
}

template "error_detail" {
  format = <<-EOT
    {{.error}}
      indented
    EOT
}

transform "clean" {
  step "remove" {
    regex = "RequestID: [a-z0-9-]+,"
  }
  step "strip_suffix" {
    value   = ","
    recurse = true
  }
}
"#;

#[test]
fn loads_every_block_type() {
    let config = load_config(FULL.as_bytes(), "smarterr.hcl").unwrap();

    assert_eq!(config.settings.debug, Some(true));
    assert_eq!(
        config.settings.token_error_mode,
        Some(TokenErrorMode::Detailed)
    );
    assert_eq!(config.settings.hint_join_char(), " | ");
    assert_eq!(config.settings.hint_match_mode(), HintMatchMode::First);

    assert_eq!(config.parameter("service").unwrap().value, "CloudWatch");

    let happening = config.token("happening").unwrap();
    assert_eq!(happening.source, Some(TokenSource::CallStack));
    assert_eq!(happening.stack_matches, vec!["create", "read"]);

    let diag = config.token("diag").unwrap();
    assert_eq!(diag.field_transforms["detail"], vec!["clean", "shout"]);

    assert_eq!(
        config.hint("kms").unwrap().error_contains.as_deref(),
        Some("KMS")
    );
    assert_eq!(config.stack_match("create").unwrap().display, "creating");
    assert_eq!(
        config.template("error_summary").unwrap().format,
        "{{.happening}} {{.service}}: {{.error}}"
    );

    let clean = config.transform("clean").unwrap();
    assert_eq!(
        clean.steps,
        vec![
            TransformStep::new(StepKind::Remove).regex("RequestID: [a-z0-9-]+,"),
            TransformStep::new(StepKind::StripSuffix)
                .value(",")
                .recurse(true),
        ]
    );
}

#[test]
fn indented_heredoc_is_stripped() {
    let config = load_config(FULL.as_bytes(), "smarterr.hcl").unwrap();
    assert_eq!(
        config.template("error_detail").unwrap().format,
        "{{.error}}\n  indented\n"
    );
}

#[test]
fn unknown_step_type_is_kept_for_the_engine() {
    let config = load_config(
        br#"transform "t" {
  step "reverse" {}
}"#,
        "smarterr.hcl",
    )
    .unwrap();
    assert_eq!(
        config.transforms[0].steps[0].kind,
        StepKind::Unknown("reverse".into())
    );
}

#[test]
fn empty_file_is_an_empty_config() {
    assert!(load_config(b"", "smarterr.hcl").unwrap().is_empty());
}

#[test]
fn unknown_attribute_fails_the_load() {
    let err = load_config(
        br#"hint "h" {
  suggestion = "s"
  colour     = "red"
}"#,
        "a/smarterr.hcl",
    )
    .unwrap_err();
    match err {
        SmarterrError::ConfigLoad { path, message } => {
            assert_eq!(path, "a/smarterr.hcl");
            assert!(message.contains("colour"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unknown_block_fails_the_load() {
    assert!(load_config(br#"widget "w" {}"#, "smarterr.hcl").is_err());
}

#[test]
fn missing_label_fails_the_load() {
    assert!(load_config(br#"parameter { value = "x" }"#, "smarterr.hcl").is_err());
}

#[test]
fn unsupported_enum_value_fails_the_load() {
    let err = load_config(
        br#"smarterr {
  token_error_mode = "loud"
}"#,
        "smarterr.hcl",
    )
    .unwrap_err();
    assert!(err.to_string().contains("loud"));
}

#[test]
fn wrong_value_type_fails_the_load() {
    assert!(load_config(
        br#"smarterr {
  debug = "yes"
}"#,
        "smarterr.hcl"
    )
    .is_err());
}

#[test]
fn syntax_error_names_the_file() {
    let err = load_config(b"token \"t\" {", "internal/x/smarterr.hcl").unwrap_err();
    assert!(err.to_string().starts_with("internal/x/smarterr.hcl: "));
}

#[test]
fn load_file_reports_missing_files() {
    let err = load_file(&MemFs::new(), "nowhere/smarterr.hcl").unwrap_err();
    assert_eq!(err.class(), "config load");
}
