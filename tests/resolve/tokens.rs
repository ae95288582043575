use crate::common::envelope;
use pretty_assertions::assert_eq;
use smarterr::context::Context;
use smarterr::kv;
use smarterr::resolve::resolve_tokens;
use smarterr::types::{
    Config, Diagnostic, Hint, Parameter, Settings, StepKind, StructuredValue, Token, TokenErrorMode,
    TokenSource, TokenValue, Transform, TransformStep,
};
use std::collections::BTreeMap;

fn mode(mode: TokenErrorMode) -> Settings {
    Settings {
        token_error_mode: Some(mode),
        ..Default::default()
    }
}

fn upper() -> Transform {
    Transform::new("upper", vec![TransformStep::new(StepKind::Upper)])
}

fn unresolvable() -> Config {
    let mut service = Token::new("service");
    service.parameter = Some("service".into());
    let mut region = Token::new("region");
    region.context = Some("region".into());
    let mut id = Token::new("id");
    id.arg = Some("id".into());
    Config::new()
        .with_token(service)
        .with_token(region)
        .with_token(id)
}

#[test]
fn placeholder_mode_uses_token_names() {
    let config = unresolvable().with_settings(mode(TokenErrorMode::Placeholder));
    let context = Context::new();
    let mut env = envelope(&config, &context);
    let values = resolve_tokens(&mut env);
    assert_eq!(values["service"], TokenValue::from("service"));
    assert_eq!(values["region"], TokenValue::from("region"));
    assert_eq!(values["id"], TokenValue::from("id"));
}

#[test]
fn detailed_mode_names_the_missing_datum() {
    let config = unresolvable().with_settings(mode(TokenErrorMode::Detailed));
    let context = Context::new();
    let mut env = envelope(&config, &context);
    let values = resolve_tokens(&mut env);
    assert_eq!(
        values["service"],
        TokenValue::from("[unresolved token: service] (parameter \"service\" is not defined)")
    );
    assert_eq!(
        values["region"],
        TokenValue::from("[unresolved token: region] (context value \"region\" is not set)")
    );
}

#[test]
fn null_argument_counts_as_missing() {
    let config = unresolvable().with_settings(mode(TokenErrorMode::Placeholder));
    let context = Context::new();
    let missing: Option<&str> = None;
    let mut env = envelope(&config, &context).with_args(&kv!["id", missing]);
    assert_eq!(resolve_tokens(&mut env)["id"], TokenValue::from("id"));
}

#[test]
fn every_source_resolves() {
    let config = unresolvable()
        .with_parameter(Parameter::new("service", "RDS"))
        .with_token(Token::new("error").with_source(TokenSource::Error))
        .with_token(Token::new("suggest").with_source(TokenSource::Hints))
        .with_hint(Hint {
            name: "throttle".into(),
            error_contains: Some("Throttling".into()),
            suggestion: "retry later".into(),
            ..Default::default()
        });
    let context = Context::new().with_value("region", "us-east-1");
    let mut env = envelope(&config, &context)
        .with_error_text("Throttling: rate exceeded")
        .with_args(&kv!["id", 42]);
    let values = resolve_tokens(&mut env);
    assert_eq!(values["service"], TokenValue::from("RDS"));
    assert_eq!(values["region"], TokenValue::from("us-east-1"));
    assert_eq!(values["id"], TokenValue::from("42"));
    assert_eq!(
        values["error"],
        TokenValue::from("Throttling: rate exceeded")
    );
    assert_eq!(values["suggest"], TokenValue::from("retry later"));
}

#[test]
fn transforms_skip_fallbacks() {
    let mut id = Token::new("id");
    id.arg = Some("id".into());
    id.transforms = vec!["upper".into()];
    let config = Config::new()
        .with_settings(mode(TokenErrorMode::Placeholder))
        .with_token(id)
        .with_transform(upper());
    let context = Context::new();
    let mut env = envelope(&config, &context);
    assert_eq!(resolve_tokens(&mut env)["id"], TokenValue::from("id"));

    let mut env = envelope(&config, &context).with_args(&kv!["id", "db-1"]);
    assert_eq!(resolve_tokens(&mut env)["id"], TokenValue::from("DB-1"));
}

#[test]
fn diagnostic_token_applies_field_transforms() {
    let mut diag = Token::new("diag").with_source(TokenSource::Diagnostic);
    diag.field_transforms = BTreeMap::from([
        ("summary".to_string(), vec!["upper".to_string()]),
        ("detail".to_string(), vec!["trim".to_string()]),
    ]);
    let config = Config::new()
        .with_token(diag)
        .with_transform(upper())
        .with_transform(Transform::new(
            "trim",
            vec![TransformStep::new(StepKind::TrimSpace)],
        ));
    let context = Context::new();
    let mut env = envelope(&config, &context)
        .with_diagnostic(Diagnostic::warning("plan drift", "  attribute changed  "));
    let values = resolve_tokens(&mut env);
    assert_eq!(
        values["diag"],
        TokenValue::Structured(StructuredValue {
            summary: "PLAN DRIFT".into(),
            detail: "attribute changed".into(),
            severity: "warning".into(),
        })
    );
}

#[test]
fn diagnostic_token_without_incoming_is_uniform() {
    let config = Config::new()
        .with_settings(mode(TokenErrorMode::Placeholder))
        .with_token(Token::new("diag").with_source(TokenSource::Diagnostic));
    let context = Context::new();
    let mut env = envelope(&config, &context).with_error_text("boom");
    let values = resolve_tokens(&mut env);
    assert_eq!(
        values["diag"],
        TokenValue::Structured(StructuredValue::uniform("diag"))
    );
}

#[test]
fn unknown_field_transform_is_noted() {
    let mut diag = Token::new("diag").with_source(TokenSource::Diagnostic);
    diag.field_transforms = BTreeMap::from([("code".to_string(), vec!["upper".to_string()])]);
    let config = Config::new().with_token(diag);
    let context = Context::new();
    let mut env = envelope(&config, &context).with_diagnostic(Diagnostic::error("s", "d"));
    resolve_tokens(&mut env);
    assert_eq!(env.notes().len(), 1);
}
