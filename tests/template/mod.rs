use crate::common::envelope;
use pretty_assertions::assert_eq;
use smarterr::context::Context;
use smarterr::template::{render_template, ParsedTemplate};
use smarterr::types::{Config, Settings, Template, TokenErrorMode, TokenValue, TokenValues};

fn values(pairs: &[(&str, &str)]) -> TokenValues {
    pairs.iter().map(|(k, v)| (k.to_string(), TokenValue::from(*v))).collect()
}

#[test]
fn missing_or_empty_template_is_skipped() {
    let config = Config::new().with_template(Template::new("error_detail", ""));
    let context = Context::new();
    let env = envelope(&config, &context);
    let mut vals = TokenValues::new();
    assert!(render_template(&env, "error_summary", &mut vals).is_none());
    assert!(render_template(&env, "error_detail", &mut vals).is_none());
}

#[test]
fn undeclared_variables_get_the_fallback() {
    let config = Config::new()
        .with_settings(Settings {
            token_error_mode: Some(TokenErrorMode::Detailed),
            ..Default::default()
        })
        .with_template(Template::new(
            "error_summary",
            "{{.happening}} {{.service}} ({{.id}})",
        ));
    let context = Context::new();
    let env = envelope(&config, &context);
    let mut vals = values(&[("happening", "creating"), ("service", "S3")]);
    let rendered = render_template(&env, "error_summary", &mut vals)
        .unwrap()
        .unwrap();
    assert_eq!(
        rendered,
        "creating S3 ([unresolved token: id] (token is not declared))"
    );
}

#[test]
fn undeclared_structured_variable_renders_every_field() {
    let config = Config::new()
        .with_settings(Settings {
            token_error_mode: Some(TokenErrorMode::Placeholder),
            ..Default::default()
        })
        .with_template(Template::new(
            "diagnostic_summary",
            "{{.diag.summary}}/{{.diag.severity}}",
        ));
    let context = Context::new();
    let env = envelope(&config, &context);
    let mut vals = TokenValues::new();
    let rendered = render_template(&env, "diagnostic_summary", &mut vals)
        .unwrap()
        .unwrap();
    assert_eq!(rendered, "diag/diag");
}

#[test]
fn parse_failure_is_a_template_error() {
    let config = Config::new().with_template(Template::new("error_summary", "{{.service"));
    let context = Context::new();
    let env = envelope(&config, &context);
    let err = render_template(&env, "error_summary", &mut TokenValues::new())
        .unwrap()
        .unwrap_err();
    let prefix = "[smarterr error_summary template error: ";
    assert!(err.annotation().starts_with(prefix));
}

#[test]
fn trim_markers_and_comments() {
    let template = ParsedTemplate::parse(
        "error_detail",
        "{{/* leading note */}}{{.error}}\n\n  {{- if .hints}}\nHint: {{.hints}}{{end}}",
    )
    .unwrap();
    assert_eq!(
        template.render(&values(&[("error", "boom"), ("hints", "")])).unwrap(),
        "boom"
    );
    assert_eq!(
        template.render(&values(&[("error", "boom"), ("hints", "retry")])).unwrap(),
        "boom\nHint: retry"
    );
}

#[test]
fn else_branch() {
    let template = ParsedTemplate::parse("t", "{{if .id}}id {{.id}}{{else}}no id{{end}}").unwrap();
    assert_eq!(template.render(&values(&[("id", "")])).unwrap(), "no id");
    assert_eq!(
        template.render(&values(&[("id", "r-1")])).unwrap(),
        "id r-1"
    );
}
