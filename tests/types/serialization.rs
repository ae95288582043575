use pretty_assertions::assert_eq;
use smarterr::config::load_config;
use smarterr::types::{Config, Diagnostic};

#[test]
fn diagnostic_serializes_with_lowercase_severity() {
    let json = serde_json::to_value(Diagnostic::warning("drift", "tags")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"severity": "warning", "summary": "drift", "detail": "tags"})
    );
}

#[test]
fn config_survives_json() {
    let config = load_config(
        br#"
        token "id" {
          arg        = "id"
          transforms = ["upper"]
        }
        transform "upper" {
          step "upper" {}
        }
        "#,
        "smarterr.hcl",
    )
    .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
