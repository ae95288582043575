use pretty_assertions::assert_eq;
use proptest::prelude::*;
use smarterr::config::merge;
use smarterr::types::{Config, Parameter, Settings, Template, TokenErrorMode};

#[test]
fn debug_is_sticky() {
    let on = Config::new().with_settings(Settings {
        debug: Some(true),
        ..Default::default()
    });
    let off = Config::new().with_settings(Settings {
        debug: Some(false),
        ..Default::default()
    });
    assert!(merge([&on, &off]).settings.debug());
}

#[test]
fn settings_override_field_by_field() {
    let base = Config::new().with_settings(Settings {
        token_error_mode: Some(TokenErrorMode::Detailed),
        hint_join_char: Some(", ".into()),
        ..Default::default()
    });
    let later = Config::new().with_settings(Settings {
        token_error_mode: Some(TokenErrorMode::Placeholder),
        ..Default::default()
    });
    let merged = merge([&base, &later]);
    assert_eq!(
        merged.settings.token_error_mode(),
        TokenErrorMode::Placeholder
    );
    assert_eq!(merged.settings.hint_join_char(), ", ");
}

#[test]
fn later_block_replaces_whole_body() {
    let base = Config::new().with_template(Template::new("error_summary", "a"));
    let later = Config::new()
        .with_template(Template::new("error_summary", "b"))
        .with_template(Template::new("error_detail", "c"));
    let merged = merge([&base, &later]);
    assert_eq!(
        merged.templates,
        vec![Template::new("error_summary", "b"), Template::new("error_detail", "c")]
    );
}

fn arb_config() -> impl Strategy<Value = Config> {
    let parameters = prop::collection::vec(("[a-d]", "[a-z]{0,3}"), 0..5);
    let modes = prop::option::of(prop_oneof![
        Just(TokenErrorMode::Detailed),
        Just(TokenErrorMode::Placeholder),
        Just(TokenErrorMode::Empty),
    ]);
    (parameters, modes, prop::option::of(any::<bool>())).prop_map(|(parameters, mode, debug)| {
        let mut config = Config::new().with_settings(Settings {
            debug,
            token_error_mode: mode,
            ..Default::default()
        });
        for (name, value) in parameters {
            config = config.with_parameter(Parameter::new(name, value));
        }
        config
    })
}

proptest! {
    #[test]
    fn merge_is_associative(a in arb_config(), b in arb_config(), c in arb_config()) {
        let left = merge([&merge([&a, &b]), &c]);
        let right = merge([&a, &merge([&b, &c])]);
        let flat = merge([&a, &b, &c]);
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(&left, &flat);
    }
}
