use crate::common::envelope;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use smarterr::context::Context;
use smarterr::resolve::transform::{apply, apply_named};
use smarterr::types::{Config, StepKind, Transform, TransformStep};

fn clean() -> Transform {
    Transform::new(
        "clean",
        vec![
            TransformStep::new(StepKind::Remove).regex("RequestID: [a-z0-9-]+,"),
            TransformStep::new(StepKind::StripSuffix)
                .value(",")
                .recurse(true),
        ],
    )
}

#[test]
fn request_id_is_removed_and_trailing_commas_stripped() {
    let config = Config::new().with_transform(clean());
    let context = Context::new();
    let mut env = envelope(&config, &context);
    let out = apply_named(
        &mut env,
        "token \"error\"",
        &["clean".to_string()],
        "API error, RequestID: abc-123-def, trailing,".to_string(),
    );
    assert_eq!(out, "API error,  trailing");
    assert!(env.notes().is_empty());
}

#[test]
fn transforms_run_in_listed_order() {
    let config = Config::new()
        .with_transform(Transform::new(
            "upper",
            vec![TransformStep::new(StepKind::Upper)],
        ))
        .with_transform(Transform::new(
            "prefix",
            vec![TransformStep::new(StepKind::StripPrefix).value("error: ")],
        ));
    let context = Context::new();
    let mut env = envelope(&config, &context);
    let names = ["prefix".to_string(), "upper".to_string()];
    assert_eq!(
        apply_named(&mut env, "t", &names, "error: boom".to_string()),
        "BOOM"
    );
    let reversed = ["upper".to_string(), "prefix".to_string()];
    assert_eq!(
        apply_named(&mut env, "t", &reversed, "error: boom".to_string()),
        "ERROR: BOOM"
    );
}

#[test]
fn literal_and_regex_replacement() {
    let config = Config::new();
    let context = Context::new();
    let mut env = envelope(&config, &context);
    let transform = Transform::new(
        "t",
        vec![
            TransformStep::new(StepKind::Replace)
                .value("  ")
                .with(" ")
                .recurse(true),
            TransformStep::new(StepKind::Replace)
                .regex(r"arn:aws:[^ ]+")
                .with("<arn>"),
            TransformStep::new(StepKind::Lower),
        ],
    );
    assert_eq!(
        apply(
            &mut env,
            &transform,
            "Denied    FOR arn:aws:iam::123:role/x".to_string(),
        ),
        "denied for <arn>"
    );
}

#[test]
fn misconfigured_steps_are_noted_and_skipped() {
    let config = Config::new();
    let context = Context::new();
    let mut env = envelope(&config, &context);
    let transform = Transform::new(
        "t",
        vec![
            TransformStep::new(StepKind::Remove).regex("(unclosed"),
            TransformStep::new(StepKind::StripPrefix),
            TransformStep::new(StepKind::from_label("rot13")),
            TransformStep::new(StepKind::TrimSpace),
        ],
    );
    assert_eq!(
        apply(&mut env, &transform, "  keep me ".to_string()),
        "keep me"
    );
    assert_eq!(env.notes().len(), 3);
}

#[test]
fn undefined_transform_is_noted() {
    let config = Config::new();
    let context = Context::new();
    let mut env = envelope(&config, &context);
    let out = apply_named(
        &mut env,
        "token \"x\"",
        &["nope".to_string()],
        "v".to_string(),
    );
    assert_eq!(out, "v");
    let note = env.notes().iter().next().unwrap();
    assert!(note.contains("\"nope\" is not defined"));
}

fn recursive(kind: StepKind) -> TransformStep {
    TransformStep::new(kind).recurse(true)
}

fn recursive_step() -> impl Strategy<Value = TransformStep> {
    prop_oneof![
        "[a-c,]{1,2}".prop_map(|v| recursive(StepKind::StripPrefix).value(v)),
        "[a-c,]{1,2}".prop_map(|v| recursive(StepKind::StripSuffix).value(v)),
        "[a-c,]{1,2}".prop_map(|v| recursive(StepKind::Remove).value(v)),
        Just(recursive(StepKind::Remove).regex("[0-9]+")),
        Just(recursive(StepKind::Replace).regex(" {2,}").with(" ")),
    ]
}

proptest! {
    #[test]
    fn recursive_steps_are_idempotent(step in recursive_step(), input in "[a-c0-9, ]{0,24}") {
        let config = Config::new();
        let context = Context::new();
        let mut env = envelope(&config, &context);
        let transform = Transform::new("t", vec![step]);
        let once = apply(&mut env, &transform, input);
        let twice = apply(&mut env, &transform, once.clone());
        prop_assert_eq!(once, twice);
    }
}
