use pretty_assertions::assert_eq;
use smarterr::kv;
use smarterr::types::Value;

#[test]
fn kv_converts_every_item() {
    let id = String::from("r-1");
    let args = kv!["id", &id, "count", 3u8, "ratio", 0.5, "force", true];
    assert_eq!(
        args,
        vec![
            Value::from("id"),
            Value::Str("r-1".into()),
            Value::from("count"),
            Value::UInt(3),
            Value::from("ratio"),
            Value::Float(0.5),
            Value::from("force"),
            Value::Bool(true),
        ]
    );
}

#[test]
fn kv_accepts_trailing_comma_and_options() {
    let region: Option<String> = None;
    let args = kv!["region", region, "zone", Some("a"),];
    assert_eq!(args[1], Value::Null);
    assert_eq!(args[3], Value::from("a"));
}

#[test]
fn empty_kv() {
    assert!(kv![].is_empty());
}
