use super::environment;
use crate::common::{called_from, Buffer, RecordingSink};
use pretty_assertions::assert_eq;
use smarterr::debug::DEBUG_PREFIX;
use smarterr::traits::LogLevel;
use smarterr::{kv, Environment, MemFs};
use std::io;

const FILE: &str = "/work/provider/internal/service/sqs/queue.rs";

const LOG_CONFIG: &str = r#"
token "id" {
  arg = "id"
}

token "error" {
  source = "error"
}

template "log_error" {
  format = "queue {{.id}} failed: {{.error}}"
}

template "log_info" {
  format = "{{if .nothing}}never{{end}}"
}
"#;

#[test]
fn log_templates_reach_the_sink() {
    let sink = RecordingSink::default();
    let env = environment(&[("internal/smarterr/smarterr.hcl", LOG_CONFIG)])
        .with_log_sink(sink.clone());
    let ctx = called_from("f", FILE).with_correlation_id("req-7");
    env.append_error(
        &ctx,
        Vec::new(),
        &io::Error::other("purge in progress"),
        &kv!["id", "q-1"],
    );

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let (level, message, fields) = &events[0];
    assert_eq!(*level, LogLevel::Error);
    assert_eq!(message, "queue q-1 failed: purge in progress");
    assert_eq!(fields.get("id").map(String::as_str), Some("q-1"));
    assert_eq!(
        fields.get("correlation_id").map(String::as_str),
        Some("req-7")
    );
}

#[test]
fn calls_without_correlation_id_get_one() {
    let sink = RecordingSink::default();
    let env = environment(&[("internal/smarterr/smarterr.hcl", LOG_CONFIG)])
        .with_log_sink(sink.clone());
    let ctx = called_from("f", FILE);
    env.append_error(&ctx, Vec::new(), &io::Error::other("a"), &kv!["id", "q-1"]);
    env.append_error(&ctx, Vec::new(), &io::Error::other("b"), &kv!["id", "q-2"]);

    let ids: Vec<String> = sink
        .events()
        .iter()
        .filter_map(|(_, _, f)| f.get("correlation_id").cloned())
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn fallback_emits_no_logs() {
    let sink = RecordingSink::default();
    let env = Environment::new().with_log_sink(sink.clone());
    env.append_error(
        &called_from("f", FILE),
        Vec::new(),
        &io::Error::other("x"),
        &kv![],
    );
    assert!(sink.events().is_empty());
}

#[test]
fn forced_debug_traces_the_call() {
    let out = Buffer::default();
    let env = environment(&[("internal/smarterr/smarterr.hcl", LOG_CONFIG)])
        .with_debug(true)
        .with_debug_writer(out.clone());
    let ctx = called_from("f", FILE).with_correlation_id("dbg-1");
    env.append_error(&ctx, Vec::new(), &io::Error::other("boom"), &kv![]);

    let text = out.contents();
    assert!(text.lines().count() > 0);
    let prefix = format!("{DEBUG_PREFIX} [dbg-1] ");
    assert!(text.lines().all(|line| line.starts_with(&prefix)));
    assert!(text.contains("unresolved token \"id\""));
}

#[test]
fn debug_setting_in_config_enables_tracing() {
    let out = Buffer::default();
    let fs = MemFs::new().with_file(
        "internal/smarterr/smarterr.hcl",
        "smarterr {\n  debug = true\n}\n",
    );
    let env = Environment::new()
        .with_filesystem(fs, "internal")
        .with_debug_writer(out.clone());
    env.append_error(
        &called_from("f", FILE),
        Vec::new(),
        &io::Error::other("boom"),
        &kv![],
    );
    assert!(out.contents().contains(DEBUG_PREFIX));
}

#[test]
fn debug_is_silent_by_default() {
    let out = Buffer::default();
    let env = environment(&[("internal/smarterr/smarterr.hcl", LOG_CONFIG)])
        .with_debug_writer(out.clone());
    env.append_error(
        &called_from("f", FILE),
        Vec::new(),
        &io::Error::other("boom"),
        &kv![],
    );
    assert_eq!(out.contents(), "");
}
