//! Asserts the shape of the JSON records produced through the facade.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use std::process::Command;

use common::SharedBuffer;
use log_facade::{
    Fields, HandlerLogger, JsonHandler, JsonHandlerConfig, LevelFilter, Logger, LoggerError,
};
use serde_json::{Value, json};

fn json_logger(level: LevelFilter, buffer: &SharedBuffer) -> HandlerLogger {
    let handler = JsonHandler::new(
        JsonHandlerConfig::with_level(level),
        buffer.clone(),
        serde_json::ser::CompactFormatter,
    )
    .expect("handler without static fields is valid");
    HandlerLogger::new(handler).expect("construction never fails")
}

fn single_record(buffer: &SharedBuffer) -> Value {
    let contents = buffer.contents();
    assert_eq!(contents.lines().count(), 1, "expected one record: {contents}");
    serde_json::from_str(&contents).expect("record is valid JSON")
}

#[test]
fn info_with_fields() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::DEBUG, &buffer);

    log_facade::info!(log.with_fields(Fields::from([("foo", "bar")])), "direct");

    let record = single_record(&buffer);
    assert_eq!(record["msg"], "direct");
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["foo"], "bar");
    assert!(record["time"].is_string());
}

#[test]
fn infof_with_fields() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::DEBUG, &buffer);

    log_facade::infof!(
        log.with_fields(Fields::from([("ping", "pong")])),
        "received {} balls",
        "ping pong"
    );

    let record = single_record(&buffer);
    assert_eq!(record["msg"], "received ping pong balls");
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["ping"], "pong");
}

#[test]
fn warn_with_fields() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::DEBUG, &buffer);

    log.with_fields(Fields::from([("foo", "bar"), ("log", "facade")]))
        .warn(&[&"direct"]);

    let record = single_record(&buffer);
    assert_eq!(record["msg"], "direct");
    assert_eq!(record["level"], "WARN");
    assert_eq!(record["foo"], "bar");
    assert_eq!(record["log"], "facade");
}

#[test]
fn warnf_with_fields() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::DEBUG, &buffer);

    log.with_fields(Fields::from([("ping", "pong"), ("log", "facade")]))
        .warnf(format_args!("received {} balls", "table tennis"));

    let record = single_record(&buffer);
    assert_eq!(record["msg"], "received table tennis balls");
    assert_eq!(record["level"], "WARN");
    assert_eq!(record["ping"], "pong");
    assert_eq!(record["log"], "facade");
}

#[test]
fn errorf_keeps_numeric_fields() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::DEBUG, &buffer);

    log_facade::errorf!(
        log.with_fields(Fields::from([("acctNumber", json!(7899)), ("log", json!("facade"))])),
        "Error creating account {}",
        "testAccount"
    );

    let record = single_record(&buffer);
    assert_eq!(record["msg"], "Error creating account testAccount");
    assert_eq!(record["level"], "ERROR");
    assert_eq!(record["acctNumber"], 7899);
    assert_eq!(record["log"], "facade");
}

#[test]
fn concatenation_has_no_separator() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::DEBUG, &buffer);

    log_facade::debug!(log, "retry ", 3, " of ", 5);

    let record = single_record(&buffer);
    assert_eq!(record["msg"], "retry 3 of 5");
    assert_eq!(record["level"], "DEBUG");
}

#[test]
fn disabled_debug_writes_nothing() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::INFO, &buffer);

    log_facade::debugf!(log.with_fields(Fields::from([("foo", "bar")])), "direct");

    assert_eq!(buffer.contents(), "");
}

#[test]
fn chained_fields_accumulate_and_newer_values_win() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::DEBUG, &buffer);

    let request = log.with_fields(Fields::from([("request_id", "r-1"), ("user", "anonymous")]));
    let authenticated = request.with_fields(Fields::from([("user", "alice")]));
    log_facade::info!(authenticated, "authenticated");

    let record = single_record(&buffer);
    assert_eq!(record["request_id"], "r-1");
    assert_eq!(record["user"], "alice");
}

#[test]
fn panic_logs_then_unwinds() {
    let buffer = SharedBuffer::default();
    let log = json_logger(LevelFilter::ERROR, &buffer);
    let entry = log.with_fields(Fields::from([("db", "dataDB"), ("log", "facade")]));

    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        log_facade::panic!(entry, "db not found");
    }))
    .expect_err("the code did not panic");

    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("db not found")
    );
    let record = single_record(&buffer);
    assert_eq!(record["msg"], "db not found");
    assert_eq!(record["level"], "ERROR");
    assert_eq!(record["db"], "dataDB");
    assert_eq!(record["log"], "facade");
}

#[test]
fn json_handler_rejects_reserved_static_fields() {
    let config = JsonHandlerConfig {
        static_top_level_fields: [("time".to_string(), json!("never"))].into(),
        ..JsonHandlerConfig::with_level(LevelFilter::DEBUG)
    };

    let result = JsonHandler::new(
        config,
        SharedBuffer::default(),
        serde_json::ser::CompactFormatter,
    );

    assert!(matches!(result, Err(LoggerError::Configuration(_))));
}

const FATAL_CHILD_ENV: &str = "LOG_FACADE_FATAL_CHILD";

#[test]
fn fatal_exits_with_status_one() {
    if let Ok(variant) = std::env::var(FATAL_CHILD_ENV) {
        let log = HandlerLogger::new(
            JsonHandler::new(
                JsonHandlerConfig::with_level(LevelFilter::ERROR),
                std::io::stdout,
                serde_json::ser::CompactFormatter,
            )
            .expect("handler without static fields is valid"),
        )
        .expect("construction never fails");
        let entry = log.with_fields(Fields::from([("variant", variant.as_str())]));
        if variant == "fatalf" {
            log_facade::fatalf!(entry, "shutting {}", "down");
        } else {
            log_facade::fatal!(entry, "shutting ", "down");
        }
    }

    for variant in ["fatal", "fatalf"] {
        let output = Command::new(std::env::current_exe().expect("test binary path"))
            .args(["--exact", "fatal_exits_with_status_one", "--nocapture"])
            .env(FATAL_CHILD_ENV, variant)
            .output()
            .expect("child test process runs");

        assert_eq!(output.status.code(), Some(1), "{variant} must exit with 1");
        let stdout = String::from_utf8_lossy(&output.stdout);
        let record = stdout
            .lines()
            .filter_map(|line| line.find('{').and_then(|start| line.get(start..)))
            .find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
            .expect("child wrote a JSON record before exiting");
        assert_eq!(record["msg"], "shutting down");
        assert_eq!(record["level"], "ERROR");
        assert_eq!(record["variant"], variant);
    }
}

const GATED_FATAL_CHILD_ENV: &str = "LOG_FACADE_GATED_FATAL_CHILD";

#[test]
fn fatal_exits_even_when_errors_are_disabled() {
    if std::env::var(GATED_FATAL_CHILD_ENV).is_ok() {
        let log = HandlerLogger::new(
            JsonHandler::new(
                JsonHandlerConfig::with_level(LevelFilter::OFF),
                std::io::stdout,
                serde_json::ser::CompactFormatter,
            )
            .expect("handler without static fields is valid"),
        )
        .expect("construction never fails");
        log_facade::fatalf!(log.with_fields(Fields::from([("a", 1)])), "bye");
    }

    let output = Command::new(std::env::current_exe().expect("test binary path"))
        .args([
            "--exact",
            "fatal_exits_even_when_errors_are_disabled",
            "--nocapture",
        ])
        .env(GATED_FATAL_CHILD_ENV, "1")
        .output()
        .expect("child test process runs");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("\"msg\""),
        "a disabled fatal must not write a record: {stdout}"
    );
}
