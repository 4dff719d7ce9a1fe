//! `log_facade` decouples application code from a concrete logging backend while keeping log
//! output structured.
//!
//! It offers:
//! - The [`Logger`] trait: leveled logging (debug, info, warn, error, panic, fatal), in both a
//!   concatenating and a templated flavor, plus [`Logger::with_fields`] for attaching context.
//! - [`HandlerLogger`], the adapter implementing [`Logger`] on top of any [`Handler`], and
//!   [`Entry`], the field-scoped logger it hands out.
//! - Ready-made handlers: [`JsonHandler`], [`TextHandler`], [`TracingHandler`] and
//!   [`FanOutHandler`].
//! - A central [`build_logger`] function constructing a logger from a [`LoggerConfig`].
//!
//! Loggers are plain values. Construct one while wiring the application and pass it to the
//! components that need it.
//!
//! # Example
//!
//! ```
//! use log_facade::{
//!     Fields, HandlerLogger, JsonHandler, JsonHandlerConfig, LevelFilter, Logger, infof,
//! };
//! use serde_json::json;
//!
//! let handler = JsonHandler::new(
//!     JsonHandlerConfig::with_level(LevelFilter::DEBUG),
//!     std::io::stdout,
//!     serde_json::ser::CompactFormatter,
//! )?;
//! let logger = HandlerLogger::new(handler)?;
//!
//! let request_logger = logger.with_fields(Fields::from([("request_id", json!("abc-123"))]));
//! infof!(request_logger, "received {} balls", "ping pong");
//! # Ok::<(), log_facade::LoggerError>(())
//! ```

mod adapter;
mod config;
mod fields;
mod handler;
mod logger;
mod macros;
mod record;

pub use time::UtcDateTime;
pub use tracing::{Level, level_filters::LevelFilter};
pub use tracing_appender::rolling::Rotation;

pub use self::{
    adapter::{Entry, HandlerLogger},
    config::{
        ConsoleLogFormat, ConsoleLoggingConfig, FileLoggingConfig, LoggerConfig, build_logger,
        parse_level_filter,
    },
    fields::Fields,
    handler::{
        FanOutHandler, Handler, JsonHandler, JsonHandlerConfig, TextHandler, TracingHandler,
    },
    logger::Logger,
    record::{Attribute, Record},
};

mod keys {
    use std::sync::LazyLock;

    use rustc_hash::FxHashSet;

    pub(crate) const MESSAGE: &str = "msg";
    pub(crate) const LEVEL: &str = "level";
    pub(crate) const TIME: &str = "time";
    pub(crate) const FILE: &str = "file";
    pub(crate) const LINE: &str = "line";
    pub(crate) const HOSTNAME: &str = "hostname";
    pub(crate) const PID: &str = "pid";

    pub(crate) static IMPLICIT_KEYS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
        [MESSAGE, LEVEL, TIME, FILE, LINE, HOSTNAME, PID]
            .iter()
            .copied()
            .collect()
    });
}

/// Specifies how attributes (fields attached via [`Logger::with_fields`]) are placed in
/// structured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdditionalFieldsPlacement {
    /// Log all attributes at the top level of the JSON object.
    TopLevel,

    /// Nest all attributes under the specified key.
    Nested(String),
}

/// Errors that can occur within the logger.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Represents an error in configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Represents an error during JSON serialization.
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Represents an error while writing a record to its sink.
    #[error("Failed to write log record: {0}")]
    Io(#[from] std::io::Error),

    /// Represents an error during initialization of the rolling file appender.
    #[error("Failed to initialize rolling file appender: {0}")]
    FileAppenderInitialization(#[from] tracing_appender::rolling::InitError),
}
