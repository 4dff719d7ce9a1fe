//! Builds a [`HandlerLogger`] from a [`LoggerConfig`].

use std::{collections::HashMap, num::NonZeroUsize, str::FromStr};

use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use super::{
    AdditionalFieldsPlacement, FanOutHandler, HandlerLogger, JsonHandler, JsonHandlerConfig,
    LoggerError, TextHandler,
};

/// Comprehensive configuration for a logger and its sinks.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// A map of key-value pairs that are statically defined at initialization and included
    /// at the top level of every JSON log entry.
    pub static_top_level_fields: HashMap<String, Value>,

    /// Specifies how attributes attached via `with_fields` are placed in the JSON output.
    pub additional_fields_placement: AdditionalFieldsPlacement,

    /// If `true`, the call site (`file` and `line`) is included in every log entry.
    pub include_source: bool,

    /// If `true`, the `hostname` and `pid` are included in every JSON log entry.
    pub include_process_info: bool,

    /// Configuration for console logging. If `None`, console logging is disabled.
    pub console_config: Option<ConsoleLoggingConfig>,

    /// Configuration for file logging. If `None`, file logging is disabled.
    pub file_config: Option<FileLoggingConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            static_top_level_fields: HashMap::new(),
            additional_fields_placement: AdditionalFieldsPlacement::TopLevel,
            include_source: false,
            include_process_info: false,
            console_config: Some(ConsoleLoggingConfig::default()),
            file_config: None,
        }
    }
}

/// Configuration for console logging.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLoggingConfig {
    /// Minimum log level for console logs.
    pub level: LevelFilter,

    /// Output format for console logs.
    pub log_format: ConsoleLogFormat,
}

impl Default for ConsoleLoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            log_format: ConsoleLogFormat::CompactJson,
        }
    }
}

/// Defines the output format for console logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLogFormat {
    /// Single-line, human-readable format.
    HumanReadable,

    /// Compact, single-line JSON format.
    CompactJson,

    /// Pretty-printed, multi-line JSON format.
    PrettyJson,
}

/// Configuration for file logging.
///
/// Files always receive compact JSON. Writes are blocking so that records logged right before
/// a fatal exit are not lost.
#[derive(Debug, Clone)]
pub struct FileLoggingConfig {
    /// Directory where log files will be stored.
    pub directory: String,

    /// Prefix for log file names.
    pub file_name_prefix: String,

    /// Rotation strategy for log files.
    pub file_rotation: Rotation,

    /// Maximum number of log files to keep. If `None`, all files are kept.
    pub max_log_files: Option<NonZeroUsize>,

    /// Minimum log level for file logs.
    pub level: LevelFilter,
}

/// Parses a level threshold such as `"debug"`, `"WARN"` or `"off"`.
///
/// # Errors
///
/// Returns [`LoggerError::Configuration`] if `value` does not name a level.
pub fn parse_level_filter(value: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(value.trim()).map_err(|error| {
        LoggerError::Configuration(format!("Invalid log level `{value}`: {error}"))
    })
}

/// Constructs a logger based on the provided [`LoggerConfig`].
///
/// Every configured sink becomes one handler behind a [`FanOutHandler`]; with no sink
/// configured, the returned logger discards everything.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use log_facade::{
///     ConsoleLogFormat, ConsoleLoggingConfig, FileLoggingConfig, LevelFilter, LoggerConfig,
///     Rotation, build_logger, infof,
/// };
///
/// let config = LoggerConfig {
///     console_config: Some(ConsoleLoggingConfig {
///         level: LevelFilter::DEBUG,
///         log_format: ConsoleLogFormat::HumanReadable,
///     }),
///     file_config: Some(FileLoggingConfig {
///         directory: std::env::temp_dir().join("log_facade_doc").display().to_string(),
///         file_name_prefix: "my_app_log".to_string(),
///         file_rotation: Rotation::DAILY,
///         max_log_files: NonZeroUsize::new(7),
///         level: LevelFilter::INFO,
///     }),
///     ..LoggerConfig::default()
/// };
///
/// let logger = build_logger(config)?;
/// infof!(logger, "Logging initialized successfully!");
/// # Ok::<(), log_facade::LoggerError>(())
/// ```
///
/// # Errors
///
/// Returns [`LoggerError`] if any part of the logger fails to build
/// (e.g., a reserved static field, or an unusable log directory).
pub fn build_logger(config: LoggerConfig) -> Result<HandlerLogger, LoggerError> {
    let mut handlers = FanOutHandler::new();

    let json_config = |level| JsonHandlerConfig {
        level,
        static_top_level_fields: config.static_top_level_fields.clone(),
        additional_fields_placement: config.additional_fields_placement.clone(),
        include_source: config.include_source,
        include_process_info: config.include_process_info,
    };

    // File logging
    if let Some(file_logging_config) = &config.file_config {
        let mut file_appender_builder = RollingFileAppender::builder()
            .rotation(file_logging_config.file_rotation.clone())
            .filename_prefix(file_logging_config.file_name_prefix.as_str());

        if let Some(max_log_files) = file_logging_config.max_log_files {
            file_appender_builder = file_appender_builder.max_log_files(usize::from(max_log_files));
        }

        let file_appender = file_appender_builder.build(&file_logging_config.directory)?;

        handlers = handlers.with_handler(JsonHandler::new(
            json_config(file_logging_config.level),
            file_appender,
            serde_json::ser::CompactFormatter,
        )?);
    }

    // Console logging
    if let Some(console_logging_config) = config.console_config {
        let level = console_logging_config.level;
        handlers = match console_logging_config.log_format {
            ConsoleLogFormat::HumanReadable => handlers.with_handler(
                TextHandler::new(level, std::io::stdout).with_source(config.include_source),
            ),
            ConsoleLogFormat::CompactJson => handlers.with_handler(JsonHandler::new(
                json_config(level),
                std::io::stdout,
                serde_json::ser::CompactFormatter,
            )?),
            ConsoleLogFormat::PrettyJson => handlers.with_handler(JsonHandler::new(
                json_config(level),
                std::io::stdout,
                serde_json::ser::PrettyFormatter::new(),
            )?),
        };
    }

    tracing::debug!(sinks = handlers.len(), "Built logger");

    HandlerLogger::new(handlers)
}
