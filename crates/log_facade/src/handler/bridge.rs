//! Provides a [`Handler`] ([`TracingHandler`]) forwarding records to the [`tracing`] ecosystem.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::Level;

use super::{
    super::{LoggerError, Record},
    Handler,
};

/// Target of every event emitted by [`TracingHandler`].
const TARGET: &str = env!("CARGO_PKG_NAME");

/// A [`Handler`] that re-emits records as [`tracing`] events through the current dispatcher.
///
/// Level filtering is left to the installed subscriber. Since `tracing` field names are static,
/// record attributes are carried as a single `fields` value holding a JSON object, and the call
/// site is recorded as `caller.file` and `caller.line`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHandler;

impl TracingHandler {
    /// Creates a new [`TracingHandler`].
    pub fn new() -> Self {
        Self
    }
}

impl Handler for TracingHandler {
    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::ERROR => tracing::enabled!(target: TARGET, Level::ERROR),
            Level::WARN => tracing::enabled!(target: TARGET, Level::WARN),
            Level::INFO => tracing::enabled!(target: TARGET, Level::INFO),
            Level::DEBUG => tracing::enabled!(target: TARGET, Level::DEBUG),
            _ => tracing::enabled!(target: TARGET, Level::TRACE),
        }
    }

    fn handle(&self, record: &Record<'_>) -> Result<(), LoggerError> {
        let attributes: BTreeMap<&str, &Value> = record
            .attributes
            .iter()
            .map(|attribute| (attribute.key, attribute.value))
            .collect();
        let fields = serde_json::to_string(&attributes)?;
        let file = record.location.file();
        let line = record.location.line();

        macro_rules! forward {
            ($level:expr) => {
                tracing::event!(
                    target: TARGET,
                    $level,
                    caller.file = file,
                    caller.line = line,
                    fields = %fields,
                    "{}",
                    record.message
                )
            };
        }

        match record.level {
            Level::ERROR => forward!(Level::ERROR),
            Level::WARN => forward!(Level::WARN),
            Level::INFO => forward!(Level::INFO),
            Level::DEBUG => forward!(Level::DEBUG),
            _ => forward!(Level::TRACE),
        }

        Ok(())
    }
}
