//! Wires a logger from configuration and hands it to a component.

use log_facade::{
    ConsoleLogFormat, ConsoleLoggingConfig, Fields, Logger, LoggerConfig, build_logger,
    parse_level_filter,
};
use serde_json::json;

/// A component receiving its logger from the caller instead of a global.
struct Checkout {
    logger: Box<dyn Logger>,
}

impl Checkout {
    fn new(logger: &dyn Logger) -> Self {
        Self {
            logger: logger.with_fields(Fields::from([("component", "checkout")])),
        }
    }

    fn charge(&self, order_id: u64, amount_cents: u64) {
        let order = self
            .logger
            .with_fields(Fields::from([("order_id", json!(order_id))]));
        log_facade::debugf!(order, "charging {} cents", amount_cents);
        if amount_cents == 0 {
            log_facade::warn!(order, "skipping empty order");
        } else {
            log_facade::info!(order, "charged ", amount_cents, " cents");
        }
    }
}

fn main() -> Result<(), log_facade::LoggerError> {
    let level = std::env::var("QUICKSTART_LOG_LEVEL")
        .map(|value| parse_level_filter(&value))
        .unwrap_or(Ok(log_facade::LevelFilter::DEBUG))?;
    let log_format = match std::env::var("QUICKSTART_LOG_FORMAT").as_deref() {
        Ok("text") => ConsoleLogFormat::HumanReadable,
        Ok("pretty") => ConsoleLogFormat::PrettyJson,
        _ => ConsoleLogFormat::CompactJson,
    };

    let config = LoggerConfig {
        static_top_level_fields: [("service".to_string(), json!("quickstart"))].into(),
        include_source: true,
        console_config: Some(ConsoleLoggingConfig { level, log_format }),
        ..LoggerConfig::default()
    };
    let logger = build_logger(config)?;

    log_facade::infof!(logger, "starting {}", env!("CARGO_PKG_NAME"));
    let checkout = Checkout::new(&logger);
    checkout.charge(42, 1999);
    checkout.charge(43, 0);

    Ok(())
}
