//! Handlers format [`Record`]s and write them to a sink.
//!
//! A [`Handler`] is the engine a [`HandlerLogger`][crate::HandlerLogger] delegates to: it decides
//! which levels are enabled and owns the output format.

mod bridge;
mod json;
mod text;

use std::{fmt, sync::Arc};

use tracing::Level;

pub use self::{
    bridge::TracingHandler,
    json::{JsonHandler, JsonHandlerConfig},
    text::TextHandler,
};
use super::{LoggerError, Record};

/// Formats and writes records.
///
/// Implementations must be usable from multiple threads at once; the facade performs no
/// synchronization of its own.
pub trait Handler: Send + Sync {
    /// Returns `true` if records at `level` should be constructed and handed to
    /// [`handle`][Self::handle].
    fn enabled(&self, level: Level) -> bool;

    /// Formats `record` and writes it to the configured sink.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError`] if the record could not be serialized or written.
    fn handle(&self, record: &Record<'_>) -> Result<(), LoggerError>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn handle(&self, record: &Record<'_>) -> Result<(), LoggerError> {
        (**self).handle(record)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn handle(&self, record: &Record<'_>) -> Result<(), LoggerError> {
        (**self).handle(record)
    }
}

/// Dispatches every record to several handlers.
///
/// A level is enabled if any of the handlers enables it, and each record is only handed to the
/// handlers which enable its level. A fan-out without handlers discards everything.
#[derive(Default)]
pub struct FanOutHandler {
    handlers: Vec<Box<dyn Handler>>,
}

impl FanOutHandler {
    /// Creates a fan-out without any handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Returns the number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if records are discarded because there are no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for FanOutHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutHandler")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Handler for FanOutHandler {
    fn enabled(&self, level: Level) -> bool {
        self.handlers.iter().any(|handler| handler.enabled(level))
    }

    fn handle(&self, record: &Record<'_>) -> Result<(), LoggerError> {
        // Every handler gets the record even if an earlier one failed
        let mut first_error = None;
        for handler in self
            .handlers
            .iter()
            .filter(|handler| handler.enabled(record.level))
        {
            if let Err(error) = handler.handle(record) {
                first_error.get_or_insert(error);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        panic::Location,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use tracing::level_filters::LevelFilter;

    use super::*;

    struct CountingHandler {
        threshold: LevelFilter,
        handled: AtomicUsize,
        fail: bool,
    }

    impl CountingHandler {
        fn new(threshold: LevelFilter, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                threshold,
                handled: AtomicUsize::new(0),
                fail,
            })
        }

        fn handled(&self) -> usize {
            self.handled.load(Ordering::SeqCst)
        }
    }

    impl Handler for CountingHandler {
        fn enabled(&self, level: Level) -> bool {
            level <= self.threshold
        }

        fn handle(&self, _record: &Record<'_>) -> Result<(), LoggerError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(LoggerError::Configuration("sink unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn empty_fan_out_enables_nothing() {
        let fan_out = FanOutHandler::new();

        assert!(fan_out.is_empty());
        assert!(!fan_out.enabled(Level::ERROR));
    }

    #[test]
    fn records_reach_only_enabled_handlers() {
        let verbose = CountingHandler::new(LevelFilter::DEBUG, false);
        let quiet = CountingHandler::new(LevelFilter::WARN, false);
        let fan_out = FanOutHandler::new()
            .with_handler(Arc::clone(&verbose))
            .with_handler(Arc::clone(&quiet));

        assert!(fan_out.enabled(Level::DEBUG));
        fan_out
            .handle(&Record::new(Level::INFO, "hello", Location::caller()))
            .ok();

        assert_eq!(verbose.handled(), 1);
        assert_eq!(quiet.handled(), 0);
    }

    #[test]
    fn failing_handler_does_not_starve_the_others() {
        let failing = CountingHandler::new(LevelFilter::DEBUG, true);
        let healthy = CountingHandler::new(LevelFilter::DEBUG, false);
        let fan_out = FanOutHandler::new()
            .with_handler(Arc::clone(&failing))
            .with_handler(Arc::clone(&healthy));

        let result = fan_out.handle(&Record::new(Level::ERROR, "boom", Location::caller()));

        assert!(matches!(result, Err(LoggerError::Configuration(_))));
        assert_eq!(failing.handled(), 1);
        assert_eq!(healthy.handled(), 1);
    }

    #[test]
    fn shared_handler_is_a_handler() {
        let inner = CountingHandler::new(LevelFilter::INFO, false);
        let shared: Arc<dyn Handler> = inner.clone();
        let boxed: Box<dyn Handler> = Box::new(Arc::clone(&inner));

        assert!(shared.enabled(Level::INFO));
        assert!(!boxed.enabled(Level::DEBUG));
        boxed
            .handle(&Record::new(Level::INFO, "hello", Location::caller()))
            .ok();
        assert_eq!(inner.handled(), 1);
    }
}
