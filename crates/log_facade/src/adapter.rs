//! Implements [`Logger`] on top of a [`Handler`].

use std::{fmt, panic::Location, sync::Arc};

use tracing::Level;

use super::{Fields, Handler, Logger, LoggerError, Record};

/// A [`Logger`] which forwards every call to a [`Handler`].
///
/// Cloning is cheap: clones share the same handler.
#[derive(Clone)]
pub struct HandlerLogger {
    handler: Arc<dyn Handler>,
}

impl HandlerLogger {
    /// Creates a logger writing through `handler`.
    ///
    /// # Errors
    ///
    /// Reserved for handler validation; construction currently always succeeds.
    pub fn new(handler: impl Handler + 'static) -> Result<Self, LoggerError> {
        Self::from_arc(Arc::new(handler))
    }

    /// Creates a logger writing through a handler which is shared with other owners.
    ///
    /// # Errors
    ///
    /// Reserved for handler validation; construction currently always succeeds.
    pub fn from_arc(handler: Arc<dyn Handler>) -> Result<Self, LoggerError> {
        Ok(Self { handler })
    }

    /// Builds and emits one record, unless `level` is disabled.
    ///
    /// The message is only formatted once the level check passed. Handler errors are dropped.
    #[track_caller]
    fn do_log(&self, level: Level, message: &dyn fmt::Display, fields: Option<&Fields>) {
        if !self.handler.enabled(level) {
            return;
        }

        let location = Location::caller();
        let message = message.to_string();
        let mut record = Record::new(level, &message, location);
        if let Some(fields) = fields {
            record.add_fields(fields);
        }

        let _ = self.handler.handle(&record);
    }
}

impl fmt::Debug for HandlerLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerLogger").finish_non_exhaustive()
    }
}

impl Logger for HandlerLogger {
    fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    #[track_caller]
    fn log(&self, level: Level, message: &dyn fmt::Display) {
        self.do_log(level, message, None);
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn Logger> {
        Box::new(Entry {
            base: self.clone(),
            fields,
        })
    }
}

/// A [`Logger`] attaching a fixed set of [`Fields`] to every record.
///
/// Obtained from [`Logger::with_fields`]; chaining `with_fields` on an entry yields a new entry
/// carrying the merged fields.
#[derive(Clone, Debug)]
pub struct Entry {
    base: HandlerLogger,
    fields: Fields,
}

impl Logger for Entry {
    fn enabled(&self, level: Level) -> bool {
        self.base.enabled(level)
    }

    #[track_caller]
    fn log(&self, level: Level, message: &dyn fmt::Display) {
        self.base.do_log(level, message, Some(&self.fields));
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn Logger> {
        self.base.with_fields(self.fields.merged_with(&fields))
    }
}
