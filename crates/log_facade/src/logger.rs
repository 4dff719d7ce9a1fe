//! The [`Logger`] trait which application code is written against.

use std::{fmt, sync::Arc};

use tracing::Level;

use super::Fields;

/// Displays a list of arguments back to back, without separators.
pub(crate) struct Concat<'a, 'b>(pub(crate) &'a [&'b dyn fmt::Display]);

impl fmt::Display for Concat<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|arg| write!(f, "{arg}"))
    }
}

/// Leveled, structured logging decoupled from any particular backend.
///
/// Implementors provide [`enabled`][Self::enabled], [`log`][Self::log] and
/// [`with_fields`][Self::with_fields]; every level method is built on top of them.
///
/// Each level comes in two flavors:
/// - `debug`, `info`, ... take a list of arguments which are concatenated without a separator.
///   The [`debug!`][crate::debug], [`info!`][crate::info], ... macros build that list.
/// - `debugf`, `infof`, ... take pre-built [`fmt::Arguments`].
///   The [`debugf!`][crate::debugf], [`infof!`][crate::infof], ... macros accept a format
///   string.
///
/// Messages are only formatted if the level is enabled.
/// The `panic` and `fatal` families log at [`Level::ERROR`].
pub trait Logger: Send + Sync {
    /// Returns `true` if records at `level` would currently be emitted.
    fn enabled(&self, level: Level) -> bool;

    /// Emits one record at `level`.
    ///
    /// `message` is formatted only if `level` is enabled.
    #[track_caller]
    fn log(&self, level: Level, message: &dyn fmt::Display);

    /// Returns a new logger which attaches `fields`, together with any fields accumulated so
    /// far, to every record it emits.
    ///
    /// On key collisions the newly supplied `fields` win. The receiver is left unchanged.
    fn with_fields(&self, fields: Fields) -> Box<dyn Logger>;

    /// Logs the concatenation of `args` at [`Level::DEBUG`].
    #[track_caller]
    fn debug(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::DEBUG, &Concat(args));
    }

    /// Logs the concatenation of `args` at [`Level::INFO`].
    #[track_caller]
    fn info(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::INFO, &Concat(args));
    }

    /// Logs the concatenation of `args` at [`Level::WARN`].
    #[track_caller]
    fn warn(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::WARN, &Concat(args));
    }

    /// Logs the concatenation of `args` at [`Level::ERROR`].
    #[track_caller]
    fn error(&self, args: &[&dyn fmt::Display]) {
        self.log(Level::ERROR, &Concat(args));
    }

    /// Logs the concatenation of `args`, then panics with the message as payload.
    ///
    /// The record is subject to the usual level check; the panic is not.
    ///
    /// # Panics
    ///
    /// Always panics with a [`String`] payload.
    #[track_caller]
    fn panic(&self, args: &[&dyn fmt::Display]) -> ! {
        let message = Concat(args).to_string();
        self.log(Level::ERROR, &message);
        std::panic::panic_any(message)
    }

    /// Logs the concatenation of `args`, then terminates the process with exit status `1`.
    #[track_caller]
    fn fatal(&self, args: &[&dyn fmt::Display]) -> ! {
        self.log(Level::ERROR, &Concat(args));
        std::process::exit(1)
    }

    /// Logs a templated message at [`Level::DEBUG`].
    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::DEBUG, &args);
    }

    /// Logs a templated message at [`Level::INFO`].
    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(Level::INFO, &args);
    }

    /// Logs a templated message at [`Level::WARN`].
    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::WARN, &args);
    }

    /// Logs a templated message at [`Level::ERROR`].
    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::ERROR, &args);
    }

    /// Logs a templated message, then panics with the message as payload.
    ///
    /// # Panics
    ///
    /// Always panics with a [`String`] payload.
    #[track_caller]
    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        self.log(Level::ERROR, &message);
        std::panic::panic_any(message)
    }

    /// Logs a templated message, then terminates the process with exit status `1`.
    #[track_caller]
    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(Level::ERROR, &args);
        std::process::exit(1)
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    #[track_caller]
    fn log(&self, level: Level, message: &dyn fmt::Display) {
        (**self).log(level, message);
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn Logger> {
        (**self).with_fields(fields)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    #[track_caller]
    fn log(&self, level: Level, message: &dyn fmt::Display) {
        (**self).log(level, message);
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn Logger> {
        (**self).with_fields(fields)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    #[track_caller]
    fn log(&self, level: Level, message: &dyn fmt::Display) {
        (**self).log(level, message);
    }

    fn with_fields(&self, fields: Fields) -> Box<dyn Logger> {
        (**self).with_fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_uses_no_separator() {
        let count = 3;
        let args: [&dyn fmt::Display; 4] = [&"found ", &count, &" rows in ", &1.5];

        assert_eq!(Concat(&args).to_string(), "found 3 rows in 1.5");
    }

    #[test]
    fn concatenating_nothing_is_empty() {
        assert_eq!(Concat(&[]).to_string(), "");
    }
}
