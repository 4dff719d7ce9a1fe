//! Macros wrapping the [`Logger`][crate::Logger] level methods.
//!
//! The concatenating macros (`debug!`, `info!`, ...) take a logger followed by any number of
//! [`Display`][std::fmt::Display] arguments. The templated macros (`debugf!`, `infof!`, ...)
//! take a logger followed by a format string and its arguments.
//!
//! The logger expression may be any value implementing [`Logger`][crate::Logger], including
//! references, `Box<dyn Logger>` and `Arc<dyn Logger>`.

/// Logs the concatenation of the arguments at debug level.
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::debug(&$logger, &[$(&$arg),*])
    };
}

/// Logs the concatenation of the arguments at info level.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::info(&$logger, &[$(&$arg),*])
    };
}

/// Logs the concatenation of the arguments at warn level.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::warn(&$logger, &[$(&$arg),*])
    };
}

/// Logs the concatenation of the arguments at error level.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::error(&$logger, &[$(&$arg),*])
    };
}

/// Logs the concatenation of the arguments at error level, then panics.
#[macro_export]
macro_rules! panic {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::panic(&$logger, &[$(&$arg),*])
    };
}

/// Logs the concatenation of the arguments at error level, then exits the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::fatal(&$logger, &[$(&$arg),*])
    };
}

/// Logs a templated message at debug level.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::debugf(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Logs a templated message at info level.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::infof(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Logs a templated message at warn level.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::warnf(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Logs a templated message at error level.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::errorf(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Logs a templated message at error level, then panics.
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::panicf(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Logs a templated message at error level, then exits the process.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::fatalf(&$logger, ::core::format_args!($($arg)+))
    };
}
