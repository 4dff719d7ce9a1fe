//! Provides a [`Handler`] ([`TextHandler`]) writing human-readable, single-line records.

use std::io::Write;

use time::format_description::well_known::Iso8601;
use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::fmt::MakeWriter;

use super::{
    super::{LoggerError, Record},
    Handler,
};

/// A [`Handler`] producing lines of the form
/// `<time> <LEVEL> <msg> key=value ... [file:line]`.
///
/// Attribute values are rendered as JSON, so strings appear quoted.
#[derive(Debug)]
pub struct TextHandler<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    dst_writer: W,
    level: LevelFilter,
    include_source: bool,
}

impl<W> TextHandler<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    /// Creates a new [`TextHandler`] writing records at or above `level` to `dst_writer`.
    pub fn new(level: LevelFilter, dst_writer: W) -> Self {
        Self {
            dst_writer,
            level,
            include_source: false,
        }
    }

    /// Appends the call site of every record.
    #[must_use]
    pub fn with_source(mut self, include_source: bool) -> Self {
        self.include_source = include_source;
        self
    }

    fn format(&self, record: &Record<'_>) -> String {
        let mut line = String::new();
        if let Ok(time) = record.time.format(&Iso8601::DEFAULT) {
            line.push_str(&time);
            line.push(' ');
        }
        line.push_str(&format!("{:>5} {}", record.level, record.message));

        let mut attributes = record.attributes.clone();
        attributes.sort_unstable_by_key(|attribute| attribute.key);
        for attribute in attributes {
            line.push_str(&format!(" {}={}", attribute.key, attribute.value));
        }

        if self.include_source {
            line.push_str(&format!(
                " [{}:{}]",
                record.location.file(),
                record.location.line()
            ));
        }

        line.push('\n');
        line
    }
}

impl<W> Handler for TextHandler<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    fn handle(&self, record: &Record<'_>) -> Result<(), LoggerError> {
        let line = self.format(record);
        self.dst_writer.make_writer().write_all(line.as_bytes())?;
        Ok(())
    }
}
