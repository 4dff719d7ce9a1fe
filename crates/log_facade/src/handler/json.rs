//! Provides a [`Handler`] ([`JsonHandler`]) writing each record as one JSON object.

use std::{collections::HashMap, io::Write};

use serde::ser::{SerializeMap, Serializer};
use serde_json::{Value, ser::Formatter};
use time::format_description::well_known::Iso8601;
use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::fmt::MakeWriter;

use super::{
    super::{AdditionalFieldsPlacement, LoggerError, Record, keys},
    Handler,
};

/// Configuration for creating a [`JsonHandler`].
///
/// This struct defines settings that customize the JSON output, such as:
/// - The minimum level of records which are written.
/// - Statically defined top-level fields (e.g., service name, environment).
/// - Placement of attributes attached to records.
/// - Whether the call site and process information are included.
#[derive(Clone, Debug)]
pub struct JsonHandlerConfig {
    /// Records less severe than this are dropped without being constructed.
    pub level: LevelFilter,

    /// A map of key-value pairs that are statically defined at initialization and included at the
    /// top level of every log entry.
    pub static_top_level_fields: HashMap<String, Value>,

    /// Specifies how record attributes are placed in the JSON output.
    pub additional_fields_placement: AdditionalFieldsPlacement,

    /// If `true`, the `file` and `line` of the logging call are included.
    pub include_source: bool,

    /// If `true`, the `hostname` and `pid` of the current process are included.
    pub include_process_info: bool,
}

impl JsonHandlerConfig {
    /// Creates a configuration with the given threshold, attributes at the top level and no
    /// optional keys.
    pub fn with_level(level: LevelFilter) -> Self {
        Self {
            level,
            static_top_level_fields: HashMap::new(),
            additional_fields_placement: AdditionalFieldsPlacement::TopLevel,
            include_source: false,
            include_process_info: false,
        }
    }
}

/// A [`Handler`] that serializes records into JSON objects, one per line.
///
/// The implicit keys `time`, `level` and `msg` are always present; `file`, `line`, `hostname`
/// and `pid` are added depending on the [`JsonHandlerConfig`].
///
/// It requires a [`MakeWriter`] to determine the output destination and a
/// [`serde_json::ser::Formatter`] to control the JSON output style
/// (e.g., compact or pretty-printed).
#[derive(Debug)]
pub struct JsonHandler<W, F>
where
    W: for<'a> MakeWriter<'a> + 'static,
    F: Formatter + Clone,
{
    dst_writer: W,
    formatter: F,
    level: LevelFilter,
    process_info: Option<(String, u32)>,
    include_source: bool,
    static_top_level_fields: HashMap<String, Value>,
    additional_fields_placement: AdditionalFieldsPlacement,
}

impl<W, F> JsonHandler<W, F>
where
    W: for<'a> MakeWriter<'a> + 'static,
    F: Formatter + Clone,
{
    /// Creates a new [`JsonHandler`] with the specified configuration, writer and formatter.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Configuration`] if a static top-level field uses a reserved key.
    pub fn new(config: JsonHandlerConfig, dst_writer: W, formatter: F) -> Result<Self, LoggerError> {
        for key in config.static_top_level_fields.keys() {
            if keys::IMPLICIT_KEYS.contains(key.as_str()) {
                return Err(LoggerError::Configuration(format!(
                    "A reserved key `{key}` was included in `static_top_level_fields` in the \
                     JSON log handler"
                )));
            }
        }

        let process_info = config.include_process_info.then(|| {
            (
                gethostname::gethostname().to_string_lossy().into_owned(),
                std::process::id(),
            )
        });

        Ok(Self {
            dst_writer,
            formatter,
            level: config.level,
            process_info,
            include_source: config.include_source,
            static_top_level_fields: config.static_top_level_fields,
            additional_fields_placement: config.additional_fields_placement,
        })
    }

    /// Serializes implicit fields.
    fn serialize_implicit_fields(
        &self,
        map_serializer: &mut impl SerializeMap<Error = serde_json::Error>,
        record: &Record<'_>,
    ) -> Result<(), LoggerError> {
        if let Ok(time) = record.time.format(&Iso8601::DEFAULT) {
            map_serializer.serialize_entry(keys::TIME, &time)?;
        }
        map_serializer.serialize_entry(keys::LEVEL, &format_args!("{}", record.level))?;
        map_serializer.serialize_entry(keys::MESSAGE, record.message)?;

        if self.include_source {
            map_serializer.serialize_entry(keys::FILE, record.location.file())?;
            map_serializer.serialize_entry(keys::LINE, &record.location.line())?;
        }

        if let Some((hostname, pid)) = &self.process_info {
            map_serializer.serialize_entry(keys::HOSTNAME, hostname)?;
            map_serializer.serialize_entry(keys::PID, pid)?;
        }

        Ok(())
    }

    /// Serializes a record into a buffer, without the trailing newline.
    fn serialize(&self, record: &Record<'_>) -> Result<Vec<u8>, LoggerError> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, self.formatter.clone());
        let mut map_serializer = serializer.serialize_map(None)?;

        self.serialize_implicit_fields(&mut map_serializer, record)?;

        for (key, value) in self.static_top_level_fields.iter() {
            map_serializer.serialize_entry(key, value)?;
        }

        let attributes = record.attributes.iter().filter(|attribute| {
            if keys::IMPLICIT_KEYS.contains(attribute.key) {
                tracing::warn!(
                    "Attempting to log a reserved key `{}` (value: `{:?}`). Skipping.",
                    attribute.key,
                    attribute.value
                );
                false
            } else {
                true
            }
        });

        match &self.additional_fields_placement {
            AdditionalFieldsPlacement::TopLevel => {
                for attribute in attributes {
                    if self.static_top_level_fields.contains_key(attribute.key) {
                        tracing::warn!(
                            "Attempting to log a key `{}` already set as a static top-level \
                             field (value: `{:?}`). Skipping.",
                            attribute.key,
                            attribute.value
                        );
                        continue;
                    }
                    map_serializer.serialize_entry(attribute.key, attribute.value)?;
                }
            }
            AdditionalFieldsPlacement::Nested(field_name) => {
                let nested: HashMap<&str, &Value> = attributes
                    .map(|attribute| (attribute.key, attribute.value))
                    .collect();
                if !nested.is_empty() {
                    map_serializer.serialize_entry(field_name.as_str(), &nested)?;
                }
            }
        }

        map_serializer.end()?;
        Ok(buffer)
    }

    /// Flush memory buffer into an output stream with a trailing newline.
    ///
    /// Should be done by a single `write_all` call to avoid fragmentation of log because of
    /// multithreading.
    fn flush(&self, mut buffer: Vec<u8>) -> Result<(), std::io::Error> {
        buffer.write_all(b"\n")?;
        self.dst_writer.make_writer().write_all(&buffer)
    }
}

impl<W, F> Handler for JsonHandler<W, F>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    F: Formatter + Clone + Send + Sync,
{
    fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    fn handle(&self, record: &Record<'_>) -> Result<(), LoggerError> {
        let serialized = self.serialize(record)?;
        self.flush(serialized)?;
        Ok(())
    }
}
