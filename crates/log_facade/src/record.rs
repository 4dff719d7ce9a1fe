//! The structured log event handed from a logger to a [`Handler`][crate::Handler].

use std::panic::Location;

use serde_json::Value;
use time::UtcDateTime;
use tracing::Level;

use super::Fields;

/// A single key-value pair attached to a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attribute<'a> {
    /// The attribute key.
    pub key: &'a str,

    /// The attribute value.
    pub value: &'a Value,
}

/// One structured log event.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    /// When the record was created.
    pub time: UtcDateTime,

    /// Severity of the record.
    pub level: Level,

    /// The fully formatted message.
    pub message: &'a str,

    /// Source location of the logging call in user code.
    pub location: &'static Location<'static>,

    /// Contextual attributes, in no particular order.
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> Record<'a> {
    /// Creates a record stamped with the current time and no attributes.
    pub fn new(level: Level, message: &'a str, location: &'static Location<'static>) -> Self {
        Self {
            time: UtcDateTime::now(),
            level,
            message,
            location,
            attributes: Vec::new(),
        }
    }

    /// Appends every pair of `fields` as an attribute.
    pub fn add_fields(&mut self, fields: &'a Fields) {
        self.attributes.reserve(fields.len());
        self.attributes
            .extend(fields.iter().map(|(key, value)| Attribute { key, value }));
    }
}
