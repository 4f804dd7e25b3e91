//! Link identity and label validation
//!
//! A link is keyed either by a generated UUID token or by a store-assigned
//! sequential integer. Which one is in force is a deployment switch
//! ([`IdStrategy`]), so identifiers arriving on the query string are parsed
//! through the active strategy.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::ValidationError;

/// Maximum length for labels, in characters
pub const MAX_LABEL_LEN: usize = 100;

/// Validated link label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(String);

impl Label {
    /// Create a new label, enforcing the length limit.
    ///
    /// Length is counted in characters, not bytes. An empty label is accepted.
    ///
    /// # Example
    /// ```
    /// use linkstore_server::models::Label;
    ///
    /// assert!(Label::new("home").is_ok());
    /// assert!(Label::new(&"x".repeat(101)).is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.chars().count() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field: "label",
                max: MAX_LABEL_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Validate a label taken from a decoded request body.
    ///
    /// Returns `Ok(None)` when the field is absent or `null`; callers decide
    /// whether that is acceptable.
    pub fn from_json(value: Option<JsonValue>) -> Result<Option<Self>, ValidationError> {
        match value {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::String(s)) => Self::new(&s).map(Some),
            Some(_) => Err(ValidationError::InvalidFormat {
                field: "label",
                reason: "must be a string",
            }),
        }
    }

    /// Get the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Link identifier
///
/// Always rendered as a string on the wire, whichever strategy produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkId {
    /// Random token generated by the server
    Token(String),
    /// Key assigned by the table's sequence
    Serial(i64),
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => f.write_str(token),
            Self::Serial(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for LinkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How new links get their identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Server generates a UUID v4 before inserting
    #[default]
    Uuid,
    /// The table assigns an auto-increment integer
    Sequential,
}

impl IdStrategy {
    /// Parse a raw identifier under this strategy.
    ///
    /// Returns `None` for input that cannot name a row: an empty string, or a
    /// non-integer under [`IdStrategy::Sequential`].
    pub fn parse_id(&self, raw: &str) -> Option<LinkId> {
        if raw.is_empty() {
            return None;
        }

        match self {
            Self::Uuid => Some(LinkId::Token(raw.to_owned())),
            Self::Sequential => raw.parse().ok().map(LinkId::Serial),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Sequential => "sequential",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "sequential" | "serial" => Ok(Self::Sequential),
            _ => Err(ValidationError::InvalidVariant {
                field: "id strategy",
                value: s.to_owned(),
            }),
        }
    }
}
