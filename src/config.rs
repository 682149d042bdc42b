//! Context files: named formatters loaded from TOML
//!
//! ```toml
//! [metadata]
//! timezone = "Europe/Moscow"
//!
//! [formatters]
//! path = "/path/to/logs"
//! date = 2016-09-10T11:12:13Z
//! num = 12
//! ratio = 4.5
//! ```
//!
//! Entries keep the order of the file, so `${0}` is the first formatter listed.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::context::ContextBuilder;
use crate::error::FormatError;
use crate::formatter::Formatter;

/// Errors that can occur when loading or parsing context files
#[derive(Error, Debug)]
pub enum ContextFileError {
    #[error("Failed to read context file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse context TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Unknown time zone '{0}'")]
    UnknownTimezone(String),
    #[error("Formatter '{name}' has unsupported {kind} value")]
    UnsupportedValue { name: String, kind: &'static str },
    #[error("Formatter '{name}' has invalid date-time '{value}'")]
    InvalidDatetime { name: String, value: String },
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Named formatters read from a context file
#[derive(Debug, Clone)]
pub struct ContextFile {
    /// Zone for local date-times and for converting offset date-times
    pub timezone: Tz,
    /// Formatters in file order
    pub formatters: Vec<(String, Formatter)>,
}

/// TOML structure for deserializing context files
#[derive(Deserialize)]
struct TomlContext {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    formatters: toml::Table,
}

#[derive(Deserialize)]
struct TomlMetadata {
    timezone: Option<String>,
}

/// Look up an IANA zone name
pub fn parse_timezone(name: &str) -> Result<Tz, ContextFileError> {
    name.parse::<Tz>()
        .map_err(|_| ContextFileError::UnknownTimezone(name.to_string()))
}

impl ContextFile {
    /// Load a context file from disk
    pub fn from_file(path: &Path) -> Result<Self, ContextFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a context file from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ContextFileError> {
        let parsed: TomlContext = toml::from_str(content)?;

        let timezone = match parsed.metadata.and_then(|m| m.timezone) {
            Some(name) => parse_timezone(&name)?,
            None => Tz::UTC,
        };

        let formatters = parsed
            .formatters
            .into_iter()
            .map(|(name, value)| {
                let formatter = formatter_from_toml(&name, value, timezone)?;
                Ok((name, formatter))
            })
            .collect::<Result<Vec<_>, ContextFileError>>()?;

        tracing::debug!(count = formatters.len(), %timezone, "loaded context file");
        Ok(Self {
            timezone,
            formatters,
        })
    }

    /// Register every formatter on `builder`
    pub fn apply(self, builder: ContextBuilder) -> ContextBuilder {
        self.formatters
            .into_iter()
            .fold(builder, |builder, (name, formatter)| {
                builder.add_formatter(name, formatter)
            })
    }
}

fn formatter_from_toml(
    name: &str,
    value: toml::Value,
    timezone: Tz,
) -> Result<Formatter, ContextFileError> {
    let unsupported = |kind| ContextFileError::UnsupportedValue {
        name: name.to_string(),
        kind,
    };

    match value {
        toml::Value::String(s) => Ok(Formatter::Text(s)),
        toml::Value::Integer(n) => Ok(Formatter::Integer(n)),
        toml::Value::Float(f) => Ok(Formatter::Float(f)),
        toml::Value::Datetime(datetime) => {
            if datetime.date.is_none() {
                return Err(unsupported("time-only"));
            }
            let text = datetime.to_string();
            parse_datetime(&text, timezone).ok_or_else(|| ContextFileError::InvalidDatetime {
                name: name.to_string(),
                value: text,
            })
        }
        toml::Value::Boolean(_) => Err(unsupported("boolean")),
        toml::Value::Array(_) => Err(unsupported("array")),
        toml::Value::Table(_) => Err(unsupported("table")),
    }
}

/// Parse an RFC 3339 date-time, a local date-time or a date into a time formatter
///
/// Values with an offset are converted into `timezone`; values without one are read
/// as wall-clock time in it.
pub fn parse_datetime(text: &str, timezone: Tz) -> Option<Formatter> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(Formatter::Time(datetime.with_timezone(&timezone)));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    timezone
        .from_local_datetime(&naive)
        .single()
        .map(Formatter::Time)
}

/// Turn a command-line value into a formatter
///
/// Integers, floats, date-times and dates are recognised; anything else is text.
pub fn infer_value(raw: &str, timezone: Tz) -> Formatter {
    if let Ok(n) = raw.parse::<i64>() {
        return Formatter::Integer(n);
    }

    let numeric = raw
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if numeric && raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = raw.parse::<f64>() {
            return Formatter::Float(f);
        }
    }

    parse_datetime(raw, timezone).unwrap_or_else(|| Formatter::Text(raw.to_string()))
}
