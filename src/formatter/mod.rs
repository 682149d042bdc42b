//! Formatter values
//!
//! A [`Formatter`] wraps one value that a placeholder can render. The set of kinds is
//! closed: time, integer, float and text. Only time values can be shifted by a delta
//! clause; every other kind reports [`FormatterError::Unsupported`].
//!
//! # Example
//!
//! ```rust
//! use chrono::TimeZone;
//! use chrono_tz::UTC;
//! use pathfmt::Formatter;
//!
//! let num = Formatter::from(12);
//! assert_eq!(num.render(Some("04")).unwrap(), "0012");
//!
//! let date = Formatter::from(UTC.with_ymd_and_hms(2016, 9, 10, 11, 12, 13).unwrap());
//! assert_eq!(date.render(Some("%Y%m%d")).unwrap(), "20160910");
//! ```

mod delta;
mod render;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::parser::ast::DeltaTerm;

pub use delta::shift;

/// Kinds of formatter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    Time,
    Integer,
    Float,
    Text,
}

impl std::fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormatterKind::Time => "time",
            FormatterKind::Integer => "integer",
            FormatterKind::Float => "float",
            FormatterKind::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// Failures raised by a formatter, before a template location is attached
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatterError {
    #[error("{kind} formatter does not support {operation}")]
    Unsupported {
        kind: FormatterKind,
        operation: &'static str,
    },

    #[error("invalid {kind} pattern '{pattern}': {reason}")]
    InvalidPattern {
        kind: FormatterKind,
        pattern: String,
        reason: String,
    },

    #[error("time shift '{term}' is out of range")]
    TimeOutOfRange { term: String },
}

/// A value that placeholders render
#[derive(Debug, Clone, PartialEq)]
pub enum Formatter {
    /// A point in time with its zone; the only kind that accepts deltas
    Time(DateTime<Tz>),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Formatter {
    pub fn kind(&self) -> FormatterKind {
        match self {
            Formatter::Time(_) => FormatterKind::Time,
            Formatter::Integer(_) => FormatterKind::Integer,
            Formatter::Float(_) => FormatterKind::Float,
            Formatter::Text(_) => FormatterKind::Text,
        }
    }

    /// Render the value, optionally following a kind-specific pattern
    ///
    /// - time: strftime specifiers (`%Y%m%d`); RFC 3339 without a pattern
    /// - integer: `[0]width`, zero- or space-padded
    /// - float: `[0][width][.precision]`, fixed-point
    /// - text: pattern ignored
    pub fn render(&self, pattern: Option<&str>) -> Result<String, FormatterError> {
        match self {
            Formatter::Time(time) => render::time(time, pattern),
            Formatter::Integer(value) => render::integer(*value, pattern),
            Formatter::Float(value) => render::float(*value, pattern),
            Formatter::Text(text) => Ok(text.clone()),
        }
    }

    /// Apply delta terms in order, producing a new formatter
    pub fn apply_delta(&self, terms: &[DeltaTerm]) -> Result<Formatter, FormatterError> {
        match self {
            Formatter::Time(time) => {
                let mut current = *time;
                for term in terms {
                    current = shift(&current, term).ok_or_else(|| {
                        FormatterError::TimeOutOfRange {
                            term: term.to_string(),
                        }
                    })?;
                    tracing::trace!(%term, result = %current, "applied time shift");
                }
                Ok(Formatter::Time(current))
            }
            Formatter::Integer(_) | Formatter::Float(_) | Formatter::Text(_) => {
                Err(FormatterError::Unsupported {
                    kind: self.kind(),
                    operation: "time shifts",
                })
            }
        }
    }
}

impl From<DateTime<Tz>> for Formatter {
    fn from(value: DateTime<Tz>) -> Self {
        Formatter::Time(value)
    }
}

impl From<DateTime<Utc>> for Formatter {
    fn from(value: DateTime<Utc>) -> Self {
        Formatter::Time(value.with_timezone(&Tz::UTC))
    }
}

macro_rules! integer_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Formatter {
                fn from(value: $ty) -> Self {
                    Formatter::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Formatter {
    fn from(value: f32) -> Self {
        Formatter::Float(f64::from(value))
    }
}

impl From<f64> for Formatter {
    fn from(value: f64) -> Self {
        Formatter::Float(value)
    }
}

impl From<&str> for Formatter {
    fn from(value: &str) -> Self {
        Formatter::Text(value.to_string())
    }
}

impl From<String> for Formatter {
    fn from(value: String) -> Self {
        Formatter::Text(value)
    }
}

impl From<&String> for Formatter {
    fn from(value: &String) -> Self {
        Formatter::Text(value.clone())
    }
}
