//! pathfmt - Expand path templates with dates, counters and text
//!
//! A template mixes literal text with placeholders. `${name}` refers to a named
//! formatter, `${1}` to a position and `${}` to the next unused position. A
//! placeholder may shift a time value and choose a pattern:
//! `${date - 2 months 1 day | %Y%m%d}`. `$name` is shorthand for `${name}`.
//!
//! # Example
//!
//! ```rust
//! use chrono::TimeZone;
//! use chrono_tz::UTC;
//! use pathfmt::{format, ContextBuilder};
//!
//! let context = ContextBuilder::new()
//!     .add_formatter("path", "/path/to/logs")
//!     .add_formatter("date", UTC.with_ymd_and_hms(2016, 9, 10, 11, 12, 13).unwrap())
//!     .add_formatter("num", 12)
//!     .build()
//!     .unwrap();
//!
//! let out = format("${path}/x.${date - 2 months 1 day | %Y%m%d}.${num|04}", &context).unwrap();
//! assert_eq!(out, "/path/to/logs/x.20160709.0012");
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod parser;

pub use context::{Context, ContextBuilder};
pub use error::FormatError;
pub use formatter::{Formatter, FormatterError, FormatterKind};
pub use parser::{parse, Template};

/// Expand `template` against a context
///
/// Returns the first error in template order; no partial output is produced.
pub fn format(template: &str, context: &Context) -> Result<String, FormatError> {
    parse(template).render(context)
}

/// Expand `template` against positional values
///
/// There is no error channel: a placeholder that fails is replaced by a
/// `%!(<error>)` sentinel and logged at `warn` level. Use [`try_formatf`] to get the
/// error instead. The [`formatf!`] macro accepts values of mixed types.
///
/// # Example
///
/// ```rust
/// use pathfmt::{formatf, Formatter};
///
/// let out = formatf("${} ${|03}", [Formatter::from("run"), Formatter::from(7)]);
/// assert_eq!(out, "run 007");
/// ```
pub fn formatf<I, F>(template: &str, values: I) -> String
where
    I: IntoIterator<Item = F>,
    F: Into<Formatter>,
{
    parse(template).render_lossy(&Context::from_values(values))
}

/// Like [`formatf`], returning the first error
pub fn try_formatf<I, F>(template: &str, values: I) -> Result<String, FormatError>
where
    I: IntoIterator<Item = F>,
    F: Into<Formatter>,
{
    parse(template).render(&Context::from_values(values))
}

/// Expand a template against positional values of any supported type
///
/// ```rust
/// use chrono::TimeZone;
/// use chrono_tz::UTC;
///
/// let date = UTC.with_ymd_and_hms(2018, 10, 19, 18, 0, 5).unwrap();
/// let out = pathfmt::formatf!("${} ${} ${|1.1} ${1} ${|%Y}", "a", 2, 4.5, date);
/// assert_eq!(out, "a 2 4.5 2 2018");
/// ```
#[macro_export]
macro_rules! formatf {
    ($template:expr $(, $value:expr)* $(,)?) => {{
        let values: ::std::vec::Vec<$crate::Formatter> =
            ::std::vec![$($crate::Formatter::from($value)),*];
        $crate::formatf($template, values)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;
    use pretty_assertions::assert_eq;

    fn context() -> Context {
        ContextBuilder::new()
            .add_formatter("date", UTC.with_ymd_and_hms(2016, 9, 10, 11, 12, 13).unwrap())
            .add_formatter("path", "/path/to/logs")
            .add_formatter("num", 12)
            .build()
            .unwrap()
    }

    #[test]
    fn test_format_without_placeholders() {
        assert_eq!(format("plain/path.log", &context()).unwrap(), "plain/path.log");
        assert_eq!(format("", &context()).unwrap(), "");
    }

    #[test]
    fn test_format_bare_names() {
        assert_eq!(format("$path$num", &context()).unwrap(), "/path/to/logs12");
        assert_eq!(format("$path abc", &context()).unwrap(), "/path/to/logs abc");
    }

    #[test]
    fn test_formatf_macro_with_no_values() {
        assert_eq!(formatf!("static"), "static");
    }

    #[test]
    fn test_formatf_sentinel_for_missing_value() {
        assert_eq!(
            formatf!("${}-${}", "only"),
            "only-%!(formatter index 1 is out of range (1 available))"
        );
    }

    #[test]
    fn test_try_formatf_reports_error() {
        let err = try_formatf("${+1 day}", [Formatter::from("x")]).unwrap_err();
        assert!(matches!(err, FormatError::Unsupported { .. }));
    }
}
