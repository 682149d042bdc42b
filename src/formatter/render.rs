//! Pattern handling for each formatter kind

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use chrono_tz::Tz;

use super::{FormatterError, FormatterKind};

/// Default fractional digits for a float pattern without a precision
const DEFAULT_PRECISION: usize = 6;

/// Width and padding parsed from a numeric pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberPattern {
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
}

fn invalid(kind: FormatterKind, pattern: &str, reason: impl Into<String>) -> FormatterError {
    FormatterError::InvalidPattern {
        kind,
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

/// Parse `[0][width][.precision]`
///
/// Width and precision are capped at `u16::MAX`, the limit of runtime formatting
/// arguments.
fn number_pattern(
    kind: FormatterKind,
    pattern: &str,
    allow_precision: bool,
) -> Result<NumberPattern, FormatterError> {
    let (width_part, precision_part) = match pattern.split_once('.') {
        Some((_, _)) if !allow_precision => {
            return Err(invalid(kind, pattern, "precision is only valid for floats"));
        }
        Some((width, precision)) => (width, Some(precision)),
        None => (pattern, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(width_part) || !precision_part.map_or(true, all_digits) {
        return Err(invalid(kind, pattern, "expected digits"));
    }

    let zero_pad = width_part.starts_with('0');
    let width = if width_part.is_empty() {
        0
    } else {
        width_part
            .parse::<u16>()
            .map(usize::from)
            .map_err(|_| invalid(kind, pattern, "width is too large"))?
    };
    let precision = match precision_part {
        // `5.` means no fractional digits
        Some("") => Some(0),
        Some(digits) => Some(
            digits
                .parse::<u16>()
                .map(usize::from)
                .map_err(|_| invalid(kind, pattern, "precision is too large"))?,
        ),
        None => None,
    };

    Ok(NumberPattern {
        zero_pad,
        width,
        precision,
    })
}

pub(super) fn time(time: &DateTime<Tz>, pattern: Option<&str>) -> Result<String, FormatterError> {
    let Some(pattern) = pattern else {
        return Ok(time.to_rfc3339());
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid(
            FormatterKind::Time,
            pattern,
            "unknown strftime specifier",
        ));
    }

    let mut out = String::new();
    write!(out, "{}", time.format_with_items(items.iter()))
        .map_err(|_| invalid(FormatterKind::Time, pattern, "cannot format this time"))?;
    Ok(out)
}

pub(super) fn integer(value: i64, pattern: Option<&str>) -> Result<String, FormatterError> {
    let Some(pattern) = pattern else {
        return Ok(value.to_string());
    };

    let spec = number_pattern(FormatterKind::Integer, pattern, false)?;
    Ok(if spec.zero_pad {
        format!("{:0width$}", value, width = spec.width)
    } else {
        format!("{:>width$}", value, width = spec.width)
    })
}

pub(super) fn float(value: f64, pattern: Option<&str>) -> Result<String, FormatterError> {
    let Some(pattern) = pattern else {
        return Ok(value.to_string());
    };

    let spec = number_pattern(FormatterKind::Float, pattern, true)?;
    let precision = spec.precision.unwrap_or(DEFAULT_PRECISION);
    Ok(if spec.zero_pad {
        format!("{:0width$.precision$}", value, width = spec.width)
    } else {
        format!("{:>width$.precision$}", value, width = spec.width)
    })
}
