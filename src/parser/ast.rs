//! Abstract Syntax Tree types for path templates

use crate::error::FormatError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A parsed template: literal runs and placeholders in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// One piece of a template
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text copied to the output as-is
    Literal(String),
    /// `${...}` or `$name`
    Placeholder(Spanned<Placeholder>),
    /// A placeholder that failed to parse; the error surfaces when rendered
    Malformed(FormatError),
}

/// The parsed interior of a single placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub reference: Spanned<Reference>,
    /// Time shifts, applied in order; empty when the placeholder has none
    pub delta: Vec<Spanned<DeltaTerm>>,
    pub pattern: Option<Spanned<String>>,
}

impl Placeholder {
    /// A bare `$name` placeholder
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self {
            reference: Spanned::new(Reference::Named(name.into()), span),
            delta: Vec::new(),
            pattern: None,
        }
    }
}

/// How a placeholder picks its formatter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// By registered name: `${date}`
    Named(String),
    /// By position in the context: `${1}`
    Indexed(usize),
    /// Next value under the cursor: `${}` or `${| 04}`
    Implicit,
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Named(name) => write!(f, "{}", name),
            Reference::Indexed(index) => write!(f, "{}", index),
            Reference::Implicit => write!(f, "<next>"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

/// Calendar and clock units accepted in a delta clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// Match a unit keyword, singular or plural
    pub fn from_ident(ident: &str) -> Option<Unit> {
        match ident {
            "year" | "years" => Some(Unit::Year),
            "month" | "months" => Some(Unit::Month),
            "day" | "days" => Some(Unit::Day),
            "hour" | "hours" => Some(Unit::Hour),
            "minute" | "minutes" => Some(Unit::Minute),
            "second" | "seconds" => Some(Unit::Second),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        }
    }
}

/// A single signed shift such as `- 2 months`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeltaTerm {
    pub sign: Sign,
    pub magnitude: u64,
    pub unit: Unit,
}

impl DeltaTerm {
    pub fn new(sign: Sign, magnitude: u64, unit: Unit) -> Self {
        Self {
            sign,
            magnitude,
            unit,
        }
    }
}

impl std::fmt::Display for DeltaTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self.sign {
            Sign::Plus => '+',
            Sign::Minus => '-',
        };
        let plural = if self.magnitude == 1 { "" } else { "s" };
        write!(f, "{}{} {}{}", sign, self.magnitude, self.unit.as_str(), plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_accepts_singular_and_plural() {
        assert_eq!(Unit::from_ident("day"), Some(Unit::Day));
        assert_eq!(Unit::from_ident("days"), Some(Unit::Day));
        assert_eq!(Unit::from_ident("years"), Some(Unit::Year));
        assert_eq!(Unit::from_ident("seconds"), Some(Unit::Second));
        assert_eq!(Unit::from_ident("weeks"), None);
        assert_eq!(Unit::from_ident("Day"), None);
    }

    #[test]
    fn test_delta_term_display() {
        assert_eq!(
            DeltaTerm::new(Sign::Minus, 2, Unit::Month).to_string(),
            "-2 months"
        );
        assert_eq!(DeltaTerm::new(Sign::Plus, 1, Unit::Day).to_string(), "+1 day");
    }
}
