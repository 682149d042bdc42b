//! Error types for parsing and expanding templates

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::formatter::{FormatterError, FormatterKind};
use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Malformed placeholder grammar
    #[error("syntax error at {}..{}: {message}", .span.start, .span.end)]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    /// Named reference missing from the context
    #[error("unknown formatter '{name}'")]
    UnknownFormatter { name: String, span: Span },

    /// Explicit or implicit index beyond the available entries
    #[error("formatter index {index} is out of range ({len} available)")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        span: Span,
    },

    #[error("{kind} formatter does not support {operation}")]
    Unsupported {
        kind: FormatterKind,
        operation: &'static str,
        span: Span,
    },

    #[error("invalid {kind} pattern '{pattern}': {reason}")]
    InvalidPattern {
        kind: FormatterKind,
        pattern: String,
        reason: String,
        span: Span,
    },

    #[error("time shift '{term}' is out of range")]
    TimeOutOfRange { term: String, span: Span },

    #[error("duplicate formatter name '{name}'")]
    DuplicateName { name: String },
}

impl FormatError {
    /// Attach a template location to a formatter failure
    pub fn from_formatter(err: FormatterError, span: Span) -> Self {
        match err {
            FormatterError::Unsupported { kind, operation } => FormatError::Unsupported {
                kind,
                operation,
                span,
            },
            FormatterError::InvalidPattern {
                kind,
                pattern,
                reason,
            } => FormatError::InvalidPattern {
                kind,
                pattern,
                reason,
                span,
            },
            FormatterError::TimeOutOfRange { term } => FormatError::TimeOutOfRange { term, span },
        }
    }

    /// Location in the template, when the error came from one
    pub fn span(&self) -> Option<&Span> {
        match self {
            FormatError::Syntax { span, .. }
            | FormatError::UnknownFormatter { span, .. }
            | FormatError::IndexOutOfRange { span, .. }
            | FormatError::Unsupported { span, .. }
            | FormatError::InvalidPattern { span, .. }
            | FormatError::TimeOutOfRange { span, .. } => Some(span),
            FormatError::DuplicateName { .. } => None,
        }
    }

    /// Format the error with template context using ariadne
    pub fn report(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("Error: {}\n", self);
        };

        let (message, label) = match self {
            FormatError::Syntax {
                message, expected, ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (message.clone(), format!("{}{}", message, expected_str))
            }
            other => {
                let message = other.to_string();
                (message.clone(), message)
            }
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {}\n", self),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for FormatError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => tok.to_string(),
                    None => "end of placeholder".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        // Format expected tokens nicely
        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(tok.to_string()),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of placeholder".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        FormatError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}
