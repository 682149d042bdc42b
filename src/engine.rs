//! Template expansion
//!
//! Walks the segments of a parsed [`Template`] and renders each placeholder against a
//! [`Context`]: resolve the reference, apply the delta clause, render with the
//! pattern.

use crate::context::{Context, Resolver};
use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::parser::ast::{Placeholder, Segment, Spanned, Template};

/// Text inserted by the lossy entry points in place of a failed placeholder
pub fn sentinel(err: &FormatError) -> String {
    format!("%!({})", err)
}

impl Template {
    /// Parse a template, keeping malformed placeholders as segments
    pub fn parse(source: &str) -> Template {
        crate::parser::parse(source)
    }

    /// Parse a template, failing on the first malformed placeholder
    pub fn compile(source: &str) -> Result<Template, FormatError> {
        let template = crate::parser::parse(source);
        if let Some(err) = template.errors().next() {
            return Err(err.clone());
        }
        Ok(template)
    }

    /// Syntax errors in source order
    pub fn errors(&self) -> impl Iterator<Item = &FormatError> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Malformed(err) => Some(err),
            _ => None,
        })
    }

    /// Well-formed placeholders in source order
    pub fn placeholders(&self) -> impl Iterator<Item = &Spanned<Placeholder>> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        })
    }

    /// Expand against `context`, stopping at the first failing placeholder
    pub fn render(&self, context: &Context) -> Result<String, FormatError> {
        let mut resolver = Resolver::new(context);
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&render_segment(segment, &mut resolver)?);
        }
        Ok(out)
    }

    /// Expand against `context`, replacing each failing placeholder with a
    /// `%!(...)` sentinel
    pub fn render_lossy(&self, context: &Context) -> String {
        let mut resolver = Resolver::new(context);
        let mut out = String::new();
        for segment in &self.segments {
            match render_segment(segment, &mut resolver) {
                Ok(text) => out.push_str(&text),
                Err(err) => {
                    tracing::warn!(error = %err, "placeholder could not be rendered");
                    out.push_str(&sentinel(&err));
                }
            }
        }
        out
    }
}

fn render_segment(segment: &Segment, resolver: &mut Resolver<'_>) -> Result<String, FormatError> {
    match segment {
        Segment::Literal(text) => Ok(text.clone()),
        Segment::Placeholder(placeholder) => render_placeholder(placeholder, resolver),
        Segment::Malformed(err) => Err(err.clone()),
    }
}

fn render_placeholder(
    placeholder: &Spanned<Placeholder>,
    resolver: &mut Resolver<'_>,
) -> Result<String, FormatError> {
    let Placeholder {
        reference,
        delta,
        pattern,
    } = &placeholder.node;

    let formatter = resolver.resolve(reference)?;

    let shifted: Option<Formatter> = if delta.is_empty() {
        None
    } else {
        let terms: Vec<_> = delta.iter().map(|term| term.node).collect();
        let delta_span = delta[0].span.start..delta[delta.len() - 1].span.end;
        Some(
            formatter
                .apply_delta(&terms)
                .map_err(|err| FormatError::from_formatter(err, delta_span))?,
        )
    };
    let formatter = shifted.as_ref().unwrap_or(formatter);

    let rendered = formatter
        .render(pattern.as_ref().map(|p| p.node.as_str()))
        .map_err(|err| {
            let span = pattern
                .as_ref()
                .map(|p| p.span.clone())
                .unwrap_or_else(|| placeholder.span.clone());
            FormatError::from_formatter(err, span)
        })?;

    tracing::debug!(
        reference = %reference.node,
        kind = %formatter.kind(),
        rendered = %rendered,
        "resolved placeholder"
    );
    Ok(rendered)
}
