//! Parser implementation using chumsky
//!
//! The template is split into pieces by the logos [`Piece`] lexer. The head of each
//! `${...}` placeholder (reference and delta clause) is tokenized and parsed with
//! chumsky; the pattern after `|` is taken as raw text.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::FormatError;
use crate::parser::ast::*;
use crate::parser::lexer::{self, LexError, Piece, Token};

type Head = (Option<Spanned<Reference>>, Option<Vec<Spanned<DeltaTerm>>>);

/// Parse a template into segments
///
/// Parsing never fails as a whole: a placeholder that cannot be parsed becomes a
/// [`Segment::Malformed`] carrying its error, so callers decide whether to stop at it
/// or substitute it.
pub fn parse(source: &str) -> Template {
    let mut segments = Vec::new();

    for (piece, span) in lexer::pieces(source) {
        let text = &source[span.clone()];
        match piece {
            Piece::Literal | Piece::Dollar => push_literal(&mut segments, text),
            Piece::Bare => {
                let name_span = span.start + 1..span.end;
                segments.push(Segment::Placeholder(Spanned::new(
                    Placeholder::named(&text[1..], name_span),
                    span,
                )));
            }
            Piece::Braced => {
                let interior = &text[2..text.len() - 1];
                let segment = match parse_placeholder(interior, span.start + 2, span.clone()) {
                    Ok(placeholder) => Segment::Placeholder(Spanned::new(placeholder, span)),
                    Err(err) => Segment::Malformed(err),
                };
                segments.push(segment);
            }
            Piece::Unterminated => segments.push(Segment::Malformed(FormatError::Syntax {
                span,
                message: "Unterminated placeholder".to_string(),
                expected: vec!["'}'".to_string()],
            })),
        }
    }

    Template { segments }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Literal(prev)) = segments.last_mut() {
        prev.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

/// Parse the interior of `${...}`
///
/// `offset` is the byte position of `interior` in the template; `span` covers the
/// whole placeholder and is used for implicit references.
pub fn parse_placeholder(
    interior: &str,
    offset: usize,
    span: Span,
) -> Result<Placeholder, FormatError> {
    let content = interior.trim();
    let start = offset + (interior.len() - interior.trim_start().len());

    let (head, pattern) = match content.find('|') {
        Some(pos) => (&content[..pos], Some((&content[pos + 1..], start + pos + 1))),
        None => (content, None),
    };

    let (reference, delta) = parse_head(head.trim_end(), start)?;
    let reference = reference.unwrap_or_else(|| Spanned::new(Reference::Implicit, span));
    let pattern = pattern
        .map(|(raw, at)| parse_pattern(raw, at))
        .transpose()?;

    Ok(Placeholder {
        reference,
        delta: delta.unwrap_or_default(),
        pattern,
    })
}

fn parse_head(head: &str, offset: usize) -> Result<Head, FormatError> {
    let mut tokens = Vec::new();
    for (result, local) in lexer::lex(head) {
        let span = offset + local.start..offset + local.end;
        match result {
            Ok(token) => tokens.push((token, SimpleSpan::from(span))),
            Err(err) => {
                let slice = &head[local];
                let message = match err {
                    LexError::IntegerOverflow => format!("Number '{}' is too large", slice),
                    LexError::UnexpectedCharacter => format!("Unexpected character '{}'", slice),
                };
                return Err(FormatError::Syntax {
                    span,
                    message,
                    expected: Vec::new(),
                });
            }
        }
    }

    let end = offset + head.len();
    let token_stream = Stream::from_iter(tokens)
        // Split (Token, SimpleSpan) into token and span parts
        .map((end..end).into(), |(t, s): (_, _)| (t, s));

    head_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| match errs.into_iter().next() {
            Some(err) => err.into(),
            None => FormatError::Syntax {
                span: offset..end,
                message: "Invalid placeholder".to_string(),
                expected: Vec::new(),
            },
        })
}

fn parse_pattern(raw: &str, offset: usize) -> Result<Spanned<String>, FormatError> {
    let text = raw.trim();
    let start = offset + (raw.len() - raw.trim_start().len());
    let span = start..start + text.len();

    if text.is_empty() {
        return Err(FormatError::Syntax {
            span: offset.saturating_sub(1)..offset + raw.len(),
            message: "Missing pattern after '|'".to_string(),
            expected: vec!["pattern".to_string()],
        });
    }

    if let Some(rest) = text.strip_prefix('"') {
        return match rest.strip_suffix('"') {
            Some(inner) => Ok(Spanned::new(inner.to_string(), span)),
            None => Err(FormatError::Syntax {
                span,
                message: "Unterminated quote in pattern".to_string(),
                expected: vec!["'\"'".to_string()],
            }),
        };
    }

    if let Some((pos, c)) = text
        .char_indices()
        .find(|(_, c)| c.is_whitespace() || *c == '"' || *c == '|')
    {
        let message = if c.is_whitespace() {
            "Patterns containing whitespace must be quoted".to_string()
        } else {
            format!("Unexpected '{}' in pattern", c)
        };
        return Err(FormatError::Syntax {
            span: start + pos..start + pos + c.len_utf8(),
            message,
            expected: Vec::new(),
        });
    }

    Ok(Spanned::new(text.to_string(), span))
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn head_parser<'a, I>() -> impl Parser<'a, I, Head, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let ws = just(Token::Space).ignored();

    let reference = select! {
        Token::Ident(s) => Reference::Named(s),
        Token::Integer(n) => Reference::Indexed(usize::try_from(n).unwrap_or(usize::MAX)),
    }
    .map_with(|r, e| Spanned::new(r, span_range(&e.span())));

    let sign = select! {
        Token::Plus => Sign::Plus,
        Token::Minus => Sign::Minus,
    };

    let magnitude = select! {
        Token::Integer(n) => n,
    };

    let unit = select! {
        Token::Ident(s) => s,
    }
    .try_map(|s, span| {
        Unit::from_ident(&s)
            .ok_or_else(|| Rich::custom(span, format!("Unknown time unit '{}'", s)))
    });

    // `2 months`, `2months`
    let term = magnitude.then_ignore(ws.clone().or_not()).then(unit);

    // `-2`, `- 2`
    let signed = sign.then_ignore(ws.clone().or_not());

    let first_term = signed
        .clone()
        .then(term.clone())
        .map_with(|(sign, (magnitude, unit)), e| {
            Spanned::new(DeltaTerm::new(sign, magnitude, unit), span_range(&e.span()))
        });

    // Later terms may drop the sign and keep the previous one
    let next_term = ws.clone().ignore_then(
        signed
            .or_not()
            .then(term)
            .map_with(|(sign, (magnitude, unit)), e| {
                (sign, magnitude, unit, span_range(&e.span()))
            }),
    );

    let delta = first_term
        .then(next_term.repeated().collect::<Vec<_>>())
        .map(|(first, rest)| {
            let mut current = first.node.sign;
            let mut terms = vec![first];
            for (sign, magnitude, unit, span) in rest {
                current = sign.unwrap_or(current);
                terms.push(Spanned::new(DeltaTerm::new(current, magnitude, unit), span));
            }
            terms
        });

    choice((
        reference
            .map(Some)
            .then(ws.ignore_then(delta.clone()).or_not()),
        delta.map(|d| (None, Some(d))),
    ))
    .or_not()
    .map(|head| head.unwrap_or((None, None)))
    .then_ignore(end())
}
