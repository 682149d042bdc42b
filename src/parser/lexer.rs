//! Lexers for path templates using logos
//!
//! Two token sets live here: [`Piece`] splits a whole template into literal runs and
//! placeholders, and [`Token`] tokenizes the head of a single `${...}` placeholder
//! (everything before the `|` pattern separator).

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Top-level template pieces
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    #[regex(r"[^$]+")]
    Literal,

    // Longest match wins, so a closed placeholder beats the unterminated form
    #[regex(r"\$\{[^}]*\}")]
    Braced,
    #[regex(r"\$\{[^}]*")]
    Unterminated,

    #[regex(r"\$[a-zA-Z0-9_]+")]
    Bare,

    /// A `$` that starts nothing
    #[token("$")]
    Dollar,
}

/// Split a template into pieces with spans
pub fn pieces(input: &str) -> impl Iterator<Item = (Piece, Span)> + '_ {
    // Every character is covered by some rule; treat anything unexpected as text
    Piece::lexer(input)
        .spanned()
        .map(|(piece, span)| (piece.unwrap_or(Piece::Literal), span))
}

/// Failures while tokenizing a placeholder head
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    UnexpectedCharacter,
    IntegerOverflow,
}

fn parse_integer(lex: &mut logos::Lexer<Token>) -> Result<u64, LexError> {
    lex.slice()
        .parse::<u64>()
        .map_err(|_| LexError::IntegerOverflow)
}

/// Placeholder head tokens
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(error = LexError)]
pub enum Token {
    // Whitespace is significant: it separates the reference from the delta clause
    #[regex(r"[ \t\r\n]+")]
    Space,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[regex(r"[0-9]+", parse_integer)]
    Integer(u64),

    // Unit keywords are plain identifiers so formatters may be named `day`
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Space => write!(f, "whitespace"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Integer(n) => write!(f, "number {}", n),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
        }
    }
}

/// Lex a placeholder head into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Result<Token, LexError>, Span)> + '_ {
    Token::lexer(input).spanned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_kinds(input: &str) -> Vec<(Piece, &str)> {
        pieces(input).map(|(p, span)| (p, &input[span])).collect()
    }

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t.unwrap()).collect()
    }

    #[test]
    fn test_literal_only() {
        assert_eq!(
            piece_kinds("/var/log/app.log"),
            vec![(Piece::Literal, "/var/log/app.log")]
        );
    }

    #[test]
    fn test_braced_and_bare() {
        assert_eq!(
            piece_kinds("${path}/x.$num abc"),
            vec![
                (Piece::Braced, "${path}"),
                (Piece::Literal, "/x."),
                (Piece::Bare, "$num"),
                (Piece::Literal, " abc"),
            ]
        );
    }

    #[test]
    fn test_adjacent_bare_placeholders() {
        assert_eq!(
            piece_kinds("$path$num"),
            vec![(Piece::Bare, "$path"), (Piece::Bare, "$num")]
        );
    }

    #[test]
    fn test_unterminated_placeholder() {
        assert_eq!(
            piece_kinds("a.${date | %Y"),
            vec![(Piece::Literal, "a."), (Piece::Unterminated, "${date | %Y")]
        );
    }

    #[test]
    fn test_lone_dollar() {
        assert_eq!(
            piece_kinds("cost $ 5"),
            vec![
                (Piece::Literal, "cost "),
                (Piece::Dollar, "$"),
                (Piece::Literal, " 5"),
            ]
        );
    }

    #[test]
    fn test_head_tokens() {
        assert_eq!(
            tokens("date - 2 months"),
            vec![
                Token::Ident("date".to_string()),
                Token::Space,
                Token::Minus,
                Token::Space,
                Token::Integer(2),
                Token::Space,
                Token::Ident("months".to_string()),
            ]
        );
    }

    #[test]
    fn test_compact_delta_tokens() {
        assert_eq!(
            tokens("+1day"),
            vec![
                Token::Plus,
                Token::Integer(1),
                Token::Ident("day".to_string())
            ]
        );
    }

    #[test]
    fn test_integer_overflow() {
        let results: Vec<_> = lex("99999999999999999999999").map(|(t, _)| t).collect();
        assert_eq!(results, vec![Err(LexError::IntegerOverflow)]);
    }

    #[test]
    fn test_unexpected_character() {
        let results: Vec<_> = lex("date*").map(|(t, _)| t).collect();
        assert_eq!(
            results,
            vec![
                Ok(Token::Ident("date".to_string())),
                Err(LexError::UnexpectedCharacter)
            ]
        );
    }
}
