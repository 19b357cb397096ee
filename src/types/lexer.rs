//! Tokenizer for reference text such as `java.util.Map<K, ? extends V>`.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};

use super::parser::ReferenceParseError;

#[derive(Logos, Copy, Clone, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum Token {
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("@")]
    At,
    #[token("extends")]
    Extends,
    #[token("super")]
    Super,
    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*")]
    Ident,
    /// Identifier-like text starting with a digit, e.g. `123BadName`.
    #[regex(r"[0-9][\p{XID_Continue}$]*")]
    Number,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Lexeme<'a> {
    pub(crate) token: Token,
    pub(crate) text: &'a str,
    pub(crate) range: TextRange,
}

/// Split `text` into lexemes. Characters no token accepts are reported as
/// [`ReferenceParseError::UnexpectedToken`].
pub(crate) fn tokenize(text: &str) -> Result<Vec<Lexeme<'_>>, ReferenceParseError> {
    let mut lexer = Token::lexer(text);
    let mut out = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(offset(span.start), offset(span.end));
        match result {
            Ok(token) => out.push(Lexeme {
                token,
                text: lexer.slice(),
                range,
            }),
            Err(()) => {
                return Err(ReferenceParseError::UnexpectedToken {
                    found: SmolStr::new(lexer.slice()),
                    offset: range.start(),
                });
            }
        }
    }

    Ok(out)
}

#[inline]
fn offset(pos: usize) -> TextSize {
    TextSize::try_from(pos).unwrap_or(TextSize::from(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<Token> {
        tokenize(text).unwrap().into_iter().map(|l| l.token).collect()
    }

    #[test]
    fn test_qualified_generic() {
        assert_eq!(
            kinds("java.util.List<? extends T>"),
            vec![
                Token::Ident,
                Token::Dot,
                Token::Ident,
                Token::Dot,
                Token::Ident,
                Token::Lt,
                Token::Question,
                Token::Extends,
                Token::Ident,
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("extendsFoo"), vec![Token::Ident]);
        assert_eq!(kinds("superb"), vec![Token::Ident]);
    }

    #[test]
    fn test_leading_digit() {
        assert_eq!(kinds("123BadName"), vec![Token::Number]);
    }

    #[test]
    fn test_dollar_and_unicode_identifiers() {
        assert_eq!(kinds("Outer$Inner"), vec![Token::Ident]);
        assert_eq!(kinds("Größe"), vec![Token::Ident]);
    }

    #[test]
    fn test_ranges_skip_whitespace() {
        let lexemes = tokenize("  Map < K >").unwrap();
        assert_eq!(lexemes[0].text, "Map");
        assert_eq!(lexemes[0].range, TextRange::new(2.into(), 5.into()));
        assert_eq!(lexemes[2].range.start(), TextSize::from(8));
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("Foo-Bar").unwrap_err();
        assert_eq!(
            err,
            ReferenceParseError::UnexpectedToken {
                found: SmolStr::new("-"),
                offset: TextSize::from(3),
            }
        );
    }
}
