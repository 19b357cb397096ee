//! Parser turning reference text into a [`CodeReference`].
//!
//! The grammar covers what can appear in a reference list of a Java
//! declaration:
//!
//! ```text
//! reference := annotation* segment ('.' annotation* segment)*
//! segment   := IDENT type_args?
//! type_args := '<' type_arg (',' type_arg)* '>'
//! type_arg  := annotation* ('?' (('extends' | 'super') type)? | type)
//! type      := annotation* (reference | PRIMITIVE) ('[' ']')*
//! ```
//!
//! A primitive is only accepted with at least one array dimension, so
//! `List<int[]>` parses and `List<int>` does not.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{StubId, TextRange, TextSize};

use super::lexer::{Lexeme, Token, tokenize};
use super::reference::{
    CodeReference, ReferenceKind, ReferenceSegment, TypeArgument, TypeRef, TypeRefBase,
    WildcardBound,
};

/// Options for [`ReferenceParser`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of `<...>` lists. Deeper text is rejected with
    /// [`ReferenceParseError::TooDeep`].
    pub max_type_argument_depth: usize,
    /// Accept and skip type-use annotations such as `@NonNull`.
    pub allow_type_annotations: bool,
    /// Accept `?` wildcards inside type arguments.
    pub allow_wildcards: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_type_argument_depth: 32,
            allow_type_annotations: true,
            allow_wildcards: true,
        }
    }
}

/// Why a piece of reference text could not be turned into a reference.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReferenceParseError {
    #[error("empty reference text")]
    Empty,
    #[error("`{text}` is not a valid identifier (offset {offset:?})")]
    InvalidIdentifier { text: SmolStr, offset: TextSize },
    #[error("unexpected `{found}` at offset {offset:?}")]
    UnexpectedToken { found: SmolStr, offset: TextSize },
    #[error("type argument list opened at offset {offset:?} is never closed")]
    UnbalancedTypeArguments { offset: TextSize },
    #[error("unexpected end of reference text")]
    UnexpectedEnd,
    #[error("type arguments nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Parses reference text in the context of a stub.
#[derive(Clone, Debug, Default)]
pub struct ReferenceParser {
    options: ParseOptions,
}

impl ReferenceParser {
    /// Create a parser with the default [`ParseOptions`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options this parser applies.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `text` as a single reference.
    ///
    /// `kind` overrides the kind the parser would infer from the text. The
    /// whole input must be consumed; trailing tokens are an error.
    pub fn parse_reference(
        &self,
        text: &str,
        context: StubId,
        kind: Option<ReferenceKind>,
    ) -> Result<CodeReference, ReferenceParseError> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(ReferenceParseError::Empty);
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
            options: &self.options,
            context,
        };
        let mut reference = parser.reference()?;
        if let Some(extra) = parser.peek() {
            return Err(unexpected(extra));
        }
        if let Some(kind) = kind {
            reference.set_kind(kind);
        }
        Ok(reference)
    }
}

struct Parser<'a> {
    tokens: Vec<Lexeme<'a>>,
    pos: usize,
    depth: usize,
    options: &'a ParseOptions,
    context: StubId,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Lexeme<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn at(&self, token: Token) -> bool {
        self.peek().is_some_and(|l| l.token == token)
    }

    fn bump(&mut self) -> Option<Lexeme<'a>> {
        let lexeme = self.peek()?;
        self.pos += 1;
        Some(lexeme)
    }

    fn expect(&mut self, token: Token) -> Result<Lexeme<'a>, ReferenceParseError> {
        match self.bump() {
            Some(lexeme) if lexeme.token == token => Ok(lexeme),
            Some(lexeme) => Err(unexpected(lexeme)),
            None => Err(ReferenceParseError::UnexpectedEnd),
        }
    }

    fn reference(&mut self) -> Result<CodeReference, ReferenceParseError> {
        self.annotations()?;
        let start = self
            .peek()
            .map(|l| l.range.start())
            .ok_or(ReferenceParseError::UnexpectedEnd)?;

        let mut segments = vec![self.segment()?];
        while self.at(Token::Dot) {
            self.bump();
            self.annotations()?;
            segments.push(self.segment()?);
        }

        // segment() consumed at least one token
        let end = self.tokens[self.pos - 1].range.end();
        Ok(CodeReference {
            kind: ReferenceKind::infer(&segments),
            segments,
            range: TextRange::new(start, end),
            context: self.context,
        })
    }

    fn annotations(&mut self) -> Result<(), ReferenceParseError> {
        while let Some(at) = self.peek().filter(|l| l.token == Token::At) {
            if !self.options.allow_type_annotations {
                return Err(unexpected(at));
            }
            self.bump();
            self.identifier()?;
            while self.at(Token::Dot) {
                self.bump();
                self.identifier()?;
            }
        }
        Ok(())
    }

    fn identifier(&mut self) -> Result<SmolStr, ReferenceParseError> {
        let lexeme = self.bump().ok_or(ReferenceParseError::UnexpectedEnd)?;
        match lexeme.token {
            Token::Ident if !is_reserved(lexeme.text) => Ok(SmolStr::new(lexeme.text)),
            Token::Ident | Token::Number | Token::Extends | Token::Super => {
                Err(ReferenceParseError::InvalidIdentifier {
                    text: SmolStr::new(lexeme.text),
                    offset: lexeme.range.start(),
                })
            }
            _ => Err(unexpected(lexeme)),
        }
    }

    fn segment(&mut self) -> Result<ReferenceSegment, ReferenceParseError> {
        let name = self.identifier()?;
        let type_arguments = if self.at(Token::Lt) {
            self.type_arguments()?
        } else {
            Vec::new()
        };
        Ok(ReferenceSegment {
            name,
            type_arguments,
        })
    }

    fn type_arguments(&mut self) -> Result<Vec<TypeArgument>, ReferenceParseError> {
        let open = self.expect(Token::Lt)?;
        let limit = self.options.max_type_argument_depth;
        self.depth += 1;
        if self.depth > limit {
            return Err(ReferenceParseError::TooDeep { limit });
        }

        let unbalanced = ReferenceParseError::UnbalancedTypeArguments {
            offset: open.range.start(),
        };
        let mut args = Vec::new();
        loop {
            if self.peek().is_none() {
                return Err(unbalanced);
            }
            args.push(self.type_argument()?);
            match self.bump() {
                Some(l) if l.token == Token::Comma => continue,
                Some(l) if l.token == Token::Gt => break,
                Some(l) => return Err(unexpected(l)),
                None => return Err(unbalanced),
            }
        }

        self.depth -= 1;
        Ok(args)
    }

    fn type_argument(&mut self) -> Result<TypeArgument, ReferenceParseError> {
        self.annotations()?;
        let Some(question) = self.peek().filter(|l| l.token == Token::Question) else {
            return Ok(TypeArgument::Type(self.type_ref()?));
        };
        if !self.options.allow_wildcards {
            return Err(unexpected(question));
        }
        self.bump();

        let bound = if self.at(Token::Extends) {
            self.bump();
            WildcardBound::Extends(Box::new(self.type_ref()?))
        } else if self.at(Token::Super) {
            self.bump();
            WildcardBound::Super(Box::new(self.type_ref()?))
        } else {
            WildcardBound::Unbounded
        };
        Ok(TypeArgument::Wildcard(bound))
    }

    fn type_ref(&mut self) -> Result<TypeRef, ReferenceParseError> {
        self.annotations()?;
        let primitive = self
            .peek()
            .filter(|l| l.token == Token::Ident && is_primitive(l.text));

        let base = match primitive {
            Some(lexeme) => {
                self.bump();
                TypeRefBase::Primitive(SmolStr::new(lexeme.text))
            }
            None => TypeRefBase::Class(self.reference()?),
        };

        let mut array_dimensions = 0u8;
        while self.at(Token::LBracket) {
            self.bump();
            self.expect(Token::RBracket)?;
            array_dimensions = array_dimensions.saturating_add(1);
        }

        if let (Some(lexeme), 0) = (primitive, array_dimensions) {
            return Err(unexpected(lexeme));
        }
        Ok(TypeRef {
            base,
            array_dimensions,
        })
    }
}

fn unexpected(lexeme: Lexeme<'_>) -> ReferenceParseError {
    ReferenceParseError::UnexpectedToken {
        found: SmolStr::new(lexeme.text),
        offset: lexeme.range.start(),
    }
}

fn is_primitive(text: &str) -> bool {
    matches!(
        text,
        "boolean" | "byte" | "short" | "char" | "int" | "long" | "float" | "double"
    )
}

// `extends` and `super` are lexed as their own tokens.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "false", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "switch", "synchronized", "this", "throw", "throws", "transient",
    "true", "try", "void", "volatile", "while", "_",
];

fn is_reserved(text: &str) -> bool {
    RESERVED.contains(&text)
}
