//! Token types for type expressions.

use genus_core::Span;
use std::fmt;

/// A token of a type expression.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'src> {
    /// The type of token.
    pub kind: TokenKind,
    /// The source text of this token.
    pub lexeme: &'src str,
    /// Location in source.
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.lexeme, self.span)
    }
}

/// All token kinds of the type grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier segment: `java`, `List`, `Map$Entry`
    Identifier,
    /// `extends`
    Extends,
    /// `super`
    Super,
    /// `.`
    Dot,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `,`
    Comma,
    /// `?`
    Question,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable description used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Extends => "'extends'",
            TokenKind::Super => "'super'",
            TokenKind::Dot => "'.'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::Comma => "','",
            TokenKind::Question => "'?'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Look up a keyword, returning `None` for plain identifiers.
#[inline]
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "extends" => Some(TokenKind::Extends),
        "super" => Some(TokenKind::Super),
        _ => None,
    }
}
