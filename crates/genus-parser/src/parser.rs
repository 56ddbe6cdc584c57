//! Recursive-descent parser for type expressions.
//!
//! Grammar:
//!
//! ```text
//! type          := wildcard | (parameterized | raw) ("[" "]")*
//! wildcard      := "?" [ ("extends" | "super") type ]
//! parameterized := raw "<" type ("," type)* ">"
//! raw           := IDENT ("." IDENT)*
//! ```
//!
//! The parser makes a single pass over the token buffer with one token of
//! lookahead and never backtracks. Class names are kept exactly as written;
//! resolving unqualified names is the registry's job.
//!
//! A type carries at most [`MAX_ARRAY_DIMENSIONS`] array suffixes. A suffix
//! after a bounded wildcard belongs to the bound (`? extends T[]`), so a
//! wildcard itself never becomes an array element.

use genus_core::{ClassName, ParseErrorKind, Span, TypeNode, TypeParseError};
use tracing::trace;

use crate::lexer::{Lexer, Token, TokenKind};

/// Default bound on nested type arguments and wildcard bounds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Most `[]` suffixes a single type may carry.
pub const MAX_ARRAY_DIMENSIONS: u32 = 255;

/// Parser state over a lexed type expression.
pub struct TypeParser<'src> {
    source: &'src str,
    buffer: Vec<Token<'src>>,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'src> TypeParser<'src> {
    /// Lex `source` and prepare to parse it.
    pub fn new(source: &'src str) -> Result<Self, TypeParseError> {
        Ok(Self {
            source,
            buffer: Lexer::new(source).tokenize()?,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole input as exactly one type.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse(mut self) -> Result<TypeNode, TypeParseError> {
        let node = self.parse_type()?;
        if !self.check(TokenKind::Eof) {
            let token = self.peek();
            return Err(self.error(
                ParseErrorKind::TrailingInput,
                token.span,
                format!("unexpected {} after complete type", token.kind),
            ));
        }
        trace!(source = self.source, ?node, "parsed type expression");
        Ok(node)
    }

    // =========================================
    // Productions
    // =========================================

    /// Parse one `type`, including array suffixes.
    fn parse_type(&mut self) -> Result<TypeNode, TypeParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let span = self.peek().span;
            return Err(self.error(
                ParseErrorKind::NestingTooDeep,
                span,
                format!("type nesting exceeds {} levels", self.max_depth),
            ));
        }

        let token = self.peek();
        let mut node = match token.kind {
            TokenKind::Question => self.parse_wildcard()?,
            TokenKind::Identifier => self.parse_class_type()?,
            TokenKind::Eof => {
                return Err(self.error(
                    ParseErrorKind::UnexpectedEof,
                    token.span,
                    "expected a type",
                ));
            }
            kind => {
                return Err(self.error(
                    ParseErrorKind::ExpectedIdentifier,
                    token.span,
                    format!("expected a type, found {kind}"),
                ));
            }
        };

        if node.is_wildcard() && self.check(TokenKind::LeftBracket) {
            let span = token.span.merge(self.peek().span);
            return Err(self.error(
                ParseErrorKind::WildcardArray,
                span,
                "a wildcard cannot be an array element",
            ));
        }

        let mut dims = 0;
        while let Some(open) = self.eat(TokenKind::LeftBracket) {
            let Some(close) = self.eat(TokenKind::RightBracket) else {
                return Err(self.error(
                    ParseErrorKind::UnbalancedBrackets,
                    open.span,
                    "expected ']' after '['",
                ));
            };
            dims += 1;
            if dims > MAX_ARRAY_DIMENSIONS {
                return Err(self.error(
                    ParseErrorKind::TooManyDimensions,
                    open.span.merge(close.span),
                    format!("array types are limited to {MAX_ARRAY_DIMENSIONS} dimensions"),
                ));
            }
            node = TypeNode::array(node);
        }

        self.depth -= 1;
        Ok(node)
    }

    /// Parse `? [extends|super type]`.
    fn parse_wildcard(&mut self) -> Result<TypeNode, TypeParseError> {
        let question = self.advance();

        let node = if self.eat(TokenKind::Extends).is_some() {
            TypeNode::wildcard_extends(self.parse_type()?)
        } else if self.eat(TokenKind::Super).is_some() {
            TypeNode::wildcard_super(self.parse_type()?)
        } else {
            TypeNode::unbounded()
        };

        if self.check(TokenKind::Extends) || self.check(TokenKind::Super) {
            let second = self.peek();
            return Err(self.error(
                ParseErrorKind::WildcardBothBounds,
                question.span.merge(second.span),
                "a wildcard may declare either 'extends' or 'super', not both",
            ));
        }
        Ok(node)
    }

    /// Parse a qualified name with optional type arguments.
    fn parse_class_type(&mut self) -> Result<TypeNode, TypeParseError> {
        let raw = self.parse_qualified_name()?;
        if !self.check(TokenKind::Less) {
            return Ok(TypeNode::raw(raw));
        }
        let args = self.parse_type_args()?;
        Ok(TypeNode::parameterized(raw, args))
    }

    /// Parse `IDENT ("." IDENT)*`.
    fn parse_qualified_name(&mut self) -> Result<ClassName, TypeParseError> {
        let first = self.expect_identifier()?;
        let mut name = first.lexeme.to_string();
        while self.eat(TokenKind::Dot).is_some() {
            let segment = self.expect_identifier()?;
            name.push('.');
            name.push_str(segment.lexeme);
        }
        Ok(ClassName::new(name))
    }

    /// Parse `"<" type ("," type)* ">"`.
    fn parse_type_args(&mut self) -> Result<Vec<TypeNode>, TypeParseError> {
        let open = self.advance();
        let mut args = Vec::new();

        loop {
            if self.check(TokenKind::Eof) {
                return Err(self.unclosed_angle(open.span));
            }
            args.push(self.parse_type()?);

            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            if self.eat(TokenKind::Greater).is_some() {
                return Ok(args);
            }

            let token = self.peek();
            if token.kind == TokenKind::Eof {
                return Err(self.unclosed_angle(open.span));
            }
            return Err(self.error(
                ParseErrorKind::UnexpectedToken,
                token.span,
                format!("expected ',' or '>', found {}", token.kind),
            ));
        }
    }

    // =========================================
    // Token helpers
    // =========================================

    #[inline]
    fn peek(&self) -> Token<'src> {
        // the buffer always ends with Eof and position never passes it
        self.buffer[self.position.min(self.buffer.len() - 1)]
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect_identifier(&mut self) -> Result<Token<'src>, TypeParseError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Identifier => Ok(self.advance()),
            TokenKind::Eof => Err(self.error(
                ParseErrorKind::UnexpectedEof,
                token.span,
                "expected identifier",
            )),
            kind => Err(self.error(
                ParseErrorKind::ExpectedIdentifier,
                token.span,
                format!("expected identifier, found {kind}"),
            )),
        }
    }

    fn unclosed_angle(&self, open: Span) -> TypeParseError {
        self.error(
            ParseErrorKind::UnbalancedAngles,
            open,
            "expected '>' to close type arguments",
        )
    }

    fn error(
        &self,
        kind: ParseErrorKind,
        span: Span,
        message: impl Into<String>,
    ) -> TypeParseError {
        TypeParseError::new(kind, span, self.source, message)
    }
}
