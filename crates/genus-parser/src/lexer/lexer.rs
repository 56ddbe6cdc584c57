//! Lexer for type expressions.
//!
//! The [`Lexer`] converts a type expression into a stream of [`Token`]s,
//! dispatching on the first character of each token. Whitespace between
//! tokens is skipped.

use genus_core::{ParseErrorKind, Span, TypeParseError};

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

/// Lexer for type expressions.
pub struct Lexer<'src> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Lex the whole input, ending with an `Eof` token.
    ///
    /// Stops at the first character that cannot start a token.
    pub fn tokenize(mut self) -> Result<Vec<Token<'src>>, TypeParseError> {
        let mut tokens = Vec::with_capacity(self.cursor.source().len() / 2 + 1);
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Result<Token<'src>, TypeParseError> {
        self.skip_whitespace();

        let start = self.cursor.offset();
        let Some(ch) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", Span::point(start)));
        };

        let kind = match ch {
            c if is_ident_start(c) => {
                let ident = self.cursor.eat_while(is_ident_continue);
                let kind = lookup_keyword(ident).unwrap_or(TokenKind::Identifier);
                return Ok(self.make_token(kind, start));
            }
            '.' => TokenKind::Dot,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            other => {
                let span = Span::new(start, other.len_utf8() as u32);
                return Err(TypeParseError::new(
                    ParseErrorKind::UnexpectedChar,
                    span,
                    self.cursor.source(),
                    format!("unexpected character '{other}'"),
                ));
            }
        };
        self.cursor.advance();
        Ok(self.make_token(kind, start))
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.check(|c| c.is_whitespace()) {
            self.cursor.advance();
        }
    }

    fn make_token(&self, kind: TokenKind, start: u32) -> Token<'src> {
        let lexeme = self.cursor.slice_from(start);
        Token::new(kind, lexeme, Span::new(start, lexeme.len() as u32))
    }
}
