//! Textual type notation for the genus type engine.
//!
//! Converts between Java-style type expressions and [`TypeNode`]s:
//!
//! ```
//! use genus_parser::{FormatMode, format, parse};
//!
//! let node = parse("java.util.Map<java.lang.String, ? extends java.lang.Number>").unwrap();
//! assert_eq!(node.type_arg_count(), 2);
//! assert_eq!(format(&node, FormatMode::Simple), "Map<String, ? extends Number>");
//! ```
//!
//! Parsing never consults a registry: names are kept as written and
//! arities are not checked. Registry validation happens in the resolver.

mod format;
mod lexer;
mod parser;

pub use format::{FormatMode, Formatted, format, write_type};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{DEFAULT_MAX_DEPTH, MAX_ARRAY_DIMENSIONS, TypeParser};

use genus_core::{TypeNode, TypeParseError};

/// Parse a complete type expression.
pub fn parse(source: &str) -> Result<TypeNode, TypeParseError> {
    TypeParser::new(source)?.parse()
}

/// Parse with an explicit nesting limit.
pub fn parse_with_depth(source: &str, max_depth: usize) -> Result<TypeNode, TypeParseError> {
    TypeParser::new(source)?.with_max_depth(max_depth).parse()
}
