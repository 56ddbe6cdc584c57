//! Error types for the type engine.
//!
//! ## Error Hierarchy
//!
//! ```text
//! GenusError (top-level wrapper)
//! ├── TypeParseError      - malformed textual type expressions
//! ├── TypeResolutionError - inconsistent descriptors, recursion overflow
//! └── RegistrationError   - inconsistent host registry tables
//! ```
//!
//! Each phase error can be handled on its own or converted into
//! [`GenusError`] with `?`.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Parse Errors
// ============================================================================

/// Categories of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A character that cannot start any token.
    UnexpectedChar,
    /// A token that does not fit the grammar at this point.
    UnexpectedToken,
    /// Input ended in the middle of a type.
    UnexpectedEof,
    /// A raw type name was expected.
    ExpectedIdentifier,
    /// A `<` was never closed by `>`.
    UnbalancedAngles,
    /// A `[` was not followed by `]`.
    UnbalancedBrackets,
    /// A wildcard declared both `extends` and `super`.
    WildcardBothBounds,
    /// Input continued after a complete type.
    TrailingInput,
    /// Type arguments nested deeper than the configured limit.
    NestingTooDeep,
    /// More `[]` suffixes than an array type may carry.
    TooManyDimensions,
    /// A `[]` suffix directly on a wildcard.
    WildcardArray,
}

impl ParseErrorKind {
    /// Get a human-readable description of this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedChar => "unexpected character",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEof => "unexpected end of input",
            ParseErrorKind::ExpectedIdentifier => "expected identifier",
            ParseErrorKind::UnbalancedAngles => "unbalanced angle brackets",
            ParseErrorKind::UnbalancedBrackets => "unbalanced brackets",
            ParseErrorKind::WildcardBothBounds => "wildcard with both bounds",
            ParseErrorKind::TrailingInput => "trailing input",
            ParseErrorKind::NestingTooDeep => "nesting too deep",
            ParseErrorKind::TooManyDimensions => "too many array dimensions",
            ParseErrorKind::WildcardArray => "array of wildcard",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A malformed textual type expression.
///
/// Carries the offending substring (`fragment`) and its location so callers
/// can reject the input with a precise message.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span} near '{fragment}': {message}")]
pub struct TypeParseError {
    /// The category of this error.
    pub kind: ParseErrorKind,
    /// Location of the offending text.
    pub span: Span,
    /// The offending substring of the input.
    pub fragment: String,
    /// A detailed error message.
    pub message: String,
}

impl TypeParseError {
    /// Create a new parse error, slicing the fragment out of `source`.
    pub fn new(kind: ParseErrorKind, span: Span, source: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            fragment: span.slice(source).to_string(),
            message: message.into(),
        }
    }

    /// Byte offset of the error.
    pub fn offset(&self) -> usize {
        self.span.offset as usize
    }

    /// Format the error with the source line and a caret under the error.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = format!("error: {} at {}\n", self.kind, self.span);
        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }
        output.push_str(&format!("  | {source}\n"));

        // columns are counted in chars so the caret lines up under non-ASCII names
        let before = source.get(..self.offset()).unwrap_or_default();
        let column = before.chars().count();
        let width = self.fragment.chars().count();
        let indent = " ".repeat(column);
        let pointer = if width <= 1 {
            "^".to_string()
        } else {
            "^".to_string() + &"~".repeat(width - 1)
        };
        output.push_str(&format!("  | {indent}{pointer}\n"));
        output
    }
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Structural inconsistency found while building a type.
///
/// These indicate bad host metadata rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeResolutionError {
    /// A parameterized type supplied the wrong number of arguments.
    #[error("'{class}' expects {expected} type argument(s), got {got}")]
    ArityMismatch {
        class: String,
        expected: usize,
        got: usize,
    },

    /// A wildcard declared both an upper and a lower bound.
    #[error("wildcard cannot have both an upper and a lower bound: {detail}")]
    InvalidWildcard { detail: String },

    /// Resolution nested deeper than the configured limit.
    #[error("type resolution exceeded depth limit {limit} while resolving '{class}'")]
    RecursionLimit { limit: usize, class: String },
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating a type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A class with the same name was already registered.
    #[error("duplicate class: {0}")]
    DuplicateClass(String),

    /// Registering the class would make the inheritance graph cyclic.
    #[error("circular inheritance for '{class}' through '{supertype}'")]
    CircularInheritance { class: String, supertype: String },

    /// A supertype descriptor is not a class or parameterized class.
    #[error("'{class}' declares invalid supertype '{supertype}'")]
    InvalidSupertype { class: String, supertype: String },

    /// A type parameter name is declared twice on one class.
    #[error("'{class}' declares type parameter '{name}' more than once")]
    DuplicateTypeParam { class: String, name: String },

    /// A capability tag needs more type parameters than the class declares.
    #[error("'{class}' is tagged {capability} but declares only {arity} type parameter(s)")]
    CapabilityArity {
        class: String,
        capability: String,
        arity: usize,
    },
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Top-level error wrapping every phase error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenusError {
    /// A parse error.
    #[error(transparent)]
    Parse(#[from] TypeParseError),

    /// A resolution error.
    #[error(transparent)]
    Resolution(#[from] TypeResolutionError),

    /// A registration error.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl GenusError {
    /// Check if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, GenusError::Parse(_))
    }

    /// Check if this is a resolution error.
    pub fn is_resolution(&self) -> bool {
        matches!(self, GenusError::Resolution(_))
    }

    /// Check if this is a registration error.
    pub fn is_registration(&self) -> bool {
        matches!(self, GenusError::Registration(_))
    }
}
