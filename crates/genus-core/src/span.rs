//! Source location tracking for error reporting.
//!
//! Type expressions are single-line strings, so a [`Span`] is a byte offset
//! and a length into the parsed text.

use std::fmt;

/// A byte range of a parsed type expression.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first character (0-indexed).
    pub offset: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a new span from an offset and length.
    #[inline]
    pub fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Create a zero-length span at an offset.
    #[inline]
    pub fn point(offset: u32) -> Self {
        Self { offset, len: 0 }
    }

    /// Whether this span is empty (zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Offset one past the last byte.
    #[inline]
    pub fn end(&self) -> u32 {
        self.offset + self.len
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        let start = self.offset.min(other.offset);
        let end = self.end().max(other.end());
        Span {
            offset: start,
            len: end - start,
        }
    }

    /// The covered slice of `source`, clamped to its bounds.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        let start = (self.offset as usize).min(source.len());
        let end = (self.end() as usize).min(source.len());
        source.get(start..end).unwrap_or("")
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.offset, self.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}", self.offset)
    }
}
