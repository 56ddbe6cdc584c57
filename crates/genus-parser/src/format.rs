//! Rendering type nodes back to text.

use std::fmt::{self, Write};

use genus_core::{ClassName, TypeKind, TypeNode};

/// How class names are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatMode {
    /// Names exactly as held by the node (`java.util.List`).
    #[default]
    Qualified,
    /// Last dotted segment only (`List`).
    Simple,
}

/// Render `node` in the type grammar.
///
/// Arguments are separated by `", "`; type variables print by name.
///
/// An array whose component is a wildcard has no textual form, since the
/// grammar binds a trailing `[]` to the wildcard's bound. Such nodes are only
/// built programmatically; they print as the wildcard followed by `[]`, which
/// does not parse back to the same node.
///
/// ```
/// use genus_core::TypeNode;
/// use genus_parser::{FormatMode, format};
///
/// let node = TypeNode::parameterized(
///     "java.util.List",
///     vec![TypeNode::wildcard_extends(TypeNode::raw("java.lang.Number"))],
/// );
/// assert_eq!(format(&node, FormatMode::Qualified), "java.util.List<? extends java.lang.Number>");
/// assert_eq!(format(&node, FormatMode::Simple), "List<? extends Number>");
/// ```
pub fn format(node: &TypeNode, mode: FormatMode) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_type(&mut out, node, mode);
    out
}

/// Write `node` into any formatter sink.
pub fn write_type<W: Write>(out: &mut W, node: &TypeNode, mode: FormatMode) -> fmt::Result {
    match node.kind() {
        TypeKind::Raw(class) => write_class(out, class, mode),
        TypeKind::Parameterized { raw, args } => {
            write_class(out, raw, mode)?;
            out.write_char('<')?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_type(out, arg, mode)?;
            }
            out.write_char('>')
        }
        TypeKind::Array(component) => {
            write_type(out, component, mode)?;
            out.write_str("[]")
        }
        TypeKind::Wildcard(wildcard) => {
            out.write_char('?')?;
            if let Some(upper) = wildcard.upper() {
                out.write_str(" extends ")?;
                write_type(out, upper, mode)?;
            } else if let Some(lower) = wildcard.lower() {
                out.write_str(" super ")?;
                write_type(out, lower, mode)?;
            }
            Ok(())
        }
        TypeKind::Variable(var) => out.write_str(&var.name),
    }
}

fn write_class<W: Write>(out: &mut W, class: &ClassName, mode: FormatMode) -> fmt::Result {
    match mode {
        FormatMode::Qualified => out.write_str(class.base_name())?,
        FormatMode::Simple => out.write_str(class.simple_name())?,
    }
    class.write_dimensions(out)
}

/// Display adapter pairing a node with a [`FormatMode`].
pub struct Formatted<'a> {
    node: &'a TypeNode,
    mode: FormatMode,
}

impl<'a> Formatted<'a> {
    pub fn new(node: &'a TypeNode, mode: FormatMode) -> Self {
        Self { node, mode }
    }
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(f, self.node, self.mode)
    }
}
