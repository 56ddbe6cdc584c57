use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::TypeHash;

/// Canonical dotted name of a nominal type.
///
/// Used as the identity of raw types throughout the engine. The hash is
/// computed once at construction so registry lookups never rehash the name.
///
/// Array names are stored as a shared base name plus a dimension count, so
/// adding or stripping a dimension never copies the name.
///
/// # Examples
///
/// ```
/// use genus_core::ClassName;
///
/// let list = ClassName::new("java.util.List");
/// assert_eq!(list.simple_name(), "List");
/// assert_eq!(list.package(), Some("java.util"));
///
/// let strings = ClassName::array_of(&ClassName::new("java.lang.String"));
/// assert_eq!(strings, "java.lang.String[]");
/// assert_eq!(strings.dimensions(), 1);
/// assert_eq!(strings.base_name(), "java.lang.String");
/// ```
#[derive(Clone)]
pub struct ClassName {
    base: Arc<str>,
    base_hash: TypeHash,
    dims: u32,
    hash: TypeHash,
}

impl ClassName {
    /// Create a class name from its dotted form. Trailing `[]` pairs become
    /// array dimensions.
    pub fn new(name: impl AsRef<str>) -> Self {
        let mut base = name.as_ref();
        let mut dims = 0;
        while let Some(element) = base.strip_suffix("[]") {
            base = element;
            dims += 1;
        }
        let base_hash = TypeHash::from_name(base);
        Self {
            base: Arc::from(base),
            base_hash,
            dims,
            hash: TypeHash::from_array(base_hash, dims),
        }
    }

    /// The universal top type, `java.lang.Object`.
    pub fn object() -> Self {
        Self::new(well_known::OBJECT)
    }

    /// Synthetic name for an array whose elements are `element`.
    pub fn array_of(element: &ClassName) -> Self {
        element.with_dimensions(element.dims + 1)
    }

    /// The same base class with `dims` array dimensions.
    pub fn with_dimensions(&self, dims: u32) -> Self {
        Self {
            base: Arc::clone(&self.base),
            base_hash: self.base_hash,
            dims,
            hash: TypeHash::from_array(self.base_hash, dims),
        }
    }

    /// The dotted name with every array dimension stripped.
    #[inline]
    pub fn base_name(&self) -> &str {
        &self.base
    }

    /// The innermost non-array class (itself for non-arrays).
    pub fn base_class(&self) -> ClassName {
        self.with_dimensions(0)
    }

    /// Number of array dimensions.
    #[inline]
    pub fn dimensions(&self) -> u32 {
        self.dims
    }

    /// Precomputed identity hash.
    #[inline]
    pub fn hash(&self) -> TypeHash {
        self.hash
    }

    /// Whether this names an array type.
    #[inline]
    pub fn is_array(&self) -> bool {
        self.dims > 0
    }

    /// Element name of an array (one dimension stripped).
    pub fn element(&self) -> Option<ClassName> {
        let dims = self.dims.checked_sub(1)?;
        Some(self.with_dimensions(dims))
    }

    /// Whether this is the universal top type.
    pub fn is_object(&self) -> bool {
        self.dims == 0 && &*self.base == well_known::OBJECT
    }

    /// The last dotted segment of the base name (`List` for
    /// `java.util.List`, `String` for `java.lang.String[]`).
    pub fn simple_name(&self) -> &str {
        match self.base.rfind('.') {
            Some(dot) => &self.base[dot + 1..],
            None => &self.base,
        }
    }

    /// The package part, if the name is qualified.
    pub fn package(&self) -> Option<&str> {
        self.base.rfind('.').map(|dot| &self.base[..dot])
    }

    /// Whether the name has a package qualifier.
    pub fn is_qualified(&self) -> bool {
        self.package().is_some()
    }

    /// Prefix this (simple) name with a package, keeping its dimensions.
    pub fn in_package(&self, package: &str) -> ClassName {
        ClassName::new(format!("{package}.{}", self.base)).with_dimensions(self.dims)
    }

    /// Write the `[]` suffixes of this name.
    pub fn write_dimensions<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        (0..self.dims).try_for_each(|_| out.write_str("[]"))
    }
}

impl PartialEq for ClassName {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.dims == other.dims && self.base == other.base
    }
}

impl Eq for ClassName {}

/// Compares against the full textual form without allocating.
impl PartialEq<str> for ClassName {
    fn eq(&self, other: &str) -> bool {
        let Some(suffix) = other.strip_prefix(&*self.base) else {
            return false;
        };
        suffix.len() == 2 * self.dims as usize
            && suffix.as_bytes().chunks(2).all(|pair| pair == b"[]")
    }
}

impl PartialEq<&str> for ClassName {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Hash for ClassName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl PartialOrd for ClassName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.base.cmp(&other.base).then(self.dims.cmp(&other.dims))
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({self})")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        self.write_dimensions(f)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        ClassName::new(name)
    }
}

impl From<String> for ClassName {
    fn from(name: String) -> Self {
        ClassName::new(name)
    }
}

/// Names of classes the engine itself refers to.
pub mod well_known {
    /// The universal top type.
    pub const OBJECT: &str = "java.lang.Object";
    /// Package searched for unqualified names by default.
    pub const JAVA_LANG: &str = "java.lang";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_and_package() {
        let name = ClassName::new("java.util.Map");
        assert_eq!(name.simple_name(), "Map");
        assert_eq!(name.package(), Some("java.util"));
        assert!(name.is_qualified());

        let bare = ClassName::new("Number");
        assert_eq!(bare.simple_name(), "Number");
        assert_eq!(bare.package(), None);
        assert!(!bare.is_qualified());
    }

    #[test]
    fn array_names_round_trip() {
        let element = ClassName::new("java.lang.String");
        let array = ClassName::array_of(&element);
        assert_eq!(array, "java.lang.String[]");
        assert_eq!(array.to_string(), "java.lang.String[]");
        assert_eq!(array.simple_name(), "String");
        assert_eq!(array.package(), Some("java.lang"));
        assert_eq!(array.element(), Some(element.clone()));
        assert_eq!(ClassName::new("java.lang.String[]"), array);
        assert_eq!(element.element(), None);
    }

    #[test]
    fn dimensions_share_the_base() {
        let matrix = ClassName::new("int[][]");
        assert_eq!(matrix.dimensions(), 2);
        assert_eq!(matrix.base_name(), "int");
        assert_eq!(matrix.base_class(), ClassName::new("int"));
        assert_eq!(matrix.element(), Some(ClassName::new("int[]")));
        assert_ne!(matrix, "int[]");
        assert_ne!(matrix, "int[][][]");
        assert_ne!(matrix, "int[]]]");
        assert_eq!(ClassName::new("int").with_dimensions(2), matrix);
        let qualified = ClassName::new("Integer[]").in_package("java.lang");
        assert_eq!(qualified, "java.lang.Integer[]");
        assert!(!ClassName::new("java.lang.Object[]").is_object());
    }

    #[test]
    fn deep_arrays_stay_linear() {
        let text = format!("int{}", "[]".repeat(20_000));
        let deep = ClassName::new(&text);
        assert_eq!(deep.dimensions(), 20_000);
        assert_eq!(deep.base_name().len(), 3);
        assert_eq!(deep, text.as_str());

        let mut name = ClassName::new("int");
        for _ in 0..20_000 {
            name = ClassName::array_of(&name);
        }
        assert_eq!(name, deep);
    }

    #[test]
    fn equality_uses_full_name() {
        assert_eq!(ClassName::new("a.B"), ClassName::from("a.B"));
        assert_ne!(ClassName::new("a.B"), ClassName::new("B"));
        assert_eq!(ClassName::new("B").in_package("a"), ClassName::new("a.B"));
    }

    #[test]
    fn object_is_top() {
        assert!(ClassName::object().is_object());
        assert!(!ClassName::new("java.lang.String").is_object());
    }
}
