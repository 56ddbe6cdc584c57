//! Built-in `java.lang` / `java.util` class table.
//!
//! The prelude covers the primitives, the boxed numeric types, strings and
//! the common collection hierarchy with their generic signatures and
//! capability tags. Hosts with their own metadata start from
//! [`TypeRegistry::new`] instead.

use genus_core::{RegistrationError, TypeDescriptor};
use tracing::debug;

use crate::entries::{Capability, ClassEntry, ClassFlags};
use crate::registry::TypeRegistry;

const PRIMITIVES: [&str; 8] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

fn class(name: &str) -> TypeDescriptor {
    TypeDescriptor::class(name)
}

/// `raw<owner.P1, owner.P2, ...>`: a supertype instantiated with the
/// declaring class's own parameters.
fn forward(raw: &str, owner: &str, params: &[&str]) -> TypeDescriptor {
    TypeDescriptor::parameterized(
        raw,
        params
            .iter()
            .map(|p| TypeDescriptor::variable(owner, *p))
            .collect(),
    )
}

/// `raw<arg>` with a concrete argument.
fn applied(raw: &str, arg: &str) -> TypeDescriptor {
    TypeDescriptor::parameterized(raw, vec![class(arg)])
}

/// The prelude entries in dependency order.
pub fn java_prelude() -> Vec<ClassEntry> {
    let mut entries = Vec::from(PRIMITIVES.map(ClassEntry::primitive));

    // java.lang / java.io
    entries.extend([
        ClassEntry::class("java.lang.Object"),
        ClassEntry::interface("java.io.Serializable"),
        ClassEntry::interface("java.lang.Cloneable"),
        ClassEntry::interface("java.lang.CharSequence"),
        ClassEntry::interface("java.lang.Comparable").with_type_param("T"),
        ClassEntry::interface("java.lang.Iterable").with_type_param("T"),
        ClassEntry::class("java.lang.Number")
            .with_flags(ClassFlags::ABSTRACT)
            .with_superclass(class("java.lang.Object"))
            .with_interface(class("java.io.Serializable")),
    ]);

    for boxed in ["java.lang.Integer", "java.lang.Long", "java.lang.Double"] {
        entries.push(
            ClassEntry::class(boxed)
                .with_flags(ClassFlags::FINAL)
                .with_superclass(class("java.lang.Number"))
                .with_interface(applied("java.lang.Comparable", boxed)),
        );
    }
    for boxed in ["java.lang.Boolean", "java.lang.Character"] {
        entries.push(
            ClassEntry::class(boxed)
                .with_flags(ClassFlags::FINAL)
                .with_superclass(class("java.lang.Object"))
                .with_interface(class("java.io.Serializable"))
                .with_interface(applied("java.lang.Comparable", boxed)),
        );
    }
    entries.push(
        ClassEntry::class("java.lang.String")
            .with_flags(ClassFlags::FINAL)
            .with_superclass(class("java.lang.Object"))
            .with_interface(class("java.io.Serializable"))
            .with_interface(applied("java.lang.Comparable", "java.lang.String"))
            .with_interface(class("java.lang.CharSequence")),
    );

    // java.util collections
    entries.extend([
        ClassEntry::interface("java.util.Collection")
            .with_type_param("E")
            .with_interface(forward(
                "java.lang.Iterable",
                "java.util.Collection",
                &["E"],
            ))
            .with_capability(Capability::Container),
        ClassEntry::interface("java.util.List")
            .with_type_param("E")
            .with_interface(forward("java.util.Collection", "java.util.List", &["E"])),
        ClassEntry::interface("java.util.Set")
            .with_type_param("E")
            .with_interface(forward("java.util.Collection", "java.util.Set", &["E"])),
        ClassEntry::interface("java.util.Queue")
            .with_type_param("E")
            .with_interface(forward("java.util.Collection", "java.util.Queue", &["E"])),
        ClassEntry::interface("java.util.Deque")
            .with_type_param("E")
            .with_interface(forward("java.util.Queue", "java.util.Deque", &["E"])),
        ClassEntry::class("java.util.AbstractCollection")
            .with_flags(ClassFlags::ABSTRACT)
            .with_type_param("E")
            .with_superclass(class("java.lang.Object"))
            .with_interface(forward(
                "java.util.Collection",
                "java.util.AbstractCollection",
                &["E"],
            )),
        ClassEntry::class("java.util.AbstractList")
            .with_flags(ClassFlags::ABSTRACT)
            .with_type_param("E")
            .with_superclass(forward(
                "java.util.AbstractCollection",
                "java.util.AbstractList",
                &["E"],
            ))
            .with_interface(forward("java.util.List", "java.util.AbstractList", &["E"])),
        ClassEntry::class("java.util.ArrayList")
            .with_type_param("E")
            .with_superclass(forward(
                "java.util.AbstractList",
                "java.util.ArrayList",
                &["E"],
            ))
            .with_interface(forward("java.util.List", "java.util.ArrayList", &["E"]))
            .with_interface(class("java.lang.Cloneable"))
            .with_interface(class("java.io.Serializable")),
        ClassEntry::class("java.util.LinkedList")
            .with_type_param("E")
            .with_superclass(forward(
                "java.util.AbstractList",
                "java.util.LinkedList",
                &["E"],
            ))
            .with_interface(forward("java.util.List", "java.util.LinkedList", &["E"]))
            .with_interface(forward("java.util.Deque", "java.util.LinkedList", &["E"]))
            .with_interface(class("java.lang.Cloneable"))
            .with_interface(class("java.io.Serializable")),
        ClassEntry::class("java.util.HashSet")
            .with_type_param("E")
            .with_superclass(forward(
                "java.util.AbstractCollection",
                "java.util.HashSet",
                &["E"],
            ))
            .with_interface(forward("java.util.Set", "java.util.HashSet", &["E"]))
            .with_interface(class("java.lang.Cloneable"))
            .with_interface(class("java.io.Serializable")),
    ]);

    // java.util maps
    entries.extend([
        ClassEntry::interface("java.util.Map")
            .with_type_param("K")
            .with_type_param("V")
            .with_capability(Capability::Associative),
        ClassEntry::interface("java.util.SortedMap")
            .with_type_param("K")
            .with_type_param("V")
            .with_interface(forward("java.util.Map", "java.util.SortedMap", &["K", "V"])),
        ClassEntry::class("java.util.AbstractMap")
            .with_flags(ClassFlags::ABSTRACT)
            .with_type_param("K")
            .with_type_param("V")
            .with_superclass(class("java.lang.Object"))
            .with_interface(forward(
                "java.util.Map",
                "java.util.AbstractMap",
                &["K", "V"],
            )),
        ClassEntry::class("java.util.HashMap")
            .with_type_param("K")
            .with_type_param("V")
            .with_superclass(forward(
                "java.util.AbstractMap",
                "java.util.HashMap",
                &["K", "V"],
            ))
            .with_interface(forward("java.util.Map", "java.util.HashMap", &["K", "V"]))
            .with_interface(class("java.lang.Cloneable"))
            .with_interface(class("java.io.Serializable")),
        ClassEntry::class("java.util.LinkedHashMap")
            .with_type_param("K")
            .with_type_param("V")
            .with_superclass(forward(
                "java.util.HashMap",
                "java.util.LinkedHashMap",
                &["K", "V"],
            ))
            .with_interface(forward(
                "java.util.Map",
                "java.util.LinkedHashMap",
                &["K", "V"],
            )),
        ClassEntry::class("java.util.TreeMap")
            .with_type_param("K")
            .with_type_param("V")
            .with_superclass(forward(
                "java.util.AbstractMap",
                "java.util.TreeMap",
                &["K", "V"],
            ))
            .with_interface(forward(
                "java.util.SortedMap",
                "java.util.TreeMap",
                &["K", "V"],
            ))
            .with_interface(class("java.lang.Cloneable"))
            .with_interface(class("java.io.Serializable")),
        ClassEntry::class("java.util.Optional")
            .with_flags(ClassFlags::FINAL)
            .with_type_param("T")
            .with_superclass(class("java.lang.Object")),
    ]);

    entries
}

impl TypeRegistry {
    /// Create a registry pre-populated with the prelude table.
    pub fn with_java_prelude() -> Self {
        let mut registry = Self::new();
        for entry in java_prelude() {
            registry.insert_entry(entry);
        }
        debug!(classes = registry.len(), "java prelude loaded");
        registry
    }

    /// Register the prelude into an existing registry.
    ///
    /// # Errors
    ///
    /// Fails on the first prelude class that clashes with an existing entry.
    pub fn register_java_prelude(&mut self) -> Result<(), RegistrationError> {
        for entry in java_prelude() {
            self.register(entry)?;
        }
        Ok(())
    }
}
