//! Integration tests for genus using `TypeEngine` as the entry point.
//!
//! These tests exercise the whole pipeline (parsing, registry lookup,
//! substitution and assignability) against the Java class prelude plus a
//! few host classes registered per test.

use genus::prelude::*;
use genus::{
    ClassName, MAX_ARRAY_DIMENSIONS, ParseErrorKind, RegistrationError, TypeResolutionError,
};

/// Engine over the prelude plus extra host classes.
fn engine_with(extra: Vec<ClassEntry>) -> TypeEngine {
    let mut registry = TypeRegistry::with_java_prelude();
    for entry in extra {
        registry.register(entry).expect("host class registers");
    }
    TypeEngine::new(registry, EngineConfig::default())
}

fn assignable(engine: &TypeEngine, target: &str, candidate: &str) -> bool {
    engine
        .is_assignable_from_text(target, candidate)
        .unwrap_or_else(|e| panic!("failed to parse '{target}' / '{candidate}': {e}"))
}

fn class(name: &str) -> TypeDescriptor {
    TypeDescriptor::class(name)
}

fn var(owner: &str, name: &str) -> TypeDescriptor {
    TypeDescriptor::variable(owner, name)
}

fn generic(raw: &str, args: Vec<TypeDescriptor>) -> TypeDescriptor {
    TypeDescriptor::parameterized(raw, args)
}

// =============================================================================
// Text round-trip
// =============================================================================

#[test]
fn test_round_trip() {
    let engine = TypeEngine::default();
    let cases = [
        "java.lang.String",
        "java.util.List<java.lang.String>",
        "java.util.Map<java.lang.String, java.util.List<? extends java.lang.Number>>",
        "java.util.Collection<? super java.lang.Integer>",
        "java.util.Map<?, ?>",
        "java.lang.String[][]",
        "java.util.List<java.lang.Double[]>[]",
        "int[]",
    ];
    for text in cases {
        let node = engine.parse(text).unwrap();
        assert_eq!(engine.format(&node, FormatMode::Qualified), text);
    }
}

#[test]
fn test_round_trip_normalizes_whitespace() {
    let engine = TypeEngine::default();
    let node = engine
        .parse("  java.util.Map<java.lang.String,java.util.List< ? extends java.lang.Number >>  ")
        .unwrap();
    assert_eq!(
        engine.format(&node, FormatMode::Qualified),
        "java.util.Map<java.lang.String, java.util.List<? extends java.lang.Number>>"
    );
    assert_eq!(
        engine.format(&node, FormatMode::Simple),
        "Map<String, List<? extends Number>>"
    );
}

// =============================================================================
// Parse errors
// =============================================================================

#[test]
fn test_parse_errors() {
    let engine = TypeEngine::default();
    let cases = [
        ("java.util.List<", ParseErrorKind::UnbalancedAngles),
        ("java.util.List<String>>", ParseErrorKind::TrailingInput),
        ("String[", ParseErrorKind::UnbalancedBrackets),
        ("Map<K V>", ParseErrorKind::UnexpectedToken),
        ("", ParseErrorKind::UnexpectedEof),
    ];
    for (text, kind) in cases {
        match engine.parse(text) {
            Err(GenusError::Parse(err)) => assert_eq!(err.kind, kind, "'{text}'"),
            other => panic!("'{text}' should fail to parse, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_error_diagnostic() {
    let engine = TypeEngine::default();
    let Err(GenusError::Parse(err)) = engine.parse("Map<K V>") else {
        panic!("expected a parse error");
    };
    assert_eq!(err.fragment, "V");
    let rendered = err.display_with_source("Map<K V>");
    assert!(rendered.contains("Map<K V>"));
    assert!(rendered.contains("      ^"));
}

#[test]
fn test_assignability_text_propagates_parse_errors() {
    let engine = TypeEngine::default();
    let err = engine
        .is_assignable_from_text("java.util.List<", "java.util.List<String>")
        .unwrap_err();
    assert!(err.is_parse());
}

// =============================================================================
// Assignability
// =============================================================================

#[test]
fn test_reflexivity() {
    let engine = TypeEngine::default();
    for text in [
        "java.lang.Object",
        "int",
        "java.lang.String[]",
        "java.util.List<java.lang.String>",
        "java.util.Map<? extends java.lang.Number, ? super java.lang.Integer>",
        "java.util.List<?>",
        "? extends java.lang.Number",
        "demo.Unregistered<X>",
    ] {
        let node = engine.parse(text).unwrap();
        assert!(engine.is_assignable_from(&node, &node), "{text}");
    }
}

#[test]
fn test_covariance() {
    let engine = TypeEngine::default();
    assert!(assignable(
        &engine,
        "java.util.Map<? extends Number, ? extends CharSequence>",
        "java.util.HashMap<Integer, String>",
    ));
    assert!(assignable(
        &engine,
        "java.util.Collection<? extends Number>",
        "java.util.LinkedList<Long>",
    ));
    assert!(!assignable(
        &engine,
        "java.util.Collection<? extends Number>",
        "java.util.LinkedList<String>",
    ));
}

#[test]
fn test_contravariance() {
    let engine = TypeEngine::default();
    assert!(assignable(
        &engine,
        "java.util.Collection<? super Integer>",
        "java.util.ArrayList<Number>",
    ));
    assert!(assignable(
        &engine,
        "java.util.Collection<? super Integer>",
        "java.util.ArrayList<Object>",
    ));
    assert!(!assignable(
        &engine,
        "java.util.Collection<? super Integer>",
        "java.util.ArrayList<String>",
    ));
}

#[test]
fn test_invariance() {
    let engine = TypeEngine::default();
    let integers = "java.util.ArrayList<Integer>";
    assert!(!assignable(
        &engine,
        "java.util.List<Number>",
        "java.util.List<Integer>",
    ));
    assert!(assignable(&engine, "java.util.List<Integer>", integers));
    assert!(assignable(&engine, "java.util.List<?>", integers));
    assert!(!assignable(&engine, "java.util.Set<Integer>", integers));
}

#[test]
fn test_implicit_package_names_compare_canonically() {
    let engine = TypeEngine::default();
    assert!(assignable(
        &engine,
        "java.util.List<java.lang.String>",
        "java.util.ArrayList<String>",
    ));
    assert!(assignable(&engine, "Object", "java.lang.Integer"));
}

#[test]
fn test_raw_and_unchecked() {
    let engine = TypeEngine::default();
    let strings = "java.util.List<String>";
    let array_list = "java.util.ArrayList<String>";
    assert!(assignable(&engine, "java.util.List", array_list));
    assert!(assignable(&engine, strings, "java.util.ArrayList"));
    assert!(!assignable(&engine, strings, "java.util.HashSet"));
}

#[test]
fn test_arrays() {
    let engine = TypeEngine::default();
    assert!(assignable(&engine, "Object[]", "String[]"));
    assert!(assignable(&engine, "Object[]", "String[][]"));
    assert!(assignable(&engine, "Object", "int[]"));
    assert!(assignable(&engine, "Cloneable", "int[]"));
    assert!(!assignable(&engine, "Object[]", "int[]"));
    assert!(!assignable(&engine, "String[]", "Object[]"));
    assert!(assignable(
        &engine,
        "java.util.List<? extends Number>[]",
        "java.util.ArrayList<Integer>[]",
    ));
    assert!(!assignable(
        &engine,
        "java.util.List<Number>[]",
        "java.util.ArrayList<Integer>[]",
    ));
}

#[test]
fn test_deep_arrays() {
    let engine = TypeEngine::default();
    let suffixes = |dims: u32| "[]".repeat(dims as usize);
    let deepest = suffixes(MAX_ARRAY_DIMENSIONS);
    let objects = format!("Object{deepest}");
    let integers = format!("Integer{deepest}");
    let ints = format!("int{deepest}");
    assert!(assignable(&engine, &objects, &integers));
    assert!(!assignable(&engine, &integers, &objects));
    assert!(!assignable(&engine, &objects, &ints));
    let shallower = format!("Object{}", suffixes(MAX_ARRAY_DIMENSIONS - 1));
    assert!(assignable(&engine, &shallower, &ints));

    let too_deep = format!("Integer{}", suffixes(MAX_ARRAY_DIMENSIONS + 1));
    match engine.parse(&too_deep) {
        Err(GenusError::Parse(err)) => assert_eq!(err.kind, ParseErrorKind::TooManyDimensions),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_primitives() {
    let engine = TypeEngine::default();
    assert!(assignable(&engine, "int", "int"));
    assert!(!assignable(&engine, "Object", "int"));
    assert!(!assignable(&engine, "long", "int"));
}

// =============================================================================
// Structural queries
// =============================================================================

#[test]
fn test_component_extraction() {
    let engine = TypeEngine::default();
    for text in ["java.util.List<java.lang.String>", "java.lang.String[]"] {
        let node = engine.parse(text).unwrap();
        let component = engine.component_type(&node).expect(text);
        assert_eq!(component.retrieval_class(), "java.lang.String");
    }

    let plain = engine.parse("java.lang.String").unwrap();
    assert_eq!(engine.component_type(&plain), None);
}

#[test]
fn test_key_value_extraction() {
    let engine = TypeEngine::default();
    let map = engine
        .parse("java.util.HashMap<java.lang.Integer, java.lang.String>")
        .unwrap();
    let key = engine.key_type(&map).unwrap();
    let value = engine.component_type(&map).unwrap();
    assert_eq!(key.retrieval_class(), "java.lang.Integer");
    assert_eq!(value.retrieval_class(), "java.lang.String");

    let list = engine.parse("java.util.List<java.lang.String>").unwrap();
    assert_eq!(engine.key_type(&list), None);
}

#[test]
fn test_super_wildcard_component_is_the_wildcard() {
    let engine = TypeEngine::default();
    let list = engine
        .parse("java.util.List<? super java.lang.String>")
        .unwrap();
    let component = engine.component_type(&list).unwrap();
    assert!(component.is_wildcard());
    assert_eq!(component.retrieval_class(), "java.lang.Object");
}

// =============================================================================
// Resolution
// =============================================================================

fn stats() -> ClassEntry {
    ClassEntry::class("demo.Stats")
        .with_bounded_param("T", vec![class("java.lang.Number")])
        .with_superclass(class("java.lang.Object"))
}

#[test]
fn test_variable_fallback() {
    let engine = engine_with(vec![stats()]);
    let t = var("demo.Stats", "T");
    let node = engine.create_type(&t, None).unwrap();
    assert!(node.is_variable());
    assert_eq!(node.retrieval_class(), "java.lang.Number");
    assert_eq!(engine.format(&node, FormatMode::Qualified), "T");

    let raw_context = engine.parse("demo.Stats").unwrap();
    let node = engine.create_type(&t, Some(&raw_context)).unwrap();
    assert_eq!(node.retrieval_class(), "java.lang.Number");

    let bound_context = engine.parse("demo.Stats<java.lang.Double>").unwrap();
    let node = engine.create_type(&t, Some(&bound_context)).unwrap();
    assert_eq!(node.retrieval_class(), "java.lang.Double");
}

#[test]
fn test_multi_level_substitution() {
    // demo.Leaf -> demo.Middle<Integer> -> demo.Base<List<Integer>>
    let engine = engine_with(vec![
        ClassEntry::class("demo.Base").with_type_param("T"),
        ClassEntry::class("demo.Middle")
            .with_type_param("U")
            .with_superclass(generic(
                "demo.Base",
                vec![generic("java.util.List", vec![var("demo.Middle", "U")])],
            )),
        ClassEntry::class("demo.Leaf")
            .with_superclass(generic("demo.Middle", vec![class("java.lang.Integer")])),
    ]);

    let context = engine.parse("demo.Leaf").unwrap();
    let t = var("demo.Base", "T");
    let field = engine.create_type(&t, Some(&context)).unwrap();
    assert_eq!(
        engine.format(&field, FormatMode::Qualified),
        "java.util.List<java.lang.Integer>"
    );

    let member = generic(
        "java.util.Map",
        vec![var("demo.Middle", "U"), var("demo.Base", "T")],
    );
    let node = engine.create_type(&member, Some(&context)).unwrap();
    assert_eq!(
        engine.format(&node, FormatMode::Simple),
        "Map<Integer, List<Integer>>"
    );

    let target = engine.parse("demo.Base<java.util.List<Integer>>").unwrap();
    assert!(engine.is_assignable_from(&target, &context));
    let target = engine.parse("demo.Base<java.util.List<Long>>").unwrap();
    assert!(!engine.is_assignable_from(&target, &context));
}

#[test]
fn test_inherited_capability() {
    let strings = generic("java.util.ArrayList", vec![class("java.lang.String")]);
    let entry = ClassEntry::class("demo.Tags").with_superclass(strings);
    let engine = engine_with(vec![entry]);
    let tags = engine.parse("demo.Tags").unwrap();
    let component = engine.component_type(&tags).unwrap();
    assert_eq!(component.retrieval_class(), "java.lang.String");
    assert!(assignable(
        &engine,
        "java.lang.Iterable<? extends CharSequence>",
        "demo.Tags",
    ));
}

#[test]
fn test_diamond_hierarchy() {
    // demo.Both<T> reaches Collection<T> through both List<T> and Set<T>
    let engine = engine_with(vec![
        ClassEntry::interface("demo.Both")
            .with_type_param("T")
            .with_interface(generic("java.util.List", vec![var("demo.Both", "T")]))
            .with_interface(generic("java.util.Set", vec![var("demo.Both", "T")])),
    ]);
    let both = engine.parse("demo.Both<java.lang.Long>").unwrap();
    let map = engine.substitution_map(&both).unwrap();
    let collection = ClassName::new("java.util.Collection");
    let element = map.get(&collection, "E").unwrap();
    assert_eq!(element.retrieval_class(), "java.lang.Long");

    let both = "demo.Both<Long>";
    assert!(assignable(&engine, "java.util.Set<Long>", both));
    assert!(assignable(
        &engine,
        "java.util.Collection<? extends Number>",
        both,
    ));
}

#[test]
fn test_cyclic_bound_resolves() {
    let comparable = generic("java.lang.Comparable", vec![var("demo.Sorted", "T")]);
    let sorted = ClassEntry::class("demo.Sorted").with_bounded_param("T", vec![comparable]);
    let engine = engine_with(vec![sorted]);

    let node = engine.create_type(&var("demo.Sorted", "T"), None).unwrap();
    assert_eq!(node.retrieval_class(), "java.lang.Comparable");
    let bound = &node.as_variable().unwrap().bounds[0];
    assert_eq!(engine.format(bound, FormatMode::Simple), "Comparable<T>");
}

#[test]
fn test_recursion_limit() {
    let engine = TypeEngine::new(
        TypeRegistry::with_java_prelude(),
        EngineConfig::default().with_max_depth(3),
    );
    let mut deep = class("java.lang.String");
    for _ in 0..6 {
        deep = generic("java.util.List", vec![deep]);
    }
    assert!(matches!(
        engine.create_type(&deep, None),
        Err(TypeResolutionError::RecursionLimit { limit: 3, .. })
    ));

    // Inheritance walks past the limit fail the same way, and queries
    // report no element instead of erroring.
    let context = engine
        .parse("java.util.LinkedHashMap<String, Integer>")
        .unwrap();
    assert!(engine.substitution_map(&context).is_err());
    assert_eq!(engine.component_type(&context), None);
}

#[test]
fn test_arity_mismatch() {
    let engine = TypeEngine::default();
    let map = generic("java.util.Map", vec![class("java.lang.String")]);
    let err = engine.create_type(&map, None).unwrap_err();
    assert_eq!(
        err,
        TypeResolutionError::ArityMismatch {
            class: "java.util.Map".to_string(),
            expected: 2,
            got: 1,
        }
    );
    let err = engine.parse_validated("java.util.Map<String>").unwrap_err();
    assert!(err.is_resolution());
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_registry_rejects_cycles() {
    let mut registry = TypeRegistry::with_java_prelude();
    registry
        .register(ClassEntry::class("demo.A").with_superclass(class("demo.B")))
        .unwrap();
    let err = registry
        .register(ClassEntry::class("demo.B").with_superclass(class("demo.A")))
        .unwrap_err();
    assert!(matches!(err, RegistrationError::CircularInheritance { .. }));

    let err = registry.register(ClassEntry::class("demo.A")).unwrap_err();
    assert_eq!(err, RegistrationError::DuplicateClass("demo.A".into()));
}

// =============================================================================
// Caching
// =============================================================================

#[test]
fn test_cache_computes_once() {
    let engine = TypeEngine::default();
    let context = engine.parse("java.util.TreeMap<Long, Double>").unwrap();
    let first = engine.substitution_map(&context).unwrap();
    let second = engine.substitution_map(&context).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(engine.cached_contexts(), 1);

    engine.clear_cache();
    let third = engine.substitution_map(&context).unwrap();
    assert!(!std::sync::Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = std::sync::Arc::new(TypeEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || {
                assignable(
                    &engine,
                    "java.util.Map<? extends Number, ? extends CharSequence>",
                    "java.util.HashMap<Integer, String>",
                )
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert!(engine.cached_contexts() >= 1);
}
