//! End-to-end generation behavior through the public facade.

use std::sync::Arc;

use specimen::{
    builtin_patterns, Coordinate, Definition, Engine, OverrideMap, Overrider, SchemaRegistry,
    TypeExpr, TypeSchema, Value,
};

fn engine_with(schemas: Vec<TypeSchema>) -> Engine {
    let registry = Arc::new(SchemaRegistry::new());
    for schema in schemas {
        registry.register(schema);
    }
    Engine::builder().schemas(registry).build()
}

fn overrides(entries: &[(&str, Overrider)]) -> OverrideMap {
    entries
        .iter()
        .map(|(coord, ov)| (Coordinate::new(*coord), ov.clone()))
        .collect()
}

fn user_schema() -> TypeSchema {
    TypeSchema::structure("User")
        .field("name", TypeExpr::string())
        .field("age", TypeExpr::integer())
        .field("active", TypeExpr::boolean())
        .field("balance", TypeExpr::double())
        .field("id", TypeExpr::unique_id())
        .field("createdAt", TypeExpr::instant())
        .field("tags", TypeExpr::list(TypeExpr::string()))
        .field("role", TypeExpr::named("Role"))
        .build()
}

fn role_schema() -> TypeSchema {
    TypeSchema::enumeration("Role", ["Admin", "Member", "Guest"])
}

#[test]
fn every_declared_field_is_populated() {
    let engine = engine_with(vec![user_schema(), role_schema()]);
    let def = Definition::root(TypeExpr::named("User"), OverrideMap::new());
    let user = engine.generate(&def).unwrap();
    let user = user.as_struct().unwrap();

    for field in [
        "name",
        "age",
        "active",
        "balance",
        "id",
        "createdAt",
        "tags",
        "role",
    ] {
        let value = user.get(field).unwrap_or(&Value::Null);
        assert!(!value.is_null(), "field {field} came back null");
    }
    assert!(matches!(user.get("role"), Some(Value::Enum { .. })));
    assert!(matches!(user.get("tags"), Some(Value::List(_))));
}

#[test]
fn self_reference_truncates_to_null() {
    let node = TypeSchema::structure("Node")
        .field("value", TypeExpr::integer())
        .field("next", TypeExpr::named("Node"))
        .build();
    let engine = engine_with(vec![node]);

    let def = Definition::root(TypeExpr::named("Node"), OverrideMap::new());
    let node = engine.generate(&def).unwrap();
    let node = node.as_struct().unwrap();

    assert!(matches!(node.get("value"), Some(Value::Int(_))));
    assert_eq!(node.get("next"), Some(&Value::Null));
}

#[test]
fn mutual_recursion_truncates_at_the_revisit() {
    let a = TypeSchema::structure("A")
        .field("label", TypeExpr::string())
        .field("b", TypeExpr::named("B"))
        .build();
    let b = TypeSchema::structure("B")
        .field("a", TypeExpr::named("A"))
        .build();
    let engine = engine_with(vec![a, b]);

    let def = Definition::root(TypeExpr::named("A"), OverrideMap::new());
    let a = engine.generate(&def).unwrap();
    let a = a.as_struct().unwrap();

    assert!(matches!(a.get("label"), Some(Value::Text(_))));
    let b = a.get("b").and_then(Value::as_struct).unwrap();
    assert_eq!(b.get("a"), Some(&Value::Null));
}

#[test]
fn list_size_follows_the_highest_indexed_override() {
    let engine = engine_with(vec![user_schema(), role_schema()]);
    let map = overrides(&[
        ("tags[0]", Overrider::text("first")),
        ("tags[3]", Overrider::text("fourth")),
    ]);
    let def = Definition::root(TypeExpr::named("User"), map);
    let user = engine.generate(&def).unwrap();
    let user = user.as_struct().unwrap();

    let Some(Value::List(tags)) = user.get("tags") else {
        panic!("tags missing");
    };
    assert_eq!(tags.len(), 4);
    assert_eq!(tags[0], Value::Text("first".into()));
    assert_eq!(tags[3], Value::Text("fourth".into()));
    assert!(matches!(&tags[1], Value::Text(s) if !s.is_empty()));
    assert!(matches!(&tags[2], Value::Text(s) if !s.is_empty()));
}

#[test]
fn regex_override_shapes_a_string_field() {
    let engine = engine_with(vec![user_schema(), role_schema()]);
    let map = overrides(&[("name", Overrider::regex(r"\d{4}"))]);
    let def = Definition::root(TypeExpr::named("User"), map);
    let user = engine.generate(&def).unwrap();
    let user = user.as_struct().unwrap();

    let name = user.get("name").and_then(Value::as_text).unwrap();
    assert_eq!(name.len(), 4);
    assert!(name.chars().all(|c| c.is_ascii_digit()), "{name:?}");
}

#[test]
fn regex_override_coerces_to_an_integer_field() {
    let engine = engine_with(vec![user_schema(), role_schema()]);
    for _ in 0..32 {
        let map = overrides(&[("age", Overrider::regex("1[0-9]{3}"))]);
        let def = Definition::root(TypeExpr::named("User"), map);
        let user = engine.generate(&def).unwrap();
        match user.as_struct().unwrap().get("age") {
            Some(Value::Int(n)) => assert!((1000..=1999).contains(n), "{n}"),
            other => panic!("unexpected age {other:?}"),
        }
    }
}

#[test]
fn nested_coordinate_overrides_one_inner_field_only() {
    let outer = TypeSchema::structure("Outer")
        .field("string", TypeExpr::string())
        .field("nestedObject", TypeExpr::named("Inner"))
        .build();
    let inner = TypeSchema::structure("Inner")
        .field("string", TypeExpr::string())
        .field("number", TypeExpr::integer())
        .build();
    let engine = engine_with(vec![outer, inner]);

    let map = overrides(&[("nestedObject.string", Overrider::text("nested_overrided"))]);
    let def = Definition::root(TypeExpr::named("Outer"), map);
    let outer = engine.generate(&def).unwrap();
    let outer = outer.as_struct().unwrap();

    let nested = outer.get("nestedObject").and_then(Value::as_struct).unwrap();
    assert_eq!(nested.get("string"), Some(&Value::Text("nested_overrided".into())));
    // Siblings at both levels are generated, not inherited from the override.
    assert!(matches!(nested.get("number"), Some(Value::Int(_))));
    let outer_string = outer.get("string").and_then(Value::as_text).unwrap();
    assert_ne!(outer_string, "nested_overrided");
}

#[test]
fn type_parameters_propagate_into_fields() {
    let boxed = TypeSchema::structure("Box")
        .type_param("T")
        .field("content", TypeExpr::var("T"))
        .build();
    let engine = engine_with(vec![boxed]);

    let ty = TypeExpr::generic("Box", vec![TypeExpr::string()]);
    let def = Definition::root(ty, OverrideMap::new());
    let boxed = engine.generate(&def).unwrap();
    let boxed = boxed.as_struct().unwrap();

    assert!(matches!(boxed.get("content"), Some(Value::Text(s)) if !s.is_empty()));
}

#[test]
fn object_override_is_returned_verbatim() {
    let engine = engine_with(vec![user_schema(), role_schema()]);

    let ready = Value::Struct(
        specimen::StructValue::new("User")
            .with("name", Value::Text("prebuilt".into()))
            .with("age", Value::Int(1)),
    );
    let map = overrides(&[("", Overrider::object(ready.clone()))]);
    let def = Definition::root(TypeExpr::named("User"), map);

    let out = engine.generate(&def).unwrap();
    // Identity semantics: no field population touches a ready-made object.
    assert_eq!(out, ready);
    let sv = out.as_struct().unwrap();
    assert_eq!(sv.len(), 2);
    assert!(!sv.contains("active"));
}

#[test]
fn null_override_leaves_the_field_unset() {
    let engine = engine_with(vec![user_schema(), role_schema()]);
    let map = overrides(&[("name", Overrider::Null)]);
    let def = Definition::root(TypeExpr::named("User"), map);
    let user = engine.generate(&def).unwrap();
    let user = user.as_struct().unwrap();

    assert!(!user.contains("name"));
    assert!(user.contains("age"));
}

#[test]
fn builtin_patterns_shape_recognized_field_names() {
    let contact = TypeSchema::structure("Contact")
        .field("email", TypeExpr::string())
        .field("zipCode", TypeExpr::string())
        .build();
    let registry = Arc::new(SchemaRegistry::new());
    registry.register(contact);
    let engine = Engine::builder()
        .schemas(registry)
        .patterns(builtin_patterns())
        .build();

    let def = Definition::root(TypeExpr::named("Contact"), OverrideMap::new());
    let contact = engine.generate(&def).unwrap();
    let contact = contact.as_struct().unwrap();

    let email = contact.get("email").and_then(Value::as_text).unwrap();
    assert!(email.contains('@'), "{email:?}");
    let zip = contact.get("zipCode").and_then(Value::as_text).unwrap();
    assert_eq!(zip.len(), 5);
    assert!(zip.chars().all(|c| c.is_ascii_digit()), "{zip:?}");
}

#[test]
fn map_with_literal_key_overrides() {
    let prefs = TypeSchema::structure("Prefs")
        .field(
            "values",
            TypeExpr::map(TypeExpr::string(), TypeExpr::string()),
        )
        .build();
    let engine = engine_with(vec![prefs]);

    let map = overrides(&[
        ("values[theme]", Overrider::text("dark")),
        ("values[lang]", Overrider::text("en")),
    ]);
    let def = Definition::root(TypeExpr::named("Prefs"), map);
    let prefs = engine.generate(&def).unwrap();
    let prefs = prefs.as_struct().unwrap();

    let Some(Value::Map(pairs)) = prefs.get("values") else {
        panic!("values missing");
    };
    assert_eq!(pairs.len(), 2);
    assert!(pairs.contains(&(Value::Text("lang".into()), Value::Text("en".into()))));
    assert!(pairs.contains(&(Value::Text("theme".into()), Value::Text("dark".into()))));
}
