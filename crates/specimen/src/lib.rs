//! Specimen synthesizes fully populated test fixtures for arbitrary
//! caller-described data shapes.
//!
//! A fixture request is a [`Definition`]: a concrete type descriptor
//! ([`TypeExpr`]) plus a sparse, coordinate-addressed override map
//! ([`OverrideMap`]). The [`Engine`] classifies each slot of the target
//! shape, applies the most specific applicable rule (explicit override,
//! then known-pattern heuristics, then fresh random generation), and
//! returns a fully materialized [`Value`] graph. Structured shapes are
//! described to the engine through registered [`TypeSchema`]s; cycles and
//! depth overruns truncate to null rather than erroring.
//!
//! ```
//! use std::sync::Arc;
//!
//! use specimen::{
//!     builtin_patterns, Coordinate, Definition, Engine, OverrideMap, Overrider, SchemaRegistry,
//!     TypeExpr, TypeSchema, Value,
//! };
//!
//! let schemas = Arc::new(SchemaRegistry::new());
//! schemas.register(
//!     TypeSchema::structure("User")
//!         .field("name", TypeExpr::string())
//!         .field("age", TypeExpr::integer())
//!         .build(),
//! );
//!
//! let engine = Engine::builder()
//!     .schemas(schemas)
//!     .patterns(builtin_patterns())
//!     .build();
//!
//! let mut overrides = OverrideMap::new();
//! overrides.insert(Coordinate::new("age"), Overrider::literal(Value::Int(41)));
//!
//! let def = Definition::root(TypeExpr::named("User"), overrides);
//! let user = engine.generate(&def).unwrap();
//! let user = user.as_struct().unwrap();
//! assert_eq!(user.get("age"), Some(&Value::Int(41)));
//! assert!(matches!(user.get("name"), Some(Value::Text(_))));
//! ```

pub use specimen_core::{
    builtin_patterns, classify, coerce, expand_pattern, Engine, EngineBuilder, GenerationContext,
    SchemaProvider, SchemaRegistry,
};
pub use specimen_error::{Result, SpecimenError};
pub use specimen_types::{
    Category, ConstructorSpec, Coordinate, Decimal, Definition, FactorySpec, FieldSpec,
    OverrideMap, Overrider, ParamSpec, PatternEntry, PatternRule, PatternSource, PatternTable,
    StructValue, TypeBindings, TypeExpr, TypeSchema, Value, Visibility,
};
