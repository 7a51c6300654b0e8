//! Core data model for the Specimen fixture-synthesis engine.
//!
//! Everything in this crate is passive data: the addressing scheme
//! ([`Coordinate`]), the concrete type descriptor ([`TypeExpr`]), the
//! dynamic value model ([`Value`]), the override entries ([`Overrider`]),
//! the generation request ([`Definition`]), the per-type capability
//! surface ([`TypeSchema`]), and the known-pattern table
//! ([`PatternTable`]). The engine that interprets all of this lives in
//! `specimen-core`.

pub mod category;
pub mod coordinate;
pub mod decimal;
pub mod definition;
pub mod overrider;
pub mod pattern;
pub mod schema;
pub mod ty;
pub mod value;

pub use category::Category;
pub use coordinate::Coordinate;
pub use decimal::Decimal;
pub use definition::{Definition, TypeBindings};
pub use overrider::{OverrideMap, Overrider, SupplierFn};
pub use pattern::{PatternEntry, PatternRule, PatternSource, PatternTable};
pub use schema::{
    ConstructFn, ConstructorSpec, FactoryFn, FactorySpec, FieldSpec, ParamSpec, SchemaKind,
    SetterFn, StructSchemaBuilder, TypeSchema, Visibility,
};
pub use ty::TypeExpr;
pub use value::{StructValue, Value};
