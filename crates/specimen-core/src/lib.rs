//! The Specimen generation engine.
//!
//! One public operation: [`Engine::generate`] takes a
//! [`Definition`](specimen_types::Definition) and returns a fully populated
//! [`Value`](specimen_types::Value) (or `Value::Null` when cycle/depth
//! truncation applies, or an error for unrecoverable instantiation and
//! conversion failures).
//!
//! Internally: the dispatcher classifies the target type into a closed
//! [`Category`](specimen_types::Category) and hands off to one generator
//! per category. Collection and structured generators recurse back through
//! the dispatcher with extended coordinates, forming a depth-first
//! traversal of the target object graph guarded by an explicit
//! [`GenerationContext`].

pub mod classify;
pub mod coerce;
pub mod collection;
pub mod engine;
pub mod guard;
pub mod patterns;
pub mod regex_gen;
pub mod registry;
pub mod resolve;
pub mod scalar;
pub mod structured;
pub mod temporal;

pub use classify::classify;
pub use coerce::coerce;
pub use engine::{Engine, EngineBuilder};
pub use guard::GenerationContext;
pub use patterns::builtin_patterns;
pub use regex_gen::expand_pattern;
pub use registry::{SchemaProvider, SchemaRegistry};
pub use resolve::{resolve, Resolution};
