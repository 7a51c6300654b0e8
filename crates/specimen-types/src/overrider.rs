//! Sparse override entries, keyed by coordinate.
//!
//! An override map is assembled by an outer layer (builder API, test
//! framework adapter) and is read-only during generation. Every kind is
//! applied by the engine's override-resolution step *before* any fresh
//! generation happens.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Coordinate, Value};

/// A zero-argument value-producing function used by supplier overrides.
pub type SupplierFn = dyn Fn() -> Value + Send + Sync;

/// One override entry: what to do at a specific coordinate.
#[derive(Clone)]
pub enum Overrider {
    /// Yield no value: the slot is skipped (struct field left unset,
    /// collection element omitted).
    Null,
    /// A literal value, coerced to the target type.
    Literal(Value),
    /// A regex pattern expanded into a string, then coerced to the target
    /// type.
    Regex(String),
    /// A ready-made object returned verbatim, with no field population.
    Object(Value),
    /// A value-producing function invoked at resolution time; its result is
    /// coerced to the target type.
    Supplier(Arc<SupplierFn>),
}

impl Overrider {
    /// Literal override.
    #[must_use]
    pub fn literal(value: Value) -> Self {
        Self::Literal(value)
    }

    /// Convenience for the common text-literal case.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Literal(Value::Text(value.into()))
    }

    /// Regex override.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex(pattern.into())
    }

    /// Ready-made object override.
    #[must_use]
    pub fn object(value: Value) -> Self {
        Self::Object(value)
    }

    /// Supplier override.
    pub fn supplier(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::Supplier(Arc::new(f))
    }

    /// The kind label, for tracing.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Literal(_) => "literal",
            Self::Regex(_) => "regex",
            Self::Object(_) => "object",
            Self::Supplier(_) => "supplier",
        }
    }
}

impl fmt::Debug for Overrider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Overrider::Null"),
            Self::Literal(v) => write!(f, "Overrider::Literal({})", v.render()),
            Self::Regex(p) => write!(f, "Overrider::Regex({p:?})"),
            Self::Object(v) => write!(f, "Overrider::Object({})", v.render()),
            Self::Supplier(_) => f.write_str("Overrider::Supplier(..)"),
        }
    }
}

/// The flattened coordinate → override mapping for one generation request.
pub type OverrideMap = HashMap<Coordinate, Overrider>;
