//! The generation request value object.
//!
//! A [`Definition`] is immutable: the dispatcher's caller builds the root
//! one, and every recursive step builds a fresh child via [`Definition::field`],
//! [`Definition::element`] or [`Definition::entry`], sharing the override
//! map by reference.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Coordinate, OverrideMap, Overrider, TypeExpr};

/// Binding of schema type parameters to concrete type descriptors, scoped
/// to one structured-generation call and inherited downward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeBindings(BTreeMap<String, TypeExpr>);

impl TypeBindings {
    /// No bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a binding (builder-style).
    #[must_use]
    pub fn bind(mut self, param: impl Into<String>, ty: TypeExpr) -> Self {
        self.0.insert(param.into(), ty);
        self
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn get(&self, param: &str) -> Option<&TypeExpr> {
        self.0.get(param)
    }

    /// Whether no parameter is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge an enclosing context's bindings into this fresh map.
    ///
    /// Inherited entries win on conflict: a fresh positional binding never
    /// overrides what the outer context already resolved.
    #[must_use]
    pub fn inheriting(mut self, outer: &Self) -> Self {
        for (param, ty) in &outer.0 {
            self.0.insert(param.clone(), ty.clone());
        }
        self
    }

    /// Substitute bound type parameters throughout a descriptor.
    ///
    /// Unbound parameters are left as `Var`; chained bindings (`T` → `U`,
    /// `U` → concrete) resolve with bounded fuel so a pathological
    /// `T` → `T` binding cannot loop.
    #[must_use]
    pub fn apply(&self, ty: &TypeExpr) -> TypeExpr {
        self.apply_with_fuel(ty, 16)
    }

    fn apply_with_fuel(&self, ty: &TypeExpr, fuel: u32) -> TypeExpr {
        if fuel == 0 {
            return ty.clone();
        }
        match ty {
            TypeExpr::Var(name) => match self.0.get(name) {
                Some(bound) if bound != ty => self.apply_with_fuel(bound, fuel - 1),
                _ => ty.clone(),
            },
            TypeExpr::Named { name, args } => TypeExpr::Named {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|arg| self.apply_with_fuel(arg, fuel - 1))
                    .collect(),
            },
        }
    }
}

/// One generation request: target type, coordinate, shared override map,
/// and the active type-parameter bindings.
#[derive(Debug, Clone)]
pub struct Definition {
    ty: TypeExpr,
    coordinate: Coordinate,
    overrides: Arc<OverrideMap>,
    bindings: TypeBindings,
}

impl Definition {
    /// Root request: empty coordinate, no inherited bindings.
    #[must_use]
    pub fn root(ty: TypeExpr, overrides: OverrideMap) -> Self {
        Self {
            ty,
            coordinate: Coordinate::root(),
            overrides: Arc::new(overrides),
            bindings: TypeBindings::empty(),
        }
    }

    /// The target type descriptor.
    #[must_use]
    pub fn ty(&self) -> &TypeExpr {
        &self.ty
    }

    /// This node's coordinate.
    #[must_use]
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// The shared override map.
    #[must_use]
    pub fn overrides(&self) -> &OverrideMap {
        &self.overrides
    }

    /// The active type-parameter bindings.
    #[must_use]
    pub fn bindings(&self) -> &TypeBindings {
        &self.bindings
    }

    /// The exact override addressed at this node, if any.
    #[must_use]
    pub fn override_here(&self) -> Option<&Overrider> {
        self.overrides.get(&self.coordinate)
    }

    /// Child request for field `name` of type `ty`.
    #[must_use]
    pub fn field(&self, name: &str, ty: TypeExpr) -> Self {
        Self {
            ty,
            coordinate: self.coordinate.child(name),
            overrides: Arc::clone(&self.overrides),
            bindings: self.bindings.clone(),
        }
    }

    /// Child request for collection element `i` of type `ty`.
    #[must_use]
    pub fn element(&self, i: usize, ty: TypeExpr) -> Self {
        Self {
            ty,
            coordinate: self.coordinate.index(i),
            overrides: Arc::clone(&self.overrides),
            bindings: self.bindings.clone(),
        }
    }

    /// Child request for the map entry with literal key `key`.
    #[must_use]
    pub fn entry(&self, key: &str, ty: TypeExpr) -> Self {
        Self {
            ty,
            coordinate: self.coordinate.key(key),
            overrides: Arc::clone(&self.overrides),
            bindings: self.bindings.clone(),
        }
    }

    /// Same position, different type descriptor (used after resolving a
    /// type-parameter reference through the bindings).
    #[must_use]
    pub fn retyped(&self, ty: TypeExpr) -> Self {
        Self {
            ty,
            coordinate: self.coordinate.clone(),
            overrides: Arc::clone(&self.overrides),
            bindings: self.bindings.clone(),
        }
    }

    /// Same request with replacement bindings (structured generation S5).
    #[must_use]
    pub fn with_bindings(&self, bindings: TypeBindings) -> Self {
        Self {
            ty: self.ty.clone(),
            coordinate: self.coordinate.clone(),
            overrides: Arc::clone(&self.overrides),
            bindings,
        }
    }
}
