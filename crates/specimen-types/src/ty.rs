//! Concrete type descriptors.
//!
//! A [`TypeExpr`] is supplied by the caller and is fully concrete: generic
//! arguments are carried *inside* the descriptor (`Vec<String>` is
//! `Named { name: "Vec", args: [String] }`), so the engine never has to
//! recover erased type information at the point of recursive construction.
//! The only non-concrete form is [`TypeExpr::Var`], a reference to an
//! enclosing schema's type parameter, resolved through the active
//! [`TypeBindings`](crate::TypeBindings) during structured generation.

use std::fmt;

/// A type descriptor: a named type applied to zero or more type arguments,
/// or an unbound type-parameter reference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeExpr {
    /// A named type with its (possibly empty) type arguments.
    Named {
        /// The type's name. Built-in categories match on exact names
        /// (`String`, `bool`, `i32`, `i64`, `f32`, `f64`, `char`,
        /// `Instant`, `Timestamp`, `Date`, `Decimal`, `Uuid`, `Vec`,
        /// `HashSet`, `HashMap`); anything else is an enum or structured
        /// type looked up in the schema registry.
        name: String,
        /// Type arguments, fully concrete or `Var` references.
        args: Vec<TypeExpr>,
    },
    /// A reference to a type parameter of the enclosing schema (`T`).
    Var(String),
}

impl TypeExpr {
    /// A named type with no arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A named type applied to type arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    /// An unbound type-parameter reference.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// `String`.
    #[must_use]
    pub fn string() -> Self {
        Self::named("String")
    }

    /// `bool`.
    #[must_use]
    pub fn boolean() -> Self {
        Self::named("bool")
    }

    /// `i32`.
    #[must_use]
    pub fn integer() -> Self {
        Self::named("i32")
    }

    /// `i64`.
    #[must_use]
    pub fn long() -> Self {
        Self::named("i64")
    }

    /// `f32`.
    #[must_use]
    pub fn float() -> Self {
        Self::named("f32")
    }

    /// `f64`.
    #[must_use]
    pub fn double() -> Self {
        Self::named("f64")
    }

    /// `char`.
    #[must_use]
    pub fn character() -> Self {
        Self::named("char")
    }

    /// A UTC instant.
    #[must_use]
    pub fn instant() -> Self {
        Self::named("Instant")
    }

    /// A naive timestamp.
    #[must_use]
    pub fn timestamp() -> Self {
        Self::named("Timestamp")
    }

    /// A calendar date.
    #[must_use]
    pub fn date() -> Self {
        Self::named("Date")
    }

    /// A fixed-point decimal.
    #[must_use]
    pub fn decimal() -> Self {
        Self::named("Decimal")
    }

    /// A v4-style unique identifier.
    #[must_use]
    pub fn unique_id() -> Self {
        Self::named("Uuid")
    }

    /// `Vec<element>`.
    #[must_use]
    pub fn list(element: TypeExpr) -> Self {
        Self::generic("Vec", vec![element])
    }

    /// `HashSet<element>`.
    #[must_use]
    pub fn set(element: TypeExpr) -> Self {
        Self::generic("HashSet", vec![element])
    }

    /// `HashMap<key, value>`.
    #[must_use]
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::generic("HashMap", vec![key, value])
    }

    /// The type's name, or `None` for a type-parameter reference.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Var(_) => None,
        }
    }

    /// The type arguments (empty for `Var` and unparameterized types).
    #[must_use]
    pub fn args(&self) -> &[TypeExpr] {
        match self {
            Self::Named { args, .. } => args,
            Self::Var(_) => &[],
        }
    }

    /// Whether this is an unbound type-parameter reference.
    #[must_use]
    pub const fn is_var(&self) -> bool {
        matches!(self, Self::Var(_))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => f.write_str(name),
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested_generics() {
        let ty = TypeExpr::map(
            TypeExpr::string(),
            TypeExpr::list(TypeExpr::generic("Box", vec![TypeExpr::var("T")])),
        );
        assert_eq!(ty.to_string(), "HashMap<String, Vec<Box<T>>>");
    }

    #[test]
    fn accessors() {
        let ty = TypeExpr::list(TypeExpr::integer());
        assert_eq!(ty.name(), Some("Vec"));
        assert_eq!(ty.args().len(), 1);
        assert!(!ty.is_var());
        assert!(TypeExpr::var("T").is_var());
        assert_eq!(TypeExpr::var("T").name(), None);
    }
}
