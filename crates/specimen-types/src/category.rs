//! The closed set of value categories used to select a generator.

use std::fmt;

/// Classification of a type descriptor. Derived structurally on demand by
/// the engine's classifier; never stored on the descriptor itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Category {
    String,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Character,
    Instant,
    Timestamp,
    Date,
    BigDecimal,
    UniqueId,
    List,
    Set,
    Map,
    Enum,
    Structured,
}

impl Category {
    /// Whether this category is a scalar or temporal leaf (terminates
    /// immediately, no recursion into the dispatcher).
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        !matches!(
            self,
            Self::List | Self::Set | Self::Map | Self::Enum | Self::Structured
        )
    }

    /// Stable lowercase label, used in error messages and tracing fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Character => "character",
            Self::Instant => "instant",
            Self::Timestamp => "timestamp",
            Self::Date => "date",
            Self::BigDecimal => "big-decimal",
            Self::UniqueId => "unique-id",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Enum => "enum",
            Self::Structured => "structured",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_split() {
        assert!(Category::Integer.is_leaf());
        assert!(Category::UniqueId.is_leaf());
        assert!(!Category::List.is_leaf());
        assert!(!Category::Enum.is_leaf());
        assert!(!Category::Structured.is_leaf());
    }

    #[test]
    fn labels() {
        assert_eq!(Category::BigDecimal.to_string(), "big-decimal");
        assert_eq!(Category::UniqueId.label(), "unique-id");
    }
}
