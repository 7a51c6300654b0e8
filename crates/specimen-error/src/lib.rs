//! Error taxonomy for the Specimen fixture-synthesis engine.
//!
//! Four failure families exist (and only four):
//!
//! - [`SpecimenError::Instantiation`] — no usable constructor/factory for a
//!   structured type, or a strategy's invocation failed. Fatal; propagates
//!   to the caller of the root `generate` call.
//! - [`SpecimenError::SchemaMissing`] — a structured type was requested but
//!   no schema is registered for it. Fatal.
//! - [`SpecimenError::Conversion`] — an override's payload cannot be coerced
//!   to the target type. Fatal for that override.
//! - [`SpecimenError::Pattern`] — a regex override/pattern rule is
//!   malformed. Local: during field population this is logged and the field
//!   left unset.
//!
//! Cycle and depth-limit terminations are deliberately **not** errors: the
//! engine substitutes a null value instead.

use thiserror::Error;

/// Primary error type for Specimen generation operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecimenError {
    /// No viable instantiation strategy for a structured type, or the
    /// chosen strategy failed when invoked.
    #[error("cannot instantiate `{type_name}` via {strategy}: {detail}")]
    Instantiation {
        /// The structured type that could not be built.
        type_name: String,
        /// The strategy that was attempted (`factory`, `constructor`, ...).
        strategy: String,
        /// Human-readable failure detail.
        detail: String,
    },

    /// A structured type was requested but no schema is registered for it.
    #[error("no schema registered for type `{type_name}`")]
    SchemaMissing {
        /// The unknown type name.
        type_name: String,
    },

    /// An override payload could not be coerced to the target type.
    #[error("cannot convert {value} to {target}")]
    Conversion {
        /// Rendering of the offending value.
        value: String,
        /// The target type/category name.
        target: String,
    },

    /// A regex override or known-pattern rule failed to parse.
    #[error("invalid pattern `{pattern}`: {detail}")]
    Pattern {
        /// The offending pattern text.
        pattern: String,
        /// Parse failure detail.
        detail: String,
    },
}

impl SpecimenError {
    /// Instantiation failure for `type_name` using `strategy`.
    pub fn instantiation(
        type_name: impl Into<String>,
        strategy: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Instantiation {
            type_name: type_name.into(),
            strategy: strategy.into(),
            detail: detail.into(),
        }
    }

    /// Missing-schema failure for `type_name`.
    pub fn schema_missing(type_name: impl Into<String>) -> Self {
        Self::SchemaMissing {
            type_name: type_name.into(),
        }
    }

    /// Conversion failure: `value` could not become `target`.
    pub fn conversion(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Conversion {
            value: value.into(),
            target: target.into(),
        }
    }

    /// Malformed pattern failure.
    pub fn pattern(pattern: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            detail: detail.into(),
        }
    }

    /// Whether this error must surface through field population rather than
    /// being caught and logged. Conversion and instantiation errors always
    /// propagate; pattern errors are recoverable in place.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Instantiation { .. } | Self::SchemaMissing { .. } | Self::Conversion { .. }
        )
    }
}

/// Convenience alias used across all Specimen crates.
pub type Result<T> = std::result::Result<T, SpecimenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiation_message() {
        let err = SpecimenError::instantiation("Order", "constructor", "all candidates private");
        assert_eq!(
            err.to_string(),
            "cannot instantiate `Order` via constructor: all candidates private"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn schema_missing_message() {
        let err = SpecimenError::schema_missing("Widget");
        assert_eq!(err.to_string(), "no schema registered for type `Widget`");
        assert!(err.is_fatal());
    }

    #[test]
    fn conversion_message() {
        let err = SpecimenError::conversion("\"abc\"", "i32");
        assert_eq!(err.to_string(), "cannot convert \"abc\" to i32");
        assert!(err.is_fatal());
    }

    #[test]
    fn pattern_is_not_fatal() {
        let err = SpecimenError::pattern("[a-", "unterminated character class");
        assert_eq!(
            err.to_string(),
            "invalid pattern `[a-`: unterminated character class"
        );
        assert!(!err.is_fatal());
    }
}
