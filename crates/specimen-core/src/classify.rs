//! Mapping type descriptors to value categories.

use specimen_types::{Category, TypeExpr};

use crate::SchemaRegistry;

/// Classify a type descriptor.
///
/// Built-in categories match on exact type names. Anything else classifies
/// as [`Category::Enum`] when the registered schema is an enumeration, and
/// [`Category::Structured`] otherwise — including names with no schema at
/// all, so open-ended caller-defined shapes reach the structured generator
/// without prior registration (which then reports a missing schema).
/// Unbound type-parameter references also classify as structured; the
/// structured path resolves them through the active bindings.
#[must_use]
pub fn classify(ty: &TypeExpr, schemas: &SchemaRegistry) -> Category {
    let Some(name) = ty.name() else {
        return Category::Structured;
    };
    match name {
        "String" => Category::String,
        "bool" => Category::Boolean,
        "i32" => Category::Integer,
        "i64" => Category::Long,
        "f32" => Category::Float,
        "f64" => Category::Double,
        "char" => Category::Character,
        "Instant" => Category::Instant,
        "Timestamp" => Category::Timestamp,
        "Date" => Category::Date,
        "Decimal" => Category::BigDecimal,
        "Uuid" => Category::UniqueId,
        "Vec" => Category::List,
        "HashSet" => Category::Set,
        "HashMap" => Category::Map,
        other => match schemas.lookup(other) {
            Some(schema) if schema.is_enum() => Category::Enum,
            _ => Category::Structured,
        },
    }
}

#[cfg(test)]
mod tests {
    use specimen_types::TypeSchema;

    use super::*;

    #[test]
    fn builtin_names() {
        let schemas = SchemaRegistry::new();
        assert_eq!(classify(&TypeExpr::string(), &schemas), Category::String);
        assert_eq!(classify(&TypeExpr::boolean(), &schemas), Category::Boolean);
        assert_eq!(classify(&TypeExpr::integer(), &schemas), Category::Integer);
        assert_eq!(classify(&TypeExpr::long(), &schemas), Category::Long);
        assert_eq!(classify(&TypeExpr::float(), &schemas), Category::Float);
        assert_eq!(classify(&TypeExpr::double(), &schemas), Category::Double);
        assert_eq!(
            classify(&TypeExpr::character(), &schemas),
            Category::Character
        );
        assert_eq!(classify(&TypeExpr::instant(), &schemas), Category::Instant);
        assert_eq!(
            classify(&TypeExpr::timestamp(), &schemas),
            Category::Timestamp
        );
        assert_eq!(classify(&TypeExpr::date(), &schemas), Category::Date);
        assert_eq!(
            classify(&TypeExpr::decimal(), &schemas),
            Category::BigDecimal
        );
        assert_eq!(
            classify(&TypeExpr::unique_id(), &schemas),
            Category::UniqueId
        );
        assert_eq!(
            classify(&TypeExpr::list(TypeExpr::string()), &schemas),
            Category::List
        );
        assert_eq!(
            classify(&TypeExpr::set(TypeExpr::integer()), &schemas),
            Category::Set
        );
        assert_eq!(
            classify(&TypeExpr::map(TypeExpr::string(), TypeExpr::integer()), &schemas),
            Category::Map
        );
    }

    #[test]
    fn fallback_enum_or_structured() {
        let schemas = SchemaRegistry::new();
        schemas.register(TypeSchema::enumeration("Color", ["Red", "Blue"]));
        schemas.register(TypeSchema::structure("User").build());

        assert_eq!(classify(&TypeExpr::named("Color"), &schemas), Category::Enum);
        assert_eq!(
            classify(&TypeExpr::named("User"), &schemas),
            Category::Structured
        );
        // Unregistered names still dispatch to the structured generator.
        assert_eq!(
            classify(&TypeExpr::named("Mystery"), &schemas),
            Category::Structured
        );
        assert_eq!(classify(&TypeExpr::var("T"), &schemas), Category::Structured);
    }
}
