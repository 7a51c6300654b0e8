//! Override resolution: the precedence root shared by every generator.
//!
//! Order: exact override at the coordinate, then known-pattern heuristics
//! against the coordinate's final segment, then fresh generation. Every
//! category generator calls [`resolve`] before any generation logic of its
//! own.

use rand::Rng;
use specimen_error::Result;
use specimen_types::{Category, Definition, Overrider, PatternRule, PatternTable, Value};
use tracing::trace;

use crate::coerce::coerce;
use crate::regex_gen::expand_pattern;

/// Outcome of override resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A null-kind override: the slot yields no value at all (field left
    /// unset, collection element omitted).
    Skip,
    /// An override or pattern produced the value; use it as-is.
    Ready(Value),
    /// Nothing applied; fall through to category-specific generation.
    Fresh,
}

/// Resolve the definition's coordinate against explicit overrides and the
/// known-pattern table.
pub fn resolve(
    def: &Definition,
    target: Category,
    patterns: &PatternTable,
    rng: &mut impl Rng,
) -> Result<Resolution> {
    if let Some(overrider) = def.override_here() {
        trace!(
            coordinate = %def.coordinate(),
            kind = overrider.kind(),
            "applying explicit override"
        );
        return apply_overrider(overrider, def, target, rng);
    }

    // Known-pattern heuristics are keyed on field-name fragments; they only
    // make sense for scalar/temporal targets.
    if target.is_leaf() {
        if let Some(entry) = patterns.find(def.coordinate().last_segment()) {
            trace!(
                coordinate = %def.coordinate(),
                fragment = %entry.fragment,
                source = ?entry.source,
                "applying known pattern"
            );
            let raw = match &entry.rule {
                PatternRule::Literal(v) => v.clone(),
                PatternRule::Regex(pattern) => Value::Text(expand_pattern(pattern, rng)?),
                PatternRule::OneOf(candidates) => {
                    if candidates.is_empty() {
                        return Ok(Resolution::Fresh);
                    }
                    candidates[rng.gen_range(0..candidates.len())].clone()
                }
            };
            return Ok(Resolution::Ready(coerce(raw, target, def.ty())?));
        }
    }

    Ok(Resolution::Fresh)
}

fn apply_overrider(
    overrider: &Overrider,
    def: &Definition,
    target: Category,
    rng: &mut impl Rng,
) -> Result<Resolution> {
    let raw = match overrider {
        Overrider::Null => return Ok(Resolution::Skip),
        Overrider::Literal(v) | Overrider::Object(v) => v.clone(),
        Overrider::Supplier(f) => f(),
        Overrider::Regex(pattern) => Value::Text(expand_pattern(pattern, rng)?),
    };
    Ok(Resolution::Ready(coerce(raw, target, def.ty())?))
}

#[cfg(test)]
mod tests {
    use rand::thread_rng;
    use specimen_types::{
        Coordinate, OverrideMap, PatternSource, PatternTable, TypeExpr,
    };

    use super::*;

    fn def_with(coord: &str, overrider: Overrider, ty: TypeExpr) -> Definition {
        let mut overrides = OverrideMap::new();
        overrides.insert(Coordinate::new(coord), overrider);
        Definition::root(TypeExpr::named("Root"), overrides)
            .field(coord, ty)
    }

    #[test]
    fn exact_override_wins_over_pattern() {
        let patterns = PatternTable::builder()
            .entry(
                PatternSource::Builtin,
                "email",
                PatternRule::Literal(Value::Text("pattern@example.com".into())),
            )
            .build();
        let def = def_with("email", Overrider::text("explicit"), TypeExpr::string());
        let out = resolve(&def, Category::String, &patterns, &mut thread_rng()).unwrap();
        assert_eq!(out, Resolution::Ready(Value::Text("explicit".into())));
    }

    #[test]
    fn null_override_skips() {
        let def = def_with("email", Overrider::Null, TypeExpr::string());
        let out = resolve(&def, Category::String, &PatternTable::empty(), &mut thread_rng())
            .unwrap();
        assert_eq!(out, Resolution::Skip);
    }

    #[test]
    fn supplier_is_invoked_and_coerced() {
        let def = def_with(
            "age",
            Overrider::supplier(|| Value::Text("41".into())),
            TypeExpr::integer(),
        );
        let out = resolve(&def, Category::Integer, &PatternTable::empty(), &mut thread_rng())
            .unwrap();
        assert_eq!(out, Resolution::Ready(Value::Int(41)));
    }

    #[test]
    fn regex_override_expands_then_coerces() {
        let def = def_with("code", Overrider::regex("1[0-9]{3}"), TypeExpr::integer());
        for _ in 0..16 {
            let out =
                resolve(&def, Category::Integer, &PatternTable::empty(), &mut thread_rng())
                    .unwrap();
            match out {
                Resolution::Ready(Value::Int(n)) => assert!((1000..=1999).contains(&n)),
                other => panic!("unexpected resolution {other:?}"),
            }
        }
    }

    #[test]
    fn pattern_matches_final_segment_for_leaves_only() {
        let patterns = PatternTable::builder()
            .entry(
                PatternSource::Builtin,
                "name",
                PatternRule::OneOf(vec![Value::Text("ada".into())]),
            )
            .build();

        let root = Definition::root(TypeExpr::named("Root"), OverrideMap::new());
        let leaf = root.field("userName", TypeExpr::string());
        let out = resolve(&leaf, Category::String, &patterns, &mut thread_rng()).unwrap();
        assert_eq!(out, Resolution::Ready(Value::Text("ada".into())));

        // Structured targets never consult the pattern table.
        let nested = root.field("name", TypeExpr::named("Name"));
        let out = resolve(&nested, Category::Structured, &patterns, &mut thread_rng()).unwrap();
        assert_eq!(out, Resolution::Fresh);
    }

    #[test]
    fn no_match_falls_through() {
        let root = Definition::root(TypeExpr::named("Root"), OverrideMap::new());
        let leaf = root.field("size", TypeExpr::integer());
        let out = resolve(&leaf, Category::Integer, &PatternTable::empty(), &mut thread_rng())
            .unwrap();
        assert_eq!(out, Resolution::Fresh);
    }

    #[test]
    fn bad_coercion_surfaces() {
        let def = def_with("age", Overrider::text("not-a-number"), TypeExpr::integer());
        let err = resolve(&def, Category::Integer, &PatternTable::empty(), &mut thread_rng())
            .unwrap_err();
        assert!(err.is_fatal());
    }
}
