//! List/Set/Map population with size inference from override coordinates.

use rand::{thread_rng, Rng};
use specimen_error::Result;
use specimen_types::{Category, Definition, TypeExpr, Value};
use tracing::debug;

use crate::classify::classify;
use crate::coerce::coerce;
use crate::engine::Engine;
use crate::guard::GenerationContext;
use crate::resolve::{resolve, Resolution};

/// Random element/entry count when no override fixes the size.
const COUNT_RANGE: std::ops::RangeInclusive<usize> = 1..=15;

/// Generate a list or set.
///
/// Element type is the first generic argument (resolved through the active
/// bindings); an unresolvable element type yields an empty collection.
/// Explicit overrides at `coord[n]` fix the element count to the highest
/// index plus one.
pub(crate) fn generate_sequence(
    engine: &Engine,
    cx: &mut GenerationContext,
    def: &Definition,
    as_set: bool,
) -> Result<Option<Value>> {
    let category = if as_set { Category::Set } else { Category::List };
    let mut rng = thread_rng();
    match resolve(def, category, engine.patterns(), &mut rng)? {
        Resolution::Skip => return Ok(None),
        Resolution::Ready(v) => return Ok(Some(v)),
        Resolution::Fresh => {}
    }

    let Some(element_ty) = resolved_arg(def, 0) else {
        debug!(coordinate = %def.coordinate(), "element type unresolved; emitting empty collection");
        return Ok(Some(if as_set {
            Value::Set(Vec::new())
        } else {
            Value::List(Vec::new())
        }));
    };

    let count = match max_explicit_index(def) {
        Some(top) => top + 1,
        None => rng.gen_range(COUNT_RANGE),
    };
    drop(rng);

    let mut items = Vec::with_capacity(count);
    for i in 0..count {
        let child = def.element(i, element_ty.clone());
        if let Some(v) = engine.generate_in(cx, &child)? {
            // Set semantics: equality dedup, no collision handling beyond it.
            if !as_set || !items.contains(&v) {
                items.push(v);
            }
        }
    }
    Ok(Some(if as_set {
        Value::Set(items)
    } else {
        Value::List(items)
    }))
}

/// Generate a map.
///
/// Key/value types are the two generic arguments; missing either yields an
/// empty map. Literal-key overrides `coord[k]` fix the key set (keys
/// coerced to the key type); otherwise a random count of key/value pairs is
/// synthesized.
pub(crate) fn generate_map(
    engine: &Engine,
    cx: &mut GenerationContext,
    def: &Definition,
) -> Result<Option<Value>> {
    let mut rng = thread_rng();
    match resolve(def, Category::Map, engine.patterns(), &mut rng)? {
        Resolution::Skip => return Ok(None),
        Resolution::Ready(v) => return Ok(Some(v)),
        Resolution::Fresh => {}
    }

    let (Some(key_ty), Some(value_ty)) = (resolved_arg(def, 0), resolved_arg(def, 1)) else {
        debug!(coordinate = %def.coordinate(), "key/value types unresolved; emitting empty map");
        return Ok(Some(Value::Map(Vec::new())));
    };
    let key_category = classify(&key_ty, engine.schemas());

    let literal_keys = literal_keys(def);
    let mut pairs = Vec::new();

    if literal_keys.is_empty() {
        let count = rng.gen_range(COUNT_RANGE);
        drop(rng);
        for _ in 0..count {
            let Some(key) = synthesize_key(engine, cx, def, &key_ty, key_category)? else {
                continue;
            };
            if pairs.iter().any(|(k, _)| *k == key) {
                continue;
            }
            let child = def.entry(&key.render(), value_ty.clone());
            if let Some(v) = engine.generate_in(cx, &child)? {
                pairs.push((key, v));
            }
        }
    } else {
        drop(rng);
        for raw_key in literal_keys {
            let key = coerce(Value::Text(raw_key.clone()), key_category, &key_ty)?;
            let child = def.entry(&raw_key, value_ty.clone());
            if let Some(v) = engine.generate_in(cx, &child)? {
                pairs.push((key, v));
            }
        }
    }
    Ok(Some(Value::Map(pairs)))
}

/// First/second generic argument with bindings applied; `None` when absent
/// or still an unbound type parameter.
fn resolved_arg(def: &Definition, position: usize) -> Option<TypeExpr> {
    let arg = def.ty().args().get(position)?;
    let resolved = def.bindings().apply(arg);
    if resolved.is_var() {
        None
    } else {
        Some(resolved)
    }
}

/// Highest numeric index among override coordinates shaped `coord[n]`.
fn max_explicit_index(def: &Definition) -> Option<usize> {
    def.overrides()
        .keys()
        .filter_map(|k| k.bracket_content_under(def.coordinate()))
        .filter_map(|content| content.parse::<usize>().ok())
        .max()
}

/// Distinct literal keys among override coordinates shaped `coord[k]`,
/// sorted for a stable iteration order.
fn literal_keys(def: &Definition) -> Vec<String> {
    let mut keys: Vec<String> = def
        .overrides()
        .keys()
        .filter_map(|k| k.bracket_content_under(def.coordinate()))
        .map(str::to_owned)
        .collect();
    keys.sort();
    keys.dedup();
    keys
}

/// Synthesize one map key. Leaf keys come straight from the category
/// generators; structured keys recurse through the dispatcher at a
/// positional entry coordinate.
fn synthesize_key(
    engine: &Engine,
    cx: &mut GenerationContext,
    def: &Definition,
    key_ty: &TypeExpr,
    key_category: Category,
) -> Result<Option<Value>> {
    if key_category.is_leaf() {
        let mut rng = thread_rng();
        return Ok(Some(crate::engine::fresh_leaf(key_category, &mut rng)));
    }
    let child = def.entry("<key>", key_ty.clone());
    engine.generate_in(cx, &child)
}
