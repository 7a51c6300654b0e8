//! Structured/composite and enum generation.
//!
//! The structured path is a small state machine over instantiation
//! strategies: guard entry, override short-circuit, factory attempt,
//! constructor attempt, field population, generic-parameter propagation,
//! and a guaranteed stack pop on exit. Cycles and depth overruns truncate
//! to null; everything unrecoverable is an instantiation error naming the
//! type and strategy.

use std::collections::HashSet;
use std::sync::Arc;

use rand::{thread_rng, Rng};
use specimen_error::{Result, SpecimenError};
use specimen_types::{
    Category, ConstructorSpec, Definition, FieldSpec, StructValue, TypeBindings, TypeSchema,
    Value, Visibility,
};
use tracing::{debug, warn};

use crate::engine::Engine;
use crate::guard::GenerationContext;
use crate::resolve::{resolve, Resolution};

/// Generate a structured (caller-defined) value.
pub(crate) fn generate_struct(
    engine: &Engine,
    cx: &mut GenerationContext,
    def: &Definition,
) -> Result<Option<Value>> {
    // A bare type-parameter reference: resolve through the bindings and
    // re-dispatch, or give up with null when nothing binds it.
    if def.ty().is_var() {
        let resolved = def.bindings().apply(def.ty());
        if resolved.is_var() {
            debug!(coordinate = %def.coordinate(), ty = %def.ty(), "unbound type parameter");
            return Ok(Some(Value::Null));
        }
        return engine.generate_in(cx, &def.retyped(resolved));
    }

    let type_name = def
        .ty()
        .name()
        .unwrap_or_default()
        .to_owned();

    // S0 + S6: check-push-run-pop; a violation truncates to null.
    let outcome = cx.guarded(&type_name, |cx| build_struct(engine, cx, def, &type_name))?;
    Ok(match outcome {
        None => {
            debug!(coordinate = %def.coordinate(), ty = %type_name, "cycle/depth truncation");
            Some(Value::Null)
        }
        Some(inner) => inner,
    })
}

fn build_struct(
    engine: &Engine,
    cx: &mut GenerationContext,
    def: &Definition,
    type_name: &str,
) -> Result<Option<Value>> {
    // S1: an exact override supplies a ready-made object, returned verbatim
    // with no field population.
    let mut rng = thread_rng();
    match resolve(def, Category::Structured, engine.patterns(), &mut rng)? {
        Resolution::Skip => return Ok(None),
        Resolution::Ready(v) => return Ok(Some(v)),
        Resolution::Fresh => {}
    }
    drop(rng);

    let schema = engine
        .schemas()
        .lookup(type_name)
        .ok_or_else(|| SpecimenError::schema_missing(type_name))?;

    // S5: bind declared type parameters positionally to the descriptor's
    // arguments; inherited bindings win on conflict.
    let fresh = schema
        .type_params()
        .iter()
        .zip(def.ty().args())
        .fold(TypeBindings::empty(), |acc, (param, arg)| {
            acc.bind(param.clone(), def.bindings().apply(arg))
        });
    let scoped = def.with_bindings(fresh.inheriting(def.bindings()));

    // S2: zero-argument factory attempt.
    let mut instance: Option<StructValue> = None;
    let mut factory_set: HashSet<String> = HashSet::new();
    for factory in schema.factories() {
        match (factory.produce)() {
            Ok(Value::Struct(sv)) => {
                factory_set = sv.fields().map(|(name, _)| name.to_owned()).collect();
                debug!(
                    ty = type_name,
                    factory = %factory.name,
                    preset = factory_set.len(),
                    "instantiated via factory"
                );
                instance = Some(sv);
                break;
            }
            Ok(other) => {
                warn!(
                    ty = type_name,
                    factory = %factory.name,
                    got = other.kind_name(),
                    "factory returned a non-assignable value; skipping"
                );
            }
            Err(err) => {
                debug!(ty = type_name, factory = %factory.name, %err, "factory failed");
            }
        }
    }

    // S3: constructor attempt when no factory produced an instance.
    let mut sv = match instance {
        Some(sv) => sv,
        None => invoke_constructor(engine, cx, &scoped, &schema, type_name)?,
    };

    // S4: field population over every non-constant declared field.
    for field in schema.fields() {
        if field.constant {
            continue;
        }
        let field_coord = scoped.coordinate().child(&field.name);
        let has_override = scoped.overrides().contains_key(&field_coord);
        if factory_set.contains(&field.name) && !has_override {
            // Factories enforce invariants; leave their fields alone.
            continue;
        }
        let field_ty = scoped.bindings().apply(&field.ty);
        if field_ty.is_var() {
            debug!(ty = type_name, field = %field.name, "unbound field type; left unset");
            continue;
        }
        let child = scoped.field(&field.name, field_ty);
        match engine.generate_in(cx, &child) {
            Ok(Some(v)) => assign_field(&schema, &mut sv, field, v),
            Ok(None) => {} // null-kind override: slot skipped
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                warn!(ty = type_name, field = %field.name, %err, "field generation failed; left unset");
            }
        }
    }

    Ok(Some(Value::Struct(sv)))
}

/// Direct assignment, or the conventional setter when the field requires
/// one. Assignment failures never abort the enclosing object.
fn assign_field(schema: &Arc<TypeSchema>, sv: &mut StructValue, field: &FieldSpec, value: Value) {
    if !field.setter_only {
        sv.set(&field.name, value);
        return;
    }
    match schema.setter(&field.name) {
        Some(setter) => {
            if let Err(err) = setter(sv, value) {
                warn!(field = %field.name, %err, "setter failed; field left unset");
            }
        }
        None => {
            warn!(field = %field.name, "no setter registered for setter-only field");
        }
    }
}

/// Rank candidates (public first, fewest parameters; then the
/// least-restrictive non-public), generate each parameter recursively, and
/// invoke. Only-private candidates are an instantiation error.
fn invoke_constructor(
    engine: &Engine,
    cx: &mut GenerationContext,
    scoped: &Definition,
    schema: &Arc<TypeSchema>,
    type_name: &str,
) -> Result<StructValue> {
    let implicit_default;
    let candidate = if schema.constructors().is_empty() {
        // The dynamic-model analogue of an implicit default constructor.
        implicit_default = ConstructorSpec::public(Vec::new());
        &implicit_default
    } else {
        select_constructor(schema.constructors()).ok_or_else(|| {
            SpecimenError::instantiation(
                type_name,
                "constructor",
                "only private constructors declared",
            )
        })?
    };
    if candidate.visibility == Visibility::Crate {
        debug!(ty = type_name, "forcing access to non-public constructor");
    }

    let mut args = Vec::with_capacity(candidate.params.len());
    for param in &candidate.params {
        let param_ty = scoped.bindings().apply(&param.ty);
        let value = if param_ty.is_var() {
            debug!(ty = type_name, param = %param.name, "unbound parameter type");
            Value::Null
        } else {
            let child = scoped.field(&param.name, param_ty);
            engine.generate_in(cx, &child)?.unwrap_or(Value::Null)
        };
        args.push(value);
    }

    let built = match &candidate.invoke {
        Some(f) => f(&args).map_err(|err| {
            SpecimenError::instantiation(type_name, "constructor", err.to_string())
        })?,
        None => {
            let mut sv = StructValue::new(type_name);
            for (param, value) in candidate.params.iter().zip(args) {
                sv.set(&param.name, value);
            }
            Value::Struct(sv)
        }
    };
    match built {
        Value::Struct(sv) => Ok(sv),
        other => Err(SpecimenError::instantiation(
            type_name,
            "constructor",
            format!("constructor produced {}", other.kind_name()),
        )),
    }
}

/// Best candidate: public with fewest parameters, else crate-visible with
/// fewest parameters, else none.
fn select_constructor(candidates: &[ConstructorSpec]) -> Option<&ConstructorSpec> {
    for visibility in [Visibility::Public, Visibility::Crate] {
        if let Some(best) = candidates
            .iter()
            .filter(|c| c.visibility == visibility)
            .min_by_key(|c| c.params.len())
        {
            return Some(best);
        }
    }
    None
}

/// Generate an enumerated value: a random variant, unless resolution
/// supplied one (validated case-insensitively against the schema).
pub(crate) fn generate_enum(engine: &Engine, def: &Definition) -> Result<Option<Value>> {
    let type_name = def.ty().name().unwrap_or_default().to_owned();
    let schema = engine
        .schemas()
        .lookup(&type_name)
        .ok_or_else(|| SpecimenError::schema_missing(&type_name))?;

    let mut rng = thread_rng();
    match resolve(def, Category::Enum, engine.patterns(), &mut rng)? {
        Resolution::Skip => Ok(None),
        Resolution::Ready(Value::Enum { variant, .. }) => {
            let canonical = schema
                .variants()
                .iter()
                .find(|v| v.eq_ignore_ascii_case(&variant))
                .ok_or_else(|| {
                    SpecimenError::conversion(format!("\"{variant}\""), &type_name)
                })?;
            Ok(Some(Value::Enum {
                type_name,
                variant: canonical.clone(),
            }))
        }
        Resolution::Ready(other) => Ok(Some(other)),
        Resolution::Fresh => {
            if schema.variants().is_empty() {
                debug!(ty = %type_name, "enum has no variants");
                return Ok(Some(Value::Null));
            }
            let variant = schema.variants()[rng.gen_range(0..schema.variants().len())].clone();
            Ok(Some(Value::Enum { type_name, variant }))
        }
    }
}
