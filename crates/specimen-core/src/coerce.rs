//! Coercion of override payloads to the target category.
//!
//! Best-effort conversions in the spirit of column-affinity coercion:
//! values already of the right kind pass through, text parses into
//! scalars/temporals, numerics widen (and narrow only when exact).
//! Anything else is a conversion error, which is fatal for the override
//! that carried the payload.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use specimen_error::{Result, SpecimenError};
use specimen_types::{Category, Decimal, TypeExpr, Value};
use uuid::Uuid;

/// Coerce `value` to the given target category.
///
/// `target_ty` supplies the concrete type name where the category alone is
/// not enough (enum coercion) and enriches error messages.
pub fn coerce(value: Value, target: Category, target_ty: &TypeExpr) -> Result<Value> {
    // Null converts to anything: it is the absence of a value.
    if value.is_null() {
        return Ok(Value::Null);
    }
    let fail = |value: &Value| -> SpecimenError {
        SpecimenError::conversion(value.render(), target_ty.to_string())
    };
    match target {
        Category::String => coerce_to_text(value).map_err(|v| fail(&v)),
        Category::Boolean => match value {
            Value::Bool(_) => Ok(value),
            Value::Text(ref s) => match s.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(fail(&value)),
            },
            _ => Err(fail(&value)),
        },
        Category::Integer => match value {
            Value::Int(_) => Ok(value),
            Value::Long(n) => i32::try_from(n).map(Value::Int).map_err(|_| fail(&value)),
            Value::Float(x) => integral_f64(f64::from(x))
                .and_then(|n| i32::try_from(n).ok())
                .map(Value::Int)
                .ok_or_else(|| fail(&value)),
            Value::Double(x) => integral_f64(x)
                .and_then(|n| i32::try_from(n).ok())
                .map(Value::Int)
                .ok_or_else(|| fail(&value)),
            Value::Text(ref s) => s.trim().parse().map(Value::Int).map_err(|_| fail(&value)),
            Value::Decimal(d) if d.scale() == 0 => i32::try_from(d.unscaled())
                .map(Value::Int)
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::Long => match value {
            Value::Long(_) => Ok(value),
            Value::Int(n) => Ok(Value::Long(i64::from(n))),
            Value::Float(x) => integral_f64(f64::from(x))
                .map(Value::Long)
                .ok_or_else(|| fail(&value)),
            Value::Double(x) => integral_f64(x).map(Value::Long).ok_or_else(|| fail(&value)),
            Value::Text(ref s) => s.trim().parse().map(Value::Long).map_err(|_| fail(&value)),
            Value::Decimal(d) if d.scale() == 0 => Ok(Value::Long(d.unscaled())),
            _ => Err(fail(&value)),
        },
        Category::Float => match value {
            Value::Float(_) => Ok(value),
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            Value::Int(n) => Ok(Value::Float(n as f32)),
            #[allow(clippy::cast_precision_loss)]
            Value::Long(n) => Ok(Value::Float(n as f32)),
            #[allow(clippy::cast_possible_truncation)]
            Value::Double(x) => Ok(Value::Float(x as f32)),
            Value::Text(ref s) => s.trim().parse().map(Value::Float).map_err(|_| fail(&value)),
            Value::Decimal(d) => d
                .to_string()
                .parse()
                .map(Value::Float)
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::Double => match value {
            Value::Double(_) => Ok(value),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(n) => Ok(Value::Double(f64::from(n))),
            #[allow(clippy::cast_precision_loss)]
            Value::Long(n) => Ok(Value::Double(n as f64)),
            Value::Float(x) => Ok(Value::Double(f64::from(x))),
            Value::Text(ref s) => s
                .trim()
                .parse()
                .map(Value::Double)
                .map_err(|_| fail(&value)),
            Value::Decimal(d) => d
                .to_string()
                .parse()
                .map(Value::Double)
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::Character => match value {
            Value::Char(_) => Ok(value),
            Value::Text(ref s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(fail(&value)),
                }
            }
            _ => Err(fail(&value)),
        },
        Category::Instant => match value {
            Value::Instant(_) => Ok(value),
            Value::Timestamp(t) => Ok(Value::Instant(t.and_utc())),
            Value::Long(secs) => DateTime::from_timestamp(secs, 0)
                .map(Value::Instant)
                .ok_or_else(|| fail(&value)),
            Value::Text(ref s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|t| Value::Instant(t.with_timezone(&Utc)))
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::Timestamp => match value {
            Value::Timestamp(_) => Ok(value),
            Value::Instant(t) => Ok(Value::Timestamp(t.naive_utc())),
            Value::Long(secs) => DateTime::from_timestamp(secs, 0)
                .map(|t| Value::Timestamp(t.naive_utc()))
                .ok_or_else(|| fail(&value)),
            Value::Text(ref s) => parse_timestamp(s.trim())
                .map(Value::Timestamp)
                .ok_or_else(|| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::Date => match value {
            Value::Date(_) => Ok(value),
            Value::Instant(t) => Ok(Value::Date(t.date_naive())),
            Value::Timestamp(t) => Ok(Value::Date(t.date())),
            Value::Text(ref s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::BigDecimal => match value {
            Value::Decimal(_) => Ok(value),
            Value::Int(n) => Ok(Value::Decimal(Decimal::from_integer(i64::from(n)))),
            Value::Long(n) => Ok(Value::Decimal(Decimal::from_integer(n))),
            Value::Text(ref s) => Decimal::from_str(s.trim())
                .map(Value::Decimal)
                .map_err(|_| fail(&value)),
            Value::Double(x) => Decimal::from_str(&x.to_string())
                .map(Value::Decimal)
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::UniqueId => match value {
            Value::Uuid(_) => Ok(value),
            Value::Text(ref s) => Uuid::parse_str(s.trim())
                .map(Value::Uuid)
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        Category::List => match value {
            Value::List(_) => Ok(value),
            Value::Set(items) => Ok(Value::List(items)),
            _ => Err(fail(&value)),
        },
        Category::Set => match value {
            Value::Set(_) => Ok(value),
            Value::List(items) => {
                let mut deduped: Vec<Value> = Vec::with_capacity(items.len());
                for item in items {
                    if !deduped.contains(&item) {
                        deduped.push(item);
                    }
                }
                Ok(Value::Set(deduped))
            }
            _ => Err(fail(&value)),
        },
        Category::Map => match value {
            Value::Map(_) => Ok(value),
            _ => Err(fail(&value)),
        },
        Category::Enum => match value {
            Value::Enum { .. } => Ok(value),
            Value::Text(ref s) => Ok(Value::Enum {
                type_name: target_ty.name().unwrap_or("?").to_owned(),
                variant: s.clone(),
            }),
            _ => Err(fail(&value)),
        },
        Category::Structured => match value {
            Value::Struct(_) => Ok(value),
            _ => Err(fail(&value)),
        },
    }
}

/// Scalar-to-text rendering; collections and structs do not stringify.
fn coerce_to_text(value: Value) -> std::result::Result<Value, Value> {
    match value {
        Value::Text(_) => Ok(value),
        Value::Bool(b) => Ok(Value::Text(b.to_string())),
        Value::Int(n) => Ok(Value::Text(n.to_string())),
        Value::Long(n) => Ok(Value::Text(n.to_string())),
        Value::Float(x) => Ok(Value::Text(x.to_string())),
        Value::Double(x) => Ok(Value::Text(x.to_string())),
        Value::Char(c) => Ok(Value::Text(c.to_string())),
        Value::Instant(t) => Ok(Value::Text(t.to_rfc3339())),
        Value::Timestamp(t) => Ok(Value::Text(t.to_string())),
        Value::Date(d) => Ok(Value::Text(d.to_string())),
        Value::Decimal(d) => Ok(Value::Text(d.to_string())),
        Value::Uuid(u) => Ok(Value::Text(u.to_string())),
        Value::Enum { ref variant, .. } => Ok(Value::Text(variant.clone())),
        other => Err(other),
    }
}

/// `f64` that is exactly an integer within `i64` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
fn integral_f64(x: f64) -> Option<i64> {
    if x.is_finite() && x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        let n = x as i64;
        if n as f64 == x {
            return Some(n);
        }
    }
    None
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    #[test]
    fn null_passes_everywhere() {
        for target in [Category::Integer, Category::Structured, Category::Map] {
            assert_eq!(
                coerce(Value::Null, target, &TypeExpr::named("X")).unwrap(),
                Value::Null
            );
        }
    }

    #[test]
    fn text_to_numerics() {
        let ty = TypeExpr::integer();
        assert_eq!(
            coerce(Value::Text("1234".into()), Category::Integer, &ty).unwrap(),
            Value::Int(1234)
        );
        assert_eq!(
            coerce(Value::Text(" -7 ".into()), Category::Long, &TypeExpr::long()).unwrap(),
            Value::Long(-7)
        );
        assert!(coerce(Value::Text("abc".into()), Category::Integer, &ty).is_err());
    }

    #[test]
    fn narrowing_is_exact_only() {
        assert_eq!(
            coerce(Value::Long(42), Category::Integer, &TypeExpr::integer()).unwrap(),
            Value::Int(42)
        );
        assert!(coerce(
            Value::Long(i64::from(i32::MAX) + 1),
            Category::Integer,
            &TypeExpr::integer()
        )
        .is_err());
        assert_eq!(
            coerce(Value::Double(5.0), Category::Long, &TypeExpr::long()).unwrap(),
            Value::Long(5)
        );
        assert!(coerce(Value::Double(5.5), Category::Long, &TypeExpr::long()).is_err());
    }

    #[test]
    fn temporal_parsing() {
        let instant = coerce(
            Value::Text("2024-03-01T10:30:00Z".into()),
            Category::Instant,
            &TypeExpr::instant(),
        )
        .unwrap();
        assert_eq!(
            instant,
            Value::Instant(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())
        );

        let date = coerce(
            Value::Text("2024-03-01".into()),
            Category::Date,
            &TypeExpr::date(),
        )
        .unwrap();
        assert_eq!(
            date,
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );

        let ts = coerce(
            Value::Text("2024-03-01 10:30:00".into()),
            Category::Timestamp,
            &TypeExpr::timestamp(),
        )
        .unwrap();
        assert!(matches!(ts, Value::Timestamp(_)));
    }

    #[test]
    fn decimal_and_uuid() {
        assert_eq!(
            coerce(
                Value::Text("12.50".into()),
                Category::BigDecimal,
                &TypeExpr::decimal()
            )
            .unwrap(),
            Value::Decimal(Decimal::new(1250, 2))
        );
        let id = "f3b4958c-52a1-4f7b-bd9c-7f1f4e2a0f11";
        assert_eq!(
            coerce(
                Value::Text(id.into()),
                Category::UniqueId,
                &TypeExpr::unique_id()
            )
            .unwrap(),
            Value::Uuid(Uuid::parse_str(id).unwrap())
        );
    }

    #[test]
    fn text_to_enum_variant() {
        let out = coerce(
            Value::Text("Red".into()),
            Category::Enum,
            &TypeExpr::named("Color"),
        )
        .unwrap();
        assert_eq!(
            out,
            Value::Enum {
                type_name: "Color".into(),
                variant: "Red".into()
            }
        );
    }

    #[test]
    fn list_set_conversions() {
        let list = Value::List(vec![Value::Int(1), Value::Int(1), Value::Int(2)]);
        let set = coerce(list, Category::Set, &TypeExpr::set(TypeExpr::integer())).unwrap();
        assert_eq!(set, Value::Set(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn struct_target_rejects_scalars() {
        let err = coerce(
            Value::Int(1),
            Category::Structured,
            &TypeExpr::named("User"),
        )
        .unwrap_err();
        assert!(matches!(err, SpecimenError::Conversion { .. }));
    }

    #[test]
    fn scalar_to_text() {
        assert_eq!(
            coerce(Value::Int(5), Category::String, &TypeExpr::string()).unwrap(),
            Value::Text("5".into())
        );
        assert!(coerce(
            Value::List(vec![]),
            Category::String,
            &TypeExpr::string()
        )
        .is_err());
    }
}
