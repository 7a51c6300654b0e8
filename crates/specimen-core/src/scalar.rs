//! Fresh generation for the scalar categories.
//!
//! Each function is pure aside from its random source, and each covers its
//! type's natural range: full-range integers, finite floats, printable
//! characters, alphanumeric strings of random length, v4 unique IDs.

use rand::distributions::Alphanumeric;
use rand::Rng;
use specimen_types::{Decimal, Value};
use uuid::Uuid;

/// Shortest/longest fresh string.
const STRING_LEN: std::ops::RangeInclusive<usize> = 5..=20;

/// Random alphanumeric string.
pub fn fresh_text(rng: &mut impl Rng) -> Value {
    let len = rng.gen_range(STRING_LEN);
    let s: String = (0..len).map(|_| rng.sample(Alphanumeric) as char).collect();
    Value::Text(s)
}

/// Fair coin.
pub fn fresh_bool(rng: &mut impl Rng) -> Value {
    Value::Bool(rng.gen())
}

/// Full-range `i32`.
pub fn fresh_int(rng: &mut impl Rng) -> Value {
    Value::Int(rng.gen())
}

/// Full-range `i64`.
pub fn fresh_long(rng: &mut impl Rng) -> Value {
    Value::Long(rng.gen())
}

/// Finite random `f32`.
pub fn fresh_float(rng: &mut impl Rng) -> Value {
    Value::Float(rng.gen_range(-1.0e6_f32..1.0e6_f32))
}

/// Finite random `f64`.
pub fn fresh_double(rng: &mut impl Rng) -> Value {
    Value::Double(rng.gen_range(-1.0e9_f64..1.0e9_f64))
}

/// Printable ASCII character.
pub fn fresh_char(rng: &mut impl Rng) -> Value {
    Value::Char(rng.gen_range(0x21_u8..=0x7e_u8) as char)
}

/// Random two-fractional-digit decimal.
pub fn fresh_decimal(rng: &mut impl Rng) -> Value {
    Value::Decimal(Decimal::new(rng.gen_range(-999_999_i64..=999_999), 2))
}

/// Version-4 unique identifier.
pub fn fresh_uuid(_rng: &mut impl Rng) -> Value {
    Value::Uuid(Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use rand::thread_rng;

    use super::*;

    #[test]
    fn text_is_alphanumeric_in_range() {
        let mut rng = thread_rng();
        for _ in 0..32 {
            match fresh_text(&mut rng) {
                Value::Text(s) => {
                    assert!(STRING_LEN.contains(&s.len()));
                    assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn char_is_printable() {
        let mut rng = thread_rng();
        for _ in 0..64 {
            match fresh_char(&mut rng) {
                Value::Char(c) => assert!(c.is_ascii_graphic(), "{c:?}"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn floats_are_finite() {
        let mut rng = thread_rng();
        for _ in 0..32 {
            match (fresh_float(&mut rng), fresh_double(&mut rng)) {
                (Value::Float(x), Value::Double(y)) => {
                    assert!(x.is_finite());
                    assert!(y.is_finite());
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn uuids_are_v4_and_distinct() {
        let mut rng = thread_rng();
        let (a, b) = (fresh_uuid(&mut rng), fresh_uuid(&mut rng));
        match (&a, &b) {
            (Value::Uuid(a), Value::Uuid(b)) => {
                assert_eq!(a.get_version_num(), 4);
                assert_ne!(a, b);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decimal_scale_is_two() {
        let mut rng = thread_rng();
        match fresh_decimal(&mut rng) {
            Value::Decimal(d) => assert_eq!(d.scale(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
