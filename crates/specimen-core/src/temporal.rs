//! Fresh generation for the temporal categories: values scattered around
//! the current moment (± one year for instants/timestamps, ± ten years for
//! dates).

use chrono::{Duration, Utc};
use rand::Rng;
use specimen_types::Value;

const YEAR_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Random UTC instant within a year of now.
pub fn fresh_instant(rng: &mut impl Rng) -> Value {
    let offset = rng.gen_range(-YEAR_SECONDS..=YEAR_SECONDS);
    Value::Instant(Utc::now() + Duration::seconds(offset))
}

/// Random zone-less timestamp within a year of now.
pub fn fresh_timestamp(rng: &mut impl Rng) -> Value {
    let offset = rng.gen_range(-YEAR_SECONDS..=YEAR_SECONDS);
    Value::Timestamp((Utc::now() + Duration::seconds(offset)).naive_utc())
}

/// Random calendar date within ten years of today.
pub fn fresh_date(rng: &mut impl Rng) -> Value {
    let offset = rng.gen_range(-3650_i64..=3650);
    Value::Date(Utc::now().date_naive() + Duration::days(offset))
}
