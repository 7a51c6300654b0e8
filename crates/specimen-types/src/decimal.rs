//! A small fixed-point decimal: an unscaled `i64` plus a decimal scale.
//!
//! Enough surface for fixture values (construction, parsing, formatting,
//! equality). Not a general arithmetic type.

use std::fmt;
use std::str::FromStr;

use specimen_error::SpecimenError;

/// A fixed-point decimal value `unscaled * 10^-scale`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Decimal {
    unscaled: i64,
    scale: u32,
}

impl Decimal {
    /// Build from an unscaled integer and a scale.
    ///
    /// `Decimal::new(12345, 2)` is `123.45`.
    #[must_use]
    pub const fn new(unscaled: i64, scale: u32) -> Self {
        Self { unscaled, scale }
    }

    /// Build from a plain integer (scale 0).
    #[must_use]
    pub const fn from_integer(value: i64) -> Self {
        Self::new(value, 0)
    }

    /// The unscaled integer component.
    #[must_use]
    pub const fn unscaled(self) -> i64 {
        self.unscaled
    }

    /// The decimal scale (number of fractional digits).
    #[must_use]
    pub const fn scale(self) -> u32 {
        self.scale
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let digits = self.unscaled.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int_part}.{frac_part}")
        } else {
            write!(f, "{sign}0.{digits:0>scale$}")
        }
    }
}

impl FromStr for Decimal {
    type Err = SpecimenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SpecimenError::conversion(format!("\"{s}\""), "Decimal");
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(bad());
        }
        let (int_text, frac_text) = match trimmed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (trimmed, ""),
        };
        if frac_text.contains('.') || !frac_text.chars().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }
        let negative = int_text.starts_with('-');
        let joined = format!(
            "{}{}",
            int_text.strip_prefix('+').unwrap_or(int_text),
            frac_text
        );
        let unscaled: i64 = joined.parse().map_err(|_| bad())?;
        // "-0.5" parses its integer part as "-0", losing the sign.
        let unscaled = if negative && unscaled > 0 {
            -unscaled
        } else {
            unscaled
        };
        Ok(Self::new(unscaled, frac_text.len() as u32))
    }
}
