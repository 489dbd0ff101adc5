//! Normalization of raw percentage text before it reaches the engine.

use crate::error::CoreError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An inclusive range of percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PctRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PctRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// The recommended range for cost percentages.
    pub fn cost() -> Self {
        Self::new(dec!(0), dec!(100))
    }

    /// The recommended range for a hypothetical price change.
    pub fn price_change() -> Self {
        Self::new(dec!(-50), dec!(50))
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Parses a percentage such as `"45"`, `"-5.5 %"` or `"1e1"`.
///
/// Surrounding whitespace and a single trailing `%` are ignored. Empty or
/// malformed text is rejected.
pub fn parse_pct(raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    let cleaned = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    if cleaned.is_empty() {
        return Err(CoreError::InvalidInput(
            "percentage".to_string(),
            "value is empty".to_string(),
        ));
    }

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| {
            CoreError::InvalidInput(
                "percentage".to_string(),
                format!("'{}' is not a number", raw),
            )
        })
}

/// Lenient variant of [`parse_pct`] for interactive input: anything that does
/// not parse becomes `default`.
pub fn parse_pct_or_default(raw: &str, default: Decimal) -> Decimal {
    match parse_pct(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(input = raw, %default, "{}; using default", e);
            default
        }
    }
}

/// Restricts `value` to `range`. A range with `min > max` yields `min`.
pub fn clamp_pct(value: Decimal, range: &PctRange) -> Decimal {
    if value < range.min {
        range.min
    } else if value > range.max {
        range.max
    } else {
        value
    }
}
