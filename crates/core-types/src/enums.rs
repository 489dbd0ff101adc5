use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four independent drivers of operating profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    Price,
    Volume,
    FixedCost,
    VariableCost,
}

impl Lever {
    /// All levers in their canonical display order.
    pub const ALL: [Lever; 4] = [
        Lever::Price,
        Lever::Volume,
        Lever::FixedCost,
        Lever::VariableCost,
    ];

    /// A short human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Lever::Price => "Price",
            Lever::Volume => "Volume",
            Lever::FixedCost => "Fixed cost",
            Lever::VariableCost => "Variable cost",
        }
    }

    /// Describes what a 1% improvement of this lever means.
    /// Revenue levers improve upwards, cost levers improve downwards.
    pub fn improvement(&self) -> &'static str {
        match self {
            Lever::Price => "+1% price",
            Lever::Volume => "+1% volume",
            Lever::FixedCost => "-1% fixed costs",
            Lever::VariableCost => "-1% variable costs",
        }
    }
}

impl fmt::Display for Lever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
