use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cost structure as entered by the user.
///
/// Both costs are percentage points of sales, with sales normalized to 100.
/// The values are not range-checked here: clamping is the caller's job, and the
/// engine accepts any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostStructureInput {
    pub variable_cost_pct: Decimal,
    pub fixed_cost_pct: Decimal,
}

impl CostStructureInput {
    pub fn new(variable_cost_pct: Decimal, fixed_cost_pct: Decimal) -> Self {
        Self {
            variable_cost_pct,
            fixed_cost_pct,
        }
    }
}
