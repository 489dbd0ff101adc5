use crate::report::{
    CostStructure, LeverSensitivities, LeverageReport, OperatingLeverage, PriceVolumeTradeoff,
};
use core_types::CostStructureInput;
use rust_decimal::Decimal;

/// Size of the improvement measured for each lever (1% = 0.01).
const ONE_PERCENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A stateless calculator for operating leverage.
///
/// Every method is a pure function of its arguments and never fails. Financially
/// impossible inputs (costs at or above sales, an unrecoverable price cut) are
/// reported through `is_valid` and `None` fields rather than errors, and values
/// outside the recommended ranges are accepted without clamping.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeverageEngine {}

impl LeverageEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts cost percentages of sales into fractions and derives the
    /// operating margin.
    ///
    /// # Arguments
    ///
    /// * `variable_cost_pct` - Variable costs as percentage points of sales.
    /// * `fixed_cost_pct` - Fixed costs as percentage points of sales.
    pub fn compute_cost_structure(
        &self,
        variable_cost_pct: Decimal,
        fixed_cost_pct: Decimal,
    ) -> CostStructure {
        let variable_cost_fraction = variable_cost_pct / HUNDRED;
        let fixed_cost_fraction = fixed_cost_pct / HUNDRED;
        let operating_margin_fraction =
            Decimal::ONE - variable_cost_fraction - fixed_cost_fraction;

        CostStructure {
            variable_cost_fraction,
            fixed_cost_fraction,
            operating_margin_fraction,
            is_valid: operating_margin_fraction > Decimal::ZERO,
        }
    }

    /// Effect on operating profit of a 1% improvement in each lever, holding the
    /// others constant. All four are undefined unless the margin is positive.
    pub fn compute_lever_sensitivities(&self, structure: &CostStructure) -> LeverSensitivities {
        if !structure.is_valid {
            return LeverSensitivities::undefined();
        }

        let c = structure.variable_cost_fraction;
        let f = structure.fixed_cost_fraction;
        let m = structure.operating_margin_fraction;

        // Each effect is 1% of the affected slice of sales, relative to the margin.
        let relative_to_margin = |share: Decimal| {
            ONE_PERCENT
                .checked_mul(share)
                .and_then(|delta| delta.checked_div(m))
        };

        LeverSensitivities {
            price_effect: relative_to_margin(Decimal::ONE),
            volume_effect: relative_to_margin(Decimal::ONE - c),
            fixed_cost_effect: relative_to_margin(f),
            variable_cost_effect: relative_to_margin(c),
        }
    }

    /// Volume change required to keep operating profit constant after a price
    /// change of `price_change_pct` percent.
    ///
    /// Solves `(1 + v)(1 + p - c) = 1 - c` for `v`. When the post-change unit
    /// margin `1 + p - c` is zero or negative there is no finite solution.
    pub fn compute_tradeoff(
        &self,
        structure: &CostStructure,
        price_change_pct: Decimal,
    ) -> PriceVolumeTradeoff {
        let required_volume_change_fraction = if structure.is_valid {
            let c = structure.variable_cost_fraction;
            let p = price_change_pct / HUNDRED;
            let denominator = Decimal::ONE + p - c;

            if denominator <= Decimal::ZERO {
                None
            } else {
                (Decimal::ONE - c)
                    .checked_div(denominator)
                    .and_then(|multiplier| multiplier.checked_sub(Decimal::ONE))
            }
        } else {
            None
        };

        PriceVolumeTradeoff {
            price_change_pct,
            required_volume_change_fraction,
        }
    }

    /// Degree of operating leverage and margin of safety.
    pub fn compute_operating_leverage(&self, structure: &CostStructure) -> OperatingLeverage {
        if !structure.is_valid {
            return OperatingLeverage {
                degree_of_operating_leverage: None,
                margin_of_safety: None,
            };
        }

        let contribution = structure.contribution_margin_fraction();
        let margin = structure.operating_margin_fraction;

        let margin_of_safety = if contribution > Decimal::ZERO {
            margin.checked_div(contribution)
        } else {
            None
        };

        OperatingLeverage {
            degree_of_operating_leverage: contribution.checked_div(margin),
            margin_of_safety,
        }
    }

    /// Runs the full calculation pass for one set of inputs.
    pub fn report(&self, input: &CostStructureInput, price_change_pct: Decimal) -> LeverageReport {
        let cost_structure =
            self.compute_cost_structure(input.variable_cost_pct, input.fixed_cost_pct);

        tracing::debug!(
            variable_cost_pct = %input.variable_cost_pct,
            fixed_cost_pct = %input.fixed_cost_pct,
            %price_change_pct,
            operating_margin = %cost_structure.operating_margin_fraction,
            is_valid = cost_structure.is_valid,
            "Recomputing leverage report"
        );

        LeverageReport {
            input: *input,
            cost_structure,
            breakdown: cost_structure.breakdown(),
            sensitivities: self.compute_lever_sensitivities(&cost_structure),
            operating_leverage: self.compute_operating_leverage(&cost_structure),
            tradeoff: self.compute_tradeoff(&cost_structure, price_change_pct),
        }
    }
}
