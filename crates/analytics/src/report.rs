use core_types::{CostStructureInput, Lever};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A cost structure normalized against sales of 1.
///
/// `is_valid` is true only for a strictly positive operating margin. Every
/// sensitivity divides by the margin, so a zero or negative margin leaves them
/// undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostStructure {
    pub variable_cost_fraction: Decimal,
    pub fixed_cost_fraction: Decimal,
    pub operating_margin_fraction: Decimal,
    pub is_valid: bool,
}

impl CostStructure {
    /// Share of sales left after variable costs only.
    pub fn contribution_margin_fraction(&self) -> Decimal {
        Decimal::ONE - self.variable_cost_fraction
    }

    /// The structure in percentage points of sales, for the cost chart.
    ///
    /// Operating profit is reported as-is, so a loss shows as a negative share.
    /// Values saturate at the limits of `Decimal` for absurd inputs.
    pub fn breakdown(&self) -> CostBreakdown {
        let hundred = dec!(100);
        CostBreakdown {
            variable_cost_pct: self.variable_cost_fraction.saturating_mul(hundred),
            fixed_cost_pct: self.fixed_cost_fraction.saturating_mul(hundred),
            operating_profit_pct: self.operating_margin_fraction.saturating_mul(hundred),
            contribution_margin_pct: self.contribution_margin_fraction().saturating_mul(hundred),
        }
    }
}

/// How each 100 of sales is split between costs and profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub variable_cost_pct: Decimal,
    pub fixed_cost_pct: Decimal,
    pub operating_profit_pct: Decimal,
    pub contribution_margin_pct: Decimal,
}

/// The fractional change in operating profit caused by a 1% improvement of
/// each lever in isolation. `None` marks an undefined effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverSensitivities {
    pub price_effect: Option<Decimal>,
    pub volume_effect: Option<Decimal>,
    pub fixed_cost_effect: Option<Decimal>,
    pub variable_cost_effect: Option<Decimal>,
}

impl LeverSensitivities {
    /// Sensitivities of a structure without a positive margin.
    pub fn undefined() -> Self {
        Self {
            price_effect: None,
            volume_effect: None,
            fixed_cost_effect: None,
            variable_cost_effect: None,
        }
    }

    pub fn get(&self, lever: Lever) -> Option<Decimal> {
        match lever {
            Lever::Price => self.price_effect,
            Lever::Volume => self.volume_effect,
            Lever::FixedCost => self.fixed_cost_effect,
            Lever::VariableCost => self.variable_cost_effect,
        }
    }

    /// True when all four effects are defined.
    pub fn is_defined(&self) -> bool {
        Lever::ALL.iter().all(|lever| self.get(*lever).is_some())
    }

    /// Defined effects, strongest first. Ties keep the canonical lever order.
    pub fn ranked(&self) -> Vec<(Lever, Decimal)> {
        let mut ranked: Vec<(Lever, Decimal)> = Lever::ALL
            .iter()
            .filter_map(|lever| self.get(*lever).map(|effect| (*lever, effect)))
            .collect();

        // sort_by is stable, which preserves the canonical order on ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Summary leverage figures derived from the margin structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingLeverage {
    /// Contribution margin over operating margin: the % change in profit per
    /// 1% change in volume.
    pub degree_of_operating_leverage: Option<Decimal>,
    /// Fraction by which volume can fall before operating profit reaches zero.
    pub margin_of_safety: Option<Decimal>,
}

/// The volume change needed to hold operating profit constant under a price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceVolumeTradeoff {
    pub price_change_pct: Decimal,
    /// `None` when the structure is invalid or no finite volume change can
    /// restore the original profit.
    pub required_volume_change_fraction: Option<Decimal>,
}

impl PriceVolumeTradeoff {
    pub fn is_possible(&self) -> bool {
        self.required_volume_change_fraction.is_some()
    }
}

/// Everything a presentation layer needs for one set of inputs.
///
/// Built from scratch on every recomputation; nothing here is mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverageReport {
    pub input: CostStructureInput,
    pub cost_structure: CostStructure,
    pub breakdown: CostBreakdown,
    pub sensitivities: LeverSensitivities,
    pub operating_leverage: OperatingLeverage,
    pub tradeoff: PriceVolumeTradeoff,
}
