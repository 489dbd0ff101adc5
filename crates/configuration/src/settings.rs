use core_types::PctRange;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scenario: Scenario,
    pub ranges: InputRanges,
    pub sweep: SweepSettings,
    pub output: Output,
}

/// The inputs used when the user does not supply their own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Variable costs as percentage points of sales.
    pub variable_cost_pct: Decimal,
    /// Fixed costs as percentage points of sales.
    pub fixed_cost_pct: Decimal,
    /// The hypothetical price change to offset with volume.
    pub price_change_pct: Decimal,
}

/// Bounds that user input is clamped to before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    pub cost_pct: PctRange,
    pub price_change_pct: PctRange,
}

/// The range of price changes plotted on the trade-off curve.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    pub start_pct: Decimal,
    pub end_pct: Decimal,
    pub step_pct: Decimal,
}

/// How results are rendered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Output {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

// --- Default Implementations ---

impl Default for Scenario {
    fn default() -> Self {
        Self {
            variable_cost_pct: dec!(45),
            fixed_cost_pct: dec!(30),
            price_change_pct: dec!(-5),
        }
    }
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            cost_pct: PctRange::cost(),
            price_change_pct: PctRange::price_change(),
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            start_pct: dec!(-50),
            end_pct: dec!(50),
            step_pct: dec!(5),
        }
    }
}
