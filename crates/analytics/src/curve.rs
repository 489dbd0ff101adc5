use crate::engine::LeverageEngine;
use crate::error::AnalyticsError;
use crate::report::{CostStructure, PriceVolumeTradeoff};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of points in a single sweep.
pub const MAX_SWEEP_POINTS: usize = 10_001;

/// A linear range of price changes, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSweep {
    pub start_pct: Decimal,
    pub end_pct: Decimal,
    pub step_pct: Decimal,
}

impl PriceSweep {
    pub fn new(start_pct: Decimal, end_pct: Decimal, step_pct: Decimal) -> Self {
        Self {
            start_pct,
            end_pct,
            step_pct,
        }
    }

    /// Checks the range and returns the number of points it produces.
    fn point_count(&self) -> Result<usize, AnalyticsError> {
        if self.step_pct.is_sign_negative() || self.step_pct.is_zero() {
            return Err(AnalyticsError::InvalidSweep(format!(
                "step must be positive, got {}",
                self.step_pct
            )));
        }
        if self.start_pct > self.end_pct {
            return Err(AnalyticsError::InvalidSweep(format!(
                "start {} is above end {}",
                self.start_pct, self.end_pct
            )));
        }

        let steps = self
            .end_pct
            .checked_sub(self.start_pct)
            .and_then(|span| span.checked_div(self.step_pct))
            .map(|steps| steps.floor())
            .ok_or_else(|| AnalyticsError::InvalidSweep("range is too wide".to_string()))?;

        if steps >= Decimal::from(MAX_SWEEP_POINTS) {
            return Err(AnalyticsError::InvalidSweep(format!(
                "range yields more than {} points",
                MAX_SWEEP_POINTS
            )));
        }

        let steps = steps.to_usize().ok_or_else(|| {
            AnalyticsError::InvalidSweep("range yields an invalid point count".to_string())
        })?;
        Ok(steps + 1)
    }
}

/// Required volume change sampled across a range of price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeoffCurve {
    pub points: Vec<PriceVolumeTradeoff>,
    /// Price change, in percentage points, at or below which no volume change
    /// can restore the original profit.
    pub break_even_floor_pct: Option<Decimal>,
}

impl TradeoffCurve {
    /// Points that have a finite break-even volume.
    pub fn possible_points(&self) -> impl Iterator<Item = &PriceVolumeTradeoff> {
        self.points.iter().filter(|point| point.is_possible())
    }
}

impl LeverageEngine {
    /// Samples [`LeverageEngine::compute_tradeoff`] at every step of `sweep`.
    ///
    /// An invalid cost structure still yields a curve, with every point undefined.
    pub fn compute_tradeoff_curve(
        &self,
        structure: &CostStructure,
        sweep: &PriceSweep,
    ) -> Result<TradeoffCurve, AnalyticsError> {
        let count = sweep.point_count()?;

        let mut points: Vec<PriceVolumeTradeoff> = Vec::with_capacity(count);
        for index in 0..count {
            let price_change_pct = sweep
                .step_pct
                .checked_mul(Decimal::from(index))
                .and_then(|offset| sweep.start_pct.checked_add(offset))
                .ok_or_else(|| AnalyticsError::InvalidSweep("range is too wide".to_string()))?;
            if price_change_pct > sweep.end_pct {
                break;
            }
            // Steps below the precision left at `start` round away to nothing.
            if let Some(previous) = points.last() {
                if price_change_pct <= previous.price_change_pct {
                    return Err(AnalyticsError::InvalidSweep(format!(
                        "step {} is too small to move past {}",
                        sweep.step_pct, previous.price_change_pct
                    )));
                }
            }
            points.push(self.compute_tradeoff(structure, price_change_pct));
        }

        let break_even_floor_pct = if structure.is_valid {
            (structure.variable_cost_fraction - Decimal::ONE).checked_mul(Decimal::ONE_HUNDRED)
        } else {
            None
        };

        tracing::debug!(
            points = points.len(),
            start = %sweep.start_pct,
            end = %sweep.end_pct,
            step = %sweep.step_pct,
            "Computed trade-off curve"
        );

        Ok(TradeoffCurve {
            points,
            break_even_floor_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn typical() -> CostStructure {
        LeverageEngine::new().compute_cost_structure(dec!(45), dec!(30))
    }

    #[test]
    fn samples_every_step_inclusive() {
        let curve = LeverageEngine::new()
            .compute_tradeoff_curve(&typical(), &PriceSweep::new(dec!(-50), dec!(50), dec!(5)))
            .unwrap();

        assert_eq!(curve.points.len(), 21);
        assert_eq!(curve.points[0].price_change_pct, dec!(-50));
        assert_eq!(curve.points[20].price_change_pct, dec!(50));

        let at_minus_five = curve
            .points
            .iter()
            .find(|point| point.price_change_pct == dec!(-5))
            .unwrap();
        assert_eq!(at_minus_five.required_volume_change_fraction, Some(dec!(0.1)));
    }

    #[test]
    fn floor_marks_where_break_even_becomes_impossible() {
        let curve = LeverageEngine::new()
            .compute_tradeoff_curve(&typical(), &PriceSweep::new(dec!(-60), dec!(0), dec!(1)))
            .unwrap();

        assert_eq!(curve.break_even_floor_pct, Some(dec!(-55)));
        for point in &curve.points {
            assert_eq!(point.is_possible(), point.price_change_pct > dec!(-55));
        }
        assert_eq!(curve.possible_points().count(), 55);
    }

    #[test]
    fn steps_that_overshoot_stop_before_the_end() {
        let curve = LeverageEngine::new()
            .compute_tradeoff_curve(&typical(), &PriceSweep::new(dec!(0), dec!(10), dec!(4)))
            .unwrap();
        let prices: Vec<Decimal> = curve.points.iter().map(|p| p.price_change_pct).collect();
        assert_eq!(prices, vec![dec!(0), dec!(4), dec!(8)]);
    }

    #[test]
    fn invalid_structure_yields_undefined_points() {
        let engine = LeverageEngine::new();
        let structure = engine.compute_cost_structure(dec!(60), dec!(40));
        let curve = engine
            .compute_tradeoff_curve(&structure, &PriceSweep::new(dec!(-10), dec!(10), dec!(10)))
            .unwrap();

        assert_eq!(curve.points.len(), 3);
        assert_eq!(curve.possible_points().count(), 0);
        assert_eq!(curve.break_even_floor_pct, None);
    }

    #[test]
    fn rejects_bad_sweeps() {
        let engine = LeverageEngine::new();
        let structure = typical();

        for sweep in [
            PriceSweep::new(dec!(-50), dec!(50), dec!(0)),
            PriceSweep::new(dec!(-50), dec!(50), dec!(-5)),
            PriceSweep::new(dec!(10), dec!(-10), dec!(1)),
            PriceSweep::new(dec!(0), dec!(100), dec!(0.001)),
            PriceSweep::new(Decimal::MIN, Decimal::MAX, dec!(1)),
        ] {
            assert!(matches!(
                engine.compute_tradeoff_curve(&structure, &sweep),
                Err(AnalyticsError::InvalidSweep(_))
            ));
        }
    }

    #[test]
    fn step_below_precision_at_a_huge_start_terminates() {
        let engine = LeverageEngine::new();
        let huge = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        let tiny_step = Decimal::new(1, 10);
        assert_eq!(huge + tiny_step, huge);

        let curve = engine
            .compute_tradeoff_curve(&typical(), &PriceSweep::new(huge, huge, tiny_step))
            .unwrap();
        assert_eq!(curve.points.len(), 1);
        assert_eq!(curve.points[0].price_change_pct, huge);

        // Several points requested, but none of the steps move the value.
        let start = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        let sweep = PriceSweep::new(start, start + Decimal::ONE, dec!(0.01));
        assert!(matches!(
            engine.compute_tradeoff_curve(&typical(), &sweep),
            Err(AnalyticsError::InvalidSweep(_))
        ));
    }

    #[test]
    fn single_point_sweep() {
        let curve = LeverageEngine::new()
            .compute_tradeoff_curve(&typical(), &PriceSweep::new(dec!(3), dec!(3), dec!(1)))
            .unwrap();
        assert_eq!(curve.points.len(), 1);
    }
}
