use analytics::{LeverSensitivities, LeverageReport, TradeoffCurve};
use comfy_table::Table;
use core_types::Lever;
use rust_decimal::Decimal;

/// Shown wherever a value is undefined.
const NOT_AVAILABLE: &str = "n/a";

/// Formats a fraction as a signed percentage, e.g. `0.1` -> `+10.00%`.
pub fn signed_pct(fraction: Option<Decimal>) -> String {
    match fraction {
        Some(value) => {
            let pct = value.saturating_mul(Decimal::ONE_HUNDRED);
            if pct.is_sign_positive() && !pct.is_zero() {
                format!("+{:.2}%", pct)
            } else {
                format!("{:.2}%", pct)
            }
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formats percentage points without a sign, e.g. `45` -> `45.00%`.
pub fn share_pct(pct: Decimal) -> String {
    format!("{:.2}%", pct)
}

fn multiple(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.2}x", value),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Defined levers strongest first, undefined ones after in canonical order.
fn lever_rows(sensitivities: &LeverSensitivities) -> Vec<(Lever, Option<Decimal>)> {
    let mut rows: Vec<(Lever, Option<Decimal>)> = sensitivities
        .ranked()
        .into_iter()
        .map(|(lever, effect)| (lever, Some(effect)))
        .collect();
    rows.extend(
        Lever::ALL
            .iter()
            .filter(|lever| sensitivities.get(**lever).is_none())
            .map(|lever| (*lever, None)),
    );
    rows
}

pub fn report_tables(report: &LeverageReport) -> Vec<Table> {
    let breakdown = &report.breakdown;

    let mut structure = Table::new();
    structure.set_header(vec!["Cost structure", "% of sales"]);
    structure.add_row(vec!["Variable costs".to_string(), share_pct(breakdown.variable_cost_pct)]);
    structure.add_row(vec!["Fixed costs".to_string(), share_pct(breakdown.fixed_cost_pct)]);
    structure.add_row(vec![
        "Operating profit".to_string(),
        share_pct(breakdown.operating_profit_pct),
    ]);
    structure.add_row(vec![
        "Contribution margin".to_string(),
        share_pct(breakdown.contribution_margin_pct),
    ]);
    structure.add_row(vec![
        "Status".to_string(),
        if report.cost_structure.is_valid {
            "valid".to_string()
        } else {
            "no positive operating margin".to_string()
        },
    ]);

    let mut levers = Table::new();
    levers.set_header(vec!["Lever", "Improvement", "Operating profit change"]);
    for (lever, effect) in lever_rows(&report.sensitivities) {
        levers.add_row(vec![
            lever.label().to_string(),
            lever.improvement().to_string(),
            signed_pct(effect),
        ]);
    }

    let mut summary = Table::new();
    summary.set_header(vec!["Summary", "Value"]);
    summary.add_row(vec![
        "Degree of operating leverage".to_string(),
        multiple(report.operating_leverage.degree_of_operating_leverage),
    ]);
    summary.add_row(vec![
        "Margin of safety (volume)".to_string(),
        signed_pct(report.operating_leverage.margin_of_safety),
    ]);
    summary.add_row(vec![
        format!(
            "Volume change to offset {} price",
            signed_pct(Some(report.tradeoff.price_change_pct / Decimal::ONE_HUNDRED))
        ),
        signed_pct(report.tradeoff.required_volume_change_fraction),
    ]);

    vec![structure, levers, summary]
}

pub fn curve_table(curve: &TradeoffCurve) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Price change", "Required volume change"]);
    for point in &curve.points {
        table.add_row(vec![
            signed_pct(Some(point.price_change_pct / Decimal::ONE_HUNDRED)),
            signed_pct(point.required_volume_change_fraction),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::LeverageEngine;
    use core_types::CostStructureInput;
    use rust_decimal_macros::dec;

    #[test]
    fn percentages_carry_their_sign() {
        assert_eq!(signed_pct(Some(dec!(0.1))), "+10.00%");
        assert_eq!(signed_pct(Some(dec!(-0.05))), "-5.00%");
        assert_eq!(signed_pct(Some(Decimal::ZERO)), "0.00%");
        assert_eq!(signed_pct(None), "n/a");
        assert_eq!(share_pct(dec!(45)), "45.00%");
    }

    #[test]
    fn undefined_levers_follow_defined_ones() {
        let invalid = LeverSensitivities::undefined();
        let rows = lever_rows(&invalid);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|(_, effect)| effect.is_none()));

        let engine = LeverageEngine::new();
        let structure = engine.compute_cost_structure(dec!(45), dec!(30));
        let rows = lever_rows(&engine.compute_lever_sensitivities(&structure));
        assert_eq!(rows[0], (Lever::Price, Some(dec!(0.04))));
        assert_eq!(rows[3], (Lever::FixedCost, Some(dec!(0.012))));
    }

    #[test]
    fn report_renders_three_tables() {
        let report =
            LeverageEngine::new().report(&CostStructureInput::new(dec!(45), dec!(30)), dec!(-5));
        let rendered: Vec<String> = report_tables(&report).iter().map(|t| t.to_string()).collect();

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("25.00%"));
        assert!(rendered[1].contains("+4.00%"));
        assert!(rendered[2].contains("+10.00%"));
        assert!(rendered[2].contains("2.20x"));
    }
}
