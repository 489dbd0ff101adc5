use analytics::{LeverageEngine, PriceSweep};
use clap::{Args, Parser, Subcommand};
use configuration::{Config, OutputFormat};
use core_types::{CostStructureInput, PctRange, clamp_pct, parse_pct, parse_pct_or_default};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod render;

/// The main entry point for the operating leverage explorer.
fn main() {
    // Optional: a .env file may carry RUST_LOG or LEVERAGE__* overrides.
    dotenvy::dotenv().ok();

    // Logs go to stderr so that table/JSON output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::Sweep(args) => handle_sweep(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore how a cost structure amplifies changes in price, volume and costs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cost structure, lever sensitivities and break-even volume.
    Report(ReportArgs),
    /// Tabulate the break-even volume change across a range of price changes.
    Sweep(SweepArgs),
}

/// Inputs shared by every command. Omitted values come from the configuration.
#[derive(Args)]
struct ScenarioArgs {
    /// Variable costs as a percentage of sales (e.g., "45" or "45%").
    #[arg(long, allow_hyphen_values = true)]
    variable_cost: Option<String>,

    /// Fixed costs as a percentage of sales (e.g., "30").
    #[arg(long, allow_hyphen_values = true)]
    fixed_cost: Option<String>,

    /// Configuration file. Defaults to ./config.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overriding the configured one.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Hypothetical price change in percent (e.g., "-5").
    #[arg(long, allow_hyphen_values = true)]
    price_change: Option<String>,
}

#[derive(Args)]
struct SweepArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// First price change of the sweep, in percent.
    #[arg(long, allow_hyphen_values = true)]
    from: Option<String>,

    /// Last price change of the sweep, in percent.
    #[arg(long, allow_hyphen_values = true)]
    to: Option<String>,

    /// Increment between price changes, in percentage points.
    #[arg(long)]
    step: Option<String>,
}

// ==============================================================================
// Input Handling
// ==============================================================================

fn load(args: &ScenarioArgs) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => configuration::load_config_from(path)?,
        None => configuration::load_config()?,
    };
    Ok(config)
}

/// Interactive input: malformed text counts as zero, out-of-range values are clamped.
fn user_pct(raw: Option<&str>, fallback: Decimal, range: &PctRange) -> Decimal {
    let value = raw.map_or(fallback, |raw| parse_pct_or_default(raw, Decimal::ZERO));
    clamp_pct(value, range)
}

fn resolve_input(args: &ScenarioArgs, config: &Config) -> CostStructureInput {
    let range = &config.ranges.cost_pct;
    CostStructureInput::new(
        user_pct(
            args.variable_cost.as_deref(),
            config.scenario.variable_cost_pct,
            range,
        ),
        user_pct(args.fixed_cost.as_deref(), config.scenario.fixed_cost_pct, range),
    )
}

/// Sweep bounds are not clamped or defaulted: a typo here is reported.
fn sweep_value(raw: Option<&str>, fallback: Decimal, name: &str) -> anyhow::Result<Decimal> {
    match raw {
        Some(raw) => parse_pct(raw).map_err(|e| anyhow::anyhow!("--{}: {}", name, e)),
        None => Ok(fallback),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = load(&args.scenario)?;
    let input = resolve_input(&args.scenario, &config);
    let price_change_pct = user_pct(
        args.price_change.as_deref(),
        config.scenario.price_change_pct,
        &config.ranges.price_change_pct,
    );

    let report = LeverageEngine::new().report(&input, price_change_pct);
    if !report.cost_structure.is_valid {
        tracing::info!("Costs reach or exceed sales; sensitivities are undefined.");
    }

    match args.scenario.format.unwrap_or(config.output.format) {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            for table in render::report_tables(&report) {
                println!("{table}");
            }
        }
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let config = load(&args.scenario)?;
    let input = resolve_input(&args.scenario, &config);
    let sweep = PriceSweep::new(
        sweep_value(args.from.as_deref(), config.sweep.start_pct, "from")?,
        sweep_value(args.to.as_deref(), config.sweep.end_pct, "to")?,
        sweep_value(args.step.as_deref(), config.sweep.step_pct, "step")?,
    );

    let engine = LeverageEngine::new();
    let structure = engine.compute_cost_structure(input.variable_cost_pct, input.fixed_cost_pct);
    let curve = engine.compute_tradeoff_curve(&structure, &sweep)?;

    match args.scenario.format.unwrap_or(config.output.format) {
        OutputFormat::Json => print_json(&curve)?,
        OutputFormat::Table => {
            println!("{}", render::curve_table(&curve));
            match curve.break_even_floor_pct {
                Some(floor) => println!(
                    "No volume change restores profit at a price change of {} or below.",
                    render::share_pct(floor)
                ),
                None => println!("Costs reach or exceed sales; no break-even volume exists."),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(variable: Option<&str>, fixed: Option<&str>) -> ScenarioArgs {
        ScenarioArgs {
            variable_cost: variable.map(str::to_string),
            fixed_cost: fixed.map(str::to_string),
            config: None,
            format: None,
        }
    }

    #[test]
    fn omitted_inputs_use_the_configured_scenario() {
        let input = resolve_input(&args(None, Some("20")), &Config::default());
        assert_eq!(input, CostStructureInput::new(dec!(45), dec!(20)));
    }

    #[test]
    fn malformed_inputs_become_zero_and_extremes_are_clamped() {
        let input = resolve_input(&args(Some(""), Some("250")), &Config::default());
        assert_eq!(input, CostStructureInput::new(dec!(0), dec!(100)));

        let input = resolve_input(&args(Some("abc"), Some("-4")), &Config::default());
        assert_eq!(input, CostStructureInput::new(dec!(0), dec!(0)));
    }

    #[test]
    fn sweep_bounds_are_parsed_strictly() {
        assert_eq!(sweep_value(Some("-20"), dec!(0), "from").unwrap(), dec!(-20));
        assert_eq!(sweep_value(None, dec!(5), "step").unwrap(), dec!(5));
        assert!(sweep_value(Some("five"), dec!(5), "step").is_err());
    }

    #[test]
    fn cli_accepts_negative_price_changes() {
        let cli = Cli::try_parse_from([
            "leverage",
            "report",
            "--variable-cost",
            "45",
            "--price-change",
            "-5",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Report(report) => {
                assert_eq!(report.price_change.as_deref(), Some("-5"));
                assert_eq!(report.scenario.format, Some(OutputFormat::Json));
            }
            Commands::Sweep(_) => panic!("expected the report command"),
        }
    }
}
