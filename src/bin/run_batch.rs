//! Run projections for a whole batch of startups from startups.csv
//!
//! Outputs one summary row per startup and scenario

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use runway_twin::{
    inputs::{load_parameter_sets, loader::DEFAULT_STARTUPS_PATH},
    projection::DEFAULT_HORIZON_MONTHS,
    ProjectionConfig, ScenarioRunner, ScenarioVariant,
};

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project every startup in a CSV under each scenario", version)]
struct Cli {
    /// CSV of startup parameter sets.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STARTUPS_PATH)]
    input: PathBuf,

    /// Output CSV path.
    #[arg(long, value_name = "PATH", default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Number of months to project.
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    horizon: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading startups from {}...", cli.input.display());

    let sets = load_parameter_sets(&cli.input)?;
    println!("Loaded {} startups in {:?}", sets.len(), start.elapsed());

    let runner = ScenarioRunner::with_config(ProjectionConfig { horizon_months: cli.horizon });

    println!("Running projections...");
    let proj_start = Instant::now();
    let results: Vec<_> = ScenarioVariant::ALL
        .iter()
        .map(|&scenario| (scenario, runner.run_batch(&sets, scenario)))
        .collect();
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    writeln!(file, "StartupID,Scenario,AdjRevenue,AdjFixedExpenses,BurnRate,Cash,RunwayMonths,Unbounded,RiskScore,Survival,Status,BreakEvenMonth,InsolvencyMonth,FinalCash")?;

    for (scenario, batch) in &results {
        for result in batch {
            let m = &result.report.metrics;
            let t = &result.report.trajectory;
            writeln!(
                file,
                "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{},{},{},{},{},{},{:.0}",
                result.id,
                scenario,
                m.adjusted_revenue,
                m.adjusted_fixed_expenses,
                m.burn_rate,
                m.current_cash_available,
                m.runway.months_capped(),
                m.runway.is_unbounded(),
                m.risk_score,
                m.survival_probability,
                result.report.status,
                t.break_even_month.map(|v| v.to_string()).unwrap_or_default(),
                t.insolvency_month.map(|v| v.to_string()).unwrap_or_default(),
                t.summary().final_cash,
            )?;
        }
    }

    println!("Output written to {}", cli.output.display());

    // Print summary stats
    println!("\nBatch Summary:");
    for (scenario, batch) in &results {
        let collapsing = batch.iter().filter(|r| r.report.collapse_within_horizon).count();
        let avg_risk = if batch.is_empty() {
            0.0
        } else {
            batch.iter().map(|r| r.report.metrics.risk_score as f64).sum::<f64>() / batch.len() as f64
        };
        println!(
            "  {:>8}: {} of {} collapse within {} months, average risk {:.1}",
            scenario,
            collapsing,
            batch.len(),
            cli.horizon,
            avg_risk,
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let cli = Cli::parse_from(["run_batch"]);
        assert_eq!(cli.horizon, DEFAULT_HORIZON_MONTHS);
        assert_eq!(cli.input, PathBuf::from(DEFAULT_STARTUPS_PATH));
    }
}
