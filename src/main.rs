//! Runway Twin CLI
//!
//! Command-line interface for projecting a single startup

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use runway_twin::{
    context::{ChatContext, DashboardSnapshot},
    inputs::load_parameters_json,
    projection::DEFAULT_HORIZON_MONTHS,
    report::{display_cash, format_currency, format_months},
    insights::{generate_insights, generate_outcomes},
    sensitivity::analyze_sensitivity,
    ProjectionConfig, ScenarioRunner, ScenarioVariant, StartupParameters, TwinReport,
};

#[derive(Debug, Parser)]
#[command(
    name = "runway-twin",
    about = "Project burn, runway and risk for a startup under expected/best/worst scenarios",
    version
)]
struct Cli {
    /// JSON file with startup parameters; missing fields use the dashboard defaults.
    #[arg(long, value_name = "PATH")]
    params: Option<PathBuf>,

    /// Scenario to project: expected, best or worst.
    #[arg(long, default_value = "expected")]
    scenario: ScenarioVariant,

    /// Number of months to project.
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    horizon: u32,

    /// Show all three scenarios side by side.
    #[arg(long)]
    compare: bool,

    /// Show how much each lever moves the runway.
    #[arg(long)]
    sensitivity: bool,

    /// Show twin insights and decision outcomes.
    #[arg(long)]
    insights: bool,

    /// Print the report as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Print the chat-assistant context for this question and exit.
    #[arg(long, value_name = "QUESTION")]
    ask: Option<String>,

    /// Write the monthly trajectory to a CSV file.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = match &cli.params {
        Some(path) => load_parameters_json(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => StartupParameters::default_inputs(),
    };

    let runner = ScenarioRunner::with_config(ProjectionConfig { horizon_months: cli.horizon });
    let report = runner.run(&params, cli.scenario);
    info!("Projected {} months under {} scenario", cli.horizon, cli.scenario);

    if let Some(question) = &cli.ask {
        let snapshot = DashboardSnapshot::capture(&params, &report);
        let context = ChatContext::for_question(&snapshot, question.as_str())?;
        println!("{}", serde_json::to_string_pretty(&context)?);
        return Ok(());
    }

    if cli.json {
        if cli.compare {
            println!("{}", serde_json::to_string_pretty(&runner.run_all(&params))?);
        } else {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    } else {
        print_report(&report);

        if cli.compare {
            print_comparison(&runner, &params);
        }

        if cli.sensitivity {
            println!("\nSurvival Sensitivity:");
            for impact in analyze_sensitivity(runner.engine(), &params, cli.scenario) {
                println!("  [{:>5.1}] {}", impact.severity, impact.describe());
            }
        }

        if cli.insights {
            println!("\nTwin Insights:");
            for insight in generate_insights(&report.metrics) {
                println!("  - {}", insight);
            }

            println!("\nSurvival Outcomes:");
            for outcome in generate_outcomes(runner.engine(), &params, &report) {
                println!("  [{:>8}] {}", format!("{:?}", outcome.impact), outcome.title);
                println!("             {}", outcome.description);
            }
        }
    }

    if let Some(path) = &cli.csv {
        write_trajectory_csv(path, &report)
            .with_context(|| format!("writing trajectory to {}", path.display()))?;
        println!("\nTrajectory written to: {}", path.display());
    }

    Ok(())
}

fn print_report(report: &TwinReport) {
    let m = &report.metrics;

    println!("Runway Twin v{}", env!("CARGO_PKG_VERSION"));
    println!("===================\n");

    println!("Scenario: {}", report.scenario);
    println!("  Adjusted Revenue:   {:>10}", format_currency(m.adjusted_revenue));
    println!("  Fixed Expenses:     {:>10}", format_currency(m.adjusted_fixed_expenses));
    println!("  Marketing:          {:>10}", format_currency(m.marketing_spend));
    println!("  Loan Interest:      {:>10}", format_currency(m.loan_interest_payment_monthly));
    println!("  Burn Rate:          {:>10}", format_currency(m.burn_rate));
    println!("  Cash Available:     {:>10}", format_currency(m.current_cash_available));
    println!("  Runway:             {:>10}", format_months(m.runway));
    println!("  Status:             {:>10}", report.status);
    println!("  Risk Score:         {:>10}", m.risk_score);
    println!("  Survival:           {:>9}%", m.survival_probability);
    println!();

    println!("Projection ({} months):", report.trajectory.rows.len());
    println!("{:>5} {:>14} {:>14} {:>14}", "Month", "Cash", "Revenue", "Burn");
    println!("{}", "-".repeat(50));
    for row in &report.trajectory.rows {
        println!(
            "{:>5} {:>14.0} {:>14.0} {:>14.2}",
            row.month,
            display_cash(row.cash),
            row.revenue,
            row.burn,
        );
    }

    match report.months_to_break_even {
        Some(month) => println!("\nBreak-even: month {}", month),
        None => println!("\nBreak-even: not within horizon"),
    }
    if let Some(month) = report.trajectory.insolvency_month {
        println!("Collapse: month {}", month);
    }
}

fn print_comparison(runner: &ScenarioRunner, params: &StartupParameters) {
    let comparison = runner.run_all(params);

    println!("\nScenario Comparison:");
    println!("{:>10} {:>12} {:>12} {:>6} {:>9}", "Scenario", "Burn", "Runway", "Risk", "Survival");
    for scenario in ScenarioVariant::ALL {
        let r = comparison.get(scenario);
        println!(
            "{:>10} {:>12} {:>12} {:>6} {:>8}%",
            scenario,
            format_currency(r.metrics.burn_rate),
            format_months(r.metrics.runway),
            r.metrics.risk_score,
            r.metrics.survival_probability,
        );
    }
}

fn write_trajectory_csv(path: &Path, report: &TwinReport) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Month,Cash,Revenue,GrossProfit,Burn")?;
    for row in &report.trajectory.rows {
        writeln!(
            file,
            "{},{:.0},{:.0},{:.2},{:.2}",
            row.month, row.cash, row.revenue, row.gross_profit, row.burn
        )?;
    }
    Ok(())
}
