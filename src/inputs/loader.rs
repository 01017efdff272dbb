//! Load startup parameter sets from JSON or CSV files
//!
//! A single startup is usually described by a JSON object (the shape the
//! dashboard posts); batches of startups come from a CSV with one row each.

use super::StartupParameters;
use crate::error::LoadError;
use csv::Reader;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the bundled batch file
pub const DEFAULT_STARTUPS_PATH: &str = "data/startups.csv";

/// A parameter set tagged with the identifier from its source row
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NamedParameters {
    pub id: String,
    pub params: StartupParameters,
}

/// Raw CSV row matching startups.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "StartupID")]
    id: String,
    #[serde(rename = "Cash")]
    baseline_cash: f64,
    #[serde(rename = "Revenue")]
    baseline_revenue: f64,
    #[serde(rename = "FixedExpenses")]
    baseline_fixed_expenses: f64,
    #[serde(rename = "GrowthRate")]
    baseline_growth_rate: f64,
    #[serde(rename = "GrossMargin")]
    gross_margin: f64,
    #[serde(rename = "TeamSize")]
    total_team_size: f64,
    #[serde(rename = "CostPerHire")]
    avg_cost_per_hire: f64,
    #[serde(rename = "Hires")]
    employees_hired: f64,
    #[serde(rename = "Marketing")]
    marketing_spend: f64,
    #[serde(rename = "PricingChangePct")]
    pricing_change_percent: f64,
    #[serde(rename = "CostCutPct")]
    cost_cut_percent: f64,
    #[serde(rename = "RevenueShockPct")]
    revenue_shock_percent: f64,
    #[serde(rename = "MarketIndex")]
    market_index: f64,
    #[serde(rename = "Equity")]
    equity_raised: f64,
    #[serde(rename = "Loan")]
    loan_taken: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
}

impl CsvRow {
    fn into_named(self) -> NamedParameters {
        NamedParameters {
            id: self.id,
            params: StartupParameters {
                baseline_cash: self.baseline_cash,
                baseline_revenue: self.baseline_revenue,
                baseline_fixed_expenses: self.baseline_fixed_expenses,
                baseline_growth_rate: self.baseline_growth_rate,
                gross_margin: self.gross_margin,
                total_team_size: self.total_team_size,
                avg_cost_per_hire: self.avg_cost_per_hire,
                employees_hired: self.employees_hired,
                marketing_spend: self.marketing_spend,
                pricing_change_percent: self.pricing_change_percent,
                cost_cut_percent: self.cost_cut_percent,
                revenue_shock_percent: self.revenue_shock_percent,
                market_index: self.market_index,
                equity_raised: self.equity_raised,
                loan_taken: self.loan_taken,
                interest_rate: self.interest_rate,
            },
        }
    }
}

/// Parse a single parameter set from JSON text; missing fields take the dashboard defaults
pub fn parse_parameters_json(text: &str) -> Result<StartupParameters, LoadError> {
    Ok(serde_json::from_str(text)?)
}

/// Load a single parameter set from a JSON file
pub fn load_parameters_json(path: &Path) -> Result<StartupParameters, LoadError> {
    let mut text = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut text))
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;

    debug!("Parsing startup parameters from {}", path.display());
    parse_parameters_json(&text)
}

/// Load parameter sets from any CSV reader
pub fn load_parameter_sets_from_reader<R: Read>(
    reader: R,
    source: &Path,
) -> Result<Vec<NamedParameters>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut sets = Vec::new();

    for result in csv_reader.deserialize::<CsvRow>() {
        let row = result.map_err(|source_err| LoadError::Csv {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        sets.push(row.into_named());
    }

    Ok(sets)
}

/// Load parameter sets from a CSV file
pub fn load_parameter_sets(path: &Path) -> Result<Vec<NamedParameters>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let sets = load_parameter_sets_from_reader(file, path)?;
    info!("Loaded {} startup parameter sets from {}", sets.len(), path.display());
    Ok(sets)
}

/// Load the bundled batch file from `data/startups.csv`
pub fn load_default_startups() -> Result<Vec<NamedParameters>, LoadError> {
    load_parameter_sets(Path::new(DEFAULT_STARTUPS_PATH))
}
