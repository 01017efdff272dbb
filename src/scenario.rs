//! Scenario variants and a runner for side-by-side and batch projections
//!
//! The three variants are a closed table of multipliers; the runner wraps a
//! `TwinEngine` so callers can project one startup under every scenario, or
//! many startups under one scenario, without rebuilding configuration.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::inputs::{NamedParameters, StartupParameters};
use crate::projection::{ProjectionConfig, TwinEngine};
use crate::report::TwinReport;

/// Multipliers applied to baseline revenue, fixed expenses and growth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMultiplier {
    pub revenue: f64,
    pub expenses: f64,
    pub growth: f64,
}

/// Named scenario selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioVariant {
    #[default]
    Expected,
    Best,
    Worst,
}

impl ScenarioVariant {
    pub const ALL: [ScenarioVariant; 3] = [
        ScenarioVariant::Expected,
        ScenarioVariant::Best,
        ScenarioVariant::Worst,
    ];

    /// Fixed multiplier table
    pub fn multiplier(&self) -> ScenarioMultiplier {
        match self {
            ScenarioVariant::Expected => ScenarioMultiplier { revenue: 1.0, expenses: 1.0, growth: 1.0 },
            ScenarioVariant::Best => ScenarioMultiplier { revenue: 1.25, expenses: 0.85, growth: 1.4 },
            ScenarioVariant::Worst => ScenarioMultiplier { revenue: 0.65, expenses: 1.2, growth: 0.5 },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioVariant::Expected => "expected",
            ScenarioVariant::Best => "best",
            ScenarioVariant::Worst => "worst",
        }
    }
}

impl fmt::Display for ScenarioVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ScenarioVariant {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expected" => Ok(ScenarioVariant::Expected),
            "best" => Ok(ScenarioVariant::Best),
            "worst" => Ok(ScenarioVariant::Worst),
            _ => Err(LoadError::UnknownScenario(s.to_string())),
        }
    }
}

/// Reports for one startup under every scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioComparison {
    pub expected: TwinReport,
    pub best: TwinReport,
    pub worst: TwinReport,
}

impl ScenarioComparison {
    pub fn get(&self, scenario: ScenarioVariant) -> &TwinReport {
        match scenario {
            ScenarioVariant::Expected => &self.expected,
            ScenarioVariant::Best => &self.best,
            ScenarioVariant::Worst => &self.worst,
        }
    }
}

/// One row of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub id: String,
    pub report: TwinReport,
}

/// Runner for repeated projections with a shared configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let comparison = runner.run_all(&StartupParameters::default_inputs());
/// println!("worst-case runway: {}", comparison.worst.metrics.runway);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: TwinEngine,
}

impl ScenarioRunner {
    /// Create runner with the default 12-month horizon
    pub fn new() -> Self {
        Self::with_config(ProjectionConfig::default())
    }

    /// Create runner with a custom projection configuration
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: TwinEngine::new(config),
        }
    }

    /// Run a single startup under one scenario
    pub fn run(&self, params: &StartupParameters, scenario: ScenarioVariant) -> TwinReport {
        self.engine.run(params, scenario)
    }

    /// Run a single startup under every scenario
    pub fn run_all(&self, params: &StartupParameters) -> ScenarioComparison {
        ScenarioComparison {
            expected: self.run(params, ScenarioVariant::Expected),
            best: self.run(params, ScenarioVariant::Best),
            worst: self.run(params, ScenarioVariant::Worst),
        }
    }

    /// Run many startups under one scenario in parallel, preserving input order
    pub fn run_batch(&self, sets: &[NamedParameters], scenario: ScenarioVariant) -> Vec<BatchResult> {
        debug!("Running batch of {} startups under {} scenario", sets.len(), scenario);
        sets.par_iter()
            .map(|set| BatchResult {
                id: set.id.clone(),
                report: self.run(&set.params, scenario),
            })
            .collect()
    }

    /// Get reference to the underlying engine
    pub fn engine(&self) -> &TwinEngine {
        &self.engine
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario_names() {
        assert_eq!("expected".parse::<ScenarioVariant>().unwrap(), ScenarioVariant::Expected);
        assert_eq!(" Best ".parse::<ScenarioVariant>().unwrap(), ScenarioVariant::Best);
        assert_eq!("WORST".parse::<ScenarioVariant>().unwrap(), ScenarioVariant::Worst);
        assert!(matches!(
            "optimistic".parse::<ScenarioVariant>(),
            Err(LoadError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ScenarioVariant::Worst).unwrap();
        assert_eq!(json, "\"worst\"");
        let back: ScenarioVariant = serde_json::from_str("\"best\"").unwrap();
        assert_eq!(back, ScenarioVariant::Best);
    }

    #[test]
    fn test_expected_is_identity() {
        let m = ScenarioVariant::Expected.multiplier();
        assert_eq!((m.revenue, m.expenses, m.growth), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_run_all_orders_burn_by_scenario() {
        let runner = ScenarioRunner::new();
        let comparison = runner.run_all(&StartupParameters::default_inputs());

        let worst = comparison.worst.metrics.burn_rate;
        let expected = comparison.expected.metrics.burn_rate;
        let best = comparison.best.metrics.burn_rate;
        assert!(worst >= expected, "worst {} < expected {}", worst, expected);
        assert!(expected >= best, "expected {} < best {}", expected, best);

        assert_eq!(comparison.get(ScenarioVariant::Best).scenario, ScenarioVariant::Best);
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let base = StartupParameters::default_inputs();
        let sets: Vec<NamedParameters> = (0..20)
            .map(|i| NamedParameters {
                id: format!("s{}", i),
                params: StartupParameters { marketing_spend: 1_000.0 * i as f64, ..base },
            })
            .collect();

        let results = runner.run_batch(&sets, ScenarioVariant::Expected);
        assert_eq!(results.len(), 20);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.id, format!("s{}", i));
        }

        // More marketing never lowers burn
        for pair in results.windows(2) {
            assert!(pair[1].report.metrics.burn_rate >= pair[0].report.metrics.burn_rate);
        }
    }
}
