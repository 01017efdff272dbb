//! Lever sensitivity: how far each decision moves the runway
//!
//! Each lever is applied on top of the current inputs and the perturbed
//! startup is run through the same engine, so the comparison reflects every
//! scenario and lever adjustment already in place.

use serde::Serialize;

use crate::inputs::StartupParameters;
use crate::projection::{Runway, TwinEngine};
use crate::scenario::ScenarioVariant;

/// Extra marketing spend tested per month
const MARKETING_STEP: f64 = 2_000.0;

/// Revenue uplift tested, as a multiplier on baseline revenue
const REVENUE_UPLIFT: f64 = 1.10;

/// Decision levers tested by the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    /// One more hire at the average cost
    Hire,
    /// Marketing spend up by `MARKETING_STEP`
    Marketing,
    /// Baseline revenue up 10%
    RevenueGrowth,
}

impl Lever {
    pub const ALL: [Lever; 3] = [Lever::Hire, Lever::Marketing, Lever::RevenueGrowth];

    pub fn label(&self) -> &'static str {
        match self {
            Lever::Hire => "Hiring",
            Lever::Marketing => "Marketing Spend",
            Lever::RevenueGrowth => "Revenue Growth",
        }
    }

    /// Inputs with this lever pulled once
    pub fn apply(&self, params: &StartupParameters) -> StartupParameters {
        let mut adjusted = *params;
        match self {
            Lever::Hire => adjusted.employees_hired += 1.0,
            Lever::Marketing => adjusted.marketing_spend += MARKETING_STEP,
            Lever::RevenueGrowth => adjusted.baseline_revenue *= REVENUE_UPLIFT,
        }
        adjusted
    }
}

/// Runway impact of a single lever
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeverImpact {
    pub lever: Lever,
    pub base_runway: Runway,
    pub adjusted_runway: Runway,

    /// Adjusted minus base runway; `None` unless both are finite
    pub months_delta: Option<f64>,

    /// Size of the change relative to the base runway, in [0, 100]
    pub severity: f64,
}

impl LeverImpact {
    fn between(lever: Lever, base_runway: Runway, adjusted_runway: Runway) -> Self {
        let (months_delta, severity) = match (base_runway, adjusted_runway) {
            (Runway::Finite { months: base }, Runway::Finite { months: adjusted }) => {
                let delta = adjusted - base;
                let severity = if base > 0.0 {
                    (delta.abs() / base * 100.0).min(100.0)
                } else {
                    0.0
                };
                (Some(delta), severity)
            }
            (Runway::Unbounded, Runway::Unbounded) => (None, 0.0),
            // Crossing between burning and not burning is the largest possible swing
            _ => (None, 100.0),
        };

        Self {
            lever,
            base_runway,
            adjusted_runway,
            months_delta,
            severity,
        }
    }

    /// One-line description for the dashboard
    pub fn describe(&self) -> String {
        match (self.months_delta, self.adjusted_runway) {
            (Some(delta), _) if delta < 0.0 => {
                format!("{} reduces runway by {:.1} months", self.lever.label(), -delta)
            }
            (Some(delta), _) => {
                format!("{} extends runway by {:.1} months", self.lever.label(), delta)
            }
            (None, Runway::Unbounded) => format!("{} keeps the company cash-positive", self.lever.label()),
            (None, Runway::Finite { months }) => {
                format!("{} starts a cash burn with {:.1} months of runway", self.lever.label(), months)
            }
        }
    }
}

/// Pull every lever once and sort by severity, most severe first
pub fn analyze_sensitivity(
    engine: &TwinEngine,
    params: &StartupParameters,
    scenario: ScenarioVariant,
) -> Vec<LeverImpact> {
    let base_runway = engine.compute_metrics(params, scenario).runway;

    let mut impacts: Vec<LeverImpact> = Lever::ALL
        .iter()
        .map(|lever| {
            let adjusted = lever.apply(params);
            let adjusted_runway = engine.compute_metrics(&adjusted, scenario).runway;
            LeverImpact::between(*lever, base_runway, adjusted_runway)
        })
        .collect();

    impacts.sort_by(|a, b| b.severity.total_cmp(&a.severity));
    impacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impacts_for(params: &StartupParameters) -> Vec<LeverImpact> {
        analyze_sensitivity(&TwinEngine::default(), params, ScenarioVariant::Expected)
    }

    #[test]
    fn test_sorted_by_severity() {
        let impacts = impacts_for(&StartupParameters::default_inputs());
        assert_eq!(impacts.len(), 3);
        assert!(impacts.windows(2).all(|w| w[0].severity >= w[1].severity));
        assert!(impacts.iter().all(|i| (0.0..=100.0).contains(&i.severity)));
    }

    #[test]
    fn test_lever_directions() {
        let impacts = impacts_for(&StartupParameters::default_inputs());
        let find = |lever: Lever| impacts.iter().find(|i| i.lever == lever).unwrap();

        assert!(find(Lever::Hire).months_delta.unwrap() < 0.0);
        assert!(find(Lever::Marketing).months_delta.unwrap() < 0.0);
        assert!(find(Lever::RevenueGrowth).months_delta.unwrap() > 0.0);
        assert!(find(Lever::Hire).describe().starts_with("Hiring reduces runway by"));
    }

    #[test]
    fn test_flip_to_profitable_is_maximal() {
        // Burn of 2400 a month; a 10% revenue lift makes it cash-positive
        let params = StartupParameters {
            baseline_revenue: 80_000.0,
            ..StartupParameters::default_inputs()
        };
        let impacts = impacts_for(&params);
        let growth = impacts.iter().find(|i| i.lever == Lever::RevenueGrowth).unwrap();

        assert_eq!(growth.adjusted_runway, Runway::Unbounded);
        assert_eq!(growth.months_delta, None);
        assert_eq!(growth.severity, 100.0);
        assert_eq!(impacts[0].severity, 100.0);
    }

    #[test]
    fn test_profitable_company_is_insensitive_to_growth() {
        let params = StartupParameters {
            baseline_revenue: 200_000.0,
            ..StartupParameters::default_inputs()
        };
        let impacts = impacts_for(&params);
        let growth = impacts.iter().find(|i| i.lever == Lever::RevenueGrowth).unwrap();
        assert_eq!(growth.severity, 0.0);
        assert_eq!(growth.describe(), "Revenue Growth keeps the company cash-positive");
    }
}
