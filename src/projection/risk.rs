//! Financial health ratios and the composite risk score

use serde::{Deserialize, Serialize};

use super::metrics::Runway;
use super::state::AdjustedBaseline;
use crate::inputs::StartupParameters;

/// Months of fixed expenses a healthy cash buffer should cover
const CASH_BUFFER_MONTHS: f64 = 6.0;

/// Team size above which revenue per head starts to count against the score
const TEAM_RISK_HEADCOUNT: f64 = 20.0;

/// Revenue per head below which a large team is flagged
const TEAM_RISK_REVENUE_PER_EMPLOYEE: f64 = 5_000.0;

/// Normalized health ratios, each nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthRatios {
    /// Share of a six-month expense buffer covered by cash
    pub cash_ratio: f64,
    pub debt_to_cash_ratio: f64,
    pub burn_sensitivity_index: f64,
    pub growth_volatility_index: f64,
    pub market_dependency_index: f64,
}

impl HealthRatios {
    pub fn compute(params: &StartupParameters, base: &AdjustedBaseline, burn_rate: f64) -> Self {
        let cash_ratio = if base.adjusted_fixed_expenses > 0.0 {
            (base.current_cash_available / (base.adjusted_fixed_expenses * CASH_BUFFER_MONTHS)).min(1.0)
        } else {
            1.0
        };

        let debt_to_cash_ratio = if base.current_cash_available > 0.0 {
            (params.loan_taken / base.current_cash_available).min(1.0)
        } else {
            1.0
        };

        let burn_sensitivity_index = if base.adjusted_revenue > 0.0 {
            (burn_rate.abs() / base.adjusted_revenue).min(1.0)
        } else {
            1.0
        };

        Self {
            cash_ratio,
            debt_to_cash_ratio,
            burn_sensitivity_index,
            growth_volatility_index: (params.revenue_shock_percent / 100.0).abs(),
            market_dependency_index: 1.0 - params.market_index,
        }
    }
}

/// Individual contributions to the risk score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub runway_risk: f64,
    pub debt_risk: f64,
    pub burn_risk: f64,
    pub market_risk: f64,
    pub team_risk: f64,
}

impl RiskBreakdown {
    pub fn compute(
        runway: Runway,
        health: &HealthRatios,
        total_team_size: f64,
        revenue_per_employee: f64,
    ) -> Self {
        let runway_risk = if runway.is_below(3.0) {
            40.0
        } else if runway.is_below(6.0) {
            25.0
        } else if runway.is_below(12.0) {
            10.0
        } else {
            0.0
        };

        let team_risk = if total_team_size > TEAM_RISK_HEADCOUNT
            && revenue_per_employee < TEAM_RISK_REVENUE_PER_EMPLOYEE
        {
            10.0
        } else {
            0.0
        };

        Self {
            runway_risk,
            debt_risk: health.debt_to_cash_ratio * 20.0,
            burn_risk: health.burn_sensitivity_index * 20.0,
            market_risk: health.market_dependency_index * 10.0,
            team_risk,
        }
    }

    /// Unrounded sum of all components
    pub fn total(&self) -> f64 {
        self.runway_risk + self.debt_risk + self.burn_risk + self.market_risk + self.team_risk
    }

    /// Composite score in [0, 100], higher is worse
    pub fn score(&self) -> u8 {
        let total = self.total();
        if total.is_nan() {
            return 100;
        }
        total.round().clamp(0.0, 100.0) as u8
    }
}

/// Chance of surviving, the complement of the risk score
pub fn survival_probability(risk_score: u8) -> u8 {
    100u8.saturating_sub(risk_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioVariant;
    use approx::assert_relative_eq;

    fn breakdown_for(runway: Runway) -> RiskBreakdown {
        let health = HealthRatios {
            cash_ratio: 1.0,
            debt_to_cash_ratio: 0.0,
            burn_sensitivity_index: 0.0,
            growth_volatility_index: 0.0,
            market_dependency_index: 0.0,
        };
        RiskBreakdown::compute(runway, &health, 5.0, 10_000.0)
    }

    #[test]
    fn test_runway_breakpoints() {
        assert_eq!(breakdown_for(Runway::Finite { months: 2.9 }).runway_risk, 40.0);
        assert_eq!(breakdown_for(Runway::Finite { months: 3.0 }).runway_risk, 25.0);
        assert_eq!(breakdown_for(Runway::Finite { months: 5.99 }).runway_risk, 25.0);
        assert_eq!(breakdown_for(Runway::Finite { months: 6.0 }).runway_risk, 10.0);
        assert_eq!(breakdown_for(Runway::Finite { months: 11.9 }).runway_risk, 10.0);
        assert_eq!(breakdown_for(Runway::Finite { months: 12.0 }).runway_risk, 0.0);
        assert_eq!(breakdown_for(Runway::Unbounded).runway_risk, 0.0);
        // Negative cash gives negative runway, which is the riskiest band
        assert_eq!(breakdown_for(Runway::Finite { months: -4.0 }).runway_risk, 40.0);
    }

    #[test]
    fn test_team_risk_needs_large_team_and_low_productivity() {
        let health = HealthRatios {
            cash_ratio: 1.0,
            debt_to_cash_ratio: 0.0,
            burn_sensitivity_index: 0.0,
            growth_volatility_index: 0.0,
            market_dependency_index: 0.0,
        };
        let runway = Runway::Unbounded;
        assert_eq!(RiskBreakdown::compute(runway, &health, 25.0, 4_000.0).team_risk, 10.0);
        assert_eq!(RiskBreakdown::compute(runway, &health, 20.0, 4_000.0).team_risk, 0.0);
        assert_eq!(RiskBreakdown::compute(runway, &health, 25.0, 5_000.0).team_risk, 0.0);
    }

    #[test]
    fn test_score_rounds_and_clamps() {
        let b = RiskBreakdown { runway_risk: 10.0, debt_risk: 2.6, burn_risk: 0.0, market_risk: 0.1, team_risk: 0.0 };
        assert_eq!(b.score(), 13);

        let b = RiskBreakdown { runway_risk: 40.0, debt_risk: 20.0, burn_risk: 20.0, market_risk: 15.0, team_risk: 10.0 };
        assert_eq!(b.score(), 100);

        // Market index above 1 drives the market component negative
        let b = RiskBreakdown { runway_risk: 0.0, debt_risk: 0.0, burn_risk: 0.0, market_risk: -5.0, team_risk: 0.0 };
        assert_eq!(b.score(), 0);
    }

    #[test]
    fn test_survival_is_complement() {
        assert_eq!(survival_probability(0), 100);
        assert_eq!(survival_probability(37), 63);
        assert_eq!(survival_probability(100), 0);
    }

    #[test]
    fn test_health_ratios_for_default_inputs() {
        let params = StartupParameters::default_inputs();
        let base = AdjustedBaseline::new(&params, ScenarioVariant::Expected);
        let health = HealthRatios::compute(&params, &base, 32_150.0);

        // 500000 / (45000 * 6) exceeds a full buffer
        assert_eq!(health.cash_ratio, 1.0);
        assert_eq!(health.debt_to_cash_ratio, 0.0);
        assert_eq!(health.burn_sensitivity_index, 1.0);
        assert_eq!(health.growth_volatility_index, 0.0);
        assert_relative_eq!(health.market_dependency_index, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_health_ratio_guards() {
        let params = StartupParameters {
            baseline_cash: 0.0,
            baseline_revenue: 0.0,
            baseline_fixed_expenses: 0.0,
            ..StartupParameters::default_inputs()
        };
        let base = AdjustedBaseline::new(&params, ScenarioVariant::Expected);
        let health = HealthRatios::compute(&params, &base, 5_000.0);

        assert_eq!(health.cash_ratio, 1.0);
        assert_eq!(health.debt_to_cash_ratio, 1.0);
        assert_eq!(health.burn_sensitivity_index, 1.0);
    }
}
