//! Startup parameter record matching the dashboard slider state

use serde::{Deserialize, Serialize};

/// Aggregate monthly financials and decision levers for one startup
///
/// All fields are plain numbers. The engine consumes the record as-is and
/// never validates it; out-of-range values simply flow through the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupParameters {
    // Baseline financials
    /// Cash in the bank today
    pub baseline_cash: f64,

    /// Monthly revenue before any lever or scenario adjustment
    pub baseline_revenue: f64,

    /// Monthly fixed expenses before new hires and cost cuts
    pub baseline_fixed_expenses: f64,

    /// Revenue growth rate as a decimal (0.12 = 12%), spread over 12 months
    pub baseline_growth_rate: f64,

    /// Gross margin as a decimal in [0, 1]
    pub gross_margin: f64,

    // Team
    /// Current headcount
    pub total_team_size: f64,

    /// Fully-loaded monthly cost of each new hire
    pub avg_cost_per_hire: f64,

    // Decision levers
    /// Number of new hires simulated
    pub employees_hired: f64,

    /// Marketing spend per month
    pub marketing_spend: f64,

    /// Price change in percent (+5 = 5% increase)
    pub pricing_change_percent: f64,

    /// Cost cut in percent of fixed expenses (0-100)
    pub cost_cut_percent: f64,

    /// Revenue shock in percent (-20 = 20% drop)
    pub revenue_shock_percent: f64,

    /// Market conditions in [0, 1], 1.0 = booming
    pub market_index: f64,

    // Fundraising
    /// Equity raised, added to cash once
    pub equity_raised: f64,

    /// Loan principal taken, added to cash once
    pub loan_taken: f64,

    /// Annual loan interest rate as a decimal
    pub interest_rate: f64,
}

impl StartupParameters {
    /// Starting state of the dashboard
    pub fn default_inputs() -> Self {
        Self {
            baseline_cash: 500_000.0,
            baseline_revenue: 30_000.0,
            baseline_fixed_expenses: 45_000.0,
            baseline_growth_rate: 0.12,
            gross_margin: 0.70,
            total_team_size: 8.0,
            avg_cost_per_hire: 6_000.0,
            employees_hired: 0.0,
            marketing_spend: 5_000.0,
            pricing_change_percent: 0.0,
            cost_cut_percent: 0.0,
            revenue_shock_percent: 0.0,
            market_index: 0.7,
            equity_raised: 0.0,
            loan_taken: 0.0,
            interest_rate: 0.08,
        }
    }

    /// Apply the slider bounds a UI would enforce before calling the engine
    ///
    /// Fractions are clamped to [0, 1], percentages of cost cut to [0, 100],
    /// and counts and amounts floored at zero. Signed levers (pricing change,
    /// revenue shock) are left alone. The engine never calls this.
    pub fn clamped(&self) -> Self {
        Self {
            baseline_cash: self.baseline_cash.max(0.0),
            baseline_revenue: self.baseline_revenue.max(0.0),
            baseline_fixed_expenses: self.baseline_fixed_expenses.max(0.0),
            baseline_growth_rate: self.baseline_growth_rate,
            gross_margin: self.gross_margin.clamp(0.0, 1.0),
            total_team_size: self.total_team_size.max(0.0),
            avg_cost_per_hire: self.avg_cost_per_hire.max(0.0),
            employees_hired: self.employees_hired.max(0.0),
            marketing_spend: self.marketing_spend.max(0.0),
            pricing_change_percent: self.pricing_change_percent,
            cost_cut_percent: self.cost_cut_percent.clamp(0.0, 100.0),
            revenue_shock_percent: self.revenue_shock_percent,
            market_index: self.market_index.clamp(0.0, 1.0),
            equity_raised: self.equity_raised.max(0.0),
            loan_taken: self.loan_taken.max(0.0),
            interest_rate: self.interest_rate.max(0.0),
        }
    }
}

impl Default for StartupParameters {
    fn default() -> Self {
        Self::default_inputs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let params: StartupParameters =
            serde_json::from_str(r#"{"baseline_cash": 1000000, "employees_hired": 3}"#).unwrap();

        assert_eq!(params.baseline_cash, 1_000_000.0);
        assert_eq!(params.employees_hired, 3.0);
        assert_eq!(params.baseline_revenue, 30_000.0);
        assert_eq!(params.market_index, 0.7);
    }

    #[test]
    fn test_clamped_applies_slider_bounds() {
        let params = StartupParameters {
            gross_margin: 1.4,
            market_index: -0.2,
            cost_cut_percent: 150.0,
            baseline_cash: -10.0,
            revenue_shock_percent: -40.0,
            ..StartupParameters::default_inputs()
        };

        let clamped = params.clamped();
        assert_eq!(clamped.gross_margin, 1.0);
        assert_eq!(clamped.market_index, 0.0);
        assert_eq!(clamped.cost_cut_percent, 100.0);
        assert_eq!(clamped.baseline_cash, 0.0);
        // Signed levers are untouched
        assert_eq!(clamped.revenue_shock_percent, -40.0);
    }
}
