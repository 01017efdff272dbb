//! Shared month-0 adjustments and the running state of a projection

use crate::inputs::StartupParameters;
use crate::scenario::ScenarioVariant;

/// Lever- and scenario-adjusted values at month 0
///
/// Both the metric calculator and the trajectory projector start from this
/// one struct, so their month-0 numbers cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedBaseline {
    /// Headcount after simulated hires
    pub total_team_size: f64,

    /// Monthly salary cost of the simulated hires
    pub total_new_salary_expense: f64,

    /// Revenue after pricing, market, shock and scenario factors
    pub adjusted_revenue: f64,

    /// Fixed expenses plus new salaries, after cost cuts and scenario factor
    pub adjusted_fixed_expenses: f64,

    /// Marketing spend per month (not scenario-adjusted)
    pub marketing_spend: f64,

    /// Monthly interest on the loan principal
    pub loan_interest_payment_monthly: f64,

    /// Gross margin applied to every month's revenue
    pub gross_margin: f64,

    /// Cash plus equity and loan lump sums
    pub current_cash_available: f64,

    /// Scenario-adjusted growth rate, applied as rate / 12 per month
    pub growth_rate: f64,
}

impl AdjustedBaseline {
    pub fn new(params: &StartupParameters, scenario: ScenarioVariant) -> Self {
        let mult = scenario.multiplier();

        // Team
        let total_team_size = params.total_team_size + params.employees_hired;
        let total_new_salary_expense = params.employees_hired * params.avg_cost_per_hire;

        // Revenue: market conditions can halve revenue at worst, never zero it
        let pricing_factor = 1.0 + params.pricing_change_percent / 100.0;
        let market_factor = 0.5 + params.market_index * 0.5;
        let shock_factor = 1.0 + params.revenue_shock_percent / 100.0;
        let adjusted_revenue =
            params.baseline_revenue * pricing_factor * market_factor * shock_factor * mult.revenue;

        // Expenses
        let cost_cut_factor = 1.0 - params.cost_cut_percent / 100.0;
        let adjusted_fixed_expenses =
            (params.baseline_fixed_expenses + total_new_salary_expense) * cost_cut_factor * mult.expenses;

        // Financing
        let loan_interest_payment_monthly = params.loan_taken * params.interest_rate / 12.0;
        let current_cash_available = params.baseline_cash + params.equity_raised + params.loan_taken;

        Self {
            total_team_size,
            total_new_salary_expense,
            adjusted_revenue,
            adjusted_fixed_expenses,
            marketing_spend: params.marketing_spend,
            loan_interest_payment_monthly,
            gross_margin: params.gross_margin,
            current_cash_available,
            growth_rate: params.baseline_growth_rate * mult.growth,
        }
    }

    /// Gross profit earned on the given monthly revenue
    pub fn gross_profit(&self, revenue: f64) -> f64 {
        revenue * self.gross_margin
    }

    /// Net cash consumed in a month earning `revenue`; costs stay at month-0 levels
    pub fn monthly_burn(&self, revenue: f64) -> f64 {
        self.adjusted_fixed_expenses + self.marketing_spend + self.loan_interest_payment_monthly
            - self.gross_profit(revenue)
    }

    /// Revenue per head, 0 for an empty team
    pub fn revenue_per_employee(&self) -> f64 {
        if self.total_team_size > 0.0 {
            self.adjusted_revenue / self.total_team_size
        } else {
            0.0
        }
    }

    /// Multiplicative revenue growth applied between consecutive months.
    /// Floored at zero so steep decline decays revenue instead of flipping its sign.
    pub fn monthly_growth_factor(&self) -> f64 {
        (1.0 + self.growth_rate / 12.0).max(0.0)
    }
}

/// State of the startup at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (0 = today, 1-indexed afterwards)
    pub month: u32,

    /// Cash after this month's burn
    pub cash: f64,

    /// Revenue earned this month (before growth into the next)
    pub revenue: f64,
}

impl ProjectionState {
    /// Initialize state at month 0
    pub fn from_baseline(baseline: &AdjustedBaseline) -> Self {
        Self {
            month: 0,
            cash: baseline.current_cash_available,
            revenue: baseline.adjusted_revenue,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Spend one month's burn; negative burn adds cash
    pub fn apply_burn(&mut self, burn: f64) {
        self.cash -= burn;
    }

    /// Compound revenue into the next month
    pub fn grow_revenue(&mut self, factor: f64) {
        self.revenue *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_baseline_values() {
        let base = AdjustedBaseline::new(&StartupParameters::default_inputs(), ScenarioVariant::Expected);

        assert_relative_eq!(base.adjusted_revenue, 25_500.0, epsilon = 1e-9);
        assert_relative_eq!(base.adjusted_fixed_expenses, 45_000.0, epsilon = 1e-9);
        assert_relative_eq!(base.gross_profit(base.adjusted_revenue), 17_850.0, epsilon = 1e-9);
        assert_relative_eq!(base.monthly_burn(base.adjusted_revenue), 32_150.0, epsilon = 1e-9);
        assert_relative_eq!(base.current_cash_available, 500_000.0);
        assert_relative_eq!(base.monthly_growth_factor(), 1.01, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_factor_floors_at_zero() {
        let params = StartupParameters {
            baseline_growth_rate: -30.0,
            ..StartupParameters::default_inputs()
        };
        let base = AdjustedBaseline::new(&params, ScenarioVariant::Expected);
        assert_eq!(base.monthly_growth_factor(), 0.0);

        let params = StartupParameters {
            baseline_growth_rate: -6.0,
            ..StartupParameters::default_inputs()
        };
        let base = AdjustedBaseline::new(&params, ScenarioVariant::Expected);
        assert_relative_eq!(base.monthly_growth_factor(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hires_add_salary_and_headcount() {
        let params = StartupParameters {
            employees_hired: 3.0,
            ..StartupParameters::default_inputs()
        };
        let base = AdjustedBaseline::new(&params, ScenarioVariant::Expected);

        assert_eq!(base.total_team_size, 11.0);
        assert_eq!(base.total_new_salary_expense, 18_000.0);
        assert_relative_eq!(base.adjusted_fixed_expenses, 63_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_team_has_zero_revenue_per_employee() {
        let params = StartupParameters {
            total_team_size: 0.0,
            employees_hired: 0.0,
            ..StartupParameters::default_inputs()
        };
        let base = AdjustedBaseline::new(&params, ScenarioVariant::Expected);
        assert_eq!(base.revenue_per_employee(), 0.0);
    }

    #[test]
    fn test_state_advances_and_spends() {
        let base = AdjustedBaseline::new(&StartupParameters::default_inputs(), ScenarioVariant::Expected);
        let mut state = ProjectionState::from_baseline(&base);

        state.advance_month();
        state.apply_burn(base.monthly_burn(state.revenue));
        state.grow_revenue(base.monthly_growth_factor());

        assert_eq!(state.month, 1);
        assert_relative_eq!(state.cash, 467_850.0, epsilon = 1e-6);
        assert_relative_eq!(state.revenue, 25_755.0, epsilon = 1e-6);
    }
}
