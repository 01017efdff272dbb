//! Core twin engine: instantaneous metrics and monthly cash projections

use log::debug;

use super::metrics::{Runway, TwinMetrics};
use super::risk::{survival_probability, HealthRatios, RiskBreakdown};
use super::state::{AdjustedBaseline, ProjectionState};
use super::trajectory::{Trajectory, TrajectoryRow};
use crate::inputs::StartupParameters;
use crate::report::TwinReport;
use crate::scenario::ScenarioVariant;

/// Default projection horizon in months
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub horizon_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

/// Main twin engine
///
/// Every method is a pure function of its arguments; the engine holds only
/// configuration and can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct TwinEngine {
    config: ProjectionConfig,
}

impl TwinEngine {
    /// Create a new engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Derive month-0 metrics for the given inputs and scenario
    pub fn compute_metrics(&self, params: &StartupParameters, scenario: ScenarioVariant) -> TwinMetrics {
        let base = AdjustedBaseline::new(params, scenario);

        let gross_profit = base.gross_profit(base.adjusted_revenue);
        let burn_rate = base.monthly_burn(base.adjusted_revenue);
        let runway = Runway::from_cash_and_burn(base.current_cash_available, burn_rate);
        let revenue_per_employee = base.revenue_per_employee();

        let health = HealthRatios::compute(params, &base, burn_rate);
        let risk = RiskBreakdown::compute(runway, &health, base.total_team_size, revenue_per_employee);
        let risk_score = risk.score();

        TwinMetrics {
            total_team_size: base.total_team_size,
            total_new_salary_expense: base.total_new_salary_expense,
            revenue_per_employee,
            adjusted_revenue: base.adjusted_revenue,
            marketing_spend: base.marketing_spend,
            loan_interest_payment_monthly: base.loan_interest_payment_monthly,
            adjusted_fixed_expenses: base.adjusted_fixed_expenses,
            gross_profit,
            burn_rate,
            current_cash_available: base.current_cash_available,
            runway,
            is_break_even_achieved: burn_rate <= 0.0,
            health,
            risk,
            risk_score,
            survival_probability: survival_probability(risk_score),
        }
    }

    /// Unroll cash and revenue month by month over `horizon_months`
    ///
    /// Costs stay at their month-0 values; only revenue compounds. The loop
    /// always runs the full horizon, and cash is left negative once spent.
    pub fn project_trajectory(
        &self,
        params: &StartupParameters,
        scenario: ScenarioVariant,
        horizon_months: u32,
    ) -> Trajectory {
        let base = AdjustedBaseline::new(params, scenario);
        let mut state = ProjectionState::from_baseline(&base);
        let mut trajectory = Trajectory::new(horizon_months, state.cash, state.revenue);
        let growth_factor = base.monthly_growth_factor();

        for _month in 1..=horizon_months {
            state.advance_month();

            let row = self.calculate_month(&base, &mut state);

            if row.burn <= 0.0 && trajectory.break_even_month.is_none() {
                trajectory.break_even_month = Some(row.month);
            }
            if state.cash <= 0.0 && trajectory.insolvency_month.is_none() {
                trajectory.insolvency_month = Some(row.month);
            }
            trajectory.add_row(row);

            state.grow_revenue(growth_factor);
        }

        trajectory
    }

    /// Metrics plus a trajectory over the configured horizon
    pub fn run(&self, params: &StartupParameters, scenario: ScenarioVariant) -> TwinReport {
        let metrics = self.compute_metrics(params, scenario);
        let trajectory = self.project_trajectory(params, scenario, self.config.horizon_months);

        debug!(
            "{} scenario: burn={:.2} runway={} risk={} break_even={:?} insolvency={:?}",
            scenario,
            metrics.burn_rate,
            metrics.runway,
            metrics.risk_score,
            trajectory.break_even_month,
            trajectory.insolvency_month,
        );

        TwinReport::new(scenario, metrics, trajectory)
    }

    /// Calculate cash flow for a single month
    fn calculate_month(&self, base: &AdjustedBaseline, state: &mut ProjectionState) -> TrajectoryRow {
        let gross_profit = base.gross_profit(state.revenue);
        let burn = base.monthly_burn(state.revenue);

        state.apply_burn(burn);

        TrajectoryRow {
            month: state.month,
            cash: state.cash.round(),
            revenue: state.revenue.round(),
            gross_profit,
            burn,
        }
    }
}
