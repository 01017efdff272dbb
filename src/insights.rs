//! Rule-based narration over computed twin outputs
//!
//! Insights read only the metrics. Outcomes also look at the inputs and the
//! trajectory, and re-run the engine without the planned hires to price them.

use std::fmt;

use serde::Serialize;

use crate::inputs::StartupParameters;
use crate::projection::{Runway, TwinEngine, TwinMetrics};
use crate::report::{format_currency, TwinReport};

/// Most insights shown at once
pub const MAX_INSIGHTS: usize = 4;

/// Most outcomes shown at once
pub const MAX_OUTCOMES: usize = 6;

const BURN_SENSITIVITY_LIMIT: f64 = 0.5;
const SHORT_RUNWAY_MONTHS: f64 = 6.0;
const INSIGHT_DEBT_LIMIT: f64 = 0.4;
const MARKET_DEPENDENCY_LIMIT: f64 = 0.5;
const LOW_REVENUE_PER_EMPLOYEE: f64 = 3_000.0;
const EFFICIENCY_MIN_TEAM: f64 = 5.0;
const STRONG_SURVIVAL: u8 = 80;

/// Marketing spend the default dashboard starts from
const BASELINE_MARKETING: f64 = 5_000.0;
/// Burn increase (percent) above which extra marketing counts as negative
const MARKETING_BURN_ALARM: f64 = 30.0;
/// Revenue shock (percent) below which the shock is called out
const SHOCK_CALLOUT_PERCENT: f64 = -10.0;
const OUTCOME_DEBT_LIMIT: f64 = 0.5;

/// One observation about the current metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    HighBurnSensitivity,
    ShortRunway,
    HeavyDebt,
    MarketDependent,
    LowTeamEfficiency,
    PastBreakEven,
    StrongSurvival,
    Nominal,
}

impl Insight {
    pub fn message(&self) -> &'static str {
        match self {
            Insight::HighBurnSensitivity => {
                "Burn sensitivity is high: small revenue changes move the runway a lot."
            }
            Insight::ShortRunway => {
                "Runway is under 6 months. Raise money or cut costs aggressively."
            }
            Insight::HeavyDebt => {
                "Debt takes a large share of the cash position. Prioritize paying it down."
            }
            Insight::MarketDependent => {
                "Revenue depends heavily on market conditions. Diversify revenue streams."
            }
            Insight::LowTeamEfficiency => {
                "Revenue per employee is low. Improve team efficiency before scaling."
            }
            Insight::PastBreakEven => {
                "Past break-even. Focus on sustainable growth and margin expansion."
            }
            Insight::StrongSurvival => "Survival probability is strong. Fundamentals are healthy.",
            Insight::Nominal => "All indicators nominal. Keep monitoring as decisions are applied.",
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Threshold rules over the metrics, in priority order, capped at `MAX_INSIGHTS`
pub fn generate_insights(metrics: &TwinMetrics) -> Vec<Insight> {
    let health = &metrics.health;
    let short_runway = matches!(
        metrics.runway,
        Runway::Finite { months } if months > 0.0 && months < SHORT_RUNWAY_MONTHS
    );

    let rules = [
        (health.burn_sensitivity_index > BURN_SENSITIVITY_LIMIT, Insight::HighBurnSensitivity),
        (short_runway, Insight::ShortRunway),
        (health.debt_to_cash_ratio > INSIGHT_DEBT_LIMIT, Insight::HeavyDebt),
        (health.market_dependency_index > MARKET_DEPENDENCY_LIMIT, Insight::MarketDependent),
        (
            metrics.revenue_per_employee < LOW_REVENUE_PER_EMPLOYEE
                && metrics.total_team_size > EFFICIENCY_MIN_TEAM,
            Insight::LowTeamEfficiency,
        ),
        (metrics.is_break_even_achieved, Insight::PastBreakEven),
        (metrics.survival_probability >= STRONG_SURVIVAL, Insight::StrongSurvival),
    ];

    let mut insights: Vec<Insight> = rules
        .into_iter()
        .filter_map(|(fired, insight)| fired.then_some(insight))
        .take(MAX_INSIGHTS)
        .collect();

    if insights.is_empty() {
        insights.push(Insight::Nominal);
    }
    insights
}

/// Whether an outcome helps or hurts survival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// A decision consequence with a headline and supporting numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

impl Outcome {
    fn new(title: String, description: String, impact: Impact) -> Self {
        Self { title, description, impact }
    }
}

/// Consequences of the current decisions, capped at `MAX_OUTCOMES`
///
/// `report` must come from `engine` run on `params`.
pub fn generate_outcomes(
    engine: &TwinEngine,
    params: &StartupParameters,
    report: &TwinReport,
) -> Vec<Outcome> {
    let m = &report.metrics;
    let mut outcomes = Vec::new();

    if params.employees_hired > 0.0 {
        let without_hires = StartupParameters { employees_hired: 0.0, ..*params };
        let baseline_runway = engine.compute_metrics(&without_hires, report.scenario).runway;
        let lost = baseline_runway.months_capped() - m.runway.months_capped();

        outcomes.push(if lost > 0.0 {
            Outcome::new(
                format!("Hiring {} reduces runway by {:.1} months", params.employees_hired, lost),
                format!(
                    "New salary expense: {}/mo. Revenue per employee drops to {}.",
                    format_currency(m.total_new_salary_expense),
                    format_currency(m.revenue_per_employee),
                ),
                Impact::Negative,
            )
        } else {
            Outcome::new(
                format!("Hiring {} is sustainable at current margins", params.employees_hired),
                format!(
                    "Revenue per employee: {}. The team is still efficient.",
                    format_currency(m.revenue_per_employee),
                ),
                Impact::Positive,
            )
        });
    }

    if params.marketing_spend > BASELINE_MARKETING {
        let burn_increase = (params.marketing_spend - BASELINE_MARKETING) / m.burn_rate.max(1.0) * 100.0;
        let cash_share = params.marketing_spend / m.current_cash_available.max(1.0) * 100.0;
        outcomes.push(Outcome::new(
            format!("Marketing spend accelerates burn by +{:.0}%", burn_increase),
            format!(
                "At {}/mo, marketing consumes {:.1}% of cash every month.",
                format_currency(params.marketing_spend),
                cash_share,
            ),
            if burn_increase > MARKETING_BURN_ALARM { Impact::Negative } else { Impact::Neutral },
        ));
    }

    if params.revenue_shock_percent < SHOCK_CALLOUT_PERCENT {
        let consequence = match report.trajectory.insolvency_month {
            Some(month) => format!("Collapse projected in month {}.", month),
            None => "The cash runway absorbs the shock.".to_string(),
        };
        outcomes.push(Outcome::new(
            format!("{}% revenue shock detected", params.revenue_shock_percent.abs()),
            format!("Adjusted revenue: {}/mo. {}", format_currency(m.adjusted_revenue), consequence),
            Impact::Negative,
        ));
    }

    if m.is_break_even_achieved {
        outcomes.push(Outcome::new(
            "Break-even achieved: the startup is self-sustaining".to_string(),
            "Gross profit covers total expenses, so cash grows over time.".to_string(),
            Impact::Positive,
        ));
    } else if let Some(month) = report.months_to_break_even {
        outcomes.push(Outcome::new(
            format!("Break-even projected at month {}", month),
            format!(
                "At {:.0}% growth, revenue covers costs by month {}.",
                params.baseline_growth_rate * 100.0,
                month,
            ),
            Impact::Neutral,
        ));
    }

    if m.health.debt_to_cash_ratio > OUTCOME_DEBT_LIMIT {
        outcomes.push(Outcome::new(
            format!("High debt-to-cash ratio: {:.0}%", m.health.debt_to_cash_ratio * 100.0),
            format!(
                "Loan interest: {}/mo. Debt consumes a large part of cash reserves.",
                format_currency(m.loan_interest_payment_monthly),
            ),
            Impact::Negative,
        ));
    }

    if let Some(month) = report.trajectory.insolvency_month {
        outcomes.push(Outcome::new(
            format!("Cash runs out in month {}", month),
            format!(
                "At the current burn of {}/mo cash is fully depleted. Act now.",
                format_currency(m.burn_rate),
            ),
            Impact::Negative,
        ));
    }

    if params.pricing_change_percent > 0.0 {
        outcomes.push(Outcome::new(
            format!("{}% price increase lifts monthly revenue", params.pricing_change_percent),
            format!(
                "Adjusted revenue: {}/mo. Watch for churn.",
                format_currency(m.adjusted_revenue),
            ),
            Impact::Positive,
        ));
    }

    if params.cost_cut_percent > 0.0 {
        let savings = params.baseline_fixed_expenses * params.cost_cut_percent / 100.0;
        outcomes.push(Outcome::new(
            format!("{}% cost cut saves {}/mo", params.cost_cut_percent, format_currency(savings)),
            format!(
                "Adjusted expenses: {}/mo. Lower overhead extends runway.",
                format_currency(m.adjusted_fixed_expenses),
            ),
            Impact::Positive,
        ));
    }

    if outcomes.is_empty() {
        outcomes.push(Outcome::new(
            "Baseline: no active decisions".to_string(),
            "Running on default parameters. Pull a lever to simulate a decision.".to_string(),
            Impact::Neutral,
        ));
    }

    outcomes.truncate(MAX_OUTCOMES);
    outcomes
}
