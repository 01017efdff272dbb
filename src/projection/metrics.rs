//! Instantaneous twin metrics and the tagged runway value

use std::fmt;

use serde::{Deserialize, Serialize};

use super::risk::{HealthRatios, RiskBreakdown};

/// Ceiling applied to runway month counts, finite or not
pub const RUNWAY_CAP_MONTHS: f64 = 999.0;

/// Months of operation left at the current burn rate
///
/// A startup that is not burning cash has `Unbounded` runway. Keeping it as
/// its own variant stops 999 from being read as a real month count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Runway {
    Finite { months: f64 },
    Unbounded,
}

impl Runway {
    /// Runway for `cash` at `burn_rate`; non-positive burn never runs out
    pub fn from_cash_and_burn(cash: f64, burn_rate: f64) -> Self {
        if burn_rate > 0.0 {
            Runway::Finite {
                months: (cash / burn_rate).min(RUNWAY_CAP_MONTHS),
            }
        } else {
            Runway::Unbounded
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Runway::Unbounded)
    }

    /// Finite month count, if any
    pub fn months(&self) -> Option<f64> {
        match self {
            Runway::Finite { months } => Some(*months),
            Runway::Unbounded => None,
        }
    }

    /// Month count for charts and comparisons, `RUNWAY_CAP_MONTHS` when unbounded
    pub fn months_capped(&self) -> f64 {
        self.months().unwrap_or(RUNWAY_CAP_MONTHS)
    }

    /// True if the runway is finite and shorter than `months`
    pub fn is_below(&self, months: f64) -> bool {
        matches!(self, Runway::Finite { months: m } if *m < months)
    }
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::Finite { months } => write!(f, "{:.1} months", months),
            Runway::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Derived metrics for the current inputs (the month-0 slice)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinMetrics {
    // HR
    pub total_team_size: f64,
    pub total_new_salary_expense: f64,
    pub revenue_per_employee: f64,

    // Growth
    pub adjusted_revenue: f64,
    pub marketing_spend: f64,

    // Fundraising
    pub loan_interest_payment_monthly: f64,

    // Financial engine
    pub adjusted_fixed_expenses: f64,
    pub gross_profit: f64,
    pub burn_rate: f64,
    pub current_cash_available: f64,
    pub runway: Runway,
    pub is_break_even_achieved: bool,

    // Financial health (each nominally in [0, 1])
    pub health: HealthRatios,

    // Survival intelligence
    pub risk: RiskBreakdown,
    pub risk_score: u8,
    pub survival_probability: u8,
}
