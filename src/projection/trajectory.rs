//! Trajectory output structures for projections

use serde::{Deserialize, Serialize};

/// A single month of projected cash and revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    /// Projection month (1-indexed)
    pub month: u32,

    /// Cash at end of month, rounded to whole dollars; may be negative
    pub cash: f64,

    /// Revenue earned this month, rounded to whole dollars
    pub revenue: f64,

    /// Gross profit on this month's revenue
    pub gross_profit: f64,

    /// Net cash consumed this month; negative means cash-positive
    pub burn: f64,
}

/// Complete projection over a fixed horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Requested horizon; always equal to `rows.len()`
    pub horizon_months: u32,

    /// Cash available at month 0
    pub opening_cash: f64,

    /// Adjusted revenue at month 0
    pub opening_revenue: f64,

    /// Monthly rows, months 1..=horizon
    pub rows: Vec<TrajectoryRow>,

    /// First month whose burn is <= 0
    pub break_even_month: Option<u32>,

    /// First month whose closing cash is <= 0
    pub insolvency_month: Option<u32>,
}

impl Trajectory {
    pub fn new(horizon_months: u32, opening_cash: f64, opening_revenue: f64) -> Self {
        Self {
            horizon_months,
            opening_cash,
            opening_revenue,
            rows: Vec::with_capacity(horizon_months as usize),
            break_even_month: None,
            insolvency_month: None,
        }
    }

    /// Add a month row
    pub fn add_row(&mut self, row: TrajectoryRow) {
        self.rows.push(row);
    }

    /// Rounded end-of-month cash for each projected month
    pub fn cash_series(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.cash).collect()
    }

    /// Rounded revenue for each projected month
    pub fn revenue_series(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.revenue).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> TrajectorySummary {
        let final_cash = self.rows.last().map(|r| r.cash).unwrap_or(self.opening_cash);
        let final_revenue = self.rows.last().map(|r| r.revenue).unwrap_or(self.opening_revenue);
        let min_cash = self.rows.iter().map(|r| r.cash).fold(self.opening_cash, f64::min);
        let total_burn: f64 = self.rows.iter().map(|r| r.burn).sum();

        TrajectorySummary {
            months_projected: self.rows.len() as u32,
            final_cash,
            final_revenue,
            min_cash,
            total_burn,
        }
    }
}

/// Summary statistics for a trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub months_projected: u32,
    pub final_cash: f64,
    pub final_revenue: f64,
    pub min_cash: f64,
    pub total_burn: f64,
}
