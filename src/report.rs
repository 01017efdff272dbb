//! Twin reports and display helpers for the presentation layer

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::projection::{Runway, Trajectory, TwinMetrics};
use crate::scenario::ScenarioVariant;

/// Traffic-light status derived from runway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Safe,
    Warning,
    Critical,
}

impl StatusLevel {
    /// Safe at 12+ months (or unbounded), warning at 4+, critical below
    pub fn from_runway(runway: Runway) -> Self {
        match runway {
            Runway::Unbounded => StatusLevel::Safe,
            Runway::Finite { months } if months >= 12.0 => StatusLevel::Safe,
            Runway::Finite { months } if months >= 4.0 => StatusLevel::Warning,
            Runway::Finite { .. } => StatusLevel::Critical,
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusLevel::Safe => "safe",
            StatusLevel::Warning => "warning",
            StatusLevel::Critical => "critical",
        };
        f.pad(s)
    }
}

/// Metrics and trajectory for one scenario, plus the flags the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinReport {
    pub scenario: ScenarioVariant,
    pub metrics: TwinMetrics,
    pub trajectory: Trajectory,
    pub status: StatusLevel,

    /// Trajectory month in which burn first reaches zero
    pub months_to_break_even: Option<u32>,

    /// Whether cash runs out inside the projection horizon
    pub collapse_within_horizon: bool,
}

impl TwinReport {
    pub fn new(scenario: ScenarioVariant, metrics: TwinMetrics, trajectory: Trajectory) -> Self {
        Self {
            scenario,
            status: StatusLevel::from_runway(metrics.runway),
            months_to_break_even: trajectory.break_even_month,
            collapse_within_horizon: trajectory.insolvency_month.is_some(),
            metrics,
            trajectory,
        }
    }
}

/// Compact dollar figure: `$1.5M`, `$12.3K`, `$500`
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// Runway label: `Safe` when unbounded, otherwise months to one decimal
pub fn format_months(runway: Runway) -> String {
    match runway {
        Runway::Unbounded => "Safe".to_string(),
        Runway::Finite { months } if months < 0.0 => "0 mo".to_string(),
        Runway::Finite { months } => format!("{:.1} mo", months),
    }
}

/// Cash as charts show it; the projection itself keeps negative values
pub fn display_cash(cash: f64) -> f64 {
    cash.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::StartupParameters;
    use crate::projection::TwinEngine;

    #[test]
    fn test_status_levels() {
        assert_eq!(StatusLevel::from_runway(Runway::Unbounded), StatusLevel::Safe);
        assert_eq!(StatusLevel::from_runway(Runway::Finite { months: 12.0 }), StatusLevel::Safe);
        assert_eq!(StatusLevel::from_runway(Runway::Finite { months: 11.9 }), StatusLevel::Warning);
        assert_eq!(StatusLevel::from_runway(Runway::Finite { months: 4.0 }), StatusLevel::Warning);
        assert_eq!(StatusLevel::from_runway(Runway::Finite { months: 3.9 }), StatusLevel::Critical);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(2_500_000.0), "$2.5M");
        assert_eq!(format_currency(32_140.0), "$32.1K");
        assert_eq!(format_currency(500.0), "$500");
        assert_eq!(format_currency(-45_000.0), "-$45.0K");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn test_format_months() {
        assert_eq!(format_months(Runway::Unbounded), "Safe");
        assert_eq!(format_months(Runway::Finite { months: 15.552 }), "15.6 mo");
        assert_eq!(format_months(Runway::Finite { months: -2.0 }), "0 mo");
    }

    #[test]
    fn test_display_cash_floors_at_zero() {
        assert_eq!(display_cash(-14_121.0), 0.0);
        assert_eq!(display_cash(467_850.0), 467_850.0);
    }

    #[test]
    fn test_report_flags_collapse() {
        let engine = TwinEngine::default();
        let params = StartupParameters {
            baseline_cash: 50_000.0,
            ..StartupParameters::default_inputs()
        };
        let report = engine.run(&params, ScenarioVariant::Expected);

        assert_eq!(report.status, StatusLevel::Critical);
        assert!(report.collapse_within_horizon);
        assert_eq!(report.months_to_break_even, None);
    }
}
