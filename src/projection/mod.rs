//! Twin engine: metric calculator and trajectory projector

mod state;
mod engine;
mod trajectory;
mod metrics;
mod risk;

pub use state::{AdjustedBaseline, ProjectionState};
pub use engine::{ProjectionConfig, TwinEngine, DEFAULT_HORIZON_MONTHS};
pub use trajectory::{Trajectory, TrajectoryRow, TrajectorySummary};
pub use metrics::{Runway, TwinMetrics, RUNWAY_CAP_MONTHS};
pub use risk::{survival_probability, HealthRatios, RiskBreakdown};
