//! Runway Twin - Financial digital twin engine for early-stage startups
//!
//! This library provides:
//! - Instantaneous metrics (burn rate, runway, break-even, health ratios)
//! - A weighted composite risk score and survival probability
//! - Month-by-month cash and revenue trajectories under expected/best/worst scenarios
//! - Lever sensitivity analysis and rule-based insights and outcomes
//! - Chat-assistant context snapshots

pub mod error;
pub mod inputs;
pub mod projection;
pub mod scenario;
pub mod report;
pub mod sensitivity;
pub mod insights;
pub mod context;

// Re-export commonly used types
pub use error::LoadError;
pub use inputs::StartupParameters;
pub use projection::{ProjectionConfig, Runway, Trajectory, TrajectoryRow, TwinEngine, TwinMetrics};
pub use scenario::{ScenarioMultiplier, ScenarioRunner, ScenarioVariant};
pub use report::{StatusLevel, TwinReport};
pub use insights::{Impact, Insight, Outcome};
pub use context::{ChatContext, ChatMessage, ChatRole, DashboardSnapshot};
