//! Context snapshots for the external chat assistant
//!
//! The assistant never sees the engine directly. Each question is sent with
//! a fresh JSON snapshot of the inputs and computed outputs, embedded in a
//! fixed advisor prompt. Sending the request is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inputs::StartupParameters;
use crate::projection::{Trajectory, TwinMetrics};
use crate::report::{StatusLevel, TwinReport};
use crate::scenario::ScenarioVariant;

const ADVISOR_PREAMBLE: &str = "\
You are the financial copilot inside a startup survival simulator. Act as a
concise, analytical CFO advising a founder.

Rules:
1. Ground every statement in the exact numbers of the dashboard state below.
2. If asked about data that is not in the state, answer: \"That data isn't currently tracked in your twin.\"
3. For what-if questions, explain the direction of the change in runway, burn rate and survival probability.
4. Keep answers between 100 and 250 words unless a deeper analysis is requested.
5. End advice with one clear, actionable takeaway.

Dashboard state (live twin):
";

/// Everything the assistant may know about the current dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub scenario: ScenarioVariant,
    pub status: StatusLevel,
    pub inputs: StartupParameters,
    pub metrics: TwinMetrics,
    pub trajectory: Trajectory,
}

impl DashboardSnapshot {
    /// Snapshot a report as of `generated_at`
    pub fn new(inputs: &StartupParameters, report: &TwinReport, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            scenario: report.scenario,
            status: report.status,
            inputs: *inputs,
            metrics: report.metrics.clone(),
            trajectory: report.trajectory.clone(),
        }
    }

    /// Snapshot a report as of now
    pub fn capture(inputs: &StartupParameters, report: &TwinReport) -> Self {
        Self::new(inputs, report, Utc::now())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Advisor instructions followed by the snapshot as a fenced JSON block
    pub fn system_prompt(&self) -> serde_json::Result<String> {
        Ok(format!("{}```json\n{}\n```", ADVISOR_PREAMBLE, self.to_json()?))
    }
}

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Payload handed to the chat collaborator: a fresh system prompt plus the
/// conversation so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatContext {
    /// Context for an ongoing conversation; earlier turns are kept as sent
    pub fn new(snapshot: &DashboardSnapshot, messages: Vec<ChatMessage>) -> serde_json::Result<Self> {
        Ok(Self {
            system_prompt: snapshot.system_prompt()?,
            messages,
        })
    }

    /// Context for a single opening question
    pub fn for_question(snapshot: &DashboardSnapshot, question: impl Into<String>) -> serde_json::Result<Self> {
        Self::new(snapshot, vec![ChatMessage::user(question)])
    }

    /// Latest user question, if any
    pub fn last_question(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::TwinEngine;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn snapshot() -> DashboardSnapshot {
        let inputs = StartupParameters::default_inputs();
        let report = TwinEngine::default().run(&inputs, ScenarioVariant::Expected);
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
        DashboardSnapshot::new(&inputs, &report, at)
    }

    #[test]
    fn test_snapshot_json_round_trips() {
        let snap = snapshot();
        let json = snap.to_json().unwrap();
        let back: DashboardSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back.generated_at, snap.generated_at);
        assert_eq!(back.scenario, snap.scenario);
        assert_eq!(back.inputs, snap.inputs);
        assert_eq!(back.trajectory.cash_series(), snap.trajectory.cash_series());
        assert_eq!(back.metrics.risk_score, snap.metrics.risk_score);
        assert_relative_eq!(back.metrics.burn_rate, snap.metrics.burn_rate, max_relative = 1e-12);
    }

    #[test]
    fn test_snapshot_exposes_engine_fields_only() {
        let value = serde_json::to_value(snapshot()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 6);
        for key in ["generated_at", "scenario", "status", "inputs", "metrics", "trajectory"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(value["metrics"]["runway"]["kind"], "finite");
        assert_eq!(value["scenario"], "expected");
    }

    #[test]
    fn test_system_prompt_embeds_snapshot() {
        let snap = snapshot();
        let ctx = ChatContext::for_question(&snap, "How long can we survive?").unwrap();

        assert!(ctx.system_prompt.starts_with("You are the financial copilot"));
        assert!(ctx.system_prompt.contains("```json\n{"));
        assert!(ctx.system_prompt.ends_with("}\n```"));
        assert!(ctx.system_prompt.contains("\"burn_rate\""));
        assert_eq!(ctx.messages, vec![ChatMessage::user("How long can we survive?")]);
    }

    #[test]
    fn test_history_reuses_fresh_snapshot() {
        let snap = snapshot();
        let history = vec![
            ChatMessage::user("How long can we survive?"),
            ChatMessage::assistant("About 15.6 months at the current burn."),
            ChatMessage::user("What if we hire two more engineers?"),
        ];
        let ctx = ChatContext::new(&snap, history.clone()).unwrap();

        assert_eq!(ctx.messages, history);
        assert_eq!(ctx.system_prompt, snap.system_prompt().unwrap());
        assert_eq!(ctx.last_question(), Some("What if we hire two more engineers?"));

        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["messages"][1]["role"], "assistant");
    }

    #[test]
    fn test_empty_history_has_no_question() {
        let ctx = ChatContext::new(&snapshot(), Vec::new()).unwrap();
        assert_eq!(ctx.last_question(), None);
    }
}
