//! AWS Lambda handler serving twin reports
//!
//! Accepts startup parameters and a scenario as JSON and returns the computed
//! metrics and trajectory. Optionally adds the other scenarios, lever
//! sensitivity, rule-based insights and outcomes, and a ready-to-send chat
//! context for the assistant.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::warn;
use serde::{Deserialize, Serialize};

use runway_twin::{
    context::{ChatContext, ChatMessage, DashboardSnapshot},
    insights::{generate_insights, generate_outcomes, Outcome},
    projection::DEFAULT_HORIZON_MONTHS,
    scenario::ScenarioComparison,
    sensitivity::{analyze_sensitivity, LeverImpact},
    ProjectionConfig, ScenarioRunner, ScenarioVariant, StartupParameters, TwinReport,
};

/// Longest horizon a single request may ask for
const MAX_HORIZON_MONTHS: u32 = 120;

/// Input configuration for the projection
#[derive(Debug, Deserialize)]
pub struct TwinRequest {
    /// Startup parameters; missing fields take the dashboard defaults
    #[serde(default)]
    pub inputs: StartupParameters,

    /// Scenario name (default: expected)
    #[serde(default)]
    pub scenario: Option<String>,

    /// Number of months to project (default: 12)
    #[serde(default = "default_horizon")]
    pub horizon_months: u32,

    /// Include all three scenarios side by side
    #[serde(default)]
    pub compare_scenarios: bool,

    /// Include lever sensitivity analysis
    #[serde(default)]
    pub include_sensitivity: bool,

    /// Include twin insights and decision outcomes
    #[serde(default)]
    pub include_insights: bool,

    /// Earlier chat turns, oldest first
    #[serde(default)]
    pub messages: Vec<ChatMessage>,

    /// New question for the chat assistant, appended to `messages`
    #[serde(default)]
    pub question: Option<String>,
}

fn default_horizon() -> u32 { DEFAULT_HORIZON_MONTHS }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct TwinResponse {
    pub report: TwinReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ScenarioComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Vec<LeverImpact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<Vec<Outcome>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_context: Option<ChatContext>,
    pub execution_time_ms: u64,
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &TwinResponse) -> Result<Response<Body>, Error> {
    Ok(cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    // Parse request body
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: TwinRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            warn!("Rejected request body: {}", e);
            return error_response(400, &format!("Invalid JSON: {}", e));
        }
    };

    let scenario = match request.scenario.as_deref().map(str::parse::<ScenarioVariant>) {
        None => ScenarioVariant::Expected,
        Some(Ok(s)) => s,
        Some(Err(e)) => return error_response(400, &e.to_string()),
    };

    if request.horizon_months > MAX_HORIZON_MONTHS {
        return error_response(
            400,
            &format!("horizon_months must be at most {}", MAX_HORIZON_MONTHS),
        );
    }

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        horizon_months: request.horizon_months,
    });
    let report = runner.run(&request.inputs, scenario);

    let comparison = request
        .compare_scenarios
        .then(|| runner.run_all(&request.inputs));

    let sensitivity = request
        .include_sensitivity
        .then(|| analyze_sensitivity(runner.engine(), &request.inputs, scenario));

    let insights = request
        .include_insights
        .then(|| generate_insights(&report.metrics).iter().map(ToString::to_string).collect());

    let outcomes = request
        .include_insights
        .then(|| generate_outcomes(runner.engine(), &request.inputs, &report));

    let mut messages = request.messages;
    if let Some(question) = request.question {
        messages.push(ChatMessage::user(question));
    }
    let chat_context = if messages.is_empty() {
        None
    } else {
        let snapshot = DashboardSnapshot::capture(&request.inputs, &report);
        Some(ChatContext::new(&snapshot, messages)?)
    };

    let response = TwinResponse {
        report,
        comparison,
        sensitivity,
        insights,
        outcomes,
        chat_context,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
