// Response interpreter - pulls the dashboard JSON out of a free-text model reply
//
// Candidate precedence: "```json" fence, then a bare "```" fence, then the whole text.
// A fence with no closing marker runs to the end of the text.
use crate::domain::dashboard::{AnalysisType, Dashboard, DashboardResponse};
use serde::Deserialize;
use serde_json::Value;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Outcome of reading a model reply
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// The reply carried a well-formed JSON object
    Parsed(DashboardResponse),
    /// Anything else; holds the raw reply unchanged
    Fallback(String),
}

impl Interpretation {
    pub fn into_response(self) -> DashboardResponse {
        match self {
            Interpretation::Parsed(response) => response,
            Interpretation::Fallback(raw) => DashboardResponse::plain(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelReply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    analysis_type: Option<AnalysisType>,
    #[serde(default)]
    dashboard: Option<Dashboard>,
}

/// Isolate the JSON payload candidate, trimmed of surrounding whitespace
pub fn extract_candidate(raw: &str) -> &str {
    let fenced = if let Some(start) = raw.find(JSON_FENCE) {
        Some(&raw[start + JSON_FENCE.len()..])
    } else {
        raw.find(FENCE).map(|start| &raw[start + FENCE.len()..])
    };

    match fenced {
        Some(rest) => {
            let end = rest.find(FENCE).unwrap_or(rest.len());
            rest[..end].trim()
        }
        None => raw.trim(),
    }
}

/// Interpret a raw model reply. Total over all inputs.
pub fn interpret(raw: &str) -> Interpretation {
    match parse_reply(extract_candidate(raw)) {
        Ok(reply) => Interpretation::Parsed(DashboardResponse {
            message: reply.message.unwrap_or_else(|| raw.to_string()),
            analysis_type: reply.analysis_type,
            dashboard: reply.dashboard,
        }),
        Err(e) => {
            tracing::debug!("Model reply is not structured ({}), returning it as plain text", e);
            Interpretation::Fallback(raw.to_string())
        }
    }
}

fn parse_reply(candidate: &str) -> Result<ModelReply, serde_json::Error> {
    let value: Value = serde_json::from_str(candidate)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}
