// HTTP request handlers
use crate::application::trends_service::DEFAULT_INDUSTRY;
use crate::domain::chart::ChartData;
use crate::domain::dashboard::{AnalysisType, Dashboard};
use crate::infrastructure::http_response::{json_error, json_ok, timestamp};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const TRENDS_UNAVAILABLE: &str = "Trends unavailable";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub dashboard: Option<Dashboard>,
    pub analysis_type: Option<AnalysisType>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct TrendsRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub trends: String,
    pub topic: String,
    pub industry: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct TrendsUnavailable {
    pub trends: &'static str,
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartDataRequest {
    #[serde(default)]
    pub chart_config: Option<ChartConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub project_id: String,
    pub location: String,
    pub model: String,
}

/// Health check endpoint. `model` is the configured model name rather than a
/// fixed display label, so it tracks `AGENT_DASH__VERTEX__MODEL` overrides.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let target = &state.model_target;
    Json(HealthResponse {
        status: "healthy",
        project_id: target.project_id.clone(),
        location: target.location.clone(),
        model: target.model.clone(),
    })
}

/// Forward a chat message and reshape the reply into a dashboard payload
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request: ChatRequest = match read_body(payload) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Unreadable chat request: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, e);
        }
    };

    let message = request.message.unwrap_or_default();
    let history = request.history.unwrap_or_default();

    match state.chat_service.chat(&message, &history).await {
        Ok(reply) => json_ok(ChatResponse {
            response: reply.message,
            dashboard: reply.dashboard,
            analysis_type: reply.analysis_type,
            timestamp: timestamp(),
        }),
        Err(e) => {
            tracing::error!("Chat generation failed: {}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

/// Industry benchmarks; failures still answer 200 so the UI keeps flowing
pub async fn search_trends(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request: TrendsRequest = match read_body(payload) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Unreadable trends request: {}", e);
            return trends_unavailable(e);
        }
    };

    let topic = request.topic.unwrap_or_default();
    let industry = request
        .industry
        .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string());

    match state.trends_service.search_trends(&topic, &industry).await {
        Ok(trends) => json_ok(TrendsResponse {
            trends,
            topic,
            industry,
            timestamp: timestamp(),
        }),
        Err(e) => {
            tracing::warn!("Trends lookup failed: {}", e);
            trends_unavailable(e.to_string())
        }
    }
}

fn trends_unavailable(error: String) -> Response {
    json_ok(TrendsUnavailable {
        trends: TRENDS_UNAVAILABLE,
        error,
    })
}

/// Static placeholder chart data
pub async fn generate_chart_data(payload: Result<Json<Value>, JsonRejection>) -> Response {
    match read_body::<ChartDataRequest>(payload) {
        Ok(request) => {
            let kind = request.chart_config.and_then(|c| c.kind);
            json_ok(ChartData::mock(kind.as_deref()))
        }
        Err(e) => {
            tracing::error!("Unreadable chart request: {}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

/// Decode a request body that must be a JSON object. Derived struct decoding
/// would otherwise accept a top-level array as positional fields.
fn read_body<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, String> {
    let Json(value) = payload.map_err(|rejection| rejection.body_text())?;
    if !value.is_object() {
        return Err("request body must be a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
