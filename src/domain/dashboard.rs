// Dashboard domain model - the payload the model is instructed to produce
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Attrition,
    Hours,
    Demographics,
    Workforce,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    pub subtitle: String,
    pub key_insights: Vec<String>,
    pub fields_used: Vec<String>,
    pub metrics: Vec<Metric>,
    pub visualizations: Vec<Visualization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    pub insight: String,
}

/// Models usually answer with a formatted string ("12.3%") but sometimes emit a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    #[serde(rename = "type")]
    pub kind: VisualizationKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationKind {
    Bar,
    Line,
    Pie,
    Donut,
}

/// What a chat turn hands back to the front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardResponse {
    pub message: String,
    pub analysis_type: Option<AnalysisType>,
    pub dashboard: Option<Dashboard>,
}

impl DashboardResponse {
    pub fn plain(message: String) -> Self {
        Self {
            message,
            analysis_type: None,
            dashboard: None,
        }
    }
}
