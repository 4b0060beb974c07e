use crate::application::text_generator::GenerationParams;
use serde::Deserialize;
use std::collections::HashMap;

const CONFIG_FILE: &str = "config/app";
const ENV_PREFIX: &str = "AGENT_DASH";

/// Older deployment variables, mapped onto config keys
const LEGACY_ENV: &[(&str, &str)] = &[
    ("GCP_PROJECT_ID", "vertex.project_id"),
    ("GCP_LOCATION", "vertex.location"),
    ("PORT", "server.port"),
    ("GOOGLE_ACCESS_TOKEN", "vertex.access_token"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub vertex: VertexSettings,
    pub generation: GenerationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VertexSettings {
    pub project_id: String,
    pub location: String,
    pub model: String,
    /// Replaces the regional `https://{location}-aiplatform.googleapis.com` base
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl From<&GenerationSettings> for GenerationParams {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            max_output_tokens: Some(settings.max_output_tokens),
            temperature: Some(settings.temperature),
            top_p: Some(settings.top_p),
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    build_app_config(Some(CONFIG_FILE), env)
}

/// Defaults, then the optional config file, then `AGENT_DASH__*` variables, then legacy variables
fn build_app_config(file: Option<&str>, env: HashMap<String, String>) -> anyhow::Result<AppConfig> {
    let mut builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("vertex.project_id", "molten-album-478703-d8")?
        .set_default("vertex.location", "us-central1")?
        .set_default("vertex.model", "gemini-2.5-pro")?
        .set_default("generation.max_output_tokens", 2048)?
        .set_default("generation.temperature", 0.7)?
        .set_default("generation.top_p", 0.95)?;

    if let Some(path) = file {
        builder = builder.add_source(config::File::with_name(path).required(false));
    }

    for (var, key) in LEGACY_ENV {
        let value = env.get(*var).filter(|v| !v.trim().is_empty()).cloned();
        builder = builder.set_override_option(*key, value)?;
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.into_iter().collect())),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
