// Application state for HTTP handlers
use crate::application::chat_service::ChatService;
use crate::application::trends_service::TrendsService;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: ChatService,
    pub trends_service: TrendsService,
    pub model_target: ModelTarget,
}

/// Which hosted model the service talks to, reported by `/health`
#[derive(Debug, Clone)]
pub struct ModelTarget {
    pub project_id: String,
    pub location: String,
    pub model: String,
}
