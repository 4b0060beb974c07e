// Route table, CORS and request tracing
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chat, generate_chart_data, health_check, search_trends};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat))
        .route("/api/search-trends", post(search_trends))
        .route("/api/generate-chart-data", post(generate_chart_data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
