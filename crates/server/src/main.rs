use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use server_api::{control_options, ApiContext};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ControlOptions, PanelView},
};
use storage::Dataset;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const DASHBOARD_PAGE: &str = include_str!("../assets/dashboard.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&settings.log_filter)?)
        .init();

    let dataset = Dataset::load(&settings.dataset_path).map_err(|error| {
        error!(
            path = %settings.dataset_path.display(),
            %error,
            "failed to load dataset; verify the file exists and has the expected columns"
        );
        error
    })?;
    let api = ApiContext::new(dataset, settings.with_log_measures);
    let app = build_router(Arc::new(AppState::new(api)), settings.max_body_bytes);

    let addr = settings.socket_addr()?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn env_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log_filter setting '{directives}'"))
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/options", get(http_options))
        .route(api::panel_route(), get(http_panel_view))
        .route(api::panel_update_route(), post(http_update_panel))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_options(State(state): State<Arc<AppState>>) -> Json<ControlOptions> {
    Json(control_options(&state.api))
}

fn status_for(error: &ApiError) -> StatusCode {
    match error.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(&error), Json(error))
}

async fn http_panel_view(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
) -> Result<Json<PanelView>, (StatusCode, Json<ApiError>)> {
    let kind = api::resolve_panel(&panel).map_err(reject)?;
    Ok(Json(api::panel_view(&state, kind).await))
}

async fn http_update_panel(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<PanelView>, (StatusCode, Json<ApiError>)> {
    let kind = api::resolve_panel(&panel).map_err(reject)?;
    let view = api::update_panel(&state, kind, body)
        .await
        .map_err(reject)?;
    Ok(Json(view))
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod tests_support;

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
