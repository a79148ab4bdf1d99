//! REST API handlers for dashboard data, CSV exports, and operational
//! endpoints.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use influencer_core::config::DataConfig;
use influencer_reporting::export::{CAMPAIGN_SUMMARY_FILE, CSV_MIME, TOP_INFLUENCERS_FILE};
use influencer_reporting::{CampaignSummary, Dashboard, InfluencerSummary, PlatformFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DataConfig>,
    pub title: String,
    pub start_time: Instant,
}

/// `?platform=` selection shared by every data route.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlatformQuery {
    /// Platform name, or `All` for every platform.
    pub platform: Option<String>,
}

impl PlatformQuery {
    pub fn filter(&self) -> PlatformFilter {
        PlatformFilter::from_param(self.platform.as_deref())
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Re-read the datasets and rebuild the dashboard for one request.
pub async fn build_dashboard(state: &AppState, filter: PlatformFilter) -> Result<Dashboard, ApiError> {
    let data = state.data.clone();
    let built = tokio::task::spawn_blocking(move || Dashboard::load(&data, filter))
        .await
        .map_err(|e| {
            error!(error = %e, "Dashboard task failed");
            internal_error("dashboard_failed", "Dashboard build was interrupted")
        })?;

    built.map_err(|e| {
        error!(error = %e, dir = %state.data.dir.display(), "Failed to load datasets");
        metrics::counter!("dashboard.load_errors").increment(1);
        internal_error("dataset_load_failed", &e.to_string())
    })
}

fn internal_error(error: &str, message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        }),
    )
}

/// GET /v1/platforms — Sidebar platform options.
#[utoipa::path(
    get,
    path = "/v1/platforms",
    tag = "Dashboard",
    params(PlatformQuery),
    responses(
        (status = 200, description = "Platform options, All first", body = PlatformsResponse),
        (status = 500, description = "Datasets could not be loaded", body = ErrorResponse),
    )
)]
pub async fn handle_platforms(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Json<PlatformsResponse>, ApiError> {
    let dashboard = build_dashboard(&state, query.filter()).await?;
    Ok(Json(PlatformsResponse {
        platforms: dashboard.platforms,
        selected: dashboard.selected.label().to_string(),
    }))
}

/// GET /v1/top-influencers — Influencers ranked by ROAS.
#[utoipa::path(
    get,
    path = "/v1/top-influencers",
    tag = "Dashboard",
    params(PlatformQuery),
    responses(
        (status = 200, description = "Top influencers by ROAS", body = [InfluencerSummary]),
        (status = 500, description = "Datasets could not be loaded", body = ErrorResponse),
    )
)]
pub async fn handle_top_influencers(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Json<Vec<InfluencerSummary>>, ApiError> {
    let dashboard = build_dashboard(&state, query.filter()).await?;
    Ok(Json(dashboard.top_influencers))
}

/// GET /v1/campaigns — Campaign performance summary.
#[utoipa::path(
    get,
    path = "/v1/campaigns",
    tag = "Dashboard",
    params(PlatformQuery),
    responses(
        (status = 200, description = "Per-campaign revenue, payout and ROAS", body = [CampaignSummary]),
        (status = 500, description = "Datasets could not be loaded", body = ErrorResponse),
    )
)]
pub async fn handle_campaigns(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Json<Vec<CampaignSummary>>, ApiError> {
    let dashboard = build_dashboard(&state, query.filter()).await?;
    Ok(Json(dashboard.campaigns))
}

/// GET /v1/export/top_influencers.csv — Download the top-influencer table.
#[utoipa::path(
    get,
    path = "/v1/export/top_influencers.csv",
    tag = "Export",
    params(PlatformQuery),
    responses(
        (status = 200, description = "CSV attachment", body = String, content_type = "text/csv"),
        (status = 500, description = "Datasets could not be loaded", body = ErrorResponse),
    )
)]
pub async fn handle_export_top_influencers(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Response, ApiError> {
    let dashboard = build_dashboard(&state, query.filter()).await?;
    let body = dashboard
        .top_influencers_csv()
        .map_err(|e| internal_error("export_failed", &e.to_string()))?;
    Ok(csv_attachment(TOP_INFLUENCERS_FILE, body))
}

/// GET /v1/export/campaign_summary.csv — Download the campaign table.
#[utoipa::path(
    get,
    path = "/v1/export/campaign_summary.csv",
    tag = "Export",
    params(PlatformQuery),
    responses(
        (status = 200, description = "CSV attachment", body = String, content_type = "text/csv"),
        (status = 500, description = "Datasets could not be loaded", body = ErrorResponse),
    )
)]
pub async fn handle_export_campaign_summary(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Response, ApiError> {
    let dashboard = build_dashboard(&state, query.filter()).await?;
    let body = dashboard
        .campaign_summary_csv()
        .map_err(|e| internal_error("export_failed", &e.to_string()))?;
    Ok(csv_attachment(CAMPAIGN_SUMMARY_FILE, body))
}

fn csv_attachment(file_name: &str, body: Vec<u8>) -> Response {
    metrics::counter!("dashboard.exports", "file" => file_name.to_string()).increment(1);
    (
        [
            (header::CONTENT_TYPE, CSV_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        data_dir: state.data.dir.display().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe.
/// Returns 200 only when the data directory exists.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Data directory is present"),
        (status = 503, description = "Data directory is missing"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.data.dir.is_dir() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses(
        (status = 200, description = "Process is alive"),
    )
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize, ToSchema)]
pub struct PlatformsResponse {
    pub platforms: Vec<String>,
    pub selected: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub data_dir: String,
    pub uptime_secs: u64,
}
