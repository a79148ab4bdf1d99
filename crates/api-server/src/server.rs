//! API server — serves the dashboard page, JSON API, CSV exports, and the
//! Prometheus metrics listener.

use crate::page;
use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use axum::routing::get;
use axum::Router;
use influencer_core::config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the full router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(page::handle_index))
        // Dashboard data
        .route("/v1/platforms", get(rest::handle_platforms))
        .route("/v1/top-influencers", get(rest::handle_top_influencers))
        .route("/v1/campaigns", get(rest::handle_campaigns))
        // CSV downloads
        .route(
            "/v1/export/top_influencers.csv",
            get(rest::handle_export_top_influencers),
        )
        .route(
            "/v1/export/campaign_summary.csv",
            get(rest::handle_export_campaign_summary),
        )
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Main API server.
pub struct ApiServer {
    config: AppConfig,
}

impl ApiServer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn state(&self) -> AppState {
        AppState {
            data: Arc::new(self.config.data.clone()),
            title: self.config.title.clone(),
            start_time: Instant::now(),
        }
    }

    /// Start the HTTP server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = router(self.state());

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, data_dir = %self.config.data.dir.display(), "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        if !self.config.metrics.enabled {
            info!("Metrics exporter disabled");
            return Ok(());
        }

        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
