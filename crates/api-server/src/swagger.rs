//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Influencer Campaign Dashboard API",
        version = "0.1.0",
        description = "Influencer campaign performance: ROAS rankings, campaign summaries, and CSV exports.\n\nEvery data route re-reads the campaign datasets and accepts an optional `platform` filter.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Dashboard", description = "Platform options and summary tables"),
        (name = "Export", description = "CSV downloads of the summary tables"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Dashboard
        crate::rest::handle_platforms,
        crate::rest::handle_top_influencers,
        crate::rest::handle_campaigns,
        // Export
        crate::rest::handle_export_top_influencers,
        crate::rest::handle_export_campaign_summary,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        influencer_reporting::InfluencerSummary,
        influencer_reporting::CampaignSummary,
        crate::rest::PlatformsResponse,
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
