//! Influencer campaign dashboard — the full load-merge-summarize pass
//! behind every page render.

use crate::chart::BarChart;
use crate::export;
use crate::merge::{merge, PlatformFilter, ALL_PLATFORMS};
use crate::summary::{self, CampaignSummary, InfluencerSummary};
use chrono::{DateTime, Utc};
use influencer_core::config::DataConfig;
use influencer_core::dataset::DatasetCounts;
use influencer_core::{DashboardResult, Datasets};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Sidebar options, `All` first.
    pub platforms: Vec<String>,
    pub selected: PlatformFilter,
    pub counts: DatasetCounts,
    pub merged_rows: usize,
    pub top_influencers: Vec<InfluencerSummary>,
    pub campaigns: Vec<CampaignSummary>,
    /// Whether the campaign table carries an `orders` column.
    pub has_orders: bool,
    pub revenue_chart: BarChart,
    pub roas_chart: BarChart,
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    /// Read the datasets from disk and build the view for `filter`.
    pub fn load(config: &DataConfig, filter: PlatformFilter) -> DashboardResult<Self> {
        let data = Datasets::load(config)?;
        Ok(Self::build(&data, filter))
    }

    pub fn build(data: &Datasets, filter: PlatformFilter) -> Self {
        let mut platforms = vec![ALL_PLATFORMS.to_string()];
        platforms.extend(data.platforms());

        let has_orders = data.orders_source().is_some();
        let rows = merge(data, &filter);
        let top_influencers = summary::top_influencers(&rows);
        let campaigns = summary::campaign_performance(&rows, has_orders);
        let revenue_chart = BarChart::influencer_revenue(&summary::by_revenue(&top_influencers));
        let roas_chart = BarChart::campaign_roas(&campaigns);

        info!(
            platform = %filter,
            merged = rows.len(),
            influencers = top_influencers.len(),
            campaigns = campaigns.len(),
            "Dashboard built"
        );

        Self {
            platforms,
            selected: filter,
            counts: data.counts(),
            merged_rows: rows.len(),
            top_influencers,
            campaigns,
            has_orders,
            revenue_chart,
            roas_chart,
            generated_at: Utc::now(),
        }
    }

    pub fn top_influencers_csv(&self) -> DashboardResult<Vec<u8>> {
        export::top_influencers_csv(&self.top_influencers)
    }

    pub fn campaign_summary_csv(&self) -> DashboardResult<Vec<u8>> {
        export::campaign_summary_csv(&self.campaigns, self.has_orders)
    }
}
