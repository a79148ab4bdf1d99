//! Grouped summary tables over merged rows.

use crate::merge::MergedRow;
use crate::roas::{cmp_desc, roas};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// "Top Influencers by ROAS" table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InfluencerSummary {
    pub name: String,
    pub revenue: f64,
    pub total_payout: f64,
    #[serde(rename = "ROAS")]
    pub roas: Option<f64>,
}

/// "Campaign Performance" table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CampaignSummary {
    pub campaign: String,
    pub revenue: f64,
    pub total_payout: f64,
    /// Present only when the joined data carries an `orders` column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<f64>,
    #[serde(rename = "ROAS")]
    pub roas: Option<f64>,
}

/// Running sums; blank cells contribute nothing.
#[derive(Default)]
struct Totals {
    revenue: f64,
    total_payout: f64,
    orders: f64,
}

impl Totals {
    fn add(&mut self, row: &MergedRow) {
        self.revenue += row.revenue.unwrap_or(0.0);
        self.total_payout += row.total_payout.unwrap_or(0.0);
        self.orders += row.orders.unwrap_or(0.0);
    }
}

/// Sum revenue and payout per influencer name, ordered by ROAS descending.
/// Revenue on a zero payout ranks first, undefined ROAS last; ties keep
/// name order.
pub fn top_influencers(rows: &[MergedRow]) -> Vec<InfluencerSummary> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
    for row in rows {
        groups.entry(row.name.as_str()).or_default().add(row);
    }

    let mut table: Vec<InfluencerSummary> = groups
        .into_iter()
        .map(|(name, t)| InfluencerSummary {
            name: name.to_string(),
            revenue: t.revenue,
            total_payout: t.total_payout,
            roas: roas(t.revenue, t.total_payout),
        })
        .collect();

    table.sort_by(|a, b| cmp_desc(a.roas, b.roas));
    table
}

/// Sum revenue and payout per campaign in campaign order. Orders are summed
/// only when `with_orders` is set.
pub fn campaign_performance(rows: &[MergedRow], with_orders: bool) -> Vec<CampaignSummary> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
    for row in rows {
        groups.entry(row.campaign.as_str()).or_default().add(row);
    }

    groups
        .into_iter()
        .map(|(campaign, t)| CampaignSummary {
            campaign: campaign.to_string(),
            revenue: t.revenue,
            total_payout: t.total_payout,
            orders: with_orders.then_some(t.orders),
            roas: roas(t.revenue, t.total_payout),
        })
        .collect()
}

/// Top-influencer rows reordered by revenue, highest first.
pub fn by_revenue(table: &[InfluencerSummary]) -> Vec<InfluencerSummary> {
    let mut sorted = table.to_vec();
    sorted.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    sorted
}
