//! Platform filtering and the tracking ⋈ influencers ⋈ payouts join.

use crate::roas::roas;
use influencer_core::types::{Influencer, Payout, TrackingRecord};
use influencer_core::dataset::OrdersSource;
use influencer_core::Datasets;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Label of the pseudo-platform that disables filtering.
pub const ALL_PLATFORMS: &str = "All";

/// Sidebar platform selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(String),
}

impl PlatformFilter {
    /// Interpret a `?platform=` query value. Absent, empty and `All` all
    /// mean no filtering; anything else is matched verbatim.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ALL_PLATFORMS) => Self::All,
            Some(platform) => Self::Only(platform.to_string()),
        }
    }

    pub fn matches(&self, influencer: &Influencer) -> bool {
        match self {
            Self::All => true,
            Self::Only(platform) => influencer.platform == *platform,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_PLATFORMS,
            Self::Only(platform) => platform,
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One joined row: a tracking record with its influencer and payout.
/// Blank numeric cells stay `None` and are skipped when summing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub influencer_id: String,
    pub name: String,
    pub platform: String,
    pub campaign: String,
    pub revenue: Option<f64>,
    pub orders: Option<f64>,
    pub total_payout: Option<f64>,
    pub roas: Option<f64>,
}

/// Inner-join tracking records to the influencers that pass `filter`, then
/// to payouts, both on influencer id. Every matching pair yields a row, so
/// an influencer's payout repeats once per tracking record. Output follows
/// tracking order.
pub fn merge(data: &Datasets, filter: &PlatformFilter) -> Vec<MergedRow> {
    let orders = data.orders_source();
    let mut influencers: HashMap<&str, Vec<&Influencer>> = HashMap::new();
    for influencer in data.influencers.iter().filter(|i| filter.matches(i)) {
        influencers
            .entry(influencer.id.as_str())
            .or_default()
            .push(influencer);
    }

    let mut payouts: HashMap<&str, Vec<&Payout>> = HashMap::new();
    for payout in &data.payouts {
        payouts
            .entry(payout.influencer_id.as_str())
            .or_default()
            .push(payout);
    }

    let mut rows = Vec::new();
    for record in &data.tracking {
        let Some(matched) = influencers.get(record.influencer_id.as_str()) else {
            continue;
        };
        let Some(paid) = payouts.get(record.influencer_id.as_str()) else {
            continue;
        };
        for influencer in matched {
            for payout in paid {
                rows.push(joined_row(record, influencer, payout, orders));
            }
        }
    }

    tracing::debug!(
        filter = %filter,
        tracking = data.tracking.len(),
        merged = rows.len(),
        "Datasets merged"
    );
    rows
}

fn joined_row(
    record: &TrackingRecord,
    influencer: &Influencer,
    payout: &Payout,
    orders: Option<OrdersSource>,
) -> MergedRow {
    MergedRow {
        influencer_id: record.influencer_id.clone(),
        name: influencer.name.clone(),
        platform: influencer.platform.clone(),
        campaign: record.campaign.clone(),
        revenue: record.revenue,
        orders: match orders {
            Some(OrdersSource::Tracking) => record.orders,
            Some(OrdersSource::Payouts) => payout.orders,
            None => None,
        },
        total_payout: payout.total_payout,
        roas: record
            .revenue
            .zip(payout.total_payout)
            .and_then(|(revenue, paid)| roas(revenue, paid)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn influencer(id: &str, name: &str, platform: &str) -> Influencer {
        Influencer {
            id: id.into(),
            name: name.into(),
            platform: platform.into(),
            category: None,
            gender: None,
            follower_count: None,
        }
    }

    pub(crate) fn tracking(
        id: &str,
        campaign: &str,
        revenue: f64,
        orders: Option<f64>,
    ) -> TrackingRecord {
        TrackingRecord {
            influencer_id: id.into(),
            campaign: campaign.into(),
            revenue: Some(revenue),
            source: None,
            user_id: None,
            product: None,
            date: None,
            orders,
        }
    }

    pub(crate) fn payout(id: &str, total: f64) -> Payout {
        Payout {
            influencer_id: id.into(),
            total_payout: Some(total),
            basis: None,
            rate: None,
            orders: None,
        }
    }

    /// Three influencers over two platforms; INF3 has no payout row.
    pub(crate) fn sample() -> Datasets {
        Datasets {
            influencers: vec![
                influencer("INF1", "Asha", "Instagram"),
                influencer("INF2", "Ravi", "YouTube"),
                influencer("INF3", "Meera", "Instagram"),
            ],
            posts: vec![],
            tracking: vec![
                tracking("INF1", "Summer Whey", 4000.0, Some(4.0)),
                tracking("INF2", "Summer Whey", 900.0, Some(1.0)),
                tracking("INF1", "Monsoon Multivit", 1000.0, Some(2.0)),
                tracking("INF3", "Monsoon Multivit", 700.0, Some(1.0)),
                tracking("INF9", "Monsoon Multivit", 50.0, Some(1.0)),
            ],
            payouts: vec![payout("INF1", 2000.0), payout("INF2", 300.0)],
            tracking_has_orders: true,
            payouts_has_orders: false,
        }
    }

    #[test]
    fn test_filter_from_param() {
        assert_eq!(PlatformFilter::from_param(None), PlatformFilter::All);
        assert_eq!(PlatformFilter::from_param(Some("All")), PlatformFilter::All);
        assert_eq!(PlatformFilter::from_param(Some("")), PlatformFilter::All);
        assert_eq!(
            PlatformFilter::from_param(Some("YouTube")),
            PlatformFilter::Only("YouTube".into())
        );
        // Case-sensitive, like the platform values themselves.
        assert_eq!(
            PlatformFilter::from_param(Some("all")),
            PlatformFilter::Only("all".into())
        );
        // Whitespace is part of the value, so it matches no platform.
        assert_eq!(
            PlatformFilter::from_param(Some(" YouTube")),
            PlatformFilter::Only(" YouTube".into())
        );
        assert!(merge(&sample(), &PlatformFilter::from_param(Some(" YouTube"))).is_empty());
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let rows = merge(&sample(), &PlatformFilter::All);
        // INF3 has no payout and INF9 has no profile.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Asha");
        assert_eq!(rows[0].total_payout, Some(2000.0));
        assert_eq!(rows[0].orders, Some(4.0));
        assert_eq!(rows[0].roas, Some(2.0));
        assert_eq!(rows[1].name, "Ravi");
        assert_eq!(rows[2].campaign, "Monsoon Multivit");
    }

    #[test]
    fn test_platform_filter_applies_to_influencers() {
        let rows = merge(&sample(), &PlatformFilter::Only("YouTube".into()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].influencer_id, "INF2");

        let none = merge(&sample(), &PlatformFilter::Only("TikTok".into()));
        assert!(none.is_empty());
    }

    #[test]
    fn test_duplicate_payouts_multiply_rows() {
        let mut data = sample();
        data.payouts.push(payout("INF2", 150.0));
        let rows: Vec<_> = merge(&data, &PlatformFilter::All)
            .into_iter()
            .filter(|r| r.influencer_id == "INF2")
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_payout, Some(300.0));
        assert_eq!(rows[1].total_payout, Some(150.0));
        assert_eq!(rows[1].revenue, Some(900.0));
    }

    #[test]
    fn test_orders_taken_from_single_source() {
        let mut data = sample();
        data.tracking_has_orders = false;
        data.payouts_has_orders = true;
        data.payouts[1].orders = Some(6.0);
        let rows = merge(&data, &PlatformFilter::Only("YouTube".into()));
        assert_eq!(rows[0].orders, Some(6.0));

        data.tracking_has_orders = true;
        let rows = merge(&data, &PlatformFilter::All);
        assert!(rows.iter().all(|r| r.orders.is_none()));
    }

    #[test]
    fn test_blank_cells_leave_row_ratio_undefined() {
        let mut data = sample();
        data.tracking[0].revenue = None;
        data.payouts[1].total_payout = None;
        let rows = merge(&data, &PlatformFilter::All);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].revenue, None);
        assert_eq!(rows[0].roas, None);
        assert_eq!(rows[1].total_payout, None);
        assert_eq!(rows[1].roas, None);
        assert_eq!(rows[2].roas, Some(0.5));
    }
}
