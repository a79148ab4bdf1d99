use serde::{Deserialize, Serialize};

/// Influencer profile, one row of `influencers.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    pub id: String,
    pub name: String,
    pub platform: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub follower_count: Option<f64>,
}

/// A published post, one row of `posts.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub influencer_id: String,
    pub platform: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub reach: Option<f64>,
    #[serde(default)]
    pub likes: Option<f64>,
    #[serde(default)]
    pub comments: Option<f64>,
}

/// Attributed conversion record, one row of `tracking_data.csv`.
///
/// Numeric cells are read as floats and a blank cell is `None`, so files
/// written by spreadsheet tools (`3.0`, empty revenue) still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub influencer_id: String,
    pub campaign: String,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub orders: Option<f64>,
}

/// Amount paid to an influencer, one row of `payouts.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub influencer_id: String,
    #[serde(default)]
    pub total_payout: Option<f64>,
    #[serde(default)]
    pub basis: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub orders: Option<f64>,
}

/// Columns a file must carry for its records to be built.
pub trait RequiredColumns {
    const COLUMNS: &'static [&'static str];
}

impl RequiredColumns for Influencer {
    const COLUMNS: &'static [&'static str] = &["id", "name", "platform"];
}

impl RequiredColumns for Post {
    const COLUMNS: &'static [&'static str] = &["influencer_id", "platform"];
}

impl RequiredColumns for TrackingRecord {
    const COLUMNS: &'static [&'static str] = &["influencer_id", "campaign", "revenue"];
}

impl RequiredColumns for Payout {
    const COLUMNS: &'static [&'static str] = &["influencer_id", "total_payout"];
}
