//! Influencer campaign reporting — dataset joins, ROAS, summary tables,
//! bar charts, and CSV exports.

pub mod chart;
pub mod dashboard;
pub mod export;
pub mod merge;
pub mod roas;
pub mod summary;

pub use chart::BarChart;
pub use dashboard::Dashboard;
pub use merge::{MergedRow, PlatformFilter};
pub use summary::{CampaignSummary, InfluencerSummary};
