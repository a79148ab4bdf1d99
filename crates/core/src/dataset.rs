//! CSV dataset loading for the four dashboard inputs.

use crate::config::DataConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::types::{Influencer, Payout, Post, RequiredColumns, TrackingRecord};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// Optional column summed into the campaign table when exactly one of the
/// joined files carries it.
pub const ORDERS_COLUMN: &str = "orders";

/// File whose `orders` column feeds the campaign table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdersSource {
    Tracking,
    Payouts,
}

/// All four inputs as read from disk in a single pass.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub influencers: Vec<Influencer>,
    pub posts: Vec<Post>,
    pub tracking: Vec<TrackingRecord>,
    pub payouts: Vec<Payout>,
    /// Whether `tracking_data.csv` carries an `orders` column.
    pub tracking_has_orders: bool,
    /// Whether `payouts.csv` carries an `orders` column.
    pub payouts_has_orders: bool,
}

/// Row counts per input, shown on the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetCounts {
    pub influencers: usize,
    pub posts: usize,
    pub tracking: usize,
    pub payouts: usize,
}

impl Datasets {
    /// Read every input file under `config.dir`.
    pub fn load(config: &DataConfig) -> DashboardResult<Self> {
        let (influencers, _) = read_table::<Influencer>(&config.influencers_path())?;
        let (posts, _) = read_table::<Post>(&config.posts_path())?;
        let (tracking, tracking_headers) = read_table::<TrackingRecord>(&config.tracking_path())?;
        let (payouts, payout_headers) = read_table::<Payout>(&config.payouts_path())?;

        let tracking_has_orders = tracking_headers.iter().any(|h| h == ORDERS_COLUMN);
        let payouts_has_orders = payout_headers.iter().any(|h| h == ORDERS_COLUMN);

        info!(
            dir = %config.dir.display(),
            influencers = influencers.len(),
            posts = posts.len(),
            tracking = tracking.len(),
            payouts = payouts.len(),
            tracking_has_orders,
            payouts_has_orders,
            "Datasets loaded"
        );

        Ok(Self {
            influencers,
            posts,
            tracking,
            payouts,
            tracking_has_orders,
            payouts_has_orders,
        })
    }

    /// The single `orders` column of the joined table, if any. When both
    /// files carry one the names collide and neither is summed.
    pub fn orders_source(&self) -> Option<OrdersSource> {
        match (self.tracking_has_orders, self.payouts_has_orders) {
            (true, false) => Some(OrdersSource::Tracking),
            (false, true) => Some(OrdersSource::Payouts),
            _ => None,
        }
    }

    /// Distinct influencer platforms in order of first appearance.
    pub fn platforms(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for influencer in &self.influencers {
            if !seen.contains(&influencer.platform) {
                seen.push(influencer.platform.clone());
            }
        }
        seen
    }

    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            influencers: self.influencers.len(),
            posts: self.posts.len(),
            tracking: self.tracking.len(),
            payouts: self.payouts.len(),
        }
    }
}

/// Deserialize every record of a headered CSV file, after checking that
/// the header carries the columns `T` needs. Returns the records and the
/// header names.
pub fn read_table<T>(path: &Path) -> DashboardResult<(Vec<T>, Vec<String>)>
where
    T: DeserializeOwned + RequiredColumns,
{
    let file = path.display().to_string();
    let csv_err = |source: csv::Error| DashboardError::Csv {
        file: file.clone(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    if let Some(missing) = T::COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        return Err(DashboardError::MissingColumn {
            file: file.clone(),
            column: missing.to_string(),
        });
    }

    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_err)?;

    debug!(file = %file, rows = records.len(), "Table read");
    Ok((records, headers))
}
