//! CSV exports of the two summary tables.

use crate::summary::{CampaignSummary, InfluencerSummary};
use influencer_core::{DashboardError, DashboardResult};

pub const CSV_MIME: &str = "text/csv";
pub const TOP_INFLUENCERS_FILE: &str = "top_influencers.csv";
pub const CAMPAIGN_SUMMARY_FILE: &str = "campaign_summary.csv";

/// `name,revenue,total_payout,ROAS` with one row per influencer.
pub fn top_influencers_csv(table: &[InfluencerSummary]) -> DashboardResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_row(&mut writer, ["name", "revenue", "total_payout", "ROAS"])?;
    for row in table {
        write_row(
            &mut writer,
            [
                row.name.clone(),
                row.revenue.to_string(),
                row.total_payout.to_string(),
                cell(row.roas),
            ],
        )?;
    }
    finish(writer)
}

/// `campaign,revenue,total_payout[,orders],ROAS` with one row per campaign.
pub fn campaign_summary_csv(table: &[CampaignSummary], with_orders: bool) -> DashboardResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["campaign", "revenue", "total_payout"];
    if with_orders {
        header.push("orders");
    }
    header.push("ROAS");
    write_row(&mut writer, header)?;

    for row in table {
        let mut record = vec![
            row.campaign.clone(),
            row.revenue.to_string(),
            row.total_payout.to_string(),
        ];
        if with_orders {
            record.push(row.orders.map(|o| o.to_string()).unwrap_or_default());
        }
        record.push(cell(row.roas));
        write_row(&mut writer, record)?;
    }
    finish(writer)
}

/// Undefined ratios are an empty field; infinite ones print as `inf`.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_row<I, T>(writer: &mut csv::Writer<Vec<u8>>, record: I) -> DashboardResult<()>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    writer
        .write_record(record)
        .map_err(|e| DashboardError::Export(e.to_string()))
}

fn finish(writer: csv::Writer<Vec<u8>>) -> DashboardResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))
}
