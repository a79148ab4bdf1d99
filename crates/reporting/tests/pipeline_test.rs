//! End-to-end pass over CSV files on disk: load, merge, summarize, export.

use influencer_core::config::DataConfig;
use influencer_reporting::{Dashboard, PlatformFilter};
use std::fs;
use tempfile::TempDir;

const PAYOUTS: &str = "influencer_id,basis,rate,total_payout\n\
                       1,post,2500,2500\n\
                       2,order,150,900\n\
                       3,post,1000,1000\n";

fn write_campaign_files(dir: &TempDir, tracking_header: &str, tracking_rows: &[&str]) -> DataConfig {
    write_campaign_files_with_payouts(dir, tracking_header, tracking_rows, PAYOUTS)
}

fn write_campaign_files_with_payouts(
    dir: &TempDir,
    tracking_header: &str,
    tracking_rows: &[&str],
    payouts: &str,
) -> DataConfig {
    fs::write(
        dir.path().join("influencers.csv"),
        "id,name,category,gender,follower_count,platform\n\
         1,Asha Rao,Fitness,F,120000,Instagram\n\
         2,Ravi Kumar,Nutrition,M,80000,YouTube\n\
         3,Meera Iyer,Fitness,F,45000,Instagram\n\
         4,Dev Shah,Wellness,M,30000,Twitter\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("posts.csv"),
        "influencer_id,platform,date,url,caption,reach,likes,comments\n\
         1,Instagram,2025-06-01,https://ig.example/p/1,Whey launch,50000,4000,120\n\
         2,YouTube,2025-06-04,https://yt.example/v/9,Multivitamin review,20000,900,40\n",
    )
    .unwrap();

    let mut tracking = String::from(tracking_header);
    tracking.push('\n');
    for row in tracking_rows {
        tracking.push_str(row);
        tracking.push('\n');
    }
    fs::write(dir.path().join("tracking_data.csv"), tracking).unwrap();

    fs::write(dir.path().join("payouts.csv"), payouts).unwrap();

    DataConfig::default().with_dir(dir.path())
}

#[test]
fn test_full_pipeline_with_orders() {
    let dir = TempDir::new().unwrap();
    let config = write_campaign_files(
        &dir,
        "source,campaign,influencer_id,user_id,product,date,orders,revenue",
        &[
            "instagram,Summer Whey,1,U1,Whey,2025-06-02,3,6000",
            "youtube,Summer Whey,2,U2,Multivitamin,2025-06-05,4,3600",
            "youtube,Monsoon Immunity,2,U3,Multivitamin,2025-07-01,2,1800",
            "instagram,Monsoon Immunity,3,U4,Ashwagandha,2025-07-03,1,500",
            "twitter,Monsoon Immunity,4,U5,Ashwagandha,2025-07-03,1,700",
        ],
    );

    let dashboard = Dashboard::load(&config, PlatformFilter::All).unwrap();
    assert_eq!(dashboard.platforms, vec!["All", "Instagram", "YouTube", "Twitter"]);
    assert_eq!(dashboard.counts.posts, 2);
    // Dev Shah has no payout row and drops out of the join.
    assert_eq!(dashboard.merged_rows, 4);

    let top = &dashboard.top_influencers;
    assert_eq!(top.len(), 3);
    // Ravi: 5400 / 1800 = 3.0, Asha: 6000 / 2500 = 2.4, Meera: 0.5
    assert_eq!(top[0].name, "Ravi Kumar");
    assert_eq!(top[0].total_payout, 1800.0);
    assert_eq!(top[0].roas, Some(3.0));
    assert_eq!(top[1].name, "Asha Rao");
    assert_eq!(top[2].name, "Meera Iyer");

    let campaigns = String::from_utf8(dashboard.campaign_summary_csv().unwrap()).unwrap();
    let lines: Vec<&str> = campaigns.lines().collect();
    assert_eq!(lines[0], "campaign,revenue,total_payout,orders,ROAS");
    assert!(lines[1].starts_with("Monsoon Immunity,2300,1900,3,1.2105"));
    assert!(lines[2].starts_with("Summer Whey,9600,3400,7,2.8235"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_pipeline_platform_filter_and_missing_orders() {
    let dir = TempDir::new().unwrap();
    let config = write_campaign_files(
        &dir,
        "campaign,influencer_id,revenue",
        &[
            "Summer Whey,1,6000",
            "Summer Whey,2,3600",
            "Monsoon Immunity,3,500",
        ],
    );

    let dashboard = Dashboard::load(&config, PlatformFilter::Only("Instagram".into())).unwrap();
    assert!(!dashboard.has_orders);
    assert_eq!(dashboard.top_influencers.len(), 2);
    assert!(dashboard.campaigns.iter().all(|c| c.orders.is_none()));
    assert_eq!(dashboard.revenue_chart.bars[0].label, "Asha Rao");

    let top = String::from_utf8(dashboard.top_influencers_csv().unwrap()).unwrap();
    assert_eq!(top, "name,revenue,total_payout,ROAS\nAsha Rao,6000,2500,2.4\nMeera Iyer,500,1000,0.5\n");
}

#[test]
fn test_pipeline_orders_from_payouts_file() {
    let dir = TempDir::new().unwrap();
    let config = write_campaign_files_with_payouts(
        &dir,
        "campaign,influencer_id,revenue",
        &["Summer Whey,1,6000", "Summer Whey,2,3600"],
        "influencer_id,basis,rate,orders,total_payout\n\
         1,post,2500,,2500\n\
         2,order,150,6,900\n",
    );

    let dashboard = Dashboard::load(&config, PlatformFilter::All).unwrap();
    assert!(dashboard.has_orders);
    let campaigns = String::from_utf8(dashboard.campaign_summary_csv().unwrap()).unwrap();
    let lines: Vec<&str> = campaigns.lines().collect();
    assert_eq!(lines[0], "campaign,revenue,total_payout,orders,ROAS");
    assert!(lines[1].starts_with("Summer Whey,9600,3400,6,2.8235"));
}

#[test]
fn test_pipeline_orders_in_both_files_is_dropped() {
    let dir = TempDir::new().unwrap();
    let config = write_campaign_files_with_payouts(
        &dir,
        "campaign,influencer_id,orders,revenue",
        &["Summer Whey,1,3,6000"],
        "influencer_id,orders,total_payout\n1,3,2500\n",
    );

    let dashboard = Dashboard::load(&config, PlatformFilter::All).unwrap();
    assert!(!dashboard.has_orders);
    let campaigns = String::from_utf8(dashboard.campaign_summary_csv().unwrap()).unwrap();
    assert!(campaigns.starts_with("campaign,revenue,total_payout,ROAS\n"));
}

#[test]
fn test_pipeline_tolerates_blank_and_float_cells() {
    let dir = TempDir::new().unwrap();
    let config = write_campaign_files(
        &dir,
        "campaign,influencer_id,orders,revenue",
        &["Summer Whey,1,3.0,6000", "Summer Whey,2,2.0,", "Monsoon Immunity,3,,500"],
    );

    let dashboard = Dashboard::load(&config, PlatformFilter::All).unwrap();
    assert_eq!(dashboard.merged_rows, 3);
    let ravi = dashboard
        .top_influencers
        .iter()
        .find(|r| r.name == "Ravi Kumar")
        .unwrap();
    assert_eq!(ravi.revenue, 0.0);
    assert_eq!(ravi.roas, Some(0.0));

    let campaigns = String::from_utf8(dashboard.campaign_summary_csv().unwrap()).unwrap();
    let lines: Vec<&str> = campaigns.lines().collect();
    assert_eq!(lines[1], "Monsoon Immunity,500,1000,0,0.5");
    assert!(lines[2].starts_with("Summer Whey,6000,3400,5,1.7647"));
}

#[test]
fn test_pipeline_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = DataConfig::default().with_dir(dir.path());
    let err = Dashboard::load(&config, PlatformFilter::All).unwrap_err();
    assert!(err.to_string().contains("influencers.csv"));
}
