//! Server-rendered HTML dashboard.

use crate::rest::{build_dashboard, AppState, PlatformQuery};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use influencer_reporting::chart::escape;
use influencer_reporting::export::{CAMPAIGN_SUMMARY_FILE, TOP_INFLUENCERS_FILE};
use influencer_reporting::{Dashboard, PlatformFilter};
use std::fmt::Write;

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif;color:#262730}\
.layout{display:flex;min-height:100vh}\
aside{width:240px;padding:24px;background:#f0f2f6}\
main{flex:1;padding:24px 48px;min-width:0}\
table{border-collapse:collapse;margin-bottom:8px}\
th,td{border:1px solid #e6e9ef;padding:4px 12px;text-align:right}\
th:first-child,td:first-child{text-align:left}\
.counts{color:#808495;font-size:13px}\
.download{display:inline-block;margin:4px 8px 4px 0;padding:6px 14px;border:1px solid #d0d3da;border-radius:6px;color:inherit;text-decoration:none}";

/// GET / — Full dashboard for the selected platform.
pub async fn handle_index(
    State(state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    match build_dashboard(&state, query.filter()).await {
        Ok(dashboard) => {
            metrics::counter!("dashboard.renders").increment(1);
            Ok(Html(render(&state.title, &dashboard)))
        }
        Err((status, body)) => Err((status, Html(render_error(&state.title, &body.message)))),
    }
}

/// Dashboard page: sidebar filter, two tables, two charts, two downloads.
pub fn render(title: &str, dashboard: &Dashboard) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
         <title>Influencer Campaign Dashboard</title><style>{STYLE}</style></head><body><div class=\"layout\">"
    );

    html.push_str("<aside><h2>🔍 Filters</h2><form method=\"get\" action=\"/\">");
    html.push_str("<label for=\"platform\">Select Platform</label><br/>");
    html.push_str("<select id=\"platform\" name=\"platform\" onchange=\"this.form.submit()\">");
    for platform in &dashboard.platforms {
        let selected = if platform == dashboard.selected.label() {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<option value=\"{v}\"{selected}>{v}</option>",
            v = escape(platform)
        );
    }
    html.push_str("</select><noscript><button type=\"submit\">Apply</button></noscript></form></aside>");

    let _ = write!(html, "<main><h1>📊 {}</h1>", escape(title));
    let counts = dashboard.counts;
    let _ = write!(
        html,
        "<p class=\"counts\">{} influencers · {} posts · {} tracking records · {} payouts · generated {}</p>",
        counts.influencers,
        counts.posts,
        counts.tracking,
        counts.payouts,
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    html.push_str("<h3>🏆 Top Influencers by ROAS</h3>");
    let rows: Vec<Vec<String>> = dashboard
        .top_influencers
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                money(r.revenue),
                money(r.total_payout),
                ratio(r.roas),
            ]
        })
        .collect();
    table(&mut html, &["name", "revenue", "total_payout", "ROAS"], &rows);

    html.push_str("<h3>📈 Campaign Performance</h3>");
    let mut columns = vec!["campaign", "revenue", "total_payout"];
    if dashboard.has_orders {
        columns.push("orders");
    }
    columns.push("ROAS");
    let rows: Vec<Vec<String>> = dashboard
        .campaigns
        .iter()
        .map(|c| {
            let mut row = vec![c.campaign.clone(), money(c.revenue), money(c.total_payout)];
            if dashboard.has_orders {
                row.push(c.orders.map(|o| o.to_string()).unwrap_or_default());
            }
            row.push(ratio(c.roas));
            row
        })
        .collect();
    table(&mut html, &columns, &rows);

    html.push_str("<h3>💰 Revenue by Influencers</h3>");
    html.push_str(&dashboard.revenue_chart.to_svg());
    html.push_str("<h3>📊 ROAS by Campaign</h3>");
    html.push_str(&dashboard.roas_chart.to_svg());

    html.push_str("<h3>📤 Export Data</h3>");
    let query = platform_query(&dashboard.selected);
    let _ = write!(
        html,
        "<a class=\"download\" href=\"/v1/export/{TOP_INFLUENCERS_FILE}{q}\" download=\"{TOP_INFLUENCERS_FILE}\">⬇️ Download Top Influencers (CSV)</a>\
         <a class=\"download\" href=\"/v1/export/{CAMPAIGN_SUMMARY_FILE}{q}\" download=\"{CAMPAIGN_SUMMARY_FILE}\">⬇️ Download Campaign Summary (CSV)</a>",
        q = escape(&query),
    );

    html.push_str("</main></div></body></html>");
    html
}

pub fn render_error(title: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Influencer Campaign Dashboard</title><style>{STYLE}</style></head>\
         <body><main><h1>📊 {}</h1><p><strong>Could not load campaign data.</strong></p><pre>{}</pre></main></body></html>",
        escape(title),
        escape(message),
    )
}

fn table(html: &mut String, columns: &[&str], rows: &[Vec<String>]) {
    html.push_str("<table><thead><tr>");
    for col in columns {
        let _ = write!(html, "<th>{}</th>", escape(col));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
}

/// `?platform=...` for export links, empty when nothing is filtered.
fn platform_query(filter: &PlatformFilter) -> String {
    match filter {
        PlatformFilter::All => String::new(),
        PlatformFilter::Only(platform) => {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("platform", platform)
                .finish();
            format!("?{encoded}")
        }
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Two decimals; a zero payout shows as `inf`, `0 / 0` as `n/a`.
fn ratio(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".to_string())
}
