//! Bar chart specs and their inline SVG rendering.

use crate::summary::{CampaignSummary, InfluencerSummary};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Qualitative palette, cycled per category.
pub const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub const DEFAULT_HEIGHT: u32 = 400;

const VIEW_WIDTH: f64 = 800.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 96.0;
const MARGIN_LEFT: f64 = 80.0;
const TICKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    /// `None` draws no bar but keeps the category slot.
    pub value: Option<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub height: u32,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            height: DEFAULT_HEIGHT,
            bars: Vec::new(),
        }
    }

    /// Append a bar colored by its position in the category sequence.
    pub fn push(&mut self, label: &str, value: Option<f64>) {
        let color = PALETTE[self.bars.len() % PALETTE.len()];
        self.bars.push(Bar {
            label: label.to_string(),
            value: value.filter(|v| v.is_finite()),
            color: color.to_string(),
        });
    }

    /// "Influencer Revenue": one bar per influencer, highest revenue first.
    pub fn influencer_revenue(by_revenue: &[InfluencerSummary]) -> Self {
        let mut chart = Self::new("Influencer Revenue", "Influencer", "Revenue Earned");
        for row in by_revenue {
            chart.push(&row.name, Some(row.revenue));
        }
        chart
    }

    /// "ROAS per Campaign": one bar per campaign, in table order.
    pub fn campaign_roas(campaigns: &[CampaignSummary]) -> Self {
        let mut chart = Self::new("ROAS per Campaign", "Campaign", "Return on Ad Spend");
        for row in campaigns {
            chart.push(&row.campaign, row.roas);
        }
        chart
    }

    /// Render as a standalone `<svg>` element that stretches to its
    /// container width.
    pub fn to_svg(&self) -> String {
        let height = f64::from(self.height);
        let plot_w = VIEW_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
        let axis = Axis::fit(self.bars.iter().filter_map(|b| b.value));
        let y = |v: f64| MARGIN_TOP + (axis.max - v) / (axis.max - axis.min) * plot_h;

        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg class=\"chart\" xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{title}\">",
            w = VIEW_WIDTH,
            h = self.height,
            title = escape(&self.title),
        );
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"24\" font-size=\"16\" font-weight=\"bold\">{}</text>",
            MARGIN_LEFT,
            escape(&self.title)
        );

        // Gridlines and y tick labels.
        for i in 0..=TICKS {
            let v = axis.min + axis.step * i as f64;
            if v > axis.max + axis.step / 2.0 {
                break;
            }
            let ty = y(v);
            let _ = write!(
                svg,
                "<line x1=\"{x1}\" x2=\"{x2}\" y1=\"{ty:.1}\" y2=\"{ty:.1}\" stroke=\"#e5e5e5\"/>\
                 <text x=\"{tx}\" y=\"{ly:.1}\" font-size=\"11\" text-anchor=\"end\">{label}</text>",
                x1 = MARGIN_LEFT,
                x2 = MARGIN_LEFT + plot_w,
                tx = MARGIN_LEFT - 6.0,
                ly = ty + 4.0,
                label = format_number(v),
            );
        }

        if !self.bars.is_empty() {
            let slot = plot_w / self.bars.len() as f64;
            let bar_w = slot * 0.8;
            let zero = y(0.0);
            for (i, bar) in self.bars.iter().enumerate() {
                let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
                let cx = x + bar_w / 2.0;
                if let Some(value) = bar.value {
                    let top = y(value).min(zero);
                    let h = (y(value) - zero).abs();
                    let _ = write!(
                        svg,
                        "<rect x=\"{x:.1}\" y=\"{top:.1}\" width=\"{bar_w:.1}\" height=\"{h:.1}\" fill=\"{fill}\"><title>{label}: {value}</title></rect>",
                        fill = bar.color,
                        label = escape(&bar.label),
                        value = format_number(value),
                    );
                }
                let ly = MARGIN_TOP + plot_h + 14.0;
                let _ = write!(
                    svg,
                    "<text x=\"{cx:.1}\" y=\"{ly:.1}\" font-size=\"11\" text-anchor=\"end\" transform=\"rotate(-35 {cx:.1} {ly:.1})\">{}</text>",
                    escape(&bar.label)
                );
            }
        }

        let _ = write!(
            svg,
            "<line x1=\"{x}\" x2=\"{x}\" y1=\"{top}\" y2=\"{bottom}\" stroke=\"#444\"/>\
             <line x1=\"{x}\" x2=\"{right}\" y1=\"{bottom}\" y2=\"{bottom}\" stroke=\"#444\"/>",
            x = MARGIN_LEFT,
            top = MARGIN_TOP,
            bottom = MARGIN_TOP + plot_h,
            right = MARGIN_LEFT + plot_w,
        );
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\">{}</text>",
            MARGIN_LEFT + plot_w / 2.0,
            height - 6.0,
            escape(&self.x_label)
        );
        let _ = write!(
            svg,
            "<text x=\"16\" y=\"{my}\" font-size=\"12\" text-anchor=\"middle\" transform=\"rotate(-90 16 {my})\">{}</text>",
            escape(&self.y_label),
            my = MARGIN_TOP + plot_h / 2.0,
        );
        svg.push_str("</svg>");
        svg
    }
}

/// Y-axis range rounded out to whole tick steps, always including zero.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    min: f64,
    max: f64,
    step: f64,
}

impl Axis {
    fn fit(values: impl Iterator<Item = f64>) -> Self {
        let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if hi - lo <= 0.0 {
            return Self {
                min: 0.0,
                max: 1.0,
                step: 0.2,
            };
        }
        let step = nice_step((hi - lo) / TICKS as f64);
        Self {
            min: (lo / step).floor() * step,
            max: (hi / step).ceil() * step,
            step,
        }
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10_f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Escape text for inclusion in HTML or SVG markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
