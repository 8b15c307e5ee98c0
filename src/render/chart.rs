//! ASN ranking chart
//!
//! Groups nodes by ASN, ranks the groups by size and lays out one horizontal
//! bar per group. The layout is plain data; `to_svg` and `to_html` turn it
//! into markup for the chart container.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

use crate::model::{Asn, GeoFeature};
use crate::render::aggregate::{group_by_asn, rank_groups};
use crate::render::format::{escape_xml, group_thousands, number};
use crate::render::scale::{round_half_up, BandScale, LinearScale};

/// Pixel offset of axis lines, keeps one-pixel strokes crisp
const AXIS_OFFSET: f64 = 0.5;
const AXIS_TICK_SIZE: f64 = 6.0;
const AXIS_TICK_PADDING: f64 = 3.0;

/// Chart geometry and styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Id of the element the summary lines and chart are placed in
    pub container: String,
    pub width: f64,
    pub bar_height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub bar_fill: String,
    /// Bars shorter than this get their label drawn outside the bar
    pub short_bar_threshold: f64,
    pub label_offset: f64,
    pub thousands_separator: char,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            container: "chart".to_string(),
            width: 600.0,
            bar_height: 25.0,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 10.0,
            margin_left: 0.0,
            bar_fill: "#552cb7".to_string(),
            short_bar_threshold: 200.0,
            label_offset: 4.0,
            thousands_separator: '.',
        }
    }
}

impl ChartConfig {
    /// Total chart height for `groups` bars
    pub fn height(&self, groups: usize) -> f64 {
        // The extra tenth of a bar keeps the last band from being clipped.
        ((groups as f64 + 0.1) * self.bar_height).ceil() + self.margin_top + self.margin_bottom
    }
}

/// Totals shown above the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub nodes: usize,
    pub asns: usize,
    pub nodes_line: String,
    pub asns_line: String,
}

impl Summary {
    fn new(nodes: usize, asns: usize, separator: char) -> Self {
        Self {
            nodes,
            asns,
            nodes_line: format!("Number of nodes: {}", group_thousands(nodes, separator)),
            asns_line: format!("Number of ASN: {}", group_thousands(asns, separator)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub bandwidth: f64,
    /// Domain maximum of the value scale (largest group)
    pub max_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacement {
    /// Right-aligned inside the bar, white text
    Inside,
    /// Left-aligned just past the bar end, black text
    Outside,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub fill: &'static str,
    pub anchor: &'static str,
    pub placement: LabelPlacement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub asn: Asn,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: Label,
}

/// One category tick on the left axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub text: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Path of the axis domain line
    pub domain_path: String,
    pub ticks: Vec<Tick>,
}

/// A fully laid out chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub container: String,
    pub summary: Summary,
    pub layout: ChartLayout,
    pub bars: Vec<Bar>,
    pub axis: Axis,
    #[serde(skip)]
    bar_fill: String,
}

/// Group, rank and lay out the chart for `features`
pub fn render_chart(features: &[GeoFeature], config: &ChartConfig) -> Chart {
    let mut groups = group_by_asn(features);
    rank_groups(&mut groups);
    debug!("Charting {} ASN groups for {} nodes", groups.len(), features.len());

    let width = config.width;
    let height = config.height(groups.len());
    let max_count = groups.iter().map(|g| g.len()).max().unwrap_or(0);

    let x = LinearScale::new(
        (0.0, max_count as f64),
        (0.0, width - config.margin_left - config.margin_right),
    );
    let y = BandScale::new(
        groups.iter().map(|g| g.asn).collect(),
        (config.margin_top, height - config.margin_bottom),
    )
    .round(true)
    .padding(0.1);
    let bandwidth = y.bandwidth();

    let bars = groups
        .iter()
        .map(|group| {
            let count = group.len();
            let top = y.position(&group.asn).unwrap_or(config.margin_top);
            let length = x.scale(count as f64);
            let placement = if length - x.scale(0.0) < config.short_bar_threshold {
                LabelPlacement::Outside
            } else {
                LabelPlacement::Inside
            };
            let (dx, fill, anchor) = match placement {
                LabelPlacement::Inside => (-config.label_offset, "white", "end"),
                LabelPlacement::Outside => (config.label_offset, "black", "start"),
            };

            Bar {
                asn: group.asn.clone(),
                count,
                x: x.scale(0.0) + config.margin_left,
                y: top,
                width: length,
                height: bandwidth,
                label: Label {
                    text: format!("{} - {}", count, group.asn),
                    x: length + config.margin_left,
                    y: top + bandwidth / 2.0,
                    dx,
                    fill,
                    anchor,
                    placement,
                },
            }
        })
        .collect();

    let axis = left_axis(&y);

    Chart {
        container: config.container.clone(),
        summary: Summary::new(features.len(), groups.len(), config.thousands_separator),
        layout: ChartLayout {
            width,
            height,
            bandwidth,
            max_count,
        },
        bars,
        axis,
        bar_fill: config.bar_fill.clone(),
    }
}

fn left_axis(y: &BandScale<&Asn>) -> Axis {
    let (r0, r1) = y.range();
    let domain_path = format!(
        "M0,{}H{}V{}H0",
        number(r0 + AXIS_OFFSET),
        number(AXIS_OFFSET),
        number(r1 + AXIS_OFFSET)
    );

    // Ticks sit in the middle of their band
    let center = round_half_up((y.bandwidth() - AXIS_OFFSET * 2.0).max(0.0) / 2.0);
    let ticks = y
        .domain()
        .iter()
        .filter_map(|asn| {
            y.position(asn).map(|top| Tick {
                text: asn.to_string(),
                y: top + center + AXIS_OFFSET,
            })
        })
        .collect();

    Axis { domain_path, ticks }
}

impl Chart {
    /// Standalone SVG document for the chart
    pub fn to_svg(&self) -> String {
        let width = number(self.layout.width);
        let height = number(self.layout.height);
        let mut s = String::new();

        let _ = writeln!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0,0,{w},{h}" width="{w}" height="{h}" style="max-width: 100%; height: auto; min-height: 200px; font-size: 10px;">"#,
            w = width,
            h = height
        );

        let _ = writeln!(s, r#"  <g fill="{}">"#, escape_xml(&self.bar_fill));
        for bar in &self.bars {
            let _ = writeln!(
                s,
                r#"    <rect x="{}" y="{}" width="{}" height="{}"></rect>"#,
                number(bar.x),
                number(bar.y),
                number(bar.width),
                number(bar.height)
            );
        }
        s.push_str("  </g>\n");

        s.push_str("  <g fill=\"white\" text-anchor=\"end\">\n");
        for bar in &self.bars {
            let label = &bar.label;
            let style = match label.placement {
                LabelPlacement::Inside => String::new(),
                LabelPlacement::Outside => {
                    format!(r#" fill="{}" text-anchor="{}""#, label.fill, label.anchor)
                }
            };
            let _ = writeln!(
                s,
                r#"    <text x="{}" y="{}" dy="0.35em" dx="{}"{}>{}</text>"#,
                number(label.x),
                number(label.y),
                number(label.dx),
                style,
                escape_xml(&label.text)
            );
        }
        s.push_str("  </g>\n");

        s.push_str(
            "  <g style=\"font-size: 8px;\" transform=\"translate(0, 0)\" fill=\"none\" font-family=\"sans-serif\" text-anchor=\"end\">\n",
        );
        let _ = writeln!(
            s,
            r#"    <path class="domain" stroke="currentColor" d="{}"></path>"#,
            self.axis.domain_path
        );
        for tick in &self.axis.ticks {
            let _ = writeln!(
                s,
                r#"    <g class="tick" opacity="1" transform="translate(0,{})"><line stroke="currentColor" x2="{}"></line><text fill="currentColor" x="{}" dy="0.32em">{}</text></g>"#,
                number(tick.y),
                number(-AXIS_TICK_SIZE),
                number(-(AXIS_TICK_SIZE + AXIS_TICK_PADDING)),
                escape_xml(&tick.text)
            );
        }
        s.push_str("  </g>\n");
        s.push_str("</svg>\n");
        s
    }

    /// Summary paragraphs followed by the SVG, ready for the chart container
    pub fn to_html(&self) -> String {
        format!(
            "<p>{}</p>\n<p>{}</p>\n{}",
            escape_xml(&self.summary.nodes_line),
            escape_xml(&self.summary.asns_line),
            self.to_svg()
        )
    }
}
