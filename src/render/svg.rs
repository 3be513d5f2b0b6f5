use chrono::Datelike;
use std::fmt::Write;

use crate::{
    heatmap::{ColorTier, GridGeometry, HeatmapLayout},
    models::{ActivitySource, ProfileCard},
    utils::escape_xml,
};

const CARD_HEIGHT: u32 = 150;
const LEGEND_HEIGHT: u32 = 44;
const FONT_FAMILY: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Serializes a `ProfileCard` and its `HeatmapLayout` into one SVG document.
///
/// The layout decides every cell position; this only emits markup.
pub struct SvgRenderer;

impl SvgRenderer {
    /// Document size for `geometry`, `None` on `u32` overflow
    pub fn checked_canvas(geometry: GridGeometry) -> Option<(u32, u32)> {
        let (width, height) = geometry.checked_canvas()?;
        Some((
            width.checked_add(geometry.margin)?,
            height.checked_add(CARD_HEIGHT + LEGEND_HEIGHT)?,
        ))
    }

    pub fn canvas(layout: &HeatmapLayout) -> (u32, u32) {
        (
            layout.width + layout.geometry.margin,
            CARD_HEIGHT + layout.height + LEGEND_HEIGHT,
        )
    }

    pub fn render(card: &ProfileCard, layout: &HeatmapLayout) -> String {
        let (width, height) = Self::canvas(layout);
        let mut svg = String::with_capacity(64 * 1024);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{label}">"#,
            w = width,
            h = height,
            label = escape_xml(&format!("Profile card for {}", card.username)),
        );
        let _ = writeln!(
            svg,
            r##"<defs><linearGradient id="card-gradient" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="#5b3cc4"/><stop offset="100%" stop-color="#1f6feb"/></linearGradient></defs>"##
        );
        let _ = writeln!(
            svg,
            r##"<rect width="{}" height="{}" rx="10" fill="#0d1117"/>"##,
            width, height
        );

        Self::write_profile(&mut svg, card, width);
        Self::write_heatmap(&mut svg, layout);
        Self::write_legend(&mut svg, card, layout, width);

        svg.push_str("</svg>\n");
        svg
    }

    fn write_profile(svg: &mut String, card: &ProfileCard, width: u32) {
        let fields = &card.fields;
        let _ = writeln!(svg, r#"<g font-family="{}">"#, FONT_FAMILY);
        let _ = writeln!(
            svg,
            r#"<rect x="10" y="10" width="{}" height="{}" rx="8" fill="url(#card-gradient)"/>"#,
            width - 20,
            CARD_HEIGHT - 20
        );
        let _ = writeln!(
            svg,
            r##"<circle cx="66" cy="75" r="36" fill="#ffffff" fill-opacity="0.18"/><text x="66" y="87" text-anchor="middle" font-size="34" font-weight="700" fill="#ffffff">{}</text>"##,
            escape_xml(&card.initial())
        );
        let _ = writeln!(
            svg,
            r##"<text x="120" y="52" font-size="22" font-weight="700" fill="#ffffff">{}</text>"##,
            escape_xml(&card.username)
        );

        let stats = [
            ("Rating", fields.rating.as_str()),
            ("Highest", fields.highest_rating.as_str()),
            ("Global Rank", fields.global_rank.as_str()),
            ("Country Rank", fields.country_rank.as_str()),
        ];
        let column_width = (width.saturating_sub(150)) / stats.len() as u32;
        for (i, (label, value)) in stats.iter().enumerate() {
            let x = 120 + i as u32 * column_width;
            let _ = writeln!(
                svg,
                r##"<text x="{x}" y="92" font-size="11" fill="#ffffff" fill-opacity="0.75">{label}</text><text x="{x}" y="116" font-size="20" font-weight="600" fill="#ffffff">{value}</text>"##,
                x = x,
                label = label,
                value = escape_xml(value),
            );
        }
        svg.push_str("</g>\n");
    }

    fn write_heatmap(svg: &mut String, layout: &HeatmapLayout) {
        let geometry = layout.geometry;
        let _ = writeln!(
            svg,
            r##"<g transform="translate(0, {})" font-family="{}" font-size="9" fill="#8b949e">"##,
            CARD_HEIGHT, FONT_FAMILY
        );

        for (col, date) in layout.month_starts() {
            let (x, _) = geometry.origin(col, 0);
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}">{}</text>"#,
                x,
                geometry.margin.saturating_sub(6),
                MONTHS[date.month0() as usize]
            );
        }

        // Rows follow the first day's weekday, so label from the cells themselves
        for cell in layout.cells.iter().take(7).filter(|c| c.row % 2 == 1) {
            let (_, y) = geometry.origin(0, cell.row);
            let _ = writeln!(
                svg,
                r#"<text x="0" y="{}">{}</text>"#,
                y + geometry.cell - 2,
                cell.date.weekday()
            );
        }

        for cell in &layout.cells {
            let _ = writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="2" fill="{}"><title>{} on {}</title></rect>"#,
                cell.x,
                cell.y,
                cell.width,
                cell.height,
                cell.color(),
                cell.count,
                cell.date.format("%Y-%m-%d")
            );
        }
        svg.push_str("</g>\n");
    }

    fn write_legend(svg: &mut String, card: &ProfileCard, layout: &HeatmapLayout, width: u32) {
        let geometry = layout.geometry;
        let y = CARD_HEIGHT + layout.height + 14;
        let caption = match card.source {
            ActivitySource::Scraped => format!(
                "{} submissions on {} days in the last year",
                layout.total(),
                layout.active_days()
            ),
            ActivitySource::Fallback => "Sample activity (live data unavailable)".to_string(),
        };

        let _ = writeln!(
            svg,
            r##"<g font-family="{}" font-size="10" fill="#8b949e">"##,
            FONT_FAMILY
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}">{}</text>"#,
            geometry.margin,
            y + geometry.cell - 2,
            escape_xml(&caption)
        );

        let swatches = ColorTier::ALL.len() as u32;
        let swatch_start = width
            .saturating_sub(geometry.margin + 30 + swatches * geometry.pitch());
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="end">Less</text>"#,
            swatch_start.saturating_sub(4),
            y + geometry.cell - 2
        );
        for (i, tier) in ColorTier::ALL.iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="2" fill="{}"><title>{}</title></rect>"#,
                swatch_start + i as u32 * geometry.pitch(),
                y,
                geometry.cell,
                geometry.cell,
                tier.color(),
                tier.label()
            );
        }
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}">More</text>"#,
            swatch_start + swatches * geometry.pitch() + 2,
            y + geometry.cell - 2
        );
        svg.push_str("</g>\n");
    }
}
