pub mod json;
pub mod svg;

pub use json::{fallback_layout_json, layout_json};
pub use svg::SvgRenderer;

use crate::{
    heatmap::{GridGeometry, HeatmapLayout},
    models::ProfileCard,
};

/// Lay out the card's activity and serialize everything as SVG
pub fn render_card_svg(card: &ProfileCard, geometry: GridGeometry) -> String {
    let layout = HeatmapLayout::compute(&card.activity, card.today, geometry);
    SvgRenderer::render(card, &layout)
}
