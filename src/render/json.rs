use chrono::NaiveDate;

use crate::{
    heatmap::{generate_fallback_activity, GridGeometry, HeatmapLayout},
    models::Result,
};

/// Pretty-printed JSON form of a layout, for tooling that draws its own cells
pub fn layout_json(layout: &HeatmapLayout) -> Result<String> {
    Ok(serde_json::to_string_pretty(layout)?)
}

/// Layout JSON of the fallback activity generated for `username`
pub fn fallback_layout_json(username: &str, today: NaiveDate, geometry: GridGeometry) -> Result<String> {
    let activity = generate_fallback_activity(username, today);
    layout_json(&HeatmapLayout::compute(&activity, today, geometry))
}
