pub mod fallback;
pub mod layout;
pub mod tiers;

pub use fallback::{generate_fallback_activity, SeededRng};
pub use layout::{Cell, DayGrid, GridGeometry, HeatmapLayout};
pub use tiers::ColorTier;
