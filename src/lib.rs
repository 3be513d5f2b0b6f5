pub mod models;
pub mod config;
pub mod heatmap;
pub mod upstream;
pub mod card;
pub mod render;
pub mod server;
pub mod utils;

pub use models::{ActivityMap, ActivitySource, CardError, FieldValue, ProfileCard, ProfileFields, Result};
pub use config::Settings;
pub use heatmap::{generate_fallback_activity, ColorTier, GridGeometry, HeatmapLayout};
pub use card::{CardBuilder, Clock};
