use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;
use std::time::Duration;

use crate::{heatmap::GridGeometry, render::SvgRenderer, upstream::profile_base_url};

/// Largest rendered width or height the heatmap settings may produce
pub const MAX_CANVAS_EXTENT: u32 = 10_000;

/// Placeholder substituted with the encoded username in the upstream URL
pub const USER_PLACEHOLDER: &str = "{user}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub heatmap: HeatmapSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub profile_url_template: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapSettings {
    pub cell_size: u32,
    pub gap: u32,
    pub margin: u32,
    /// Scraped activity with fewer active days than this is replaced by the fallback
    pub min_active_days: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub s_maxage_seconds: u64,
    pub stale_while_revalidate_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "CP Card".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            upstream: UpstreamSettings {
                profile_url_template: "https://www.codechef.com/users/{user}".to_string(),
                timeout_seconds: 5,
                user_agent: concat!("cp-card/", env!("CARGO_PKG_VERSION")).to_string(),
            },
            heatmap: HeatmapSettings {
                cell_size: 12,
                gap: 4,
                margin: 20,
                min_active_days: 5,
            },
            cache: CacheSettings {
                s_maxage_seconds: 300,
                stale_while_revalidate_seconds: 600,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("CP_CARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn grid_geometry(&self) -> GridGeometry {
        GridGeometry {
            cell: self.heatmap.cell_size,
            gap: self.heatmap.gap,
            margin: self.heatmap.margin,
        }
    }

    /// Value of the `Cache-Control` header sent with every rendered card
    pub fn cache_control(&self) -> String {
        format!(
            "public, max-age=0, s-maxage={}, stale-while-revalidate={}",
            self.cache.s_maxage_seconds, self.cache.stale_while_revalidate_seconds
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        profile_base_url(&self.upstream.profile_url_template).map_err(|e| e.to_string())?;

        if self.upstream.timeout_seconds == 0 {
            return Err("Upstream timeout must be at least one second".to_string());
        }

        if self.heatmap.cell_size == 0 || self.heatmap.gap == 0 || self.heatmap.margin == 0 {
            return Err("Heatmap cell size, gap and margin must be non-zero".to_string());
        }

        match SvgRenderer::checked_canvas(self.grid_geometry()) {
            Some((width, height)) if width <= MAX_CANVAS_EXTENT && height <= MAX_CANVAS_EXTENT => {}
            _ => {
                return Err(format!(
                    "Heatmap geometry exceeds the {}px canvas limit",
                    MAX_CANVAS_EXTENT
                ))
            }
        }

        Ok(())
    }
}
