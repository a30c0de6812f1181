use serde::{Deserialize, Serialize};

pub const FEVER_TICK_MS: u32 = 100;

/// Which pool the fever snapshot is taken from when the gauge fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeverSource {
    Favorites,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fever_threshold: u32,
    pub fever_duration_ms: u32,
    pub lookahead_depth: usize,
    pub default_weight: u32,
    pub fever_source: FeverSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fever_threshold: 10,
            fever_duration_ms: 60_000,
            lookahead_depth: 2,
            default_weight: 1,
            fever_source: FeverSource::Favorites,
        }
    }
}
