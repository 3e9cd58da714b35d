//! Defaults for new text items and backends.

use serde::{Deserialize, Serialize};

pub const BASE_FONT_SIZE: f32 = 12.0;
/// Leading as a multiple of font size when a style leaves it unset.
pub const LEADING_RATIO: f32 = 1.2;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_MEASURE_CACHE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub font_family: String,
    pub font_weight: u16,
    pub font_size: f32,
    pub leading_ratio: f32,
    /// Entries kept by the measurement cache of `CosmicBackend`.
    pub measure_cache_capacity: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: 400,
            font_size: BASE_FONT_SIZE,
            leading_ratio: LEADING_RATIO,
            measure_cache_capacity: DEFAULT_MEASURE_CACHE,
        }
    }
}
