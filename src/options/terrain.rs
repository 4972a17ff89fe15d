use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Height-map terrain and scan-line animation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Terrain", inline)]
#[serde(default)]
pub struct TerrainOptions {
    /// Seconds for the scan line to sweep across the terrain once.
    #[schemars(title = "Scan Duration", range(min = 0.25, max = 10.0), extend("step" = 0.25))]
    pub scan_duration: f32,
    /// Vertical scale applied to raw height samples.
    #[schemars(skip)]
    pub vertical_scale: f32,
    /// Scan-line half width for vertical sweeps (normalized units).
    #[schemars(skip)]
    pub vertical_scan_width: f32,
    /// Scan-line half width for horizontal sweeps (normalized units).
    #[schemars(skip)]
    pub horizontal_scan_width: f32,
    /// Samples along each side of the generated height map.
    #[schemars(skip)]
    pub resolution: u32,
}

impl Default for TerrainOptions {
    fn default() -> Self {
        Self {
            scan_duration: 2.0,
            vertical_scale: 0.25,
            vertical_scan_width: 0.04,
            horizontal_scan_width: 0.02,
            resolution: 128,
        }
    }
}
