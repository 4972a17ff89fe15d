use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debug visualization toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Debug", inline)]
#[serde(default)]
pub struct DebugOptions {
    /// Draw the world-space box of every culling-tested model.
    #[schemars(title = "Show Bounding Boxes")]
    pub show_bounding_boxes: bool,
    /// Log culled/total counts every frame at debug level.
    #[schemars(skip)]
    pub log_cull_stats: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            show_bounding_boxes: true,
            log_cull_stats: false,
        }
    }
}
