use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Layout of the frustum-culling hedgerow scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Culling", inline)]
#[serde(default)]
pub struct CullingOptions {
    /// Number of models in the row (at least 2 for the oscillating layout).
    #[schemars(title = "Model Count", range(min = 2, max = 64))]
    pub count: usize,
    /// Width of the row at rest.
    #[schemars(skip)]
    pub total_width: f32,
    /// Extra spacing per gap at the peak of the oscillation.
    #[schemars(title = "Amplitude", range(min = 0.0, max = 100.0), extend("step" = 1.0))]
    pub amplitude: f32,
    /// Oscillations per second.
    #[schemars(title = "Frequency", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub frequency: f32,
    /// Uniform scale of each model in the row.
    #[schemars(skip)]
    pub model_scale: f32,
}

impl Default for CullingOptions {
    fn default() -> Self {
        Self {
            count: 9,
            total_width: 160.0,
            amplitude: 30.0,
            frequency: 0.5,
            model_scale: 0.5,
        }
    }
}
