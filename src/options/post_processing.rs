use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// Accepted blur sigma range, matching the panel slider.
const BLUR_SIGMA_RANGE: std::ops::RangeInclusive<f32> = 0.5..=8.0;

/// Full-screen filter parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
pub struct PostProcessingOptions {
    /// Gaussian blur coefficient (standard deviation in texels).
    #[schemars(title = "Blur Sigma", range(min = 0.5, max = 8.0), extend("step" = 0.1))]
    pub blur_sigma: f32,
    /// Clear colour of the back buffer and capture targets.
    #[schemars(skip)]
    pub clear_color: [f32; 4],
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            blur_sigma: 2.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl PostProcessingOptions {
    /// Reject a blur sigma outside `0.5..=8.0`.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::OptionsParse`] naming the offending value.
    pub fn validate(&self) -> Result<(), GalleryError> {
        if !BLUR_SIGMA_RANGE.contains(&self.blur_sigma) {
            return Err(GalleryError::OptionsParse(format!(
                "post_processing.blur_sigma {} outside {}..={}",
                self.blur_sigma,
                BLUR_SIGMA_RANGE.start(),
                BLUR_SIGMA_RANGE.end()
            )));
        }
        Ok(())
    }
}
