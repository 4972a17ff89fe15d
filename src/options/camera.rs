use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbit camera projection and control parameters.
///
/// Read once when the camera is constructed; changing them afterwards has
/// no effect on an existing camera.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Radians of yaw/pitch per pixel of pointer travel.
    #[schemars(title = "Orbit Sensitivity", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub orbit_sensitivity: f32,
    /// Distance change per unit of scroll travel.
    #[schemars(title = "Zoom Scale", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub zoom_scale: f32,
    /// Closest allowed orbit distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed orbit distance.
    #[schemars(skip)]
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 1.0,
            zfar: 500.0,
            orbit_sensitivity: 0.01,
            zoom_scale: 0.01,
            min_distance: 10.0,
            max_distance: 500.0,
        }
    }
}

impl CameraOptions {
    /// Reject values the orbit camera cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::OptionsParse`] for a non-finite value, a
    /// field of view outside `(0, 180)` degrees, clip planes that are not
    /// `0 < znear < zfar`, a non-positive sensitivity or distance, or
    /// `min_distance > max_distance`.
    pub fn validate(&self) -> Result<(), GalleryError> {
        let fields = [
            ("fovy", self.fovy),
            ("znear", self.znear),
            ("zfar", self.zfar),
            ("orbit_sensitivity", self.orbit_sensitivity),
            ("zoom_scale", self.zoom_scale),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("camera.{name} must be positive, got {value}")));
            }
        }
        if self.fovy >= 180.0 {
            return Err(invalid(format!("camera.fovy {} is not below 180", self.fovy)));
        }
        if self.znear >= self.zfar {
            return Err(invalid(format!(
                "camera.znear {} is not below zfar {}",
                self.znear, self.zfar
            )));
        }
        if self.min_distance > self.max_distance {
            return Err(invalid(format!(
                "camera.min_distance {} exceeds max_distance {}",
                self.min_distance, self.max_distance
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> GalleryError {
    GalleryError::OptionsParse(msg)
}
