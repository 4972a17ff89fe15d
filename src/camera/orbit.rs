use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use super::frustum::Frustum;
use crate::options::CameraOptions;

/// Orbit angles closer than this to the poles are clamped.
const PITCH_MARGIN: f32 = 0.01;

/// Eye distances below this are treated as sitting on the pivot.
const DEGENERATE_DISTANCE: f32 = 1e-4;

/// Perspective camera that orbits the origin.
///
/// Eye and target drive the view matrix directly; yaw, pitch and distance
/// describe the same eye in spherical coordinates but are only brought back
/// in line with it by [`sync_orbit_to_camera`](Self::sync_orbit_to_camera)
/// or by the orbit mutators themselves. `set_eye`/`set_gaze` leave them
/// untouched.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    eye: Vec3,
    target: Vec3,
    view: Mat4,
    projection: Mat4,

    yaw: f32,
    pitch: f32,
    distance: f32,

    default_eye: Vec3,
    default_target: Vec3,
    aspect: f32,

    fovy: f32,
    znear: f32,
    zfar: f32,
    sensitivity: f32,
    zoom_scale: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitCamera {
    /// Create a camera at `eye` looking at `target`.
    ///
    /// The aspect ratio and projection parameters are fixed for the
    /// lifetime of the camera. The camera starts in its reset state with
    /// orbit parameters derived from `eye`.
    pub fn new(
        eye: Vec3,
        target: Vec3,
        aspect: f32,
        options: &CameraOptions,
    ) -> Self {
        let (min_distance, max_distance) =
            distance_range(options.min_distance, options.max_distance);
        let mut camera = Self {
            eye,
            target,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            yaw: 0.0,
            pitch: 0.0,
            distance: 0.0,
            default_eye: eye,
            default_target: target,
            aspect,
            fovy: options.fovy.to_radians(),
            znear: options.znear,
            zfar: options.zfar,
            sensitivity: options.orbit_sensitivity,
            zoom_scale: options.zoom_scale,
            min_distance,
            max_distance,
        };
        camera.reset();
        camera
    }

    /// Eye position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Look-at target in world space.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current view matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Current projection matrix.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Combined projection * view.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Frustum of the current view and projection.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(self.view_projection())
    }

    /// Orbit yaw in radians, measured from +Z toward +X.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Orbit pitch in radians, elevation above the XZ plane.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Orbit distance from the origin.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Eye position restored by [`reset`](Self::reset).
    #[must_use]
    pub fn default_eye(&self) -> Vec3 {
        self.default_eye
    }

    /// Aspect ratio fixed at construction.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Far clipping plane distance.
    #[must_use]
    pub fn zfar(&self) -> f32 {
        self.zfar
    }

    /// Move the eye and rebuild the view. With `make_default` the new eye
    /// also becomes the one restored by [`reset`](Self::reset).
    pub fn set_eye(&mut self, eye: Vec3, make_default: bool) {
        self.eye = eye;
        self.update();
        if make_default {
            self.default_eye = eye;
        }
    }

    /// Move the look-at target and rebuild the view. With `make_default` the
    /// new target also becomes the one restored by [`reset`](Self::reset).
    pub fn set_gaze(&mut self, target: Vec3, make_default: bool) {
        self.target = target;
        self.update();
        if make_default {
            self.default_target = target;
        }
    }

    /// Rebuild the view matrix from the current eye and target.
    pub fn update(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
    }

    /// Restore the default eye and target, rebuild the projection and
    /// re-derive the orbit parameters.
    pub fn reset(&mut self) {
        self.set_gaze(self.default_target, false);
        self.set_eye(self.default_eye, false);
        self.projection =
            Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        self.sync_orbit_to_camera();
    }

    /// Derive yaw, pitch and distance from the current eye position.
    pub fn sync_orbit_to_camera(&mut self) {
        self.distance = self.eye.length();
        if self.distance < DEGENERATE_DISTANCE {
            self.yaw = 0.0;
            self.pitch = 0.0;
        } else {
            let dir = self.eye / self.distance;
            self.yaw = dir.x.atan2(dir.z);
            self.pitch = dir.y.clamp(-1.0, 1.0).asin();
        }
    }

    /// Set the orbit parameters directly and aim at the origin.
    pub fn set_orbit(&mut self, yaw: f32, pitch: f32, distance: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.distance = distance;
        self.apply_orbit();
    }

    /// Orbit by a pointer delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let max_pitch = FRAC_PI_2 - PITCH_MARGIN;
        self.yaw -= dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity)
            .clamp(-max_pitch, max_pitch);
        self.apply_orbit();
    }

    /// Move toward (positive) or away from (negative) the origin.
    pub fn orbit_zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * self.zoom_scale)
            .clamp(self.min_distance, self.max_distance);
        self.apply_orbit();
    }

    /// Spherical to Cartesian: yaw from +Z toward +X, pitch as elevation.
    #[must_use]
    pub fn orbit_to_position(yaw: f32, pitch: f32, radius: f32) -> Vec3 {
        Vec3::new(
            radius * pitch.cos() * yaw.sin(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.cos(),
        )
    }

    fn apply_orbit(&mut self) {
        let eye = Self::orbit_to_position(self.yaw, self.pitch, self.distance);
        self.set_eye(eye, false);
        self.set_gaze(Vec3::ZERO, false);
    }
}

/// Ordered zoom limits. Unusable bounds fall back to the defaults so
/// `orbit_zoom` can always clamp.
fn distance_range(a: f32, b: f32) -> (f32, f32) {
    let defaults = CameraOptions::default();
    let usable = |v: f32| v.is_finite() && v > 0.0;
    let a = if usable(a) { a } else { defaults.min_distance };
    let b = if usable(b) { b } else { defaults.max_distance };
    (a.min(b), a.max(b))
}
