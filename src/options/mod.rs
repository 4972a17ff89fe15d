//! Construction-time configuration with TOML file support.
//!
//! Camera projection and sensitivities, blur sigma, terrain and hedgerow
//! layout, window size and key bindings are consolidated here. Values are
//! read when the demo is built; nothing is persisted at runtime.

mod camera;
mod culling;
mod debug;
mod keybindings;
mod post_processing;
mod terrain;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use culling::CullingOptions;
pub use debug::DebugOptions;
pub use keybindings::KeybindingOptions;
pub use post_processing::PostProcessingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use terrain::TerrainOptions;
pub use window::WindowOptions;

use crate::error::GalleryError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Post-process filter parameters.
    pub post_processing: PostProcessingOptions,
    /// Terrain scene parameters.
    pub terrain: TerrainOptions,
    /// Hedgerow culling scene parameters.
    pub culling: CullingOptions,
    /// Debug visualization options.
    pub debug: DebugOptions,
    /// Back-buffer size.
    #[schemars(skip)]
    pub window: WindowOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Schema serialized for an external options panel; empty on failure.
    #[must_use]
    pub fn schema_json() -> String {
        serde_json::to_string(&Self::json_schema()).unwrap_or_default()
    }

    /// Current values serialized for an external options panel.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Apply a single section pushed back by an options panel, e.g.
    /// `("camera", {"fovy": 60.0, ...})`.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::OptionsParse`] for an unknown section, a
    /// value that does not deserialize into it, or one that fails
    /// [`validate`](Self::validate). `self` is unchanged then.
    pub fn apply_section(
        &mut self,
        section: &str,
        value: serde_json::Value,
    ) -> Result<(), GalleryError> {
        let parse = |e: serde_json::Error| GalleryError::OptionsParse(e.to_string());
        let mut next = self.clone();
        match section {
            "camera" => next.camera = serde_json::from_value(value).map_err(parse)?,
            "post_processing" => {
                next.post_processing = serde_json::from_value(value).map_err(parse)?;
            }
            "terrain" => next.terrain = serde_json::from_value(value).map_err(parse)?,
            "culling" => next.culling = serde_json::from_value(value).map_err(parse)?,
            "debug" => next.debug = serde_json::from_value(value).map_err(parse)?,
            other => {
                return Err(GalleryError::OptionsParse(format!(
                    "unknown options section `{other}`"
                )))
            }
        }
        next.validate()?;
        *self = next;
        log::debug!("options section {section} updated");
        Ok(())
    }

    /// Check the sections whose values feed frame-time math.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::OptionsParse`] describing the first bad
    /// value.
    pub fn validate(&self) -> Result<(), GalleryError> {
        self.camera.validate()?;
        self.post_processing.validate()
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Io`] if the file cannot be read and
    /// [`GalleryError::OptionsParse`] if it is not valid options TOML or
    /// fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self, GalleryError> {
        let content = std::fs::read_to_string(path).map_err(GalleryError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| GalleryError::OptionsParse(e.to_string()))?;
        options.validate()?;
        options.keybindings.rebuild_reverse_map();
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::OptionsParse`] if serialization fails and
    /// [`GalleryError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GalleryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GalleryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GalleryError::Io)?;
        }
        std::fs::write(path, content).map_err(GalleryError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let mut parsed: Options = toml::from_str(&toml_str).unwrap();
        parsed.keybindings.rebuild_reverse_map();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[post_processing]
blur_sigma = 3.5
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.post_processing.blur_sigma, 3.5);
        // Everything else should be default
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.camera.zfar, 500.0);
        assert_eq!(opts.culling.count, 9);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(KeyAction::NextScene)
        );
        assert_eq!(opts.keybindings.lookup("KeyR"), Some(KeyAction::ResetView));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn load_reports_missing_file_as_io() {
        let missing = std::env::temp_dir().join("shade-gallery-missing.toml");
        let _ = std::fs::remove_file(&missing);
        assert!(matches!(
            Options::load(&missing),
            Err(GalleryError::Io(_))
        ));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join("shade-gallery-options-test");
        let path = dir.join("options.toml");
        let mut opts = Options::default();
        opts.camera.orbit_sensitivity = 0.02;
        opts.terrain.scan_duration = 4.0;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("post_processing"));
        assert!(props.contains_key("terrain"));
        assert!(props.contains_key("culling"));
        assert!(props.contains_key("debug"));

        // Skipped sections should be absent
        assert!(!props.contains_key("window"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("orbit_sensitivity").is_some());
        assert!(camera.get("znear").is_none());
    }

    #[test]
    fn panel_section_updates_only_that_section() {
        let mut opts = Options::default();
        opts.apply_section(
            "post_processing",
            serde_json::json!({ "blur_sigma": 4.0 }),
        )
        .unwrap();
        assert_eq!(opts.post_processing.blur_sigma, 4.0);
        assert_eq!(opts.camera, CameraOptions::default());
        assert!(opts.to_json().contains("\"blur_sigma\":4.0"));
    }

    #[test]
    fn load_rejects_inverted_orbit_distances() {
        let dir = std::env::temp_dir().join("shade-gallery-inverted-distance");
        let path = dir.join("options.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[camera]\nmin_distance = 600.0\n").unwrap();

        let err = Options::load(&path).unwrap_err();
        assert!(err.to_string().contains("min_distance"), "{err}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn panel_rejects_out_of_range_values() {
        let mut opts = Options::default();
        assert!(opts
            .apply_section(
                "camera",
                serde_json::json!({ "min_distance": 600.0, "max_distance": 10.0 }),
            )
            .is_err());
        assert!(opts
            .apply_section("post_processing", serde_json::json!({ "blur_sigma": 1e12 }))
            .is_err());
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn panel_rejects_unknown_section() {
        let mut opts = Options::default();
        let err = opts
            .apply_section("window", serde_json::json!({ "width": 10 }))
            .unwrap_err();
        assert!(matches!(err, GalleryError::OptionsParse(_)));
        assert_eq!(opts, Options::default());
        assert!(Options::schema_json().contains("culling"));
    }
}
