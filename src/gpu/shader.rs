//! Material records and per-technique shader presets.
//!
//! A preset knows which parameters its shader declares and what they start
//! at. [`ShaderPreset::build_effect`] produces a ready [`ParameterBag`]; the
//! per-frame transforms (`World`, `WVP`, `WorldIT`, `View`, `Projection`)
//! are declared here and filled in by the model draw.

use glam::{Vec3, Vec4};

use super::backend::TextureId;
use super::effect::{ParamValue, ParameterBag};

/// Convert an 8-bit RGB colour to linear `[0, 1]` floats.
#[must_use]
pub fn rgb(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0
}

/// Named colours used by the presets.
pub mod colors {
    use glam::Vec3;

    /// (255, 255, 255)
    pub const WHITE: Vec3 = Vec3::ONE;
    /// (0, 0, 0)
    pub const BLACK: Vec3 = Vec3::ZERO;
    /// (255, 0, 0)
    pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// (0, 0, 255)
    pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    /// (128, 128, 128)
    pub const GRAY: Vec3 = Vec3::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    /// (255, 165, 0)
    pub const ORANGE: Vec3 = Vec3::new(1.0, 165.0 / 255.0, 0.0);
    /// (222, 184, 135)
    pub const BURLY_WOOD: Vec3 = Vec3::new(222.0 / 255.0, 184.0 / 255.0, 135.0 / 255.0);
    /// (255, 215, 0)
    pub const GOLD: Vec3 = Vec3::new(1.0, 215.0 / 255.0, 0.0);
    /// (218, 165, 32)
    pub const GOLDENROD: Vec3 = Vec3::new(218.0 / 255.0, 165.0 / 255.0, 32.0 / 255.0);
    /// (255, 182, 193)
    pub const LIGHT_PINK: Vec3 = Vec3::new(1.0, 182.0 / 255.0, 193.0 / 255.0);
}

/// Surface description shared by the lighting presets. Each preset reads
/// only the fields its shader has parameters for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient colour.
    pub ambient_color: Vec3,
    /// Ambient strength.
    pub ambient_intensity: f32,
    /// Diffuse colour.
    pub diffuse_color: Vec3,
    /// Specular highlight colour.
    pub specular_color: Vec3,
    /// Specular strength.
    pub specular_intensity: f32,
    /// Blinn-Phong exponent.
    pub specular_power: f32,
    /// Microfacet roughness (Cook-Torrance).
    pub roughness: f32,
    /// Fresnel reflectance at normal incidence (Cook-Torrance `R0`).
    pub reflectance: f32,
}

impl Material {
    /// Matte grey.
    pub const LAMBERTIAN: Self = Self {
        ambient_color: colors::WHITE,
        ambient_intensity: 0.2,
        diffuse_color: colors::GRAY,
        specular_color: colors::BLACK,
        specular_intensity: 0.0,
        specular_power: 1.0,
        roughness: 1.0,
        reflectance: 0.0,
    };

    /// Orange plastic.
    pub const PHONG: Self = Self {
        ambient_color: colors::RED,
        ambient_intensity: 0.2,
        diffuse_color: colors::ORANGE,
        specular_color: colors::WHITE,
        specular_intensity: 1.0,
        specular_power: 32.0,
        roughness: 1.0,
        reflectance: 0.0,
    };

    /// Dull wood for the textured cube.
    pub const WOOD: Self = Self {
        ambient_color: colors::BLACK,
        ambient_intensity: 0.2,
        diffuse_color: colors::BURLY_WOOD,
        specular_color: colors::WHITE,
        specular_intensity: 0.2,
        specular_power: 32.0,
        roughness: 1.0,
        reflectance: 0.0,
    };

    /// Polished gold.
    pub const COOK_TORRANCE: Self = Self {
        ambient_color: colors::GOLD,
        ambient_intensity: 0.2,
        diffuse_color: colors::GOLDENROD,
        specular_color: colors::WHITE,
        specular_intensity: 2.0,
        specular_power: 25.0,
        roughness: 0.5,
        reflectance: 1.42,
    };
}

const LIGHT_POSITION: Vec3 = Vec3::new(100.0, 100.0, 100.0);

/// Shading technique with its parameter layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderPreset {
    /// Diffuse only.
    Lambertian,
    /// Blinn-Phong specular.
    BlinnPhong,
    /// Normals as colour.
    Normals,
    /// Procedural checkerboard.
    Checkers,
    /// Textured Blinn-Phong.
    Texture,
    /// Microfacet BRDF.
    CookTorrance,
    /// Cone light.
    Spotlight,
    /// Three coloured directional lights.
    MultiLight,
    /// Texture projected from a moving projector.
    Projective,
    /// Vertex-coloured lit terrain.
    Terrain,
    /// Full-screen luminance filter.
    Monochrome,
    /// Full-screen separable blur.
    GaussianBlur,
}

impl ShaderPreset {
    /// Shader program name.
    #[must_use]
    pub fn effect_name(self) -> &'static str {
        match self {
            Self::Lambertian => "Lambertian",
            Self::BlinnPhong => "BlinnPhong",
            Self::Normals => "Normals",
            Self::Checkers => "Checkers",
            Self::Texture => "Texture",
            Self::CookTorrance => "CookTorrance",
            Self::Spotlight => "Spotlight",
            Self::MultiLight => "MultiLight",
            Self::Projective => "Projective",
            Self::Terrain => "BasicEffect",
            Self::Monochrome => "Monochrome",
            Self::GaussianBlur => "GaussianBlur",
        }
    }

    /// Whether the preset is a full-screen filter rather than a surface
    /// shader.
    #[must_use]
    pub fn is_filter(self) -> bool {
        matches!(self, Self::Monochrome | Self::GaussianBlur)
    }

    /// Build the effect with every parameter this shader declares.
    ///
    /// `texture` binds the diffuse texture of [`Texture`](Self::Texture) or
    /// the projected texture of [`Projective`](Self::Projective); other
    /// presets ignore it.
    #[must_use]
    pub fn build_effect(self, material: &Material, texture: Option<TextureId>) -> ParameterBag {
        let mut bag = ParameterBag::new(self.effect_name());
        if !self.is_filter() {
            declare_transforms(&mut bag);
        }

        let m = material;
        match self {
            Self::Normals | Self::Checkers => {}
            Self::Lambertian => {
                bag.declare("LightPosition", ParamValue::Vec3(LIGHT_POSITION));
                declare_ambient_diffuse(&mut bag, m);
            }
            Self::BlinnPhong | Self::Texture => {
                bag.declare("LightPosition", ParamValue::Vec3(LIGHT_POSITION));
                bag.declare("CameraPosition", ParamValue::Vec3(Vec3::ZERO));
                declare_ambient_diffuse(&mut bag, m);
                declare_specular(&mut bag, m);
                if self == Self::Texture {
                    if let Some(tex) = texture {
                        bag.declare("Texture", ParamValue::Texture(tex));
                    }
                }
            }
            Self::CookTorrance => {
                bag.declare("LightPosition", ParamValue::Vec3(LIGHT_POSITION));
                declare_ambient_diffuse(&mut bag, m);
                declare_specular(&mut bag, m);
                bag.declare("Roughness", ParamValue::Float(m.roughness));
                bag.declare("R0", ParamValue::Float(m.reflectance));
            }
            Self::Spotlight => {
                bag.declare("LightPosition", ParamValue::Vec3(Vec3::splat(5.0)));
                bag.declare(
                    "LightDirection",
                    ParamValue::Vec3(Vec3::new(-1.0, -1.0, 0.0)),
                );
                declare_ambient_diffuse(&mut bag, m);
                bag.declare("LightColor", ParamValue::Vec3(m.specular_color));
                bag.declare("OuterAngle", ParamValue::Float(20.0));
                bag.declare("InnerAngle", ParamValue::Float(5.0));
            }
            Self::MultiLight => {
                let lights = vec![
                    Vec3::new(10.0, 0.0, 5.0),
                    Vec3::new(-10.0, 0.0, 5.0),
                    Vec3::new(0.0, 10.0, 5.0),
                ];
                let count = lights.len() as i32;
                bag.declare("LightDirections", ParamValue::Vec3Array(lights));
                bag.declare(
                    "LightColors",
                    ParamValue::Vec3Array(vec![colors::RED, colors::BLUE, colors::LIGHT_PINK]),
                );
                bag.declare("LightCount", ParamValue::Int(count));
                bag.declare("AmbientColor", ParamValue::Vec3(m.ambient_color));
                bag.declare("AmbientIntensity", ParamValue::Float(m.ambient_intensity));
                bag.declare("SpecularColor", ParamValue::Vec3(m.specular_color));
                bag.declare(
                    "SpecularIntensity",
                    ParamValue::Float(m.specular_intensity),
                );
                bag.declare("SpecularPower", ParamValue::Float(256.0));
            }
            Self::Projective => {
                bag.declare(
                    "ProjectorPosition",
                    ParamValue::Vec3(Vec3::new(0.0, 0.0, 40.0)),
                );
                bag.declare(
                    "ProjectorViewProjection",
                    ParamValue::Matrix(glam::Mat4::IDENTITY),
                );
                bag.declare("Time", ParamValue::Float(0.0));
                declare_ambient_diffuse(&mut bag, m);
                if let Some(tex) = texture {
                    bag.declare("ProjectedTexture", ParamValue::Texture(tex));
                }
            }
            Self::Terrain => {
                bag.declare("VertexColorEnabled", ParamValue::Bool(true));
                bag.declare("LightingEnabled", ParamValue::Bool(true));
                bag.declare("AmbientLightColor", ParamValue::Vec3(Vec3::splat(0.3)));
                bag.declare(
                    "DirectionalLight0Direction",
                    ParamValue::Vec3(Vec3::NEG_Y),
                );
                bag.declare(
                    "DirectionalLight0DiffuseColor",
                    ParamValue::Vec3(colors::WHITE),
                );
            }
            Self::Monochrome => {
                bag.declare("Tint", ParamValue::Vec4(Vec4::ONE));
            }
            Self::GaussianBlur => {
                bag.declare("Offsets", ParamValue::Vec2Array(Vec::new()));
                bag.declare("Weights", ParamValue::FloatArray(Vec::new()));
            }
        }
        bag
    }
}

fn declare_transforms(bag: &mut ParameterBag) {
    for name in ["World", "WVP", "WorldIT", "View", "Projection"] {
        bag.declare(name, ParamValue::Matrix(glam::Mat4::IDENTITY));
    }
}

fn declare_ambient_diffuse(bag: &mut ParameterBag, m: &Material) {
    bag.declare("AmbientColor", ParamValue::Vec3(m.ambient_color));
    bag.declare("AmbientIntensity", ParamValue::Float(m.ambient_intensity));
    bag.declare("DiffuseColor", ParamValue::Vec3(m.diffuse_color));
}

fn declare_specular(bag: &mut ParameterBag, m: &Material) {
    bag.declare("SpecularColor", ParamValue::Vec3(m.specular_color));
    bag.declare("SpecularIntensity", ParamValue::Float(m.specular_intensity));
    bag.declare("SpecularPower", ParamValue::Float(m.specular_power));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::effect::Effect;

    #[test]
    fn rgb_normalizes_bytes() {
        assert_eq!(rgb(255, 0, 255), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(rgb(128, 128, 128), colors::GRAY);
    }

    #[test]
    fn phong_declares_camera_position() {
        let effect = ShaderPreset::BlinnPhong.build_effect(&Material::PHONG, None);
        assert!(effect.has_parameter("CameraPosition"));
        assert!(effect.has_parameter("WVP"));
        assert_eq!(
            effect.parameter("SpecularPower"),
            Some(&ParamValue::Float(32.0))
        );
    }

    #[test]
    fn lambertian_has_no_camera_position() {
        let effect = ShaderPreset::Lambertian.build_effect(&Material::LAMBERTIAN, None);
        assert!(!effect.has_parameter("CameraPosition"));
        assert_eq!(
            effect.parameter("DiffuseColor"),
            Some(&ParamValue::Vec3(colors::GRAY))
        );
    }

    #[test]
    fn filters_skip_transforms() {
        let blur = ShaderPreset::GaussianBlur.build_effect(&Material::LAMBERTIAN, None);
        assert!(!blur.has_parameter("World"));
        assert!(blur.has_parameter("Weights"));
        assert!(blur.has_parameter("Offsets"));
    }

    #[test]
    fn multilight_counts_its_lights() {
        let effect = ShaderPreset::MultiLight.build_effect(&Material::COOK_TORRANCE, None);
        assert_eq!(effect.parameter("LightCount"), Some(&ParamValue::Int(3)));
    }
}
