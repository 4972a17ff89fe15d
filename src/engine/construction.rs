//! Free functions that assemble the camera and the demo scene catalogue.

use std::sync::Arc;

use glam::Vec3;

use crate::camera::OrbitCamera;
use crate::error::GalleryError;
use crate::gpu::{GraphicsBackend, Material, ShaderPreset, TextureId};
use crate::options::Options;
use crate::postprocess::{Filter, GaussianBlur, PostProcess};
use crate::scene::definition::DEFAULT_EYE;
use crate::scene::{
    eye_transform, primitives, CullMode, Hedgerow, HeightMap, Mesh, Model,
    SceneDefinition, SceneId, SceneKind, Terrain, Transform,
};

/// Scale applied to the teapot in every scene that shows it.
const TEAPOT_SCALE: f32 = 10.0;
/// Scale applied to the textured cube.
const CUBE_SCALE: f32 = 40.0;

/// Meshes, textures and the height map the scenes are built from.
///
/// Asset loading lives with the host; [`GalleryAssets::procedural`] fills
/// every slot with generated stand-ins so the gallery runs without files.
#[derive(Debug, Clone)]
pub struct GalleryAssets {
    /// Shown by the basic lighting scenes and the projection scene.
    pub teapot: Arc<Mesh>,
    /// Shown by the advanced lighting, filter and culling scenes.
    pub head: Arc<Mesh>,
    /// Textured cube.
    pub cube: Arc<Mesh>,
    /// Terrain source.
    pub height_map: HeightMap,
    /// Diffuse texture for the cube.
    pub crate_texture: Option<TextureId>,
    /// Texture thrown by the projector.
    pub projected_texture: Option<TextureId>,
}

impl GalleryAssets {
    /// Generated meshes and a procedural height map; no textures.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::VertexLayout`] if a generated mesh is
    /// malformed.
    pub fn procedural(options: &Options) -> Result<Self, GalleryError> {
        Ok(Self {
            teapot: primitives::torus("teapot", 2.0, 1.0, 32, 16)?,
            head: primitives::uv_sphere("head", 25.0, 24, 32)?,
            cube: primitives::cube("cube")?,
            height_map: HeightMap::procedural(options.terrain.resolution as usize),
            crate_texture: None,
            projected_texture: None,
        })
    }
}

/// Camera at the default eye looking at the origin.
#[must_use]
pub fn build_camera(options: &Options) -> OrbitCamera {
    OrbitCamera::new(DEFAULT_EYE, Vec3::ZERO, options.window.aspect(), &options.camera)
}

/// The thirteen demo scenes in presentation order.
///
/// `backend` is needed up front because the blur scene allocates its
/// intermediate render target at construction.
pub fn build_scenes(
    backend: &mut dyn GraphicsBackend,
    assets: &GalleryAssets,
    options: &Options,
) -> Vec<SceneDefinition> {
    let teapot = || {
        vec![Model::new(
            Arc::clone(&assets.teapot),
            Transform::scaled(TEAPOT_SCALE),
        )]
    };
    let head = || vec![Model::new(Arc::clone(&assets.head), Transform::default())];
    let effect = |preset: ShaderPreset, material: &Material, texture: Option<TextureId>| {
        Box::new(preset.build_effect(material, texture))
    };
    let teapot_eye = eye_transform(100.0, -20.0, 0.0, 0.0);

    let terrain = Terrain::from_height_map(&assets.height_map, &options.terrain);
    let cube = Model::new(Arc::clone(&assets.cube), Transform::scaled(CUBE_SCALE));

    let monochrome = Filter::new(effect(ShaderPreset::Monochrome, &Material::LAMBERTIAN, None));
    let blur = GaussianBlur::new(
        backend,
        effect(ShaderPreset::GaussianBlur, &Material::LAMBERTIAN, None),
        options.post_processing.blur_sigma,
    );

    vec![
        SceneDefinition::new(
            SceneId::Terrain,
            effect(ShaderPreset::Terrain, &Material::LAMBERTIAN, None),
            vec![Model::custom("terrain", Transform::default())],
        )
        .with_eye(eye_transform(200.0, -40.0, -20.0, 0.0))
        .with_kind(SceneKind::Terrain(Box::new(terrain))),
        SceneDefinition::new(
            SceneId::Lambert,
            effect(ShaderPreset::Lambertian, &Material::LAMBERTIAN, None),
            teapot(),
        )
        .with_eye(teapot_eye),
        SceneDefinition::new(
            SceneId::Phong,
            effect(ShaderPreset::BlinnPhong, &Material::PHONG, None),
            teapot(),
        )
        .with_eye(teapot_eye),
        SceneDefinition::new(
            SceneId::Normals,
            effect(ShaderPreset::Normals, &Material::LAMBERTIAN, None),
            teapot(),
        )
        .with_eye(teapot_eye),
        SceneDefinition::new(
            SceneId::Texture,
            effect(ShaderPreset::Texture, &Material::WOOD, assets.crate_texture),
            vec![cube],
        )
        .with_eye(eye_transform(100.0, -20.0, -50.0, 0.0)),
        SceneDefinition::new(
            SceneId::Checkered,
            effect(ShaderPreset::Checkers, &Material::LAMBERTIAN, None),
            teapot(),
        )
        .with_eye(teapot_eye),
        SceneDefinition::new(
            SceneId::CookTorrance,
            effect(ShaderPreset::CookTorrance, &Material::COOK_TORRANCE, None),
            head(),
        ),
        SceneDefinition::new(
            SceneId::Spotlight,
            effect(ShaderPreset::Spotlight, &Material::LAMBERTIAN, None),
            head(),
        ),
        SceneDefinition::new(
            SceneId::Multilight,
            effect(ShaderPreset::MultiLight, &Material::PHONG, None),
            head(),
        ),
        SceneDefinition::new(
            SceneId::Monochrome,
            effect(ShaderPreset::CookTorrance, &Material::COOK_TORRANCE, None),
            head(),
        )
        .with_post_process(PostProcess::Filter(monochrome)),
        SceneDefinition::new(
            SceneId::GaussianBlur,
            effect(ShaderPreset::Normals, &Material::LAMBERTIAN, None),
            head(),
        )
        .with_post_process(PostProcess::GaussianBlur(blur)),
        SceneDefinition::new(
            SceneId::Projection,
            effect(ShaderPreset::Projective, &Material::LAMBERTIAN, assets.projected_texture),
            teapot(),
        )
        .with_eye(teapot_eye)
        .with_kind(SceneKind::Projection),
        SceneDefinition::new(
            SceneId::Culling,
            effect(ShaderPreset::Normals, &Material::LAMBERTIAN, None),
            hedgerow(&assets.head, options),
        )
        .with_kind(SceneKind::Culling(Hedgerow::new(&options.culling))),
    ]
}

/// Evenly spaced row of heads tested by their world boxes.
fn hedgerow(mesh: &Arc<Mesh>, options: &Options) -> Vec<Model> {
    let culling = &options.culling;
    let count = culling.count.max(1);
    let spacing = if count > 1 {
        culling.total_width / (count - 1) as f32
    } else {
        0.0
    };
    let start = if count > 1 { -culling.total_width / 2.0 } else { 0.0 };
    (0..count)
        .map(|i| {
            let position = Vec3::new(start + i as f32 * spacing, 0.0, 0.0);
            let transform = Transform::new(position, Vec3::ZERO, culling.model_scale);
            Model::new(Arc::clone(mesh), transform).with_cull_mode(CullMode::BoundingBox)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::HeadlessBackend;

    fn catalogue() -> Vec<SceneDefinition> {
        let options = Options::default();
        let assets = GalleryAssets::procedural(&options).unwrap();
        let mut backend = HeadlessBackend::new(1280, 720);
        build_scenes(&mut backend, &assets, &options)
    }

    #[test]
    fn catalogue_order_and_titles() {
        let ids: Vec<_> = catalogue().iter().map(SceneDefinition::id).collect();
        assert_eq!(
            ids,
            vec![
                SceneId::Terrain,
                SceneId::Lambert,
                SceneId::Phong,
                SceneId::Normals,
                SceneId::Texture,
                SceneId::Checkered,
                SceneId::CookTorrance,
                SceneId::Spotlight,
                SceneId::Multilight,
                SceneId::Monochrome,
                SceneId::GaussianBlur,
                SceneId::Projection,
                SceneId::Culling,
            ]
        );
    }

    #[test]
    fn hedgerow_starts_evenly_spaced() {
        let scenes = catalogue();
        let culling = scenes.last().unwrap();
        let xs: Vec<f32> = culling
            .models()
            .iter()
            .map(|m| m.transform().position().x)
            .collect();
        assert_eq!(xs.len(), 9);
        assert!((xs[0] + 80.0).abs() < 1e-4);
        assert!((xs[8] - 80.0).abs() < 1e-4);
        assert!((xs[1] - xs[0] - 20.0).abs() < 1e-4);
        assert!(culling
            .models()
            .iter()
            .all(|m| m.cull_mode() == CullMode::BoundingBox && m.transform().scale() == 0.5));
    }

    #[test]
    fn filter_scenes_carry_post_process() {
        let scenes = catalogue();
        let with_post: Vec<_> = scenes
            .iter()
            .filter(|s| s.post_process().is_some())
            .map(SceneDefinition::id)
            .collect();
        assert_eq!(with_post, vec![SceneId::Monochrome, SceneId::GaussianBlur]);
    }

    #[test]
    fn teapot_scenes_use_the_raised_eye() {
        let scenes = catalogue();
        let lambert = &scenes[1];
        let eye = lambert.eye();
        assert!((eye.length() - 100.0).abs() < 1e-3);
        assert!(eye.y > 0.0);
        assert_eq!(lambert.models()[0].transform().scale(), TEAPOT_SCALE);
    }
}
