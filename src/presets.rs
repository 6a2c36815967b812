//! Ready-made renderers reproducing each sample's scene.
//!
//! Every preset uses built-in meshes in place of the samples' bundled model
//! files. Camera homes, motion, spin and light values are the samples' own.

use glam::{Vec3, Vec4};
use log::{debug, info};

use crate::camera::{CameraMode, CameraMotion};
use crate::ecs::Spin;
use crate::lighting::{Light, Lighting, Material, ShadingTechnique};
use crate::mesh::Mesh;
use crate::particles::ParticleSystem;
use crate::renderer::{Renderer, RendererConfig, RendererError};
use crate::transform::Transform;

/// Clear color every sample uses while drawing.
pub const SAMPLE_CLEAR_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

/// Particles in the point-sprite fountain.
pub const PARTICLE_COUNT: usize = 1024;

/// Longest particle life, in seconds.
pub const PARTICLE_LIFESPAN: f32 = 3.0;

/// One of the sample scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SamplePreset {
    Ambient,
    Gouraud,
    Phong,
    Cubemap,
    Multitexture,
    NormalMap,
    PointSprites,
    PositionalLighting,
    PostProcessing,
    TexturedCube,
    Toon,
}

impl SamplePreset {
    pub const ALL: [SamplePreset; 11] = [
        SamplePreset::Ambient,
        SamplePreset::Gouraud,
        SamplePreset::Phong,
        SamplePreset::Cubemap,
        SamplePreset::Multitexture,
        SamplePreset::NormalMap,
        SamplePreset::PointSprites,
        SamplePreset::PositionalLighting,
        SamplePreset::PostProcessing,
        SamplePreset::TexturedCube,
        SamplePreset::Toon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SamplePreset::Ambient => "ambient",
            SamplePreset::Gouraud => "gouraud",
            SamplePreset::Phong => "phong",
            SamplePreset::Cubemap => "cubemap",
            SamplePreset::Multitexture => "multitexture",
            SamplePreset::NormalMap => "normal-map",
            SamplePreset::PointSprites => "point-sprites",
            SamplePreset::PositionalLighting => "positional-lighting",
            SamplePreset::PostProcessing => "post-processing",
            SamplePreset::TexturedCube => "textured-cube",
            SamplePreset::Toon => "toon",
        }
    }

    /// Camera and motion settings for this scene.
    pub fn config(self) -> RendererConfig {
        let base = RendererConfig::new()
            .label(self.name())
            .clear_color(SAMPLE_CLEAR_COLOR);
        let orbit = |home: Vec4| {
            base.clone()
                .camera_mode(CameraMode::Orbit)
                .camera_home(home)
        };

        match self {
            SamplePreset::Ambient
            | SamplePreset::Gouraud
            | SamplePreset::Phong
            | SamplePreset::PositionalLighting
            | SamplePreset::Toon => base.clone().camera_mode(CameraMode::Tracking),
            SamplePreset::Cubemap => {
                orbit(Vec4::new(0.0, 0.0, 3.5, 0.0)).camera_motion(CameraMotion::new(0.1, 0.1))
            }
            SamplePreset::Multitexture => orbit(Vec4::new(0.0, 0.0, 3.5, 0.0)),
            SamplePreset::NormalMap => {
                orbit(Vec4::new(0.0, 0.0, 5.0, 0.0)).camera_angles(45.0, -30.0)
            }
            SamplePreset::PointSprites => orbit(Vec4::new(0.0, 0.0, 5.0, 0.0))
                .camera_motion(CameraMotion::new(0.51, 0.51)),
            SamplePreset::PostProcessing => {
                orbit(Vec4::new(0.0, 2.0, 14.0, 0.0)).camera_motion(CameraMotion::new(0.5, 0.0))
            }
            SamplePreset::TexturedCube => orbit(Vec4::new(0.0, 0.0, 3.5, 0.0))
                .camera_motion(CameraMotion::new(0.3, 0.51)),
        }
    }

    /// Builds the renderer with this scene's entities.
    ///
    /// # Errors
    ///
    /// Returns a [`RendererError`] if a built-in mesh does not fit its
    /// technique.
    pub fn build(self) -> Result<Renderer, RendererError> {
        self.build_with(self.config())
    }

    /// Like [`build`](Self::build) but starting from a caller-supplied
    /// config, for example one with a different projection.
    pub fn build_with(self, config: RendererConfig) -> Result<Renderer, RendererError> {
        let mut renderer = Renderer::new(config);

        match self {
            SamplePreset::Ambient => spinning_cube(&mut renderer, ShadingTechnique::ambient())?,
            SamplePreset::Gouraud => spinning_cube(&mut renderer, ShadingTechnique::gouraud())?,
            SamplePreset::Phong => spinning_cube(&mut renderer, ShadingTechnique::phong())?,
            SamplePreset::Cubemap => {
                renderer.spawn_mesh(Transform::new(), Mesh::cube(), ShadingTechnique::Cubemap)?;
            }
            SamplePreset::Multitexture => {
                renderer.spawn_mesh(Transform::new(), Mesh::cube(), ShadingTechnique::Multitexture)?;
            }
            SamplePreset::TexturedCube => {
                renderer.spawn_mesh(Transform::new(), Mesh::cube(), ShadingTechnique::Textured)?;
            }
            SamplePreset::NormalMap => {
                let entity = renderer.spawn_mesh(
                    Transform::new(),
                    Mesh::cube(),
                    ShadingTechnique::normal_map(),
                )?;
                attach_spin(&mut renderer, entity, Spin::new([1.0, 1.0, 0.0], 0.5));
            }
            SamplePreset::PointSprites => {
                let seed = 0x5EED;
                renderer.spawn_particles(
                    Transform::new(),
                    ParticleSystem::new(PARTICLE_COUNT, PARTICLE_LIFESPAN, seed),
                    40.0,
                );
            }
            SamplePreset::PositionalLighting => {
                renderer.spawn_mesh(
                    Transform::from_position(Vec3::new(0.0, 0.0, -3.5)),
                    Mesh::cube(),
                    ShadingTechnique::positional_light(),
                )?;
            }
            SamplePreset::Toon => {
                renderer.spawn_mesh(
                    Transform::from_position(Vec3::new(0.0, 0.0, -3.5)),
                    Mesh::sphere(32, 16)?,
                    ShadingTechnique::toon(),
                )?;
            }
            SamplePreset::PostProcessing => post_processing_scene(&mut renderer)?,
        }

        info!(
            "{}: preset ready with {} entities",
            self.name(),
            renderer.world().len()
        );
        Ok(renderer)
    }
}

impl std::fmt::Display for SamplePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl std::fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = SamplePreset::ALL.iter().map(|p| p.name()).collect();
        write!(
            f,
            "Unknown preset '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownPreset {}

impl std::str::FromStr for SamplePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SamplePreset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

fn attach_spin(renderer: &mut Renderer, entity: hecs::Entity, spin: Spin) {
    if renderer.world_mut().insert_one(entity, spin).is_err() {
        debug!(
            "{}: entity {} vanished before its spin was attached",
            renderer.config().label,
            entity.id()
        );
    }
}

fn spinning_cube(
    renderer: &mut Renderer,
    technique: ShadingTechnique,
) -> Result<(), RendererError> {
    let entity = renderer.spawn_mesh(
        Transform::from_position(Vec3::new(0.0, 0.0, -2.5)),
        Mesh::cube(),
        technique,
    )?;
    attach_spin(renderer, entity, Spin::new([1.0, 1.0, 0.0], 1.0));
    Ok(())
}

// Six Phong-lit objects under one light, each with its own material.
fn post_processing_scene(renderer: &mut Renderer) -> Result<(), RendererError> {
    let phong = ShadingTechnique::Phong(Lighting::new(
        Light::directional([0.0, -1.0, -1.0]),
        Material::new().diffuse([0.1, 0.8, 0.8, 1.0]).shininess(230.0),
    ));
    let material = |ambient: [f32; 4], diffuse: [f32; 4]| {
        phong.with_material(
            Material::new()
                .ambient(ambient)
                .diffuse(diffuse)
                .shininess(230.0),
        )
    };
    let white = [1.0, 1.0, 1.0, 1.0];

    let objects = [
        (
            Transform::from_position(Vec3::new(2.0, 1.0, 0.0)).uniform_scale(2.0),
            Mesh::sphere(32, 16)?,
            phong,
        ),
        (
            Transform::from_position(Vec3::new(-2.0, 1.0, 0.0)),
            Mesh::cube(),
            material([0.8, 0.6, 0.5, 1.0], [0.8, 0.1, 0.3, 1.0]),
        ),
        (
            Transform::new().uniform_scale(0.2),
            Mesh::plane(10.0),
            material([0.5, 0.6, 0.8, 1.0], [0.3, 0.1, 0.8, 1.0]),
        ),
        (
            Transform::from_position(Vec3::new(0.0, 5.0, 0.0)).scale(Vec3::new(0.1, 1.0, 1.0)),
            Mesh::plane(10.0),
            material(white, [0.5, 0.6, 0.5, 1.0]),
        ),
        (
            Transform::from_position(Vec3::new(-1.0, 0.0, -1.5)).uniform_scale(0.3),
            Mesh::sphere(16, 8)?,
            material(white, [0.6, 0.6, 0.9, 1.0]),
        ),
        (
            Transform::from_position(Vec3::new(0.0, 0.0, -4.0)).scale(Vec3::new(0.03, 0.5, 1.0)),
            Mesh::cube(),
            material(white, [0.9, 0.7, 0.6, 1.0]),
        ),
    ];

    for (transform, mesh, technique) in objects {
        renderer.spawn_mesh(transform, mesh, technique)?;
    }
    Ok(())
}
