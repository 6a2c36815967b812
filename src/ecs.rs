//! ECS components for entity-based rendering.
//!
//! The renderer keeps its drawables in a `hecs::World`. Entities with a
//! [`Transform`](crate::Transform) and a [`RenderMesh`] are drawn every
//! frame; a [`Spin`] makes them rotate, and the renderer attaches a
//! [`NormalState`] to remember each entity's last good normal matrix.
//! Entities with a [`ParticleEmitter`] instead of a mesh are drawn as point
//! sprites.
//!
//! # Example
//!
//! ```
//! use glcam::*;
//!
//! let mut renderer = Renderer::new(RendererConfig::new());
//! let cube = renderer.add_mesh(Mesh::cube());
//!
//! renderer.spawn((
//!     Transform::from_position(Vec3::new(0.0, 0.0, -2.5)),
//!     RenderMesh::new(cube, ShadingTechnique::phong()),
//!     Spin::new([1.0, 1.0, 0.0], 1.0),
//! ));
//! ```

use crate::lighting::ShadingTechnique;
use crate::math::Matrix4;
use crate::particles::ParticleSystem;

/// Type-safe handle to a mesh registered with the renderer.
///
/// Obtained from [`Renderer::add_mesh`](crate::Renderer::add_mesh).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub(crate) usize);

impl MeshId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Component for drawing a mesh on an entity.
///
/// Attach this component along with a [`Transform`](crate::Transform) to make
/// an entity renderable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderMesh {
    /// Handle to the mesh geometry.
    pub mesh: MeshId,
    /// How the mesh is shaded.
    pub technique: ShadingTechnique,
}

impl RenderMesh {
    pub fn new(mesh: MeshId, technique: ShadingTechnique) -> Self {
        Self { mesh, technique }
    }
}

/// Continuous rotation around a fixed axis.
///
/// Every frame the angle advances by `degrees_per_frame` and the model matrix
/// gets `rotate(angle, axis)` applied after the transform's own rotations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub axis: [f32; 3],
    pub degrees_per_frame: f32,
    /// Accumulated angle in degrees.
    pub angle: f32,
}

impl Spin {
    pub fn new(axis: [f32; 3], degrees_per_frame: f32) -> Self {
        Self {
            axis,
            degrees_per_frame,
            angle: 0.0,
        }
    }

    /// Starting angle in degrees.
    pub fn starting_at(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn advance(&mut self) {
        self.angle += self.degrees_per_frame;
    }

    pub fn apply(&self, model: &mut Matrix4) {
        model.rotate(self.angle, self.axis);
    }
}

/// Per-entity normal-matrix history, managed by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalState {
    /// Normal matrix from the last frame whose model-view was invertible.
    pub last_good: Option<Matrix4>,
    /// Set once a singular model-view has been reported for this entity.
    pub warned_singular: bool,
}

/// A particle system drawn as `GL_POINTS`, one point per particle.
///
/// The renderer steps the simulation once per frame before composing its
/// matrices.
#[derive(Clone, Debug)]
pub struct ParticleEmitter {
    pub particles: ParticleSystem,
    /// Sprite size in pixels.
    pub point_size: f32,
}

impl ParticleEmitter {
    pub fn new(particles: ParticleSystem, point_size: f32) -> Self {
        Self {
            particles,
            point_size,
        }
    }
}
