//! # glcam
//!
//! **Camera, transform and tangent-space math for OpenGL ES 2.0 style samples.**
//!
//! Shading samples all repeat the same arithmetic: an orbit camera, a model
//! matrix built from place/rotate/scale, the model-view, projection and
//! normal matrices, and tangents for normal mapping. glcam does that
//! arithmetic once and hands a backend ready-to-upload matrices. It never
//! touches a GPU API.
//!
//! ## Quick Start
//!
//! ```
//! use glcam::*;
//!
//! let mut renderer = Renderer::new(
//!     RendererConfig::new()
//!         .camera_mode(CameraMode::Orbit)
//!         .camera_home(Vec4::new(0.0, 2.0, 14.0, 0.0))
//!         .camera_motion(CameraMotion::new(0.5, 0.0)),
//! );
//!
//! renderer
//!     .spawn_mesh(
//!         Transform::from_position(Vec3::new(2.0, 1.0, 0.0)).uniform_scale(2.0),
//!         Mesh::sphere(32, 16).unwrap(),
//!         ShadingTechnique::phong(),
//!     )
//!     .unwrap();
//!
//! // Host callbacks, in the order a GL surface delivers them
//! renderer.on_surface_created();
//! renderer.on_surface_changed(1280, 720).unwrap();
//! for call in renderer.on_draw_frame() {
//!     // glUniformMatrix4fv(uMVMatrix, 1, false, &call.uniforms.model_view) ...
//!     assert_eq!(call.technique.name(), "phong");
//! }
//! ```
//!
//! ## Conventions
//!
//! - Matrices are column-major with the translation in `m[12..15]`, exactly
//!   as `android.opengl.Matrix` lays them out.
//! - `translate`, `rotate` and `scale` right-multiply, so the last call is
//!   the first transform a vertex sees.
//! - Angles are in degrees everywhere in the public API.
//! - Problems with input data are reported when it is built ([`Mesh::new`],
//!   [`Renderer::on_surface_changed`]), never while drawing.
//!
//! ## Logging
//!
//! glcam logs through the [`log`] facade; install any logger (the `glcam`
//! binary uses `env_logger`) to see surface events and warnings.

mod camera;
mod ecs;
mod lighting;
pub mod math;
mod mesh;
mod orbit_camera;
mod particles;
mod pipeline;
mod presets;
mod projection;
mod render_queue;
mod renderer;
pub mod tangent;
mod transform;

pub use camera::{Camera, CameraMode, CameraMotion, TrackingCamera};
pub use ecs::{MeshId, NormalState, ParticleEmitter, RenderMesh, Spin};
pub use lighting::{Light, LightSource, Lighting, Material, Rgba, ShadingTechnique};
pub use math::Matrix4;
pub use mesh::{MAX_VERTICES, Mesh, MeshError, Vertex};
pub use orbit_camera::OrbitCamera;
pub use particles::{Particle, ParticleSystem, ParticleVertex};
pub use pipeline::{FrameTransforms, MatrixUniforms, NormalMatrixPolicy, normal_matrix};
pub use presets::{SamplePreset, UnknownPreset};
pub use projection::{Frustum, Projection, ProjectionConfig, ProjectionError};
pub use render_queue::{DrawCall, DrawQueue, Primitive};
pub use renderer::{
    CameraConfig, FrameState, Renderer, RendererConfig, RendererError, prepare_mesh,
};
pub use transform::Transform;

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

// ECS support
pub use hecs::{Entity, World};
