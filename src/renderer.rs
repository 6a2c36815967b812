//! The frame driver.
//!
//! A [`Renderer`] owns the camera, the projection, an ECS world of drawables
//! and the mesh store. A host calls its three entry points in the order a GL
//! surface delivers them:
//!
//! 1. [`on_surface_created`](Renderer::on_surface_created) once a context is
//!    ready (and again after the context is lost)
//! 2. [`on_surface_changed`](Renderer::on_surface_changed) on every resize
//! 3. [`on_draw_frame`](Renderer::on_draw_frame) once per frame, which
//!    returns the draw calls to execute
//!
//! ```
//! use glcam::*;
//!
//! let mut renderer = Renderer::new(
//!     RendererConfig::new()
//!         .label("Textured cube")
//!         .camera_mode(CameraMode::Orbit)
//!         .camera_home(Vec4::new(0.0, 0.0, 3.5, 0.0)),
//! );
//! renderer
//!     .spawn_mesh(Transform::new(), Mesh::cube(), ShadingTechnique::Textured)
//!     .unwrap();
//!
//! renderer.on_surface_created();
//! renderer.on_surface_changed(800, 600).unwrap();
//!
//! let calls = renderer.on_draw_frame();
//! assert_eq!(calls.len(), 1);
//! assert_eq!(calls[0].uniforms.model_view[14], -3.5);
//! ```

use glam::Vec4;
use log::{debug, info, trace, warn};

use crate::camera::{Camera, CameraMode, CameraMotion, TrackingCamera};
use crate::ecs::{MeshId, NormalState, ParticleEmitter, RenderMesh, Spin};
use crate::lighting::ShadingTechnique;
use crate::math::Matrix4;
use crate::mesh::{Mesh, MeshError};
use crate::orbit_camera::OrbitCamera;
use crate::particles::{FRAME_STEP, ParticleSystem};
use crate::pipeline::{FrameTransforms, NormalMatrixPolicy};
use crate::projection::{Projection, ProjectionConfig, ProjectionError};
use crate::render_queue::{DrawCall, DrawQueue, Primitive};
use crate::transform::Transform;

/// Errors from attaching a mesh to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererError {
    /// No mesh is registered under this handle.
    UnknownMesh(MeshId),
    /// The mesh lacks an attribute its technique reads.
    MissingAttribute {
        technique: &'static str,
        attribute: &'static str,
    },
    /// Deriving tangents failed.
    Mesh(MeshError),
}

impl std::fmt::Display for RendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererError::UnknownMesh(id) => write!(f, "Unknown mesh {}", id.index()),
            RendererError::MissingAttribute {
                technique,
                attribute,
            } => write!(f, "{} shading needs {}", technique, attribute),
            RendererError::Mesh(e) => write!(f, "Mesh error: {}", e),
        }
    }
}

impl std::error::Error for RendererError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RendererError::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MeshError> for RendererError {
    fn from(e: MeshError) -> Self {
        RendererError::Mesh(e)
    }
}

/// Checks `mesh` against what `technique` reads, deriving tangents when the
/// technique needs them and the mesh has UVs but no tangents.
///
/// Empty meshes pass unchanged; they are skipped at draw time.
///
/// # Errors
///
/// Returns [`RendererError::MissingAttribute`] for missing normals or
/// texture coordinates.
pub fn prepare_mesh(mesh: Mesh, technique: &ShadingTechnique) -> Result<Mesh, RendererError> {
    check_attributes(&mesh, technique)?;
    if lacks_tangents(&mesh, technique) {
        return Ok(mesh.with_computed_tangents()?);
    }
    Ok(mesh)
}

fn check_attributes(mesh: &Mesh, technique: &ShadingTechnique) -> Result<(), RendererError> {
    if mesh.is_empty() {
        return Ok(());
    }
    let missing = |attribute| RendererError::MissingAttribute {
        technique: technique.name(),
        attribute,
    };

    if technique.requires_normals() && mesh.normals().is_empty() {
        return Err(missing("normals"));
    }
    if technique.requires_texture_coords() && mesh.texture_coords().is_none() {
        return Err(missing("texture coordinates"));
    }
    Ok(())
}

fn lacks_tangents(mesh: &Mesh, technique: &ShadingTechnique) -> bool {
    !mesh.is_empty() && technique.requires_tangents() && mesh.tangents().is_none()
}

// The mesh and technique a drawable was last checked with. Entities whose
// RenderMesh no longer matches are checked again before drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
struct MeshCheck {
    mesh: MeshId,
    technique: ShadingTechnique,
    drawable: bool,
}

impl MeshCheck {
    fn passed(render: &RenderMesh) -> Self {
        Self {
            mesh: render.mesh,
            technique: render.technique,
            drawable: true,
        }
    }

    fn covers(&self, render: &RenderMesh) -> bool {
        self.mesh == render.mesh && self.technique == render.technique
    }
}

/// Initial camera setup, applied on construction and on every
/// [`Renderer::on_surface_created`].
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub mode: CameraMode,
    /// Passed to `go_home`; `z` is the orbit distance.
    pub home: Vec4,
    /// Initial azimuth in degrees.
    pub azimuth: f32,
    /// Initial elevation in degrees.
    pub elevation: f32,
    /// View matrix for [`CameraMode::Tracking`].
    pub fixed_view: Matrix4,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::default(),
            home: Vec4::new(0.0, 0.0, 5.0, 0.0),
            azimuth: 0.0,
            elevation: 0.0,
            fixed_view: Matrix4::IDENTITY,
        }
    }
}

impl CameraConfig {
    pub fn build(&self) -> Camera {
        match self.mode {
            CameraMode::Orbit => OrbitCamera::new()
                .home(self.home)
                .azimuth(self.azimuth)
                .elevation(self.elevation)
                .into(),
            CameraMode::Tracking => TrackingCamera::with_view(self.fixed_view).into(),
        }
    }
}

/// Renderer settings.
///
/// # Default Values
///
/// - `label`: `"glcam"`
/// - `projection`: 45° field of view, near 0.1, far 10000
/// - `clear_color`: opaque black
/// - `camera`: tracking with an identity view
/// - `camera_motion`: none
/// - `normal_policy`: [`NormalMatrixPolicy::ReusePrevious`]
/// - `particle_step`: 0.005 seconds per frame
#[derive(Clone, Debug, PartialEq)]
pub struct RendererConfig {
    /// Name used in log messages.
    pub label: String,
    pub projection: ProjectionConfig,
    pub clear_color: [f32; 4],
    pub camera: CameraConfig,
    /// Added to the camera angles before every frame.
    pub camera_motion: CameraMotion,
    pub normal_policy: NormalMatrixPolicy,
    /// Simulated seconds per frame for particle emitters.
    pub particle_step: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            label: "glcam".to_string(),
            projection: ProjectionConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            camera: CameraConfig::default(),
            camera_motion: CameraMotion::NONE,
            normal_policy: NormalMatrixPolicy::default(),
            particle_step: FRAME_STEP,
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn near(mut self, near: f32) -> Self {
        self.projection.near = near;
        self
    }

    pub fn far(mut self, far: f32) -> Self {
        self.projection.far = far;
        self
    }

    /// Vertical field of view in degrees.
    pub fn fov_degrees(mut self, fov: f32) -> Self {
        self.projection.fov_degrees = fov;
        self
    }

    pub fn clear_color(mut self, rgba: [f32; 4]) -> Self {
        self.clear_color = rgba;
        self
    }

    pub fn camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn camera_mode(mut self, mode: CameraMode) -> Self {
        self.camera.mode = mode;
        self
    }

    pub fn camera_home(mut self, home: Vec4) -> Self {
        self.camera.home = home;
        self
    }

    /// Initial azimuth and elevation in degrees.
    pub fn camera_angles(mut self, azimuth: f32, elevation: f32) -> Self {
        self.camera.azimuth = azimuth;
        self.camera.elevation = elevation;
        self
    }

    pub fn camera_motion(mut self, motion: CameraMotion) -> Self {
        self.camera_motion = motion;
        self
    }

    pub fn normal_policy(mut self, policy: NormalMatrixPolicy) -> Self {
        self.normal_policy = policy;
        self
    }

    pub fn particle_step(mut self, seconds: f32) -> Self {
        self.particle_step = seconds;
        self
    }
}

/// Counters the renderer advances every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    /// Frames drawn since the last surface creation.
    pub frame: u64,
    /// Accumulated camera azimuth, degrees.
    pub azimuth: f32,
    /// Accumulated camera elevation, degrees.
    pub elevation: f32,
}

/// Camera, projection, drawables and meshes for one surface.
pub struct Renderer {
    config: RendererConfig,
    camera: Camera,
    projection: Option<Projection>,
    viewport: Option<(u32, u32)>,
    state: FrameState,
    world: hecs::World,
    queue: DrawQueue,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        let camera = config.camera.build();
        let state = FrameState {
            frame: 0,
            azimuth: config.camera.azimuth,
            elevation: config.camera.elevation,
        };
        Self {
            config,
            camera,
            projection: None,
            viewport: None,
            state,
            world: hecs::World::new(),
            queue: DrawQueue::new(),
        }
    }

    /// Adds a particle emitter at the origin. Builder form of
    /// [`spawn_particles`](Self::spawn_particles).
    pub fn with_particles(mut self, particles: ParticleSystem, point_size: f32) -> Self {
        self.spawn_particles(Transform::new(), particles, point_size);
        self
    }

    pub fn spawn_particles(
        &mut self,
        transform: Transform,
        particles: ParticleSystem,
        point_size: f32,
    ) -> hecs::Entity {
        self.world
            .spawn((transform, ParticleEmitter::new(particles, point_size)))
    }

    // Surface callbacks

    /// Resets the camera to its configured home and restarts the frame
    /// counters. Meshes and entities are kept.
    pub fn on_surface_created(&mut self) {
        self.camera = self.config.camera.build();
        self.state = FrameState {
            frame: 0,
            azimuth: self.config.camera.azimuth,
            elevation: self.config.camera.elevation,
        };
        info!(
            "{}: surface created ({:?} camera, {} meshes)",
            self.config.label,
            self.camera.mode(),
            self.queue.mesh_count()
        );
    }

    /// Rebuilds the projection for a new viewport.
    ///
    /// # Errors
    ///
    /// Returns a [`ProjectionError`] for a zero-sized viewport or degenerate
    /// projection settings. The previous projection stays in effect.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) -> Result<(), ProjectionError> {
        match Projection::for_viewport(width, height, &self.config.projection) {
            Ok(projection) => {
                debug!(
                    "{}: viewport {}x{} (aspect {:.3})",
                    self.config.label,
                    width,
                    height,
                    projection.aspect()
                );
                self.projection = Some(projection);
                self.viewport = Some((width, height));
                Ok(())
            }
            Err(e) => {
                warn!(
                    "{}: keeping previous projection, resize to {}x{} rejected: {}",
                    self.config.label, width, height, e
                );
                Err(e)
            }
        }
    }

    /// Advances animation and returns this frame's draw calls, ordered by
    /// entity.
    ///
    /// Before the first successful [`on_surface_changed`](Self::on_surface_changed)
    /// the projection is identity.
    pub fn on_draw_frame(&mut self) -> &[DrawCall] {
        self.state.frame += 1;
        self.advance();

        let view = self.camera.view_matrix();
        let projection = self
            .projection
            .map(|p| p.matrix)
            .unwrap_or(Matrix4::IDENTITY);
        let policy = self.config.normal_policy;

        self.admit_drawables();

        let mut calls = Vec::new();

        for (entity, (transform, render, check, spin, normals)) in self.world.query_mut::<(
            &Transform,
            &RenderMesh,
            &MeshCheck,
            Option<&Spin>,
            &mut NormalState,
        )>() {
            if !check.drawable {
                continue;
            }
            let index_count = match self.queue.mesh(render.mesh) {
                Some(mesh) if !mesh.is_empty() => mesh.index_count(),
                _ => continue,
            };

            let model = model_matrix(transform, spin);
            let frame = FrameTransforms::compute(
                &model,
                &view,
                &projection,
                normals.last_good.as_ref(),
                policy,
            );

            if frame.normal_fallback {
                if !normals.warned_singular {
                    warn!(
                        "{}: entity {} has a singular model-view matrix; using {:?} normal matrix",
                        self.config.label,
                        entity.id(),
                        policy
                    );
                    normals.warned_singular = true;
                }
            } else {
                normals.last_good = Some(frame.normal);
            }

            calls.push(DrawCall {
                entity,
                mesh: Some(render.mesh),
                technique: render.technique,
                uniforms: frame.uniforms(),
                primitive: Primitive::Triangles { index_count },
            });
        }

        for (entity, (transform, emitter, spin)) in
            self.world
                .query_mut::<(&Transform, &ParticleEmitter, Option<&Spin>)>()
        {
            if emitter.particles.is_empty() {
                continue;
            }
            let model = model_matrix(transform, spin);
            let frame =
                FrameTransforms::compute(&model, &view, &projection, None, NormalMatrixPolicy::Identity);

            calls.push(DrawCall {
                entity,
                mesh: None,
                technique: ShadingTechnique::PointSprite {
                    point_size: emitter.point_size,
                },
                uniforms: frame.uniforms(),
                primitive: Primitive::Points {
                    count: emitter.particles.len(),
                    point_size: emitter.point_size,
                },
            });
        }

        calls.sort_by_key(|call| call.entity.id());

        self.queue.clear_queue();
        for call in calls {
            self.queue.push(call);
        }

        trace!(
            "{}: frame {} with {} draw calls",
            self.config.label,
            self.state.frame,
            self.queue.calls().len()
        );
        self.queue.calls()
    }

    // Spins, camera motion and particles
    fn advance(&mut self) {
        let motion = self.config.camera_motion;
        if !motion.is_still() {
            self.state.azimuth += motion.azimuth_step;
            self.state.elevation += motion.elevation_step;
            self.camera.set_azimuth(self.state.azimuth);
            self.camera.set_elevation(self.state.elevation);
        }

        for (_, spin) in self.world.query_mut::<&mut Spin>() {
            spin.advance();
        }

        let step = self.config.particle_step;
        for (_, emitter) in self.world.query_mut::<&mut ParticleEmitter>() {
            emitter.particles.update(step);
        }
    }

    // Checks drawables that are new or whose RenderMesh changed, including
    // ones spawned straight into world_mut(), and gives each a NormalState.
    // A drawable that fails is warned about once and not drawn.
    fn admit_drawables(&mut self) {
        let pending: Vec<(hecs::Entity, RenderMesh, bool)> = self
            .world
            .query::<(&RenderMesh, Option<&MeshCheck>, Option<&NormalState>)>()
            .iter()
            .filter(|(_, (render, check, _))| !check.is_some_and(|c| c.covers(render)))
            .map(|(entity, (render, _, normals))| (entity, *render, normals.is_none()))
            .collect();

        for (entity, render, needs_normals) in pending {
            let mut check = MeshCheck::passed(&render);
            if let Err(e) = self.check_drawable(&render) {
                warn!(
                    "{}: entity {} is not drawn: {}",
                    self.config.label,
                    entity.id(),
                    e
                );
                check.drawable = false;
            }

            let inserted = if needs_normals {
                self.world.insert(entity, (check, NormalState::default()))
            } else {
                self.world.insert_one(entity, check)
            };
            if inserted.is_err() {
                debug!("{}: entity {} vanished", self.config.label, entity.id());
            }
        }
    }

    // Same rules as prepare_mesh, applied to a mesh already in the store.
    fn check_drawable(&mut self, render: &RenderMesh) -> Result<(), RendererError> {
        let mesh = self
            .queue
            .mesh(render.mesh)
            .ok_or(RendererError::UnknownMesh(render.mesh))?;
        check_attributes(mesh, &render.technique)?;
        if lacks_tangents(mesh, &render.technique) {
            let mesh = mesh.clone().with_computed_tangents()?;
            debug!(
                "{}: derived tangents for mesh {}",
                self.config.label,
                render.mesh.index()
            );
            self.queue.replace_mesh(render.mesh, mesh);
        }
        Ok(())
    }

    // Meshes and entities

    /// Registers a mesh as-is.
    ///
    /// Entities spawned with a [`RenderMesh`] pointing at it are checked on
    /// their first frame: a mesh missing an attribute their technique reads
    /// is logged and not drawn, and tangents are derived where needed.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.queue.add_mesh(mesh)
    }

    /// Replaces the mesh behind `id` and rebuilds the data derived from it.
    ///
    /// The new mesh is checked against the technique of every entity that
    /// draws `id`, and tangents are derived if any of them needs them.
    ///
    /// # Errors
    ///
    /// Returns [`RendererError::UnknownMesh`] if `id` was never registered,
    /// or an attribute error from [`prepare_mesh`]. The old mesh stays in
    /// place on error.
    pub fn set_mesh(&mut self, id: MeshId, mesh: Mesh) -> Result<(), RendererError> {
        if self.queue.mesh(id).is_none() {
            return Err(RendererError::UnknownMesh(id));
        }

        let techniques: Vec<ShadingTechnique> = self
            .world
            .query::<&RenderMesh>()
            .iter()
            .filter(|(_, render)| render.mesh == id)
            .map(|(_, render)| render.technique)
            .collect();

        let mut mesh = mesh;
        for technique in &techniques {
            mesh = prepare_mesh(mesh, technique)?;
        }

        debug!(
            "{}: mesh {} replaced ({} vertices, {} triangles, {} users)",
            self.config.label,
            id.index(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            techniques.len()
        );
        self.queue.replace_mesh(id, mesh);

        // Every user was checked above, including ones rejected earlier
        for (_, (render, check)) in self.world.query_mut::<(&RenderMesh, &mut MeshCheck)>() {
            if render.mesh == id {
                *check = MeshCheck::passed(render);
            }
        }
        Ok(())
    }

    /// Prepares `mesh` for `technique`, registers it and spawns an entity
    /// drawing it.
    ///
    /// # Errors
    ///
    /// See [`prepare_mesh`].
    pub fn spawn_mesh(
        &mut self,
        transform: Transform,
        mesh: Mesh,
        technique: ShadingTechnique,
    ) -> Result<hecs::Entity, RendererError> {
        let mesh = prepare_mesh(mesh, &technique)?;
        let render = RenderMesh::new(self.queue.add_mesh(mesh), technique);
        Ok(self.world.spawn((
            transform,
            render,
            MeshCheck::passed(&render),
            NormalState::default(),
        )))
    }

    /// Spawns an entity from any set of components.
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> hecs::Entity {
        self.world.spawn(components)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.queue.mesh(id)
    }

    /// Particle emitter on `entity`, if it has one.
    pub fn particles(&self, entity: hecs::Entity) -> Option<hecs::Ref<'_, ParticleEmitter>> {
        self.world.get::<&ParticleEmitter>(entity).ok()
    }

    // Accessors

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The projection from the last successful resize.
    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.config.clear_color
    }

    pub fn frame_state(&self) -> &FrameState {
        &self.state
    }

    /// Draw calls from the last frame.
    pub fn draw_calls(&self) -> &[DrawCall] {
        self.queue.calls()
    }
}

fn model_matrix(transform: &Transform, spin: Option<&Spin>) -> Matrix4 {
    let mut model = transform.model_matrix();
    if let Some(spin) = spin {
        spin.apply(&mut model);
    }
    model
}
