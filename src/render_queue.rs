//! Mesh storage and the per-frame draw queue.

use crate::ecs::MeshId;
use crate::lighting::ShadingTechnique;
use crate::mesh::Mesh;
use crate::pipeline::MatrixUniforms;

/// How a draw call's vertices are assembled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// `glDrawElements(GL_TRIANGLES, index_count, GL_UNSIGNED_SHORT, ..)`
    Triangles { index_count: usize },
    /// `glDrawArrays(GL_POINTS, 0, count)` with `uPointSize = point_size`
    Points { count: usize, point_size: f32 },
}

/// One submission for a backend to execute.
///
/// Draw calls never borrow the mesh; look it up with
/// [`DrawQueue::mesh`] (or [`Renderer::mesh`](crate::Renderer::mesh)).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    /// The entity this call draws.
    pub entity: hecs::Entity,
    /// Geometry to bind. `None` for point sprites, whose vertices come from
    /// the particle system.
    pub mesh: Option<MeshId>,
    pub technique: ShadingTechnique,
    pub uniforms: MatrixUniforms,
    pub primitive: Primitive,
}

/// Shared storage for meshes and the per-frame list of draw calls.
///
/// Meshes are stored permanently; the queue is cleared at the start of every
/// frame.
#[derive(Debug, Default)]
pub struct DrawQueue {
    meshes: Vec<Mesh>,
    calls: Vec<DrawCall>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mesh and returns a type-safe handle for later use.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        let idx = self.meshes.len();
        self.meshes.push(mesh);
        MeshId(idx)
    }

    /// Swaps the mesh behind `id`, returning the old one. Returns `None` and
    /// drops `mesh` if `id` is unknown.
    pub fn replace_mesh(&mut self, id: MeshId, mesh: Mesh) -> Option<Mesh> {
        self.meshes
            .get_mut(id.0)
            .map(|slot| std::mem::replace(slot, mesh))
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    /// Draw calls queued this frame, in submission order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Clears the draw queue for the next frame. Registered meshes are kept.
    pub fn clear_queue(&mut self) {
        self.calls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(entity: hecs::Entity, mesh: MeshId) -> DrawCall {
        DrawCall {
            entity,
            mesh: Some(mesh),
            technique: ShadingTechnique::phong(),
            uniforms: MatrixUniforms::default(),
            primitive: Primitive::Triangles { index_count: 36 },
        }
    }

    #[test]
    fn handles_are_sequential() {
        let mut queue = DrawQueue::new();
        let a = queue.add_mesh(Mesh::cube());
        let b = queue.add_mesh(Mesh::plane(1.0));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(queue.mesh(b).map(Mesh::vertex_count), Some(4));
        assert!(queue.mesh(MeshId(2)).is_none());
    }

    #[test]
    fn replace_keeps_the_handle() {
        let mut queue = DrawQueue::new();
        let id = queue.add_mesh(Mesh::cube());
        let old = queue.replace_mesh(id, Mesh::empty()).unwrap();
        assert_eq!(old.vertex_count(), 24);
        assert!(queue.mesh(id).unwrap().is_empty());
        assert!(queue.replace_mesh(MeshId(9), Mesh::empty()).is_none());
    }

    #[test]
    fn clear_keeps_meshes() {
        let mut world = hecs::World::new();
        let entity = world.spawn(());

        let mut queue = DrawQueue::new();
        let id = queue.add_mesh(Mesh::cube());
        queue.push(call(entity, id));
        assert_eq!(queue.calls().len(), 1);

        queue.clear_queue();
        assert!(queue.calls().is_empty());
        assert_eq!(queue.mesh_count(), 1);
    }
}
