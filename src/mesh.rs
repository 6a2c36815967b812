//! Mesh data and built-in primitives.
//!
//! A [`Mesh`] is the flat-array record a mesh loader hands over: positions,
//! indices and normals, plus optional texture coordinates and tangents. It is
//! validated once when built and never changes afterwards, so nothing at draw
//! time has to re-check index ranges.
//!
//! ```
//! use glcam::Mesh;
//!
//! // One triangle in the XY plane
//! let mesh = Mesh::new(
//!     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
//!     vec![0, 1, 2],
//!     vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
//! )
//! .unwrap();
//! assert_eq!(mesh.triangle_count(), 1);
//!
//! // Out-of-range indices are rejected up front
//! assert!(Mesh::new(vec![0.0; 9], vec![0, 1, 3], vec![]).is_err());
//! ```
//!
//! # Vertex Layout
//!
//! [`Mesh::interleaved`] packs attributes into [`Vertex`] (44 bytes):
//!
//! | Attribute | Floats | Offset |
//! |-----------|--------|--------|
//! | position  | 3      | 0      |
//! | normal    | 3      | 12     |
//! | uv        | 2      | 24     |
//! | tangent   | 3      | 32     |

use glam::Vec3;

use crate::math::vec3;
use crate::tangent;

/// Errors that can occur when building a mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A flat buffer's length is not a multiple of its stride.
    LengthNotMultiple {
        attribute: &'static str,
        len: usize,
        stride: usize,
    },
    /// An index refers past the last vertex.
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: usize,
    },
    /// An attribute does not have one entry per vertex.
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Tangents were requested for a mesh without texture coordinates.
    MissingTextureCoords,
    /// More vertices than 16-bit indices can address.
    TooManyVertices(usize),
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::LengthNotMultiple {
                attribute,
                len,
                stride,
            } => write!(
                f,
                "{} length {} is not a multiple of {}",
                attribute, len, stride
            ),
            MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            } => write!(
                f,
                "Index {} at position {} is out of range for {} vertices",
                index, position, vertex_count
            ),
            MeshError::AttributeLength {
                attribute,
                expected,
                actual,
            } => write!(
                f,
                "{} has {} floats, expected {}",
                attribute, actual, expected
            ),
            MeshError::MissingTextureCoords => {
                write!(f, "Tangents need texture coordinates")
            }
            MeshError::TooManyVertices(count) => {
                write!(f, "{} vertices exceed the 16-bit index range", count)
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Maximum vertex count addressable with `u16` indices.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// An interleaved vertex for upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
}

impl Vertex {
    /// A vertex with a zero tangent.
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
            tangent: [0.0; 3],
        }
    }
}

/// Validated, immutable mesh data in flat arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    indices: Vec<u16>,
    normals: Vec<f32>,
    texture_coords: Option<Vec<f32>>,
    tangents: Option<Vec<f32>>,
}

pub(crate) fn check_stride(
    attribute: &'static str,
    len: usize,
    stride: usize,
) -> Result<(), MeshError> {
    if len % stride != 0 {
        return Err(MeshError::LengthNotMultiple {
            attribute,
            len,
            stride,
        });
    }
    Ok(())
}

pub(crate) fn check_indices(indices: &[u16], vertex_count: usize) -> Result<(), MeshError> {
    check_stride("indices", indices.len(), 3)?;
    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &i)| i as usize >= vertex_count)
    {
        return Err(MeshError::IndexOutOfRange {
            position,
            index,
            vertex_count,
        });
    }
    Ok(())
}

pub(crate) fn check_attribute(
    attribute: &'static str,
    actual: usize,
    expected: usize,
) -> Result<(), MeshError> {
    if actual != expected {
        return Err(MeshError::AttributeLength {
            attribute,
            expected,
            actual,
        });
    }
    Ok(())
}

impl Mesh {
    /// Builds a mesh from positions (3 per vertex), triangle indices and
    /// normals.
    ///
    /// `normals` may be empty for meshes that are never lit.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] when a buffer length is inconsistent, an index
    /// is out of range, or there are more vertices than `u16` can address.
    pub fn new(vertices: Vec<f32>, indices: Vec<u16>, normals: Vec<f32>) -> Result<Self, MeshError> {
        check_stride("vertices", vertices.len(), 3)?;
        let vertex_count = vertices.len() / 3;
        if vertex_count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices(vertex_count));
        }
        check_indices(&indices, vertex_count)?;
        if !normals.is_empty() {
            check_attribute("normals", normals.len(), vertices.len())?;
        }

        Ok(Self {
            vertices,
            indices,
            normals,
            texture_coords: None,
            tangents: None,
        })
    }

    /// A mesh with no geometry. Renders nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a mesh from interleaved vertices. Texture coordinates are kept;
    /// tangents are not.
    ///
    /// # Errors
    ///
    /// See [`Mesh::new`].
    pub fn from_vertices(vertices: &[Vertex], indices: Vec<u16>) -> Result<Self, MeshError> {
        let positions = vertices.iter().flat_map(|v| v.position).collect();
        let normals = vertices.iter().flat_map(|v| v.normal).collect();
        let uvs = vertices.iter().flat_map(|v| v.uv).collect();
        Self::new(positions, indices, normals)?.with_texture_coords(uvs)
    }

    /// Attaches texture coordinates (2 per vertex).
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::AttributeLength`] if there is not one pair per
    /// vertex.
    pub fn with_texture_coords(mut self, texture_coords: Vec<f32>) -> Result<Self, MeshError> {
        check_attribute("texture_coords", texture_coords.len(), self.vertex_count() * 2)?;
        self.texture_coords = Some(texture_coords);
        Ok(self)
    }

    /// Attaches precomputed tangents (3 per vertex).
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::AttributeLength`] on a length mismatch.
    pub fn with_tangents(mut self, tangents: Vec<f32>) -> Result<Self, MeshError> {
        check_attribute("tangents", tangents.len(), self.vertices.len())?;
        self.tangents = Some(tangents);
        Ok(self)
    }

    /// Derives per-vertex tangents from positions and texture coordinates.
    ///
    /// See [`tangent::compute_tangents`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MissingTextureCoords`] if the mesh has no UVs.
    pub fn with_computed_tangents(mut self) -> Result<Self, MeshError> {
        let uvs = self
            .texture_coords
            .as_deref()
            .ok_or(MeshError::MissingTextureCoords)?;
        let tangents = tangent::compute_tangents(&self.vertices, uvs, &self.indices)?;
        self.tangents = Some(tangents);
        Ok(self)
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn texture_coords(&self) -> Option<&[f32]> {
        self.texture_coords.as_deref()
    }

    pub fn tangents(&self) -> Option<&[f32]> {
        self.tangents.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() || self.vertices.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in self.vertices.chunks_exact(3) {
            let p = Vec3::new(p[0], p[1], p[2]);
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }

    /// Packs all attributes into one buffer. Missing attributes are zero.
    pub fn interleaved(&self) -> Vec<Vertex> {
        (0..self.vertex_count())
            .map(|i| {
                let mut v = Vertex {
                    position: [
                        self.vertices[i * 3],
                        self.vertices[i * 3 + 1],
                        self.vertices[i * 3 + 2],
                    ],
                    ..Default::default()
                };
                if !self.normals.is_empty() {
                    v.normal = [
                        self.normals[i * 3],
                        self.normals[i * 3 + 1],
                        self.normals[i * 3 + 2],
                    ];
                }
                if let Some(uv) = &self.texture_coords {
                    v.uv = [uv[i * 2], uv[i * 2 + 1]];
                }
                if let Some(t) = &self.tangents {
                    v.tangent = [t[i * 3], t[i * 3 + 1], t[i * 3 + 2]];
                }
                v
            })
            .collect()
    }

    /// A unit cube centered at the origin.
    ///
    /// 24 vertices (4 per face) so every face gets its own normal and the
    /// full `[0, 1]` UV range; 12 triangles, counter-clockwise winding.
    pub fn cube() -> Self {
        // normal, then the face's u and v directions; u × v = normal
        const FACES: [[[f32; 3]; 3]; 6] = [
            [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
            [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]],
            [[-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
        ];
        const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        let mut positions = Vec::with_capacity(24 * 3);
        let mut normals = Vec::with_capacity(24 * 3);
        let mut uvs = Vec::with_capacity(24 * 2);
        let mut indices = Vec::with_capacity(36);

        for (face, [normal, u_dir, v_dir]) in FACES.iter().enumerate() {
            for [u, v] in CORNERS {
                let offset = vec3::add(vec3::scale(*u_dir, u - 0.5), vec3::scale(*v_dir, v - 0.5));
                positions.extend(vec3::add(vec3::scale(*normal, 0.5), offset));
                normals.extend(normal);
                uvs.extend([u, v]);
            }
            let first = (face * 4) as u16;
            indices.extend([first, first + 1, first + 2, first + 2, first + 3, first]);
        }

        Self::from_built_in(positions, normals, uvs, indices)
    }

    /// A UV sphere of radius 0.5 centered at the origin.
    ///
    /// `(segments + 1) × (rings + 1)` vertices, `segments × rings × 2`
    /// triangles, equirectangular UVs. Fewer than 3 segments or 2 rings are
    /// raised to that minimum.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TooManyVertices`] when the tessellation needs more
    /// vertices than 16-bit indices allow.
    pub fn sphere(segments: u32, rings: u32) -> Result<Self, MeshError> {
        let columns = (segments.max(3) as usize).saturating_add(1);
        let rows = (rings.max(2) as usize).saturating_add(1);
        let vertex_count = columns.saturating_mul(rows);
        if vertex_count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices(vertex_count));
        }
        let (segments, rings) = (columns - 1, rows - 1);

        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut normals = Vec::with_capacity(vertex_count * 3);
        let mut uvs = Vec::with_capacity(vertex_count * 2);

        for ring in 0..rows {
            let v = ring as f32 / rings as f32;
            let (ring_radius, y) = (std::f32::consts::PI * v).sin_cos();
            for seg in 0..columns {
                let u = seg as f32 / segments as f32;
                let (z, x) = (std::f32::consts::TAU * u).sin_cos();
                let normal = [ring_radius * x, y, ring_radius * z];
                positions.extend(vec3::scale(normal, 0.5));
                normals.extend(normal);
                uvs.extend([u, v]);
            }
        }

        // Every index fits: vertex_count <= MAX_VERTICES was checked above.
        let mut indices = Vec::with_capacity(segments * rings * 6);
        for ring in 0..rings {
            for seg in 0..segments {
                let current = (ring * columns + seg) as u16;
                let below = current + columns as u16;
                indices.extend([current, below, current + 1, current + 1, below, below + 1]);
            }
        }

        Ok(Self::from_built_in(positions, normals, uvs, indices))
    }

    /// A `size × size` plane on the XZ axis with normals pointing up (+Y).
    pub fn plane(size: f32) -> Self {
        let half = size * 0.5;
        Self::from_built_in(
            vec![-half, 0.0, -half, half, 0.0, -half, half, 0.0, half, -half, 0.0, half],
            [0.0, 1.0, 0.0].repeat(4),
            vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            vec![0, 2, 1, 2, 0, 3],
        )
    }

    // Built-in geometry is generated in range and needs no validation.
    fn from_built_in(
        vertices: Vec<f32>,
        normals: Vec<f32>,
        texture_coords: Vec<f32>,
        indices: Vec<u16>,
    ) -> Self {
        Self {
            vertices,
            indices,
            normals,
            texture_coords: Some(texture_coords),
            tangents: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn rejects_partial_triangles() {
        let err = Mesh::new(vec![0.0; 9], vec![0, 1], vec![]).unwrap_err();
        assert_eq!(
            err,
            MeshError::LengthNotMultiple {
                attribute: "indices",
                len: 2,
                stride: 3
            }
        );
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::new(vec![0.0; 9], vec![0, 1, 2, 2, 1, 3], vec![]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                position: 5,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn rejects_ragged_positions_and_normals() {
        assert!(matches!(
            Mesh::new(vec![0.0; 8], vec![], vec![]),
            Err(MeshError::LengthNotMultiple { attribute: "vertices", .. })
        ));
        assert!(matches!(
            Mesh::new(vec![0.0; 9], vec![0, 1, 2], vec![0.0; 6]),
            Err(MeshError::AttributeLength { attribute: "normals", .. })
        ));
    }

    #[test]
    fn texture_coords_need_one_pair_per_vertex() {
        assert!(triangle().with_texture_coords(vec![0.0; 5]).is_err());
        let mesh = triangle().with_texture_coords(vec![0.0; 6]).unwrap();
        assert_eq!(mesh.texture_coords().map(<[f32]>::len), Some(6));
    }

    #[test]
    fn computed_tangents_need_texture_coords() {
        assert_eq!(
            triangle().with_computed_tangents().unwrap_err(),
            MeshError::MissingTextureCoords
        );
    }

    #[test]
    fn empty_mesh_is_valid_and_draws_nothing() {
        let mesh = Mesh::empty();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.bounds().is_none());
        assert!(mesh.interleaved().is_empty());
        assert!(Mesh::new(vec![], vec![], vec![]).unwrap().is_empty());
    }

    #[test]
    fn cube_is_well_formed() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(check_indices(cube.indices(), cube.vertex_count()).is_ok());

        let (min, max) = cube.bounds().unwrap();
        assert_eq!(min, Vec3::splat(-0.5));
        assert_eq!(max, Vec3::splat(0.5));
    }

    #[test]
    fn cube_faces_wind_outward() {
        let cube = Mesh::cube();
        for face in cube.indices().chunks(3) {
            let p = |i: u16| vec3::read(cube.vertices(), i as usize);
            let e1 = vec3::subtract(p(face[1]), p(face[0]));
            let e2 = vec3::subtract(p(face[2]), p(face[0]));
            let winding = vec3::normalize(vec3::cross(e1, e2));
            assert_eq!(winding, vec3::read(cube.normals(), face[0] as usize));
        }
    }

    #[test]
    fn sphere_counts() {
        let sphere = Mesh::sphere(16, 8).unwrap();
        assert_eq!(sphere.vertex_count(), 17 * 9);
        assert_eq!(sphere.triangle_count(), 16 * 8 * 2);
        assert!(Mesh::sphere(512, 512).is_err());
    }

    #[test]
    fn huge_sphere_is_an_error_not_an_overflow() {
        assert!(matches!(
            Mesh::sphere(u32::MAX, 2),
            Err(MeshError::TooManyVertices(_))
        ));
        assert!(matches!(
            Mesh::sphere(70_000, 70_000),
            Err(MeshError::TooManyVertices(_))
        ));
    }

    #[test]
    fn largest_sphere_uses_full_index_range() {
        // 256 × 256 vertices is exactly 65536
        let sphere = Mesh::sphere(255, 255).unwrap();
        assert_eq!(sphere.vertex_count(), MAX_VERTICES);
        assert!(check_indices(sphere.indices(), sphere.vertex_count()).is_ok());
    }

    #[test]
    fn sphere_normals_are_unit_and_outward() {
        let sphere = Mesh::sphere(12, 6).unwrap();
        for i in 0..sphere.vertex_count() {
            let p = vec3::read(sphere.vertices(), i);
            let n = vec3::read(sphere.normals(), i);
            assert!((vec3::length(n) - 1.0).abs() < 1e-5);
            assert!(vec3::length(vec3::subtract(vec3::scale(n, 0.5), p)) < 1e-6);
        }
    }

    #[test]
    fn from_vertices_splits_attributes() {
        let up = [0.0, 0.0, 1.0];
        let vertices = [
            Vertex::new([0.0, 0.0, 0.0], up, [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], up, [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], up, [0.0, 1.0]),
        ];
        let mesh = Mesh::from_vertices(&vertices, vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.vertices(), triangle().vertices());
        assert_eq!(mesh.normals(), triangle().normals());
        assert_eq!(mesh.texture_coords(), Some(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0][..]));
        assert!(Mesh::from_vertices(&vertices, vec![0, 1, 3]).is_err());
    }

    #[test]
    fn plane_faces_up() {
        let plane = Mesh::plane(10.0);
        let v = plane.vertices();
        let face = plane.indices();
        let p = |i: u16| Vec3::new(v[i as usize * 3], v[i as usize * 3 + 1], v[i as usize * 3 + 2]);
        let normal = (p(face[1]) - p(face[0])).cross(p(face[2]) - p(face[0]));
        assert!(normal.y > 0.0);
    }

    #[test]
    fn interleaved_carries_every_attribute() {
        let mesh = Mesh::cube().with_computed_tangents().unwrap();
        let packed = mesh.interleaved();
        assert_eq!(packed.len(), 24);
        assert_eq!(packed[1].position, [0.5, -0.5, 0.5]);
        assert_eq!(packed[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(packed[1].uv, [1.0, 0.0]);
        assert_eq!(packed[1].tangent, [1.0, 0.0, 0.0]);
        assert_eq!(std::mem::size_of::<Vertex>(), 44);
    }
}
