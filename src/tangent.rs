//! Per-vertex tangents for normal mapping.
//!
//! Each triangle contributes an unnormalized tangent to its three corners:
//!
//! ```text
//! e1 = p1 - p0            Δv1 = v1 - v0
//! e2 = p2 - p0            Δv2 = v2 - v0
//! T  = Δv2 · e1 - Δv1 · e2
//! ```
//!
//! where `v` is the texture `v` coordinate. The usual `1 / det` factor is
//! left out, so a triangle's weight in a shared corner's sum differs from the
//! textbook one in both magnitude (by `|det|`) and sign. Accumulators are
//! normalized at the end; a vertex used by a single triangle gets the same
//! direction either way, up to sign. Vertices no triangle touches, or whose
//! contributions cancel, get a zero tangent.

use crate::math::vec3;
use crate::mesh::{MeshError, check_attribute, check_indices, check_stride};

/// Computes one unit tangent per vertex.
///
/// `positions` holds 3 floats per vertex and `texture_coords` 2. The result
/// has the same length as `positions`.
///
/// # Errors
///
/// Returns a [`MeshError`] when the buffers disagree on the vertex count or
/// an index is out of range. Nothing is accumulated in that case.
///
/// # Example
/// ```
/// use glcam::tangent::compute_tangents;
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let uvs = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
/// let tangents = compute_tangents(&positions, &uvs, &[0, 1, 2]).unwrap();
/// assert_eq!(&tangents[0..3], &[1.0, 0.0, 0.0]);
/// ```
pub fn compute_tangents(
    positions: &[f32],
    texture_coords: &[f32],
    indices: &[u16],
) -> Result<Vec<f32>, MeshError> {
    check_stride("vertices", positions.len(), 3)?;
    let vertex_count = positions.len() / 3;
    check_attribute("texture_coords", texture_coords.len(), vertex_count * 2)?;
    check_indices(indices, vertex_count)?;

    let mut accumulated = vec![[0.0f32; 3]; vertex_count];

    for face in indices.chunks_exact(3) {
        let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];

        let p0 = vec3::read(positions, i0);
        let e1 = vec3::subtract(vec3::read(positions, i1), p0);
        let e2 = vec3::subtract(vec3::read(positions, i2), p0);

        let v0 = texture_coords[i0 * 2 + 1];
        let dv1 = texture_coords[i1 * 2 + 1] - v0;
        let dv2 = texture_coords[i2 * 2 + 1] - v0;

        let t = vec3::subtract(vec3::scale(e1, dv2), vec3::scale(e2, dv1));

        for i in [i0, i1, i2] {
            accumulated[i] = vec3::add(accumulated[i], t);
        }
    }

    Ok(accumulated.into_iter().flat_map(vec3::normalize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn tangent(tangents: &[f32], i: usize) -> [f32; 3] {
        vec3::read(tangents, i)
    }

    #[test]
    fn axis_aligned_triangle_points_along_x() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let uvs = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let tangents = compute_tangents(&positions, &uvs, &[0, 1, 2]).unwrap();

        assert_eq!(tangents.len(), positions.len());
        for i in 0..3 {
            assert_eq!(tangent(&tangents, i), [1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn shared_corner_weights_faces_by_uv_extent() {
        // Vertex 0 is shared: face A spans 2 in v and points along X,
        // face B spans 1 in v and points along Z
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, //
            0.0, -1.0, 0.0,
        ];
        let uvs = [0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0];
        let tangents = compute_tangents(&positions, &uvs, &[0, 1, 2, 0, 3, 4]).unwrap();

        let t = tangent(&tangents, 0);
        let inv = 1.0 / 5.0f32.sqrt();
        assert!((t[0] - 2.0 * inv).abs() < EPS);
        assert!(t[1].abs() < EPS);
        assert!((t[2] - inv).abs() < EPS);
        assert_eq!(tangent(&tangents, 3), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn shared_vertices_average_their_faces() {
        // Two triangles of a quad in the XY plane sharing the diagonal
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ];
        let uvs = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let tangents = compute_tangents(&positions, &uvs, &[0, 1, 2, 2, 3, 0]).unwrap();

        for i in 0..4 {
            let t = tangent(&tangents, i);
            assert!((t[0] - 1.0).abs() < EPS, "vertex {i}: {t:?}");
            assert!(t[1].abs() < EPS && t[2].abs() < EPS);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_zero_tangent() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0];
        let uvs = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.5, 0.5];
        let tangents = compute_tangents(&positions, &uvs, &[0, 1, 2]).unwrap();
        assert_eq!(tangent(&tangents, 3), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn flat_v_coordinates_give_zero_tangent() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let uvs = [0.0, 0.5, 1.0, 0.5, 0.0, 0.5];
        let tangents = compute_tangents(&positions, &uvs, &[0, 1, 2]).unwrap();
        assert!(tangents.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn every_cube_tangent_is_unit_length() {
        let cube = crate::Mesh::cube();
        let tangents =
            compute_tangents(cube.vertices(), cube.texture_coords().unwrap(), cube.indices())
                .unwrap();
        for i in 0..cube.vertex_count() {
            let len = vec3::length(tangent(&tangents, i));
            assert!((len - 1.0).abs() < 1e-5, "vertex {i}");
        }
    }

    #[test]
    fn mismatched_uvs_are_rejected() {
        let positions = [0.0; 9];
        let err = compute_tangents(&positions, &[0.0; 4], &[0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::AttributeLength {
                attribute: "texture_coords",
                expected: 6,
                actual: 4
            }
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let positions = [0.0; 9];
        let uvs = [0.0; 6];
        assert!(matches!(
            compute_tangents(&positions, &uvs, &[0, 1, 7]),
            Err(MeshError::IndexOutOfRange { index: 7, .. })
        ));
    }
}
