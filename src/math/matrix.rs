use glam::Mat4;

use super::vec3;
use crate::projection::ProjectionError;

/// A column-major 4×4 matrix of `f32`.
///
/// `Matrix4` is a plain 64-byte array, so it can be handed to a uniform upload
/// with [`bytemuck::bytes_of`] or [`Matrix4::as_slice`] without conversion.
/// Mutating operations right-multiply in place and return `&mut Self` so calls
/// chain in the order the samples write them:
///
/// ```
/// use glcam::Matrix4;
///
/// let mut mv = Matrix4::IDENTITY;
/// mv.translate(0.0, 0.0, -3.5)
///     .rotate(30.0, [0.0, 1.0, 0.0]);
///
/// assert_eq!(mv.translation(), [0.0, 0.0, -3.5, 1.0]);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4(pub [f32; 16]);

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Wraps a column-major array.
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self(m)
    }

    /// Resets the matrix to identity.
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Column `index` as `[x, y, z, w]`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    pub fn column(&self, index: usize) -> [f32; 4] {
        let i = index * 4;
        [self.0[i], self.0[i + 1], self.0[i + 2], self.0[i + 3]]
    }

    /// The translation column.
    pub fn translation(&self) -> [f32; 4] {
        self.column(3)
    }

    /// Right-multiplies by a translation: `self = self * T(x, y, z)`.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let m = &mut self.0;
        for i in 0..4 {
            m[12 + i] += m[i] * x + m[4 + i] * y + m[8 + i] * z;
        }
        self
    }

    /// Right-multiplies by a scale: `self = self * S(x, y, z)`.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let m = &mut self.0;
        for i in 0..4 {
            m[i] *= x;
            m[4 + i] *= y;
            m[8 + i] *= z;
        }
        self
    }

    /// Right-multiplies by a rotation of `angle_degrees` around `axis`.
    ///
    /// The axis does not need to be unit length. A zero axis leaves the
    /// matrix untouched.
    pub fn rotate(&mut self, angle_degrees: f32, axis: [f32; 3]) -> &mut Self {
        if let Some(r) = Self::rotation(angle_degrees, axis) {
            *self = Self::multiply(self, &r);
        }
        self
    }

    /// A rotation of `angle_degrees` around `axis`, or `None` for a zero axis.
    ///
    /// Unit coordinate axes take a dedicated path so the untouched row and
    /// column stay exactly 0 and 1.
    #[rustfmt::skip]
    pub fn rotation(angle_degrees: f32, axis: [f32; 3]) -> Option<Self> {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        let mut r = Self::IDENTITY;
        let m = &mut r.0;

        if axis == [1.0, 0.0, 0.0] {
            m[5] = c;  m[9] = -s;
            m[6] = s;  m[10] = c;
        } else if axis == [0.0, 1.0, 0.0] {
            m[0] = c;  m[8] = s;
            m[2] = -s; m[10] = c;
        } else if axis == [0.0, 0.0, 1.0] {
            m[0] = c;  m[4] = -s;
            m[1] = s;  m[5] = c;
        } else {
            let [x, y, z] = vec3::normalize(axis);
            if x == 0.0 && y == 0.0 && z == 0.0 {
                return None;
            }
            let nc = 1.0 - c;
            let (xy, yz, zx) = (x * y, y * z, z * x);
            let (xs, ys, zs) = (x * s, y * s, z * s);

            m[0] = x * x * nc + c;  m[4] = xy * nc - zs;    m[8] = zx * nc + ys;
            m[1] = xy * nc + zs;    m[5] = y * y * nc + c;  m[9] = yz * nc - xs;
            m[2] = zx * nc - ys;    m[6] = yz * nc + xs;    m[10] = z * z * nc + c;
        }

        Some(r)
    }

    /// Returns `a * b`.
    ///
    /// With column vectors on the right, `b` is applied to a vertex first.
    pub fn multiply(a: &Self, b: &Self) -> Self {
        (a.to_glam() * b.to_glam()).into()
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let m = &self.0;
        let mut t = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                t[row * 4 + col] = m[col * 4 + row];
            }
        }
        Self(t)
    }

    pub fn determinant(&self) -> f32 {
        self.to_glam().determinant()
    }

    /// Returns the inverse, or `None` if the matrix is singular.
    pub fn invert(&self) -> Option<Self> {
        let m = self.to_glam();
        let det = m.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(m.inverse().into())
    }

    /// A perspective projection for the given clip-plane bounds.
    ///
    /// Same layout as `glFrustum`: the result maps the view volume to clip
    /// space with `w = -z`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidFrustum`] when a pair of opposite
    /// planes coincide or when `near`/`far` is not positive.
    pub fn frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, ProjectionError> {
        if left == right {
            return Err(ProjectionError::InvalidFrustum("left == right"));
        }
        if top == bottom {
            return Err(ProjectionError::InvalidFrustum("top == bottom"));
        }
        if near == far {
            return Err(ProjectionError::InvalidFrustum("near == far"));
        }
        if near <= 0.0 {
            return Err(ProjectionError::InvalidFrustum("near <= 0"));
        }
        if far <= 0.0 {
            return Err(ProjectionError::InvalidFrustum("far <= 0"));
        }

        let r_width = 1.0 / (right - left);
        let r_height = 1.0 / (top - bottom);
        let r_depth = 1.0 / (near - far);

        let mut m = [0.0; 16];
        m[0] = 2.0 * (near * r_width);
        m[5] = 2.0 * (near * r_height);
        m[8] = (right + left) * r_width;
        m[9] = (top + bottom) * r_height;
        m[10] = (far + near) * r_depth;
        m[11] = -1.0;
        m[14] = 2.0 * (far * near * r_depth);
        Ok(Self(m))
    }

    /// A view matrix looking from `eye` towards `center`.
    ///
    /// Degenerates to a singular matrix when `up` is parallel to the view
    /// direction.
    #[rustfmt::skip]
    pub fn look_at(eye: [f32; 3], center: [f32; 3], up: [f32; 3]) -> Self {
        let f = vec3::normalize(vec3::subtract(center, eye));
        let s = vec3::normalize(vec3::cross(f, up));
        let u = vec3::cross(s, f);

        let mut m = Self([
            s[0], u[0], -f[0], 0.0,
            s[1], u[1], -f[1], 0.0,
            s[2], u[2], -f[2], 0.0,
            0.0,  0.0,  0.0,   1.0,
        ]);
        m.translate(-eye[0], -eye[1], -eye[2]);
        m
    }

    /// Transforms a point (`w = 1`) without perspective division.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            m[0] * p[0] + m[4] * p[1] + m[8] * p[2] + m[12],
            m[1] * p[0] + m[5] * p[1] + m[9] * p[2] + m[13],
            m[2] * p[0] + m[6] * p[1] + m[10] * p[2] + m[14],
        ]
    }

    /// Transforms a direction (`w = 0`).
    pub fn transform_vector(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            m[0] * v[0] + m[4] * v[1] + m[8] * v[2],
            m[1] * v[0] + m[5] * v[1] + m[9] * v[2],
            m[2] * v[0] + m[6] * v[1] + m[10] * v[2],
        ]
    }

    /// Element-wise comparison within `epsilon`.
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn to_glam(&self) -> Mat4 {
        Mat4::from_cols_array(&self.0)
    }
}

impl From<Mat4> for Matrix4 {
    fn from(m: Mat4) -> Self {
        Self(m.to_cols_array())
    }
}

impl From<Matrix4> for Mat4 {
    fn from(m: Matrix4) -> Self {
        m.to_glam()
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Matrix4::multiply(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    const EPS: f32 = 1e-5;

    fn sample() -> Matrix4 {
        let mut m = Matrix4::IDENTITY;
        m.translate(1.0, -2.0, 3.0)
            .scale(2.0, 0.5, 1.5)
            .rotate(33.0, [1.0, 1.0, 0.0])
            .rotate(-71.0, [0.0, 0.0, 1.0]);
        m
    }

    #[test]
    fn identity_is_neutral_for_multiply() {
        let m = sample();
        assert_eq!(Matrix4::multiply(&Matrix4::IDENTITY, &m), m);
        assert_eq!(Matrix4::multiply(&m, &Matrix4::IDENTITY), m);
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let mut t = Matrix4::IDENTITY;
        t.translate(5.0, 0.0, 0.0);
        let mut s = Matrix4::IDENTITY;
        s.scale(2.0, 2.0, 2.0);

        // scale then translate
        let ts = t * s;
        assert_eq!(ts.transform_point([1.0, 0.0, 0.0]), [7.0, 0.0, 0.0]);
        // translate then scale
        let st = s * t;
        assert_eq!(st.transform_point([1.0, 0.0, 0.0]), [12.0, 0.0, 0.0]);
    }

    #[test]
    fn translate_matches_glam() {
        let mut m = sample();
        let expected = m.to_glam() * Mat4::from_translation(Vec3::new(0.5, 4.0, -1.0));
        m.translate(0.5, 4.0, -1.0);
        assert!(m.abs_diff_eq(&expected.into(), EPS));
    }

    #[test]
    fn scale_matches_glam() {
        let mut m = sample();
        let expected = m.to_glam() * Mat4::from_scale(Vec3::new(3.0, 0.25, -2.0));
        m.scale(3.0, 0.25, -2.0);
        assert!(m.abs_diff_eq(&expected.into(), EPS));
    }

    #[test]
    fn rotation_matches_glam_for_arbitrary_axis() {
        let r = Matrix4::rotation(40.0, [1.0, 1.0, 0.0]).unwrap();
        let axis = Vec3::new(1.0, 1.0, 0.0).normalize();
        let expected = Mat4::from_quat(Quat::from_axis_angle(axis, 40.0f32.to_radians()));
        assert!(r.abs_diff_eq(&expected.into(), EPS));
    }

    #[test]
    fn rotation_about_coordinate_axes_matches_glam() {
        let cases = [
            ([1.0, 0.0, 0.0], Mat4::from_rotation_x(25.0f32.to_radians())),
            ([0.0, 1.0, 0.0], Mat4::from_rotation_y(25.0f32.to_radians())),
            ([0.0, 0.0, 1.0], Mat4::from_rotation_z(25.0f32.to_radians())),
        ];
        for (axis, expected) in cases {
            let r = Matrix4::rotation(25.0, axis).unwrap();
            assert!(r.abs_diff_eq(&expected.into(), EPS), "axis {axis:?}");
        }
    }

    #[test]
    fn rotate_with_zero_axis_is_noop() {
        let mut m = sample();
        let before = m;
        m.rotate(90.0, [0.0, 0.0, 0.0]);
        assert_eq!(m, before);
    }

    #[test]
    fn transpose_twice_is_identity_op() {
        let m = sample();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().0[1], m.0[4]);
    }

    #[test]
    fn invert_round_trips() {
        let m = sample();
        let inv = m.invert().unwrap();
        let back = inv.invert().unwrap();
        assert!(back.abs_diff_eq(&m, 1e-4));
        assert!((m * inv).abs_diff_eq(&Matrix4::IDENTITY, 1e-4));
    }

    #[test]
    fn invert_rejects_singular_matrices() {
        let mut m = Matrix4::IDENTITY;
        m.scale(0.0, 1.0, 1.0);
        assert!(m.invert().is_none());
        assert!(Matrix4([0.0; 16]).invert().is_none());
    }

    #[test]
    fn frustum_layout() {
        let m = Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0).unwrap();
        assert_eq!(m.0[0], 2.0 * 1.0 * 0.5);
        assert_eq!(m.0[5], 1.0);
        assert_eq!(m.0[8], 0.0);
        assert_eq!(m.0[10], -2.0);
        assert_eq!(m.0[11], -1.0);
        assert_eq!(m.0[14], -3.0);
        assert_eq!(m.0[15], 0.0);
    }

    #[test]
    fn frustum_rejects_degenerate_bounds() {
        assert!(Matrix4::frustum(1.0, 1.0, -1.0, 1.0, 0.1, 10.0).is_err());
        assert!(Matrix4::frustum(-1.0, 1.0, 2.0, 2.0, 0.1, 10.0).is_err());
        assert!(Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0).is_err());
        assert!(Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 5.0, 5.0).is_err());
        assert!(Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 0.1, -1.0).is_err());
    }

    #[test]
    fn look_at_matches_glam() {
        let eye = [3.0, 2.0, 5.0];
        let m = Matrix4::look_at(eye, [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let expected = Mat4::look_at_rh(Vec3::from(eye), Vec3::ZERO, Vec3::Y);
        assert!(m.abs_diff_eq(&expected.into(), EPS));
        let origin = m.transform_point(eye);
        assert!(origin.iter().all(|c| c.abs() < EPS));
    }

    #[test]
    fn bytes_are_column_major() {
        let mut m = Matrix4::IDENTITY;
        m.translate(1.0, 2.0, 3.0);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&m));
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
    }
}
