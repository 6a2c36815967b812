//! Per-object placement: position, Euler rotation and scale.
//!
//! ```
//! use glcam::{Transform, Vec3};
//!
//! let transform = Transform::new()
//!     .position(Vec3::new(-2.0, 1.0, 0.0))
//!     .rotation(Vec3::new(45.0, -45.0, 0.0))
//!     .uniform_scale(2.0);
//!
//! let model = transform.model_matrix();
//! assert_eq!(model.translation(), [-2.0, 1.0, 0.0, 1.0]);
//! ```

use glam::Vec3;

use crate::math::Matrix4;

/// Position, rotation and scale of a drawable.
///
/// # Matrix Order
///
/// [`Transform::model_matrix`] starts from identity and right-multiplies, in
/// this order: translate(position), scale(scale), rotate X, rotate Y,
/// rotate Z. A vertex therefore sees the Z rotation first and the translation
/// last, and the rotations happen in the object's unscaled frame *before* the
/// scale is applied. With non-uniform scale this differs from a TRS matrix
/// built from a single combined rotation.
///
/// # Default Values
///
/// - `position`: `(0, 0, 0)`
/// - `rotation`: `(0, 0, 0)` degrees
/// - `scale`: `(1, 1, 1)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation.
    pub position: Vec3,
    /// Euler angles in degrees around X, Y and Z.
    pub rotation: Vec3,
    /// Scale factors for each axis. A zero component makes the model matrix
    /// singular.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transform positioned at the given location.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the Euler angles, in degrees.
    pub fn rotation(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn place(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
    }

    /// Overwrites the Euler angles, in degrees.
    pub fn rotate(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Vec3::new(x, y, z);
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vec3::new(x, y, z);
    }

    /// Builds the model matrix. See [Matrix Order](Self#matrix-order).
    pub fn model_matrix(&self) -> Matrix4 {
        let mut m = Matrix4::IDENTITY;
        m.translate(self.position.x, self.position.y, self.position.z)
            .scale(self.scale.x, self.scale.y, self.scale.z)
            .rotate(self.rotation.x, [1.0, 0.0, 0.0])
            .rotate(self.rotation.y, [0.0, 1.0, 0.0])
            .rotate(self.rotation.z, [0.0, 0.0, 1.0]);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Quat};

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform::new().model_matrix(), Matrix4::IDENTITY);
    }

    #[test]
    fn translation_only() {
        let t = Transform::from_position(Vec3::new(0.0, 0.0, -3.5));
        assert_eq!(t.model_matrix().translation(), [0.0, 0.0, -3.5, 1.0]);
    }

    #[test]
    fn order_is_translate_scale_then_xyz_rotations() {
        let t = Transform::new()
            .position(Vec3::new(1.0, 2.0, 3.0))
            .rotation(Vec3::new(30.0, 45.0, 60.0))
            .scale(Vec3::new(2.0, 1.0, 0.5));

        let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5))
            * Mat4::from_rotation_x(30.0f32.to_radians())
            * Mat4::from_rotation_y(45.0f32.to_radians())
            * Mat4::from_rotation_z(60.0f32.to_radians());

        assert!(t.model_matrix().abs_diff_eq(&expected.into(), 1e-5));
    }

    #[test]
    fn differs_from_trs_under_non_uniform_scale() {
        let t = Transform::new()
            .rotation(Vec3::new(0.0, 0.0, 45.0))
            .scale(Vec3::new(2.0, 1.0, 1.0));

        let rotation = Quat::from_rotation_z(45.0f32.to_radians());
        let trs = Mat4::from_scale_rotation_translation(t.scale, rotation, Vec3::ZERO);

        assert!(!t.model_matrix().abs_diff_eq(&trs.into(), 1e-3));
    }

    #[test]
    fn setters_overwrite() {
        let mut t = Transform::new();
        t.place(2.0, 1.0, 0.0);
        t.rotate(90.0, 0.0, 0.0);
        t.set_scale(2.0, 2.0, 2.0);
        assert_eq!(t.position, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(t.rotation, Vec3::new(90.0, 0.0, 0.0));
        assert_eq!(t.scale, Vec3::splat(2.0));
    }

    #[test]
    fn zero_scale_is_singular() {
        let t = Transform::new().scale(Vec3::new(0.0, 1.0, 1.0));
        assert!(t.model_matrix().invert().is_none());
    }
}
