//! Per-object, per-frame matrix composition.
//!
//! For every drawable the renderer builds a model matrix (see
//! [`Transform::model_matrix`](crate::Transform::model_matrix)), then:
//!
//! 1. `model_view = view * model`
//! 2. `normal = invert(transpose(model_view))`, falling back per
//!    [`NormalMatrixPolicy`] when the model-view matrix is singular
//! 3. pairs both with the projection from the last resize
//!
//! The result is packed into [`MatrixUniforms`] for upload.

use crate::math::Matrix4;

/// What to use as the normal matrix when the model-view matrix cannot be
/// inverted (for example a zero scale on some axis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalMatrixPolicy {
    /// Keep the entity's normal matrix from its last good frame, or identity
    /// if it never had one.
    #[default]
    ReusePrevious,
    /// Always fall back to identity.
    Identity,
}

impl NormalMatrixPolicy {
    /// The normal matrix to use when inversion failed.
    pub fn fallback(self, previous: Option<&Matrix4>) -> Matrix4 {
        match (self, previous) {
            (NormalMatrixPolicy::ReusePrevious, Some(previous)) => *previous,
            _ => Matrix4::IDENTITY,
        }
    }
}

/// `invert(transpose(model_view))`, or `None` if `model_view` is singular.
pub fn normal_matrix(model_view: &Matrix4) -> Option<Matrix4> {
    model_view.transpose().invert()
}

/// The matrices one draw call needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTransforms {
    pub model_view: Matrix4,
    pub normal: Matrix4,
    pub projection: Matrix4,
    /// True when `normal` came from the policy rather than an inversion.
    pub normal_fallback: bool,
}

impl FrameTransforms {
    /// Composes the matrices for one object.
    ///
    /// `previous_normal` is the object's last successfully inverted normal
    /// matrix, consulted only when this frame's inversion fails.
    ///
    /// ```
    /// use glcam::{FrameTransforms, Matrix4, NormalMatrixPolicy};
    ///
    /// let mut model = Matrix4::IDENTITY;
    /// model.translate(0.0, 0.0, -3.5);
    ///
    /// let frame = FrameTransforms::compute(
    ///     &model,
    ///     &Matrix4::IDENTITY,
    ///     &Matrix4::IDENTITY,
    ///     None,
    ///     NormalMatrixPolicy::default(),
    /// );
    /// assert_eq!(frame.model_view.translation(), [0.0, 0.0, -3.5, 1.0]);
    /// assert!(!frame.normal_fallback);
    /// ```
    pub fn compute(
        model: &Matrix4,
        view: &Matrix4,
        projection: &Matrix4,
        previous_normal: Option<&Matrix4>,
        policy: NormalMatrixPolicy,
    ) -> Self {
        let model_view = Matrix4::multiply(view, model);
        let (normal, normal_fallback) = match normal_matrix(&model_view) {
            Some(normal) => (normal, false),
            None => (policy.fallback(previous_normal), true),
        };

        Self {
            model_view,
            normal,
            projection: *projection,
            normal_fallback,
        }
    }

    /// `projection * model_view`.
    pub fn model_view_projection(&self) -> Matrix4 {
        Matrix4::multiply(&self.projection, &self.model_view)
    }

    pub fn uniforms(&self) -> MatrixUniforms {
        MatrixUniforms {
            model_view: self.model_view.0,
            projection: self.projection.0,
            normal: self.normal.0,
            model_view_projection: self.model_view_projection().0,
        }
    }
}

/// Matrix block in the order the sample shaders declare their uniforms.
///
/// Each field is column-major and can be passed straight to
/// `glUniformMatrix4fv` with `transpose = false`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatrixUniforms {
    pub model_view: [f32; 16],
    pub projection: [f32; 16],
    pub normal: [f32; 16],
    pub model_view_projection: [f32; 16],
}

impl Default for MatrixUniforms {
    fn default() -> Self {
        Self {
            model_view: Matrix4::IDENTITY.0,
            projection: Matrix4::IDENTITY.0,
            normal: Matrix4::IDENTITY.0,
            model_view_projection: Matrix4::IDENTITY.0,
        }
    }
}
