//! Perspective projection rebuilt on viewport resize.
//!
//! Every sample derives its projection the same way: a fixed vertical field of
//! view expressed as a half-height of `near * tan(fov / 2)` on the near plane,
//! widened by the viewport aspect ratio, then fed to a frustum.

use crate::math::Matrix4;

/// Errors that can occur when building a projection.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The viewport had a zero width or height.
    EmptyViewport { width: u32, height: u32 },
    /// The frustum bounds were degenerate.
    InvalidFrustum(&'static str),
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::EmptyViewport { width, height } => {
                write!(f, "Empty viewport: {}x{}", width, height)
            }
            ProjectionError::InvalidFrustum(reason) => write!(f, "Invalid frustum: {}", reason),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Clip-plane bounds of a perspective view volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    /// Symmetric bounds for a vertical field of view and aspect ratio.
    ///
    /// ```
    /// use glcam::Frustum;
    ///
    /// let f = Frustum::perspective(45.0, 1.0, 0.1, 10000.0);
    /// let expected = 0.1 * 22.5f32.to_radians().tan();
    /// assert!((f.top - expected).abs() < 1e-7);
    /// assert_eq!(f.right, f.top);
    /// ```
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_height = near * (fov_degrees * 0.5).to_radians().tan();
        let half_width = aspect * half_height;
        Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
            near,
            far,
        }
    }

    /// Builds the projection matrix for these bounds.
    ///
    /// # Errors
    ///
    /// See [`Matrix4::frustum`].
    pub fn matrix(&self) -> Result<Matrix4, ProjectionError> {
        Matrix4::frustum(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// Projection parameters shared by every sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 10000.0,
        }
    }
}

/// The current projection: its bounds and the matrix built from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub frustum: Frustum,
    pub matrix: Matrix4,
}

impl Projection {
    /// Builds the projection for a `width × height` viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::EmptyViewport`] when either dimension is 0
    /// and [`ProjectionError::InvalidFrustum`] when `config` describes a
    /// degenerate volume.
    pub fn for_viewport(
        width: u32,
        height: u32,
        config: &ProjectionConfig,
    ) -> Result<Self, ProjectionError> {
        if width == 0 || height == 0 {
            return Err(ProjectionError::EmptyViewport { width, height });
        }
        let aspect = width as f32 / height as f32;
        let frustum = Frustum::perspective(config.fov_degrees, aspect, config.near, config.far);
        let matrix = frustum.matrix()?;
        Ok(Self { frustum, matrix })
    }

    pub fn aspect(&self) -> f32 {
        self.frustum.right / self.frustum.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_viewport_bounds() {
        let p = Projection::for_viewport(600, 600, &ProjectionConfig::default()).unwrap();
        let expected = 0.1 * 22.5f32.to_radians().tan();
        let f = p.frustum;
        assert!((f.top - expected).abs() < 1e-7);
        assert!((f.bottom + expected).abs() < 1e-7);
        assert!((f.right - expected).abs() < 1e-7);
        assert!((f.left + expected).abs() < 1e-7);
        assert_eq!(f.near, 0.1);
        assert_eq!(f.far, 10000.0);
    }

    #[test]
    fn wide_viewport_scales_width() {
        let p = Projection::for_viewport(1920, 1080, &ProjectionConfig::default()).unwrap();
        let aspect = 1920.0 / 1080.0;
        assert!((p.frustum.right - aspect * p.frustum.top).abs() < 1e-7);
        assert!((p.aspect() - aspect).abs() < 1e-5);
    }

    #[test]
    fn symmetric_frustum_has_no_skew() {
        let p = Projection::for_viewport(800, 600, &ProjectionConfig::default()).unwrap();
        assert_eq!(p.matrix.0[8], 0.0);
        assert_eq!(p.matrix.0[9], 0.0);
        assert_eq!(p.matrix.0[11], -1.0);
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let err = Projection::for_viewport(800, 0, &ProjectionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::EmptyViewport {
                width: 800,
                height: 0
            }
        );
    }

    #[test]
    fn non_positive_near_is_rejected() {
        let config = ProjectionConfig {
            near: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Projection::for_viewport(10, 10, &config),
            Err(ProjectionError::InvalidFrustum(_))
        ));
    }
}
