use glam::Vec4;

use crate::math::Matrix4;
use crate::orbit_camera::OrbitCamera;

/// Which camera model a renderer uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    /// Orbits the origin; see [`OrbitCamera`].
    Orbit,
    /// A fixed view, identity unless one is supplied.
    #[default]
    Tracking,
}

/// A camera that never moves.
///
/// Used by samples that place objects directly in eye space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackingCamera {
    pub view: Matrix4,
}

impl TrackingCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `view` instead of identity.
    pub fn with_view(view: Matrix4) -> Self {
        Self { view }
    }
}

/// The camera a renderer draws with.
///
/// Both variants answer the same question, "what is the view matrix right
/// now", so the frame pipeline never needs to know which one it has.
///
/// ```
/// use glcam::{Camera, CameraMode, Matrix4, Vec4};
///
/// let mut camera = Camera::new(CameraMode::Orbit);
/// camera.go_home(Vec4::new(0.0, 0.0, 5.0, 0.0));
/// camera.set_azimuth(90.0);
/// assert_ne!(camera.view_matrix(), Matrix4::IDENTITY);
///
/// let tracking = Camera::new(CameraMode::Tracking);
/// assert_eq!(tracking.view_matrix(), Matrix4::IDENTITY);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Camera {
    Orbit(OrbitCamera),
    Tracking(TrackingCamera),
}

impl Default for Camera {
    fn default() -> Self {
        Self::Tracking(TrackingCamera::default())
    }
}

impl From<OrbitCamera> for Camera {
    fn from(orbit: OrbitCamera) -> Self {
        Self::Orbit(orbit)
    }
}

impl From<TrackingCamera> for Camera {
    fn from(tracking: TrackingCamera) -> Self {
        Self::Tracking(tracking)
    }
}

impl Camera {
    pub fn new(mode: CameraMode) -> Self {
        match mode {
            CameraMode::Orbit => Self::Orbit(OrbitCamera::new()),
            CameraMode::Tracking => Self::Tracking(TrackingCamera::new()),
        }
    }

    pub fn mode(&self) -> CameraMode {
        match self {
            Camera::Orbit(_) => CameraMode::Orbit,
            Camera::Tracking(_) => CameraMode::Tracking,
        }
    }

    pub fn view_matrix(&self) -> Matrix4 {
        match self {
            Camera::Orbit(orbit) => orbit.view_matrix(),
            Camera::Tracking(tracking) => tracking.view,
        }
    }

    /// Eye position in world space.
    ///
    /// For a tracking camera this is recovered from the inverse view; a
    /// singular fixed view reports the origin.
    pub fn eye_position(&self) -> [f32; 3] {
        match self {
            Camera::Orbit(orbit) => orbit.eye_position(),
            Camera::Tracking(tracking) => tracking
                .view
                .invert()
                .map(|inv| {
                    let t = inv.translation();
                    [t[0], t[1], t[2]]
                })
                .unwrap_or([0.0; 3]),
        }
    }

    // Orbit controls. A tracking camera has no orbit state and ignores them.

    pub fn go_home(&mut self, home: Vec4) {
        if let Camera::Orbit(orbit) = self {
            orbit.go_home(home);
        }
    }

    pub fn set_azimuth(&mut self, degrees: f32) {
        if let Camera::Orbit(orbit) = self {
            orbit.set_azimuth(degrees);
        }
    }

    pub fn set_elevation(&mut self, degrees: f32) {
        if let Camera::Orbit(orbit) = self {
            orbit.set_elevation(degrees);
        }
    }
}

/// Per-frame camera increments, in degrees.
///
/// The renderer adds these to its accumulated angles every frame and hands
/// the totals to the camera's absolute setters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraMotion {
    pub azimuth_step: f32,
    pub elevation_step: f32,
}

impl CameraMotion {
    pub const NONE: Self = Self {
        azimuth_step: 0.0,
        elevation_step: 0.0,
    };

    pub fn new(azimuth_step: f32, elevation_step: f32) -> Self {
        Self {
            azimuth_step,
            elevation_step,
        }
    }

    pub fn is_still(&self) -> bool {
        self.azimuth_step == 0.0 && self.elevation_step == 0.0
    }
}
