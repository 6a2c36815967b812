use glam::Vec4;

use crate::math::Matrix4;

/// A camera that orbits the origin on a sphere.
///
/// The eye sits at spherical coordinates `(distance, azimuth, elevation)`:
///
/// ```text
/// eye = distance * (cos(elevation) * sin(azimuth),
///                   sin(elevation),
///                   cos(elevation) * cos(azimuth))
/// ```
///
/// so azimuth 0 / elevation 0 puts the eye on `+Z` looking down `-Z`, positive
/// azimuth swings it towards `+X`, and positive elevation raises it towards
/// `+Y`. Angles are in degrees and are absolute: callers accumulate their own
/// per-frame increments before calling [`set_azimuth`](Self::set_azimuth).
///
/// # Example
/// ```
/// use glcam::{OrbitCamera, Vec4};
///
/// let mut orbit = OrbitCamera::new();
/// orbit.go_home(Vec4::new(0.0, 0.0, 5.0, 0.0));
/// orbit.set_azimuth(45.0);
/// orbit.set_elevation(-30.0);
///
/// let view = orbit.view_matrix();
/// let eye = orbit.eye_position();
/// let at_origin = view.transform_point(eye);
/// assert!(at_origin.iter().all(|c| c.abs() < 1e-5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Home vector passed to [`go_home`](Self::go_home). Only `z` drives the
    /// view; `x`, `y` and `w` are kept as given.
    pub home: Vec4,
    /// Distance from the origin.
    pub distance: f32,
    /// Horizontal angle in degrees.
    pub azimuth: f32,
    /// Vertical angle in degrees. Not clamped; the view stays well defined
    /// when the camera passes over a pole.
    pub elevation: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let home = Vec4::new(0.0, 0.0, 5.0, 0.0);
        Self {
            home,
            distance: home.z,
            azimuth: 0.0,
            elevation: 0.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`go_home`](Self::go_home).
    pub fn home(mut self, home: impl Into<Vec4>) -> Self {
        self.go_home(home.into());
        self
    }

    /// Set the initial azimuth in degrees.
    pub fn azimuth(mut self, degrees: f32) -> Self {
        self.azimuth = degrees;
        self
    }

    /// Set the initial elevation in degrees.
    pub fn elevation(mut self, degrees: f32) -> Self {
        self.elevation = degrees;
        self
    }

    /// Override the orbit radius without touching the stored home vector.
    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// Stores `home` and takes its `z` component as the orbit radius.
    ///
    /// Angles are left untouched.
    pub fn go_home(&mut self, home: Vec4) {
        self.home = home;
        self.distance = home.z;
    }

    pub fn set_azimuth(&mut self, degrees: f32) {
        self.azimuth = degrees;
    }

    pub fn set_elevation(&mut self, degrees: f32) {
        self.elevation = degrees;
    }

    /// Eye position in world space.
    pub fn eye_position(&self) -> [f32; 3] {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();
        [
            self.distance * cos_el * sin_az,
            self.distance * sin_el,
            self.distance * cos_el * cos_az,
        ]
    }

    /// View matrix looking from [`eye_position`](Self::eye_position) at the
    /// origin with `+Y` up.
    ///
    /// Composed as `T(0, 0, -distance) · Rx(elevation) · Ry(-azimuth)`, which is
    /// the same matrix `look_at(eye, origin, +Y)` produces while
    /// `|elevation| < 90°`. Past the poles the camera keeps rolling with the
    /// orbit instead of flipping.
    pub fn view_matrix(&self) -> Matrix4 {
        let mut view = Matrix4::IDENTITY;
        view.translate(0.0, 0.0, -self.distance)
            .rotate(self.elevation, [1.0, 0.0, 0.0])
            .rotate(-self.azimuth, [0.0, 1.0, 0.0]);
        view
    }
}
