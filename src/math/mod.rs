//! Vector and matrix kernel.
//!
//! Everything here is a pure function over fixed-size float arrays:
//!
//! - [`vec3`]: free functions over `[f32; 3]` (add, subtract, cross, normalize, ...)
//! - [`Matrix4`]: a column-major 4×4 matrix with the same semantics as
//!   `android.opengl.Matrix`, so the samples' matrix calls map one to one
//!
//! # Conventions
//!
//! Matrices are stored column-major: element `(row, col)` lives at
//! `m[col * 4 + row]`, and the translation column is `m[12..15]`.
//! `translate`, `rotate` and `scale` right-multiply the receiver, which means
//! the last operation applied is the first one a vertex sees.

mod matrix;
pub mod vec3;

pub use matrix::Matrix4;

/// Tolerance used by the approximate comparisons in this crate.
pub const EPSILON: f32 = 1e-5;
