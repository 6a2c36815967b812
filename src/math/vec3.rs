//! Free functions over `[f32; 3]`.
//!
//! These operate on plain arrays so they can be applied directly to the flat
//! float buffers meshes are stored in.

/// Component-wise `a + b`.
#[inline]
pub fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Component-wise `a - b`.
#[inline]
pub fn subtract(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Multiplies every component by `s`.
#[inline]
pub fn scale(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[inline]
pub fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean magnitude.
#[inline]
pub fn length(v: [f32; 3]) -> f32 {
    dot(v, v).sqrt()
}

/// Normalizes `v`.
///
/// A zero vector stays zero and a vector whose magnitude is exactly 1 is
/// returned untouched. Anything else is multiplied by the reciprocal of its
/// magnitude (not divided), so results match the reference samples bit for bit.
///
/// ```
/// use glcam::math::vec3;
///
/// assert_eq!(vec3::normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
/// assert_eq!(vec3::normalize([0.0, 0.0, 5.0]), [0.0, 0.0, 1.0]);
/// ```
pub fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = length(v);
    if len == 0.0 {
        return [0.0, 0.0, 0.0];
    }
    if len == 1.0 {
        return v;
    }
    scale(v, 1.0 / len)
}

/// Reads the `index`-th triple out of a flat buffer.
///
/// # Panics
///
/// Panics if `buffer` holds fewer than `index * 3 + 3` floats.
#[inline]
pub fn read(buffer: &[f32], index: usize) -> [f32; 3] {
    let i = index * 3;
    [buffer[i], buffer[i + 1], buffer[i + 2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(normalize([-0.0, 0.0, -0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn normalize_unit_vectors_are_unchanged() {
        for v in [[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]] {
            assert_eq!(normalize(v), v);
        }
    }

    #[test]
    fn normalize_scales_by_reciprocal() {
        let v = [1.0, 2.0, 2.0];
        let n = normalize(v);
        let inv = 1.0 / 3.0f32;
        assert_eq!(n, [1.0 * inv, 2.0 * inv, 2.0 * inv]);
        assert!((length(n) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn add_and_subtract_are_inverse() {
        let a = [1.5, -2.0, 3.25];
        let b = [0.5, 4.0, -1.0];
        assert_eq!(subtract(add(a, b), b), a);
    }

    #[test]
    fn read_picks_triples() {
        let buffer = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(read(&buffer, 1), [3.0, 4.0, 5.0]);
    }
}
