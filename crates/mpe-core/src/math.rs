//! Minimal 2-D vector math for particle positions, velocities and forces.
//!
//! The physical dimension of every world is fixed at two, so vectors are
//! plain `[f32; 2]` arrays and these helpers are free functions.

/// A 2-D vector: position, velocity, force or physical action.
pub type Vec2 = [f32; 2];

/// The zero vector.
pub const ZERO: Vec2 = [0.0, 0.0];

/// Component-wise `a + b`.
#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] + b[0], a[1] + b[1]]
}

/// Component-wise `a - b`.
#[inline]
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] - b[0], a[1] - b[1]]
}

/// `v * s`.
#[inline]
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    [v[0] * s, v[1] * s]
}

/// Squared Euclidean norm.
#[inline]
pub fn norm2(v: Vec2) -> f32 {
    v[0] * v[0] + v[1] * v[1]
}

/// Euclidean norm.
#[inline]
pub fn norm(v: Vec2) -> f32 {
    norm2(v).sqrt()
}

/// Squared distance between two points.
#[inline]
pub fn dist2(a: Vec2, b: Vec2) -> f32 {
    norm2(sub(a, b))
}

/// Distance between two points.
#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f32 {
    norm(sub(a, b))
}

/// Numerically stable `ln(1 + e^x)`.
pub fn softplus(x: f32) -> f32 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// Index of the largest element. Ties resolve to the first occurrence.
///
/// Returns `None` for an empty slice.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
