use crate::point::Vec2;

/// The contraction ratio for an `n`-vertex game: `n / (n + 3)`.
///
/// This is a fixed design constant, not a tunable — it produces the
/// characteristic fractal geometry for each vertex count (1/2 for the
/// Sierpinski triangle at n = 3).
#[inline]
pub fn contraction_factor(n: usize) -> f64 {
    n as f64 / (n as f64 + 3.0)
}

/// Move `factor` of the remaining distance from `current` toward `target`.
///
/// Pure function of its inputs — identical arguments always yield the
/// identical point.
#[inline]
pub fn next_point(current: Vec2, target: Vec2, factor: f64) -> Vec2 {
    current.lerp(target, factor)
}
