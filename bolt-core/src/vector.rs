//! Small vector helpers on top of [`glam::Vec3`].
//!
//! `glam` already covers add, subtract, scale, distance and
//! [`Vec3::normalize_or_zero`]; this module only adds the random pieces
//! the growth phases need.

use glam::Vec3;
use rand::Rng;

/// Samples a vector with each axis drawn independently from
/// `[-half_range, half_range]`.
///
/// A zero (or negative) range returns [`Vec3::ZERO`] without touching
/// the generator, so jitter-free runs consume no randomness.
///
/// ### Parameters
/// - `rng` - Source of randomness.
/// - `half_range` - Half width of the per-axis interval.
pub fn random_symmetric(rng: &mut impl Rng, half_range: f32) -> Vec3 {
    if half_range <= 0.0 {
        return Vec3::ZERO;
    }
    let x = rng.random_range(-half_range..=half_range);
    let y = rng.random_range(-half_range..=half_range);
    let z = rng.random_range(-half_range..=half_range);
    Vec3::new(x, y, z)
}

/// Averages an accumulated sum over `count` contributions.
///
/// Returns [`Vec3::ZERO`] when nothing was accumulated.
#[inline]
pub fn average(sum: Vec3, count: u32) -> Vec3 {
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / (count as f32)
    }
}
