//! The two particle populations.
//!
//! Both are regenerated wholesale on resize and wrap around the canvas edges
//! between resizes. Their sizes never change mid-animation.

mod far;
mod near;

pub use far::{FarField, FarPoint, FAR_LINK_RADIUS, FAR_WRAP_MARGIN};
pub use near::{NearField, NearPoint, NEAR_MAX_POPULATION, NEAR_WRAP_MARGIN};

/// Uniform sample in `[-spread / 2, spread / 2)`.
fn centered(rng: &mut fastrand::Rng, spread: f64) -> f64 {
    (rng.f64() - 0.5) * spread
}
