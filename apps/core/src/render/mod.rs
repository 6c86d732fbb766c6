//! Drawing primitives and the backdrop composition.

mod display_list;
mod scene;

pub use display_list::{DisplayList, DrawOp};
pub use scene::{
    draw_beam, draw_far_field, draw_near_field, draw_static, BEAM_STEPS, FAR_PULSE_PERIOD_MS,
};

use crate::color::Rgba;
use crate::geometry::Point2D;
use crate::surface::LogicalSize;

/// Circular sector (pie slice) or, when stroked, its outer arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub center: Point2D,
    pub radius: f64,
    /// Start angle in radians, clockwise on screen.
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// Concentric radial gradient from `center` out to `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point2D,
    pub radius: f64,
    /// `(offset in [0, 1], color)` in ascending offset order.
    pub stops: Vec<(f64, Rgba)>,
}

/// The subset of a 2D canvas API the backdrop needs.
///
/// Coordinates are logical pixels; the surface's transform maps them onto
/// its backing store. `save`/`restore` bracket global alpha and clipping.
pub trait Painter {
    fn clear(&mut self, size: LogicalSize);
    fn save(&mut self);
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f64);
    /// Fills the whole `size` rectangle with `gradient`.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, size: LogicalSize);
    fn stroke_line(&mut self, from: Point2D, to: Point2D, stroke: Stroke);
    fn stroke_arc(&mut self, arc: Sector, stroke: Stroke);
    fn fill_sector(&mut self, sector: Sector, color: Rgba);
    /// Intersects the current clip with `sector` until the next `restore`.
    fn clip_sector(&mut self, sector: Sector);
    fn fill_dot(&mut self, center: Point2D, radius: f64, color: Rgba);
}
