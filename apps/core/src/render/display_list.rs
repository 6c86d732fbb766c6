use super::{Painter, RadialGradient, Sector, Stroke};
use crate::color::Rgba;
use crate::geometry::Point2D;
use crate::surface::{LogicalSize, Surface, SurfaceLayout};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(LogicalSize),
    Save,
    Restore,
    GlobalAlpha(f64),
    RadialGradient(RadialGradient),
    Line {
        from: Point2D,
        to: Point2D,
        stroke: Stroke,
    },
    Arc {
        arc: Sector,
        stroke: Stroke,
    },
    FillSector {
        sector: Sector,
        color: Rgba,
    },
    ClipSector(Sector),
    Dot {
        center: Point2D,
        radius: f64,
        color: Rgba,
    },
}

/// A surface that records drawing calls instead of rasterising them.
///
/// A `Clear` drops everything recorded before it, so after a frame the list
/// holds exactly what is visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
    layout: Option<SurfaceLayout>,
    clears: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn layout(&self) -> Option<&SurfaceLayout> {
        self.layout.as_ref()
    }

    /// Number of `clear` calls ever made, i.e. frames started on this layer.
    pub const fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn count(&self, predicate: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Painter for DisplayList {
    fn clear(&mut self, size: LogicalSize) {
        self.clears += 1;
        self.ops.clear();
        self.ops.push(DrawOp::Clear(size));
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::GlobalAlpha(alpha));
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, _size: LogicalSize) {
        self.ops.push(DrawOp::RadialGradient(gradient.clone()));
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D, stroke: Stroke) {
        self.ops.push(DrawOp::Line { from, to, stroke });
    }

    fn stroke_arc(&mut self, arc: Sector, stroke: Stroke) {
        self.ops.push(DrawOp::Arc { arc, stroke });
    }

    fn fill_sector(&mut self, sector: Sector, color: Rgba) {
        self.ops.push(DrawOp::FillSector { sector, color });
    }

    fn clip_sector(&mut self, sector: Sector) {
        self.ops.push(DrawOp::ClipSector(sector));
    }

    fn fill_dot(&mut self, center: Point2D, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Dot {
            center,
            radius,
            color,
        });
    }
}

impl Surface for DisplayList {
    fn apply_layout(&mut self, layout: &SurfaceLayout) {
        // Resizing a canvas wipes it.
        self.ops.clear();
        self.layout = Some(*layout);
    }
}
