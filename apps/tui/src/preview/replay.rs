//! Replays recorded drawing calls onto a ratatui canvas.
//!
//! The canvas only knows lines, circles and points, so filled wedges become
//! radial lines and gradients are dropped. Colors are composited over the
//! terminal's black background.

use std::f64::consts::TAU;

use interview_backdrop::color::Rgba;
use interview_backdrop::geometry::Point2D;
use interview_backdrop::render::{DisplayList, DrawOp, Sector};
use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Context, Line as CanvasLine, Points};

/// Brightens translucent layers, which would otherwise vanish on a
/// terminal's coarse cells.
pub const VISIBILITY_LIFT: f64 = 2.2;

const ARC_SEGMENT: f64 = TAU / 48.0;

/// A canvas primitive in canvas coordinates (y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellShape {
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Color,
    },
    Point {
        at: (f64, f64),
        color: Color,
    },
}

pub fn terminal_color(color: Rgba, global_alpha: f64) -> Option<Color> {
    match color.with_alpha(color.a * global_alpha).over_black(VISIBILITY_LIFT) {
        (0, 0, 0) => None,
        (r, g, b) => Some(Color::Rgb(r, g, b)),
    }
}

struct Replay {
    height: f64,
    alpha: f64,
    saved: Vec<f64>,
    shapes: Vec<CellShape>,
}

impl Replay {
    fn flip(&self, point: Point2D) -> (f64, f64) {
        (point.x, self.height - point.y)
    }

    fn line(&mut self, from: Point2D, to: Point2D, color: Rgba) {
        if let Some(color) = terminal_color(color, self.alpha) {
            self.shapes.push(CellShape::Line {
                from: self.flip(from),
                to: self.flip(to),
                color,
            });
        }
    }

    fn arc(&mut self, arc: Sector, color: Rgba) {
        let sweep = arc.end - arc.start;
        if sweep.abs() >= TAU - f64::EPSILON {
            if let Some(color) = terminal_color(color, self.alpha) {
                self.shapes.push(CellShape::Circle {
                    center: self.flip(arc.center),
                    radius: arc.radius,
                    color,
                });
            }
            return;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segments = (sweep.abs() / ARC_SEGMENT).ceil().max(1.0) as usize;
        #[allow(clippy::cast_precision_loss)]
        let step = sweep / segments as f64;
        let mut previous = arc.center.polar_offset(arc.start, arc.radius);
        for index in 1..=segments {
            #[allow(clippy::cast_precision_loss)]
            let angle = (index as f64).mul_add(step, arc.start);
            let next = arc.center.polar_offset(angle, arc.radius);
            self.line(previous, next, color);
            previous = next;
        }
    }

    fn op(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Save => self.saved.push(self.alpha),
            DrawOp::Restore => self.alpha = self.saved.pop().unwrap_or(1.0),
            DrawOp::GlobalAlpha(alpha) => self.alpha = *alpha,
            DrawOp::Line { from, to, stroke } => self.line(*from, *to, stroke.color),
            DrawOp::Arc { arc, stroke } => self.arc(*arc, stroke.color),
            DrawOp::FillSector { sector, color } => {
                let mid = (sector.start + sector.end) / 2.0;
                let rim = sector.center.polar_offset(mid, sector.radius);
                self.line(sector.center, rim, *color);
            }
            DrawOp::Dot { center, color, .. } => {
                if let Some(color) = terminal_color(*color, self.alpha) {
                    self.shapes.push(CellShape::Point {
                        at: self.flip(*center),
                        color,
                    });
                }
            }
            // Cells are too coarse for gradients, and wedges are already
            // bounded by their own radius.
            DrawOp::Clear(_) | DrawOp::RadialGradient(_) | DrawOp::ClipSector(_) => {}
        }
    }
}

/// Converts a layer's display list into canvas shapes. `height` is the
/// logical height of the surface, used to flip the y axis.
pub fn shapes(list: &DisplayList, height: f64) -> Vec<CellShape> {
    let mut replay = Replay {
        height,
        alpha: 1.0,
        saved: Vec::new(),
        shapes: Vec::new(),
    };
    for op in list.ops() {
        replay.op(op);
    }
    replay.shapes
}

pub fn paint(ctx: &mut Context<'_>, shapes: &[CellShape]) {
    for shape in shapes {
        match *shape {
            CellShape::Line { from, to, color } => ctx.draw(&CanvasLine {
                x1: from.0,
                y1: from.1,
                x2: to.0,
                y2: to.1,
                color,
            }),
            CellShape::Circle {
                center,
                radius,
                color,
            } => ctx.draw(&Circle {
                x: center.0,
                y: center.1,
                radius,
                color,
            }),
            CellShape::Point { at, color } => ctx.draw(&Points {
                coords: &[at],
                color,
            }),
        }
    }
}
