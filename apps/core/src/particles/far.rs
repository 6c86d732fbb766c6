use crate::geometry::{wrap_coordinate, Point2D, Vector2D};
use crate::radar::RadarState;
use crate::surface::LogicalSize;

use super::centered;

pub const FAR_WRAP_MARGIN: f64 = 40.0;
pub const FAR_LINK_RADIUS: f64 = 120.0;
/// Velocities are expressed per frame at this nominal rate.
const NOMINAL_FPS: f64 = 60.0;
const VELOCITY_SPREAD: f64 = 0.45;
/// Points spawn up to this fraction of the canvas beyond each edge.
const SPAWN_OVERSCAN: f64 = 0.1;
const PHASE_RANGE: f64 = 2.0;

/// Ambient starfield point, lit only while inside the beam.
#[derive(Debug, Clone, PartialEq)]
pub struct FarPoint {
    pub position: Point2D,
    pub velocity: Vector2D,
    /// Pulse offset in `[0, 2)`.
    pub phase: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FarField {
    points: Vec<FarPoint>,
}

impl FarField {
    pub fn points(&self) -> &[FarPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replaces the whole population; accumulated pulse phases are discarded.
    pub fn regenerate(&mut self, count: usize, size: LogicalSize, rng: &mut fastrand::Rng) {
        let span = 1.0 + 2.0 * SPAWN_OVERSCAN;
        self.points.clear();
        self.points.extend((0..count).map(|_| FarPoint {
            position: Point2D::new(
                rng.f64().mul_add(size.width * span, -size.width * SPAWN_OVERSCAN),
                rng.f64().mul_add(size.height * span, -size.height * SPAWN_OVERSCAN),
            ),
            velocity: Vector2D::new(
                centered(rng, VELOCITY_SPREAD),
                centered(rng, VELOCITY_SPREAD),
            ),
            phase: rng.f64() * PHASE_RANGE,
        }));
    }

    /// Advances every point by `elapsed_seconds` of motion.
    pub fn step(&mut self, elapsed_seconds: f64, size: LogicalSize) {
        let frames = elapsed_seconds * NOMINAL_FPS;
        for point in &mut self.points {
            let moved = point.position + point.velocity.scaled(frames);
            point.position = Point2D::new(
                wrap_coordinate(moved.x, size.width, FAR_WRAP_MARGIN),
                wrap_coordinate(moved.y, size.height, FAR_WRAP_MARGIN),
            );
        }
    }

    /// Indices of the points currently inside the beam, in population order.
    pub fn illuminated(&self, radar: &RadarState) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, point)| radar.illuminates(point.position))
            .map(|(index, _)| index)
            .collect()
    }

    /// Pairs of lit points close enough to link, with their link strength
    /// `1 - distance / radius` in `(0, 1]`.
    pub fn links(&self, lit: &[usize]) -> Vec<(usize, usize, f64)> {
        let mut links = Vec::new();
        for (offset, &a) in lit.iter().enumerate() {
            for &b in &lit[offset + 1..] {
                let distance = self.points[a].position.distance(self.points[b].position);
                if distance < FAR_LINK_RADIUS {
                    links.push((a, b, 1.0 - distance / FAR_LINK_RADIUS));
                }
            }
        }
        links
    }
}

#[cfg(test)]
impl FarField {
    pub(crate) fn from_points(points: Vec<FarPoint>) -> Self {
        Self { points }
    }
}
