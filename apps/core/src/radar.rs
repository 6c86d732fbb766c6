use crate::geometry::{angular_difference, bearing, Point2D};
use crate::numeric::finite_or_zero;
use crate::render::Sector;
use crate::surface::LogicalSize;

/// Radar radius relative to the canvas diagonal.
const RADIUS_FACTOR: f64 = 0.6 * 1.2;
/// Beam reach relative to the canvas diagonal; always past every corner.
const BEAM_REACH_FACTOR: f64 = 1.1;

/// Geometry and motion of the sweeping beam.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarState {
    pub center: Point2D,
    pub radius: f64,
    pub fov: f64,
    /// Unbounded; trig wraps it.
    pub sweep: f64,
    pub speed: f64,
}

impl RadarState {
    pub fn new(fov_degrees: f64, speed: f64) -> Self {
        Self {
            center: Point2D::default(),
            radius: 0.0,
            fov: finite_or_zero(fov_degrees).to_radians(),
            sweep: 0.0,
            speed: finite_or_zero(speed),
        }
    }

    /// Recenters on a freshly sized canvas. The sweep angle is kept.
    pub fn fit(&mut self, size: LogicalSize) {
        self.radius = size.diagonal() * RADIUS_FACTOR;
        self.center = Point2D::new(size.width * 0.5, size.height * 0.5);
    }

    pub fn advance(&mut self, elapsed_seconds: f64) {
        self.sweep += self.speed * elapsed_seconds;
    }

    pub fn half_fov(&self) -> f64 {
        self.fov / 2.0
    }

    /// Whether `point` lies inside the beam wedge.
    pub fn illuminates(&self, point: Point2D) -> bool {
        angular_difference(bearing(self.center, point), self.sweep) < self.half_fov()
    }

    pub fn beam_sector(&self, size: LogicalSize) -> Sector {
        let half = self.half_fov();
        Sector {
            center: self.center,
            radius: size.diagonal() * BEAM_REACH_FACTOR,
            start: self.sweep - half,
            end: self.sweep + half,
        }
    }

    pub fn set_speed(&mut self, radians_per_second: f64) {
        self.speed = finite_or_zero(radians_per_second);
    }

    pub fn set_fov_degrees(&mut self, degrees: f64) {
        self.fov = finite_or_zero(degrees).to_radians();
    }
}
