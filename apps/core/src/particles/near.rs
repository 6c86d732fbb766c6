use crate::geometry::{wrap_coordinate, Point2D, Vector2D};
use crate::surface::LogicalSize;

use super::centered;

pub const NEAR_WRAP_MARGIN: f64 = 20.0;
/// Hard cap; the mesh pass is quadratic in the population.
pub const NEAR_MAX_POPULATION: usize = 140;
const VELOCITY_SPREAD: f64 = 0.22;
const MIN_LINK_DISTANCE: f64 = 90.0;
const MAX_LINK_DISTANCE: f64 = 140.0;

/// Always-visible constellation point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearPoint {
    pub position: Point2D,
    pub velocity: Vector2D,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearField {
    points: Vec<NearPoint>,
}

impl NearField {
    /// Population for a canvas: one point per `density_base` square pixels,
    /// capped at [`NEAR_MAX_POPULATION`].
    pub fn population(size: LogicalSize, density_base: f64) -> usize {
        let raw = (size.area() / density_base).floor();
        // `as` saturates: NaN and negatives give 0, infinity gives usize::MAX.
        (raw as usize).min(NEAR_MAX_POPULATION)
    }

    /// Maximum distance at which two points are linked.
    pub fn link_distance(size: LogicalSize) -> f64 {
        (size.area().sqrt() / 9.0).clamp(MIN_LINK_DISTANCE, MAX_LINK_DISTANCE)
    }

    pub fn points(&self) -> &[NearPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn regenerate(&mut self, size: LogicalSize, density_base: f64, rng: &mut fastrand::Rng) {
        let count = Self::population(size, density_base);
        self.points.clear();
        self.points.extend((0..count).map(|_| NearPoint {
            position: Point2D::new(rng.f64() * size.width, rng.f64() * size.height),
            velocity: Vector2D::new(
                centered(rng, VELOCITY_SPREAD),
                centered(rng, VELOCITY_SPREAD),
            ),
        }));
    }

    /// Moves every point by its raw per-frame velocity; frame duration is
    /// deliberately ignored for this layer.
    pub fn step(&mut self, size: LogicalSize) {
        for point in &mut self.points {
            let moved = point.position + point.velocity;
            point.position = Point2D::new(
                wrap_coordinate(moved.x, size.width, NEAR_WRAP_MARGIN),
                wrap_coordinate(moved.y, size.height, NEAR_WRAP_MARGIN),
            );
        }
    }

    /// Every pair closer than `max_distance`, with link strength
    /// `1 - distance / max_distance`.
    pub fn links(&self, max_distance: f64) -> Vec<(usize, usize, f64)> {
        let limit = max_distance * max_distance;
        let mut links = Vec::new();
        for (i, a) in self.points.iter().enumerate() {
            for (j, b) in self.points.iter().enumerate().skip(i + 1) {
                let d2 = a.position.distance_squared(b.position);
                if d2 < limit {
                    links.push((i, j, 1.0 - d2.sqrt() / max_distance));
                }
            }
        }
        links
    }
}

#[cfg(test)]
impl NearField {
    pub(crate) fn from_points(points: Vec<NearPoint>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn population_follows_area_and_cap() {
        assert_eq!(NearField::population(LogicalSize::new(800.0, 600.0), 5200.0), 92);
        assert_eq!(NearField::population(LogicalSize::new(4000.0, 4000.0), 5200.0), 140);
        assert_eq!(NearField::population(LogicalSize::new(1.0, 1.0), 5200.0), 0);
        assert_eq!(NearField::population(LogicalSize::new(10.0, 10.0), 0.0), 140);
        assert_eq!(NearField::population(LogicalSize::new(10.0, 10.0), -3.0), 0);
    }

    #[test]
    fn link_distance_is_clamped() {
        assert_eq!(NearField::link_distance(LogicalSize::new(100.0, 100.0)), 90.0);
        assert_eq!(NearField::link_distance(LogicalSize::new(3000.0, 3000.0)), 140.0);
        assert_relative_eq!(
            NearField::link_distance(LogicalSize::new(1000.0, 1000.0)),
            1000.0 / 9.0
        );
    }

    #[test]
    fn step_ignores_frame_duration() {
        let mut field = NearField::from_points(vec![NearPoint {
            position: Point2D::new(50.0, 50.0),
            velocity: Vector2D::new(0.1, -0.1),
        }]);
        field.step(LogicalSize::new(200.0, 200.0));
        field.step(LogicalSize::new(200.0, 200.0));
        let position = field.points()[0].position;
        assert_relative_eq!(position.x, 50.2, epsilon = 1e-12);
        assert_relative_eq!(position.y, 49.8, epsilon = 1e-12);
    }

    #[test]
    fn links_fade_with_distance() {
        let at = |x: f64| NearPoint {
            position: Point2D::new(x, 0.0),
            velocity: Vector2D::default(),
        };
        let field = NearField::from_points(vec![at(0.0), at(45.0), at(200.0)]);
        let links = field.links(90.0);
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].0, links[0].1), (0, 1));
        assert_relative_eq!(links[0].2, 0.5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_near_points_stay_within_margin(
            seed in any::<u64>(),
            width in 1.0f64..1600.0,
            height in 1.0f64..1200.0,
            steps in 1usize..200,
        ) {
            let size = LogicalSize::new(width, height);
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut field = NearField::default();
            field.regenerate(size, 900.0, &mut rng);

            for _ in 0..steps {
                field.step(size);
            }
            for point in field.points() {
                prop_assert!(point.position.x >= -NEAR_WRAP_MARGIN);
                prop_assert!(point.position.x < width + NEAR_WRAP_MARGIN);
                prop_assert!(point.position.y >= -NEAR_WRAP_MARGIN);
                prop_assert!(point.position.y < height + NEAR_WRAP_MARGIN);
            }
        }
    }
}
