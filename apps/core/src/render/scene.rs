use std::f64::consts::TAU;

use super::{Painter, RadialGradient, Sector, Stroke};
use crate::config::{BackdropConfig, Palette};
use crate::geometry::Point2D;
use crate::particles::{FarField, NearField};
use crate::radar::RadarState;
use crate::surface::LogicalSize;

/// Angular slices used to fake a gradient along the beam.
pub const BEAM_STEPS: usize = 72;
/// Overlap between neighbouring slices so no seams show.
const BEAM_STEP_OVERLAP: f64 = 0.0003;
const BEAM_EDGE_ALPHA: f64 = 0.12;
const BEAM_EDGE_WIDTH: f64 = 1.2;
const BEAM_EDGE_INSET: f64 = 0.985;

const HALO_EXTENT: f64 = 1.6;
const HALO_MID_STOP: f64 = 0.55;
const GRID_EXTENT: f64 = 1.6;
const GRID_ALPHA: f64 = 0.10;
const RING_EXTENT: f64 = 1.4;
const RING_WIDTH: f64 = 0.8;

pub const FAR_PULSE_PERIOD_MS: f64 = 420.0;
const FAR_DOT_RADIUS: f64 = 1.4;
const LIT_DOT_RADIUS: f64 = 2.1;
const LIT_DOT_ALPHA: f64 = 0.62;
const FAR_LINK_ALPHA: f64 = 0.26;

const NEAR_DOT_RADIUS: f64 = 1.2;
const NEAR_LINK_ALPHA: f64 = 0.09;

/// Halo, grid and rings. Drawn every frame beneath the beam.
pub fn draw_static<P: Painter + ?Sized>(
    painter: &mut P,
    radar: &RadarState,
    config: &BackdropConfig,
    size: LogicalSize,
) {
    let colors = &config.colors;
    let Point2D { x, y } = radar.center;
    let r = radar.radius;

    painter.fill_radial_gradient(
        &RadialGradient {
            center: radar.center,
            radius: r * HALO_EXTENT,
            stops: vec![
                (0.0, colors.halo0),
                (HALO_MID_STOP, colors.halo1),
                (1.0, colors.halo_fade),
            ],
        },
        size,
    );

    let extent = r * GRID_EXTENT;
    let grid = Stroke::new(colors.grid, 1.0);
    painter.save();
    painter.set_global_alpha(GRID_ALPHA);
    for gy in grid_positions(y, extent, config.grid_gap) {
        painter.stroke_line(Point2D::new(x - extent, gy), Point2D::new(x + extent, gy), grid);
    }
    for gx in grid_positions(x, extent, config.grid_gap) {
        painter.stroke_line(Point2D::new(gx, y - extent), Point2D::new(gx, y + extent), grid);
    }
    painter.restore();

    let ring = Stroke::new(colors.ring, RING_WIDTH);
    painter.save();
    let mut ring_radius = config.rings_gap;
    while ring_radius < r * RING_EXTENT {
        painter.stroke_arc(
            Sector {
                center: radar.center,
                radius: ring_radius,
                start: 0.0,
                end: TAU,
            },
            ring,
        );
        ring_radius += config.rings_gap;
    }
    painter.restore();
}

/// Evenly spaced positions covering `[center - extent, center + extent]`.
fn grid_positions(center: f64, extent: f64, gap: f64) -> impl Iterator<Item = f64> {
    let first = center - extent;
    let last = center + extent;
    let count = if gap > 0.0 && extent.is_finite() {
        ((last - first) / gap).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |index| (index as f64).mul_add(gap, first))
}

/// The sweeping wedge: a faint wash, a stepped color fade and a leading arc.
pub fn draw_beam<P: Painter + ?Sized>(
    painter: &mut P,
    radar: &RadarState,
    colors: &Palette,
    size: LogicalSize,
) {
    let beam = radar.beam_sector(size);

    painter.save();
    painter.fill_sector(beam, colors.beam_wash);
    painter.clip_sector(beam);

    let step = (beam.end - beam.start) / BEAM_STEPS as f64;
    for index in 0..BEAM_STEPS {
        let t = index as f64 / (BEAM_STEPS - 1) as f64;
        let start = step.mul_add(index as f64, beam.start);
        painter.fill_sector(
            Sector {
                start,
                end: start + step + BEAM_STEP_OVERLAP,
                ..beam
            },
            colors.beam_start.lerp(colors.beam_end, t),
        );
    }

    painter.set_global_alpha(BEAM_EDGE_ALPHA);
    painter.stroke_arc(
        Sector {
            radius: beam.radius * BEAM_EDGE_INSET,
            ..beam
        },
        Stroke::new(colors.beam_edge, BEAM_EDGE_WIDTH),
    );
    painter.restore();
}

/// Faint dots for the whole starfield, then pulsing dots and links for the
/// part of it inside the beam.
pub fn draw_far_field<P: Painter + ?Sized>(
    painter: &mut P,
    field: &FarField,
    radar: &RadarState,
    colors: &Palette,
    now_ms: f64,
) {
    for point in field.points() {
        painter.fill_dot(point.position, FAR_DOT_RADIUS, colors.bg_dot);
    }

    let lit = field.illuminated(radar);
    let links = field.links(&lit);
    let mut pending = links.iter().peekable();
    let points = field.points();

    for &index in &lit {
        let point = &points[index];
        let pulse = (now_ms / FAR_PULSE_PERIOD_MS + point.phase)
            .sin()
            .mul_add(0.15, 0.85);
        painter.fill_dot(
            point.position,
            LIT_DOT_RADIUS,
            colors.beam_dot.with_alpha(LIT_DOT_ALPHA * pulse),
        );

        // Links come grouped by their first endpoint, in lit order.
        while let Some(&&(from, to, strength)) = pending.peek() {
            if from != index {
                break;
            }
            painter.stroke_line(
                points[from].position,
                points[to].position,
                Stroke::new(colors.link.with_alpha(strength * FAR_LINK_ALPHA), 1.0),
            );
            pending.next();
        }
    }
}

/// The mesh layer owns its surface, so it clears before drawing.
pub fn draw_near_field<P: Painter + ?Sized>(
    painter: &mut P,
    field: &NearField,
    colors: &Palette,
    size: LogicalSize,
) {
    painter.clear(size);
    for point in field.points() {
        painter.fill_dot(point.position, NEAR_DOT_RADIUS, colors.mesh_dot);
    }

    let points = field.points();
    for (from, to, strength) in field.links(NearField::link_distance(size)) {
        painter.stroke_line(
            points[from].position,
            points[to].position,
            Stroke::new(colors.mesh_link.with_alpha(strength * NEAR_LINK_ALPHA), 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector2D;
    use crate::particles::{FarPoint, NearPoint};
    use crate::render::{DisplayList, DrawOp};
    use approx::assert_relative_eq;

    fn radar_for(size: LogicalSize) -> RadarState {
        let mut radar = RadarState::new(26.0, 0.3);
        radar.fit(size);
        radar
    }

    #[test]
    fn beam_is_clipped_wash_plus_stepped_fade() {
        let size = LogicalSize::new(800.0, 600.0);
        let radar = radar_for(size);
        let palette = Palette::default();
        let mut list = DisplayList::new();
        draw_beam(&mut list, &radar, &palette, size);

        let ops = list.ops();
        assert_eq!(ops.first(), Some(&DrawOp::Save));
        assert_eq!(ops.last(), Some(&DrawOp::Restore));
        assert!(matches!(ops[2], DrawOp::ClipSector(_)));
        assert_eq!(
            list.count(|op| matches!(op, DrawOp::FillSector { .. })),
            BEAM_STEPS + 1
        );

        let DrawOp::FillSector { color: first, .. } = &ops[3] else {
            panic!("expected first beam step, got {:?}", ops[3]);
        };
        assert_eq!(*first, palette.beam_start);
        let DrawOp::FillSector { color: last, .. } = &ops[3 + BEAM_STEPS - 1] else {
            panic!("expected last beam step");
        };
        assert_eq!(last.r, palette.beam_end.r);
        assert_relative_eq!(last.a, palette.beam_end.a, epsilon = 1e-12);
    }

    #[test]
    fn beam_steps_cover_the_whole_wedge() {
        let size = LogicalSize::new(400.0, 400.0);
        let radar = radar_for(size);
        let mut list = DisplayList::new();
        draw_beam(&mut list, &radar, &Palette::default(), size);

        let steps: Vec<Sector> = list
            .ops()
            .iter()
            .skip(3)
            .filter_map(|op| match op {
                DrawOp::FillSector { sector, .. } => Some(*sector),
                _ => None,
            })
            .collect();
        let beam = radar.beam_sector(size);
        assert_relative_eq!(steps[0].start, beam.start, epsilon = 1e-12);
        assert!(steps[BEAM_STEPS - 1].end >= beam.end);
        for pair in steps.windows(2) {
            assert!(pair[0].end > pair[1].start, "gap between beam steps");
        }
    }

    #[test]
    fn static_layer_draws_grid_and_rings_inside_save_blocks() {
        let size = LogicalSize::new(200.0, 100.0);
        let radar = radar_for(size);
        let config = BackdropConfig::default();
        let mut list = DisplayList::new();
        draw_static(&mut list, &radar, &config, size);

        assert!(matches!(list.ops()[0], DrawOp::RadialGradient(_)));
        let extent = radar.radius * GRID_EXTENT;
        let per_axis = ((2.0 * extent) / config.grid_gap).floor() as usize + 1;
        assert_eq!(list.count(|op| matches!(op, DrawOp::Line { .. })), per_axis * 2);

        let expected_rings = (1..)
            .map(|k| f64::from(k) * config.rings_gap)
            .take_while(|radius| *radius < radar.radius * RING_EXTENT)
            .count();
        assert_eq!(list.count(|op| matches!(op, DrawOp::Arc { .. })), expected_rings);
        assert_eq!(list.count(|op| *op == DrawOp::Save), 2);
        assert_eq!(list.count(|op| *op == DrawOp::Restore), 2);
    }

    #[test]
    fn far_field_lights_only_points_in_beam() {
        let size = LogicalSize::new(800.0, 600.0);
        let radar = radar_for(size);
        let still = |x: f64, y: f64, phase: f64| FarPoint {
            position: Point2D::new(x, y),
            velocity: Vector2D::default(),
            phase,
        };
        let field = FarField::from_points(vec![
            still(600.0, 300.0, 0.0),
            still(640.0, 300.0, 1.0),
            still(400.0, 550.0, 0.0),
        ]);
        let palette = Palette::default();
        let mut list = DisplayList::new();
        draw_far_field(&mut list, &field, &radar, &palette, 0.0);

        let faint = list.count(
            |op| matches!(op, DrawOp::Dot { radius, .. } if (*radius - FAR_DOT_RADIUS).abs() < 1e-12),
        );
        let bright: Vec<&DrawOp> = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Dot { radius, .. } if (*radius - LIT_DOT_RADIUS).abs() < 1e-12))
            .collect();
        assert_eq!(faint, 3);
        assert_eq!(bright.len(), 2);

        let DrawOp::Dot { color, .. } = bright[0] else {
            unreachable!()
        };
        assert_relative_eq!(color.a, LIT_DOT_ALPHA * 0.85, epsilon = 1e-12);

        let lines: Vec<&DrawOp> = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .collect();
        assert_eq!(lines.len(), 1);
        let DrawOp::Line { stroke, .. } = lines[0] else {
            unreachable!()
        };
        assert_relative_eq!(
            stroke.color.a,
            (1.0 - 40.0 / 120.0) * FAR_LINK_ALPHA,
            epsilon = 1e-12
        );
    }

    #[test]
    fn near_field_clears_its_layer_then_links_neighbours() {
        let size = LogicalSize::new(300.0, 300.0);
        let at = |x: f64, y: f64| NearPoint {
            position: Point2D::new(x, y),
            velocity: Vector2D::default(),
        };
        let field = NearField::from_points(vec![at(10.0, 10.0), at(40.0, 50.0), at(290.0, 290.0)]);
        let mut list = DisplayList::new();
        list.fill_dot(Point2D::default(), 1.0, Palette::default().mesh_dot);
        draw_near_field(&mut list, &field, &Palette::default(), size);

        assert_eq!(list.ops()[0], DrawOp::Clear(size));
        assert_eq!(list.count(|op| matches!(op, DrawOp::Dot { .. })), 3);
        assert_eq!(list.count(|op| matches!(op, DrawOp::Line { .. })), 1);
    }

    #[test]
    fn zero_gap_grid_draws_nothing_instead_of_spinning() {
        assert_eq!(grid_positions(0.0, 100.0, 0.0).count(), 0);
        assert_eq!(grid_positions(0.0, 10.0, 5.0).count(), 5);
    }
}
