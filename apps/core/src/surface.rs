/// Size in CSS (logical) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }

    pub fn diagonal(self) -> f64 {
        self.width.hypot(self.height)
    }
}

/// Size of a surface's backing store in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

/// Sizing for both drawing layers, derived from the host's content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Displayed size; all drawing happens in these units.
    pub logical: LogicalSize,
    /// Backing resolution (logical × dpr, at least 1×1).
    pub backing: PixelSize,
    /// Drawing transform scale, equal to the effective device pixel ratio.
    pub scale: f64,
}

impl SurfaceLayout {
    pub fn compute(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let scale = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.max(1.0)
        } else {
            1.0
        };
        let logical = LogicalSize::new(at_least_one(css_width), at_least_one(css_height));
        let backing_edge = |edge: f64| (edge * scale).floor().clamp(1.0, f64::from(u32::MAX)) as u32;

        Self {
            logical,
            backing: PixelSize {
                width: backing_edge(logical.width),
                height: backing_edge(logical.height),
            },
            scale,
        }
    }
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self::compute(1.0, 1.0, 1.0)
    }
}

fn at_least_one(value: f64) -> f64 {
    if value.is_finite() {
        value.max(1.0)
    } else {
        1.0
    }
}

/// A drawing layer that can be resized to a [`SurfaceLayout`].
///
/// Implementations must set the displayed size to `layout.logical`, the
/// backing store to `layout.backing` and reset the drawing transform to a
/// uniform `layout.scale`, so later drawing is issued in logical pixels.
pub trait Surface: crate::render::Painter {
    fn apply_layout(&mut self, layout: &SurfaceLayout);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_store_scales_with_dpr_but_display_does_not() {
        let layout = SurfaceLayout::compute(800.0, 600.0, 2.0);
        assert_eq!(layout.logical, LogicalSize::new(800.0, 600.0));
        assert_eq!(layout.backing, PixelSize { width: 1600, height: 1200 });
        assert_eq!(layout.scale, 2.0);
    }

    #[test]
    fn fractional_dpr_floors_backing_store() {
        let layout = SurfaceLayout::compute(333.0, 101.0, 1.5);
        assert_eq!(layout.backing, PixelSize { width: 499, height: 151 });
    }

    #[test]
    fn degenerate_hosts_clamp_to_one_pixel() {
        let layout = SurfaceLayout::compute(0.0, 0.0, 0.5);
        assert_eq!(layout.logical, LogicalSize::new(1.0, 1.0));
        assert_eq!(layout.backing, PixelSize { width: 1, height: 1 });
        assert_eq!(layout.scale, 1.0);

        let layout = SurfaceLayout::compute(f64::NAN, -20.0, f64::NAN);
        assert_eq!(layout.logical, LogicalSize::new(1.0, 1.0));
        assert_eq!(layout.scale, 1.0);
    }
}
