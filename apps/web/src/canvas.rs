use std::f64::consts::TAU;

use interview_backdrop::color::Rgba;
use interview_backdrop::geometry::Point2D;
use interview_backdrop::render::{Painter, RadialGradient, Sector, Stroke};
use interview_backdrop::surface::{LogicalSize, Surface, SurfaceLayout};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// One `<canvas>` and its 2D context.
pub struct CanvasLayer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

/// Drawing errors are environment bugs with no recovery; they are logged
/// and the frame carries on.
fn checked(result: Result<(), JsValue>, call: &str) {
    if let Err(err) = result {
        log::debug!("canvas {call} failed: {err:?}");
    }
}

impl CanvasLayer {
    pub fn create(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let style = canvas.style();
        style.set_property("position", "absolute")?;
        style.set_property("inset", "0")?;
        Ok(Self { canvas, ctx })
    }

    pub const fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn sector_path(&self, sector: Sector) {
        self.ctx.begin_path();
        self.ctx.move_to(sector.center.x, sector.center.y);
        checked(
            self.ctx.arc(
                sector.center.x,
                sector.center.y,
                sector.radius,
                sector.start,
                sector.end,
            ),
            "arc",
        );
        self.ctx.close_path();
    }
}

impl Painter for CanvasLayer {
    fn clear(&mut self, size: LogicalSize) {
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, size: LogicalSize) {
        let Point2D { x, y } = gradient.center;
        let fill = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, gradient.radius) {
            Ok(fill) => fill,
            Err(err) => {
                log::debug!("canvas createRadialGradient failed: {err:?}");
                return;
            }
        };
        for (offset, color) in &gradient.stops {
            checked(
                fill.add_color_stop(*offset as f32, &color.to_string()),
                "addColorStop",
            );
        }
        self.ctx.set_fill_style_canvas_gradient(&fill);
        self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_string());
        self.ctx.set_line_width(stroke.width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn stroke_arc(&mut self, arc: Sector, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_string());
        self.ctx.set_line_width(stroke.width);
        self.ctx.begin_path();
        checked(
            self.ctx
                .arc(arc.center.x, arc.center.y, arc.radius, arc.start, arc.end),
            "arc",
        );
        self.ctx.stroke();
    }

    fn fill_sector(&mut self, sector: Sector, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.sector_path(sector);
        self.ctx.fill();
    }

    fn clip_sector(&mut self, sector: Sector) {
        self.sector_path(sector);
        self.ctx.clip();
    }

    fn fill_dot(&mut self, center: Point2D, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.begin_path();
        checked(self.ctx.arc(center.x, center.y, radius, 0.0, TAU), "arc");
        self.ctx.fill();
    }
}

impl Surface for CanvasLayer {
    fn apply_layout(&mut self, layout: &SurfaceLayout) {
        let style = self.canvas.style();
        checked(
            style.set_property("width", &css_px(layout.logical.width)),
            "style.width",
        );
        checked(
            style.set_property("height", &css_px(layout.logical.height)),
            "style.height",
        );
        self.canvas.set_width(layout.backing.width);
        self.canvas.set_height(layout.backing.height);
        checked(
            self.ctx
                .set_transform(layout.scale, 0.0, 0.0, layout.scale, 0.0, 0.0),
            "setTransform",
        );
    }
}

pub fn css_px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::css_px;

    #[test]
    fn css_lengths_keep_fractional_pixels() {
        assert_eq!(css_px(800.0), "800px");
        assert_eq!(css_px(412.5), "412.5px");
    }
}
