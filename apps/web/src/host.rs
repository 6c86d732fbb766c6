use std::cell::RefCell;
use std::rc::Weak;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use interview_backdrop::surface::LogicalSize;
use interview_backdrop::{Backdrop, FrameScheduler, Host, Layer};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::canvas::CanvasLayer;

pub type WebBackdrop = Backdrop<DomHost, RafScheduler>;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Inline styles for the host element. A backdrop on `body` covers the
/// viewport behind everything; elsewhere it fills its mount.
pub fn host_styles(on_body: bool) -> [(&'static str, &'static str); 4] {
    if on_body {
        [
            ("position", "fixed"),
            ("inset", "0"),
            ("z-index", "-2"),
            ("pointer-events", "none"),
        ]
    } else {
        [
            ("position", "absolute"),
            ("inset", "0"),
            ("z-index", "-1"),
            ("pointer-events", "none"),
        ]
    }
}

/// Absolute children need a positioned mount.
pub fn needs_relative_position(computed: &str) -> bool {
    computed.is_empty() || computed == "static"
}

/// The `div.ai-backdrop` inserted into the mount, with its two canvases and
/// the scan-line overlay.
pub struct DomHost {
    window: Window,
    element: HtmlElement,
    radar: CanvasLayer,
    mesh: CanvasLayer,
    resize_listener: Option<EventListener>,
}

impl DomHost {
    pub fn attach(window: Window, document: &Document, mount: &Element) -> Result<Self, JsValue> {
        let element: HtmlElement = document.create_element("div")?.dyn_into()?;
        element.set_class_name("ai-backdrop");

        let radar = CanvasLayer::create(document)?;
        let mesh = CanvasLayer::create(document)?;
        let scan = document.create_element("div")?;
        scan.set_class_name("ai-scan");
        element.append_child(radar.element())?;
        element.append_child(mesh.element())?;
        element.append_child(&scan)?;

        let on_body = document
            .body()
            .is_some_and(|body| body.unchecked_ref::<Element>() == mount);
        let style = element.style();
        for (property, value) in host_styles(on_body) {
            style.set_property(property, value)?;
        }

        if on_body {
            mount.prepend_with_node_1(&element)?;
        } else {
            let position = window
                .get_computed_style(mount)?
                .map(|computed| computed.get_property_value("position"))
                .transpose()?
                .unwrap_or_default();
            if needs_relative_position(&position) {
                if let Some(mount) = mount.dyn_ref::<HtmlElement>() {
                    mount.style().set_property("position", "relative")?;
                }
            }
            mount.append_child(&element)?;
        }

        Ok(Self {
            window,
            element,
            radar,
            mesh,
            resize_listener: None,
        })
    }

    /// Re-lays out the backdrop on every window resize until teardown.
    pub fn listen_for_resize(&mut self, backdrop: Weak<RefCell<WebBackdrop>>) {
        let listener = EventListener::new(&self.window, "resize", move |_| {
            if let Some(backdrop) = backdrop.upgrade() {
                backdrop.borrow_mut().resize();
            }
        });
        self.resize_listener = Some(listener);
    }
}

impl Host for DomHost {
    type Surface = CanvasLayer;

    fn content_box(&self) -> LogicalSize {
        let rect = self.element.get_bounding_client_rect();
        LogicalSize::new(rect.width(), rect.height())
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map_or(0.0, |performance| performance.now())
    }

    fn layer(&mut self, layer: Layer) -> &mut CanvasLayer {
        match layer {
            Layer::Radar => &mut self.radar,
            Layer::Mesh => &mut self.mesh,
        }
    }

    fn teardown(&mut self) {
        // Dropping the listener unregisters it.
        self.resize_listener = None;
        self.element.remove();
    }
}

/// `requestAnimationFrame` scheduling. The handle cancels the request when
/// dropped.
pub struct RafScheduler {
    backdrop: Weak<RefCell<WebBackdrop>>,
}

impl RafScheduler {
    pub const fn new(backdrop: Weak<RefCell<WebBackdrop>>) -> Self {
        Self { backdrop }
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = AnimationFrame;

    fn request_frame(&mut self) -> AnimationFrame {
        let backdrop = Weak::clone(&self.backdrop);
        request_animation_frame(move |timestamp| {
            if let Some(backdrop) = backdrop.upgrade() {
                backdrop.borrow_mut().frame(timestamp);
            }
        })
    }

    fn cancel_frame(&mut self, handle: AnimationFrame) {
        drop(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_backdrop_sits_behind_the_page() {
        let styles = host_styles(true);
        assert!(styles.contains(&("position", "fixed")));
        assert!(styles.contains(&("z-index", "-2")));
        assert!(styles.contains(&("pointer-events", "none")));
    }

    #[test]
    fn element_backdrop_fills_its_mount() {
        let styles = host_styles(false);
        assert!(styles.contains(&("position", "absolute")));
        assert!(styles.contains(&("z-index", "-1")));
        assert!(styles.contains(&("inset", "0")));
    }

    #[test]
    fn only_unpositioned_mounts_are_made_relative() {
        assert!(needs_relative_position("static"));
        assert!(needs_relative_position(""));
        assert!(!needs_relative_position("absolute"));
        assert!(!needs_relative_position("relative"));
    }
}
