use crate::config::BackdropConfig;
use crate::driver::{Backdrop, FrameScheduler, Host, Layer};
use crate::render::DisplayList;
use crate::surface::LogicalSize;

/// A host whose layers record draw calls.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub size: LogicalSize,
    pub dpr: f64,
    pub reduced_motion: bool,
    pub now: f64,
    pub teardowns: usize,
    radar: DisplayList,
    mesh: DisplayList,
}

impl RecordingHost {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            size: LogicalSize::new(width, height),
            dpr,
            ..Self::default()
        }
    }

    pub const fn radar_layer(&self) -> &DisplayList {
        &self.radar
    }

    pub const fn mesh_layer(&self) -> &DisplayList {
        &self.mesh
    }
}

impl Host for RecordingHost {
    type Surface = DisplayList;

    fn content_box(&self) -> LogicalSize {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn now_ms(&self) -> f64 {
        self.now
    }

    fn layer(&mut self, layer: Layer) -> &mut DisplayList {
        match layer {
            Layer::Radar => &mut self.radar,
            Layer::Mesh => &mut self.mesh,
        }
    }

    fn teardown(&mut self) {
        self.teardowns += 1;
    }
}

/// Hands out numbered tokens and tracks which are still live.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    live: Vec<u64>,
    cancelled: usize,
}

impl ManualScheduler {
    pub const fn requested(&self) -> u64 {
        self.next
    }

    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub const fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// Consumes the oldest live request, as the display would when it fires.
    pub fn fire(&mut self) -> Option<u64> {
        if self.live.is_empty() {
            None
        } else {
            Some(self.live.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> u64 {
        self.next += 1;
        self.live.push(self.next);
        self.next
    }

    fn cancel_frame(&mut self, handle: u64) {
        self.live.retain(|&token| token != handle);
        self.cancelled += 1;
    }
}

pub fn backdrop_with(host: RecordingHost) -> Backdrop<RecordingHost, ManualScheduler> {
    Backdrop::with_rng(
        host,
        ManualScheduler::default(),
        BackdropConfig::default(),
        fastrand::Rng::with_seed(7),
    )
}

/// Runs the scheduled frame callback, if there is one. Returns whether a
/// callback fired.
pub fn pump(backdrop: &mut Backdrop<RecordingHost, ManualScheduler>, timestamp_ms: f64) -> bool {
    if backdrop.scheduler_mut().fire().is_none() {
        return false;
    }
    backdrop.frame(timestamp_ms);
    true
}
