use std::time::Instant;

use interview_backdrop::render::DisplayList;
use interview_backdrop::surface::LogicalSize;
use interview_backdrop::{FrameScheduler, Host, Layer};

/// Logical pixels per terminal cell. Cells are roughly twice as tall as
/// they are wide.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// A terminal viewport whose layers are display lists, replayed onto a
/// ratatui canvas at draw time.
#[derive(Debug)]
pub struct TerminalHost {
    cols: u16,
    rows: u16,
    reduced_motion: bool,
    clock: Instant,
    radar: DisplayList,
    mesh: DisplayList,
    torn_down: bool,
}

impl TerminalHost {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            reduced_motion: false,
            clock: Instant::now(),
            radar: DisplayList::new(),
            mesh: DisplayList::new(),
            torn_down: false,
        }
    }

    pub fn set_viewport(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub const fn viewport(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub const fn radar_layer(&self) -> &DisplayList {
        &self.radar
    }

    pub const fn mesh_layer(&self) -> &DisplayList {
        &self.mesh
    }

    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl Host for TerminalHost {
    type Surface = DisplayList;

    fn content_box(&self) -> LogicalSize {
        LogicalSize::new(
            f64::from(self.cols) * CELL_WIDTH_PX,
            f64::from(self.rows) * CELL_HEIGHT_PX,
        )
    }

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    fn layer(&mut self, layer: Layer) -> &mut DisplayList {
        match layer {
            Layer::Radar => &mut self.radar,
            Layer::Mesh => &mut self.mesh,
        }
    }

    fn teardown(&mut self) {
        self.radar.clear_ops();
        self.mesh.clear_ops();
        self.torn_down = true;
    }
}

/// Frame requests served by the event loop's tick. At most one request is
/// outstanding; a cancelled token never fires.
#[derive(Debug, Default)]
pub struct TickScheduler {
    next: u64,
    pending: Option<u64>,
}

impl TickScheduler {
    /// Takes the outstanding request, if any, for the tick to run.
    pub fn take_due(&mut self) -> Option<u64> {
        self.pending.take()
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for TickScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> u64 {
        self.next += 1;
        self.pending = Some(self.next);
        self.next
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
