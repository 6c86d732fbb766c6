use std::cell::RefCell;
use std::rc::Rc;

use interview_backdrop::render::DisplayList;
use interview_backdrop::surface::LogicalSize;
use interview_backdrop::{
    Backdrop, BackdropConfig, BackdropError, BackdropHandle, BackdropRegistry, FrameScheduler,
    Host, Layer,
};

/// Requests land in a queue shared with the test, standing in for the
/// display's frame callbacks.
#[derive(Clone, Default)]
pub struct FrameQueue(pub Rc<RefCell<Vec<u32>>>);

pub struct QueueScheduler {
    queue: FrameQueue,
    next: u32,
}

impl FrameScheduler for QueueScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> u32 {
        self.next += 1;
        self.queue.0.borrow_mut().push(self.next);
        self.next
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.queue.0.borrow_mut().retain(|&queued| queued != handle);
    }
}

/// A mounted page element at device pixel ratio 2.
pub struct PageHost {
    pub size: LogicalSize,
    pub reduced_motion: bool,
    pub radar: DisplayList,
    pub mesh: DisplayList,
    pub detached: bool,
}

impl PageHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: LogicalSize::new(width, height),
            reduced_motion: false,
            radar: DisplayList::new(),
            mesh: DisplayList::new(),
            detached: false,
        }
    }
}

impl Host for PageHost {
    type Surface = DisplayList;

    fn content_box(&self) -> LogicalSize {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        2.0
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn now_ms(&self) -> f64 {
        0.0
    }

    fn layer(&mut self, layer: Layer) -> &mut DisplayList {
        match layer {
            Layer::Radar => &mut self.radar,
            Layer::Mesh => &mut self.mesh,
        }
    }

    fn teardown(&mut self) {
        self.detached = true;
    }
}

pub type Registry = BackdropRegistry<u32, PageHost, QueueScheduler>;
pub type Handle = BackdropHandle<u32, PageHost, QueueScheduler>;

pub fn mount(registry: &Registry, queue: &FrameQueue, host: PageHost) -> Result<Handle, BackdropError> {
    let queue = queue.clone();
    registry.mount(Some(1), "#stage", move |_| {
        let scheduler = QueueScheduler { queue, next: 0 };
        Ok(Rc::new(RefCell::new(Backdrop::new(
            host,
            scheduler,
            BackdropConfig::default(),
        ))))
    })
}

/// Fires every queued callback once, the way one display refresh would.
pub fn refresh(queue: &FrameQueue, handle: &Handle, timestamp_ms: f64) -> usize {
    let due: Vec<u32> = queue.0.borrow_mut().drain(..).collect();
    for _ in &due {
        handle.frame(timestamp_ms);
    }
    due.len()
}
