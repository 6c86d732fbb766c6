//! Lifecycle and per-frame stepping of one backdrop instance.

use crate::config::BackdropConfig;
use crate::particles::{FarField, NearField};
use crate::radar::RadarState;
use crate::render::{draw_beam, draw_far_field, draw_near_field, draw_static, Painter};
use crate::surface::{LogicalSize, Surface, SurfaceLayout};

/// Longest step a single frame may take, in seconds.
pub const MAX_FRAME_SECONDS: f64 = 1.0 / 30.0;

/// The two stacked drawing layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Halo, grid, rings, beam and the far field. Cleared every frame.
    Radar,
    /// Near-field mesh overlay.
    Mesh,
}

/// The page (or terminal) a backdrop lives in.
pub trait Host {
    type Surface: Surface;

    /// Current content-box size of the mount, in logical pixels.
    fn content_box(&self) -> LogicalSize;
    fn device_pixel_ratio(&self) -> f64;
    fn prefers_reduced_motion(&self) -> bool;
    /// Monotonic clock in milliseconds, used for draws outside the frame loop.
    fn now_ms(&self) -> f64;
    fn layer(&mut self, layer: Layer) -> &mut Self::Surface;
    /// Detach the rendered surfaces and any listeners. Called exactly once.
    fn teardown(&mut self);
}

/// Display-synchronised callback scheduling.
///
/// `request_frame` arranges for [`Backdrop::frame`] to be called once. The
/// returned handle is the only way to cancel it: after `cancel_frame` returns
/// the callback must not run.
pub trait FrameScheduler {
    type Handle;

    fn request_frame(&mut self) -> Self::Handle;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Stopped,
    Running,
    /// Reduced motion: drawn once, no frame loop.
    Static,
    Destroyed,
}

impl DriverState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Static => "static",
            Self::Destroyed => "destroyed",
        }
    }
}

pub struct Backdrop<H: Host, S: FrameScheduler> {
    host: H,
    scheduler: S,
    config: BackdropConfig,
    layout: SurfaceLayout,
    radar: RadarState,
    far: FarField,
    near: NearField,
    rng: fastrand::Rng,
    state: DriverState,
    pending: Option<S::Handle>,
    last_frame_ms: Option<f64>,
}

impl<H: Host, S: FrameScheduler> Backdrop<H, S> {
    /// Builds the instance, sizes both layers and draws once. Does not start
    /// the frame loop.
    pub fn new(host: H, scheduler: S, config: BackdropConfig) -> Self {
        Self::with_rng(host, scheduler, config, fastrand::Rng::new())
    }

    pub fn with_rng(host: H, scheduler: S, config: BackdropConfig, rng: fastrand::Rng) -> Self {
        let config = config.normalized();
        let radar = RadarState::new(config.fov, config.speed);
        let mut backdrop = Self {
            host,
            scheduler,
            config,
            layout: SurfaceLayout::default(),
            radar,
            far: FarField::default(),
            near: NearField::default(),
            rng,
            state: DriverState::Stopped,
            pending: None,
            last_frame_ms: None,
        };
        backdrop.resize();
        backdrop
    }

    pub fn start(&mut self) {
        match self.state {
            DriverState::Running | DriverState::Destroyed => return,
            DriverState::Stopped | DriverState::Static => {}
        }

        if self.host.prefers_reduced_motion() {
            log::debug!("reduced motion requested, drawing a static frame");
            let now = self.host.now_ms();
            self.draw(now);
            self.state = DriverState::Static;
            return;
        }

        self.last_frame_ms = None;
        self.pending = Some(self.scheduler.request_frame());
        self.state = DriverState::Running;
        log::debug!("backdrop started");
    }

    pub fn stop(&mut self) {
        match self.state {
            DriverState::Running => {
                self.cancel_pending();
                self.state = DriverState::Stopped;
                log::debug!("backdrop stopped");
            }
            DriverState::Static => self.state = DriverState::Stopped,
            DriverState::Stopped | DriverState::Destroyed => {}
        }
    }

    /// Terminal. Cancels any scheduled frame and tears the host down.
    pub fn destroy(&mut self) {
        if self.state == DriverState::Destroyed {
            return;
        }
        self.cancel_pending();
        self.host.teardown();
        self.state = DriverState::Destroyed;
        log::debug!("backdrop destroyed");
    }

    /// Re-measures the host, resizes both layers, regenerates both
    /// populations and redraws immediately.
    pub fn resize(&mut self) {
        if self.state == DriverState::Destroyed {
            return;
        }
        let css = self.host.content_box();
        self.layout = SurfaceLayout::compute(css.width, css.height, self.host.device_pixel_ratio());
        let size = self.layout.logical;

        self.host.layer(Layer::Radar).apply_layout(&self.layout);
        self.host.layer(Layer::Mesh).apply_layout(&self.layout);

        self.radar.fit(size);
        self.far.regenerate(self.config.density, size, &mut self.rng);
        self.near
            .regenerate(size, self.config.mesh_density_base, &mut self.rng);
        log::debug!(
            "resized to {}x{} @{}; {} far, {} near points",
            size.width,
            size.height,
            self.layout.scale,
            self.far.len(),
            self.near.len()
        );

        let now = self.host.now_ms();
        self.draw(now);
    }

    /// Frame callback. `timestamp_ms` comes from the scheduler's clock.
    pub fn frame(&mut self, timestamp_ms: f64) {
        if self.state != DriverState::Running {
            return;
        }
        // This callback is the one the handle referred to.
        self.pending = None;

        if self.host.prefers_reduced_motion() {
            self.draw(timestamp_ms);
            self.state = DriverState::Static;
            return;
        }

        let elapsed = frame_seconds(self.last_frame_ms, timestamp_ms);
        self.last_frame_ms = Some(timestamp_ms);

        let size = self.layout.logical;
        self.radar.advance(elapsed);
        self.far.step(elapsed, size);
        self.near.step(size);
        self.draw(timestamp_ms);

        self.pending = Some(self.scheduler.request_frame());
    }

    /// Coerced by [`crate::numeric::finite_or_zero`]; invalid becomes 0.
    pub fn set_speed(&mut self, radians_per_second: f64) {
        self.radar.set_speed(radians_per_second);
    }

    pub fn set_fov_degrees(&mut self, degrees: f64) {
        self.radar.set_fov_degrees(degrees);
    }

    pub const fn state(&self) -> DriverState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running)
    }

    pub const fn radar(&self) -> &RadarState {
        &self.radar
    }

    pub const fn far_field(&self) -> &FarField {
        &self.far
    }

    pub const fn near_field(&self) -> &NearField {
        &self.near
    }

    pub const fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub const fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn draw(&mut self, now_ms: f64) {
        let size = self.layout.logical;
        let colors = &self.config.colors;

        let radar_layer = self.host.layer(Layer::Radar);
        radar_layer.clear(size);
        draw_static(radar_layer, &self.radar, &self.config, size);
        draw_beam(radar_layer, &self.radar, colors, size);
        draw_far_field(radar_layer, &self.far, &self.radar, colors, now_ms);

        draw_near_field(self.host.layer(Layer::Mesh), &self.near, colors, size);
    }
}

/// Elapsed seconds since the previous frame, clamped to `[0, 1/30]`. The
/// first frame after a start has no previous timestamp and does not move.
pub fn frame_seconds(previous_ms: Option<f64>, timestamp_ms: f64) -> f64 {
    previous_ms.map_or(0.0, |previous| {
        let seconds = (timestamp_ms - previous) / 1000.0;
        if seconds.is_finite() {
            seconds.clamp(0.0, MAX_FRAME_SECONDS)
        } else {
            0.0
        }
    })
}
