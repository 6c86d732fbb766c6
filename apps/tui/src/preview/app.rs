use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use interview_backdrop::{Backdrop, BackdropConfig, DriverState, Host};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::help::render_help;
use super::host::{TerminalHost, TickScheduler};
use super::replay;

pub type TerminalBackdrop = Backdrop<TerminalHost, TickScheduler>;

pub const SPEED_STEP: f64 = 0.1;
pub const FOV_STEP_DEGREES: f64 = 2.0;
/// Rows below the canvas taken by the status line.
pub const STATUS_ROWS: u16 = 1;

/// Interactive preview: one backdrop filling the terminal above a status
/// line.
pub struct PreviewApp {
    backdrop: TerminalBackdrop,
    pub running: bool,
    pub show_help: bool,
}

impl PreviewApp {
    /// `cols`/`rows` is the canvas area, excluding the status line.
    pub fn new(cols: u16, rows: u16, config: BackdropConfig) -> Self {
        Self::from_backdrop(Backdrop::new(
            TerminalHost::new(cols, rows),
            TickScheduler::default(),
            config,
        ))
    }

    pub fn with_rng(cols: u16, rows: u16, config: BackdropConfig, rng: fastrand::Rng) -> Self {
        Self::from_backdrop(Backdrop::with_rng(
            TerminalHost::new(cols, rows),
            TickScheduler::default(),
            config,
            rng,
        ))
    }

    const fn from_backdrop(backdrop: TerminalBackdrop) -> Self {
        Self {
            backdrop,
            running: true,
            show_help: false,
        }
    }

    pub const fn backdrop(&self) -> &TerminalBackdrop {
        &self.backdrop
    }

    pub fn start(&mut self) {
        self.backdrop.start();
    }

    /// Tears the backdrop down; the app stops running.
    pub fn quit(&mut self) {
        self.backdrop.destroy();
        self.running = false;
    }

    pub fn set_viewport(&mut self, cols: u16, rows: u16) {
        self.backdrop.host_mut().set_viewport(cols, rows);
        self.backdrop.resize();
    }

    /// Runs the frame callback if one was requested. Returns whether it ran.
    pub fn tick(&mut self) -> bool {
        if self.backdrop.scheduler_mut().take_due().is_none() {
            return false;
        }
        let now = self.backdrop.host().now_ms();
        self.backdrop.frame(now);
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char(' ') => self.toggle_running(),
            KeyCode::Char('+' | '=') => self.nudge_speed(SPEED_STEP),
            KeyCode::Char('-' | '_') => self.nudge_speed(-SPEED_STEP),
            KeyCode::Char(']') => self.nudge_fov(FOV_STEP_DEGREES),
            KeyCode::Char('[') => self.nudge_fov(-FOV_STEP_DEGREES),
            KeyCode::Char('r') => self.backdrop.resize(),
            KeyCode::Char('m') => self.toggle_reduced_motion(),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
    }

    fn toggle_running(&mut self) {
        match self.backdrop.state() {
            DriverState::Running | DriverState::Static => self.backdrop.stop(),
            DriverState::Stopped => self.backdrop.start(),
            DriverState::Destroyed => {}
        }
    }

    fn nudge_speed(&mut self, delta: f64) {
        let speed = self.backdrop.radar().speed + delta;
        self.backdrop.set_speed(speed);
    }

    fn nudge_fov(&mut self, delta_degrees: f64) {
        let fov = (self.backdrop.radar().fov.to_degrees() + delta_degrees).clamp(0.0, 360.0);
        self.backdrop.set_fov_degrees(fov);
    }

    /// Reduced motion takes effect on the next frame; switching it off
    /// restarts a static backdrop.
    fn toggle_reduced_motion(&mut self) {
        let reduced = !self.backdrop.host().prefers_reduced_motion();
        self.backdrop.host_mut().set_reduced_motion(reduced);
        if !reduced && self.backdrop.state() == DriverState::Static {
            self.backdrop.start();
        }
    }

    pub fn status_line(&self) -> String {
        let radar = self.backdrop.radar();
        format!(
            " {} | speed {:.2} rad/s | fov {:.0}° | {} far {} near{} | space start/stop  +/- speed  [/] fov  r resize  m motion  ? help  q quit",
            self.backdrop.state().as_str(),
            radar.speed,
            radar.fov.to_degrees(),
            self.backdrop.far_field().len(),
            self.backdrop.near_field().len(),
            if self.backdrop.host().prefers_reduced_motion() {
                " | reduced motion"
            } else {
                ""
            },
        )
    }

    pub fn view(&self, frame: &mut Frame<'_>) {
        let [canvas_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_ROWS)])
                .areas(frame.area());

        let size = self.backdrop.layout().logical;
        let host = self.backdrop.host();
        let radar = replay::shapes(host.radar_layer(), size.height);
        let mesh = replay::shapes(host.mesh_layer(), size.height);

        frame.render_widget(
            Canvas::default()
                .background_color(Color::Black)
                .marker(Marker::Braille)
                .paint(|ctx| {
                    replay::paint(ctx, &radar);
                    ctx.layer();
                    replay::paint(ctx, &mesh);
                })
                .x_bounds([0.0, size.width])
                .y_bounds([0.0, size.height]),
            canvas_area,
        );
        frame.render_widget(
            Paragraph::new(self.status_line()).style(Style::default().fg(Color::DarkGray)),
            status_area,
        );

        if self.show_help {
            render_help(frame, canvas_area);
        }
    }
}
