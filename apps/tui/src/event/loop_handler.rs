use std::io::Stdout;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::MissedTickBehavior;

use crate::config::debug_line;
use crate::preview::app::STATUS_ROWS;
use crate::preview::PreviewApp;

/// Roughly 30 frames per second, matching the frame-time clamp.
pub const FRAME_INTERVAL_MS: u64 = 33;

/// Run the preview event loop until the app quits
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut PreviewApp,
) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while app.running {
        ticker.tick().await;
        app.tick();

        if let Err(e) = terminal.draw(|f| app.view(f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Drain whatever arrived since the last frame without blocking it
        while matches!(event::poll(Duration::ZERO), Ok(true)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(cols, rows)) => {
                    debug_line(format_args!("Terminal resized to {cols}x{rows}"));
                    app.set_viewport(cols, rows.saturating_sub(STATUS_ROWS));
                }
                Ok(_) | Err(_) => {
                    // Mouse, focus and paste events are not used
                }
            }
        }
    }

    Ok(())
}
