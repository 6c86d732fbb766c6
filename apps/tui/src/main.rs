use clap::Parser;
use color_eyre::Result;
use interview_backdrop_tui::cli::CliArgs;
use interview_backdrop_tui::preview::app::STATUS_ROWS;
use interview_backdrop_tui::preview::PreviewApp;
use interview_backdrop_tui::{config, event, headless, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let app_config = config::init_app_config()?;

    // Without a terminal there is nothing to preview on
    if args.headless || !is_terminal() {
        return headless::run_headless(&args, &app_config).await;
    }

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = PreviewApp::new(
        cols,
        rows.saturating_sub(STATUS_ROWS),
        args.backdrop_config(),
    );

    let mut terminal = terminal::setup_terminal()?;
    app.start();

    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
