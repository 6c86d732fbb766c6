use clap::{CommandFactory, Parser};
use interview_backdrop::BackdropConfig;

#[derive(Debug, Parser)]
#[command(
    name = "interview_backdrop_tui",
    version,
    about = "Radar backdrop preview and offline interview questions"
)]
pub struct CliArgs {
    /// Print an offline question set and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Question category used when no position is given
    #[arg(long, default_value = "java")]
    pub category: String,

    /// Position the questions are generated for
    #[arg(long, default_value = "")]
    pub position: String,

    /// Job description text
    #[arg(long, default_value = "")]
    pub jd: String,

    /// Monthly salary; picks the difficulty tier
    #[arg(long, default_value = "")]
    pub salary: String,

    /// Persist the generated set under KEY
    #[arg(long, value_name = "KEY")]
    pub save: Option<String>,

    /// Print the value stored under KEY instead of generating
    #[arg(long, value_name = "KEY", conflicts_with = "save")]
    pub load: Option<String>,

    /// Beam speed in radians per second
    #[arg(long, allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Beam field of view in degrees
    #[arg(long)]
    pub fov: Option<f64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("BACKDROP_DB", db);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Default backdrop settings with the beam flags applied.
    pub fn backdrop_config(&self) -> BackdropConfig {
        let defaults = BackdropConfig::default();
        BackdropConfig {
            speed: self.speed.unwrap_or(defaults.speed),
            fov: self.fov.unwrap_or(defaults.fov),
            ..defaults
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
