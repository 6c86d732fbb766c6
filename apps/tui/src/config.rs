use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_NAME: &str = "backdrop.db";

/// Settings read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
}

/// Initializes the application configuration
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()?;
    let db_name = env::var("BACKDROP_DB").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());
    let database_path = base_dir.join(&db_name);

    // Create parent directory if it doesn't exist
    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let database_url = sqlite_url(&database_path)?;
    debug_line(format_args!("Using database URL: {database_url}"));

    Ok(AppConfig { database_url })
}

/// SQLx wants `sqlite:///abs/path` for absolute paths and
/// `sqlite://rel/path` for relative ones.
pub fn sqlite_url(path: &Path) -> color_eyre::eyre::Result<String> {
    // We don't canonicalize because the file might not exist yet
    let path_str = path.to_str().ok_or_else(|| eyre!("Invalid database path"))?;
    let clean_path = path_str.trim_start_matches('/');

    Ok(if path.is_absolute() {
        format!("sqlite:///{clean_path}")
    } else {
        format!("sqlite://{clean_path}")
    })
}

pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|value| value == "1" || value.eq_ignore_ascii_case("true"))
}

/// Prints a `[DEBUG]` line to stderr when `DEBUG` is set.
pub fn debug_line(message: impl std::fmt::Display) {
    if debug_enabled() {
        eprintln!("[DEBUG] {message}");
    }
}
