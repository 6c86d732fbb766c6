use crate::config::debug_line;
use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Creates the key/value table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens (creating if needed) the SQLite database at `database_url` and
/// applies the schema.
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    debug_line(format_args!("Initializing database with URL: {database_url}"));

    let db_path = extract_db_path_from_url(database_url)
        .map_err(|e| color_eyre::eyre::eyre!("Invalid database URL format: {e}"))?;
    debug_line(format_args!("Will connect to SQLite DB at: {db_path}"));

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug_line(format_args!("Creating parent directory: {}", parent.display()));
            std::fs::create_dir_all(parent)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to create database directory: {e}"))?;
        }
    }

    let db_exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Error checking database: {e}"))?;
    if !db_exists {
        debug_line("Database does not exist, creating it now");
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create SQLite database: {e}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| {
            eprintln!("Failed to connect to database: {e}");
            color_eyre::eyre::eyre!("Failed to connect to SQLite database: {e}")
        })?;

    setup_database(&pool)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up database schema: {e}"))?;

    debug_line("Database initialization completed successfully");
    Ok(pool)
}

/// Extracts the filesystem path from a `sqlite://` URL
fn extract_db_path_from_url(url: &str) -> Result<String, color_eyre::eyre::Error> {
    let Some(path_part) = url.strip_prefix("sqlite://") else {
        return Err(color_eyre::eyre::eyre!("Not a valid SQLite URL: {url}"));
    };

    if cfg!(windows) {
        // sqlite:///C:/path or sqlite://C:/path
        if let Some(drive_idx) = path_part.find(':') {
            if drive_idx > 0 {
                return Ok(path_part
                    .strip_prefix('/')
                    .unwrap_or(path_part)
                    .to_string());
            }
        }
    }

    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    Ok(path_part.to_string())
}
