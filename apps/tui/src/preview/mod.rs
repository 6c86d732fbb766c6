//! Terminal rendition of the backdrop.

pub mod app;
pub mod help;
pub mod host;
pub mod replay;

pub use app::PreviewApp;
pub use host::{TerminalHost, TickScheduler};
