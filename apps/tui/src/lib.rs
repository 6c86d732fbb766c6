// Export our modules for use in the binary and tests
pub mod cli;
pub mod config;
pub mod db;
pub mod event;
pub mod headless;
pub mod preview;
pub mod terminal;
