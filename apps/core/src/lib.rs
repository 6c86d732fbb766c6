//! Interview backdrop
//!
//! The animated radar backdrop (sweeping beam, beam-lit starfield and a
//! constellation mesh) plus the offline interview question bank that the
//! interview page falls back to when the remote service is unreachable.
//!
//! Everything in this crate is host-agnostic: drawing goes through
//! [`render::Painter`], frame scheduling through [`driver::FrameScheduler`]
//! and the page through [`driver::Host`]. The `web` and `tui` apps provide the
//! concrete implementations.

pub mod api;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod numeric;
pub mod particles;
pub mod questions;
pub mod radar;
pub mod registry;
pub mod render;
pub mod store;
pub mod surface;

pub use config::{BackdropConfig, Palette};
pub use driver::{Backdrop, DriverState, FrameScheduler, Host, Layer};
pub use error::{BackdropError, RequestError, StoreError};
pub use registry::{BackdropHandle, BackdropRegistry, WrapperCache};

#[cfg(test)]
pub mod test_utils;
