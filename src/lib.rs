//! Frame review player: render a video frame by frame, draw boxes on it with
//! the mouse, and collect per-class thumbnails in a dock.

slint::include_modules!();

pub mod callbacks;
pub mod classes;
pub mod cli;
pub mod config;
pub mod dock;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod label;
pub mod overlay;
pub mod player;
pub mod record;
pub mod render_surface;
pub mod signal;
pub mod source;
pub mod telemetry;
pub mod utils;
