//! Callback handlers wiring the Slint window to the player, render surface,
//! and thumbnail dock.
//!
//! - `render` - drag-to-select on the frame and the class label prompt
//! - `player` - play/pause, direction, slider seek, playback timer
//! - `dock` - per-class thumbnail rows and jump-to-frame

pub mod dock;
pub mod player;
pub mod render;
