//! Dock of per-class thumbnail rows.
//!
//! Each object class gets one [`SubViewer`], laid out top to bottom in
//! registration order. Records are routed to the viewer of their class.

mod strip;

pub use strip::{Thumbnail, ThumbnailStrip};

use std::rc::Rc;

use tracing::{debug, info};

use crate::error::DockError;
use crate::frame::FrameBuffer;
use crate::record::{FrameData, FrameRecord};
use crate::signal::Signal;

/// A class-specific child of the dock.
pub trait SubViewer {
    /// Append a thumbnail for `record`, cut from `frame`. Returns `false` if
    /// the record's box leaves nothing to show.
    fn add_to_row(&mut self, record: &FrameRecord, frame: &FrameBuffer) -> bool;

    fn thumbnail_count(&self) -> usize;
}

pub struct ThumbnailDock {
    title: String,
    viewers: Vec<(String, Box<dyn SubViewer>)>,
    /// Emitted with a frame index when a thumbnail is activated.
    pub jump_to_frame: Rc<Signal<usize>>,
}

impl ThumbnailDock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            viewers: Vec::new(),
            jump_to_frame: Rc::new(Signal::new()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Register `viewer` for `class_key` at the bottom of the dock.
    ///
    /// A viewer already registered under the same key is taken out of the
    /// layout and handed back.
    pub fn register_sub_viewer(
        &mut self,
        class_key: impl Into<String>,
        viewer: Box<dyn SubViewer>,
    ) -> Option<Box<dyn SubViewer>> {
        let class_key = class_key.into();
        let replaced = self
            .viewers
            .iter()
            .position(|(key, _)| *key == class_key)
            .map(|idx| self.viewers.remove(idx).1);
        if replaced.is_some() {
            info!(class = %class_key, "replacing thumbnail row");
        }
        self.viewers.push((class_key, viewer));
        replaced
    }

    pub fn add_record(&mut self, record: &FrameRecord, frame: &FrameBuffer) -> Result<bool, DockError> {
        let viewer = self
            .viewers
            .iter_mut()
            .find(|(key, _)| *key == record.object_class)
            .map(|(_, v)| v)
            .ok_or_else(|| DockError::UnregisteredClass(record.object_class.clone()))?;
        let added = viewer.add_to_row(record, frame);
        if !added {
            debug!(class = %record.object_class, frame = record.frame_id, "empty box, no thumbnail");
        }
        Ok(added)
    }

    /// Route every record of a batch. Stops at the first unregistered class.
    pub fn add_batch(&mut self, data: &FrameData) -> Result<usize, DockError> {
        let mut added = 0;
        for record in &data.records {
            if self.add_record(record, &data.frame)? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn is_registered(&self, class_key: &str) -> bool {
        self.viewers.iter().any(|(key, _)| key == class_key)
    }

    /// Class keys in layout order.
    pub fn class_keys(&self) -> impl Iterator<Item = &str> {
        self.viewers.iter().map(|(key, _)| key.as_str())
    }

    pub fn sub_viewer(&self, class_key: &str) -> Option<&dyn SubViewer> {
        self.viewers
            .iter()
            .find(|(key, _)| key == class_key)
            .map(|(_, v)| v.as_ref())
    }

    pub fn request_jump(&self, frame_id: usize) {
        self.jump_to_frame.emit(&frame_id);
    }
}
