//! Thumbnail dock callbacks and the Slint-backed sub-viewer.
//!
//! Handles: thumbnail_activated, plus registering class rows and feeding
//! record batches into the dock.

use crate::config::DockConfig;
use crate::dock::{SubViewer, ThumbnailDock, ThumbnailStrip};
use crate::error::DockError;
use crate::frame::FrameBuffer;
use crate::record::{FrameData, FrameRecord};
use crate::utils::{parse_color, to_slint_color, to_slint_image};
use crate::{AppWindow, DockRow, Thumb};
use slint::{Model, VecModel};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

const DEFAULT_ROW_COLOR: [u8; 3] = [200, 200, 200];

/// Sub-viewer that keeps a [`ThumbnailStrip`] and its Slint row model in step.
pub struct DockRowView {
    strip: ThumbnailStrip,
    model: Rc<VecModel<Thumb>>,
}

impl DockRowView {
    pub fn new(strip: ThumbnailStrip, model: Rc<VecModel<Thumb>>) -> Self {
        Self { strip, model }
    }
}

impl SubViewer for DockRowView {
    fn add_to_row(&mut self, record: &FrameRecord, frame: &FrameBuffer) -> bool {
        if !self.strip.add_to_row(record, frame) {
            return false;
        }
        if let Some(t) = self.strip.latest() {
            self.model.push(Thumb {
                image: to_slint_image(&t.image),
                frame_id: t.frame_id as i32,
                track_id: t.track_id as i32,
                tag: t.tag.clone().unwrap_or_default().into(),
            });
        }
        // The strip drops its oldest crop once full.
        while self.model.row_count() > self.strip.thumbnail_count() {
            self.model.remove(0);
        }
        true
    }

    fn thumbnail_count(&self) -> usize {
        self.strip.thumbnail_count()
    }
}

/// Register a thumbnail row for `class_name`, replacing any existing row.
pub fn register_class_row(
    dock: &RefCell<ThumbnailDock>,
    rows: &VecModel<DockRow>,
    class_name: &str,
    color: Option<&str>,
    config: &DockConfig,
) {
    let model = Rc::new(VecModel::<Thumb>::default());
    let strip = ThumbnailStrip::new(class_name, config.thumbnail_height, config.max_thumbnails_per_row);
    let replaced = dock
        .borrow_mut()
        .register_sub_viewer(class_name, Box::new(DockRowView::new(strip, model.clone())));

    if replaced.is_some() {
        if let Some(idx) = (0..rows.row_count())
            .find(|&i| rows.row_data(i).is_some_and(|r| r.class_name.as_str() == class_name))
        {
            rows.remove(idx);
        }
    }

    let rgb = color.and_then(parse_color).unwrap_or(DEFAULT_ROW_COLOR);
    rows.push(DockRow {
        class_name: class_name.into(),
        color: to_slint_color(rgb),
        thumbs: model.into(),
    });
}

/// Route a batch into the dock, logging records whose class has no row.
pub fn feed_batch(dock: &RefCell<ThumbnailDock>, data: &FrameData) -> usize {
    let mut dock = dock.borrow_mut();
    let mut added = 0;
    for record in &data.records {
        match dock.add_record(record, &data.frame) {
            Ok(true) => added += 1,
            Ok(false) => {}
            Err(DockError::UnregisteredClass(class)) => {
                warn!(frame = data.frame_id, "no thumbnail row for class {class:?}, record skipped");
            }
        }
    }
    added
}

/// Sets up all dock-related callbacks on the UI.
pub fn setup_dock_callbacks(ui: &AppWindow, dock: Rc<RefCell<ThumbnailDock>>) {
    ui.on_thumbnail_activated(move |frame_id| {
        // Emit outside the dock borrow; the jump reloads a frame, which feeds the dock.
        let jump = dock.borrow().jump_to_frame.clone();
        jump.emit(&(frame_id.max(0) as usize));
    });
}
