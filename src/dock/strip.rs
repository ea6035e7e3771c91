use std::collections::VecDeque;
use std::rc::Rc;

use image::RgbImage;

use super::SubViewer;
use crate::frame::FrameBuffer;
use crate::overlay::crop_thumbnail;
use crate::record::FrameRecord;
use crate::signal::Signal;

#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub image: RgbImage,
    pub frame_id: usize,
    pub track_id: u64,
    pub tag: Option<String>,
}

/// A horizontal row of crops for one class, newest last, bounded in length.
pub struct ThumbnailStrip {
    class_key: String,
    thumb_height: u32,
    capacity: usize,
    thumbs: VecDeque<Thumbnail>,
    pub row_changed: Rc<Signal<()>>,
}

impl ThumbnailStrip {
    pub fn new(class_key: impl Into<String>, thumb_height: u32, capacity: usize) -> Self {
        Self {
            class_key: class_key.into(),
            thumb_height,
            capacity: capacity.max(1),
            thumbs: VecDeque::new(),
            row_changed: Rc::new(Signal::new()),
        }
    }

    pub fn class_key(&self) -> &str {
        &self.class_key
    }

    pub fn thumbnails(&self) -> impl Iterator<Item = &Thumbnail> {
        self.thumbs.iter()
    }

    pub fn latest(&self) -> Option<&Thumbnail> {
        self.thumbs.back()
    }

    pub fn clear(&mut self) {
        self.thumbs.clear();
        self.row_changed.emit(&());
    }
}

impl SubViewer for ThumbnailStrip {
    fn add_to_row(&mut self, record: &FrameRecord, frame: &FrameBuffer) -> bool {
        let (w, h) = frame.dimensions();
        let bbox = record.pixel_box(w, h);
        let Some(image) = crop_thumbnail(&frame.to_rgb_image(), bbox, self.thumb_height) else {
            return false;
        };
        if self.thumbs.len() == self.capacity {
            self.thumbs.pop_front();
        }
        self.thumbs.push_back(Thumbnail {
            image,
            frame_id: record.frame_id,
            track_id: record.track_id,
            tag: record.tag.clone(),
        });
        self.row_changed.emit(&());
        true
    }

    fn thumbnail_count(&self) -> usize {
        self.thumbs.len()
    }
}
