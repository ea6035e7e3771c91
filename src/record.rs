//! Per-frame detection/annotation records and the batches they travel in.

use crate::frame::FrameBuffer;
use crate::geometry::{BoxCoords, FractionalBox, PixelBox};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub frame_id: usize,
    pub coords: BoxCoords,
    pub object_class: String,
    pub tag: Option<String>,
    pub track_id: u64,
}

impl FrameRecord {
    pub fn fractional(frame_id: usize, bbox: FractionalBox, object_class: impl Into<String>, track_id: u64) -> Self {
        Self {
            frame_id,
            coords: BoxCoords::Fractional(bbox),
            object_class: object_class.into(),
            tag: None,
            track_id,
        }
    }

    pub fn pixel(frame_id: usize, bbox: PixelBox, object_class: impl Into<String>, track_id: u64) -> Self {
        Self {
            frame_id,
            coords: BoxCoords::Pixel(bbox),
            object_class: object_class.into(),
            tag: None,
            track_id,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Pixel box for a frame of the given size, whatever space the record is in.
    pub fn pixel_box(&self, width: u32, height: u32) -> PixelBox {
        self.coords.to_pixel(width, height)
    }
}

/// One frame plus every record detected on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    pub frame: FrameBuffer,
    pub frame_id: usize,
    pub records: Vec<FrameRecord>,
}

impl FrameData {
    pub fn new(frame: FrameBuffer, frame_id: usize) -> Self {
        Self {
            frame,
            frame_id,
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<FrameRecord>) -> Self {
        self.records = records;
        self
    }

    /// Copy of this batch with every box converted to pixel space for this frame.
    pub fn to_pixel_space(&self) -> FrameData {
        let (width, height) = self.frame.dimensions();
        let records = self
            .records
            .iter()
            .map(|r| FrameRecord {
                coords: BoxCoords::Pixel(r.coords.to_pixel(width, height)),
                ..r.clone()
            })
            .collect();
        FrameData {
            frame: self.frame.clone(),
            frame_id: self.frame_id,
            records,
        }
    }
}
