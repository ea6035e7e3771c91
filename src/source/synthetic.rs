use image::RgbImage;

use super::FrameSource;
use crate::error::SourceError;
use crate::frame::FrameBuffer;
use crate::geometry::FractionalBox;
use crate::record::{FrameData, FrameRecord};

/// Generated clip: a drifting gradient with one square crossing the frame.
#[derive(Debug, Clone)]
pub struct SyntheticClip {
    width: u32,
    height: u32,
    frames: usize,
    object_class: String,
}

impl SyntheticClip {
    pub fn new(width: u32, height: u32, frames: usize) -> Self {
        Self {
            width: width.max(8),
            height: height.max(8),
            frames,
            object_class: "car".to_string(),
        }
    }

    pub fn with_class(mut self, object_class: impl Into<String>) -> Self {
        self.object_class = object_class.into();
        self
    }

    /// Fractional box of the moving square on frame `index`.
    pub fn object_box(&self, index: usize) -> FractionalBox {
        let side = 0.2;
        let travel = 1.0 - side;
        let t = if self.frames > 1 {
            index as f64 / (self.frames - 1) as f64
        } else {
            0.0
        };
        let x1 = travel * t;
        let y1 = 0.4 * (1.0 - t) + 0.2;
        FractionalBox::new(x1, y1, x1 + side, y1 + side)
    }

    fn render(&self, index: usize) -> RgbImage {
        let bbox = self.object_box(index).to_pixel(self.width, self.height);
        let shift = ((index * 3) % self.width as usize) as u32;
        RgbImage::from_fn(self.width, self.height, |x, y| {
            if x >= bbox.x1 && x < bbox.x2 && y >= bbox.y1 && y < bbox.y2 {
                image::Rgb([230, 200, 40])
            } else {
                let r = ((x + shift) * 255 / self.width) as u8;
                let b = (y * 255 / self.height) as u8;
                image::Rgb([r / 2, 40, b / 2])
            }
        })
    }
}

impl FrameSource for SyntheticClip {
    fn len(&self) -> usize {
        self.frames
    }

    fn load(&mut self, index: usize) -> Result<FrameData, SourceError> {
        if index >= self.frames {
            return Err(SourceError::OutOfRange {
                index,
                len: self.frames,
            });
        }
        let frame = FrameBuffer::from_rgb_image(self.render(index))?;
        let record = FrameRecord::fractional(index, self.object_box(index), self.object_class.clone(), 1)
            .with_tag("synthetic");
        Ok(FrameData::new(frame, index).with_records(vec![record]))
    }

    fn describe(&self) -> String {
        format!("synthetic clip ({} frames, {}x{})", self.frames, self.width, self.height)
    }
}
