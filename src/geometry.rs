//! Box types and the conversions between pixel and fractional space.

use serde::{Deserialize, Serialize};

/// Snap a pointer coordinate into `[0, dimension - 1]`.
pub fn clamp_coord(value: f32, dimension: u32) -> u32 {
    if dimension == 0 || value < 0.0 || value.is_nan() {
        0
    } else if value >= dimension as f32 {
        dimension - 1
    } else {
        value as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl PixelBox {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Clip to a `width x height` frame; `None` if nothing is left.
    pub fn clipped(&self, width: u32, height: u32) -> Option<PixelBox> {
        if width == 0 || height == 0 {
            return None;
        }
        let x1 = self.x1.min(self.x2).min(width - 1);
        let y1 = self.y1.min(self.y2).min(height - 1);
        let x2 = self.x1.max(self.x2).min(width - 1);
        let y2 = self.y1.max(self.y2).min(height - 1);
        let clipped = PixelBox::new(x1, y1, x2, y2);
        (!clipped.is_empty()).then_some(clipped)
    }

    pub fn to_fractional(&self, width: u32, height: u32) -> FractionalBox {
        let w = width.max(1) as f64;
        let h = height.max(1) as f64;
        FractionalBox {
            x1: self.x1 as f64 / w,
            y1: self.y1 as f64 / h,
            x2: self.x2 as f64 / w,
            y2: self.y2 as f64 / h,
        }
    }
}

/// Resolution-independent box: each field is a ratio of frame width or height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl FractionalBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Multiply by frame width (x) or height (y) and truncate.
    pub fn to_pixel(&self, width: u32, height: u32) -> PixelBox {
        let scale = |v: f64, dim: u32| -> u32 { (v * dim as f64).max(0.0) as u32 };
        PixelBox {
            x1: scale(self.x1, width),
            y1: scale(self.y1, height),
            x2: scale(self.x2, width),
            y2: scale(self.y2, height),
        }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x1, self.y1, self.x2, self.y2)
    }
}

/// A record's box together with the space it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", rename_all = "snake_case")]
pub enum BoxCoords {
    Fractional(FractionalBox),
    Pixel(PixelBox),
}

impl BoxCoords {
    pub fn to_pixel(&self, width: u32, height: u32) -> PixelBox {
        match self {
            BoxCoords::Fractional(f) => f.to_pixel(width, height),
            BoxCoords::Pixel(p) => *p,
        }
    }

    pub fn to_fractional(&self, width: u32, height: u32) -> FractionalBox {
        match self {
            BoxCoords::Fractional(f) => *f,
            BoxCoords::Pixel(p) => p.to_fractional(width, height),
        }
    }

    pub fn is_pixel(&self) -> bool {
        matches!(self, BoxCoords::Pixel(_))
    }
}

/// An in-progress drag: a fixed anchor and a free corner, both inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub anchor: (u32, u32),
    pub corner: (u32, u32),
    /// Size of the frame the drag started on.
    pub frame_size: (u32, u32),
}

impl SelectionRect {
    pub fn start(x: f32, y: f32, width: u32, height: u32) -> Self {
        let p = (clamp_coord(x, width), clamp_coord(y, height));
        Self {
            anchor: p,
            corner: p,
            frame_size: (width, height),
        }
    }

    /// Move the free corner, clamped to the frame the drag started on.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let (width, height) = self.frame_size;
        self.corner = (clamp_coord(x, width), clamp_coord(y, height));
    }

    /// The normalized box as fractions of the frame it was drawn on.
    pub fn to_fractional(&self) -> FractionalBox {
        let (w, h) = self.frame_size;
        self.normalized().to_fractional(w, h)
    }

    /// Ordered so that `x1 <= x2` and `y1 <= y2` whichever way the drag went.
    pub fn normalized(&self) -> PixelBox {
        PixelBox {
            x1: self.anchor.0.min(self.corner.0),
            y1: self.anchor.1.min(self.corner.1),
            x2: self.anchor.0.max(self.corner.0),
            y2: self.anchor.1.max(self.corner.1),
        }
    }
}
