//! Raw frame buffers and their conversion to displayable RGB images.

use crate::error::FrameError;
use image::{GrayImage, RgbImage};

/// Sample layout of a [`FrameBuffer`]. Multi-channel layouts are channel-last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    /// OpenCV-style ordering; swapped to RGB for display.
    Bgr8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
        }
    }
}

/// One decoded video frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::Empty { width, height });
        }
        let channels = format.channels();
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, format: PixelFormat, value: u8) -> Result<Self, FrameError> {
        let len = width as usize * height as usize * format.channels();
        Self::new(width, height, format, vec![value; len])
    }

    pub fn from_rgb_image(img: RgbImage) -> Result<Self, FrameError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelFormat::Rgb8, img.into_raw())
    }

    pub fn from_gray_image(img: GrayImage) -> Result<Self, FrameError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelFormat::Gray8, img.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Convert to an RGB image suitable for display.
    pub fn to_rgb_image(&self) -> RgbImage {
        let rgb: Vec<u8> = match self.format {
            PixelFormat::Rgb8 => self.data.clone(),
            PixelFormat::Bgr8 => self
                .data
                .chunks_exact(3)
                .flat_map(|px| [px[2], px[1], px[0]])
                .collect(),
            PixelFormat::Gray8 => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
        };
        // Length was validated in `new`, so this cannot fail.
        RgbImage::from_raw(self.width, self.height, rgb)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}
