//! Small conversions between image buffers, colours, and Slint types.

use image::RgbImage;
use slint::{Rgb8Pixel, SharedPixelBuffer};

/// Create a placeholder checkerboard image for when no frame is loaded
pub fn placeholder_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width.max(1), height.max(1), |x, y| {
        let v = if (x / 8 + y / 8) % 2 == 0 { 60 } else { 110 };
        image::Rgb([v, v, v])
    })
}

/// Copy an RGB image into a Slint image.
pub fn to_slint_image(img: &RgbImage) -> slint::Image {
    let buffer = SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(img.as_raw(), img.width(), img.height());
    slint::Image::from_rgb8(buffer)
}

/// Parse a hex color string (e.g., "#ff0000") to RGB bytes
pub fn parse_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some([r, g, b])
    } else {
        None
    }
}

pub fn to_slint_color([r, g, b]: [u8; 3]) -> slint::Color {
    slint::Color::from_rgb_u8(r, g, b)
}
