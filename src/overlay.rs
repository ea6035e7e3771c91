use crate::geometry::PixelBox;
use image::{Rgb, RgbImage, imageops};

/// Draw a rectangle border with given thickness. Parts outside the image are skipped.
pub fn draw_rect(img: &mut RgbImage, bbox: PixelBox, color: Rgb<u8>, thickness: u32) {
    let (w, h) = img.dimensions();
    let Some(bbox) = bbox.clipped(w, h).or_else(|| point_box(bbox, w, h)) else {
        return;
    };
    for t in 0..thickness.max(1) {
        let x0 = bbox.x1.saturating_add(t);
        let y0 = bbox.y1.saturating_add(t);
        let x1 = bbox.x2.saturating_sub(t);
        let y1 = bbox.y2.saturating_sub(t);
        if x0 > x1 || y0 > y1 {
            break;
        }
        for x in x0..=x1 {
            img.put_pixel(x, y0, color);
            img.put_pixel(x, y1, color);
        }
        for y in y0..=y1 {
            img.put_pixel(x0, y, color);
            img.put_pixel(x1, y, color);
        }
    }
}

// A click-sized selection still gets a visible mark.
fn point_box(bbox: PixelBox, w: u32, h: u32) -> Option<PixelBox> {
    (bbox.x1 < w && bbox.y1 < h && bbox.x2 < w && bbox.y2 < h).then(|| {
        PixelBox::new(
            bbox.x1.min(bbox.x2),
            bbox.y1.min(bbox.y2),
            bbox.x1.max(bbox.x2),
            bbox.y1.max(bbox.y2),
        )
    })
}

/// Crop `bbox` out of `img` and scale it to `target_height`, keeping aspect ratio.
pub fn crop_thumbnail(img: &RgbImage, bbox: PixelBox, target_height: u32) -> Option<RgbImage> {
    let (w, h) = img.dimensions();
    let b = bbox.clipped(w, h)?;
    let crop = imageops::crop_imm(img, b.x1, b.y1, b.width(), b.height()).to_image();
    let target_height = target_height.max(1);
    let target_width = ((b.width() as f32 / b.height() as f32) * target_height as f32)
        .round()
        .max(1.0) as u32;
    Some(imageops::resize(
        &crop,
        target_width,
        target_height,
        imageops::FilterType::Triangle,
    ))
}
