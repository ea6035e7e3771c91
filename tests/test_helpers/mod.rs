// Test helper functions for building frames, batches and signal recorders
#![allow(dead_code)]

use frame_review::frame::{FrameBuffer, PixelFormat};
use frame_review::geometry::FractionalBox;
use frame_review::record::{FrameData, FrameRecord};
use frame_review::render_surface::RenderStyle;
use frame_review::signal::Signal;
use std::cell::RefCell;
use std::rc::Rc;

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 540;

/// Plain grey RGB frame of the standard test size
pub fn grey_frame() -> FrameBuffer {
    FrameBuffer::filled(WIDTH, HEIGHT, PixelFormat::Rgb8, 90).unwrap()
}

/// Batch for `frame_id` with one fractional record per `(class, box)` pair
pub fn batch(frame_id: usize, boxes: &[(&str, (f64, f64, f64, f64))]) -> FrameData {
    let records = boxes
        .iter()
        .enumerate()
        .map(|(i, (class, (x1, y1, x2, y2)))| {
            FrameRecord::fractional(frame_id, FractionalBox::new(*x1, *y1, *x2, *y2), *class, i as u64)
        })
        .collect();
    FrameData::new(grey_frame(), frame_id).with_records(records)
}

/// Style with a distinct colour for "car"
pub fn style_with_car() -> RenderStyle {
    RenderStyle {
        class_colors: vec![("car".to_string(), image::Rgb([0, 255, 0]))],
        ..RenderStyle::default()
    }
}

/// Collect every value emitted on `signal`
pub fn record<T: Clone + 'static>(signal: &Signal<T>) -> Rc<RefCell<Vec<T>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    signal.connect(move |v: &T| sink.borrow_mut().push(v.clone()));
    seen
}
