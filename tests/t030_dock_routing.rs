// T-030: Routing batches from a frame source through the panel into the dock
// Test: register class strips, play synthetic frames, activate a thumbnail
// Expected: thumbnails land in their class row, unknown classes are rejected

mod test_helpers;

use frame_review::dock::{SubViewer, ThumbnailDock, ThumbnailStrip};
use frame_review::error::DockError;
use frame_review::player::PlayerPanel;
use frame_review::render_surface::RenderStyle;
use frame_review::source::{FrameSource, SyntheticClip};
use std::cell::RefCell;
use std::rc::Rc;
use test_helpers::*;

fn dock_with(classes: &[&str]) -> ThumbnailDock {
    let mut dock = ThumbnailDock::new("Images Viewers Dock");
    for class in classes {
        dock.register_sub_viewer(*class, Box::new(ThumbnailStrip::new(*class, 32, 16)));
    }
    dock
}

#[test]
fn records_go_to_their_class_row() {
    let mut dock = dock_with(&["car", "person"]);
    let data = batch(
        3,
        &[
            ("car", (0.1, 0.1, 0.3, 0.3)),
            ("person", (0.5, 0.5, 0.6, 0.9)),
            ("car", (0.6, 0.1, 0.9, 0.4)),
        ],
    );
    assert_eq!(dock.add_batch(&data).unwrap(), 3);
    assert_eq!(dock.sub_viewer("car").unwrap().thumbnail_count(), 2);
    assert_eq!(dock.sub_viewer("person").unwrap().thumbnail_count(), 1);
}

#[test]
fn unregistered_class_is_an_error() {
    let mut dock = dock_with(&["car"]);
    let data = batch(0, &[("zebra", (0.1, 0.1, 0.2, 0.2))]);
    let err = dock.add_record(&data.records[0], &data.frame).unwrap_err();
    assert_eq!(err, DockError::UnregisteredClass("zebra".to_string()));
    assert_eq!(err.to_string(), "no sub-viewer registered for class \"zebra\"");
}

#[test]
fn re_registering_replaces_the_row() {
    let mut dock = dock_with(&["car", "dog"]);
    let data = batch(0, &[("car", (0.1, 0.1, 0.2, 0.2))]);
    dock.add_batch(&data).unwrap();

    let old = dock.register_sub_viewer("car", Box::new(ThumbnailStrip::new("car", 32, 16)));
    assert_eq!(old.unwrap().thumbnail_count(), 1);
    assert_eq!(dock.class_keys().collect::<Vec<_>>(), vec!["dog", "car"]);
    assert_eq!(dock.sub_viewer("car").unwrap().thumbnail_count(), 0);
}

#[test]
fn synthetic_playback_fills_the_dock() {
    let mut clip = SyntheticClip::new(WIDTH, HEIGHT, 5);
    let dock = Rc::new(RefCell::new(dock_with(&["car"])));
    let mut panel = PlayerPanel::new(WIDTH, HEIGHT, RenderStyle::default());
    panel.set_slider_length(clip.len());

    let sink = dock.clone();
    panel.run_result.connect(move |data| {
        sink.borrow_mut().add_batch(data).unwrap();
    });

    let mut index = Some(0);
    while let Some(i) = index {
        panel.set_data(clip.load(i).unwrap());
        index = panel.next_index();
    }

    assert_eq!(panel.position(), 4);
    assert_eq!(dock.borrow().sub_viewer("car").unwrap().thumbnail_count(), 5);
}

#[test]
fn thumbnail_activation_requests_a_jump() {
    let dock = dock_with(&["car"]);
    let jumps = record(&dock.jump_to_frame);
    dock.request_jump(12);
    assert_eq!(*jumps.borrow(), vec![12]);
}
