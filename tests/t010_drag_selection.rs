// T-010: Drag-to-select on the render surface
// Test: press/move/release with out-of-frame coordinates and scripted prompts
// Expected: corners clamp into the frame, labelled boxes are emitted in fractional space

mod test_helpers;

use frame_review::frame::{FrameBuffer, PixelFormat};
use frame_review::geometry::{FractionalBox, PixelBox};
use frame_review::label::ScriptedPrompt;
use frame_review::player::PlayerPanel;
use frame_review::record::FrameData;
use frame_review::render_surface::{DrawPhase, RenderStyle, RenderSurface};
use std::cell::RefCell;
use std::rc::Rc;
use test_helpers::*;

fn loaded_surface() -> RenderSurface {
    let mut surface = RenderSurface::new(WIDTH, HEIGHT, RenderStyle::default());
    surface.set_frame(&grey_frame(), None);
    surface
}

#[test]
fn press_and_drag_clamp_to_frame() {
    let mut surface = loaded_surface();
    assert!(surface.mouse_press(700.0, 10.0));
    let sel = surface.selection().unwrap();
    assert_eq!(sel.anchor, (639, 10));

    assert!(surface.mouse_move(-5.0, 600.0));
    let sel = surface.selection().unwrap();
    assert_eq!(sel.corner, (0, 539));
    assert_eq!(surface.preview(), Some(PixelBox::new(0, 10, 639, 539)));
}

#[test]
fn every_drag_stays_inside_the_frame() {
    let mut surface = loaded_surface();
    surface.mouse_press(320.0, 270.0);
    let mut x = -2000.0_f32;
    while x < 2000.0 {
        let y = (x * 0.37).sin() * 1500.0;
        surface.mouse_move(x, y);
        let b = surface.preview().unwrap();
        assert!(b.x1 <= b.x2 && b.y1 <= b.y2);
        assert!(b.x2 < WIDTH && b.y2 < HEIGHT);
        x += 37.5;
    }
}

#[test]
fn labelled_release_emits_label_then_box() {
    let mut surface = loaded_surface();
    let order = Rc::new(RefCell::new(Vec::new()));
    let o = order.clone();
    surface.class_name_chosen.connect(move |label| o.borrow_mut().push(format!("label:{label}")));
    let o = order.clone();
    surface.selection_finalized.connect(move |_| o.borrow_mut().push("box".to_string()));

    surface.mouse_press(160.0, 135.0);
    surface.mouse_move(320.0, 270.0);
    let mut prompt = ScriptedPrompt::new([Some("car")]);
    let bbox = surface.mouse_release(&mut prompt).unwrap();

    assert_eq!(bbox, FractionalBox::new(0.25, 0.25, 0.5, 0.5));
    assert_eq!(*order.borrow(), vec!["label:car".to_string(), "box".to_string()]);
    assert_eq!(surface.phase(), DrawPhase::Idle);
    // Shown right away, and kept pending for the next frame.
    assert_eq!(surface.pending_rect(), Some(PixelBox::new(160, 135, 320, 270)));
    assert_eq!(surface.scene().unwrap().get_pixel(160, 135), &image::Rgb([255, 0, 0]));
}

#[test]
fn cancelled_prompt_emits_nothing() {
    let mut surface = loaded_surface();
    let boxes = record(&surface.selection_finalized);
    let labels = record(&surface.class_name_chosen);

    surface.mouse_press(10.0, 10.0);
    surface.mouse_move(100.0, 100.0);
    let mut prompt = ScriptedPrompt::new([None::<&str>]);
    assert!(surface.mouse_release(&mut prompt).is_none());

    assert!(boxes.borrow().is_empty());
    assert!(labels.borrow().is_empty());
    assert!(surface.selection().is_none());
    assert!(!surface.is_drawing());
}

#[test]
fn input_is_ignored_while_the_prompt_is_open() {
    let mut surface = loaded_surface();
    surface.mouse_press(10.0, 10.0);
    surface.mouse_move(50.0, 60.0);
    assert!(surface.begin_release());
    assert_eq!(surface.phase(), DrawPhase::AwaitingLabel);

    assert!(!surface.mouse_press(300.0, 300.0));
    assert!(!surface.mouse_move(400.0, 400.0));
    assert_eq!(surface.preview(), Some(PixelBox::new(10, 10, 50, 60)));

    let bbox = surface.complete_release(Some("dog".to_string())).unwrap();
    assert_eq!(bbox.to_pixel(WIDTH, HEIGHT), PixelBox::new(10, 10, 50, 60));
}

#[test]
fn press_without_a_frame_does_nothing() {
    let mut surface = RenderSurface::new(WIDTH, HEIGHT, RenderStyle::default());
    assert!(!surface.mouse_press(10.0, 10.0));
    assert!(!surface.is_drawing());
}

#[test]
fn frames_arriving_during_the_prompt_wait_for_it() {
    let mut panel = PlayerPanel::new(WIDTH, HEIGHT, RenderStyle::default());
    panel.set_slider_length(5);
    panel.set_data(FrameData::new(grey_frame(), 0));
    let results = record(&panel.run_result);
    let boxes = record(&panel.selection_finalized);

    let surface = panel.surface_mut();
    surface.mouse_press(10.0, 10.0);
    surface.mouse_move(100.0, 100.0);
    assert!(surface.begin_release());

    let small = FrameBuffer::filled(320, 270, PixelFormat::Rgb8, 0).unwrap();
    panel.set_data(FrameData::new(small, 1));
    assert!(panel.has_deferred_frame());
    assert_eq!(panel.surface().frame_size(), Some((WIDTH, HEIGHT)));
    assert_eq!(panel.position(), 0);
    assert!(results.borrow().is_empty());

    panel.complete_release(Some("car".to_string()));

    // The box is measured against the frame it was drawn on.
    assert_eq!(
        *boxes.borrow(),
        vec![PixelBox::new(10, 10, 100, 100).to_fractional(WIDTH, HEIGHT)]
    );

    // Then the held-back frame is shown.
    assert!(!panel.has_deferred_frame());
    assert_eq!(panel.surface().frame_size(), Some((320, 270)));
    assert_eq!(panel.position(), 1);
    assert_eq!(results.borrow().len(), 1);
    assert_eq!(results.borrow()[0].frame_id, 1);
}

#[test]
fn only_the_latest_held_back_frame_is_shown() {
    let mut panel = PlayerPanel::new(WIDTH, HEIGHT, RenderStyle::default());
    panel.set_slider_length(10);
    panel.set_data(FrameData::new(grey_frame(), 0));
    let results = record(&panel.run_result);

    let surface = panel.surface_mut();
    surface.mouse_press(10.0, 10.0);
    surface.mouse_move(50.0, 50.0);
    assert!(surface.begin_release());
    panel.set_data(FrameData::new(grey_frame(), 1));
    panel.set_data(FrameData::new(grey_frame(), 2));
    panel.complete_release(None);

    let ids: Vec<_> = results.borrow().iter().map(|d| d.frame_id).collect();
    assert_eq!(ids, vec![2]);
}
