//! Frame rendering and mouse-driven bounding-box selection.
//!
//! The surface owns a copy of the current frame, the boxes drawn over it,
//! and the in-progress drag. A drag runs press → move* → release; release
//! asks a [`LabelPrompt`] for a class name and, if one is given, emits the
//! box in fractional coordinates.

use std::rc::Rc;

use image::{Rgb, RgbImage};
use tracing::{debug, info};

use crate::frame::FrameBuffer;
use crate::geometry::{FractionalBox, PixelBox, SelectionRect};
use crate::label::{ClassLabelQueue, LabelPrompt};
use crate::overlay::draw_rect;
use crate::record::FrameData;
use crate::signal::Signal;

#[derive(Debug, Clone)]
pub struct RenderStyle {
    /// Colour for explicitly requested rects and finalized selections.
    pub emphasis: Rgb<u8>,
    /// Colour for the in-progress drag.
    pub selection: Rgb<u8>,
    pub line_thickness: u32,
    /// Drags narrower or shorter than this are dropped without prompting.
    pub min_selection_px: u32,
    /// Per-class colours for record overlays; unknown classes use `emphasis`.
    pub class_colors: Vec<(String, Rgb<u8>)>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            emphasis: Rgb([255, 0, 0]),
            selection: Rgb([10, 10, 100]),
            line_thickness: 2,
            min_selection_px: 1,
            class_colors: Vec::new(),
        }
    }
}

impl RenderStyle {
    fn color_for(&self, class: &str) -> Rgb<u8> {
        self.class_colors
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, c)| *c)
            .unwrap_or(self.emphasis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    Idle,
    Drawing,
    /// Selection is frozen while the label prompt is open; input is ignored.
    AwaitingLabel,
}

pub struct RenderSurface {
    width: u32,
    height: u32,
    style: RenderStyle,
    frame: Option<RgbImage>,
    overlays: Vec<(PixelBox, Rgb<u8>)>,
    scene: Option<RgbImage>,
    scene_revision: u64,
    pending_rect: Option<PixelBox>,
    selection: Option<SelectionRect>,
    phase: DrawPhase,
    labels: ClassLabelQueue,
    pub selection_finalized: Rc<Signal<FractionalBox>>,
    pub class_name_chosen: Rc<Signal<String>>,
    pub repainted: Rc<Signal<()>>,
}

impl RenderSurface {
    pub fn new(width: u32, height: u32, style: RenderStyle) -> Self {
        Self {
            width,
            height,
            style,
            frame: None,
            overlays: Vec::new(),
            scene: None,
            scene_revision: 0,
            pending_rect: None,
            selection: None,
            phase: DrawPhase::Idle,
            labels: ClassLabelQueue::new(),
            selection_finalized: Rc::new(Signal::new()),
            class_name_chosen: Rc::new(Signal::new()),
            repainted: Rc::new(Signal::new()),
        }
    }

    pub fn size_hint(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Dimensions of the loaded frame, if any.
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.frame.as_ref().map(|f| f.dimensions())
    }

    pub fn set_frame(&mut self, buffer: &FrameBuffer, rect: Option<PixelBox>) {
        let overlays = match rect {
            Some(rect) => vec![(rect, self.style.emphasis)],
            None => Vec::new(),
        };
        self.replace_frame(buffer, overlays, rect.is_none());
    }

    /// Show a pixel-space batch: the frame plus every record's box.
    pub fn set_data(&mut self, data: &FrameData) {
        let (w, h) = data.frame.dimensions();
        let overlays = data
            .records
            .iter()
            .map(|r| (r.pixel_box(w, h), self.style.color_for(&r.object_class)))
            .collect();
        self.replace_frame(&data.frame, overlays, true);
    }

    fn replace_frame(&mut self, buffer: &FrameBuffer, mut overlays: Vec<(PixelBox, Rgb<u8>)>, use_pending: bool) {
        if use_pending {
            if let Some(pending) = self.pending_rect.take() {
                overlays.push((pending, self.style.emphasis));
            }
        }
        self.frame = Some(buffer.to_rgb_image());
        self.overlays = overlays;
        self.rebuild_scene();
    }

    // Scene is rebuilt from scratch so old overlays never accumulate.
    fn rebuild_scene(&mut self) {
        let Some(frame) = self.frame.as_ref() else {
            return;
        };
        let mut scene = frame.clone();
        for (rect, color) in &self.overlays {
            draw_rect(&mut scene, *rect, *color, self.style.line_thickness);
        }
        self.scene = Some(scene);
        self.scene_revision += 1;
        self.repainted.emit(&());
    }

    /// Redraw the current frame without the drag preview. A pending rect is
    /// shown here too but stays pending until the next frame is set.
    fn rerender(&mut self) {
        if let (Some(pending), Some(scene)) = (self.pending_rect, self.scene.as_mut()) {
            draw_rect(scene, pending, self.style.emphasis, self.style.line_thickness);
            self.scene_revision += 1;
        }
        self.repainted.emit(&());
    }

    pub fn mouse_press(&mut self, x: f32, y: f32) -> bool {
        if self.phase == DrawPhase::AwaitingLabel {
            return false;
        }
        let Some((w, h)) = self.frame_size() else {
            debug!("press ignored: no frame loaded");
            return false;
        };
        self.selection = Some(SelectionRect::start(x, y, w, h));
        self.phase = DrawPhase::Drawing;
        self.repainted.emit(&());
        true
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) -> bool {
        if self.phase != DrawPhase::Drawing {
            return false;
        }
        let Some(sel) = self.selection.as_mut() else {
            return false;
        };
        sel.drag_to(x, y);
        self.repainted.emit(&());
        true
    }

    /// Finish a drag, blocking on `prompt` for the class label.
    pub fn mouse_release(&mut self, prompt: &mut dyn LabelPrompt) -> Option<FractionalBox> {
        if !self.begin_release() {
            return None;
        }
        prompt.prompt(&mut self.labels);
        self.complete_release(None)
    }

    /// First half of a release. Returns `true` when a label prompt must be shown,
    /// after which input is ignored until [`complete_release`](Self::complete_release).
    pub fn begin_release(&mut self) -> bool {
        if self.phase != DrawPhase::Drawing {
            return false;
        }
        let Some(bbox) = self.selection.map(|s| s.normalized()) else {
            self.phase = DrawPhase::Idle;
            return false;
        };
        let min = self.style.min_selection_px.max(1);
        if bbox.width() < min || bbox.height() < min {
            debug!(?bbox, "selection too small, discarded");
            self.selection = None;
            self.phase = DrawPhase::Idle;
            self.repainted.emit(&());
            return false;
        }
        self.phase = DrawPhase::AwaitingLabel;
        true
    }

    /// Second half of a release. `label` is what the prompt produced, if anything.
    pub fn complete_release(&mut self, label: Option<String>) -> Option<FractionalBox> {
        if self.phase != DrawPhase::AwaitingLabel {
            return None;
        }
        if let Some(label) = label {
            self.labels.push(label);
        }
        let selection = self.selection.take();
        self.phase = DrawPhase::Idle;

        let mut finalized = None;
        if let Some(selection) = selection {
            if let Some(label) = self.labels.pop() {
                let bbox = selection.normalized();
                let fractional = selection.to_fractional();
                info!(class = %label, ?bbox, "selection finalized");
                self.class_name_chosen.emit(&label);
                self.selection_finalized.emit(&fractional);
                self.pending_rect = Some(bbox);
                finalized = Some(fractional);
            } else {
                debug!("label prompt cancelled, selection discarded");
            }
        }
        self.rerender();
        finalized
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        self.phase == DrawPhase::Drawing
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.selection
    }

    /// The in-progress box to draw over the scene, while a drag is live.
    pub fn preview(&self) -> Option<PixelBox> {
        match self.phase {
            DrawPhase::Idle => None,
            _ => self.selection.map(|s| s.normalized()),
        }
    }

    pub fn pending_rect(&self) -> Option<PixelBox> {
        self.pending_rect
    }

    pub fn labels_mut(&mut self) -> &mut ClassLabelQueue {
        &mut self.labels
    }

    /// Frame with its overlays, without the in-progress drag.
    pub fn scene(&self) -> Option<&RgbImage> {
        self.scene.as_ref()
    }

    /// Bumped whenever [`scene`](Self::scene) is rebuilt.
    pub fn scene_revision(&self) -> u64 {
        self.scene_revision
    }

    /// Scene with the in-progress drag drawn on top.
    pub fn display_image(&self) -> Option<RgbImage> {
        let mut img = self.scene.clone()?;
        if let Some(preview) = self.preview() {
            draw_rect(&mut img, preview, self.style.selection, 1);
        }
        Some(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;
    use crate::label::ScriptedPrompt;
    use std::cell::RefCell;

    fn surface_with_frame(w: u32, h: u32) -> RenderSurface {
        let mut s = RenderSurface::new(w, h, RenderStyle::default());
        s.set_frame(&FrameBuffer::filled(w, h, PixelFormat::Rgb8, 0).unwrap(), None);
        s
    }

    #[test]
    fn press_without_frame_is_ignored() {
        let mut s = RenderSurface::new(10, 10, RenderStyle::default());
        assert!(!s.mouse_press(1.0, 1.0));
        assert_eq!(s.phase(), DrawPhase::Idle);
    }

    #[test]
    fn move_outside_drag_is_ignored() {
        let mut s = surface_with_frame(20, 20);
        assert!(!s.mouse_move(5.0, 5.0));
        assert!(s.selection().is_none());
    }

    #[test]
    fn finalized_selection_is_drawn_on_current_frame() {
        let mut s = surface_with_frame(50, 50);
        s.mouse_press(5.0, 5.0);
        s.mouse_move(20.0, 20.0);
        s.mouse_release(&mut ScriptedPrompt::new([Some("car")]));
        assert_eq!(s.pending_rect(), Some(PixelBox::new(5, 5, 20, 20)));
        let scene = s.scene().unwrap();
        assert_eq!(*scene.get_pixel(5, 10), RenderStyle::default().emphasis);
    }

    #[test]
    fn pending_rect_is_drawn_on_next_frame_only() {
        let mut s = surface_with_frame(50, 50);
        let next = FrameBuffer::filled(50, 50, PixelFormat::Rgb8, 0).unwrap();
        s.mouse_press(5.0, 5.0);
        s.mouse_move(20.0, 20.0);
        s.mouse_release(&mut ScriptedPrompt::new([Some("car")]));

        s.set_frame(&next, None);
        assert_eq!(s.pending_rect(), None);
        assert_eq!(*s.scene().unwrap().get_pixel(5, 10), RenderStyle::default().emphasis);

        s.set_frame(&next, None);
        assert_eq!(s.scene().unwrap().get_pixel(5, 10).0, [0, 0, 0]);
    }

    #[test]
    fn explicit_rect_leaves_pending_for_later() {
        let mut s = surface_with_frame(50, 50);
        let next = FrameBuffer::filled(50, 50, PixelFormat::Rgb8, 0).unwrap();
        s.mouse_press(5.0, 5.0);
        s.mouse_move(20.0, 20.0);
        s.mouse_release(&mut ScriptedPrompt::new([Some("car")]));

        s.set_frame(&next, Some(PixelBox::new(30, 30, 40, 40)));
        assert_eq!(s.scene().unwrap().get_pixel(5, 10).0, [0, 0, 0]);
        assert!(s.pending_rect().is_some());
    }

    #[test]
    fn scene_is_replaced_not_accumulated() {
        let mut s = surface_with_frame(30, 30);
        let frame = FrameBuffer::filled(30, 30, PixelFormat::Rgb8, 0).unwrap();
        s.set_frame(&frame, Some(PixelBox::new(1, 1, 10, 10)));
        s.set_frame(&frame, Some(PixelBox::new(15, 15, 25, 25)));
        let scene = s.scene().unwrap();
        assert_eq!(scene.get_pixel(1, 5).0, [0, 0, 0]);
        assert_eq!(*scene.get_pixel(15, 20), RenderStyle::default().emphasis);
    }

    #[test]
    fn awaiting_label_blocks_new_press() {
        let mut s = surface_with_frame(40, 40);
        s.mouse_press(2.0, 2.0);
        s.mouse_move(30.0, 30.0);
        assert!(s.begin_release());
        assert!(!s.mouse_press(10.0, 10.0));
        assert!(!s.mouse_move(1.0, 1.0));
        let out = s.complete_release(Some("dog".into())).unwrap();
        assert_eq!(out, PixelBox::new(2, 2, 30, 30).to_fractional(40, 40));
        assert_eq!(s.phase(), DrawPhase::Idle);
    }

    #[test]
    fn click_without_drag_never_prompts() {
        let mut s = surface_with_frame(40, 40);
        let prompted = Rc::new(RefCell::new(false));
        let p = prompted.clone();
        let mut prompt = move |_: &mut ClassLabelQueue| *p.borrow_mut() = true;
        s.mouse_press(3.0, 3.0);
        assert_eq!(s.mouse_release(&mut prompt), None);
        assert!(!*prompted.borrow());
    }

    #[test]
    fn queued_label_is_consumed_first() {
        let mut s = surface_with_frame(40, 40);
        s.labels_mut().push("queued");
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let c = chosen.clone();
        s.class_name_chosen.connect(move |l| c.borrow_mut().push(l.clone()));
        s.mouse_press(0.0, 0.0);
        s.mouse_move(10.0, 10.0);
        s.mouse_release(&mut ScriptedPrompt::new([Some("typed")]));
        assert_eq!(*chosen.borrow(), vec!["queued".to_string()]);
        assert_eq!(s.labels_mut().front(), Some("typed"));
    }

    #[test]
    fn set_data_uses_class_colours() {
        use crate::record::FrameRecord;
        let style = RenderStyle {
            class_colors: vec![("car".into(), Rgb([0, 255, 0]))],
            ..RenderStyle::default()
        };
        let mut s = RenderSurface::new(20, 20, style);
        let frame = FrameBuffer::filled(20, 20, PixelFormat::Rgb8, 0).unwrap();
        let data = FrameData::new(frame, 0)
            .with_records(vec![FrameRecord::pixel(0, PixelBox::new(2, 2, 10, 10), "car", 1)]);
        s.set_data(&data);
        assert_eq!(s.scene().unwrap().get_pixel(2, 6).0, [0, 255, 0]);
    }

    #[test]
    fn display_image_includes_preview() {
        let mut s = surface_with_frame(20, 20);
        s.mouse_press(1.0, 1.0);
        s.mouse_move(12.0, 12.0);
        let img = s.display_image().unwrap();
        assert_eq!(*img.get_pixel(1, 5), RenderStyle::default().selection);
        assert_eq!(s.scene().unwrap().get_pixel(1, 5).0, [0, 0, 0]);
    }
}
