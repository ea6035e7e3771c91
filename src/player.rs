//! Video player panel: render surface plus playback controls.
//!
//! Playback and direction are two independent toggles driven only by the
//! user. Incoming batches are converted to pixel space for display while the
//! original batch is re-broadcast on `run_result`.

use std::rc::Rc;

use tracing::debug;

use crate::geometry::FractionalBox;
use crate::record::FrameData;
use crate::render_surface::{DrawPhase, RenderStyle, RenderSurface};
use crate::signal::Signal;

pub const BACKWARD_TEXT: &str = "Backward Mode";
pub const FORWARD_TEXT: &str = "Forward Mode";

/// Glyph shown on the play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        }
    }
}

pub struct PlayerPanel {
    surface: RenderSurface,
    playing: bool,
    backward: bool,
    slider_length: usize,
    position: usize,
    /// Latest batch that arrived while the label prompt was open.
    deferred: Option<FrameData>,
    pub play_pause_changed: Rc<Signal<bool>>,
    pub direction_changed: Rc<Signal<bool>>,
    pub run_result: Rc<Signal<FrameData>>,
    pub selection_finalized: Rc<Signal<FractionalBox>>,
    pub class_name_chosen: Rc<Signal<String>>,
    pub slider_length_changed: Rc<Signal<usize>>,
}

impl PlayerPanel {
    pub fn new(width: u32, height: u32, style: RenderStyle) -> Self {
        let surface = RenderSurface::new(width, height, style);
        let selection_finalized = Rc::new(Signal::new());
        let class_name_chosen = Rc::new(Signal::new());
        surface.selection_finalized.forward_to(selection_finalized.clone());
        surface.class_name_chosen.forward_to(class_name_chosen.clone());
        Self {
            surface,
            playing: false,
            backward: false,
            slider_length: 0,
            position: 0,
            deferred: None,
            play_pause_changed: Rc::new(Signal::new()),
            direction_changed: Rc::new(Signal::new()),
            run_result: Rc::new(Signal::new()),
            selection_finalized,
            class_name_chosen,
            slider_length_changed: Rc::new(Signal::new()),
        }
    }

    /// Start in backward mode without emitting `direction_changed`.
    pub fn with_backward(mut self, backward: bool) -> Self {
        self.backward = backward;
        self
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RenderSurface {
        &mut self.surface
    }

    pub fn size_hint(&self) -> (u32, u32) {
        self.surface.size_hint()
    }

    pub fn toggle_play_pause(&mut self) -> bool {
        self.playing = !self.playing;
        debug!(playing = self.playing, "play/pause toggled");
        self.play_pause_changed.emit(&self.playing);
        self.playing
    }

    pub fn toggle_direction(&mut self) -> bool {
        self.backward = !self.backward;
        debug!(backward = self.backward, "direction toggled");
        self.direction_changed.emit(&self.backward);
        self.backward
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_backward(&self) -> bool {
        self.backward
    }

    pub fn play_icon(&self) -> PlayIcon {
        if self.playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        }
    }

    pub fn direction_text(&self) -> &'static str {
        if self.backward {
            BACKWARD_TEXT
        } else {
            FORWARD_TEXT
        }
    }

    /// Show a batch: the surface gets a pixel-space copy, listeners of
    /// `run_result` get the batch as it arrived.
    ///
    /// While the surface waits for a label the batch is held back, replacing
    /// any batch held before it, and shown once the prompt is answered.
    pub fn set_data(&mut self, data: FrameData) {
        if self.surface.phase() == DrawPhase::AwaitingLabel {
            debug!(frame = data.frame_id, "label prompt open, frame held back");
            self.deferred = Some(data);
            return;
        }
        let pixel = data.to_pixel_space();
        self.surface.set_data(&pixel);
        self.position = self.clamp_position(data.frame_id);
        self.run_result.emit(&data);
    }

    /// Finish a release started on the surface, then show any held-back batch.
    pub fn complete_release(&mut self, label: Option<String>) -> Option<FractionalBox> {
        let finalized = self.surface.complete_release(label);
        if let Some(data) = self.deferred.take() {
            self.set_data(data);
        }
        finalized
    }

    pub fn has_deferred_frame(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn set_slider_length(&mut self, length: usize) {
        self.slider_length = length;
        self.position = self.clamp_position(self.position);
        self.slider_length_changed.emit(&length);
    }

    pub fn slider_length(&self) -> usize {
        self.slider_length
    }

    /// Move the slider; returns the position actually taken.
    pub fn set_position(&mut self, index: usize) -> usize {
        self.position = self.clamp_position(index);
        self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn clamp_position(&self, index: usize) -> usize {
        if self.slider_length == 0 {
            index
        } else {
            index.min(self.slider_length - 1)
        }
    }

    pub fn frames_label(&self) -> String {
        format!("{} / {}", self.position, self.slider_length.saturating_sub(1))
    }

    /// Frame that playback should show next, or `None` at the end of travel.
    pub fn next_index(&self) -> Option<usize> {
        if self.backward {
            self.position.checked_sub(1)
        } else if self.position + 1 < self.slider_length {
            Some(self.position + 1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn panel() -> PlayerPanel {
        PlayerPanel::new(640, 540, RenderStyle::default())
    }

    #[test]
    fn direction_toggle_updates_text_and_emits() {
        let mut p = panel();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        p.direction_changed.connect(move |b| s.borrow_mut().push(*b));
        assert_eq!(p.direction_text(), FORWARD_TEXT);
        p.toggle_direction();
        assert_eq!(p.direction_text(), BACKWARD_TEXT);
        p.toggle_direction();
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn toggles_are_independent() {
        let mut p = panel().with_backward(true);
        p.toggle_play_pause();
        assert!(p.is_playing());
        assert!(p.is_backward());
    }

    #[test]
    fn next_index_respects_direction_and_bounds() {
        let mut p = panel();
        p.set_slider_length(3);
        p.set_position(2);
        assert_eq!(p.next_index(), None);
        p.toggle_direction();
        assert_eq!(p.next_index(), Some(1));
        p.set_position(0);
        assert_eq!(p.next_index(), None);
    }

    #[test]
    fn position_is_clamped_to_slider() {
        let mut p = panel();
        p.set_slider_length(10);
        assert_eq!(p.set_position(42), 9);
        assert_eq!(p.frames_label(), "9 / 9");
        p.set_slider_length(4);
        assert_eq!(p.position(), 3);
    }
}
