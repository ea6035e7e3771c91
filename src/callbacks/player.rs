//! Player control callbacks: play/pause, direction, slider seek, and the
//! playback timer.

use crate::callbacks::render::SurfaceView;
use crate::player::PlayerPanel;
use crate::render_surface::DrawPhase;
use crate::source::FrameSource;
use crate::AppWindow;
use slint::{ComponentHandle, Timer, TimerMode};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};

/// Type alias for the frame loader closure
pub type FrameLoader = Rc<dyn Fn(usize)>;

/// Build the shared loader that pulls frame `index` from `source` into the panel.
pub fn make_frame_loader(
    ui: &AppWindow,
    panel: Rc<RefCell<PlayerPanel>>,
    view: Rc<SurfaceView>,
    source: Rc<RefCell<Box<dyn FrameSource>>>,
) -> FrameLoader {
    let ui_weak = ui.as_weak();
    Rc::new(move |index: usize| {
        let loaded = source.borrow_mut().load(index);
        let Some(ui) = ui_weak.upgrade() else { return };
        match loaded {
            Ok(data) => {
                panel.borrow_mut().set_data(data);
                let panel = panel.borrow();
                view.sync(&ui, panel.surface());
                sync_controls(&ui, &panel);
            }
            Err(e) => {
                warn!("failed to load frame {index}: {e}");
                ui.set_status_text(format!("Frame {index}: {e}").into());
            }
        }
    })
}

/// Push the panel's control state into the window.
pub fn sync_controls(ui: &AppWindow, panel: &PlayerPanel) {
    ui.set_frames_label(panel.frames_label().into());
    ui.set_slider_maximum(panel.slider_length().saturating_sub(1) as i32);
    ui.set_slider_value(panel.position() as f32);
    ui.set_play_glyph(panel.play_icon().glyph().into());
    ui.set_direction_text(panel.direction_text().into());
}

/// Sets up all player-control callbacks on the UI.
pub fn setup_player_callbacks(
    ui: &AppWindow,
    panel: Rc<RefCell<PlayerPanel>>,
    loader: FrameLoader,
    frame_interval: Duration,
) -> Rc<Timer> {
    let timer = Rc::new(Timer::default());
    setup_playback_timer(ui, panel.clone(), loader.clone(), timer.clone(), frame_interval);
    setup_toggle_play(ui, panel.clone());
    setup_toggle_direction(ui, panel.clone());
    setup_seek(ui, panel, loader);
    timer
}

fn setup_playback_timer(
    ui: &AppWindow,
    panel: Rc<RefCell<PlayerPanel>>,
    loader: FrameLoader,
    timer: Rc<Timer>,
    frame_interval: Duration,
) {
    let ui_weak = ui.as_weak();
    let panel_weak = Rc::downgrade(&panel);
    let play_pause = panel.borrow().play_pause_changed.clone();
    play_pause.connect(move |playing| {
        if !*playing {
            timer.stop();
            return;
        }
        let panel_weak = panel_weak.clone();
        let loader = loader.clone();
        let ui_weak = ui_weak.clone();
        timer.start(TimerMode::Repeated, frame_interval, move || {
            let Some(panel) = panel_weak.upgrade() else { return };
            // Hold playback while the label prompt is open.
            if panel.borrow().surface().phase() == DrawPhase::AwaitingLabel {
                return;
            }
            let next = panel.borrow().next_index();
            match next {
                Some(index) => loader(index),
                None => {
                    // End of travel in the current direction: pause.
                    debug!("playback reached the end, pausing");
                    panel.borrow_mut().toggle_play_pause();
                    if let Some(ui) = ui_weak.upgrade() {
                        sync_controls(&ui, &panel.borrow());
                    }
                }
            }
        });
    });
}

fn setup_toggle_play(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>) {
    let ui_weak = ui.as_weak();
    ui.on_toggle_play(move || {
        panel.borrow_mut().toggle_play_pause();
        if let Some(ui) = ui_weak.upgrade() {
            sync_controls(&ui, &panel.borrow());
        }
    });
}

fn setup_toggle_direction(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>) {
    let ui_weak = ui.as_weak();
    ui.on_toggle_direction(move || {
        panel.borrow_mut().toggle_direction();
        if let Some(ui) = ui_weak.upgrade() {
            sync_controls(&ui, &panel.borrow());
        }
    });
}

fn setup_seek(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>, loader: FrameLoader) {
    ui.on_seek(move |value| {
        let index = value.max(0.0).round() as usize;
        let target = {
            let mut panel = panel.borrow_mut();
            if index == panel.position() {
                return;
            }
            panel.set_position(index)
        };
        loader(target);
    });
}
