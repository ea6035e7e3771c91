//! Render surface callbacks: drag-to-select and the class label prompt.
//!
//! Handles: press, drag, release, label_submitted, label_cancelled

use crate::callbacks::player::sync_controls;
use crate::player::PlayerPanel;
use crate::render_surface::RenderSurface;
use crate::utils::to_slint_image;
use crate::AppWindow;
use slint::ComponentHandle;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Mirrors the surface's scene and drag preview into window properties.
pub struct SurfaceView {
    last_revision: Cell<Option<u64>>,
    dirty: Rc<Cell<bool>>,
}

impl SurfaceView {
    pub fn new(surface: &RenderSurface) -> Rc<Self> {
        let dirty = Rc::new(Cell::new(true));
        let flag = dirty.clone();
        surface.repainted.connect(move |_| flag.set(true));
        Rc::new(Self {
            last_revision: Cell::new(None),
            dirty,
        })
    }

    pub fn sync(&self, ui: &AppWindow, surface: &RenderSurface) {
        if !self.dirty.replace(false) {
            return;
        }

        // Only copy pixels when the scene itself changed, not on every drag step.
        let revision = surface.scene_revision();
        if self.last_revision.get() != Some(revision) {
            if let Some(scene) = surface.scene() {
                ui.set_frame(to_slint_image(scene));
                ui.set_frame_width(scene.width() as i32);
                ui.set_frame_height(scene.height() as i32);
            }
            self.last_revision.set(Some(revision));
        }

        match surface.preview() {
            Some(b) => {
                ui.set_show_preview(true);
                ui.set_preview_x(b.x1 as f32);
                ui.set_preview_y(b.y1 as f32);
                ui.set_preview_width(b.width() as f32);
                ui.set_preview_height(b.height() as f32);
            }
            None => ui.set_show_preview(false),
        }
    }
}

/// Sets up all render-surface callbacks on the UI.
pub fn setup_render_callbacks(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>, view: Rc<SurfaceView>) {
    setup_press(ui, panel.clone(), view.clone());
    setup_drag(ui, panel.clone(), view.clone());
    setup_release(ui, panel.clone(), view.clone());
    setup_label_submitted(ui, panel.clone(), view.clone());
    setup_label_cancelled(ui, panel, view);
}

fn setup_press(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>, view: Rc<SurfaceView>) {
    let ui_weak = ui.as_weak();
    ui.on_press(move |x, y| {
        panel.borrow_mut().surface_mut().mouse_press(x, y);
        if let Some(ui) = ui_weak.upgrade() {
            view.sync(&ui, panel.borrow().surface());
        }
    });
}

fn setup_drag(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>, view: Rc<SurfaceView>) {
    let ui_weak = ui.as_weak();
    ui.on_drag(move |x, y| {
        if !panel.borrow_mut().surface_mut().mouse_move(x, y) {
            return;
        }
        if let Some(ui) = ui_weak.upgrade() {
            view.sync(&ui, panel.borrow().surface());
        }
    });
}

fn setup_release(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>, view: Rc<SurfaceView>) {
    let ui_weak = ui.as_weak();
    // The surface stays frozen in its awaiting-label phase until the prompt answers.
    ui.on_release(move || {
        let needs_label = panel.borrow_mut().surface_mut().begin_release();
        if let Some(ui) = ui_weak.upgrade() {
            ui.set_prompt_open(needs_label);
            view.sync(&ui, panel.borrow().surface());
        }
    });
}

fn setup_label_submitted(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>, view: Rc<SurfaceView>) {
    let ui_weak = ui.as_weak();
    ui.on_label_submitted(move |text| {
        if let Some(ui) = ui_weak.upgrade() {
            ui.set_prompt_open(false);
        }
        // Listeners of the surface's signals run inside this borrow; a frame
        // held back during the prompt is shown right after them.
        panel.borrow_mut().complete_release(Some(text.to_string()));
        if let Some(ui) = ui_weak.upgrade() {
            let panel = panel.borrow();
            view.sync(&ui, panel.surface());
            sync_controls(&ui, &panel);
        }
    });
}

fn setup_label_cancelled(ui: &AppWindow, panel: Rc<RefCell<PlayerPanel>>, view: Rc<SurfaceView>) {
    let ui_weak = ui.as_weak();
    ui.on_label_cancelled(move || {
        panel.borrow_mut().complete_release(None);
        if let Some(ui) = ui_weak.upgrade() {
            ui.set_prompt_open(false);
            ui.set_status_text("Selection discarded".into());
            let panel = panel.borrow();
            view.sync(&ui, panel.surface());
            sync_controls(&ui, &panel);
        }
    });
}
