use clap::Parser;
use frame_review::callbacks::dock::{feed_batch, register_class_row, setup_dock_callbacks};
use frame_review::callbacks::player::{make_frame_loader, setup_player_callbacks, sync_controls};
use frame_review::callbacks::render::{setup_render_callbacks, SurfaceView};
use frame_review::classes::{load_classes_with_source, remember_class, user_classes_path};
use frame_review::cli::AppArgs;
use frame_review::config::{load_config, load_config_from};
use frame_review::dock::ThumbnailDock;
use frame_review::error::DockError;
use frame_review::player::PlayerPanel;
use frame_review::record::{FrameData, FrameRecord};
use frame_review::source::{FrameSource, ImageSequence, SyntheticClip};
use frame_review::utils::{placeholder_image, to_slint_color, to_slint_image};
use frame_review::{telemetry, AppWindow, DockRow};
use slint::ComponentHandle;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{info, warn};

// Manual selections get track ids from here up, clear of source tracks.
const MANUAL_TRACK_BASE: u64 = 1_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = AppArgs::parse();
    telemetry::init(&args.log);

    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    let class_file = args.classes.clone().or_else(|| config.classes.config_file.clone());
    let (classes, class_source) = load_classes_with_source(class_file.as_deref());
    // Classes typed at the prompt are added to the catalog they came from.
    let class_target = class_source.or_else(user_classes_path);

    let source: Box<dyn FrameSource> = match &args.frames {
        Some(dir) => Box::new(ImageSequence::open(dir)?),
        None => Box::new(SyntheticClip::new(config.player.width, config.player.height, args.synthetic)),
    };
    info!("playing {}", source.describe());
    let frame_count = source.len();
    let source = Rc::new(RefCell::new(source));

    let ui = AppWindow::new()?;
    ui.set_view_width(config.player.width as f32);
    ui.set_view_height(config.player.height as f32);
    ui.set_frame(to_slint_image(&placeholder_image(64, 64)));
    ui.set_frame_width(64);
    ui.set_frame_height(64);

    let style = config.render.to_style(&classes);
    let [r, g, b] = style.selection.0;
    ui.set_selection_color(to_slint_color(style.selection.0));
    ui.set_selection_fill(slint::Color::from_argb_u8(120, r, g, b));
    ui.set_prompt_hint(classes.names().collect::<Vec<_>>().join(", ").into());

    let panel = Rc::new(RefCell::new(
        PlayerPanel::new(config.player.width, config.player.height, style).with_backward(config.player.start_backward),
    ));
    panel.borrow_mut().set_slider_length(frame_count);
    let view = SurfaceView::new(panel.borrow().surface());

    // Dock with one row per known class.
    let dock = Rc::new(RefCell::new(ThumbnailDock::new(config.dock.window_title.clone())));
    let dock_rows = Rc::new(slint::VecModel::<DockRow>::default());
    ui.set_dock_title(config.dock.window_title.clone().into());
    ui.set_dock_rows(dock_rows.clone().into());
    ui.set_thumb_size(config.dock.thumbnail_height as f32);
    for class in &classes.classes {
        register_class_row(&dock, &dock_rows, &class.name, class.color.as_deref(), &config.dock);
    }
    let classes = Rc::new(RefCell::new(classes));

    // Latest batch as it left the player, used to attach manual selections to a frame.
    let current: Rc<RefCell<Option<FrameData>>> = Rc::new(RefCell::new(None));
    {
        let current = current.clone();
        let dock = dock.clone();
        panel.borrow().run_result.connect(move |data| {
            feed_batch(&dock, data);
            *current.borrow_mut() = Some(data.clone());
        });
    }

    // The label arrives just before its box.
    let chosen_label: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    {
        let chosen_label = chosen_label.clone();
        panel
            .borrow()
            .class_name_chosen
            .connect(move |label| *chosen_label.borrow_mut() = Some(label.clone()));
    }
    {
        let ui_weak = ui.as_weak();
        let current = current.clone();
        let dock = dock.clone();
        let dock_rows = dock_rows.clone();
        let dock_config = config.dock.clone();
        let classes = classes.clone();
        let next_track = Cell::new(MANUAL_TRACK_BASE);
        panel.borrow().selection_finalized.connect(move |bbox| {
            let Some(label) = chosen_label.borrow_mut().take() else { return };
            let current = current.borrow();
            let Some(data) = current.as_ref() else { return };

            let record = FrameRecord::fractional(data.frame_id, *bbox, label.clone(), next_track.get())
                .with_tag("manual");
            next_track.set(next_track.get() + 1);
            info!(
                frame = data.frame_id,
                class = %label,
                bbox = ?bbox.as_tuple(),
                "manual annotation"
            );

            let result = dock.borrow_mut().add_record(&record, &data.frame);
            if let Err(DockError::UnregisteredClass(class)) = result {
                // A new class typed by the user gets its own row.
                info!("adding thumbnail row for new class {class:?}");
                register_class_row(&dock, &dock_rows, &class, None, &dock_config);
                if let Some(target) = &class_target {
                    match remember_class(&mut classes.borrow_mut(), &class, target) {
                        Ok(true) => info!("saved class {class:?} to {}", target.display()),
                        Ok(false) => {}
                        Err(e) => warn!("could not save class {class:?}: {e}"),
                    }
                }
                if let Err(e) = dock.borrow_mut().add_record(&record, &data.frame) {
                    warn!("{e}");
                }
            }

            if let Some(ui) = ui_weak.upgrade() {
                let (x1, y1, x2, y2) = bbox.as_tuple();
                ui.set_status_text(
                    format!(
                        "{label} on frame {}: ({x1:.3}, {y1:.3}, {x2:.3}, {y2:.3})",
                        data.frame_id
                    )
                    .into(),
                );
            }
        });
    }

    let loader = make_frame_loader(&ui, panel.clone(), view.clone(), source);
    {
        let loader = loader.clone();
        dock.borrow().jump_to_frame.connect(move |frame_id| loader(*frame_id));
    }

    setup_render_callbacks(&ui, panel.clone(), view);
    let _timer = setup_player_callbacks(&ui, panel.clone(), loader.clone(), config.playback.frame_interval());
    setup_dock_callbacks(&ui, dock.clone());

    sync_controls(&ui, &panel.borrow());
    if frame_count > 0 {
        loader(0);
    } else {
        ui.set_status_text("Source has no frames".into());
    }

    ui.run()?;
    Ok(())
}
