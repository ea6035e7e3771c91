use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::classes::ClassCatalog;
use crate::error::ConfigError;
use crate::render_surface::RenderStyle;
use crate::utils::parse_color;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub dock: DockConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub classes: ClassesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_false")]
    pub start_backward: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_emphasis_color")]
    pub emphasis_color: String,
    #[serde(default = "default_selection_color")]
    pub selection_color: String,
    #[serde(default = "default_line_thickness")]
    pub line_thickness: u32,
    #[serde(default = "default_min_selection_px")]
    pub min_selection_px: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    #[serde(default = "default_dock_title")]
    pub window_title: String,
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: u32,
    #[serde(default = "default_max_thumbnails")]
    pub max_thumbnails_per_row: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_fps")]
    pub fps: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassesConfig {
    pub config_file: Option<String>,
}

// Default value functions
fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    540
}

fn default_false() -> bool {
    false
}

fn default_emphasis_color() -> String {
    "#ff0000".to_string()
}

fn default_selection_color() -> String {
    "#0a0a64".to_string()
}

fn default_line_thickness() -> u32 {
    2
}

fn default_min_selection_px() -> u32 {
    1
}

fn default_dock_title() -> String {
    "Images Viewers Dock".to_string()
}

fn default_thumbnail_height() -> u32 {
    64
}

fn default_max_thumbnails() -> usize {
    32
}

fn default_fps() -> f32 {
    25.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            start_backward: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            emphasis_color: default_emphasis_color(),
            selection_color: default_selection_color(),
            line_thickness: default_line_thickness(),
            min_selection_px: default_min_selection_px(),
        }
    }
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            window_title: default_dock_title(),
            thumbnail_height: default_thumbnail_height(),
            max_thumbnails_per_row: default_max_thumbnails(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl PlaybackConfig {
    /// Timer interval for one frame; non-positive rates fall back to the default.
    pub fn frame_interval(&self) -> std::time::Duration {
        let fps = if self.fps.is_finite() && self.fps > 0.0 {
            self.fps
        } else {
            default_fps()
        };
        std::time::Duration::from_secs_f32(1.0 / fps)
    }
}

impl RenderConfig {
    /// Build the render style, falling back to defaults for unparsable colours.
    pub fn to_style(&self, classes: &ClassCatalog) -> RenderStyle {
        let fallback = RenderStyle::default();
        let color = |hex: &str, default: image::Rgb<u8>| {
            parse_color(hex).map(image::Rgb).unwrap_or_else(|| {
                warn!("invalid colour {hex:?} in config, using default");
                default
            })
        };
        RenderStyle {
            emphasis: color(&self.emphasis_color, fallback.emphasis),
            selection: color(&self.selection_color, fallback.selection),
            line_thickness: self.line_thickness.max(1),
            min_selection_px: self.min_selection_px,
            class_colors: classes
                .classes
                .iter()
                .filter_map(|c| {
                    let rgb = c.color.as_deref().and_then(parse_color)?;
                    Some((c.name.clone(), image::Rgb(rgb)))
                })
                .collect(),
        }
    }
}

/// Per-user directory holding `config.toml` and the class catalog.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "", "frame-review").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Get the path to the config file
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration from the user config directory, or defaults if it is
/// missing or broken.
pub fn load_config() -> AppConfig {
    match config_path() {
        Ok(path) => load_or_init_config(&path),
        Err(e) => {
            warn!("{e}; using default configuration");
            AppConfig::default()
        }
    }
}

/// Load `path`, writing the defaults there first if it does not exist yet.
pub fn load_or_init_config(path: &Path) -> AppConfig {
    if !path.exists() {
        let config = AppConfig::default();
        match save_config(&config, path) {
            Ok(()) => info!("wrote default configuration to {}", path.display()),
            Err(e) => warn!("{e}"),
        }
        return config;
    }
    load_config_from(path).unwrap_or_else(|e| {
        warn!("{e}; using default configuration");
        AppConfig::default()
    })
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Create config directory if it doesn't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let toml = toml::to_string_pretty(config)?;

    std::fs::write(path, toml).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
