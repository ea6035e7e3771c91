use std::path::PathBuf;

use clap::Parser;

/// Command line options for the frame review player.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Frame-by-frame video review with box annotation")]
pub struct AppArgs {
    /// Directory of frame images (png/jpg/bmp), with an optional records.json.
    #[arg(long)]
    pub frames: Option<PathBuf>,
    /// Length of the generated demo clip, used when --frames is not given.
    #[arg(long, default_value_t = 120)]
    pub synthetic: usize,
    /// Config file to use instead of the one in the user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Class catalog YAML; overrides `classes.config_file` from the config.
    #[arg(long)]
    pub classes: Option<String>,
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log: String,
}
