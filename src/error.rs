//! Error types shared across the player, dock, and frame sources.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DockError {
    #[error("no sub-viewer registered for class {0:?}")]
    UnregisteredClass(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame buffer has {actual} bytes, expected {expected} for {width}x{height}x{channels}")]
    SizeMismatch {
        width: u32,
        height: u32,
        channels: usize,
        expected: usize,
        actual: usize,
    },
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    Empty { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("json parse error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no image files found in {0}")]
    NoFrames(PathBuf),
    #[error("frame index {index} out of range (source has {len} frames)")]
    OutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Frame(#[from] FrameError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to parse class catalog: {0}")]
    Classes(#[from] serde_yaml::Error),
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
}
