use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::FrameSource;
use crate::error::SourceError;
use crate::frame::FrameBuffer;
use crate::geometry::FractionalBox;
use crate::record::{FrameData, FrameRecord};

pub const RECORDS_FILE: &str = "records.json";

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// One entry of the `records.json` sidecar. Boxes are fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub frame_id: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub object_class: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub track_id: u64,
}

impl From<StoredRecord> for FrameRecord {
    fn from(r: StoredRecord) -> Self {
        FrameRecord {
            frame_id: r.frame_id,
            coords: crate::geometry::BoxCoords::Fractional(FractionalBox::new(r.x1, r.y1, r.x2, r.y2)),
            object_class: r.object_class,
            tag: r.tag,
            track_id: r.track_id,
        }
    }
}

/// Still images in a directory, played in file-name order.
#[derive(Debug)]
pub struct ImageSequence {
    root: PathBuf,
    frames: Vec<PathBuf>,
    records: HashMap<usize, Vec<FrameRecord>>,
}

impl ImageSequence {
    pub fn open(folder: &Path) -> Result<Self, SourceError> {
        let io_err = |source| SourceError::Io {
            path: folder.to_path_buf(),
            source,
        };
        let mut frames = Vec::new();
        for entry in fs::read_dir(folder).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && has_image_extension(&path) {
                frames.push(path);
            }
        }
        if frames.is_empty() {
            return Err(SourceError::NoFrames(folder.to_path_buf()));
        }
        // Sort for consistent ordering
        frames.sort();

        let records = load_records(&folder.join(RECORDS_FILE))?;
        info!(
            "opened {} frames ({} with records) from {}",
            frames.len(),
            records.len(),
            folder.display()
        );
        Ok(Self {
            root: folder.to_path_buf(),
            frames,
            records,
        })
    }

    pub fn frame_path(&self, index: usize) -> Option<&Path> {
        self.frames.get(index).map(PathBuf::as_path)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn load_records(path: &Path) -> Result<HashMap<usize, Vec<FrameRecord>>, SourceError> {
    let mut by_frame: HashMap<usize, Vec<FrameRecord>> = HashMap::new();
    if !path.exists() {
        debug!("no {} next to frames", RECORDS_FILE);
        return Ok(by_frame);
    }
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stored: Vec<StoredRecord> = serde_json::from_str(&content).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    for record in stored {
        by_frame.entry(record.frame_id).or_default().push(record.into());
    }
    Ok(by_frame)
}

impl FrameSource for ImageSequence {
    fn len(&self) -> usize {
        self.frames.len()
    }

    fn load(&mut self, index: usize) -> Result<FrameData, SourceError> {
        let path = self.frames.get(index).ok_or(SourceError::OutOfRange {
            index,
            len: self.frames.len(),
        })?;
        let img = image::open(path).map_err(|source| SourceError::Decode {
            path: path.clone(),
            source,
        })?;
        let frame = FrameBuffer::from_rgb_image(img.to_rgb8())?;
        let records = self.records.get(&index).cloned().unwrap_or_default();
        Ok(FrameData::new(frame, index).with_records(records))
    }

    fn describe(&self) -> String {
        format!("{} ({} frames)", self.root.display(), self.frames.len())
    }
}
