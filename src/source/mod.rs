//! Frame providers feeding the player.
//!
//! - `synthetic` - generated clip with one moving object, for demos and tests
//! - `sequence` - directory of still images with an optional `records.json`

mod sequence;
mod synthetic;

pub use sequence::{ImageSequence, StoredRecord, RECORDS_FILE};
pub use synthetic::SyntheticClip;

use crate::error::SourceError;
use crate::record::FrameData;

pub trait FrameSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode frame `index` together with its records.
    fn load(&mut self, index: usize) -> Result<FrameData, SourceError>;

    /// Short human-readable description for the status bar.
    fn describe(&self) -> String;
}
