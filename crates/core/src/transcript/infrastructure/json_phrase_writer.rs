use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::transcript::domain::phrase_segment::PhraseSegment;

#[derive(Error, Debug)]
pub enum PhraseWriteError {
    #[error("failed to write phrases to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode phrases: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes phrase segments as a pretty-printed JSON array.
pub struct JsonPhraseWriter;

impl JsonPhraseWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, path: &Path, phrases: &[PhraseSegment]) -> Result<(), PhraseWriteError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PhraseWriteError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let mut json = serde_json::to_string_pretty(phrases)?;
        json.push('\n');
        fs::write(path, json).map_err(|e| PhraseWriteError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Streams the array to `out`, newline-terminated.
    pub fn write_to<W: Write>(&self, mut out: W, phrases: &[PhraseSegment]) -> Result<(), PhraseWriteError> {
        serde_json::to_writer_pretty(&mut out, phrases)?;
        out.write_all(b"\n").map_err(serde_json::Error::io)?;
        out.flush().map_err(serde_json::Error::io)?;
        Ok(())
    }
}

impl Default for JsonPhraseWriter {
    fn default() -> Self {
        Self::new()
    }
}
