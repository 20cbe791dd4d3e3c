use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::shared::float_parse::{parse_optional, parse_or_zero};
use crate::transcript::domain::aligned_segment::{AlignedSegment, AlignedWord};

#[derive(Error, Debug)]
pub enum TranscriptReadError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transcript {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("transcript {path} has no segment list (found {found})")]
    UnexpectedShape { path: PathBuf, found: &'static str },
}

/// Reads aligner output from JSON.
///
/// Accepts a bare array of segments or an object with a `segments` array.
/// Field-level problems never fail the read: numeric fields are coerced,
/// missing text becomes empty, and non-object entries are skipped.
pub struct JsonTranscriptReader;

impl JsonTranscriptReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<Vec<AlignedSegment>, TranscriptReadError> {
        let data = fs::read_to_string(path).map_err(|e| TranscriptReadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let value: Value = serde_json::from_str(&data).map_err(|e| TranscriptReadError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        let segments = segment_list(&value).ok_or_else(|| TranscriptReadError::UnexpectedShape {
            path: path.to_path_buf(),
            found: value_kind(&value),
        })?;
        Ok(parse_segments(segments))
    }
}

impl Default for JsonTranscriptReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts already-decoded JSON segment values into typed segments.
pub fn parse_segments(values: &[Value]) -> Vec<AlignedSegment> {
    let mut segments = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        match value.as_object() {
            Some(obj) => segments.push(parse_segment(obj)),
            None => log::warn!(
                "skipping transcript entry {idx}: expected object, found {}",
                value_kind(value)
            ),
        }
    }
    segments
}

fn segment_list(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(items) => Some(items.as_slice()),
        Value::Object(obj) => obj.get("segments").and_then(Value::as_array).map(Vec::as_slice),
        _ => None,
    }
}

fn parse_segment(obj: &Map<String, Value>) -> AlignedSegment {
    let start = obj.get("start").map(parse_or_zero).unwrap_or(0.0);
    let end = parse_optional(obj.get("end")).unwrap_or(start);
    let words = obj
        .get("words")
        .and_then(Value::as_array)
        .map(|ws| ws.iter().filter_map(Value::as_object).map(parse_word).collect())
        .unwrap_or_default();
    let text = obj.get("text").and_then(Value::as_str).map(str::to_string);
    AlignedSegment {
        start,
        end,
        words,
        text,
    }
}

fn parse_word(obj: &Map<String, Value>) -> AlignedWord {
    AlignedWord {
        text: word_text(obj),
        start: parse_optional(obj.get("start")),
        end: parse_optional(obj.get("end")),
    }
}

/// `word` wins over `text`; an empty `word` falls through to `text`.
fn word_text(obj: &Map<String, Value>) -> String {
    ["word", "text"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or("")
        .to_string()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
