// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON spec files: the on-disk form of a constraint set.
//!
//! ```json
//! {
//!   "candidates": ["alpha", "beta"],
//!   "rows": [
//!     { "offset": 2, "bytes": "aq" },
//!     { "offset": 8, "bytes": [64, 61], "care": [true, false] }
//!   ]
//! }
//! ```
//!
//! `bytes` is either an ASCII string (one character per candidate) or an
//! array of byte values. Loading goes through `DynConstraintSet::from_specs`,
//! so a file that parses is still rejected if the set it describes is invalid.

use crate::types::{DynConstraintSet, RowSpec};
use crate::verify::ConstraintError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or interpreting a spec file.
#[derive(Debug, Error)]
pub enum SpecFileError {
    #[error("failed to read spec file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed spec file")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: byte string must be ASCII, one byte per candidate")]
    BadByte { row: usize },

    #[error("invalid constraint set")]
    Constraint(#[from] ConstraintError),
}

/// Top-level spec file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
    pub rows: Vec<SpecRow>,
}

/// One row of a spec file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecRow {
    pub offset: usize,
    pub bytes: ByteList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care: Option<Vec<bool>>,
}

/// Per-candidate expected bytes, as text or as raw values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteList {
    Text(String),
    Raw(Vec<u8>),
}

impl ByteList {
    /// Printable ASCII becomes text, anything else stays raw.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(|b| (0x20..=0x7E).contains(b)) {
            // All bytes are printable ASCII, so this is valid UTF-8.
            Self::Text(bytes.iter().map(|&b| b as char).collect())
        } else {
            Self::Raw(bytes.to_vec())
        }
    }

    fn to_bytes(&self, row: usize) -> Result<Vec<u8>, SpecFileError> {
        match self {
            Self::Text(text) if text.is_ascii() => Ok(text.as_bytes().to_vec()),
            Self::Text(_) => Err(SpecFileError::BadByte { row }),
            Self::Raw(bytes) => Ok(bytes.clone()),
        }
    }
}

impl SpecFile {
    /// Parse a spec file from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SpecFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SpecFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Row specs in file order.
    pub fn row_specs(&self) -> Result<Vec<RowSpec>, SpecFileError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(j, row)| {
                Ok(RowSpec {
                    offset: row.offset,
                    bytes: row.bytes.to_bytes(j)?,
                    care: row.care.clone(),
                })
            })
            .collect()
    }

    /// Build and validate the set this file describes.
    pub fn build(&self) -> Result<DynConstraintSet, SpecFileError> {
        let set = DynConstraintSet::from_specs(&self.row_specs()?)?;
        match &self.candidates {
            Some(labels) => Ok(set.with_labels(labels.clone())?),
            None => Ok(set),
        }
    }
}

/// Read, parse and validate a spec file.
pub fn load(path: impl AsRef<Path>) -> Result<DynConstraintSet, SpecFileError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SpecFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = from_json(&json)?;
    tracing::info!(
        path = %path.display(),
        rows = set.rows.len(),
        candidates = set.candidates,
        "loaded spec file"
    );
    Ok(set)
}

/// Parse and validate a spec file held in memory.
pub fn from_json(json: &str) -> Result<DynConstraintSet, SpecFileError> {
    SpecFile::from_json(json)?.build()
}

impl DynConstraintSet {
    /// The spec file that rebuilds this set, labels included.
    pub fn to_spec_file(&self) -> SpecFile {
        SpecFile {
            candidates: self.labels.clone(),
            rows: self
                .to_specs()
                .into_iter()
                .map(|spec| SpecRow {
                    offset: spec.offset,
                    bytes: ByteList::from_bytes(&spec.bytes),
                    care: spec.care,
                })
                .collect(),
        }
    }
}
