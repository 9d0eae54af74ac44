//! Grid files on disk.
//!
//! A grid file is pretty-printed JSON:
//!
//! ```json
//! { "version": 1, "saved_at": "2024-01-01T00:00:00Z", "cells": [["a", "b"]] }
//! ```
//!
//! A bare array of rows is accepted on load as well.

use crate::error::{GridError, GridResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const FILE_VERSION: u32 = 1;

/// Default extension for grid files
pub const FILE_EXTENSION: &str = "json";

/// On-disk grid document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub cells: Vec<Vec<String>>,
}

impl GridFile {
    pub fn new(cells: Vec<Vec<String>>) -> Self {
        Self {
            version: FILE_VERSION,
            saved_at: Utc::now(),
            cells,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredGrid {
    Document(GridFile),
    Bare(Vec<Vec<String>>),
}

/// Read the cell matrix stored at `path`.
///
/// Fails with [`GridError::LoadFailure`] if the file cannot be read, is not
/// a grid document, comes from a newer format version or has no cells.
pub fn load_grid(path: &Path) -> GridResult<Vec<Vec<String>>> {
    let failure = |reason: String| GridError::LoadFailure {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| failure(e.to_string()))?;
    let reader = BufReader::new(file);
    let stored: StoredGrid =
        serde_json::from_reader(reader).map_err(|e| failure(format!("not a grid file: {}", e)))?;

    let cells = match stored {
        StoredGrid::Document(doc) if doc.version > FILE_VERSION => {
            return Err(failure(format!("unsupported file version {}", doc.version)));
        }
        StoredGrid::Document(doc) => doc.cells,
        StoredGrid::Bare(cells) => cells,
    };

    if cells.iter().all(Vec::is_empty) {
        return Err(failure("grid has no cells".to_string()));
    }

    tracing::info!(rows = cells.len(), "loaded grid from {}", path.display());
    Ok(cells)
}

/// Write `cells` to `path`.
///
/// The document goes to a temporary file in the same directory which then
/// replaces `path`, so a failed save never leaves a truncated file behind.
pub fn save_grid(path: &Path, cells: &[Vec<String>]) -> GridResult<()> {
    let failure = |source: std::io::Error| GridError::SaveFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let doc = GridFile::new(cells.to_vec());
    let mut temp = NamedTempFile::new_in(dir).map_err(failure)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &doc)
            .map_err(|e| failure(std::io::Error::from(e)))?;
        writer.flush().map_err(failure)?;
    }
    temp.persist(path).map_err(|e| failure(e.error))?;

    tracing::info!(rows = cells.len(), "saved grid to {}", path.display());
    Ok(())
}
