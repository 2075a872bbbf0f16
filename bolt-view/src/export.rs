//! Writes a grown bolt to disk as JSON segment records.

use bolt_core::SegmentTree;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors that can occur while exporting a bolt.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing has been grown yet.
    #[error("no bolt to export")]
    NothingToExport,

    /// The target file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The records could not be encoded.
    #[error("failed to encode segments: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes one JSON record per segment to `path`.
///
/// ### Returns
/// The number of records written.
pub fn write_json(path: &Path, tree: &SegmentTree) -> Result<usize, ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    let records = tree.records();
    serde_json::to_writer_pretty(&mut out, &records)?;
    out.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), segments = records.len(), "bolt exported");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bolt_core::SegmentRecord;
    use glam::Vec3;

    #[test]
    fn writes_records_that_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bolt.json");
        let mut tree = SegmentTree::new(Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y);
        tree.add_child(0, Vec3::new(0.0, 49.0, 0.0), Vec3::NEG_Y, 1);

        assert_eq!(write_json(&path, &tree).unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<SegmentRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, tree.records());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("bolt.json");
        let tree = SegmentTree::new(Vec3::ZERO, Vec3::NEG_Y);

        let err = write_json(&path, &tree).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("bolt.json"));
    }
}
