use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::SnapshotError;
use crate::models::{NewsItem, ProcessedNewsItem};

/// Writes the raw snapshot, replacing any previous file.
pub fn write_raw(path: &Path, items: &[NewsItem]) -> Result<(), SnapshotError> {
    write_records(path, items)
}

/// Reads the raw snapshot back. A missing file is `SnapshotError::Missing`,
/// surfaced to the user instead of fabricating data.
pub fn read_raw(path: &Path) -> Result<Vec<NewsItem>, SnapshotError> {
    read_records(path)
}

/// Writes the processed snapshot, replacing any previous file.
pub fn write_processed(path: &Path, items: &[ProcessedNewsItem]) -> Result<(), SnapshotError> {
    write_records(path, items)
}

pub fn read_processed(path: &Path) -> Result<Vec<ProcessedNewsItem>, SnapshotError> {
    read_records(path)
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let mut writer = csv::Writer::from_path(path).map_err(|source| SnapshotError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    for record in records {
        writer.serialize(record).map_err(|source| SnapshotError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }

    writer.flush().map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::Missing(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| SnapshotError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| SnapshotError::Csv {
            path: path.to_path_buf(),
            source,
        })
}
