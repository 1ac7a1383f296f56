use std::path::PathBuf;
use thiserror::Error;

/// What went wrong for a single search query. The collector records one of
/// these per failed query and moves on; no query failure aborts the batch.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Network failure or timeout while fetching the feed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be parsed as an RSS document.
    #[error("feed parse error: {0}")]
    Parse(String),
}

/// Snapshot file errors. A missing input file halts the processing stage
/// with a user-visible message; only the collection stage fabricates
/// fallback data.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read records from {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
