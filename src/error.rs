use std::io;
use std::path::PathBuf;

/// Failures surfaced by the compile pipeline. Parsing itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read policy {}: {source}", .path.display())]
    ReadPolicy { path: PathBuf, source: io::Error },

    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFile { path: PathBuf, source: io::Error },

    #[error("failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Error::ReadPolicy { source, .. }
            | Error::CreateDir { source, .. }
            | Error::WriteFile { source, .. } => Some(source),
            Error::Json(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    }
}
