use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("No games to export")]
    NoGames,
    #[error("ROM file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Playlist encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Gamelist encoding error: {0}")]
    Xml(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{primary} (archive finalize also failed: {finalize})")]
    Finalize {
        primary: Box<ExportError>,
        finalize: Box<ExportError>,
    },
}

impl ExportError {
    /// The error that aborted the export, looking through a failed finalize.
    pub fn primary(&self) -> &ExportError {
        match self {
            ExportError::Finalize { primary, .. } => primary.primary(),
            other => other,
        }
    }

    pub fn is_file_not_found(&self) -> bool {
        matches!(self.primary(), ExportError::FileNotFound(_))
    }
}

// Transport layers hand the message straight back to clients.
impl Serialize for ExportError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
