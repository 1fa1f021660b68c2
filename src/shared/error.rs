use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions for a collector run. Nothing here is retried.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("could not open camera device {index}")]
    DeviceUnavailable { index: i32 },

    #[error("can't receive frame from camera: {0}")]
    FrameRead(String),

    #[error("permission denied while creating {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("directory not found or not readable: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("invalid value for '{key}': {value}")]
    InvalidConfig { key: String, value: String },

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

pub type CollectorResult<T> = Result<T, CollectorError>;

/// Non-fatal messages shown to the operator. The loop keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoCategorySelected,
    SnapshotFailed { path: PathBuf, reason: String },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::NoCategorySelected => write!(f, "Please select a category first!"),
            Notice::SnapshotFailed { path, reason } => {
                write!(f, "Failed to save {}: {}", path.display(), reason)
            }
        }
    }
}
