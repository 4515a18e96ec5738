use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The footer image is missing or cannot be decoded. Nothing is written.
    #[error("footer image unusable: {0}")]
    Asset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("job analysis store {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failure reported by an external collaborator (fit classifier, letter writer).
    #[error("collaborator failed: {0}")]
    Collaborator(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Asset(err.to_string())
    }
}
