//! Error types for icon generation.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything that can stop an icon from being written.
#[derive(Debug, Error)]
pub enum IconError {
    /// The imaging backend was built without the codec for `format`.
    #[error("the {format} encoder is not available in this build")]
    MissingDependency { format: &'static str },

    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl IconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IconError::Io {
            path: path.into(),
            source,
        }
    }

    /// Sort an imaging error into the matching variant.
    ///
    /// I/O errors surfaced by the encoder stay I/O errors, and an
    /// "unsupported" answer from the encoder means the codec is missing.
    pub(crate) fn from_image(
        path: impl Into<PathBuf>,
        format: &'static str,
        err: image::ImageError,
    ) -> Self {
        match err {
            image::ImageError::IoError(source) => IconError::io(path, source),
            image::ImageError::Unsupported(_) => IconError::MissingDependency { format },
            other => IconError::Encode {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// Remediation hint shown to the user, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            IconError::MissingDependency { .. } => Some(
                "Rebuild with the `png` and `ico` features of the `image` crate enabled, \
                 e.g. image = { version = \"0.24\", features = [\"png\", \"ico\"] }",
            ),
            _ => None,
        }
    }
}

/// A batch that stopped part way.
///
/// `written` lists the files that were completed before `error`; they are
/// left on disk.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct BatchFailure {
    pub written: Vec<PathBuf>,
    #[source]
    pub error: IconError,
}

impl BatchFailure {
    pub fn nothing_written(&self) -> bool {
        self.written.is_empty()
    }
}
