//! Error type shared by every fallible editor operation

use thiserror::Error;

use crate::document::{DocumentId, ImageId};

#[derive(Debug, Error)]
pub enum OfficeError {
    /// The key-value store refused a read or write
    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("library encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no saved document with id {0}")]
    UnknownDocument(DocumentId),

    #[error("no image with id {0}")]
    UnknownImage(ImageId),

    /// Another drag or resize is already in progress
    #[error("an image gesture is already active")]
    GestureBusy,

    /// The identifier clock has run past what a page can represent
    #[error("no identifiers left to assign")]
    IdsExhausted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(serde_json::Error),
}

pub type Result<T, E = OfficeError> = std::result::Result<T, E>;
