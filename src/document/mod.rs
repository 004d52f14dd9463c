//! Document model: title, rich-text body and image overlays

mod image;

pub use image::{data_uri, ImageId, OverlayImage, Size};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{OfficeError, Result};

/// Stable identifier for a saved document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document as edited and as persisted in the library.
///
/// The serialized field names follow the stored layout
/// (`fileName`, `content`) so existing libraries load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unset until the first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(rename = "fileName")]
    pub title: String,
    /// Rich-text markup, stored as-is
    #[serde(rename = "content")]
    pub body: String,
    #[serde(default)]
    pub images: Vec<OverlayImage>,
    pub timestamp: DateTime<Utc>,
}

impl Document {
    /// Create an empty, unsaved document
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: String::new(),
            images: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Check if the document has been committed to a library
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn image(&self, id: ImageId) -> Option<&OverlayImage> {
        self.images.iter().find(|img| img.id == id)
    }

    /// Remove an image, returning it if present
    pub fn remove_image(&mut self, id: ImageId) -> Option<OverlayImage> {
        let index = self.images.iter().position(|img| img.id == id)?;
        Some(self.images.remove(index))
    }

    /// Stamp the last-modified time
    pub fn touch(&mut self) {
        self.timestamp = Utc::now();
    }
}

/// Largest identifier a page can hold exactly in a JS number
pub const MAX_SAFE_ID: u64 = (1 << 53) - 1;

/// Hands out millisecond-clock identifiers.
///
/// Ids track the wall clock like the stored layout expects, but never repeat:
/// two requests in the same millisecond get consecutive values.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure future ids stay above every id already in use.
    ///
    /// Ids beyond [`MAX_SAFE_ID`] are never handed out, so they cannot
    /// collide and are not tracked.
    pub fn observe(&mut self, id: u64) {
        if id <= MAX_SAFE_ID {
            self.last = self.last.max(id);
        }
    }

    /// Next identifier at the given clock reading
    pub fn next_at(&mut self, now_ms: u64) -> Result<u64> {
        let next = self
            .last
            .checked_add(1)
            .map(|after_last| now_ms.max(after_last))
            .filter(|&id| id <= MAX_SAFE_ID)
            .ok_or(OfficeError::IdsExhausted)?;
        self.last = next;
        Ok(next)
    }

    /// Next identifier at the current time
    pub fn next(&mut self) -> Result<u64> {
        self.next_at(current_timestamp())
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
