//! Editor configuration

use serde::{Deserialize, Serialize};

use crate::{OfficeError, Point};

/// Key the library is stored under when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "nexus-office-library";

/// Title given to fresh documents
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Hold time before a press on an image turns into a drag
pub const LONG_PRESS_MS: u32 = 300;

/// Smallest width/height an image can be resized to
pub const MIN_IMAGE_SIZE: f32 = 100.0;

/// Runtime configuration for an [`Office`](crate::Office).
///
/// Every field has a default, so a page may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OfficeConfig {
    pub storage_key: String,
    pub default_title: String,
    pub long_press_ms: u32,
    pub min_image_size: f32,
    pub default_image_width: f32,
    pub default_image_height: f32,
    pub initial_image_offset: Point,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            long_press_ms: LONG_PRESS_MS,
            min_image_size: MIN_IMAGE_SIZE,
            default_image_width: 300.0,
            default_image_height: 200.0,
            initial_image_offset: Point { x: 20.0, y: 20.0 },
        }
    }
}

impl OfficeConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, OfficeError> {
        serde_json::from_str(json).map_err(OfficeError::InvalidConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = OfficeConfig::from_json(r#"{"storageKey": "custom", "longPressMs": 500}"#)
            .expect("valid config");
        assert_eq!(config.storage_key, "custom");
        assert_eq!(config.long_press_ms, 500);
        assert_eq!(config.min_image_size, MIN_IMAGE_SIZE);
        assert_eq!(config.default_title, DEFAULT_TITLE);
    }

    #[test]
    fn test_invalid_config() {
        let err = OfficeConfig::from_json("{\"longPressMs\": \"soon\"}").unwrap_err();
        assert!(matches!(err, OfficeError::InvalidConfig(_)));
    }
}
