//! Image overlays positioned independently of the text flow

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Point, Rect};

/// Unique identifier for an image overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp both dimensions to at least `min`
    pub fn at_least(self, min: f32) -> Self {
        Self {
            width: self.width.max(min),
            height: self.height.max(min),
        }
    }
}

/// An embedded image with explicit geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayImage {
    pub id: ImageId,
    /// Self-contained `data:` URI
    pub src: String,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl OverlayImage {
    pub fn new(id: ImageId, src: impl Into<String>, size: Size, position: Point) -> Self {
        Self {
            id,
            src: src.into(),
            width: size.width,
            height: size.height,
            x: position.x,
            y: position.y,
        }
    }

    pub fn position(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn move_to(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn resize_to(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }
}

/// Encode raw image bytes as a `data:` URI
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
        assert_eq!(data_uri("", b""), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_size_at_least() {
        let size = Size::new(40.0, 250.0).at_least(100.0);
        assert_eq!(size, Size::new(100.0, 250.0));
    }

    #[test]
    fn test_bounds() {
        let img = OverlayImage::new(ImageId(1), "data:,", Size::new(300.0, 200.0), Point { x: 5.0, y: 6.0 });
        assert!(img.bounds().contains_point(Point { x: 100.0, y: 100.0 }));
        assert!(!img.bounds().contains_point(Point { x: 400.0, y: 100.0 }));
    }
}
