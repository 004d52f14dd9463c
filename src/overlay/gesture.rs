//! Pointer gesture states for image overlays

use crate::document::{ImageId, Size};
use crate::Point;

/// Identifies one scheduled long-press callback.
///
/// Tokens are never reused, so a callback that fires after its press was
/// released is recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u32);

/// A deferred callback the host must schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongPressTimer {
    pub token: TimerToken,
    pub delay_ms: u32,
}

/// The single active pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pointer is down on an image, waiting for the long-press threshold
    PendingDrag {
        image: ImageId,
        token: TimerToken,
        /// Pointer position relative to the image origin
        grab_offset: Point,
    },
    Dragging {
        image: ImageId,
        grab_offset: Point,
    },
    Resizing {
        image: ImageId,
        start_pointer: Point,
        start_size: Size,
    },
}

impl Gesture {
    /// Image the gesture targets, if any
    pub fn image(&self) -> Option<ImageId> {
        match self {
            Gesture::Idle => None,
            Gesture::PendingDrag { image, .. }
            | Gesture::Dragging { image, .. }
            | Gesture::Resizing { image, .. } => Some(*image),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging { .. })
    }

    /// Timer that must be cleared if this gesture ends now
    pub fn pending_timer(&self) -> Option<TimerToken> {
        match self {
            Gesture::PendingDrag { token, .. } => Some(*token),
            _ => None,
        }
    }
}

/// What ended when the pointer was released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Release {
    /// Long-press timer to clear, if the press ended early
    pub cancel_timer: Option<TimerToken>,
    /// Image whose drag or resize just finished
    pub finished: Option<ImageId>,
}
