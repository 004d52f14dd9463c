//! Image overlay manager: drag and resize sessions
//!
//! One gesture at a time. A press on an image only becomes a drag after the
//! long-press threshold, which keeps taps and clicks from nudging images.
//! Resizing starts immediately from the resize handle.

mod gesture;

pub use gesture::{Gesture, LongPressTimer, Release, TimerToken};

use crate::config::OfficeConfig;
use crate::document::{ImageId, OverlayImage, Size};
use crate::{OfficeError, Point, Result};

/// Tracks the active pointer gesture over a set of images
#[derive(Debug, Clone)]
pub struct OverlayManager {
    gesture: Gesture,
    next_token: u32,
    long_press_ms: u32,
    min_size: f32,
}

impl OverlayManager {
    pub fn new(long_press_ms: u32, min_size: f32) -> Self {
        Self {
            gesture: Gesture::Idle,
            next_token: 0,
            long_press_ms,
            min_size,
        }
    }

    pub fn from_config(config: &OfficeConfig) -> Self {
        Self::new(config.long_press_ms, config.min_image_size)
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.gesture.is_idle() {
            Ok(())
        } else {
            Err(OfficeError::GestureBusy)
        }
    }

    /// Pointer went down on an image body.
    ///
    /// Returns the long-press timer the host must schedule; the drag only
    /// starts once [`long_press_elapsed`](Self::long_press_elapsed) is called
    /// with its token.
    pub fn press(&mut self, image: &OverlayImage, pointer: Point) -> Result<LongPressTimer> {
        self.ensure_idle()?;
        self.next_token = self.next_token.wrapping_add(1);
        let token = TimerToken(self.next_token);
        self.gesture = Gesture::PendingDrag {
            image: image.id,
            token,
            grab_offset: Point {
                x: pointer.x - image.x,
                y: pointer.y - image.y,
            },
        };
        tracing::debug!(image = %image.id, token = token.0, "long press pending");
        Ok(LongPressTimer {
            token,
            delay_ms: self.long_press_ms,
        })
    }

    /// The host's long-press callback fired.
    ///
    /// Returns the image now being dragged, or `None` for a stale token.
    pub fn long_press_elapsed(&mut self, fired: TimerToken) -> Option<ImageId> {
        match self.gesture {
            Gesture::PendingDrag {
                image,
                token,
                grab_offset,
            } if token == fired => {
                self.gesture = Gesture::Dragging { image, grab_offset };
                tracing::debug!(%image, "drag started");
                Some(image)
            }
            _ => None,
        }
    }

    /// Pointer went down on an image's resize handle
    pub fn begin_resize(&mut self, image: &OverlayImage, pointer: Point) -> Result<()> {
        self.ensure_idle()?;
        self.gesture = Gesture::Resizing {
            image: image.id,
            start_pointer: pointer,
            start_size: image.size(),
        };
        tracing::debug!(image = %image.id, "resize started");
        Ok(())
    }

    /// Pointer moved; update the geometry of the image under gesture.
    ///
    /// Returns the id of the image whose geometry changed.
    pub fn pointer_move(&mut self, images: &mut [OverlayImage], pointer: Point) -> Option<ImageId> {
        let target = match self.gesture {
            Gesture::Dragging { image, .. } | Gesture::Resizing { image, .. } => image,
            Gesture::Idle | Gesture::PendingDrag { .. } => return None,
        };
        let Some(img) = images.iter_mut().find(|img| img.id == target) else {
            tracing::warn!(image = %target, "gesture target vanished");
            self.gesture = Gesture::Idle;
            return None;
        };

        match self.gesture {
            Gesture::Dragging { grab_offset, .. } => {
                img.move_to(Point {
                    x: pointer.x - grab_offset.x,
                    y: pointer.y - grab_offset.y,
                });
            }
            Gesture::Resizing {
                start_pointer,
                start_size,
                ..
            } => {
                let size = Size::new(
                    start_size.width + (pointer.x - start_pointer.x),
                    start_size.height + (pointer.y - start_pointer.y),
                );
                img.resize_to(size.at_least(self.min_size));
            }
            Gesture::Idle | Gesture::PendingDrag { .. } => {}
        }
        Some(target)
    }

    /// Pointer released: end whatever gesture is active
    pub fn release(&mut self) -> Release {
        let ended = std::mem::take(&mut self.gesture);
        let release = Release {
            cancel_timer: ended.pending_timer(),
            finished: match ended {
                Gesture::Dragging { image, .. } | Gesture::Resizing { image, .. } => Some(image),
                Gesture::Idle | Gesture::PendingDrag { .. } => None,
            },
        };
        if release.cancel_timer.is_some() {
            tracing::debug!("press released before long-press threshold");
        }
        release
    }

    /// Abandon the gesture if it targets `image`
    pub fn cancel_for(&mut self, image: ImageId) -> Release {
        if self.gesture.image() == Some(image) {
            self.release()
        } else {
            Release::default()
        }
    }
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::from_config(&OfficeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: u64) -> OverlayImage {
        OverlayImage::new(ImageId(id), "data:,", Size::new(300.0, 200.0), Point { x: 20.0, y: 20.0 })
    }

    fn pt(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_resize_grows_with_delta() {
        let mut images = vec![image(1)];
        let mut overlay = OverlayManager::default();
        overlay.begin_resize(&images[0], pt(320.0, 220.0)).unwrap();

        assert_eq!(overlay.pointer_move(&mut images, pt(370.0, 230.0)), Some(ImageId(1)));
        assert_eq!(images[0].size(), Size::new(350.0, 210.0));
        assert_eq!(images[0].position(), pt(20.0, 20.0));

        let release = overlay.release();
        assert_eq!(release.finished, Some(ImageId(1)));
        assert!(overlay.gesture().is_idle());
    }

    #[test]
    fn test_resize_never_below_minimum() {
        let mut images = vec![image(1)];
        let mut overlay = OverlayManager::default();
        overlay.begin_resize(&images[0], pt(320.0, 220.0)).unwrap();

        for pointer in [pt(0.0, 0.0), pt(-5000.0, 220.0), pt(320.0, -1e6), pt(150.0, 119.0)] {
            overlay.pointer_move(&mut images, pointer);
            assert!(images[0].width >= 100.0);
            assert!(images[0].height >= 100.0);
        }
        assert_eq!(images[0].size(), Size::new(130.0, 100.0));
    }

    #[test]
    fn test_short_press_never_drags() {
        let mut images = vec![image(1)];
        let mut overlay = OverlayManager::default();
        let timer = overlay.press(&images[0], pt(50.0, 50.0)).unwrap();
        assert_eq!(timer.delay_ms, 300);

        assert_eq!(overlay.pointer_move(&mut images, pt(200.0, 200.0)), None);
        let release = overlay.release();
        assert_eq!(release.cancel_timer, Some(timer.token));
        assert_eq!(release.finished, None);

        // The cleared callback may still fire; it must not start a drag.
        assert_eq!(overlay.long_press_elapsed(timer.token), None);
        assert_eq!(overlay.pointer_move(&mut images, pt(300.0, 300.0)), None);
        assert_eq!(images[0].position(), pt(20.0, 20.0));
    }

    #[test]
    fn test_long_press_then_drag() {
        let mut images = vec![image(1)];
        let mut overlay = OverlayManager::default();
        let timer = overlay.press(&images[0], pt(50.0, 60.0)).unwrap();
        assert_eq!(overlay.long_press_elapsed(timer.token), Some(ImageId(1)));
        assert!(overlay.gesture().is_dragging());

        overlay.pointer_move(&mut images, pt(130.0, 90.0));
        // grab offset (30, 40) is preserved
        assert_eq!(images[0].position(), pt(100.0, 50.0));
        assert_eq!(images[0].size(), Size::new(300.0, 200.0));

        let release = overlay.release();
        assert_eq!(release.cancel_timer, None);
        assert_eq!(release.finished, Some(ImageId(1)));
    }

    #[test]
    fn test_stale_token_from_earlier_press() {
        let images = vec![image(1)];
        let mut overlay = OverlayManager::default();
        let first = overlay.press(&images[0], pt(50.0, 50.0)).unwrap();
        overlay.release();
        let second = overlay.press(&images[0], pt(50.0, 50.0)).unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(overlay.long_press_elapsed(first.token), None);
        assert_eq!(overlay.long_press_elapsed(second.token), Some(ImageId(1)));
    }

    #[test]
    fn test_one_gesture_at_a_time() {
        let images = vec![image(1), image(2)];
        let mut overlay = OverlayManager::default();
        overlay.begin_resize(&images[0], pt(0.0, 0.0)).unwrap();
        assert!(matches!(
            overlay.press(&images[1], pt(0.0, 0.0)),
            Err(OfficeError::GestureBusy)
        ));
        assert!(matches!(
            overlay.begin_resize(&images[1], pt(0.0, 0.0)),
            Err(OfficeError::GestureBusy)
        ));
        assert_eq!(overlay.gesture().image(), Some(ImageId(1)));
    }

    #[test]
    fn test_independent_images() {
        let mut images = vec![image(1), image(2)];
        let mut overlay = OverlayManager::default();
        overlay.begin_resize(&images[1], pt(0.0, 0.0)).unwrap();
        overlay.pointer_move(&mut images, pt(50.0, 50.0));
        assert_eq!(images[0].size(), Size::new(300.0, 200.0));
        assert_eq!(images[1].size(), Size::new(350.0, 250.0));
    }

    #[test]
    fn test_cancel_for_other_image_is_noop() {
        let images = vec![image(1), image(2)];
        let mut overlay = OverlayManager::default();
        let timer = overlay.press(&images[0], pt(0.0, 0.0)).unwrap();
        assert_eq!(overlay.cancel_for(ImageId(2)), Release::default());
        assert_eq!(overlay.cancel_for(ImageId(1)).cancel_timer, Some(timer.token));
        assert!(overlay.gesture().is_idle());
    }

    #[test]
    fn test_vanished_target_resets() {
        let images = vec![image(1)];
        let mut overlay = OverlayManager::default();
        overlay.begin_resize(&images[0], pt(0.0, 0.0)).unwrap();
        let mut remaining: Vec<OverlayImage> = Vec::new();
        assert_eq!(overlay.pointer_move(&mut remaining, pt(10.0, 10.0)), None);
        assert!(overlay.gesture().is_idle());
    }
}
