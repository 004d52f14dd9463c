//! Flat buffer protocol for image overlay geometry
//!
//! Rebuilt after every geometry change so the page can reposition overlays
//! on each pointer move without a JSON round-trip.
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header:
//! [0]     MAGIC (0x4E584F56 = "NXOV" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     image_count
//! [3]     gesture opcode (GESTURE_*)
//! [4]     active image index (NO_ACTIVE_IMAGE when idle)
//! [5..]   per-image: [id_lo, id_hi, flags]
//!           flags: bit0=pending long press, bit1=dragging, bit2=resizing
//! ```
//!
//! ## f32 Buffer Layout:
//! ```text
//! Per-image: [x, y, width, height]
//! ```
//!
//! Image sources are not part of the buffer; the page caches them by id.

use crate::document::OverlayImage;
use crate::overlay::Gesture;

/// Magic number for format validation: "NXOV" (NeXus OVerlay)
pub const MAGIC: u32 = 0x4E584F56;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 5;

/// Opcodes for the active gesture
pub const GESTURE_IDLE: u32 = 0;
pub const GESTURE_PENDING: u32 = 1;
pub const GESTURE_DRAGGING: u32 = 2;
pub const GESTURE_RESIZING: u32 = 3;

/// Active index when no image is under gesture
pub const NO_ACTIVE_IMAGE: u32 = u32::MAX;

/// Flags bitmask
pub const FLAG_PENDING: u32 = 0b001;
pub const FLAG_DRAGGING: u32 = 0b010;
pub const FLAG_RESIZING: u32 = 0b100;

/// Number of u32 values per image: id_lo, id_hi, flags
pub const U32_PER_IMAGE: usize = 3;

/// Number of f32 values per image: x, y, width, height
pub const F32_PER_IMAGE: usize = 4;

/// Overlay buffer for zero-copy WASM transfer
pub struct OverlayBuffer {
    /// Integer data (header, ids, flags)
    pub u32_data: Vec<u32>,
    /// Float data (positions, dimensions)
    pub f32_data: Vec<f32>,
}

impl Default for OverlayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayBuffer {
    pub fn new() -> Self {
        Self {
            u32_data: Vec::with_capacity(64),
            f32_data: Vec::with_capacity(64),
        }
    }

    /// Pre-allocate for `image_count` images.
    ///
    /// JS holds pointers into these buffers between frames, so capacity is
    /// reused whenever it suffices.
    fn prepare(&mut self, image_count: usize) {
        let u32_target = HEADER_SIZE + image_count * U32_PER_IMAGE + 16;
        let f32_target = image_count * F32_PER_IMAGE + 16;

        if self.u32_data.capacity() < u32_target {
            self.u32_data = Vec::with_capacity(u32_target);
        } else {
            self.u32_data.clear();
        }

        if self.f32_data.capacity() < f32_target {
            self.f32_data = Vec::with_capacity(f32_target);
        } else {
            self.f32_data.clear();
        }
    }

    /// Rewrite the buffer for the given images and gesture
    pub fn write(&mut self, images: &[OverlayImage], gesture: &Gesture) {
        self.prepare(images.len());

        let (opcode, flag) = match gesture {
            Gesture::Idle => (GESTURE_IDLE, 0),
            Gesture::PendingDrag { .. } => (GESTURE_PENDING, FLAG_PENDING),
            Gesture::Dragging { .. } => (GESTURE_DRAGGING, FLAG_DRAGGING),
            Gesture::Resizing { .. } => (GESTURE_RESIZING, FLAG_RESIZING),
        };
        let active = gesture
            .image()
            .and_then(|id| images.iter().position(|img| img.id == id));

        self.u32_data.push(MAGIC);                   // [0] magic number
        self.u32_data.push(SCHEMA_VERSION);          // [1] schema version
        self.u32_data.push(images.len() as u32);     // [2] image_count
        self.u32_data.push(opcode);                  // [3] gesture opcode
        self.u32_data.push(active.map(|i| i as u32).unwrap_or(NO_ACTIVE_IMAGE)); // [4]

        for (index, image) in images.iter().enumerate() {
            let flags = if active == Some(index) { flag } else { 0 };
            self.u32_data.push((image.id.0 & 0xFFFFFFFF) as u32);
            self.u32_data.push((image.id.0 >> 32) as u32);
            self.u32_data.push(flags);

            self.f32_data.push(image.x);
            self.f32_data.push(image.y);
            self.f32_data.push(image.width);
            self.f32_data.push(image.height);
        }
    }

    // Accessors for WASM
    // Return u32 instead of usize for explicit WASM contract (wasm32 linear memory uses u32 offsets)

    pub fn u32_ptr(&self) -> u32 {
        self.u32_data.as_ptr() as usize as u32
    }

    pub fn u32_len(&self) -> u32 {
        self.u32_data.len() as u32
    }

    pub fn f32_ptr(&self) -> u32 {
        self.f32_data.as_ptr() as usize as u32
    }

    pub fn f32_len(&self) -> u32 {
        self.f32_data.len() as u32
    }
}
