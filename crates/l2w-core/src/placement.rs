//! Deterministic screen placement derived from an event key.
//!
//! Two disjoint 32-bit slices of one MD5 digest give two pseudo-independent
//! coordinates, so repeated edits to the same key land on the same spot.

use glam::IVec2;
use md5::{Digest, Md5};

use crate::error::EngineError;

/// Drawable area supplied by the render collaborator at placement time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Map `key` to a position inside `[0, width) x [0, height)`.
///
/// The first four digest bytes (big-endian) drive `x`, the last four drive `y`.
pub fn place(key: &str, width: i32, height: i32) -> Result<IVec2, EngineError> {
    if width <= 0 || height <= 0 {
        return Err(EngineError::InvalidBounds { width, height });
    }
    let digest = Md5::digest(key.as_bytes());
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let tail = u32::from_be_bytes([digest[12], digest[13], digest[14], digest[15]]);
    let x = head % width as u32;
    let y = tail % height as u32;
    Ok(IVec2::new(x as i32, y as i32))
}

/// Convenience wrapper over [`place`] taking a [`Canvas`].
#[inline]
pub fn place_on(key: &str, canvas: Canvas) -> Result<IVec2, EngineError> {
    place(key, canvas.width, canvas.height)
}
