//! Parameter types for image operations.
//!
//! These describe *what* to draw or encode, not *how*. They are the
//! interface between [`operations`](super::operations) and a
//! [`TextBackend`](super::backend::TextBackend).
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`FontWeight`]: which of the two caption fonts a run uses.
//! - [`TextExtent`]: measured pixel size of a text run.

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Font face of a caption run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Pixel size of a measured text run.
///
/// `width` is the advance width of the run. `height` is the distance from the
/// draw origin `y` down to the lowest ink of the run, so it includes the gap
/// between the origin and the tops of the glyphs. Runs drawn at the same `y`
/// share a baseline whatever their heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}
