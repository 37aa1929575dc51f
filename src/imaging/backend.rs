//! Text backend trait and shared error type.
//!
//! The [`TextBackend`] trait defines the two operations the framing pipeline
//! needs from a text renderer: measure a run and draw a run. Everything else
//! (decode, resize, encode) goes straight through the `image` crate.
//!
//! The production implementation is
//! [`FontBackend`](super::font_backend::FontBackend), which rasterizes TTF/OTF
//! faces with `ab_glyph` and `imageproc`. Tests substitute a block-glyph
//! renderer so layout can be checked without font files.

use super::params::{FontWeight, TextExtent};
use image::{Rgb, RgbImage};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font error in {path}: {reason}")]
    Font { path: PathBuf, reason: String },
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Trait for caption text renderers.
///
/// `draw` positions a run by the top-left of its line box, the same origin
/// `measure` reports the extent from.
pub trait TextBackend {
    /// Measure the advance width of a run and how far its ink reaches below
    /// the draw origin.
    fn measure(&self, text: &str, weight: FontWeight) -> TextExtent;

    /// Draw a run onto the canvas with its line box starting at `(x, y)`.
    fn draw(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        weight: FontWeight,
        x: i32,
        y: i32,
        color: Rgb<u8>,
    );
}
