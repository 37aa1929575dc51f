//! High-level image operations.
//!
//! These functions combine the layout calculations with a text backend and
//! the `image` crate: orientation correction, frame composition, long-edge
//! resizing and JPEG output.

use super::backend::{BackendError, TextBackend};
use super::calculations::{
    calculate_frame_geometry, calculate_long_edge_dimensions, caption_block_height,
    center_offset,
};
use super::params::{FontWeight, Quality};
use crate::caption::Caption;
use crate::config::{ConfigError, FrameConfig, Palette};
use crate::metadata::Orientation;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Layout and color settings for [`compose_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStyle {
    pub border_width: u32,
    pub line_spacing: u32,
    pub text_padding: u32,
    pub palette: Palette,
}

impl FrameStyle {
    /// Validates `config` first, so every style fits the layout arithmetic.
    pub fn from_config(config: &FrameConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            border_width: config.border_width,
            line_spacing: config.line_spacing,
            text_padding: config.text_padding,
            palette: config.palette()?,
        })
    }
}

/// Rotate decoded pixels so the photo displays upright.
pub fn apply_orientation(image: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Upright => image,
        Orientation::Rotate180 => image.rotate180(),
        Orientation::Rotate90 => image.rotate90(),
        Orientation::Rotate270 => image.rotate270(),
    }
}

/// Surround an image with a border and draw the caption below it.
///
/// The canvas is built in two passes: first the image inside its border plus
/// the top caption padding, then that canvas pasted onto a taller one with
/// room for the caption block.
pub fn compose_frame(
    image: &DynamicImage,
    caption: &Caption,
    style: &FrameStyle,
    backend: &impl TextBackend,
) -> RgbImage {
    let prefix = backend.measure(caption.prefix(), FontWeight::Regular);
    let model = backend.measure(&caption.model, FontWeight::Bold);
    let details = backend.measure(&caption.details, FontWeight::Regular);

    let caption_height = caption_block_height(prefix.height, details.height, style.line_spacing);
    let geometry = calculate_frame_geometry(
        (image.width(), image.height()),
        style.border_width,
        style.text_padding,
        caption_height,
    );
    tracing::debug!(?geometry, "frame layout");

    let palette = style.palette;
    let mut framed =
        RgbImage::from_pixel(geometry.canvas_width, geometry.framed_height, palette.frame);
    let (origin_x, origin_y) = geometry.image_origin;
    imageops::overlay(
        &mut framed,
        &image.to_rgb8(),
        i64::from(origin_x),
        i64::from(origin_y),
    );

    let mut canvas =
        RgbImage::from_pixel(geometry.canvas_width, geometry.final_height, palette.frame);
    imageops::replace(&mut canvas, &framed, 0, 0);

    let line1_x = center_offset(geometry.canvas_width, prefix.width + model.width);
    let line1_y = geometry.caption_top as i32;
    backend.draw(
        &mut canvas,
        caption.prefix(),
        FontWeight::Regular,
        line1_x,
        line1_y,
        palette.text,
    );
    backend.draw(
        &mut canvas,
        &caption.model,
        FontWeight::Bold,
        line1_x + prefix.width as i32,
        line1_y,
        palette.text,
    );

    let line2_y = line1_y + (prefix.height + style.line_spacing) as i32;
    backend.draw(
        &mut canvas,
        &caption.details,
        FontWeight::Regular,
        center_offset(geometry.canvas_width, details.width),
        line2_y,
        palette.second_line,
    );

    canvas
}

/// Resample so the longer edge equals `long_edge` (Lanczos3).
pub fn resize_long_edge(canvas: &RgbImage, long_edge: u32) -> RgbImage {
    let (width, height) = calculate_long_edge_dimensions(canvas.dimensions(), long_edge);
    imageops::resize(canvas, width, height, FilterType::Lanczos3)
}

/// Encode as baseline JPEG and write to `path`, whatever its extension.
pub fn save_jpeg(canvas: &RgbImage, path: &Path, quality: Quality) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality.value());
    canvas.write_with_encoder(encoder)?;
    Ok(())
}
