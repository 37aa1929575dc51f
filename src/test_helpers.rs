//! Shared test utilities for the photo-framer test suite.
//!
//! Provides synthetic JPEG fixtures (optionally carrying an EXIF block) and
//! [`BlockBackend`], a font-free [`TextBackend`] that renders every glyph as a
//! solid block and records each draw call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("shot.jpg");
//! write_jpeg(&path, 120, 80, Some(&ExifSpec::complete()));
//!
//! let backend = BlockBackend::new();
//! annotate_with_backend(&path, &dest, &small_config(), &backend, None).unwrap();
//! assert_eq!(backend.draws().len(), 3);
//! ```

use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{ImageEncoder, Rgb, RgbImage};

use crate::config::FrameConfig;
use crate::imaging::{FontWeight, TextBackend, TextExtent};

// =========================================================================
// EXIF fixtures
// =========================================================================

/// Tags to embed in a synthetic photo. `None` leaves a tag out.
#[derive(Debug, Clone)]
pub struct ExifSpec {
    pub model: Option<&'static str>,
    pub iso: Option<u16>,
    pub exposure_time: Option<(u32, u32)>,
    pub focal_length: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
    pub orientation: Option<u16>,
    /// Orientation written as ASCII text, which readers cannot interpret.
    pub orientation_text: Option<&'static str>,
}

impl ExifSpec {
    /// Every caption tag present, no orientation.
    pub fn complete() -> Self {
        Self {
            model: Some("X100V"),
            iso: Some(400),
            exposure_time: Some((1, 250)),
            focal_length: Some((230, 10)),
            f_number: Some((28, 10)),
            orientation: None,
            orientation_text: None,
        }
    }
}

/// Serialize an [`ExifSpec`] as a little-endian TIFF block.
pub fn exif_bytes(spec: &ExifSpec) -> Vec<u8> {
    let rational = |(num, denom): (u32, u32)| Value::Rational(vec![exif::Rational { num, denom }]);

    let mut fields = Vec::new();
    if let Some(model) = spec.model {
        fields.push((Tag::Model, Value::Ascii(vec![model.as_bytes().to_vec()])));
    }
    if let Some(iso) = spec.iso {
        fields.push((Tag::PhotographicSensitivity, Value::Short(vec![iso])));
    }
    if let Some(v) = spec.exposure_time {
        fields.push((Tag::ExposureTime, rational(v)));
    }
    if let Some(v) = spec.focal_length {
        fields.push((Tag::FocalLength, rational(v)));
    }
    if let Some(v) = spec.f_number {
        fields.push((Tag::FNumber, rational(v)));
    }
    if let Some(o) = spec.orientation {
        fields.push((Tag::Orientation, Value::Short(vec![o])));
    }
    if let Some(text) = spec.orientation_text {
        fields.push((Tag::Orientation, Value::Ascii(vec![text.as_bytes().to_vec()])));
    }

    let fields: Vec<Field> = fields
        .into_iter()
        .map(|(tag, value)| Field {
            tag,
            ifd_num: In::PRIMARY,
            value,
        })
        .collect();

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).unwrap();
    buf.into_inner()
}

/// Encode a gradient test pattern as JPEG bytes.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Insert a TIFF block as an `APP1 Exif` segment right after the JPEG SOI.
pub fn splice_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG stream");
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Write a synthetic JPEG to `path`, with an EXIF block when `exif` is set.
pub fn write_jpeg(path: &Path, width: u32, height: u32, exif: Option<&ExifSpec>) {
    let jpeg = jpeg_bytes(width, height);
    let bytes = match exif {
        Some(spec) => splice_exif(&jpeg, &exif_bytes(spec)),
        None => jpeg,
    };
    std::fs::write(path, bytes).unwrap();
}

/// Write a small PNG to `path`.
pub fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Small layout values so pipeline tests stay fast.
pub fn small_config() -> FrameConfig {
    FrameConfig {
        border_width: 10,
        font_size: 8.0,
        line_spacing: 6,
        text_padding: 12,
        long_edge_size: 200,
        ..FrameConfig::default()
    }
}

// =========================================================================
// Block-glyph text backend
// =========================================================================

/// A recorded text draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub text: String,
    pub weight: FontWeight,
    pub x: i32,
    pub y: i32,
    pub color: Rgb<u8>,
}

/// Text backend with fixed-size block glyphs.
///
/// Regular glyphs are `glyph_width` wide, bold glyphs one pixel wider; every
/// run is `line_height` tall. Uses Mutex so the recorder works through `&self`.
pub struct BlockBackend {
    pub glyph_width: u32,
    pub line_height: u32,
    draws: Mutex<Vec<RecordedDraw>>,
}

impl BlockBackend {
    pub fn new() -> Self {
        Self {
            glyph_width: 4,
            line_height: 9,
            draws: Mutex::new(Vec::new()),
        }
    }

    pub fn draws(&self) -> Vec<RecordedDraw> {
        self.draws.lock().unwrap().clone()
    }
}

impl TextBackend for BlockBackend {
    fn measure(&self, text: &str, weight: FontWeight) -> TextExtent {
        let glyph = match weight {
            FontWeight::Regular => self.glyph_width,
            FontWeight::Bold => self.glyph_width + 1,
        };
        TextExtent {
            width: glyph * text.chars().count() as u32,
            height: self.line_height,
        }
    }

    fn draw(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        weight: FontWeight,
        x: i32,
        y: i32,
        color: Rgb<u8>,
    ) {
        self.draws.lock().unwrap().push(RecordedDraw {
            text: text.to_string(),
            weight,
            x,
            y,
            color,
        });

        let extent = self.measure(text, weight);
        for dy in 0..extent.height as i32 {
            for dx in 0..extent.width as i32 {
                let (px, py) = (x + dx, y + dy);
                if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height()
                {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}
