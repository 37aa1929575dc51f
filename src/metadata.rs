//! EXIF metadata extraction.
//!
//! A photo's EXIF block is parsed once per call with `kamadak-exif` and then
//! queried for two things:
//!
//! - **Orientation** (`0th:Orientation`): optional. Callers treat a failure
//!   here as recoverable and fall back to the unrotated image.
//! - **Exposure settings**: camera model, ISO, shutter speed, focal length and
//!   f-number. All five are required to build a caption, so
//!   [`ExposureMetadata::from_exif`] returns a typed [`MetadataError`] naming
//!   the first missing or malformed tag and lets the caller pick the policy.
//!
//! | Field | EXIF tag | Type |
//! |---|---|---|
//! | model | `Model` | ASCII |
//! | iso | `PhotographicSensitivity` (ISOSpeedRatings) | SHORT |
//! | exposure_time | `ExposureTime` | RATIONAL |
//! | focal_length | `FocalLength` | RATIONAL |
//! | f_number | `FNumber` | RATIONAL |

use exif::{Exif, In, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("EXIF reading error: {0}")]
    Exif(#[from] exif::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing EXIF tag {0}")]
    MissingTag(&'static str),
    #[error("malformed EXIF tag {tag}: {reason}")]
    MalformedTag { tag: &'static str, reason: String },
}

/// Read and parse the EXIF block embedded in an image file.
pub fn read_exif(path: &Path) -> Result<Exif, MetadataError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    Ok(exif::Reader::new().read_from_container(&mut reader)?)
}

/// An unsigned EXIF rational, kept exactly as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    /// Integer part (floor division). `None` for a zero denominator.
    pub fn floor(self) -> Option<u32> {
        self.num.checked_div(self.denom)
    }

    /// Floating-point value. `None` for a zero denominator.
    pub fn to_f64(self) -> Option<f64> {
        (self.denom != 0).then(|| f64::from(self.num) / f64::from(self.denom))
    }
}

/// Rotation needed to display the pixel data upright.
///
/// Only the three pure rotations are corrected; mirrored orientations (2, 4,
/// 5, 7) and unknown values are left as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Upright,
    /// EXIF 3.
    Rotate180,
    /// EXIF 6: rotate 90° clockwise to correct.
    Rotate90,
    /// EXIF 8: rotate 270° clockwise to correct.
    Rotate270,
}

impl Orientation {
    pub fn from_exif_value(value: u32) -> Self {
        match value {
            3 => Self::Rotate180,
            6 => Self::Rotate90,
            8 => Self::Rotate270,
            _ => Self::Upright,
        }
    }

    /// Read the orientation tag. An absent tag is `Upright`; a tag that is
    /// present but not an integer is an error.
    pub fn from_exif(exif: &Exif) -> Result<Self, MetadataError> {
        match exif.get_field(Tag::Orientation, In::PRIMARY) {
            None => Ok(Self::Upright),
            Some(field) => field
                .value
                .get_uint(0)
                .map(Self::from_exif_value)
                .ok_or_else(|| MetadataError::MalformedTag {
                    tag: "Orientation",
                    reason: format!("expected an integer, found {:?}", field.value),
                }),
        }
    }
}

/// Camera settings shown in the caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureMetadata {
    pub model: String,
    pub iso: u32,
    pub exposure_time: Rational,
    pub focal_length: Rational,
    pub f_number: Rational,
}

impl ExposureMetadata {
    /// Extract every caption field from a parsed EXIF block.
    pub fn from_exif(exif: &Exif) -> Result<Self, MetadataError> {
        let focal_length = rational_field(exif, Tag::FocalLength, "FocalLength")?;
        let f_number = rational_field(exif, Tag::FNumber, "FNumber")?;
        for (tag, value) in [("FocalLength", focal_length), ("FNumber", f_number)] {
            if value.denom == 0 {
                return Err(MetadataError::MalformedTag {
                    tag,
                    reason: "zero denominator".into(),
                });
            }
        }

        Ok(Self {
            model: ascii_field(exif, Tag::Model, "Model")?,
            iso: uint_field(exif, Tag::PhotographicSensitivity, "ISOSpeedRatings")?,
            exposure_time: rational_field(exif, Tag::ExposureTime, "ExposureTime")?,
            focal_length,
            f_number,
        })
    }

    /// Read a file's EXIF block and extract the caption fields.
    pub fn from_file(path: &Path) -> Result<Self, MetadataError> {
        Self::from_exif(&read_exif(path)?)
    }
}

fn field<'a>(
    exif: &'a Exif,
    tag: Tag,
    name: &'static str,
) -> Result<&'a exif::Field, MetadataError> {
    exif.get_field(tag, In::PRIMARY)
        .ok_or(MetadataError::MissingTag(name))
}

fn ascii_field(exif: &Exif, tag: Tag, name: &'static str) -> Result<String, MetadataError> {
    match &field(exif, tag, name)?.value {
        Value::Ascii(parts) => {
            let first = parts.first().ok_or(MetadataError::MissingTag(name))?;
            let text = std::str::from_utf8(first).map_err(|e| MetadataError::MalformedTag {
                tag: name,
                reason: e.to_string(),
            })?;
            Ok(text.trim_end_matches('\0').to_string())
        }
        other => Err(MetadataError::MalformedTag {
            tag: name,
            reason: format!("expected ASCII, found {other:?}"),
        }),
    }
}

fn uint_field(exif: &Exif, tag: Tag, name: &'static str) -> Result<u32, MetadataError> {
    let f = field(exif, tag, name)?;
    f.value
        .get_uint(0)
        .ok_or_else(|| MetadataError::MalformedTag {
            tag: name,
            reason: format!("expected an integer, found {:?}", f.value),
        })
}

fn rational_field(exif: &Exif, tag: Tag, name: &'static str) -> Result<Rational, MetadataError> {
    match &field(exif, tag, name)?.value {
        Value::Rational(values) => values
            .first()
            .map(|r| Rational::new(r.num, r.denom))
            .ok_or(MetadataError::MissingTag(name)),
        other => Err(MetadataError::MalformedTag {
            tag: name,
            reason: format!("expected RATIONAL, found {other:?}"),
        }),
    }
}
