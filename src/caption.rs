//! Caption text built from exposure metadata.
//!
//! ```text
//! Shot on X100V                     ← "Shot on " regular + model bold
//! 23mm   f/2.8   1/250s   ISO400    ← details, one regular run
//! ```
//!
//! Formatting rules for the details line:
//! - focal length: integer part only (`235/10` → `23mm`)
//! - aperture: exactly one decimal (`28/10` → `f/2.8`, `8/1` → `f/8.0`)
//! - shutter speed: raw numerator/denominator, never reduced (`10/2500s`)
//! - ISO: no space (`ISO400`)
//!
//! Fields are separated by three spaces.

use crate::metadata::{ExposureMetadata, MetadataError};

/// Regular-weight run that precedes the bold camera model.
pub const SHOT_ON_PREFIX: &str = "Shot on ";

const FIELD_SEPARATOR: &str = "   ";

/// The two caption lines of a framed photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Camera model, drawn bold after [`SHOT_ON_PREFIX`].
    pub model: String,
    /// Exposure settings line.
    pub details: String,
}

impl Caption {
    pub fn from_metadata(meta: &ExposureMetadata) -> Result<Self, MetadataError> {
        Ok(Self {
            model: meta.model.clone(),
            details: format_details(meta)?,
        })
    }

    /// Regular-weight prefix of the first line.
    pub fn prefix(&self) -> &'static str {
        SHOT_ON_PREFIX
    }

    /// Full first line as plain text.
    pub fn first_line(&self) -> String {
        format!("{}{}", SHOT_ON_PREFIX, self.model)
    }
}

/// Format the exposure settings line.
pub fn format_details(meta: &ExposureMetadata) -> Result<String, MetadataError> {
    let zero_denominator = |tag: &'static str| MetadataError::MalformedTag {
        tag,
        reason: "zero denominator".into(),
    };
    let focal = meta
        .focal_length
        .floor()
        .ok_or_else(|| zero_denominator("FocalLength"))?;
    let aperture = meta
        .f_number
        .to_f64()
        .ok_or_else(|| zero_denominator("FNumber"))?;

    Ok([
        format!("{focal}mm"),
        format!("f/{aperture:.1}"),
        format!(
            "{}/{}s",
            meta.exposure_time.num, meta.exposure_time.denom
        ),
        format!("ISO{}", meta.iso),
    ]
    .join(FIELD_SEPARATOR))
}
