//! Frame configuration.
//!
//! Every knob of the framing pipeline lives in one immutable [`FrameConfig`]
//! value that is passed explicitly to [`annotate`](crate::annotate::annotate)
//! and [`annotate_folder`](crate::batch::annotate_folder). All fields have
//! defaults, so an in-process caller can start from `FrameConfig::default()`
//! and override with struct update syntax.
//!
//! ## Config File
//!
//! The CLI can load the same struct from a TOML file. Files are sparse:
//! override just the values you want.
//!
//! ```toml
//! border_width = 60
//! long_edge_size = 3000
//! second_line_color = "#555"
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Colors
//!
//! Colors are stored as strings and parsed by [`parse_color`]: a small set of
//! CSS names (`white`, `black`, `gray`, ...) or `#rgb` / `#rrggbb` hex.

use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Parameters for framing and captioning a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Uniform border around the source image, in pixels.
    pub border_width: u32,
    /// Fill color of the canvas and border.
    pub frame_color: String,
    /// Color of the "Shot on <model>" line.
    pub text_color: String,
    /// Color of the exposure settings line.
    pub second_line_color: String,
    /// Regular-weight TTF/OTF font.
    pub font_path: PathBuf,
    /// Bold-weight TTF/OTF font, used for the camera model.
    pub bold_font_path: PathBuf,
    /// Caption em size in pixels.
    pub font_size: f32,
    /// Vertical gap between the two caption lines.
    pub line_spacing: u32,
    /// Gap between the image and the caption, and below the caption.
    pub text_padding: u32,
    /// Length of the longer output edge after resizing.
    pub long_edge_size: u32,
    /// JPEG encoding quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            border_width: 100,
            frame_color: "white".to_string(),
            text_color: "black".to_string(),
            second_line_color: "#7a7a7a".to_string(),
            font_path: PathBuf::from("./fonts/Roboto-Regular.ttf"),
            bold_font_path: PathBuf::from("./fonts/Roboto-Bold.ttf"),
            font_size: 132.0,
            line_spacing: 72,
            text_padding: 150,
            long_edge_size: 2000,
            jpeg_quality: 75,
        }
    }
}

/// Upper bound for `border_width`, `text_padding` and `line_spacing`.
///
/// Keeps canvas sizes and draw offsets within `i32` for any decodable JPEG.
pub const MAX_SPACING: u32 = 100_000;

/// Upper bound for `font_size`, in pixels.
pub const MAX_FONT_SIZE: f32 = 10_000.0;

impl FrameConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("border_width", self.border_width),
            ("text_padding", self.text_padding),
            ("line_spacing", self.line_spacing),
        ] {
            if value > MAX_SPACING {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at most {MAX_SPACING}"
                )));
            }
        }
        if self.long_edge_size == 0 {
            return Err(ConfigError::Validation(
                "long_edge_size must be non-zero".into(),
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Validation(
                "font_size must be a positive number".into(),
            ));
        }
        if self.font_size > MAX_FONT_SIZE {
            return Err(ConfigError::Validation(format!(
                "font_size must be at most {MAX_FONT_SIZE}"
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Validation(
                "jpeg_quality must be 1-100".into(),
            ));
        }
        self.palette().map(|_| ())
    }

    /// Parse the three configured colors.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            frame: parse_color(&self.frame_color)?,
            text: parse_color(&self.text_color)?,
            second_line: parse_color(&self.second_line_color)?,
        })
    }
}

/// Resolved colors of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub frame: Rgb<u8>,
    pub text: Rgb<u8>,
    pub second_line: Rgb<u8>,
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("navy", [0, 0, 128]),
    ("ivory", [255, 255, 240]),
    ("beige", [245, 245, 220]),
];

/// Parse a color name or `#rgb` / `#rrggbb` hex string.
pub fn parse_color(value: &str) -> Result<Rgb<u8>, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::Validation(format!("invalid color: {value:?}"));

    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        return match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    rgb[i] = v * 17;
                }
                Ok(Rgb(rgb))
            }
            6 => Ok(Rgb([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ])),
            _ => Err(invalid()),
        };
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, rgb)| Rgb(*rgb))
        .ok_or_else(invalid)
}

/// Load a config file, filling unspecified keys with defaults.
///
/// Rejects unknown keys and validates the result.
pub fn load_config(path: &Path) -> Result<FrameConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: FrameConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-framer configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Uniform border around the photo, in pixels (before the final resize).
border_width = 100

# Colors: a CSS name (white, black, gray, ...) or #rgb / #rrggbb.
frame_color = "white"
text_color = "black"          # "Shot on <model>" line
second_line_color = "#7a7a7a" # focal length, aperture, shutter, ISO

# Fonts for the caption. The camera model uses the bold face.
font_path = "./fonts/Roboto-Regular.ttf"
bold_font_path = "./fonts/Roboto-Bold.ttf"

# Caption em size in pixels.
font_size = 132.0

# Gap between the two caption lines.
line_spacing = 72

# Gap between the photo and the caption, and below the caption.
text_padding = 150

# Longer edge of the final image, in pixels.
long_edge_size = 2000

# JPEG quality of the written file (1-100).
jpeg_quality = 75
"##
}
