//! TrueType text backend: `ab_glyph` faces drawn with `imageproc`.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Load face | `ab_glyph::FontVec::try_from_vec` |
//! | Measure run | `imageproc::drawing::text_size` (width), glyph bounds (height) |
//! | Draw run | `imageproc::drawing::draw_text_mut` |
//!
//! `draw_text_mut` places every glyph on a baseline one ascent below `y`, so
//! a run's height is measured as the bottom of its ink relative to that same
//! origin, ascent offset included. Caption lines are stacked by that height.
//!
//! Font files are read when the backend is built and released when it is
//! dropped; the annotator builds one per call.

use super::backend::{BackendError, TextBackend};
use super::params::{FontWeight, TextExtent};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

/// Regular and bold faces at one em size.
pub struct FontBackend {
    regular: FontVec,
    bold: FontVec,
    regular_scale: PxScale,
    bold_scale: PxScale,
}

impl FontBackend {
    /// Load both faces from disk, sized so one em spans `em_px` pixels.
    pub fn load(regular: &Path, bold: &Path, em_px: f32) -> Result<Self, BackendError> {
        let regular_font = load_font(regular)?;
        let bold_font = load_font(bold)?;
        Ok(Self {
            regular_scale: em_scale(&regular_font, em_px),
            bold_scale: em_scale(&bold_font, em_px),
            regular: regular_font,
            bold: bold_font,
        })
    }

    fn face(&self, weight: FontWeight) -> (&FontVec, PxScale) {
        match weight {
            FontWeight::Regular => (&self.regular, self.regular_scale),
            FontWeight::Bold => (&self.bold, self.bold_scale),
        }
    }
}

fn load_font(path: &Path) -> Result<FontVec, BackendError> {
    let data = std::fs::read(path)?;
    FontVec::try_from_vec(data).map_err(|e| BackendError::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// `ab_glyph` scales by ascent-to-descent height; convert an em size into that.
fn em_scale(font: &FontVec, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(em_px * font.height_unscaled() / upem),
        _ => PxScale::from(em_px),
    }
}

/// Lowest ink row of a run below the draw origin, laid out the way
/// `draw_text_mut` lays it out.
fn ink_bottom(font: &FontVec, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0;
    let mut bottom = 0.0f32;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        if let Some(outlined) = font.outline_glyph(glyph) {
            bottom = bottom.max(outlined.px_bounds().max.y);
        }
    }
    bottom.ceil() as u32
}

impl TextBackend for FontBackend {
    fn measure(&self, text: &str, weight: FontWeight) -> TextExtent {
        let (font, scale) = self.face(weight);
        let (width, _) = text_size(scale, font, text);
        TextExtent {
            width,
            height: ink_bottom(font, scale, text),
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
        let (font, scale) = self.face(weight);
        draw_text_mut(canvas, color, x, y, scale, font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture_font(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures/fonts")
            .join(name)
    }

    fn dejavu(em_px: f32) -> FontBackend {
        FontBackend::load(
            &fixture_font("DejaVuSans.ttf"),
            &fixture_font("DejaVuSans-Bold.ttf"),
            em_px,
        )
        .unwrap()
    }

    /// Scaled ascent of the regular face, in pixels.
    fn ascent(backend: &FontBackend) -> f32 {
        backend.regular.as_scaled(backend.regular_scale).ascent()
    }

    #[test]
    fn em_scale_sizes_face_by_em() {
        // DejaVu Sans: ascender 1901 of 2048 units per em
        let backend = dejavu(100.0);
        let ascent = ascent(&backend);
        assert!((ascent - 92.8).abs() < 0.1, "ascent {ascent}");
    }

    #[test]
    fn measure_height_includes_ascent_offset() {
        let backend = dejavu(100.0);
        let ascent = ascent(&backend);

        // Flat-bottomed capitals end on the baseline, one ascent below the origin
        let caps = backend.measure("H", FontWeight::Regular);
        assert!(
            (ascent.floor() as u32..=ascent.ceil() as u32 + 1).contains(&caps.height),
            "height {} vs ascent {ascent}",
            caps.height
        );
    }

    #[test]
    fn measure_height_grows_with_descenders() {
        let backend = dejavu(100.0);
        let plain = backend.measure("Shot on", FontWeight::Regular);
        let descending = backend.measure("1/250s   jpg", FontWeight::Regular);
        assert!(descending.height > plain.height);

        let descent = backend.regular.as_scaled(backend.regular_scale).descent();
        assert!(descending.height as f32 <= ascent(&backend) - descent + 1.0);
    }

    #[test]
    fn measure_scales_with_em_size() {
        let small = dejavu(50.0).measure("X100V", FontWeight::Regular);
        let large = dejavu(100.0).measure("X100V", FontWeight::Regular);
        assert!(large.width.abs_diff(small.width * 2) <= 2);
        assert!(large.height.abs_diff(small.height * 2) <= 2);
    }

    #[test]
    fn measure_bold_face_is_wider() {
        let backend = dejavu(60.0);
        let regular = backend.measure("X100V", FontWeight::Regular);
        let bold = backend.measure("X100V", FontWeight::Bold);
        assert!(bold.width > regular.width);
    }

    #[test]
    fn measure_empty_run_is_zero() {
        let backend = dejavu(60.0);
        assert_eq!(backend.measure("", FontWeight::Regular), TextExtent::default());
    }

    #[test]
    fn draw_inks_within_measured_box() {
        let backend = dejavu(40.0);
        let (x, y) = (10, 20);
        let extent = backend.measure("Hg", FontWeight::Regular);
        let mut canvas = RgbImage::from_pixel(120, 100, Rgb([255, 255, 255]));

        backend.draw(&mut canvas, "Hg", FontWeight::Regular, x, y, Rgb([0, 0, 0]));

        let inked: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 128)
            .map(|(px, py, _)| (px, py))
            .collect();
        assert!(!inked.is_empty());

        let top = inked.iter().map(|&(_, py)| py).min().unwrap();
        let bottom = inked.iter().map(|&(_, py)| py).max().unwrap();
        let right = inked.iter().map(|&(px, _)| px).max().unwrap();
        // Ink starts below the origin and its lowest row sits at the measured bottom
        assert!(top > y as u32);
        assert!(bottom < y as u32 + extent.height);
        assert!(bottom + 3 >= y as u32 + extent.height);
        assert!(right <= x as u32 + extent.width + 1);
    }

    #[test]
    fn load_missing_font_is_io_error() {
        let result = FontBackend::load(
            Path::new("/nonexistent/Regular.ttf"),
            Path::new("/nonexistent/Bold.ttf"),
            12.0,
        );
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn load_invalid_font_data_is_font_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let result = FontBackend::load(&path, &path, 12.0);
        match result {
            Err(BackendError::Font { path: p, .. }) => assert_eq!(p, path),
            Err(other) => panic!("expected font error, got {other}"),
            Ok(_) => panic!("expected font error, got a backend"),
        }
    }
}
