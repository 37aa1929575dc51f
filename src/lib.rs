//! # Photo Framer
//!
//! Frames JPEG photographs for sharing: a uniform border, a two-line caption
//! built from the camera's EXIF data, and a resample to a fixed long edge.
//!
//! ```text
//! ┌────────────────────────────┐
//! │ ┌────────────────────────┐ │
//! │ │                        │ │
//! │ │         photo          │ │
//! │ │                        │ │
//! │ └────────────────────────┘ │
//! │                            │
//! │      Shot on **X100V**     │
//! │ 23mm   f/2.8   1/250s   ISO400
//! └────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! ```text
//! decode ─▶ orient ─▶ read EXIF ─▶ compose frame + caption ─▶ resize ─▶ JPEG
//! ```
//!
//! [`annotate::annotate`] runs this for one file; [`batch::annotate_folder`]
//! runs it for every JPEG directly inside a folder.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`annotate`] | Single-image pipeline, outcomes, errors and progress events |
//! | [`batch`] | Folder driver: listing, output naming, failure policy |
//! | [`caption`] | Caption text from exposure metadata |
//! | [`config`] | `FrameConfig` defaults, TOML loading, validation, colors |
//! | [`metadata`] | EXIF reading: orientation and exposure settings |
//! | [`imaging`] | Layout math, text backends, compose / resize / encode |
//! | [`output`] | CLI output formatting of progress events |
//!
//! # Design Decisions
//!
//! ## Missing Metadata Is an Error
//!
//! A photo without a camera model, ISO, shutter, focal length or aperture has no
//! caption to draw, so it is not written at all. The error names the first
//! missing tag. In a folder run, [`batch::BatchPolicy`] decides whether that
//! stops the run or is recorded and skipped over.
//!
//! ## Non-JPEG Input Is Skipped
//!
//! Input format is sniffed from content, not the extension. Anything that
//! decodes as another format is reported and left alone.
//!
//! ## Text Rendering Behind a Trait
//!
//! Caption text goes through [`imaging::TextBackend`]. The production backend
//! rasterizes TTF/OTF fonts; tests use a block-glyph renderer so layout can be
//! checked exactly and without font files.

pub mod annotate;
pub mod batch;
pub mod caption;
pub mod config;
pub mod imaging;
pub mod metadata;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
