//! Image processing: decode, frame, caption, resize, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` (JPEG) |
//! | **Orientation** | `DynamicImage::rotate90` / `rotate180` / `rotate270` |
//! | **Frame** | `imageops::overlay` onto a solid `RgbImage` |
//! | **Caption text** | `ab_glyph` faces drawn with `imageproc` |
//! | **Resize** | `imageops::resize` with `Lanczos3` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for layout math (unit testable)
//! - **Parameters**: Small value types shared by operations and backends
//! - **Backend**: [`TextBackend`] trait + [`FontBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod font_backend;
pub mod operations;
mod params;

pub use backend::{BackendError, TextBackend};
pub use calculations::{
    FrameGeometry, calculate_frame_geometry, calculate_long_edge_dimensions, center_offset,
};
pub use font_backend::FontBackend;
pub use operations::{
    FrameStyle, apply_orientation, compose_frame, resize_long_edge, save_jpeg,
};
pub use params::{FontWeight, Quality, TextExtent};
