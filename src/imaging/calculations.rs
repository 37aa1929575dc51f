//! Pure calculation functions for frame layout and resizing.
//!
//! All functions here are pure and testable without any I/O or images.

/// Canvas sizes and anchor points of a framed photo.
///
/// ```text
/// ┌──────────────────────────────┐  ─┬─
/// │           border             │   │
/// │   ┌──────────────────────┐   │   │
/// │   │        image         │   │   │ framed_height
/// │   └──────────────────────┘   │   │
/// │           border             │   │
/// │        text_padding          │   │
/// ├──────────────────────────────┤  ─┴─   (caption_top = image_h + border + text_padding)
/// │     Shot on <model>          │
/// │     line_spacing             │       caption_height
/// │     23mm   f/2.8   ...       │
/// │        text_padding          │
/// └──────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Width of both canvases.
    pub canvas_width: u32,
    /// Height of the first canvas (image + border + padding).
    pub framed_height: u32,
    /// Height of the final canvas including the caption block.
    pub final_height: u32,
    /// Top-left corner where the source image is pasted.
    pub image_origin: (u32, u32),
    /// `y` where the first caption line starts.
    pub caption_top: u32,
}

/// Total height of the two caption lines and the gap between them.
pub fn caption_block_height(line1_height: u32, line2_height: u32, line_spacing: u32) -> u32 {
    line1_height + line2_height + line_spacing
}

/// Calculate the framed canvas layout for an image.
///
/// # Arguments
/// * `image` - Source dimensions after orientation correction (width, height)
/// * `border` - Uniform border width
/// * `text_padding` - Gap above and below the caption block
/// * `caption_height` - Height of the caption block, see [`caption_block_height`]
pub fn calculate_frame_geometry(
    image: (u32, u32),
    border: u32,
    text_padding: u32,
    caption_height: u32,
) -> FrameGeometry {
    let (img_w, img_h) = image;
    let framed_height = img_h + 2 * border + text_padding;

    FrameGeometry {
        canvas_width: img_w + 2 * border,
        framed_height,
        final_height: framed_height + caption_height + text_padding,
        image_origin: (border, border),
        caption_top: img_h + border + text_padding,
    }
}

/// Left offset that centers `content` within `container`.
///
/// Floors toward negative infinity, so content wider than the container
/// starts left of zero and overhangs both edges evenly.
pub fn center_offset(container: u32, content: u32) -> i32 {
    let diff = i64::from(container) - i64::from(content);
    diff.div_euclid(2) as i32
}

/// Scale dimensions so the longer edge becomes `long_edge`.
///
/// Both axes use the same ratio and are truncated independently, so the
/// short edge may drift by up to one pixel from the exact aspect ratio.
/// Neither axis drops below one pixel.
///
/// # Examples
/// ```
/// # use photo_framer::imaging::calculate_long_edge_dimensions;
/// assert_eq!(calculate_long_edge_dimensions((4000, 3000), 2000), (2000, 1500));
/// assert_eq!(calculate_long_edge_dimensions((1000, 1500), 2000), (1333, 2000));
/// ```
pub fn calculate_long_edge_dimensions(dimensions: (u32, u32), long_edge: u32) -> (u32, u32) {
    let (w, h) = dimensions;
    let longer = u64::from(w.max(h).max(1));
    // Integer math: the exact floor of `side * long_edge / longer`, free of
    // float error on the long side.
    let scale = |side: u32| (u64::from(side) * u64::from(long_edge) / longer) as u32;

    (scale(w).max(1), scale(h).max(1))
}
