//! Single-image annotation.
//!
//! Turns one photo into a framed, captioned, resized JPEG:
//!
//! ```text
//! open ─▶ sniff format ─▶ decode ─▶ orientation ─▶ EXIF caption ─▶ compose ─▶ resize ─▶ save
//!              │                        │               │
//!              └ not JPEG: skip         └ unreadable:   └ missing / malformed tag:
//!                (Ok(Skipped))            warn, upright   fatal (Err)
//! ```
//!
//! ## Outcomes
//!
//! - [`AnnotateOutcome::Written`]: exactly one file written to `dest`.
//! - [`AnnotateOutcome::Skipped`]: the source decodes as another format;
//!   nothing written.
//! - `Err(AnnotateError)`: missing caption tags, I/O, decode, font or config
//!   failures. Nothing written unless the failure happened while writing.
//!
//! Progress is reported as [`FrameEvent`]s on an optional channel, the same
//! way the CLI's printer thread consumes them.

use crate::caption::Caption;
use crate::config::{ConfigError, FrameConfig};
use crate::imaging::{
    BackendError, FontBackend, FrameStyle, Quality, TextBackend, apply_orientation,
    compose_frame, resize_long_edge, save_jpeg,
};
use crate::metadata::{ExposureMetadata, MetadataError, Orientation, read_exif};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Cannot caption {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: MetadataError,
    },
    #[error("Rendering failed: {0}")]
    Backend(#[from] BackendError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Why a source produced no output without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotJpeg { format: ImageFormat },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotJpeg { format } => write!(f, "not a JPEG ({format:?})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotateOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

/// Progress reported while framing photos.
#[derive(Debug, Clone)]
pub enum FrameEvent {
    /// A framed image was saved.
    Written { source: PathBuf, dest: PathBuf },
    /// The source was left alone.
    Skipped { source: PathBuf, reason: SkipReason },
    /// The orientation tag could not be read; the image was framed as stored.
    OrientationFallback { source: PathBuf, reason: String },
    /// A folder entry that is not a `.jpg`/`.jpeg` file.
    Ignored { path: PathBuf },
    /// The batch folder could not be listed.
    FolderUnreadable { folder: PathBuf, reason: String },
    /// A file failed and the batch carried on.
    Failed { source: PathBuf, error: String },
    /// A batch ran to completion.
    BatchFinished(crate::batch::BatchSummary),
}

pub(crate) fn emit(events: Option<&Sender<FrameEvent>>, event: FrameEvent) {
    tracing::debug!(?event, "frame event");
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}

/// Frame and caption `source`, writing a JPEG to `dest`.
///
/// Fonts are loaded from `config.font_path` / `config.bold_font_path` for
/// this call only, after the source has been accepted.
pub fn annotate(
    source: &Path,
    dest: &Path,
    config: &FrameConfig,
    events: Option<&Sender<FrameEvent>>,
) -> Result<AnnotateOutcome, AnnotateError> {
    config.validate()?;
    let photo = match load_photo(source, events)? {
        Loaded::Photo(photo) => photo,
        Loaded::Skipped(reason) => return Ok(AnnotateOutcome::Skipped(reason)),
    };
    let backend = FontBackend::load(&config.font_path, &config.bold_font_path, config.font_size)?;
    render(source, &photo, dest, config, &backend, events)
}

/// Like [`annotate`], drawing text with the given backend instead of loading
/// the configured fonts.
pub fn annotate_with_backend(
    source: &Path,
    dest: &Path,
    config: &FrameConfig,
    backend: &impl TextBackend,
    events: Option<&Sender<FrameEvent>>,
) -> Result<AnnotateOutcome, AnnotateError> {
    config.validate()?;
    match load_photo(source, events)? {
        Loaded::Photo(photo) => render(source, &photo, dest, config, backend, events),
        Loaded::Skipped(reason) => Ok(AnnotateOutcome::Skipped(reason)),
    }
}

/// A decoded, upright photo with its caption.
struct Photo {
    image: DynamicImage,
    caption: Caption,
}

enum Loaded {
    Photo(Photo),
    Skipped(SkipReason),
}

fn load_photo(
    source: &Path,
    events: Option<&Sender<FrameEvent>>,
) -> Result<Loaded, AnnotateError> {
    let io_err = |e| AnnotateError::Io {
        path: source.to_path_buf(),
        source: e,
    };
    let reader = ImageReader::open(source)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;

    // Unrecognised content falls through to decode(), which reports it.
    if let Some(format) = reader.format().filter(|f| *f != ImageFormat::Jpeg) {
        let reason = SkipReason::NotJpeg { format };
        emit(
            events,
            FrameEvent::Skipped {
                source: source.to_path_buf(),
                reason: reason.clone(),
            },
        );
        return Ok(Loaded::Skipped(reason));
    }

    let image = reader.decode().map_err(|e| AnnotateError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    let parsed = read_exif(source);
    let orientation = match &parsed {
        Ok(exif) => Orientation::from_exif(exif),
        Err(e) => Err(MetadataError::MalformedTag {
            tag: "Orientation",
            reason: e.to_string(),
        }),
    };
    let orientation = match orientation {
        Ok(orientation) => orientation,
        // No EXIF block at all: nothing to correct, and the caption step reports it.
        Err(_) if matches!(&parsed, Err(MetadataError::Exif(exif::Error::NotFound(_)))) => {
            Orientation::Upright
        }
        Err(e) => {
            emit(
                events,
                FrameEvent::OrientationFallback {
                    source: source.to_path_buf(),
                    reason: e.to_string(),
                },
            );
            Orientation::Upright
        }
    };
    let image = apply_orientation(image, orientation);

    let metadata_err = |e| AnnotateError::Metadata {
        path: source.to_path_buf(),
        source: e,
    };
    let exif = parsed.map_err(metadata_err)?;
    let metadata = ExposureMetadata::from_exif(&exif).map_err(metadata_err)?;
    let caption = Caption::from_metadata(&metadata).map_err(metadata_err)?;

    Ok(Loaded::Photo(Photo { image, caption }))
}

fn render(
    source: &Path,
    photo: &Photo,
    dest: &Path,
    config: &FrameConfig,
    backend: &impl TextBackend,
    events: Option<&Sender<FrameEvent>>,
) -> Result<AnnotateOutcome, AnnotateError> {
    let style = FrameStyle::from_config(config)?;
    let canvas = compose_frame(&photo.image, &photo.caption, &style, backend);
    let resized = resize_long_edge(&canvas, config.long_edge_size);
    tracing::debug!(
        from = ?canvas.dimensions(),
        to = ?resized.dimensions(),
        "resized framed canvas"
    );

    save_jpeg(&resized, dest, Quality::new(config.jpeg_quality))?;
    emit(
        events,
        FrameEvent::Written {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
        },
    );
    Ok(AnnotateOutcome::Written(dest.to_path_buf()))
}
