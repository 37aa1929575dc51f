//! CLI output formatting for framing events.
//!
//! # Output Format
//!
//! ## Single image
//!
//! ```text
//! Framed trip/a.jpg
//!     Saved: trip/aF.jpg
//! ```
//!
//! ## Folder
//!
//! ```text
//! Framed trip/a.jpg
//!     Saved: trip/aF.jpg
//! Ignored trip/notes.txt
//! Skipped trip/scan.jpg (not a JPEG (Png))
//! Failed trip/b.jpg
//!     Error: Cannot caption trip/b.jpg: missing EXIF tag Model
//!
//! Framed 1 image, skipped 1, ignored 1, failed 1
//! ```
//!
//! Warnings and errors that are not tied to a finished image
//! (`OrientationFallback`, `FolderUnreadable`) are prefixed with `Warning:`.
//!
//! # Architecture
//!
//! [`format_event`] returns `Vec<String>` for testability and [`print_event`]
//! writes those lines to stdout. Format functions are pure, no I/O.

use crate::annotate::FrameEvent;
use crate::batch::BatchSummary;

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Format a single framing event as display lines.
pub fn format_event(event: &FrameEvent) -> Vec<String> {
    match event {
        FrameEvent::Written { source, dest } => vec![
            format!("Framed {}", source.display()),
            format!("    Saved: {}", dest.display()),
        ],
        FrameEvent::Skipped { source, reason } => {
            vec![format!("Skipped {} ({})", source.display(), reason)]
        }
        FrameEvent::OrientationFallback { source, reason } => vec![
            format!(
                "Warning: could not read orientation of {}, using it as stored",
                source.display()
            ),
            format!("    Reason: {reason}"),
        ],
        FrameEvent::Ignored { path } => vec![format!("Ignored {}", path.display())],
        FrameEvent::FolderUnreadable { folder, reason } => vec![format!(
            "Warning: cannot list folder {}: {}",
            folder.display(),
            reason
        )],
        FrameEvent::Failed { source, error } => vec![
            format!("Failed {}", source.display()),
            format!("    Error: {error}"),
        ],
        FrameEvent::BatchFinished(summary) => format_summary(summary),
    }
}

/// Closing lines of a folder run.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    let mut line = format!(
        "Framed {}, skipped {}, ignored {}",
        plural(summary.written, "image"),
        summary.skipped,
        summary.ignored
    );
    if !summary.failed.is_empty() {
        line.push_str(&format!(", failed {}", summary.failed.len()));
    }
    vec![String::new(), line]
}

pub fn print_event(event: &FrameEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}
