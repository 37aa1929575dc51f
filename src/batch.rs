//! Folder batch driver.
//!
//! Frames every `.jpg` / `.jpeg` file directly inside a folder, writing
//! `<stem>F.jpg` next to each source:
//!
//! ```text
//! trip/                      trip/
//! ├── a.jpg          ──▶     ├── a.jpg
//! ├── B.JPEG                 ├── aF.jpg
//! ├── notes.txt              ├── B.JPEG
//! └── raw/                   ├── BF.jpg
//!                            ├── notes.txt     (ignored)
//!                            └── raw/          (ignored, not descended)
//! ```
//!
//! The listing is taken before any file is written, so outputs created by the
//! run are not picked up by the same run. Entries are processed in the order
//! the filesystem returns them. A folder that cannot be listed is reported as
//! an event and yields an empty summary. What happens when one file fails is
//! chosen by [`BatchPolicy`].

use crate::annotate::{
    AnnotateError, AnnotateOutcome, FrameEvent, annotate, annotate_with_backend, emit,
};
use crate::config::FrameConfig;
use crate::imaging::TextBackend;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Suffix appended to the source stem to name the framed copy.
pub const OUTPUT_SUFFIX: &str = "F.jpg";

/// What to do when a file in the batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Stop at the first failure and return its error.
    #[default]
    AbortOnError,
    /// Record the failure and carry on with the next file.
    ContinueOnError,
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
    pub ignored: usize,
    /// Sources that failed under [`BatchPolicy::ContinueOnError`], with the error text.
    pub failed: Vec<(PathBuf, String)>,
}

/// Output path for a batch source, or `None` if the name is not `.jpg`/`.jpeg`.
///
/// The extension match is case-insensitive; the stem keeps its case.
///
/// ```
/// # use photo_framer::batch::output_path_for;
/// # use std::path::{Path, PathBuf};
/// assert_eq!(output_path_for(Path::new("trip/IMG_01.JPG")), Some(PathBuf::from("trip/IMG_01F.jpg")));
/// assert_eq!(output_path_for(Path::new("trip/notes.txt")), None);
/// ```
pub fn output_path_for(source: &Path) -> Option<PathBuf> {
    let name = source.file_name()?.to_string_lossy().to_lowercase();
    if !(name.ends_with(".jpg") || name.ends_with(".jpeg")) {
        return None;
    }
    Some(framed_path(source))
}

/// `<stem>F.jpg` beside `source`, whatever its extension. The stem is kept
/// byte for byte, including names that are not valid UTF-8.
pub fn framed_path(source: &Path) -> PathBuf {
    let mut name = source.file_stem().map(OsStr::to_os_string).unwrap_or_default();
    name.push(OUTPUT_SUFFIX);
    source.with_file_name(name)
}

/// Frame every JPEG directly inside `folder`, loading fonts per file.
pub fn annotate_folder(
    folder: &Path,
    config: &FrameConfig,
    policy: BatchPolicy,
    events: Option<&Sender<FrameEvent>>,
) -> Result<BatchSummary, AnnotateError> {
    run_batch(folder, policy, events, |source, dest| {
        annotate(source, dest, config, events)
    })
}

/// Like [`annotate_folder`], drawing text with the given backend.
pub fn annotate_folder_with_backend(
    folder: &Path,
    config: &FrameConfig,
    policy: BatchPolicy,
    backend: &impl TextBackend,
    events: Option<&Sender<FrameEvent>>,
) -> Result<BatchSummary, AnnotateError> {
    run_batch(folder, policy, events, |source, dest| {
        annotate_with_backend(source, dest, config, backend, events)
    })
}

fn run_batch(
    folder: &Path,
    policy: BatchPolicy,
    events: Option<&Sender<FrameEvent>>,
    mut annotate_one: impl FnMut(&Path, &Path) -> Result<AnnotateOutcome, AnnotateError>,
) -> Result<BatchSummary, AnnotateError> {
    let mut summary = BatchSummary::default();

    let entries = match list_entries(folder) {
        Ok(entries) => entries,
        Err(e) => {
            emit(
                events,
                FrameEvent::FolderUnreadable {
                    folder: folder.to_path_buf(),
                    reason: e.to_string(),
                },
            );
            return Ok(summary);
        }
    };
    tracing::debug!(folder = %folder.display(), entries = entries.len(), "listed batch folder");

    for (path, is_dir) in entries {
        let dest = match output_path_for(&path) {
            Some(dest) if !is_dir => dest,
            _ => {
                summary.ignored += 1;
                emit(events, FrameEvent::Ignored { path });
                continue;
            }
        };

        match annotate_one(&path, &dest) {
            Ok(AnnotateOutcome::Written(_)) => summary.written += 1,
            Ok(AnnotateOutcome::Skipped(_)) => summary.skipped += 1,
            Err(e) => match policy {
                BatchPolicy::AbortOnError => return Err(e),
                BatchPolicy::ContinueOnError => {
                    emit(
                        events,
                        FrameEvent::Failed {
                            source: path.clone(),
                            error: e.to_string(),
                        },
                    );
                    summary.failed.push((path, e.to_string()));
                }
            },
        }
    }

    emit(events, FrameEvent::BatchFinished(summary.clone()));
    Ok(summary)
}

/// Snapshot of a folder's entries as `(path, is_dir)`.
fn list_entries(folder: &Path) -> std::io::Result<Vec<(PathBuf, bool)>> {
    fs::read_dir(folder)?
        .map(|entry| {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            Ok((entry.path(), is_dir))
        })
        .collect()
}
