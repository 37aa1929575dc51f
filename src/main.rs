use clap::{Parser, Subcommand};
use photo_framer::annotate::{self, FrameEvent};
use photo_framer::batch::{self, BatchPolicy};
use photo_framer::{config, output};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photo-framer")]
#[command(about = "Frame and caption JPEG photos with their EXIF settings")]
#[command(long_about = "\
Frame and caption JPEG photos with their EXIF settings

Each photo gets a uniform border and a two-line caption:

  Shot on <camera model>
  <focal>mm   f/<aperture>   <shutter>s   ISO<iso>

and is resized so its longer edge is `long_edge_size` pixels.

Photos without a camera model, ISO, shutter, focal length or aperture in
their EXIF data are not framed. Files that are not JPEGs are skipped.

Run 'photo-framer gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults are used for missing keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Frame a single photo
    Frame {
        /// Source JPEG
        source: PathBuf,
        /// Output path (defaults to <stem>F.jpg next to the source)
        dest: Option<PathBuf>,
    },
    /// Frame every .jpg/.jpeg directly inside a folder
    Folder {
        /// Folder to process (not recursive)
        dir: PathBuf,
        /// Record failures and continue instead of stopping at the first one
        #[arg(long)]
        keep_going: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let frame_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::FrameConfig::default(),
    };

    match cli.command {
        Command::Frame { source, dest } => {
            let dest = dest.unwrap_or_else(|| batch::framed_path(&source));
            let (tx, printer) = spawn_printer();
            let result = annotate::annotate(&source, &dest, &frame_config, Some(&tx));
            finish_printer(tx, printer);
            result?;
        }
        Command::Folder { dir, keep_going } => {
            let policy = if keep_going {
                BatchPolicy::ContinueOnError
            } else {
                BatchPolicy::AbortOnError
            };
            let (tx, printer) = spawn_printer();
            let result = batch::annotate_folder(&dir, &frame_config, policy, Some(&tx));
            finish_printer(tx, printer);
            let summary = result?;
            if !summary.failed.is_empty() {
                return Err(format!("{} photo(s) failed", summary.failed.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print events on a separate thread as they arrive.
fn spawn_printer() -> (Sender<FrameEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });
    (tx, printer)
}

fn finish_printer(tx: Sender<FrameEvent>, printer: JoinHandle<()>) {
    drop(tx);
    if printer.join().is_err() {
        tracing::warn!("event printer thread panicked");
    }
}

