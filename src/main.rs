//! magma - tripwire-style integrity snapshots of tracked paths.
//!
//! Usage:
//!   magma init               Create the application root and default files
//!   magma track <PATH>       Add a path to the track list
//!   magma untrack <PATH>     Remove a path from the track list
//!   magma snap [TAG...]      Snapshot every tracked path
//!   magma hash <PATH>        Print the hash tree of one path as JSON
//!   magma --help             Show help

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use magma_core::{AppPaths, BuildConfig, DEFAULT_ROOT, EntryOrder};
use magma_hash::{IgnoreMatcher, SnapshotWriter, TreeBuilder, clean_path};
use magma_track::{TrackList, TrackOutcome, UntrackOutcome, initialize, read_list_if_exists};

#[derive(Parser)]
#[command(
    name = "magma",
    version,
    about = "Tripwire-style integrity snapshots of tracked paths",
    long_about = "magma hashes every tracked path into a Merkle-style tree and writes \
                  the result to a snapshot named after the root digest.\n\n\
                  Run `magma init` once, add paths with `magma track`, then take \
                  snapshots with `magma snap`."
)]
struct Cli {
    /// Application root holding the track file, ignore file and snapshots
    #[arg(long, global = true, env = "MAGMA_ROOT", default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Visit directory entries sorted by name instead of in listing order
    #[arg(long, global = true)]
    sorted: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the application root, track file, ignore file and snapshots directory
    Init,

    /// Add a path to the track list
    Track {
        /// Path to track
        path: PathBuf,
    },

    /// Remove a path from the track list
    Untrack {
        /// Path to stop tracking
        path: PathBuf,
    },

    /// Snapshot every tracked path
    Snap {
        /// Tags appended to the snapshot file name, in order
        tags: Vec<String>,
    },

    /// Print the hash tree of a single path as JSON
    Hash {
        /// Path to hash
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = AppPaths::new(&cli.root);
    let entry_order = if cli.sorted {
        EntryOrder::Sorted
    } else {
        EntryOrder::Listing
    };

    match cli.command {
        Command::Init => run_init(&paths)?,
        Command::Track { path } => run_track(&paths, &path)?,
        Command::Untrack { path } => run_untrack(&paths, &path)?,
        Command::Snap { tags } => run_snap(&paths, entry_order, &tags)?,
        Command::Hash { path, output } => run_hash(&paths, entry_order, &path, output)?,
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Create the application layout.
fn run_init(paths: &AppPaths) -> Result<()> {
    let report = initialize(paths)
        .with_context(|| format!("Failed to initialize {}", paths.root.display()))?;

    if report.is_noop() {
        println!("Already initialized at {}", paths.root.display());
        return Ok(());
    }

    println!("Successfully initialized magma directory");
    for created in &report.created {
        println!("  created {}", created.display());
    }

    if let Some(lines) = &report.ignore_defaults {
        println!();
        println!("Ignore file created at {}", paths.ignore_file.display());
        println!("By default, the following paths are ignored:");
        for line in lines {
            println!("{line}");
        }
    }

    Ok(())
}

/// Add a path to the track list.
fn run_track(paths: &AppPaths, path: &Path) -> Result<()> {
    let path = absolute(path)?;
    let mut list = load_track_list(paths)?;

    match list.add(&path).context("Failed to track path")? {
        TrackOutcome::Added => {
            println!("Tracking {}", path.display());
            let config = build_config(paths, EntryOrder::default())?;
            if IgnoreMatcher::new(&config.ignore_patterns).is_ignored(&path) {
                println!("Warning: {} matches an ignore pattern and will be skipped", path.display());
            }
        }
        TrackOutcome::AlreadyTracked => println!("Path already exists in the track file"),
    }

    Ok(())
}

/// Remove a path from the track list.
fn run_untrack(paths: &AppPaths, path: &Path) -> Result<()> {
    let path = absolute(path)?;
    let mut list = load_track_list(paths)?;

    match list.remove(&path).context("Failed to untrack path")? {
        UntrackOutcome::Removed => println!("No longer tracking {}", path.display()),
        UntrackOutcome::NotTracked => println!("Path is not in the track file"),
    }

    Ok(())
}

/// Snapshot every tracked path into the snapshots directory.
fn run_snap(paths: &AppPaths, entry_order: EntryOrder, tags: &[String]) -> Result<()> {
    let list = load_track_list(paths)?;
    if list.is_empty() {
        warn!(track_file = %paths.track_file.display(), "No tracked paths");
    } else {
        info!(roots = list.len(), "Taking snapshot");
    }

    let writer = SnapshotWriter::new(TreeBuilder::new(&build_config(paths, entry_order)?));
    let snapshot = writer
        .snapshot(&paths.snapshots_dir, &list.paths(), tags)
        .context("Snapshot failed")?;

    println!("Snapshot saved to {}", snapshot.path.display());

    Ok(())
}

/// Hash a single path and print or write the tree.
fn run_hash(
    paths: &AppPaths,
    entry_order: EntryOrder,
    path: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let path = absolute(path)?;
    let builder = TreeBuilder::new(&build_config(paths, entry_order)?);

    let node = builder
        .build(&path)
        .with_context(|| format!("Failed to hash {}", path.display()))?;
    let json = serde_json::to_string_pretty(&node)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            eprintln!("Hash tree written to {}", output_path.display());
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// Assemble the build configuration from the ignore file.
fn build_config(paths: &AppPaths, entry_order: EntryOrder) -> Result<BuildConfig> {
    let ignore_patterns = read_list_if_exists(&paths.ignore_file)
        .context("Failed to read ignore file")?
        .unwrap_or_else(|| {
            warn!(
                ignore_file = %paths.ignore_file.display(),
                "Ignore file missing, nothing will be ignored"
            );
            Vec::new()
        });

    let config = BuildConfig::builder()
        .ignore_patterns(ignore_patterns)
        .entry_order(entry_order)
        .build()?;

    Ok(config)
}

/// Load the track file, pointing at `magma init` when it is missing.
fn load_track_list(paths: &AppPaths) -> Result<TrackList> {
    TrackList::load(&paths.track_file).with_context(|| {
        format!(
            "Failed to read track file {} (run `magma init` first)",
            paths.track_file.display()
        )
    })
}

/// Make a user-supplied path absolute and lexically clean.
fn absolute(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Invalid path {}", path.display()))?;
    Ok(clean_path(&absolute))
}
