//! cameo - camera filter pipeline
//!
//! Edge stroking plus film-curve, convolution and recolor filters, run
//! over still images or a headless capture session.

use anyhow::{Context, Result};
use cameo_ops::stroke::{DEFAULT_BLUR_KSIZE, DEFAULT_EDGE_KSIZE};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cameo")]
#[command(author, version, about = "Camera filter pipeline")]
#[command(long_about = "
Strokes edges and applies one of eleven filters to frames.

Examples:
  cameo list                                 # Filters and their keys
  cameo apply in.png -o out.png              # Portra look with edge stroke
  cameo apply in.png -o out.png -f emboss --no-stroke
  cameo run --pattern 640x480 -n 120         # Headless synthetic session
  cameo run -i a.png b.png c.png -k 'space,tab,3,none,tab,esc'
  cameo run --still face.png -c session.yaml --preview-dir preview/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List filters, key bindings and kinds
    #[command(visible_alias = "ls")]
    List,

    /// Run one still image through the pipeline
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Run a headless capture session
    #[command(visible_alias = "r")]
    Run(RunArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Input PNG
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Filter to apply (see `cameo list`)
    #[arg(short, long, default_value = "portra")]
    filter: String,

    /// Skip the edge stroke pass
    #[arg(long)]
    no_stroke: bool,

    /// Median blur size of the edge stroke (below 3 disables the blur)
    #[arg(long, default_value_t = DEFAULT_BLUR_KSIZE)]
    blur_ksize: usize,

    /// Laplacian size of the edge stroke
    #[arg(long, default_value_t = DEFAULT_EDGE_KSIZE)]
    edge_ksize: usize,
}

#[derive(Args)]
struct RunArgs {
    /// PNG frames played once, in order
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// PNG repeated as every frame
    #[arg(long, conflicts_with = "input")]
    still: Option<PathBuf>,

    /// Synthetic source size when no input is given
    #[arg(long, default_value = "320x240")]
    pattern: String,

    /// Source frame rate (0 = unknown, estimated while running)
    #[arg(long, default_value = "0")]
    fps: f64,

    /// Stop after this many cycles (0 = until esc or end of input)
    #[arg(short = 'n', long, default_value = "300")]
    frames: u64,

    /// Scripted key presses, one per cycle: space, tab, esc, none, or a character
    #[arg(short, long)]
    keys: Option<String>,

    /// Write preview frames as numbered PNGs here
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Session config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial filter
    #[arg(short, long)]
    filter: Option<String>,

    /// Show the preview unmirrored
    #[arg(long)]
    no_mirror: bool,

    /// Screenshot path
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Screencast path
    #[arg(long)]
    screencast: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::List => commands::list::run(cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Run(args) => commands::run::run(args, cli.verbose),
    }
}
