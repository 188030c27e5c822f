//! Run command
//!
//! Headless capture session. Frames come from PNG files, a repeated still
//! or a synthetic pattern; key presses come from a script.

use crate::RunArgs;
use anyhow::{Context, Result};
use cameo_cli::{Cameo, CaptureManager, KeySource, NoKeys, ScriptedKeys, SessionConfig, WindowManager};
use cameo_io::{FrameSink, FrameSource, NullSink, PatternSource, PngSequenceSink, SequenceSource, StillSource};
use tracing::{debug, trace};

const WINDOW_NAME: &str = "Cameo";

pub fn run(args: RunArgs, verbose: bool) -> Result<()> {
    trace!(inputs = args.input.len(), frames = args.frames, "run::run");

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(filter) = &args.filter {
        config.initial_filter = filter.clone();
    }
    if args.no_mirror {
        config.mirror_preview = false;
    }
    if let Some(path) = &args.screenshot {
        config.screenshot_path = path.clone();
    }
    if let Some(path) = &args.screencast {
        config.screencast_path = path.clone();
    }
    debug!(?config, "session config");

    let source: Box<dyn FrameSource> = if let Some(still) = &args.still {
        Box::new(StillSource::new(super::load_frame(still)?, args.fps))
    } else if !args.input.is_empty() {
        Box::new(SequenceSource::open(args.input.clone(), args.fps).context("Failed to open input sequence")?)
    } else {
        let (w, h) = super::parse_size(&args.pattern)?;
        Box::new(PatternSource::new(w, h, args.fps)?)
    };

    let sink: Box<dyn FrameSink> = match &args.preview_dir {
        Some(dir) => Box::new(
            PngSequenceSink::new(dir, "preview")
                .with_context(|| format!("Failed to create preview dir: {}", dir.display()))?,
        ),
        None => Box::new(NullSink::new()),
    };
    let keys: Box<dyn KeySource> = match &args.keys {
        Some(script) => Box::new(script.parse::<ScriptedKeys>()?),
        None => Box::new(NoKeys),
    };

    if verbose {
        println!(
            "Running {}x{} session, filter {}",
            source.frame_width(),
            source.frame_height(),
            config.initial_filter
        );
    }

    let window = WindowManager::new(WINDOW_NAME, sink, keys);
    let capture = CaptureManager::new(source, config.mirror_preview);
    let mut cameo = Cameo::new(window, capture, &config)?;
    if args.frames > 0 {
        cameo = cameo.with_max_frames(args.frames);
    }
    let summary = cameo.run().context("Session failed")?;

    println!(
        "{} cycles, {} frames, {} screenshots, active filter {}",
        summary.cycles, summary.frames, summary.screenshots, summary.active_filter
    );
    Ok(())
}
