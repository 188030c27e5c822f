//! Apply command
//!
//! One still through the session pipeline: edge stroke, then the filter.

use crate::ApplyArgs;
use anyhow::{Context, Result};
use cameo_core::BitDepth;
use cameo_ops::FilterId;
use cameo_ops::stroke::EdgeStroke;
use tracing::{info, trace};

pub fn run(args: ApplyArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), filter = %args.filter, "apply::run");

    let id: FilterId = args
        .filter
        .parse()
        .with_context(|| format!("Unknown filter '{}' (see `cameo list`)", args.filter))?;
    let filter = id.build(BitDepth::U8)?;
    let mut frame = super::load_frame(&args.input)?;

    info!(filter = %id, w = frame.width(), h = frame.height(), stroke = !args.no_stroke, "Applying filter");

    if verbose {
        println!("Applying {} to {}", id, args.input.display());
    }

    if !args.no_stroke {
        EdgeStroke::new(args.blur_ksize, args.edge_ksize)
            .context("Invalid edge stroke aperture")?
            .apply_in_place(&mut frame)
            .context("Edge stroke failed")?;
    }
    filter.apply_in_place(&mut frame)?;

    super::save_frame(&args.output, &frame)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
