//! List command

use anyhow::Result;
use cameo_core::BitDepth;
use cameo_cli::keys::key_for;
use cameo_ops::FilterId;

pub fn run(verbose: bool) -> Result<()> {
    println!("{:<4} {:<10} {}", "KEY", "FILTER", "KIND");
    for id in FilterId::ALL {
        let filter = id.build(BitDepth::U8)?;
        println!("{:<4} {:<10} {}", key_for(id), id.name(), filter.kind());
    }

    if verbose {
        println!();
        println!("space  screenshot");
        println!("tab    start/stop screencast");
        println!("esc    quit");
    }
    Ok(())
}
