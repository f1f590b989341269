use anyhow::Result;
use clap::Parser;
use icon_helper::{Cli, Plan, logger, run_batch};
use image_effect::{BitmapFontResolver, SystemFontResolver};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    let plan = Plan::from_cli(&cli)?;
    log::debug!("{plan:?}");

    if cli.builtin_font {
        run_batch(&plan, BitmapFontResolver)?;
    } else {
        run_batch(&plan, SystemFontResolver::new())?;
    }

    Ok(())
}
