//! CLI entrypoint for `buildergen`.

mod cli;
mod logging;

use std::io::Write;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use buildergen::Generator;

use crate::cli::Args;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::init(args.verbose);
    run(&args).wrap_err("error while generating builder")
}

fn run(args: &Args) -> Result<()> {
    let generator = Generator::new(args.to_config());
    if args.should_print {
        let source = generator.render()?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(source.as_str().as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }
    let path = generator.generate()?;
    tracing::debug!(%path, "generation finished");
    Ok(())
}
