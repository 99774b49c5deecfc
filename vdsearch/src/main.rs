use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vdsearch::cli::{Args, SubArgs};
use vdsearch::{ribozyme_filter, RibozymeFilterOptions};

fn main() {
    let start = std::time::Instant::now();
    let args: Args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    info!("Elapsed time: {:.3?}", start.elapsed());
}

fn run(args: Args) -> anyhow::Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .context("failed to set up thread pool")?;

    match args.command {
        SubArgs::RibozymeFilter { args } => {
            let opts = RibozymeFilterOptions::from(args);
            let tblout = opts.infernal_tblout.display().to_string();
            ribozyme_filter(&opts).with_context(|| format!("ribozyme filter failed on {}", tblout))?;
        }
    }

    Ok(())
}
