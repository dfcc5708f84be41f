mod cli;
mod config;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::Result;
use alloroute::workflows::route;
use clap::Parser;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;

    info!("🚀 Alloroute v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let request = config::build_request(&cli)?;
    info!(
        source = %request.source,
        target = %request.target,
        "Searching for up to {} route(s).",
        request.search.max_paths
    );

    let result = route::run(&request)?;
    for path in &result.paths {
        println!("{}  abs(w):{:3.2}", path.label, path.weight.abs());
    }

    info!("✅ Found {} route(s).", result.paths.len());
    Ok(())
}
