use crate::core::sampler::AcsStatus;
use crate::core::service::{self, SystemctlService};
use crate::core::session::{self, CompareConfig};
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::*;
use std::path::PathBuf;
use std::thread;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let output_dir: PathBuf = matches
        .get_one::<String>("output-dir")
        .context("output-dir argument has a default")?
        .into();
    let unit = matches
        .get_one::<String>("unit")
        .context("unit argument has a default")?
        .clone();

    // Interrupted runs must still release the service before exiting
    let handler_unit = unit.clone();
    ctrlc::set_handler(move || {
        println!();
        println!("{}", "Test interrupted. Cleaning up...".yellow().bold());
        service::stop_unit_blocking(&handler_unit);
        std::process::exit(0);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let config = CompareConfig { output_dir };
    let mut sampler = AcsStatus::new();
    let mut service = SystemctlService::new(&unit);

    session::run_compare(&mut sampler, &mut service, &config, &mut thread::sleep)?;
    Ok(())
}
