use crate::core::recorder::{LogStyle, Recorder};
use crate::core::sampler::AcsStatus;
use crate::core::session::{self, DrainConfig};
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::*;
use std::path::PathBuf;
use std::thread;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let log_path: PathBuf = matches
        .get_one::<String>("log-file")
        .context("log-file argument has a default")?
        .into();

    let config = DrainConfig { log_path };
    let mut sampler = AcsStatus::new();
    let mut recorder = Recorder::with_style(LogStyle::Drain);

    session::run_drain(&mut sampler, &mut recorder, &config, thread::sleep)
        .context("drain test aborted")?;

    println!("{}", "Drain threshold reached.".yellow());
    std::process::exit(1);
}
