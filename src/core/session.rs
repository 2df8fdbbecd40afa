use crate::core::chart;
use crate::core::phase::{
    self, ComparePhase, DrainPhase, COMPARE_POLL, DISCHARGE_START_PERCENT, DRAIN_POLL,
    RECHARGE_PERCENT, SERVICE_SETTLE,
};
use crate::core::recorder::{self, LogStyle, Recorder};
use crate::core::sampler::{PowerStatus, Reading};
use crate::core::service::{ServiceControl, ServiceGuard};
use crate::error::Result;
use chrono::{DateTime, Local};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct DrainConfig {
    /// Plain-text log the drain test appends to, row by row
    pub log_path: PathBuf,
}

pub struct CompareConfig {
    /// Directory receiving the per-run CSV and chart files
    pub output_dir: PathBuf,
}

/// Trigger-and-drain session: wait for the arming threshold, then log every
/// sample until the battery drains to the end threshold.
///
/// Sample errors are fatal here and abort the loop. Returns once the end
/// threshold is reached; the caller decides the process exit status.
pub fn run_drain<S, F>(
    sampler: &mut S,
    recorder: &mut Recorder,
    config: &DrainConfig,
    mut sleep: F,
) -> Result<()>
where
    S: PowerStatus,
    F: FnMut(Duration),
{
    let mut current = DrainPhase::Idle;
    loop {
        match current {
            DrainPhase::Idle => {
                let reading = sampler.sample()?;
                current = phase::drain_step(current, &reading);
                if current == DrainPhase::Draining {
                    // Arming reading starts the test immediately, no extra idle poll
                    record_row(recorder, &config.log_path, &reading, "Test Started!")?;
                } else {
                    println!("{}", "Waiting to start test...".dimmed());
                    sleep(DRAIN_POLL);
                }
            }
            DrainPhase::Draining => {
                let reading = sampler.sample()?;
                current = phase::drain_step(current, &reading);
                if current == DrainPhase::Ended {
                    record_row(recorder, &config.log_path, &reading, "Test ended!")?;
                    return Ok(());
                }
                record_row(recorder, &config.log_path, &reading, "Running...")?;
                sleep(DRAIN_POLL);
            }
            DrainPhase::Ended => return Ok(()),
        }
    }
}

fn record_row(
    recorder: &mut Recorder,
    log_path: &Path,
    reading: &Reading,
    message: &str,
) -> Result<()> {
    recorder.record(reading, false, message);
    if let Some(record) = recorder.last() {
        recorder::append_log(log_path, record)?;
    }
    Ok(())
}

/// One comparison run: put the service in the requested state, wait for the
/// battery to discharge past the start threshold, then record every sample
/// until the end threshold.
///
/// The service is held by a guard for the duration of the run, so it is
/// stopped on every exit path. Sample errors are logged and retried after a
/// full poll interval.
pub fn run_battery_test<S, C, F>(
    sampler: &mut S,
    service: &mut C,
    with_service: bool,
    sleep: &mut F,
) -> Result<Recorder>
where
    S: PowerStatus,
    C: ServiceControl,
    F: FnMut(Duration),
{
    let mut recorder = Recorder::with_style(LogStyle::Compare);
    let _guard = ServiceGuard::acquire(service, with_service)?;
    sleep(SERVICE_SETTLE);

    match sampler.sample() {
        Ok(reading) => recorder.record(&reading, with_service, "Test started"),
        Err(e) => log::error!("Error getting battery info: {}", e),
    }

    let mut current = ComparePhase::ChargeWait;
    while current != ComparePhase::Done {
        let reading = match sampler.sample() {
            Ok(reading) => reading,
            Err(e) => {
                log::error!("Error getting battery info: {}", e);
                sleep(COMPARE_POLL);
                continue;
            }
        };

        let next = phase::compare_step(current, &reading);
        match current {
            ComparePhase::ChargeWait => {
                if next == ComparePhase::Sampling {
                    // Discharge threshold crossed; sample immediately
                    current = next;
                    continue;
                }
                println!(
                    "Waiting for battery to reach {}%... Current: {}%",
                    DISCHARGE_START_PERCENT, reading.battery
                );
                sleep(COMPARE_POLL);
            }
            ComparePhase::Sampling => {
                recorder.record(&reading, with_service, "");
                if next == ComparePhase::Done {
                    recorder.record(&reading, with_service, "Test ended");
                    current = ComparePhase::Done;
                } else {
                    sleep(COMPARE_POLL);
                }
            }
            ComparePhase::Done => {}
        }
    }

    Ok(recorder)
}

/// File stem for one run's CSV/PNG pair.
pub fn run_basename(stamp: DateTime<Local>, with_service: bool) -> String {
    format!(
        "battery_test_{}_{}_acs",
        stamp.format("%Y%m%d_%H%M%S"),
        if with_service { "with" } else { "without" }
    )
}

/// Persist one run as a CSV table plus a rendered chart, both tagged with the
/// run condition and a timestamp.
pub fn persist_run(
    recorder: &Recorder,
    config: &CompareConfig,
    with_service: bool,
) -> Result<(PathBuf, PathBuf)> {
    let base = config.output_dir.join(run_basename(Local::now(), with_service));
    let csv_path = base.with_extension("csv");
    let png_path = base.with_extension("png");

    recorder.save_csv(&csv_path)?;
    chart::render(recorder.records(), &png_path)?;

    Ok((csv_path, png_path))
}

/// Full dual-run comparison: one run with the service, a recharge pause, one
/// run without it.
pub fn run_compare<S, C, F>(
    sampler: &mut S,
    service: &mut C,
    config: &CompareConfig,
    sleep: &mut F,
) -> Result<()>
where
    S: PowerStatus,
    C: ServiceControl,
    F: FnMut(Duration),
{
    fs::create_dir_all(&config.output_dir)?;

    println!("{}", "Starting battery test with ACS...".bold());
    let recorder = run_battery_test(sampler, service, true, sleep)?;
    persist_run(&recorder, config, true)?;

    println!(
        "\nWaiting for battery to charge back to {}%...",
        RECHARGE_PERCENT
    );
    loop {
        let reading = match sampler.sample() {
            Ok(reading) => reading,
            Err(e) => {
                log::error!("Error getting battery info: {}", e);
                sleep(COMPARE_POLL);
                continue;
            }
        };
        if phase::recharged(&reading) {
            break;
        }
        println!("Current battery: {}%", reading.battery);
        sleep(COMPARE_POLL);
    }

    println!("{}", "\nStarting battery test without ACS...".bold());
    let recorder = run_battery_test(sampler, service, false, sleep)?;
    persist_run(&recorder, config, false)?;

    println!(
        "\n{} Results saved in {}",
        "Test complete!".green().bold(),
        config.output_dir.display()
    );
    Ok(())
}
