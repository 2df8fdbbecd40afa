use anyhow::Result;
use clap::{Arg, Command};

use batbench::commands;
use batbench::core::service::DEFAULT_UNIT;

fn main() -> Result<()> {
    batbench::init_logging();

    let matches = Command::new("batbench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Measure laptop battery drain with and without the acs daemon running")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("drain")
                .about("Wait for the arming threshold, then log battery drain until 43%")
                .arg(
                    Arg::new("log-file")
                        .short('l')
                        .long("log-file")
                        .value_name("PATH")
                        .help("Plain-text log the test appends to")
                        .default_value("output.log"),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Run two full drain cycles, with and without the service, and chart them")
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory receiving the per-run CSV and chart files")
                        .default_value("battery_test_results"),
                )
                .arg(
                    Arg::new("unit")
                        .long("unit")
                        .value_name("UNIT")
                        .help("Systemd unit of the background service under test")
                        .default_value(DEFAULT_UNIT),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("drain", sub_matches)) => commands::drain(sub_matches),
        Some(("compare", sub_matches)) => commands::compare(sub_matches),
        _ => {
            println!("Use 'batbench --help' for more information.");
            Ok(())
        }
    }
}
