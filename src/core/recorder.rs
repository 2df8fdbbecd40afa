use crate::core::sampler::Reading;
use crate::error::Result;
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Header row for persisted comparison-run tables.
pub const CSV_HEADER: &str = "timestamp,battery,is_acs_running,is_charging,message";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One logged sample. Appended in chronological order, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: DateTime<Local>,
    pub battery: u8,
    /// Which experimental condition this record belongs to
    pub service_running: bool,
    pub ac_connected: bool,
    pub message: String,
}

/// How recorded samples are echoed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// `[LOG (<time>) bat=<pct>]: <message>` (drain test)
    Drain,
    /// `[<time>] Battery: <pct>% (ACS: <flag>, Charging: <flag>) - <message>` (comparison runs)
    Compare,
}

/// Owns the in-memory record sequence for one run and echoes each record to
/// stdout. Recording never fails; persistence can.
pub struct Recorder {
    records: Vec<Record>,
    style: LogStyle,
}

impl Recorder {
    pub fn new() -> Self {
        Self::with_style(LogStyle::Compare)
    }

    pub fn with_style(style: LogStyle) -> Self {
        Recorder {
            records: Vec::new(),
            style,
        }
    }

    /// Append a record for this reading and print one human-readable line.
    pub fn record(&mut self, reading: &Reading, service_running: bool, message: &str) {
        let record = Record {
            timestamp: reading.timestamp,
            battery: reading.battery,
            service_running,
            ac_connected: reading.ac_connected,
            message: message.to_string(),
        };

        match self.style {
            LogStyle::Drain => println!(
                "[LOG ({}) bat={}]: {}",
                record.timestamp.format(TIMESTAMP_FORMAT),
                record.battery,
                record.message
            ),
            LogStyle::Compare => println!(
                "[{}] Battery: {}% (ACS: {}, Charging: {}) - {}",
                record.timestamp.format(TIMESTAMP_FORMAT),
                record.battery,
                fmt_bool(record.service_running),
                fmt_bool(record.ac_connected),
                record.message
            ),
        }

        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Write the full sequence as tabular rows with a header.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "{}", CSV_HEADER)?;
        for record in &self.records {
            writeln!(file, "{}", csv_row(record))?;
        }
        Ok(())
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one record as a CSV row, booleans in `True`/`False` form.
pub fn csv_row(record: &Record) -> String {
    format!(
        "{},{},{},{},{}",
        record.timestamp.format(TIMESTAMP_FORMAT),
        record.battery,
        fmt_bool(record.service_running),
        fmt_bool(record.ac_connected),
        record.message
    )
}

/// Append one `timestamp,battery,message` line to a plain-text log.
pub fn append_log(path: &Path, record: &Record) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{},{},{}",
        record.timestamp.format(TIMESTAMP_FORMAT),
        record.battery,
        record.message
    )?;
    Ok(())
}

fn fmt_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
