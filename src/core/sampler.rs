use crate::error::{BatbenchError, Result};
use chrono::{DateTime, Local};
use std::process::Command;

/// Shell command that prints `<lid> <battery> <ac>` as three whitespace-separated
/// tokens, with `lid`/`ac` being the literal strings `true`/`false`.
pub const STATUS_COMMAND: &str = "acs get power --raw";

/// One battery status poll. Produced fresh on every sample, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub timestamp: DateTime<Local>,
    /// Battery charge percentage, 0-100
    pub battery: u8,
    /// Whether the machine is on AC power
    pub ac_connected: bool,
    /// Lid switch state, parsed but unused in decision logic
    pub lid_closed: bool,
}

/// Source of battery readings. The production implementation shells out to the
/// status command; tests script sequences of readings instead.
pub trait PowerStatus {
    fn sample(&mut self) -> Result<Reading>;
}

/// Production sampler that runs the opaque status command through the shell.
pub struct AcsStatus {
    command: String,
}

impl AcsStatus {
    pub fn new() -> Self {
        AcsStatus {
            command: STATUS_COMMAND.to_string(),
        }
    }
}

impl Default for AcsStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerStatus for AcsStatus {
    fn sample(&mut self) -> Result<Reading> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .output()
            .map_err(|e| BatbenchError::sample(format!("failed to run status command: {}", e)))?;

        if !output.status.success() {
            return Err(BatbenchError::sample(format!(
                "status command exited with {}",
                output.status
            )));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let (lid_closed, battery, ac_connected) = parse_status(&raw)?;

        Ok(Reading {
            timestamp: Local::now(),
            battery,
            ac_connected,
            lid_closed,
        })
    }
}

/// Decode the raw status line into `(lid, battery, ac)`.
///
/// Fails when the output cannot be split into exactly the three expected
/// fields, or when a field does not parse.
pub fn parse_status(raw: &str) -> Result<(bool, u8, bool)> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(BatbenchError::sample(format!(
            "expected 3 fields in status output, got {}: {:?}",
            fields.len(),
            raw.trim()
        )));
    }

    let lid = parse_flag(fields[0])?;
    let battery: u8 = fields[1]
        .parse()
        .map_err(|_| BatbenchError::sample(format!("invalid battery percentage: {:?}", fields[1])))?;
    let ac = parse_flag(fields[2])?;

    Ok((lid, battery, ac))
}

fn parse_flag(token: &str) -> Result<bool> {
    match token {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(BatbenchError::sample(format!(
            "invalid boolean flag: {:?}",
            other
        ))),
    }
}
