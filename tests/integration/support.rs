use batbench::core::sampler::{PowerStatus, Reading};
use batbench::error::{BatbenchError, Result};
use chrono::Local;
use std::vec::IntoIter;

/// Scripted battery status sequence standing in for the real status command.
pub struct ScriptedStatus {
    steps: IntoIter<Step>,
}

#[derive(Clone, Copy)]
pub enum Step {
    /// `(battery, ac_connected)`
    Ok(u8, bool),
    /// Simulated status command failure
    Fail,
}

impl ScriptedStatus {
    pub fn new(steps: Vec<Step>) -> Self {
        ScriptedStatus {
            steps: steps.into_iter(),
        }
    }
}

impl PowerStatus for ScriptedStatus {
    fn sample(&mut self) -> Result<Reading> {
        match self.steps.next().expect("script exhausted before the session ended") {
            Step::Ok(battery, ac_connected) => Ok(Reading {
                timestamp: Local::now(),
                battery,
                ac_connected,
                lid_closed: false,
            }),
            Step::Fail => Err(BatbenchError::sample("scripted failure")),
        }
    }
}
