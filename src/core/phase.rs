use crate::core::sampler::Reading;
use std::time::Duration;

/// Battery percentage that arms the drain test (exact match, on battery power).
pub const ARM_PERCENT: u8 = 45;
/// Battery percentage at or below which the drain test ends.
pub const DRAIN_END_PERCENT: u8 = 43;
/// Poll interval for the drain test.
pub const DRAIN_POLL: Duration = Duration::from_secs(10);

/// Battery percentage at or below which a comparison run starts sampling.
pub const DISCHARGE_START_PERCENT: u8 = 95;
/// Battery percentage at or below which a comparison run stops sampling.
pub const SAMPLE_END_PERCENT: u8 = 5;
/// Battery percentage at or above which the machine counts as recharged.
pub const RECHARGE_PERCENT: u8 = 95;
/// Poll interval for comparison runs.
pub const COMPARE_POLL: Duration = Duration::from_secs(60);
/// Pause after issuing a service start/stop, to let it take effect.
pub const SERVICE_SETTLE: Duration = Duration::from_secs(5);

/// Phases of the trigger-and-drain test (`batbench drain`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainPhase {
    /// Waiting for the battery to hit the arming threshold on battery power
    Idle,
    /// Logging every sample until the end threshold is reached
    Draining,
    /// Terminal phase; the process exits with a non-zero status
    Ended,
}

/// Pure transition function for the drain test.
pub fn drain_step(phase: DrainPhase, reading: &Reading) -> DrainPhase {
    match phase {
        DrainPhase::Idle if reading.battery == ARM_PERCENT && !reading.ac_connected => {
            DrainPhase::Draining
        }
        DrainPhase::Idle => DrainPhase::Idle,
        DrainPhase::Draining if reading.battery <= DRAIN_END_PERCENT => DrainPhase::Ended,
        DrainPhase::Draining => DrainPhase::Draining,
        DrainPhase::Ended => DrainPhase::Ended,
    }
}

/// Phases of a single comparison run (`batbench compare`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparePhase {
    /// Waiting for the battery to discharge below the start threshold
    ChargeWait,
    /// Recording every sample until the end threshold is reached
    Sampling,
    /// Terminal phase; results are persisted
    Done,
}

/// Pure transition function for a comparison run.
pub fn compare_step(phase: ComparePhase, reading: &Reading) -> ComparePhase {
    match phase {
        ComparePhase::ChargeWait
            if reading.battery <= DISCHARGE_START_PERCENT && !reading.ac_connected =>
        {
            ComparePhase::Sampling
        }
        ComparePhase::ChargeWait => ComparePhase::ChargeWait,
        ComparePhase::Sampling if reading.battery <= SAMPLE_END_PERCENT => ComparePhase::Done,
        ComparePhase::Sampling => ComparePhase::Sampling,
        ComparePhase::Done => ComparePhase::Done,
    }
}

/// Whether the battery has charged back enough to start the second run.
pub fn recharged(reading: &Reading) -> bool {
    reading.battery >= RECHARGE_PERCENT && reading.ac_connected
}
