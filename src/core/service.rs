use crate::error::{BatbenchError, Result};
use std::process::Command;

/// Systemd unit name of the background service under test.
pub const DEFAULT_UNIT: &str = "acs";

/// Start/stop control over the background service whose battery impact is
/// being measured. Fire-and-forget, no success verification.
pub trait ServiceControl {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Production controller issuing `sudo systemctl start|stop <unit>`.
pub struct SystemctlService {
    unit: String,
}

impl SystemctlService {
    pub fn new(unit: &str) -> Self {
        SystemctlService {
            unit: unit.to_string(),
        }
    }

    fn issue(&self, verb: &str) -> Result<()> {
        Command::new("sudo")
            .args(["systemctl", verb, &self.unit])
            .spawn()
            .map_err(|e| {
                BatbenchError::service(format!("failed to {} unit {}: {}", verb, self.unit, e))
            })?;
        Ok(())
    }
}

impl ServiceControl for SystemctlService {
    fn start(&mut self) -> Result<()> {
        self.issue("start")
    }

    fn stop(&mut self) -> Result<()> {
        self.issue("stop")
    }
}

/// Synchronous stop used by the interrupt handler, which must finish the
/// cleanup before the process exits.
pub fn stop_unit_blocking(unit: &str) {
    let _ = Command::new("sudo").args(["systemctl", "stop", unit]).status();
}

/// Scoped ownership of the service for one run: construction puts the service
/// in the state the run needs, and dropping the guard always issues a stop, so
/// the service is released on every exit path.
pub struct ServiceGuard<'a, C: ServiceControl> {
    service: &'a mut C,
}

impl<'a, C: ServiceControl> ServiceGuard<'a, C> {
    pub fn acquire(service: &'a mut C, with_service: bool) -> Result<Self> {
        if with_service {
            service.start()?;
        } else {
            service.stop()?;
        }
        Ok(ServiceGuard { service })
    }
}

impl<C: ServiceControl> Drop for ServiceGuard<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.service.stop() {
            log::error!("Failed to stop service on release: {}", e);
        }
    }
}
