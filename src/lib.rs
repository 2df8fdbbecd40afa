// Batbench Library - Public API

// Re-export error types
pub mod error;
pub use error::{BatbenchError, Result};

// Module declarations
pub mod commands;
pub mod core;

// Re-export commonly used types
pub use core::recorder::{Record, Recorder};
pub use core::sampler::Reading;

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
