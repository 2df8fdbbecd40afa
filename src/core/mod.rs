// Core logic: sampling, phase transitions, recording, persistence, service control
pub mod chart;
pub mod phase;
pub mod recorder;
pub mod sampler;
pub mod service;
pub mod session;
