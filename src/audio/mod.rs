// Audio - CPAL backend and real-time callback

pub mod dsp_utils;
pub mod engine;
pub mod parameters;
pub mod status;

pub use engine::{AudioEngine, AudioEngineError};
pub use parameters::AtomicF32;
pub use status::{AtomicEngineStatus, EngineStatus};
