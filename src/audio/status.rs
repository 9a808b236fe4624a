// Engine status - readiness gate shared between threads
//
// Triggers are dropped while the engine is not `Running`, so nothing can
// sound before the output stream has started.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Starting = 0,
    Running = 1,
    Failed = 2,
}

impl From<u8> for EngineStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => EngineStatus::Starting,
            1 => EngineStatus::Running,
            _ => EngineStatus::Failed,
        }
    }
}

impl EngineStatus {
    pub fn label(self) -> &'static str {
        match self {
            EngineStatus::Starting => "Starting",
            EngineStatus::Running => "Running",
            EngineStatus::Failed => "No audio",
        }
    }
}

/// Atomic wrapper sharing the status between threads.
#[derive(Clone)]
pub struct AtomicEngineStatus {
    inner: Arc<AtomicU8>,
}

impl AtomicEngineStatus {
    pub fn new(status: EngineStatus) -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(status as u8)),
        }
    }

    pub fn get(&self) -> EngineStatus {
        EngineStatus::from(self.inner.load(Ordering::Relaxed))
    }

    pub fn set(&self, status: EngineStatus) {
        self.inner.store(status as u8, Ordering::Relaxed);
    }
}

impl Default for AtomicEngineStatus {
    fn default() -> Self {
        Self::new(EngineStatus::Starting)
    }
}
