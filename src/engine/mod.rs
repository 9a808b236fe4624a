// Event engine - voice tracking, transient overrides and input routing

pub mod overrides;
pub mod router;
pub mod sink;
pub mod voices;

pub use overrides::TransientOverrides;
pub use router::{HOME_OCTAVE, InputRouter, PerformanceSettings, PlayMode};
pub use sink::{CommandSink, NoteSink};
pub use voices::VoiceTracker;
