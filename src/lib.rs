// Chordboard - Library exports for tests and benchmarks

pub mod audio;
pub mod engine;
pub mod messaging;
pub mod sequencer;
pub mod settings;
pub mod synth;
pub mod theory;
pub mod ui;

// Re-export commonly used types for convenience
pub use audio::engine::{AudioEngine, AudioEngineError};
pub use audio::parameters::AtomicF32;
pub use audio::status::{AtomicEngineStatus, EngineStatus};
pub use engine::router::{HOME_OCTAVE, InputRouter, PerformanceSettings, PlayMode};
pub use engine::sink::{CommandSink, NoteSink};
pub use engine::voices::VoiceTracker;
pub use messaging::channels::{create_command_channel, create_notification_channel};
pub use messaging::command::{Command, PitchSet};
pub use sequencer::player::{DWELL_DURATION, GAP_DURATION, SequencePlayer};
pub use sequencer::recorder::{ChordRecorder, RecordedChord};
pub use settings::AppSettings;
pub use synth::oscillator::WaveformType;
pub use synth::voice_pool::VoicePool;
pub use theory::chord::{ChordParams, ChordQuality, ChordType};
pub use theory::pitch::{Pitch, PitchClass};
