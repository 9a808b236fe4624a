// Synth - oscillators, envelopes and the voice pool

pub mod envelope;
pub mod oscillator;
pub mod voice;
pub mod voice_pool;

pub use envelope::{AdsrEnvelope, AdsrParams};
pub use oscillator::{ALL_WAVEFORMS, SimpleOscillator, WaveformType};
pub use voice::{SynthVoice, pitch_frequency};
pub use voice_pool::{MAX_VOICES, VoicePool};
