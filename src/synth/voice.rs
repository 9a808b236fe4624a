// Synth voice - one sounding pitch

use super::envelope::{AdsrEnvelope, AdsrParams};
use super::oscillator::{SimpleOscillator, WaveformType};
use crate::theory::pitch::{Pitch, PitchClass};

/// Equal-temperament frequency for a pitch (A4 = 440 Hz).
pub fn pitch_frequency(pitch: Pitch) -> f32 {
    440.0 * 2_f32.powf((pitch.midi_number() as f32 - 69.0) / 12.0)
}

/// One voice of the pool: oscillator plus amplitude envelope.
#[derive(Clone)]
pub struct SynthVoice {
    oscillator: SimpleOscillator,
    envelope: AdsrEnvelope,
    pitch: Pitch,
    held: bool,
}

impl SynthVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            oscillator: SimpleOscillator::new(WaveformType::Triangle, sample_rate),
            envelope: AdsrEnvelope::new(AdsrParams::default(), sample_rate),
            pitch: Pitch::new(PitchClass::C, 4),
            held: false,
        }
    }

    /// Start sounding the given pitch.
    pub fn note_on(&mut self, pitch: Pitch) {
        self.pitch = pitch;
        self.held = true;
        self.oscillator.set_frequency(pitch_frequency(pitch));
        self.oscillator.reset();
        self.envelope.note_on();
    }

    /// Begin the release phase; the voice stays audible until it fades out.
    pub fn note_off(&mut self) {
        self.held = false;
        self.envelope.note_off();
    }

    /// Audible, including the release tail.
    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    /// Still held down (attack through sustain).
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn set_waveform(&mut self, waveform: WaveformType) {
        self.oscillator.set_waveform(waveform);
    }

    pub fn next_sample(&mut self) -> f32 {
        self.oscillator.next_sample() * self.envelope.process()
    }
}
