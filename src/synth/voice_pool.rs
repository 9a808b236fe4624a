// Voice pool - fixed-size polyphony
//
// Voices are pre-allocated and claimed on attack. There is no voice
// stealing: when every voice is busy, additional attacks are dropped
// silently. A release puts every held voice of that pitch into its release
// phase; the voice frees itself once the envelope fades out.

use super::oscillator::WaveformType;
use super::voice::SynthVoice;
use crate::theory::pitch::Pitch;

pub const MAX_VOICES: usize = 32;

pub struct VoicePool {
    voices: [SynthVoice; MAX_VOICES],
}

impl VoicePool {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: std::array::from_fn(|_| SynthVoice::new(sample_rate)),
        }
    }

    /// Claim a free voice for the pitch. Dropped when the pool is full.
    pub fn note_on(&mut self, pitch: Pitch) {
        if let Some(voice) = self.voices.iter_mut().find(|v| !v.is_active()) {
            voice.note_on(pitch);
        }
    }

    /// Release every held voice sounding this pitch.
    pub fn note_off(&mut self, pitch: Pitch) {
        for voice in &mut self.voices {
            if voice.is_held() && voice.pitch() == pitch {
                voice.note_off();
            }
        }
    }

    pub fn set_waveform(&mut self, waveform: WaveformType) {
        for voice in &mut self.voices {
            voice.set_waveform(waveform);
        }
    }

    /// Mix all active voices into one sample.
    pub fn next_sample(&mut self) -> f32 {
        self.voices
            .iter_mut()
            .filter(|v| v.is_active())
            .map(|v| v.next_sample())
            .sum::<f32>()
            / 8.0
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }
}
