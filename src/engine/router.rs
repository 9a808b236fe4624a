// Input event router - from key presses to sounding voices
//
// The router receives already-decoded press/release events (a root pitch
// class plus a resolved octave) together with an immutable snapshot of the
// UI-selected performance settings. It resolves transient overrides, drives
// the audio sink, keeps the voice tracker consistent and appends to the
// recorder while recording is active. It never reads ambient UI state.

use serde::{Deserialize, Serialize};

use super::overrides::TransientOverrides;
use super::sink::NoteSink;
use super::voices::VoiceTracker;
use crate::sequencer::recorder::ChordRecorder;
use crate::theory::chord::{self, ChordParams, ChordQuality, ChordType};
use crate::theory::pitch::{Pitch, PitchClass};

/// Octave of the lower keyboard row when no shift is applied.
pub const HOME_OCTAVE: i32 = 4;

/// What a key press triggers: one pitch or a full chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    Note,
    Chord,
}

/// Immutable snapshot of the UI-selected performance settings, passed into
/// the router on every press and release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSettings {
    pub play_mode: PlayMode,
    pub quality: ChordQuality,
    pub chord_type: ChordType,
    pub inversion: u8,
    pub octave_shift: i32,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            play_mode: PlayMode::Chord,
            quality: ChordQuality::Major,
            chord_type: ChordType::Triad,
            inversion: 0,
            octave_shift: 0,
        }
    }
}

impl PerformanceSettings {
    /// Octave for a press: home octave plus the UI shift, with the shift
    /// modifier adding one more for this press only.
    pub fn resolve_octave(&self, shift_held: bool) -> i32 {
        HOME_OCTAVE + self.octave_shift + if shift_held { 1 } else { 0 }
    }

    pub fn max_inversion(&self) -> u8 {
        chord::max_inversion(self.quality, self.chord_type)
    }
}

/// Routes press/release events to the sink, tracker and recorder.
#[derive(Debug, Default)]
pub struct InputRouter {
    voices: VoiceTracker,
    overrides: TransientOverrides,
}

impl InputRouter {
    pub fn new() -> Self {
        Self {
            voices: VoiceTracker::new(),
            overrides: TransientOverrides::new(),
        }
    }

    /// Chord parameters for a press happening right now: each axis takes
    /// the transient override when one is held, the UI selection otherwise.
    pub fn effective_params(&self, settings: &PerformanceSettings) -> ChordParams {
        ChordParams {
            quality: settings.quality,
            chord_type: self
                .overrides
                .chord_type()
                .unwrap_or(settings.chord_type),
            inversion: self.overrides.inversion().unwrap_or(settings.inversion),
        }
    }

    /// Handle a press on a keyboard key. Does nothing while the sink is not
    /// ready. Key-repeat suppression happens at the input layer; a genuine
    /// re-press before release re-attacks and overwrites the tracked voice.
    pub fn press(
        &mut self,
        root: PitchClass,
        octave: i32,
        settings: &PerformanceSettings,
        sink: &mut dyn NoteSink,
        recorder: &mut ChordRecorder,
    ) {
        if !sink.is_ready() {
            return;
        }

        match settings.play_mode {
            PlayMode::Note => {
                sink.attack(&[Pitch::new(root, octave)]);
            }
            PlayMode::Chord => {
                let params = self.effective_params(settings);
                let pitches = chord::realize_params(root, params, octave);
                sink.attack(&pitches);
                self.voices.begin_voice(Pitch::new(root, octave), params);
                recorder.append(root, octave, params);
            }
        }
    }

    /// Handle a release. Chord releases use the parameters stored at press
    /// time; a release without a matching press is a silent no-op.
    pub fn release(
        &mut self,
        root: PitchClass,
        octave: i32,
        settings: &PerformanceSettings,
        sink: &mut dyn NoteSink,
    ) {
        match settings.play_mode {
            PlayMode::Note => {
                sink.release(&[Pitch::new(root, octave)]);
            }
            PlayMode::Chord => {
                if let Some(params) = self.voices.end_voice(Pitch::new(root, octave)) {
                    let pitches = chord::realize_params(root, params, octave);
                    sink.release(&pitches);
                }
            }
        }
    }

    /// Digit-key down: request a temporary inversion. Ignored in note mode;
    /// a value above the current chord's maximum is discarded.
    pub fn set_temporary_inversion(&mut self, inversion: u8, settings: &PerformanceSettings) {
        if settings.play_mode == PlayMode::Chord {
            self.overrides
                .set_inversion(inversion, settings.max_inversion());
        }
    }

    /// Digit-key up: drop the temporary inversion.
    pub fn clear_temporary_inversion(&mut self) {
        self.overrides.clear_inversion();
    }

    /// Seventh-key down: force the seventh extension while held.
    pub fn set_temporary_seventh(&mut self, settings: &PerformanceSettings) {
        if settings.play_mode == PlayMode::Chord {
            self.overrides.set_chord_type(ChordType::Seventh);
        }
    }

    /// Seventh-key up: drop the temporary extension.
    pub fn clear_temporary_seventh(&mut self) {
        self.overrides.clear_chord_type();
    }

    pub fn voices(&self) -> &VoiceTracker {
        &self.voices
    }

    pub fn overrides(&self) -> &TransientOverrides {
        &self.overrides
    }
}
