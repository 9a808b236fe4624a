// Chord recorder - append-only capture of chord triggers
//
// While recording is armed, every chord-mode press appends a snapshot of
// the trigger: root, octave and the chord parameters that were actually in
// effect (after transient overrides). The sequence lives in memory only and
// is cleared wholesale when a new recording starts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::theory::chord::{ChordParams, ChordQuality, ChordType, ordinal_suffix};
use crate::theory::pitch::PitchClass;

/// One recorded chord trigger, immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedChord {
    pub id: Uuid,
    pub root: PitchClass,
    pub octave: i32,
    pub quality: ChordQuality,
    pub chord_type: ChordType,
    pub inversion: u8,
    pub timestamp: DateTime<Utc>,
}

impl RecordedChord {
    /// The chord parameters captured at trigger time.
    pub fn params(&self) -> ChordParams {
        ChordParams::new(self.quality, self.chord_type, self.inversion)
    }

    /// Human-readable label ("C Maj7, 1st inversion")
    pub fn label(&self) -> String {
        let chord = format!("{} {}", self.root.name(), self.params().abbreviation());
        if self.inversion == 0 {
            chord
        } else {
            format!(
                "{}, {}{} inversion",
                chord,
                self.inversion,
                ordinal_suffix(self.inversion)
            )
        }
    }
}

/// Append-only recorder for chord triggers.
#[derive(Debug, Default)]
pub struct ChordRecorder {
    recording: bool,
    events: Vec<RecordedChord>,
}

impl ChordRecorder {
    pub fn new() -> Self {
        Self {
            recording: false,
            events: Vec::new(),
        }
    }

    /// Arm recording. Starting a new recording discards the previous take.
    pub fn start(&mut self) {
        self.events.clear();
        self.recording = true;
    }

    /// Disarm recording, keeping the captured sequence.
    pub fn stop(&mut self) {
        self.recording = false;
    }

    /// Drop the captured sequence.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Append a trigger snapshot. No-op unless recording is armed.
    pub fn append(&mut self, root: PitchClass, octave: i32, params: ChordParams) {
        if !self.recording {
            return;
        }
        self.events.push(RecordedChord {
            id: Uuid::new_v4(),
            root,
            octave,
            quality: params.quality,
            chord_type: params.chord_type,
            inversion: params.inversion,
            timestamp: Utc::now(),
        });
    }

    pub fn events(&self) -> &[RecordedChord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_major() -> ChordParams {
        ChordParams::new(ChordQuality::Major, ChordType::Triad, 0)
    }

    #[test]
    fn test_append_requires_recording() {
        let mut recorder = ChordRecorder::new();
        recorder.append(PitchClass::C, 4, c_major());
        assert!(recorder.is_empty());

        recorder.start();
        recorder.append(PitchClass::C, 4, c_major());
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_stop_keeps_sequence() {
        let mut recorder = ChordRecorder::new();
        recorder.start();
        recorder.append(PitchClass::C, 4, c_major());
        recorder.stop();

        assert!(!recorder.is_recording());
        assert_eq!(recorder.len(), 1);

        // Appends after stop are ignored
        recorder.append(PitchClass::D, 4, c_major());
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_start_clears_previous_take() {
        let mut recorder = ChordRecorder::new();
        recorder.start();
        recorder.append(PitchClass::C, 4, c_major());
        recorder.append(PitchClass::G, 4, c_major());
        recorder.stop();

        recorder.start();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_events_keep_order_and_snapshot() {
        let mut recorder = ChordRecorder::new();
        recorder.start();
        recorder.append(PitchClass::C, 4, c_major());
        recorder.append(
            PitchClass::E,
            4,
            ChordParams::new(ChordQuality::Minor, ChordType::Seventh, 1),
        );

        let events = recorder.events();
        assert_eq!(events[0].root, PitchClass::C);
        assert_eq!(events[1].root, PitchClass::E);
        assert_eq!(events[1].quality, ChordQuality::Minor);
        assert_eq!(events[1].inversion, 1);
        assert_ne!(events[0].id, events[1].id);
        assert!(events[0].timestamp <= events[1].timestamp);
    }

    #[test]
    fn test_labels() {
        let mut recorder = ChordRecorder::new();
        recorder.start();
        recorder.append(PitchClass::C, 4, c_major());
        recorder.append(
            PitchClass::Fs,
            4,
            ChordParams::new(ChordQuality::Minor, ChordType::Seventh, 2),
        );

        assert_eq!(recorder.events()[0].label(), "C Maj");
        assert_eq!(recorder.events()[1].label(), "F# min7, 2nd inversion");
    }
}
