// Transient overrides - held-modifier parameter substitution
//
// Holding a digit key forces a specific inversion and holding the seventh
// key forces the seventh extension, for exactly the presses that happen
// while the modifier is down. The values revert on key release and are
// never persisted.

use crate::theory::chord::ChordType;

/// Temporary parameter substitutions, active only while held.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransientOverrides {
    inversion: Option<u8>,
    chord_type: Option<ChordType>,
}

impl TransientOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a temporary inversion. A value above `max_inversion` for the
    /// currently selected chord shape is discarded, not clamped.
    pub fn set_inversion(&mut self, inversion: u8, max_inversion: u8) -> bool {
        if inversion <= max_inversion {
            self.inversion = Some(inversion);
            true
        } else {
            false
        }
    }

    pub fn clear_inversion(&mut self) {
        self.inversion = None;
    }

    pub fn set_chord_type(&mut self, chord_type: ChordType) {
        self.chord_type = Some(chord_type);
    }

    pub fn clear_chord_type(&mut self) {
        self.chord_type = None;
    }

    pub fn inversion(&self) -> Option<u8> {
        self.inversion
    }

    pub fn chord_type(&self) -> Option<ChordType> {
        self.chord_type
    }
}
