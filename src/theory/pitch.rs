// Pitch classes and pitch arithmetic
//
// The chromatic scale is spelled with sharps only (C, C#, D, ... B).
// All interval math is done on the 12-class index with an octave carry,
// so transposition never produces enharmonic respellings.

use serde::{Deserialize, Serialize};

/// One of the 12 chromatic pitch classes, octave-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

/// Chromatic order starting at C, used for index arithmetic.
pub const CHROMATIC_SCALE: [PitchClass; 12] = [
    PitchClass::C,
    PitchClass::Cs,
    PitchClass::D,
    PitchClass::Ds,
    PitchClass::E,
    PitchClass::F,
    PitchClass::Fs,
    PitchClass::G,
    PitchClass::Gs,
    PitchClass::A,
    PitchClass::As,
    PitchClass::B,
];

impl PitchClass {
    /// Index in the chromatic scale (C = 0 ... B = 11)
    pub fn index(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Pitch class from a chromatic index (wraps modulo 12)
    pub fn from_index(index: u8) -> Self {
        CHROMATIC_SCALE[(index % 12) as usize]
    }

    /// Display name with sharp spelling ("C#", "A#", ...)
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// True for the sharp classes (black keys on a piano)
    pub fn is_sharp(self) -> bool {
        self.name().ends_with('#')
    }

    /// Transpose upward by a non-negative number of semitones.
    ///
    /// Returns the resulting pitch class and the octave carry
    /// (`(index + semitones) / 12`).
    pub fn transpose(self, semitones: u8) -> (PitchClass, i32) {
        let total = self.index() as u32 + semitones as u32;
        let class = PitchClass::from_index((total % 12) as u8);
        let carry = (total / 12) as i32;
        (class, carry)
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An absolute pitch: pitch class plus octave ("C#4").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i32,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i32) -> Self {
        Self { class, octave }
    }

    /// Transpose upward by a non-negative number of semitones,
    /// carrying into the octave.
    pub fn transposed(self, semitones: u8) -> Pitch {
        let (class, carry) = self.class.transpose(semitones);
        Pitch {
            class,
            octave: self.octave + carry,
        }
    }

    /// MIDI-style note number (C4 = 60, A4 = 69)
    pub fn midi_number(self) -> i32 {
        (self.octave + 1) * 12 + self.class.index() as i32
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromatic_index_roundtrip() {
        for (i, class) in CHROMATIC_SCALE.iter().enumerate() {
            assert_eq!(class.index() as usize, i);
            assert_eq!(PitchClass::from_index(i as u8), *class);
        }
    }

    #[test]
    fn test_transpose_without_carry() {
        let (class, carry) = PitchClass::C.transpose(4);
        assert_eq!(class, PitchClass::E);
        assert_eq!(carry, 0);

        let (class, carry) = PitchClass::C.transpose(7);
        assert_eq!(class, PitchClass::G);
        assert_eq!(carry, 0);
    }

    #[test]
    fn test_transpose_with_carry() {
        // B + 1 semitone wraps into the next octave
        let (class, carry) = PitchClass::B.transpose(1);
        assert_eq!(class, PitchClass::C);
        assert_eq!(carry, 1);

        // A + 15 semitones = C two classes up, one octave higher
        let (class, carry) = PitchClass::A.transpose(15);
        assert_eq!(class, PitchClass::C);
        assert_eq!(carry, 2);
    }

    #[test]
    fn test_transpose_identity() {
        for class in CHROMATIC_SCALE {
            let (same, carry) = class.transpose(0);
            assert_eq!(same, class);
            assert_eq!(carry, 0);
        }
    }

    #[test]
    fn test_pitch_transposed_carries_octave() {
        let root = Pitch::new(PitchClass::A, 4);
        let up = root.transposed(3);
        assert_eq!(up, Pitch::new(PitchClass::C, 5));
    }

    #[test]
    fn test_pitch_display() {
        assert_eq!(Pitch::new(PitchClass::C, 4).to_string(), "C4");
        assert_eq!(Pitch::new(PitchClass::Cs, 5).to_string(), "C#5");
        assert_eq!(Pitch::new(PitchClass::As, 3).to_string(), "A#3");
    }

    #[test]
    fn test_midi_number() {
        assert_eq!(Pitch::new(PitchClass::C, 4).midi_number(), 60);
        assert_eq!(Pitch::new(PitchClass::A, 4).midi_number(), 69);
        assert_eq!(Pitch::new(PitchClass::C, -1).midi_number(), 0);
    }

    #[test]
    fn test_sharp_classes() {
        let sharps: Vec<PitchClass> = CHROMATIC_SCALE
            .iter()
            .copied()
            .filter(|c| c.is_sharp())
            .collect();
        assert_eq!(
            sharps,
            vec![
                PitchClass::Cs,
                PitchClass::Ds,
                PitchClass::Fs,
                PitchClass::Gs,
                PitchClass::As
            ]
        );
    }
}
