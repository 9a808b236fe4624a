// Chord construction - quality, extension and inversion
//
// A chord is described by its quality (major/minor/diminished/augmented),
// its extension (triad or seventh) and an inversion index. The calculator
// turns that description into an ordered list of semitone intervals and
// realizes them as absolute pitches. Interval order is voicing order: an
// inverted chord keeps the rotated order rather than being re-sorted.

use serde::{Deserialize, Serialize};

use super::pitch::{Pitch, PitchClass};

/// Chord quality, fixing the base triad intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

/// All qualities in UI order.
pub const ALL_QUALITIES: [ChordQuality; 4] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
    ChordQuality::Augmented,
];

impl ChordQuality {
    /// Base triad as semitone offsets from the root.
    pub fn base_triad(self) -> [u8; 3] {
        match self {
            ChordQuality::Major => [0, 4, 7],
            ChordQuality::Minor => [0, 3, 7],
            ChordQuality::Diminished => [0, 3, 6],
            ChordQuality::Augmented => [0, 4, 8],
        }
    }

    /// Seventh added on top of the base triad.
    ///
    /// Augmented has no standard seventh and falls back to the dominant
    /// seventh interval.
    pub fn seventh_interval(self) -> u8 {
        match self {
            ChordQuality::Major => 11,
            ChordQuality::Minor => 10,
            ChordQuality::Diminished => 9,
            ChordQuality::Augmented => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Diminished => "Diminished",
            ChordQuality::Augmented => "Augmented",
        }
    }

    /// Short form used in chord labels ("Maj", "min", ...)
    pub fn abbreviation(self) -> &'static str {
        match self {
            ChordQuality::Major => "Maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
        }
    }
}

/// Chord extension: three or four tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordType {
    Triad,
    Seventh,
}

pub const ALL_CHORD_TYPES: [ChordType; 2] = [ChordType::Triad, ChordType::Seventh];

impl ChordType {
    pub fn name(self) -> &'static str {
        match self {
            ChordType::Triad => "Triad",
            ChordType::Seventh => "Seventh",
        }
    }
}

/// The full chord description captured at trigger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordParams {
    pub quality: ChordQuality,
    pub chord_type: ChordType,
    pub inversion: u8,
}

impl ChordParams {
    pub fn new(quality: ChordQuality, chord_type: ChordType, inversion: u8) -> Self {
        Self {
            quality,
            chord_type,
            inversion,
        }
    }

    /// Chord label for display ("Maj7", "min", ...)
    pub fn abbreviation(&self) -> String {
        match self.chord_type {
            ChordType::Triad => self.quality.abbreviation().to_string(),
            ChordType::Seventh => format!("{}7", self.quality.abbreviation()),
        }
    }
}

/// Root-position intervals for a quality and extension.
pub fn intervals(quality: ChordQuality, chord_type: ChordType) -> Vec<u8> {
    let mut result = quality.base_triad().to_vec();
    if chord_type == ChordType::Seventh {
        result.push(quality.seventh_interval());
    }
    result
}

/// Rotate the lowest `inversion` tones to the top, each raised one octave.
///
/// Inversion 0 is the identity. Callers keep `inversion` within
/// `0..=max_inversion`; larger values keep rotating and are not clamped here.
pub fn apply_inversion(intervals: &[u8], inversion: u8) -> Vec<u8> {
    let mut result = intervals.to_vec();
    for _ in 0..inversion {
        if result.is_empty() {
            break;
        }
        let first = result.remove(0);
        result.push(first + 12);
    }
    result
}

/// Highest valid inversion index for a chord shape.
pub fn max_inversion(quality: ChordQuality, chord_type: ChordType) -> u8 {
    (intervals(quality, chord_type).len() - 1) as u8
}

/// Realize a chord as absolute pitches at the given octave.
///
/// The returned order is the voicing order, not pitch-sorted.
pub fn realize_chord(
    root: PitchClass,
    quality: ChordQuality,
    chord_type: ChordType,
    inversion: u8,
    octave: i32,
) -> Vec<Pitch> {
    let base = Pitch::new(root, octave);
    apply_inversion(&intervals(quality, chord_type), inversion)
        .into_iter()
        .map(|interval| base.transposed(interval))
        .collect()
}

/// Convenience wrapper taking the captured parameter set.
pub fn realize_params(root: PitchClass, params: ChordParams, octave: i32) -> Vec<Pitch> {
    realize_chord(
        root,
        params.quality,
        params.chord_type,
        params.inversion,
        octave,
    )
}

/// Ordinal suffix for inversion labels (1st, 2nd, 3rd, ...)
pub fn ordinal_suffix(n: u8) -> &'static str {
    match (n % 10, n % 100) {
        (1, k) if k != 11 => "st",
        (2, k) if k != 12 => "nd",
        (3, k) if k != 13 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triad_intervals() {
        assert_eq!(intervals(ChordQuality::Major, ChordType::Triad), vec![0, 4, 7]);
        assert_eq!(intervals(ChordQuality::Minor, ChordType::Triad), vec![0, 3, 7]);
        assert_eq!(
            intervals(ChordQuality::Diminished, ChordType::Triad),
            vec![0, 3, 6]
        );
        assert_eq!(
            intervals(ChordQuality::Augmented, ChordType::Triad),
            vec![0, 4, 8]
        );
    }

    #[test]
    fn test_seventh_intervals() {
        assert_eq!(
            intervals(ChordQuality::Major, ChordType::Seventh),
            vec![0, 4, 7, 11]
        );
        assert_eq!(
            intervals(ChordQuality::Minor, ChordType::Seventh),
            vec![0, 3, 7, 10]
        );
        assert_eq!(
            intervals(ChordQuality::Diminished, ChordType::Seventh),
            vec![0, 3, 6, 9]
        );
        // Augmented uses the dominant-seventh fallback
        assert_eq!(
            intervals(ChordQuality::Augmented, ChordType::Seventh),
            vec![0, 4, 8, 10]
        );
    }

    #[test]
    fn test_seventh_extends_triad() {
        for quality in ALL_QUALITIES {
            let triad = intervals(quality, ChordType::Triad);
            let seventh = intervals(quality, ChordType::Seventh);
            assert_eq!(triad.len(), 3);
            assert_eq!(seventh.len(), 4);
            assert_eq!(&seventh[..3], &triad[..]);
        }
    }

    #[test]
    fn test_inversion_zero_is_identity() {
        let base = intervals(ChordQuality::Major, ChordType::Triad);
        assert_eq!(apply_inversion(&base, 0), base);

        let rotated = apply_inversion(&base, 2);
        assert_eq!(apply_inversion(&rotated, 0), rotated);
    }

    #[test]
    fn test_single_inversions() {
        let base = intervals(ChordQuality::Major, ChordType::Triad);
        assert_eq!(apply_inversion(&base, 1), vec![4, 7, 12]);
        assert_eq!(apply_inversion(&base, 2), vec![7, 12, 16]);
    }

    #[test]
    fn test_full_cycle_lifts_one_octave() {
        // N single-step rotations return the original tones, each +12
        for quality in ALL_QUALITIES {
            for chord_type in ALL_CHORD_TYPES {
                let base = intervals(quality, chord_type);
                let cycled = apply_inversion(&base, base.len() as u8);
                let lifted: Vec<u8> = base.iter().map(|i| i + 12).collect();
                assert_eq!(cycled, lifted);
            }
        }
    }

    #[test]
    fn test_max_inversion() {
        assert_eq!(max_inversion(ChordQuality::Major, ChordType::Triad), 2);
        assert_eq!(max_inversion(ChordQuality::Minor, ChordType::Seventh), 3);
    }

    #[test]
    fn test_realize_c_major_inversions() {
        let root_position =
            realize_chord(PitchClass::C, ChordQuality::Major, ChordType::Triad, 0, 4);
        assert_eq!(
            root_position,
            vec![
                Pitch::new(PitchClass::C, 4),
                Pitch::new(PitchClass::E, 4),
                Pitch::new(PitchClass::G, 4),
            ]
        );

        let first = realize_chord(PitchClass::C, ChordQuality::Major, ChordType::Triad, 1, 4);
        assert_eq!(
            first,
            vec![
                Pitch::new(PitchClass::E, 4),
                Pitch::new(PitchClass::G, 4),
                Pitch::new(PitchClass::C, 5),
            ]
        );

        let second = realize_chord(PitchClass::C, ChordQuality::Major, ChordType::Triad, 2, 4);
        assert_eq!(
            second,
            vec![
                Pitch::new(PitchClass::G, 4),
                Pitch::new(PitchClass::C, 5),
                Pitch::new(PitchClass::E, 5),
            ]
        );
    }

    #[test]
    fn test_realize_c_minor_seventh() {
        let pitches =
            realize_chord(PitchClass::C, ChordQuality::Minor, ChordType::Seventh, 0, 4);
        assert_eq!(
            pitches,
            vec![
                Pitch::new(PitchClass::C, 4),
                Pitch::new(PitchClass::Ds, 4),
                Pitch::new(PitchClass::G, 4),
                Pitch::new(PitchClass::As, 4),
            ]
        );
    }

    #[test]
    fn test_realize_keeps_voicing_order() {
        // Inverted chords are not pitch-sorted; order follows the rotation
        let pitches = realize_chord(PitchClass::G, ChordQuality::Major, ChordType::Triad, 1, 4);
        assert_eq!(
            pitches,
            vec![
                Pitch::new(PitchClass::B, 4),
                Pitch::new(PitchClass::D, 5),
                Pitch::new(PitchClass::G, 5),
            ]
        );
    }

    #[test]
    fn test_abbreviations() {
        let maj7 = ChordParams::new(ChordQuality::Major, ChordType::Seventh, 0);
        assert_eq!(maj7.abbreviation(), "Maj7");

        let min_triad = ChordParams::new(ChordQuality::Minor, ChordType::Triad, 1);
        assert_eq!(min_triad.abbreviation(), "min");
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
    }
}
