// Music theory - pitch arithmetic and chord construction

pub mod chord;
pub mod pitch;

pub use chord::{
    ChordParams, ChordQuality, ChordType, ALL_CHORD_TYPES, ALL_QUALITIES, apply_inversion,
    intervals, max_inversion, ordinal_suffix, realize_chord, realize_params,
};
pub use pitch::{CHROMATIC_SCALE, Pitch, PitchClass};
