// Physical key mapping - computer keyboard → pitch classes
//
// Home-row naturals with the sharps on the row above, one octave total:
//   A W S E D F T G Y H U J
//   C C# D D# E F F# G G# A A# B
// Digits 1-3 hold a temporary inversion and 7 holds the seventh extension.

use egui::Key;

use crate::theory::pitch::PitchClass;

/// Note key → pitch class, `None` for unmapped keys.
pub fn key_to_pitch_class(key: Key) -> Option<PitchClass> {
    match key {
        Key::A => Some(PitchClass::C),
        Key::W => Some(PitchClass::Cs),
        Key::S => Some(PitchClass::D),
        Key::E => Some(PitchClass::Ds),
        Key::D => Some(PitchClass::E),
        Key::F => Some(PitchClass::F),
        Key::T => Some(PitchClass::Fs),
        Key::G => Some(PitchClass::G),
        Key::Y => Some(PitchClass::Gs),
        Key::H => Some(PitchClass::A),
        Key::U => Some(PitchClass::As),
        Key::J => Some(PitchClass::B),
        _ => None,
    }
}

/// Digit key → temporary inversion value (1-3), `None` otherwise.
pub fn key_to_inversion(key: Key) -> Option<u8> {
    match key {
        Key::Num1 => Some(1),
        Key::Num2 => Some(2),
        Key::Num3 => Some(3),
        _ => None,
    }
}

/// Key that holds the seventh extension while pressed.
pub const SEVENTH_KEY: Key = Key::Num7;
