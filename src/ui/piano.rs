// Piano widget - clickable two-octave keyboard
//
// Keys are laid out like a real piano: 7 white keys per octave with the
// black keys overlapping the boundaries between them. Pointer interaction
// follows key-press semantics: pressing over a key attacks it, releasing
// the button or dragging off the key releases it.

use std::collections::HashSet;

use egui::{Color32, Pos2, Rect, Sense, Ui, Vec2};

use crate::theory::pitch::{CHROMATIC_SCALE, Pitch, PitchClass};

/// Octaves shown side by side.
pub const OCTAVE_SPAN: i32 = 2;

const WHITE_KEYS_PER_OCTAVE: i32 = 7;
const WHITE_KEY_HEIGHT: f32 = 140.0;
const BLACK_KEY_HEIGHT_FRACTION: f32 = 0.62;
const BLACK_KEY_WIDTH_FRACTION: f32 = 0.6;

/// Pointer interaction produced by the widget this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PianoAction {
    Pressed(Pitch),
    Released(Pitch),
}

/// One drawable key with its screen rectangle.
#[derive(Debug, Clone, Copy)]
struct PianoKey {
    pitch: Pitch,
    rect: Rect,
    is_black: bool,
}

/// Index of the white key a pitch class sits on (or left of, for sharps).
fn white_key_index(class: PitchClass) -> i32 {
    match class {
        PitchClass::C | PitchClass::Cs => 0,
        PitchClass::D | PitchClass::Ds => 1,
        PitchClass::E => 2,
        PitchClass::F | PitchClass::Fs => 3,
        PitchClass::G | PitchClass::Gs => 4,
        PitchClass::A | PitchClass::As => 5,
        PitchClass::B => 6,
    }
}

/// Horizontal offset of a black key from its white key, as a fraction of
/// the white key width. C#/D# sit further right than F#/G#/A#.
fn black_key_offset(class: PitchClass) -> f32 {
    match class {
        PitchClass::Cs | PitchClass::Ds => 0.6,
        PitchClass::Fs | PitchClass::Gs | PitchClass::As => 0.4,
        _ => 0.0,
    }
}

/// Compute every key rectangle inside `rect`.
fn layout_keys(rect: Rect, start_octave: i32) -> Vec<PianoKey> {
    let white_count = OCTAVE_SPAN * WHITE_KEYS_PER_OCTAVE;
    let white_width = rect.width() / white_count as f32;
    let black_width = white_width * BLACK_KEY_WIDTH_FRACTION;
    let black_height = rect.height() * BLACK_KEY_HEIGHT_FRACTION;

    let mut keys = Vec::new();
    for octave_slot in 0..OCTAVE_SPAN {
        let octave = start_octave + octave_slot;
        let octave_x = rect.left() + (octave_slot * WHITE_KEYS_PER_OCTAVE) as f32 * white_width;

        for class in CHROMATIC_SCALE {
            let white_x = octave_x + white_key_index(class) as f32 * white_width;
            if class.is_sharp() {
                let x = white_x + black_key_offset(class) * white_width + white_width / 2.0;
                keys.push(PianoKey {
                    pitch: Pitch::new(class, octave),
                    rect: Rect::from_min_size(
                        Pos2::new(x - black_width / 2.0, rect.top()),
                        Vec2::new(black_width, black_height),
                    ),
                    is_black: true,
                });
            } else {
                keys.push(PianoKey {
                    pitch: Pitch::new(class, octave),
                    rect: Rect::from_min_size(
                        Pos2::new(white_x, rect.top()),
                        Vec2::new(white_width, rect.height()),
                    ),
                    is_black: false,
                });
            }
        }
    }
    keys
}

/// Topmost key under the pointer; black keys win over the whites below.
fn hit_test(keys: &[PianoKey], pos: Pos2) -> Option<Pitch> {
    keys.iter()
        .filter(|k| k.is_black && k.rect.contains(pos))
        .chain(keys.iter().filter(|k| !k.is_black && k.rect.contains(pos)))
        .map(|k| k.pitch)
        .next()
}

/// Draw the keyboard and resolve pointer interaction.
///
/// `active` keys are highlighted; `pointer_held` is the key currently held
/// with the pointer, owned by the caller so it survives across frames.
pub fn piano_keyboard(
    ui: &mut Ui,
    start_octave: i32,
    active: &HashSet<Pitch>,
    pointer_held: &mut Option<Pitch>,
) -> Vec<PianoAction> {
    let width = ui.available_width().max(280.0);
    let (response, painter) =
        ui.allocate_painter(Vec2::new(width, WHITE_KEY_HEIGHT), Sense::click_and_drag());
    let keys = layout_keys(response.rect, start_octave);

    // Pointer resolution before drawing so highlights include this frame
    let hovered = response.hover_pos().and_then(|pos| hit_test(&keys, pos));
    let mut actions = Vec::new();

    if let Some(held) = *pointer_held {
        let released = ui.input(|i| i.pointer.primary_released());
        if released || hovered != Some(held) {
            actions.push(PianoAction::Released(held));
            *pointer_held = None;
        }
    }
    if pointer_held.is_none() && ui.input(|i| i.pointer.primary_pressed()) {
        if let Some(pitch) = hovered {
            actions.push(PianoAction::Pressed(pitch));
            *pointer_held = Some(pitch);
        }
    }

    let is_lit = |pitch: Pitch| active.contains(&pitch) || *pointer_held == Some(pitch);

    // White keys first, black keys on top
    for key in keys.iter().filter(|k| !k.is_black) {
        let fill = if is_lit(key.pitch) {
            Color32::from_rgb(150, 150, 255)
        } else {
            Color32::WHITE
        };
        painter.rect_filled(key.rect, 2.0, fill);
        painter.rect_stroke(key.rect, 2.0, (1.0, Color32::BLACK));
        painter.text(
            Pos2::new(key.rect.center().x, key.rect.bottom() - 12.0),
            egui::Align2::CENTER_CENTER,
            key.pitch.to_string(),
            egui::FontId::proportional(10.0),
            Color32::from_gray(100),
        );
    }
    for key in keys.iter().filter(|k| k.is_black) {
        let fill = if is_lit(key.pitch) {
            Color32::from_rgb(100, 100, 255)
        } else {
            Color32::from_gray(40)
        };
        painter.rect_filled(key.rect, 2.0, fill);
        painter.rect_stroke(key.rect, 2.0, (1.0, Color32::BLACK));
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(700.0, 140.0))
    }

    #[test]
    fn test_layout_covers_both_octaves() {
        let keys = layout_keys(test_rect(), 4);
        assert_eq!(keys.len(), 24);

        let whites = keys.iter().filter(|k| !k.is_black).count();
        let blacks = keys.iter().filter(|k| k.is_black).count();
        assert_eq!(whites, 14);
        assert_eq!(blacks, 10);

        let octaves: HashSet<i32> = keys.iter().map(|k| k.pitch.octave).collect();
        assert_eq!(octaves, HashSet::from([4, 5]));
    }

    #[test]
    fn test_white_keys_tile_the_rect() {
        let rect = test_rect();
        let keys = layout_keys(rect, 4);
        let whites: Vec<&PianoKey> = keys.iter().filter(|k| !k.is_black).collect();

        let white_width = rect.width() / 14.0;
        for (i, key) in whites.iter().enumerate() {
            assert!((key.rect.left() - i as f32 * white_width).abs() < 0.01);
            assert!((key.rect.width() - white_width).abs() < 0.01);
        }
    }

    #[test]
    fn test_black_keys_are_shorter() {
        let rect = test_rect();
        for key in layout_keys(rect, 4) {
            if key.is_black {
                assert!(key.rect.height() < rect.height());
            } else {
                assert_eq!(key.rect.height(), rect.height());
            }
        }
    }

    #[test]
    fn test_hit_test_prefers_black_keys() {
        let keys = layout_keys(test_rect(), 4);
        let c_sharp = keys
            .iter()
            .find(|k| k.pitch == Pitch::new(PitchClass::Cs, 4))
            .unwrap();

        // The middle of C# overlaps the white keys behind it
        let hit = hit_test(&keys, c_sharp.rect.center());
        assert_eq!(hit, Some(Pitch::new(PitchClass::Cs, 4)));
    }

    #[test]
    fn test_hit_test_below_black_keys_finds_white() {
        let rect = test_rect();
        let keys = layout_keys(rect, 4);
        let c4 = keys
            .iter()
            .find(|k| k.pitch == Pitch::new(PitchClass::C, 4))
            .unwrap();

        // Near the bottom, only the white key is under the pointer
        let pos = Pos2::new(c4.rect.center().x, rect.bottom() - 5.0);
        assert_eq!(hit_test(&keys, pos), Some(Pitch::new(PitchClass::C, 4)));
    }

    #[test]
    fn test_hit_test_outside_returns_none() {
        let keys = layout_keys(test_rect(), 4);
        assert_eq!(hit_test(&keys, Pos2::new(-10.0, -10.0)), None);
    }

    #[test]
    fn test_layout_respects_start_octave() {
        let keys = layout_keys(test_rect(), 3);
        assert!(keys.iter().any(|k| k.pitch == Pitch::new(PitchClass::C, 3)));
        assert!(keys.iter().any(|k| k.pitch == Pitch::new(PitchClass::B, 4)));
    }
}
