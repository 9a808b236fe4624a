// Sequence player - paced, cancellable chord playback
//
// Playback is a deadline-driven state machine advanced by `tick`, which the
// UI calls every frame with the current time. Each recorded chord sounds
// for a fixed dwell, then a fixed gap separates it from the next attack.
// Deadlines chain off each other rather than off the tick time, so pacing
// does not drift with the tick rate. A stop request is observed on the next
// tick: the sounding chord is released immediately and the player returns
// to idle without advancing.

use std::time::{Duration, Instant};

use super::recorder::RecordedChord;
use crate::engine::sink::NoteSink;
use crate::theory::chord::realize_params;
use crate::theory::pitch::Pitch;

/// How long each chord sounds during playback.
pub const DWELL_DURATION: Duration = Duration::from_millis(1000);

/// Silence between a release and the next attack.
pub const GAP_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayPhase {
    /// The chord at `index` is sounding until the deadline.
    Dwell,
    /// The chord at `index` has been released; the next attack waits for
    /// the deadline.
    Gap,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: usize,
    phase: PlayPhase,
    deadline: Instant,
}

/// Tick-driven playback of a recorded chord sequence.
#[derive(Debug, Default)]
pub struct SequencePlayer {
    cursor: Option<Cursor>,
    stop_requested: bool,
}

impl SequencePlayer {
    pub fn new() -> Self {
        Self {
            cursor: None,
            stop_requested: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Index of the chord currently sounding (or just released, during the
    /// gap). `None` while idle.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.map(|c| c.index)
    }

    /// Start playback from the first event. Returns false when already
    /// playing or when the sequence is empty.
    pub fn play(&mut self, events: &[RecordedChord], sink: &mut dyn NoteSink, now: Instant) -> bool {
        if self.cursor.is_some() || events.is_empty() {
            return false;
        }
        self.stop_requested = false;
        sink.attack(&event_pitches(&events[0]));
        self.cursor = Some(Cursor {
            index: 0,
            phase: PlayPhase::Dwell,
            deadline: now + DWELL_DURATION,
        });
        true
    }

    /// Ask playback to stop. Honored at the next tick; harmless while idle.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Advance playback. Call on every UI frame.
    pub fn tick(&mut self, events: &[RecordedChord], sink: &mut dyn NoteSink, now: Instant) {
        let Some(cursor) = self.cursor else {
            self.stop_requested = false;
            return;
        };

        if self.stop_requested {
            if cursor.phase == PlayPhase::Dwell && cursor.index < events.len() {
                sink.release(&event_pitches(&events[cursor.index]));
            }
            self.cursor = None;
            self.stop_requested = false;
            return;
        }

        // The sequence shrank underneath the cursor; abandon playback
        if cursor.index >= events.len() {
            self.cursor = None;
            return;
        }

        if now < cursor.deadline {
            return;
        }

        match cursor.phase {
            PlayPhase::Dwell => {
                sink.release(&event_pitches(&events[cursor.index]));
                if cursor.index + 1 < events.len() {
                    self.cursor = Some(Cursor {
                        index: cursor.index,
                        phase: PlayPhase::Gap,
                        deadline: cursor.deadline + GAP_DURATION,
                    });
                } else {
                    // Last event released: playback is done, no trailing gap
                    self.cursor = None;
                }
            }
            PlayPhase::Gap => {
                let next = cursor.index + 1;
                sink.attack(&event_pitches(&events[next]));
                self.cursor = Some(Cursor {
                    index: next,
                    phase: PlayPhase::Dwell,
                    deadline: cursor.deadline + DWELL_DURATION,
                });
            }
        }
    }
}

fn event_pitches(event: &RecordedChord) -> Vec<Pitch> {
    realize_params(event.root, event.params(), event.octave)
}
