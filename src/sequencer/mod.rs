// Sequencer - chord recording and paced playback

pub mod player;
pub mod recorder;

pub use player::{DWELL_DURATION, GAP_DURATION, SequencePlayer};
pub use recorder::{ChordRecorder, RecordedChord};
