// NoteSink - the seam between the event engine and the audio renderer
//
// The engine only ever asks the sink to start and stop sets of named
// pitches. The production implementation forwards them to the audio thread
// as lock-free commands; tests substitute an in-memory recorder.

use ringbuf::traits::Producer;

use crate::audio::status::{AtomicEngineStatus, EngineStatus};
use crate::messaging::channels::CommandProducer;
use crate::messaging::command::{Command, PitchSet};
use crate::theory::pitch::Pitch;

/// Destination for resolved pitch sets.
pub trait NoteSink {
    fn attack(&mut self, pitches: &[Pitch]);
    fn release(&mut self, pitches: &[Pitch]);

    /// Whether the renderer behind the sink is running. Triggers while the
    /// sink is not ready are dropped silently by the caller.
    fn is_ready(&self) -> bool;
}

/// Production sink: pushes commands onto the UI → audio ringbuffer.
pub struct CommandSink {
    command_tx: CommandProducer,
    status: AtomicEngineStatus,
}

impl CommandSink {
    pub fn new(command_tx: CommandProducer, status: AtomicEngineStatus) -> Self {
        Self { command_tx, status }
    }

    /// Push a command, dropping it if the ringbuffer is full.
    pub fn send(&mut self, command: Command) {
        let _ = self.command_tx.try_push(command);
    }
}

impl NoteSink for CommandSink {
    fn attack(&mut self, pitches: &[Pitch]) {
        if !self.is_ready() {
            return;
        }
        self.send(Command::Attack(PitchSet::from_slice(pitches)));
    }

    fn release(&mut self, pitches: &[Pitch]) {
        if !self.is_ready() {
            return;
        }
        self.send(Command::Release(PitchSet::from_slice(pitches)));
    }

    fn is_ready(&self) -> bool {
        self.status.get() == EngineStatus::Running
    }
}
