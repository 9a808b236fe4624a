// Audio engine - real-time CPAL callback
//
// The engine owns the output stream and a pre-allocated voice pool. The UI
// thread talks to it exclusively through the command ringbuffer and the
// shared atomics; the callback itself never allocates, never does I/O and
// only takes non-blocking locks. Synthesis is mono, written to every
// channel of the device frame, and the device's preferred sample format
// (F32, I16 or U16) is converted at the output boundary.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

use crate::audio::dsp_utils::{OnePoleSmoother, flush_denormals_to_zero, soft_clip};
use crate::audio::parameters::AtomicF32;
use crate::audio::status::{AtomicEngineStatus, EngineStatus};
use crate::messaging::channels::{CommandConsumer, NotificationProducer};
use crate::messaging::command::Command;
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::synth::voice_pool::VoicePool;

#[derive(Debug, thiserror::Error)]
pub enum AudioEngineError {
    #[error("no audio output device found")]
    NoDevice,
    #[error("could not read the device configuration: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("could not build the output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("could not start the output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("unsupported sample format: {0:?}")]
    UnsupportedFormat(SampleFormat),
}

pub struct AudioEngine {
    _device: Device,
    _stream: Stream,
    sample_rate: f32,
    pub volume: AtomicF32,
    pub status: AtomicEngineStatus,
}

impl AudioEngine {
    pub fn new(
        command_rx: CommandConsumer,
        notification_tx: Arc<Mutex<NotificationProducer>>,
        volume: AtomicF32,
        status: AtomicEngineStatus,
    ) -> Result<Self, AudioEngineError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioEngineError::NoDevice)?;

        println!(
            "Audio device: {}",
            device.name().unwrap_or("Unknown".to_string())
        );

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        // Shared with the callback (non-blocking access only)
        let command_rx = Arc::new(Mutex::new(command_rx));
        let voice_pool = Arc::new(Mutex::new(VoicePool::new(sample_rate)));

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &config,
                channels,
                sample_rate,
                command_rx,
                voice_pool,
                volume.clone(),
                status.clone(),
                notification_tx.clone(),
            ),
            SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &config,
                channels,
                sample_rate,
                command_rx,
                voice_pool,
                volume.clone(),
                status.clone(),
                notification_tx.clone(),
            ),
            SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &config,
                channels,
                sample_rate,
                command_rx,
                voice_pool,
                volume.clone(),
                status.clone(),
                notification_tx.clone(),
            ),
            other => return Err(AudioEngineError::UnsupportedFormat(other)),
        }?;

        stream.play()?;
        status.set(EngineStatus::Running);

        println!("Audio engine started: {} Hz, {} channels", sample_rate, channels);

        if let Ok(mut tx) = notification_tx.try_lock() {
            let notif = Notification::info(
                NotificationCategory::Audio,
                format!("Audio connected: {} Hz", sample_rate),
            );
            let _ = ringbuf::traits::Producer::try_push(&mut *tx, notif);
        }

        Ok(Self {
            _device: device,
            _stream: stream,
            sample_rate,
            volume,
            status,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Build an output stream for one sample format.
    ///
    /// Synthesis happens in f32; `T::from_sample` converts at the output
    /// boundary.
    #[allow(clippy::too_many_arguments)]
    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        sample_rate: f32,
        command_rx: Arc<Mutex<CommandConsumer>>,
        voice_pool: Arc<Mutex<VoicePool>>,
        volume: AtomicF32,
        status: AtomicEngineStatus,
        notification_tx: Arc<Mutex<NotificationProducer>>,
    ) -> Result<Stream, AudioEngineError>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        // 10ms of volume smoothing avoids clicks on slider moves
        let mut volume_smoother = OnePoleSmoother::new(volume.get(), 10.0, sample_rate);

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // ========== SACRED ZONE ==========
                // No allocations, no I/O, no blocking locks

                let apply_command = |cmd: Command, pool: &mut VoicePool| match cmd {
                    Command::Attack(pitches) => {
                        for &pitch in pitches.as_slice() {
                            pool.note_on(pitch);
                        }
                    }
                    Command::Release(pitches) => {
                        for &pitch in pitches.as_slice() {
                            pool.note_off(pitch);
                        }
                    }
                    Command::SetWaveform(waveform) => {
                        pool.set_waveform(waveform);
                    }
                    Command::Quit => {}
                };

                // Drain pending commands
                if let Ok(mut rx) = command_rx.try_lock() {
                    if let Ok(mut pool) = voice_pool.try_lock() {
                        while let Some(cmd) = ringbuf::traits::Consumer::try_pop(&mut *rx) {
                            apply_command(cmd, &mut pool);
                        }
                    }
                }

                // Generate samples
                if let Ok(mut pool) = voice_pool.try_lock() {
                    for frame in data.chunks_mut(channels) {
                        let gain = volume_smoother.process(volume.get());

                        let mut sample = pool.next_sample();
                        sample = flush_denormals_to_zero(sample);
                        sample *= gain;
                        sample = soft_clip(sample);

                        let value = T::from_sample(sample);
                        for channel_sample in frame.iter_mut() {
                            *channel_sample = value;
                        }
                    }
                } else {
                    // Fallback: silence if the lock is contended
                    for sample in data.iter_mut() {
                        *sample = Sample::from_sample::<f32>(0.0);
                    }
                }
                // ========== SACRED ZONE END ==========
            },
            move |err| {
                // Error callback runs outside the audio callback; I/O is fine
                eprintln!("Audio stream error: {}", err);
                status.set(EngineStatus::Failed);

                if let Ok(mut tx) = notification_tx.try_lock() {
                    let notif = Notification::error(
                        NotificationCategory::Audio,
                        format!("Audio stream error: {}", err),
                    );
                    let _ = ringbuf::traits::Producer::try_push(&mut *tx, notif);
                }
            },
            None,
        )?;

        Ok(stream)
    }
}
