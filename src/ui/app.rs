// Main application UI
//
// The app owns the whole event engine (router, recorder, player) and talks
// to the audio thread through the command sink. All engine calls receive a
// copy of the current performance settings, so a press and its matching
// release can resolve against different UI states without confusing the
// voice tracker.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Instant;

use eframe::egui;

use crate::audio::parameters::AtomicF32;
use crate::audio::status::{AtomicEngineStatus, EngineStatus};
use crate::engine::router::{HOME_OCTAVE, InputRouter, PlayMode};
use crate::engine::sink::CommandSink;
use crate::messaging::channels::{CommandProducer, NotificationConsumer};
use crate::messaging::command::Command;
use crate::messaging::notification::{Notification, NotificationCategory, NotificationLevel};
use crate::sequencer::player::SequencePlayer;
use crate::sequencer::recorder::ChordRecorder;
use crate::settings::AppSettings;
use crate::synth::oscillator::ALL_WAVEFORMS;
use crate::theory::chord::{ALL_CHORD_TYPES, ALL_QUALITIES, ordinal_suffix};
use crate::theory::pitch::Pitch;
use crate::ui::keymap;
use crate::ui::piano::{self, PianoAction};

pub struct ChordboardApp {
    sink: CommandSink,
    router: InputRouter,
    recorder: ChordRecorder,
    player: SequencePlayer,
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    volume: AtomicF32,
    status: AtomicEngineStatus,
    /// Piano key currently held with the pointer
    pointer_held: Option<Pitch>,
    // Notification system
    notification_rx: NotificationConsumer,
    notification_queue: VecDeque<Notification>,
    max_notifications: usize,
}

impl ChordboardApp {
    pub fn new(
        command_tx: CommandProducer,
        volume: AtomicF32,
        status: AtomicEngineStatus,
        notification_rx: NotificationConsumer,
        settings: AppSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        volume.set(settings.volume);

        let mut sink = CommandSink::new(command_tx, status.clone());
        sink.send(Command::SetWaveform(settings.waveform));

        Self {
            sink,
            router: InputRouter::new(),
            recorder: ChordRecorder::new(),
            player: SequencePlayer::new(),
            settings,
            settings_path,
            volume,
            status,
            pointer_held: None,
            notification_rx,
            notification_queue: VecDeque::new(),
            max_notifications: 10,
        }
    }

    /// Pull new notifications from the ringbuffer into the display queue
    fn update_notifications(&mut self) {
        while let Some(notification) =
            ringbuf::traits::Consumer::try_pop(&mut self.notification_rx)
        {
            self.notification_queue.push_back(notification);
            if self.notification_queue.len() > self.max_notifications {
                self.notification_queue.pop_front();
            }
        }
    }

    /// Notifications younger than 5 seconds, newest first
    fn recent_notifications(&self) -> Vec<&Notification> {
        self.notification_queue
            .iter()
            .rev()
            .filter(|n| n.is_recent(5000))
            .take(3)
            .collect()
    }

    fn save_settings(&mut self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            self.notification_queue.push_back(Notification::warning(
                NotificationCategory::Settings,
                format!("Could not save settings: {}", e),
            ));
        }
    }

    /// Translate physical key events into router calls.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // Keys typed into a focused text widget are not note input
        if ctx.wants_keyboard_input() {
            return;
        }

        let events = ctx.input(|i| i.events.clone());
        for event in events {
            let egui::Event::Key {
                key,
                pressed,
                repeat,
                modifiers,
                ..
            } = event
            else {
                continue;
            };
            // A key held down must not re-trigger
            if repeat {
                continue;
            }

            let perf = self.settings.performance;
            if pressed {
                if let Some(class) = keymap::key_to_pitch_class(key) {
                    let octave = perf.resolve_octave(modifiers.shift);
                    self.router
                        .press(class, octave, &perf, &mut self.sink, &mut self.recorder);
                } else if let Some(inversion) = keymap::key_to_inversion(key) {
                    self.router.set_temporary_inversion(inversion, &perf);
                } else if key == keymap::SEVENTH_KEY {
                    self.router.set_temporary_seventh(&perf);
                }
            } else if let Some(class) = keymap::key_to_pitch_class(key) {
                let octave = perf.resolve_octave(modifiers.shift);
                self.router.release(class, octave, &perf, &mut self.sink);
            } else if keymap::key_to_inversion(key).is_some() {
                self.router.clear_temporary_inversion();
            } else if key == keymap::SEVENTH_KEY {
                self.router.clear_temporary_seventh();
            }
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        let mut settings_changed = false;

        ui.horizontal(|ui| {
            ui.label("Play mode:");
            let mode = &mut self.settings.performance.play_mode;
            egui::ComboBox::from_id_salt("play_mode_selector")
                .selected_text(match mode {
                    PlayMode::Chord => "Chord",
                    PlayMode::Note => "Single Note",
                })
                .show_ui(ui, |ui| {
                    settings_changed |= ui
                        .selectable_value(mode, PlayMode::Chord, "Chord")
                        .changed();
                    settings_changed |= ui
                        .selectable_value(mode, PlayMode::Note, "Single Note")
                        .changed();
                });

            ui.add_space(10.0);
            ui.label("Octave shift:");
            let shift_response =
                ui.add(egui::Slider::new(&mut self.settings.performance.octave_shift, -2..=2));
            settings_changed |= shift_response.changed();
        });

        if self.settings.performance.play_mode == PlayMode::Chord {
            ui.horizontal(|ui| {
                ui.label("Quality:");
                let quality = &mut self.settings.performance.quality;
                let mut shape_changed = false;
                egui::ComboBox::from_id_salt("quality_selector")
                    .selected_text(quality.name())
                    .show_ui(ui, |ui| {
                        for candidate in ALL_QUALITIES {
                            shape_changed |= ui
                                .selectable_value(quality, candidate, candidate.name())
                                .changed();
                        }
                    });

                ui.label("Type:");
                let chord_type = &mut self.settings.performance.chord_type;
                egui::ComboBox::from_id_salt("chord_type_selector")
                    .selected_text(chord_type.name())
                    .show_ui(ui, |ui| {
                        for candidate in ALL_CHORD_TYPES {
                            shape_changed |= ui
                                .selectable_value(chord_type, candidate, candidate.name())
                                .changed();
                        }
                    });

                // Changing the chord shape resets the voicing
                if shape_changed {
                    self.settings.performance.inversion = 0;
                    settings_changed = true;
                }

                ui.label("Inversion:");
                let max_inversion = self.settings.performance.max_inversion();
                let inversion = &mut self.settings.performance.inversion;
                egui::ComboBox::from_id_salt("inversion_selector")
                    .selected_text(inversion_label(*inversion))
                    .show_ui(ui, |ui| {
                        for candidate in 0..=max_inversion {
                            settings_changed |= ui
                                .selectable_value(inversion, candidate, inversion_label(candidate))
                                .changed();
                        }
                    });
            });
        }

        ui.horizontal(|ui| {
            ui.label("Volume:");
            let volume_response = ui.add(egui::Slider::new(&mut self.settings.volume, 0.0..=1.0));
            if volume_response.changed() {
                self.volume.set(self.settings.volume);
            }
            settings_changed |= volume_response.drag_stopped();

            ui.add_space(10.0);
            ui.label("Waveform:");
            let waveform = &mut self.settings.waveform;
            let mut waveform_changed = false;
            egui::ComboBox::from_id_salt("waveform_selector")
                .selected_text(waveform.name())
                .show_ui(ui, |ui| {
                    for candidate in ALL_WAVEFORMS {
                        waveform_changed |= ui
                            .selectable_value(waveform, candidate, candidate.name())
                            .changed();
                    }
                });
            if waveform_changed {
                let waveform = self.settings.waveform;
                self.sink.send(Command::SetWaveform(waveform));
                settings_changed = true;
            }
        });

        if settings_changed {
            self.save_settings();
        }
    }

    fn draw_piano(&mut self, ui: &mut egui::Ui) {
        let active: HashSet<Pitch> = self.router.voices().active_keys().copied().collect();
        let start_octave = HOME_OCTAVE + self.settings.performance.octave_shift;

        let actions = piano::piano_keyboard(ui, start_octave, &active, &mut self.pointer_held);
        for action in actions {
            let perf = self.settings.performance;
            match action {
                PianoAction::Pressed(pitch) => {
                    self.router.press(
                        pitch.class,
                        pitch.octave,
                        &perf,
                        &mut self.sink,
                        &mut self.recorder,
                    );
                }
                PianoAction::Released(pitch) => {
                    self.router
                        .release(pitch.class, pitch.octave, &perf, &mut self.sink);
                }
            }
        }

        ui.label("Keys: A S D F G H J naturals, W E T Y U sharps · Shift = +1 octave");
        ui.label("Hold 1-3 for a temporary inversion, hold 7 for the seventh");
    }

    fn draw_recorder(&mut self, ui: &mut egui::Ui) {
        ui.heading("Recorder");

        ui.horizontal(|ui| {
            let recording = self.recorder.is_recording();
            let playing = self.player.is_playing();

            let record_label = if recording {
                "⏹ Stop recording"
            } else {
                "⏺ Record"
            };
            if ui
                .add_enabled(!playing, egui::Button::new(record_label))
                .clicked()
            {
                if recording {
                    self.recorder.stop();
                } else {
                    self.recorder.start();
                }
            }

            let can_play = !playing && !recording && !self.recorder.is_empty();
            if ui.add_enabled(can_play, egui::Button::new("▶ Play")).clicked() {
                self.player
                    .play(self.recorder.events(), &mut self.sink, Instant::now());
            }

            if ui.add_enabled(playing, egui::Button::new("⏹ Stop")).clicked() {
                self.player.request_stop();
            }

            let can_clear = !playing && !self.recorder.is_empty();
            if ui.add_enabled(can_clear, egui::Button::new("Clear")).clicked() {
                self.recorder.clear();
            }

            if recording {
                ui.colored_label(egui::Color32::RED, "● REC");
            }
        });

        let current = self.player.current_index();
        egui::ScrollArea::vertical()
            .max_height(120.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if self.recorder.is_empty() {
                    ui.label("No chords recorded");
                }
                for (i, event) in self.recorder.events().iter().enumerate() {
                    let text = format!("{:>2}. {}", i + 1, event.label());
                    if current == Some(i) {
                        ui.colored_label(egui::Color32::from_rgb(100, 150, 255), text);
                    } else {
                        ui.label(text);
                    }
                }
            });
    }

    /// Status bar at the bottom of the window
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.separator();
        ui.horizontal(|ui| {
            let status = self.status.get();
            let color = match status {
                EngineStatus::Running => egui::Color32::GREEN,
                EngineStatus::Starting => egui::Color32::YELLOW,
                EngineStatus::Failed => egui::Color32::RED,
            };
            ui.colored_label(color, "●");
            ui.label(status.label());
            ui.add_space(10.0);

            let recent = self.recent_notifications();
            if recent.is_empty() {
                ui.label("Ready");
            } else {
                for notification in recent {
                    let (icon, color) = match notification.level {
                        NotificationLevel::Info => ("ℹ", egui::Color32::from_rgb(100, 150, 255)),
                        NotificationLevel::Warning => ("⚠", egui::Color32::from_rgb(255, 165, 0)),
                        NotificationLevel::Error => ("✖", egui::Color32::RED),
                    };
                    ui.colored_label(color, icon);
                    ui.colored_label(color, &notification.message);
                    ui.add_space(10.0);
                }
            }
        });
    }
}

impl eframe::App for ChordboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
        self.sink.send(Command::Quit);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint continuously to capture key events and pace playback
        ctx.request_repaint();

        self.update_notifications();
        self.handle_keyboard(ctx);

        // Advance playback
        self.player
            .tick(self.recorder.events(), &mut self.sink, Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Chordboard");
            ui.separator();
            ui.add_space(5.0);

            self.draw_controls(ui);

            ui.add_space(10.0);
            self.draw_piano(ui);

            ui.add_space(10.0);
            ui.separator();
            self.draw_recorder(ui);

            ui.add_space(10.0);
            self.draw_status_bar(ui);
        });
    }
}

fn inversion_label(inversion: u8) -> String {
    if inversion == 0 {
        "Root Position".to_string()
    } else {
        format!("{}{} Inversion", inversion, ordinal_suffix(inversion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inversion_labels() {
        assert_eq!(inversion_label(0), "Root Position");
        assert_eq!(inversion_label(1), "1st Inversion");
        assert_eq!(inversion_label(2), "2nd Inversion");
        assert_eq!(inversion_label(3), "3rd Inversion");
    }
}
