use chordboard::ui::app::ChordboardApp;
use chordboard::{
    AppSettings, AtomicEngineStatus, AtomicF32, AudioEngine, EngineStatus, create_command_channel,
    create_notification_channel,
};
use std::sync::{Arc, Mutex};

// Ringbuffer capacities
// A chord trigger produces one command; even frantic playing stays far
// below these bounds, and notifications are rare.
const COMMAND_RINGBUFFER_CAPACITY: usize = 512;
const NOTIFICATION_RINGBUFFER_CAPACITY: usize = 256;

fn main() {
    println!("=== Chordboard ===\n");

    // Communication channels UI ↔ audio thread
    let (command_tx, command_rx) = create_command_channel(COMMAND_RINGBUFFER_CAPACITY);
    let (notification_tx, notification_rx) =
        create_notification_channel(NOTIFICATION_RINGBUFFER_CAPACITY);
    let notification_tx = Arc::new(Mutex::new(notification_tx));

    // Shared parameters (UI writes, audio callback reads)
    let volume = AtomicF32::new(0.5);
    let status = AtomicEngineStatus::new(EngineStatus::Starting);

    println!("Audio engine initialisation...");
    let engine = match AudioEngine::new(command_rx, notification_tx, volume.clone(), status.clone())
    {
        Ok(engine) => Some(engine),
        Err(e) => {
            // The app still runs without audio; triggers are dropped until
            // an engine is available
            eprintln!("ERROR: {}", e);
            status.set(EngineStatus::Failed);
            None
        }
    };
    // Keep the stream alive for the lifetime of the app
    let _engine = engine;

    // Load persisted settings (defaults on first run or unreadable file)
    let settings_path = AppSettings::default_path().ok();
    let settings = settings_path
        .as_ref()
        .and_then(|path| AppSettings::load(path).ok())
        .unwrap_or_default();

    println!("\n=== Chordboard started ===\n");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 560.0])
            .with_title("Chordboard"),
        ..Default::default()
    };

    let _ = eframe::run_native(
        "Chordboard",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(ChordboardApp::new(
                command_tx,
                volume,
                status,
                notification_rx,
                settings,
                settings_path,
            )))
        }),
    );
}
