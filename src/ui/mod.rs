// UI - eframe application, piano widget and key mapping

pub mod app;
pub mod keymap;
pub mod piano;

pub use app::ChordboardApp;
