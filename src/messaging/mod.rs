// Messaging - lock-free communication between the UI and audio threads

pub mod channels;
pub mod command;
pub mod notification;

pub use channels::{
    CommandConsumer, CommandProducer, NotificationConsumer, NotificationProducer,
    create_command_channel, create_notification_channel,
};
pub use command::{Command, MAX_CHORD_NOTES, PitchSet};
pub use notification::{Notification, NotificationCategory, NotificationLevel};
