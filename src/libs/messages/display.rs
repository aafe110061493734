//! Display implementation for crewroster messages.
//!
//! Single source of truth for error text this library produces. The
//! consuming app decides how to surface it; structured validation errors
//! carry their own field-keyed text and do not pass through here.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === STORE MESSAGES ===
            Message::SeedDatasetInvalid(name) => format!("Bundled reference dataset '{}' is invalid", name),

            // === ROSTER MESSAGES ===
            Message::RosterEntryIdTaken(id) => format!("Roster entry id '{}' already exists", id),
            Message::RosterUserRequired => "Roster entry requires a user id".to_string(),

            // === SETTINGS MESSAGES ===
            Message::SettingsParseError => "Failed to parse settings file".to_string(),
            Message::SettingsSaveError => "Failed to save settings file".to_string(),
            Message::ReminderHourOutOfRange(hours) => format!("Reminder lead time must be between 1 and 24 hours, got {}", hours),
            Message::RedEyeHourOutOfRange(hour) => format!("Red-eye reminder hour must be between 0 and 23, got {}", hour),
        };
        write!(f, "{}", text)
    }
}
