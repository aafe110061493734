//! Persisted reminder preferences.
//!
//! Small key/value settings that parameterize the scheduler. Stored as
//! JSON in the platform data directory; a missing file reads as defaults.
//! The roster core consumes these as explicit call parameters — nothing
//! subscribes to settings changes, the app calls
//! [`reschedule_with`](crate::libs::scheduler::ReminderScheduler::reschedule_with)
//! after saving.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReminderSettings {
    /// Master switch; off cancels every scheduled reminder.
    pub notifications_enabled: bool,
    /// Pre-duty reminder lead time in hours, 1-24.
    pub custom_reminder_hour: i64,
    /// Whether red-eye departures get the extra evening-before reminder.
    pub rest_reminder_enabled: bool,
    /// Hour of day (0-23) the red-eye reminder fires on the prior day.
    pub red_eye_reminder_time: u32,
    /// IANA zone used when a duty has no origin airport.
    pub homebase_timezone: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            custom_reminder_hour: 2,
            rest_reminder_enabled: true,
            red_eye_reminder_time: 21,
            homebase_timezone: "UTC".to_string(),
        }
    }
}

impl ReminderSettings {
    /// Loads settings from disk, falling back to defaults when no file
    /// exists yet.
    pub fn read() -> Result<Self> {
        let path = DataStorage::new().get_path(SETTINGS_FILE_NAME)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        let settings: Self = serde_json::from_str(&contents).map_err(|_| msg_error_anyhow!(Message::SettingsParseError))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = DataStorage::new().get_path(SETTINGS_FILE_NAME)?;
        let file = File::create(&path).map_err(|_| msg_error_anyhow!(Message::SettingsSaveError))?;
        serde_json::to_writer_pretty(file, self).map_err(|_| msg_error_anyhow!(Message::SettingsSaveError))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=24).contains(&self.custom_reminder_hour) {
            msg_bail_anyhow!(Message::ReminderHourOutOfRange(self.custom_reminder_hour));
        }
        if self.red_eye_reminder_time > 23 {
            msg_bail_anyhow!(Message::RedEyeHourOutOfRange(self.red_eye_reminder_time));
        }
        Ok(())
    }
}
