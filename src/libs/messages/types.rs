#[derive(Debug, Clone)]
pub enum Message {
    // === STORE MESSAGES ===
    SeedDatasetInvalid(String),

    // === ROSTER MESSAGES ===
    RosterEntryIdTaken(String),
    RosterUserRequired,

    // === SETTINGS MESSAGES ===
    SettingsParseError,
    SettingsSaveError,
    ReminderHourOutOfRange(i64),
    RedEyeHourOutOfRange(u32),
}
