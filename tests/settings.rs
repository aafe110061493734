#[cfg(test)]
mod tests {
    use crewroster::libs::settings::ReminderSettings;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SettingsTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for SettingsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SettingsTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_missing_file_reads_as_defaults(_ctx: &mut SettingsTestContext) {
        let settings = ReminderSettings::read().unwrap();
        assert_eq!(settings, ReminderSettings::default());
        assert!(settings.notifications_enabled);
        assert_eq!(settings.custom_reminder_hour, 2);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_save_and_read_round_trip(_ctx: &mut SettingsTestContext) {
        let settings = ReminderSettings {
            notifications_enabled: false,
            custom_reminder_hour: 6,
            rest_reminder_enabled: false,
            red_eye_reminder_time: 20,
            homebase_timezone: "Europe/Amsterdam".to_string(),
        };
        settings.save().unwrap();

        let loaded = ReminderSettings::read().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_out_of_range_values_are_rejected(_ctx: &mut SettingsTestContext) {
        let mut settings = ReminderSettings::default();
        settings.custom_reminder_hour = 0;
        assert!(settings.save().is_err());

        settings.custom_reminder_hour = 25;
        assert!(settings.validate().is_err());

        settings.custom_reminder_hour = 24;
        settings.red_eye_reminder_time = 24;
        assert!(settings.validate().is_err());

        settings.red_eye_reminder_time = 23;
        assert!(settings.validate().is_ok());
    }
}
