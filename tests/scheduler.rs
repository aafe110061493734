#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use crewroster::db::airports::Airport;
    use crewroster::libs::duty::{DutyType, RosterEntry};
    use crewroster::libs::scheduler::{LocalNotifier, Notifier, Reminder, ReminderScheduler};
    use crewroster::libs::settings::ReminderSettings;

    fn sin() -> Airport {
        Airport {
            id: "WSSS".to_string(),
            iata: Some("SIN".to_string()),
            icao: Some("WSSS".to_string()),
            name: "Singapore Changi Airport".to_string(),
            city: Some("Singapore".to_string()),
            country: Some("Singapore".to_string()),
            latitude: Some(1.3644),
            longitude: Some(103.9915),
            tz_database: "Asia/Singapore".to_string(),
        }
    }

    fn lhr() -> Airport {
        Airport {
            id: "EGLL".to_string(),
            iata: Some("LHR".to_string()),
            icao: Some("EGLL".to_string()),
            name: "London Heathrow Airport".to_string(),
            city: Some("London".to_string()),
            country: Some("United Kingdom".to_string()),
            latitude: Some(51.47),
            longitude: Some(-0.4543),
            tz_database: "Europe/London".to_string(),
        }
    }

    fn flight_departing(departure: DateTime<Utc>) -> RosterEntry {
        RosterEntry::flight_duty(
            "crew-1",
            sin(),
            lhr(),
            departure,
            departure + Duration::hours(13),
            Some("SQ322".to_string()),
            None,
        )
    }

    #[test]
    fn test_scheduling_is_idempotent() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        // 06:00Z = 14:00 Singapore local, outside the red-eye window
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 1, 6, 0, 0).unwrap());

        scheduler.schedule_for_entry(&entry, 2, Some(21), None);
        scheduler.schedule_for_entry(&entry, 2, Some(21), None);

        assert_eq!(scheduler.notifier().pending_count(), 1);
        let reminder = scheduler.notifier().get(&entry.id).unwrap();
        assert_eq!(reminder.fire_at, entry.departure_time - Duration::hours(2));
    }

    #[test]
    fn test_red_eye_departure_gets_two_reminders() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        // 19:00Z on June 2nd = 03:00 on June 3rd Singapore local
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 2, 19, 0, 0).unwrap());

        scheduler.schedule_for_entry(&entry, 2, Some(21), None);

        assert_eq!(scheduler.notifier().pending_count(), 2);
        let red_eye = scheduler.notifier().get(&format!("{}:redeye", entry.id)).unwrap();
        // 21:00 on June 2nd Singapore local (the night before the duty day)
        assert_eq!(red_eye.fire_at, Utc.with_ymd_and_hms(2030, 6, 2, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_daytime_departure_gets_only_base_reminder() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 1, 6, 0, 0).unwrap());

        scheduler.schedule_for_entry(&entry, 2, Some(21), None);

        assert_eq!(scheduler.notifier().pending_count(), 1);
        assert!(scheduler.notifier().get(&format!("{}:redeye", entry.id)).is_none());
    }

    #[test]
    fn test_red_eye_window_uses_local_hour_not_utc() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        // The SIN/LHR scenario from the product walkthrough: 22:00Z looks
        // like evening in UTC but is 06:00 next day in Singapore, squarely
        // inside the [0, 7] red-eye window.
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 1, 22, 0, 0).unwrap());

        scheduler.schedule_for_entry(&entry, 2, Some(21), None);

        assert_eq!(scheduler.notifier().pending_count(), 2);
        let base = scheduler.notifier().get(&entry.id).unwrap();
        assert_eq!(base.fire_at, Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).unwrap());
        // Prior Singapore calendar day is June 1st; 21:00 local = 13:00Z
        let red_eye = scheduler.notifier().get(&format!("{}:redeye", entry.id)).unwrap();
        assert_eq!(red_eye.fire_at, Utc.with_ymd_and_hms(2030, 6, 1, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_red_eye_disabled_by_missing_hour() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 2, 19, 0, 0).unwrap());

        scheduler.schedule_for_entry(&entry, 2, None, None);

        assert_eq!(scheduler.notifier().pending_count(), 1);
    }

    #[test]
    fn test_past_departure_schedules_nothing() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        let entry = flight_departing(Utc.with_ymd_and_hms(2020, 6, 1, 6, 0, 0).unwrap());

        scheduler.schedule_for_entry(&entry, 2, Some(21), None);

        assert_eq!(scheduler.notifier().pending_count(), 0);
    }

    #[test]
    fn test_permission_denied_short_circuits() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(false));
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 1, 6, 0, 0).unwrap());

        scheduler.schedule_for_entry(&entry, 2, Some(21), None);

        assert_eq!(scheduler.notifier().pending_count(), 0);
    }

    #[test]
    fn test_cancel_removes_both_variants() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 2, 19, 0, 0).unwrap());
        scheduler.schedule_for_entry(&entry, 2, Some(21), None);
        assert_eq!(scheduler.notifier().pending_count(), 2);

        scheduler.cancel_for_entry(&entry.id);
        assert_eq!(scheduler.notifier().pending_count(), 0);

        // Cancelling again is a no-op
        scheduler.cancel_for_entry(&entry.id);
    }

    #[test]
    fn test_disabled_settings_cancel_everything() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        let entries = vec![
            flight_departing(Utc.with_ymd_and_hms(2030, 6, 1, 6, 0, 0).unwrap()),
            flight_departing(Utc.with_ymd_and_hms(2030, 6, 2, 19, 0, 0).unwrap()),
        ];
        scheduler.reschedule_all(true, 2, Some(21), None, &entries);
        assert!(scheduler.notifier().pending_count() > 0);

        scheduler.reschedule_all(false, 2, Some(21), None, &entries);
        assert_eq!(scheduler.notifier().pending_count(), 0);
    }

    #[test]
    fn test_reschedule_with_settings_snapshot() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        let entries = vec![flight_departing(Utc.with_ymd_and_hms(2030, 6, 2, 19, 0, 0).unwrap())];

        let mut settings = ReminderSettings::default();
        settings.custom_reminder_hour = 3;
        scheduler.reschedule_with(&settings, &entries);
        assert_eq!(scheduler.notifier().pending_count(), 2);
        let base = scheduler.notifier().get(&entries[0].id).unwrap();
        assert_eq!(base.fire_at, entries[0].departure_time - Duration::hours(3));

        // Rest reminder off drops the red-eye variant
        settings.rest_reminder_enabled = false;
        scheduler.reschedule_with(&settings, &entries);
        assert_eq!(scheduler.notifier().pending_count(), 1);

        settings.notifications_enabled = false;
        scheduler.reschedule_with(&settings, &entries);
        assert_eq!(scheduler.notifier().pending_count(), 0);
    }

    #[test]
    fn test_reminder_content_varies_by_duty_type() {
        let mut scheduler = ReminderScheduler::new(LocalNotifier::new(true));
        let start = Utc.with_ymd_and_hms(2030, 6, 1, 6, 0, 0).unwrap();

        let flight = flight_departing(start);
        let standby = RosterEntry::standby("crew-1", start, None, None);
        let training = RosterEntry::ground(DutyType::Training, "crew-1", start, start + Duration::hours(4));

        scheduler.schedule_for_entry(&flight, 2, None, None);
        scheduler.schedule_for_entry(&standby, 2, None, None);
        scheduler.schedule_for_entry(&training, 2, None, None);

        let flight_reminder = scheduler.notifier().get(&flight.id).unwrap();
        assert!(flight_reminder.body.contains("SQ322"));
        assert!(flight_reminder.body.contains("SIN"));

        let standby_reminder = scheduler.notifier().get(&standby.id).unwrap();
        assert!(standby_reminder.title.to_lowercase().contains("standby"));

        let training_reminder = scheduler.notifier().get(&training.id).unwrap();
        assert!(training_reminder.title.to_lowercase().contains("training"));
    }

    /// Notifier that always fails; scheduling failures must be swallowed so
    /// the CRUD operation that triggered them still succeeds.
    struct BrokenNotifier;

    impl Notifier for BrokenNotifier {
        fn permission_granted(&self) -> bool {
            true
        }
        fn schedule(&mut self, _reminder: Reminder) -> Result<()> {
            anyhow::bail!("notification center unavailable")
        }
        fn cancel(&mut self, _id: &str) -> Result<()> {
            anyhow::bail!("notification center unavailable")
        }
        fn cancel_all(&mut self) -> Result<()> {
            anyhow::bail!("notification center unavailable")
        }
    }

    #[test]
    fn test_notifier_failures_are_swallowed() {
        // Surface the swallowed warnings when RUST_LOG is set
        let _ = tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).try_init();

        let mut scheduler = ReminderScheduler::new(BrokenNotifier);
        let entry = flight_departing(Utc.with_ymd_and_hms(2030, 6, 2, 19, 0, 0).unwrap());

        // None of these panic or propagate
        scheduler.schedule_for_entry(&entry, 2, Some(21), None);
        scheduler.cancel_for_entry(&entry.id);
        scheduler.reschedule_all(false, 2, Some(21), None, &[entry]);
    }
}
