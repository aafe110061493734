//! Roster reminder scheduling.
//!
//! Keeps local notifications 1:1 with roster entries: every reminder is
//! keyed by the entry's id (red-eye variants by `"{id}:redeye"`), and
//! scheduling always cancels before it schedules, so editing a duty
//! replaces its reminders instead of duplicating them.
//!
//! Scheduling is best-effort and strictly subordinate to persistence: a
//! denied permission short-circuits silently, and notifier failures are
//! logged and swallowed so the CRUD operation that triggered them still
//! succeeds.

use crate::libs::duty::{DutyType, RosterEntry};
use crate::libs::settings::ReminderSettings;
use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use tracing::{debug, warn};

const RED_EYE_SUFFIX: &str = ":redeye";

/// Local departure hours considered red-eye, inclusive on both ends.
const RED_EYE_HOURS: std::ops::RangeInclusive<u32> = 0..=7;

/// A pending local notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

/// Seam over the OS-level local notification facility.
///
/// The app shell wires this to the platform's notification center; tests
/// and the default app wiring use [`LocalNotifier`].
pub trait Notifier {
    fn permission_granted(&self) -> bool;
    fn schedule(&mut self, reminder: Reminder) -> Result<()>;
    fn cancel(&mut self, id: &str) -> Result<()>;
    fn cancel_all(&mut self) -> Result<()>;
}

/// In-memory registry of pending notifications, keyed by reminder id.
#[derive(Debug, Default)]
pub struct LocalNotifier {
    permission: bool,
    pending: HashMap<String, Reminder>,
}

impl LocalNotifier {
    pub fn new(permission: bool) -> Self {
        Self {
            permission,
            pending: HashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Reminder> {
        self.pending.get(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Notifier for LocalNotifier {
    fn permission_granted(&self) -> bool {
        self.permission
    }

    fn schedule(&mut self, reminder: Reminder) -> Result<()> {
        self.pending.insert(reminder.id.clone(), reminder);
        Ok(())
    }

    fn cancel(&mut self, id: &str) -> Result<()> {
        self.pending.remove(id);
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }
}

/// Schedules and cancels duty reminders through a [`Notifier`].
///
/// Settings are passed as parameters on each call; when preferences change
/// the app calls [`reschedule_with`](Self::reschedule_with) explicitly
/// rather than this component watching anything.
pub struct ReminderScheduler<N: Notifier> {
    notifier: N,
}

impl<N: Notifier> ReminderScheduler<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// (Re)schedules the reminders for one entry.
    ///
    /// Any reminders already keyed by this entry are cancelled first, then
    /// a pre-duty reminder fires `reminder_hours_before` hours ahead of
    /// departure if that instant is still in the future. When the entry is
    /// a flight duty departing in the red-eye window (local hour 0-7) and
    /// `red_eye_hour` is set, a second reminder fires at that hour on the
    /// prior local calendar day.
    pub fn schedule_for_entry(&mut self, entry: &RosterEntry, reminder_hours_before: i64, red_eye_hour: Option<u32>, homebase: Option<&str>) {
        self.cancel_for_entry(&entry.id);

        if !self.notifier.permission_granted() {
            debug!(id = %entry.id, "notification permission not granted, skipping");
            return;
        }

        let local_departure = entry.local_departure(homebase);
        let reminder_time = entry.departure_time - Duration::hours(reminder_hours_before);

        if reminder_time > Utc::now() {
            let (title, body) = reminder_content(entry, &local_departure);
            let reminder = Reminder {
                id: entry.id.clone(),
                title,
                body,
                fire_at: reminder_time,
            };
            if let Err(e) = self.notifier.schedule(reminder) {
                warn!(id = %entry.id, error = %e, "failed to schedule duty reminder");
            }
        }

        if entry.duty_type == DutyType::FlightDuty && RED_EYE_HOURS.contains(&local_departure.hour()) {
            if let Some(hour) = red_eye_hour {
                self.schedule_red_eye(entry, &local_departure, hour);
            }
        }
    }

    /// Cancels the reminders keyed by `id` (base and red-eye). No-op when
    /// none exist.
    pub fn cancel_for_entry(&mut self, id: &str) {
        if let Err(e) = self.notifier.cancel(id) {
            warn!(id, error = %e, "failed to cancel duty reminder");
        }
        let red_eye_id = format!("{}{}", id, RED_EYE_SUFFIX);
        if let Err(e) = self.notifier.cancel(&red_eye_id) {
            warn!(id = %red_eye_id, error = %e, "failed to cancel red-eye reminder");
        }
    }

    /// Re-derives every reminder from the current preferences.
    ///
    /// Called after settings change or the roster list changes. Disabled
    /// notifications cancel everything outstanding.
    pub fn reschedule_all(&mut self, enabled: bool, reminder_hours_before: i64, red_eye_hour: Option<u32>, homebase: Option<&str>, entries: &[RosterEntry]) {
        if !enabled {
            if let Err(e) = self.notifier.cancel_all() {
                warn!(error = %e, "failed to cancel outstanding reminders");
            }
            return;
        }
        for entry in entries {
            self.schedule_for_entry(entry, reminder_hours_before, red_eye_hour, homebase);
        }
    }

    /// [`reschedule_all`](Self::reschedule_all) driven by a settings
    /// snapshot: the rest-reminder toggle gates the red-eye variant.
    pub fn reschedule_with(&mut self, settings: &ReminderSettings, entries: &[RosterEntry]) {
        let red_eye_hour = settings.rest_reminder_enabled.then_some(settings.red_eye_reminder_time);
        self.reschedule_all(
            settings.notifications_enabled,
            settings.custom_reminder_hour,
            red_eye_hour,
            Some(&settings.homebase_timezone),
            entries,
        );
    }

    fn schedule_red_eye(&mut self, entry: &RosterEntry, local_departure: &DateTime<Tz>, red_eye_hour: u32) {
        let prior_day = local_departure.date_naive() - Duration::days(1);
        let Some(local_fire) = prior_day.and_hms_opt(red_eye_hour, 0, 0) else {
            warn!(id = %entry.id, red_eye_hour, "red-eye hour out of range, skipping");
            return;
        };
        // A DST transition can skip or fold this wall-clock time; take the
        // earliest valid instant, or skip when the time does not exist.
        let Some(fire_at) = local_departure.timezone().from_local_datetime(&local_fire).earliest() else {
            warn!(id = %entry.id, "red-eye reminder time does not exist locally, skipping");
            return;
        };
        let fire_at = fire_at.with_timezone(&Utc);
        if fire_at <= Utc::now() {
            return;
        }

        let reminder = Reminder {
            id: format!("{}{}", entry.id, RED_EYE_SUFFIX),
            title: "Early departure tomorrow".to_string(),
            body: format!("Red-eye duty departs at {} local time. Get some rest tonight.", local_departure.format("%H:%M")),
            fire_at,
        };
        if let Err(e) = self.notifier.schedule(reminder) {
            warn!(id = %entry.id, error = %e, "failed to schedule red-eye reminder");
        }
    }
}

/// Reminder title and body per duty type; anything without dedicated copy
/// gets the generic form.
fn reminder_content(entry: &RosterEntry, local_departure: &DateTime<Tz>) -> (String, String) {
    let local_time = local_departure.format("%H:%M %Z");
    match entry.duty_type {
        DutyType::FlightDuty => {
            let flight = entry.flight_number.as_deref().unwrap_or("duty");
            let route = match (&entry.origin, &entry.destination) {
                (Some(o), Some(d)) => format!(" {} to {}", airport_label(o), airport_label(d)),
                (Some(o), None) => format!(" from {}", airport_label(o)),
                _ => String::new(),
            };
            (
                "Upcoming flight duty".to_string(),
                format!("Flight {}{} departs at {}.", flight, route, local_time),
            )
        }
        DutyType::Standby => (
            "Standby begins soon".to_string(),
            format!("Your standby block starts at {}. Keep your phone close.", local_time),
        ),
        DutyType::Layover => {
            let place = entry.origin.as_ref().map(|o| format!(" in {}", airport_label(o))).unwrap_or_default();
            ("Layover reminder".to_string(), format!("Layover{} starts at {}.", place, local_time))
        }
        other => (format!("Upcoming {}", duty_label(other)), format!("Your {} starts at {}.", duty_label(other), local_time)),
    }
}

fn duty_label(duty_type: DutyType) -> &'static str {
    match duty_type {
        DutyType::FlightDuty => "flight duty",
        DutyType::Standby => "standby",
        DutyType::Training => "training",
        DutyType::OffDuty => "off-duty day",
        DutyType::Layover => "layover",
        DutyType::MedicalCheck => "medical check",
        DutyType::Meeting => "meeting",
    }
}

fn airport_label(airport: &crate::db::airports::Airport) -> &str {
    airport.iata.as_deref().unwrap_or(&airport.name)
}
