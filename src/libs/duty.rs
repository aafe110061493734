//! Roster entry domain model.
//!
//! A [`RosterEntry`] is the core mutable entity of the store: one duty on a
//! crew member's roster. Entries are a closed union over [`DutyType`]; each
//! smart constructor sets exactly the field set valid for its variant, and
//! [`validation`](crate::libs::validation) enforces the same table before
//! anything is persisted.
//!
//! Departure and arrival are absolute instants (`DateTime<Utc>`). Local-time
//! decisions (calendar-day grouping, red-eye detection) interpret them in the
//! origin airport's IANA timezone when one is present, else a supplied
//! homebase timezone, else UTC.

use crate::db::aircrafts::AircraftType;
use crate::db::airports::Airport;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Closed set of duty kinds a roster entry can carry.
///
/// Stored as TEXT in the database; `Display` and `FromStr` round-trip the
/// storage form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DutyType {
    FlightDuty,
    Standby,
    Training,
    OffDuty,
    Layover,
    MedicalCheck,
    Meeting,
}

impl DutyType {
    /// Ground duties need departure and arrival but never airports.
    pub fn is_ground(&self) -> bool {
        matches!(self, DutyType::Training | DutyType::OffDuty | DutyType::MedicalCheck | DutyType::Meeting)
    }
}

impl fmt::Display for DutyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            DutyType::FlightDuty => "FLIGHT_DUTY",
            DutyType::Standby => "STANDBY",
            DutyType::Training => "TRAINING",
            DutyType::OffDuty => "OFF_DUTY",
            DutyType::Layover => "LAYOVER",
            DutyType::MedicalCheck => "MEDICAL_CHECK",
            DutyType::Meeting => "MEETING",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DutyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLIGHT_DUTY" => Ok(DutyType::FlightDuty),
            "STANDBY" => Ok(DutyType::Standby),
            "TRAINING" => Ok(DutyType::Training),
            "OFF_DUTY" => Ok(DutyType::OffDuty),
            "LAYOVER" => Ok(DutyType::Layover),
            "MEDICAL_CHECK" => Ok(DutyType::MedicalCheck),
            "MEETING" => Ok(DutyType::Meeting),
            other => Err(format!("unknown duty type '{}'", other)),
        }
    }
}

/// One duty on a crew member's roster.
///
/// `id` is client-generated and stable for the entry's whole lifetime,
/// including through edits and offline/online transitions. Origin,
/// destination and aircraft are carried as full reference objects; the
/// repository flattens them to foreign-key strings on write and re-joins
/// them on read.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub id: String,
    pub user_id: String,
    pub duty_type: DutyType,
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub flight_number: Option<String>,
    pub aircraft_type: Option<AircraftType>,
    pub notes: Option<String>,
    /// 0 until the entry has been pushed to the remote system. Kept for
    /// future bidirectional sync; the core operates fully offline.
    pub synced: bool,
    /// Soft-delete marker filtered out of all reads.
    pub pending_deletion: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RosterEntry {
    fn base(user_id: &str, duty_type: DutyType, departure_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            duty_type,
            origin: None,
            destination: None,
            departure_time,
            arrival_time: None,
            flight_number: None,
            aircraft_type: None,
            notes: None,
            synced: false,
            pending_deletion: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// A flight duty between two airports.
    pub fn flight_duty(
        user_id: &str,
        origin: Airport,
        destination: Airport,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
        flight_number: Option<String>,
        aircraft_type: Option<AircraftType>,
    ) -> Self {
        let mut entry = Self::base(user_id, DutyType::FlightDuty, departure_time);
        entry.origin = Some(origin);
        entry.destination = Some(destination);
        entry.arrival_time = Some(arrival_time);
        entry.flight_number = flight_number;
        entry.aircraft_type = aircraft_type;
        entry
    }

    /// A standby block starting at `start_time`, optionally tied to an
    /// airport and a flight number to cover.
    pub fn standby(user_id: &str, start_time: DateTime<Utc>, origin: Option<Airport>, flight_number: Option<String>) -> Self {
        let mut entry = Self::base(user_id, DutyType::Standby, start_time);
        entry.origin = origin;
        entry.flight_number = flight_number;
        entry
    }

    /// A layover at `origin`; layovers carry no destination.
    pub fn layover(user_id: &str, origin: Airport, departure_time: DateTime<Utc>) -> Self {
        let mut entry = Self::base(user_id, DutyType::Layover, departure_time);
        entry.origin = Some(origin);
        entry
    }

    /// A ground duty (training, off duty, medical check, meeting): timed
    /// interval, no airports. The validation table rejects airport fields
    /// on these variants either way.
    pub fn ground(duty_type: DutyType, user_id: &str, departure_time: DateTime<Utc>, arrival_time: DateTime<Utc>) -> Self {
        let mut entry = Self::base(user_id, duty_type, departure_time);
        entry.arrival_time = Some(arrival_time);
        entry
    }

    /// Resolves the timezone this entry's instants are interpreted in:
    /// the origin airport's IANA zone, else `homebase`, else UTC.
    /// Unparseable zone names fall through to the next candidate.
    pub fn effective_timezone(&self, homebase: Option<&str>) -> Tz {
        self.origin
            .as_ref()
            .and_then(|airport| airport.tz_database.parse::<Tz>().ok())
            .or_else(|| homebase.and_then(|name| name.parse::<Tz>().ok()))
            .unwrap_or(Tz::UTC)
    }

    /// Departure as a wall-clock time in the effective timezone.
    pub fn local_departure(&self, homebase: Option<&str>) -> DateTime<Tz> {
        self.departure_time.with_timezone(&self.effective_timezone(homebase))
    }
}

/// Groups entries by the local calendar date they depart on.
///
/// Ordering within a day follows departure instants; the repository itself
/// guarantees no ordering, so the calendar view goes through this.
pub trait DutyDay {
    fn group_by_local_date(self, homebase: Option<&str>) -> BTreeMap<NaiveDate, Vec<RosterEntry>>;
}

impl DutyDay for Vec<RosterEntry> {
    fn group_by_local_date(self, homebase: Option<&str>) -> BTreeMap<NaiveDate, Vec<RosterEntry>> {
        let mut days: BTreeMap<NaiveDate, Vec<RosterEntry>> = BTreeMap::new();
        for entry in self {
            let date = entry.local_departure(homebase).date_naive();
            days.entry(date).or_default().push(entry);
        }
        for entries in days.values_mut() {
            entries.sort_by_key(|e| e.departure_time);
        }
        days
    }
}
