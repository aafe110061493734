//! Duty validation and overlap engine.
//!
//! Pure decision functions, no I/O. Required-field rules run first, keyed
//! by duty type; overlap is only evaluated once the candidate's fields are
//! complete. Failures come back as a [`ValidationError`] keyed by field
//! name for inline form display, never as a panic.

use crate::libs::duty::{DutyType, RosterEntry};
use thiserror::Error;

/// A structured validation failure, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Required-field rules per duty type.
///
/// FLIGHT_DUTY needs both airports and both instants. LAYOVER and STANDBY
/// need only a departure (origin optional; a layover never has a
/// destination). Ground duties need both instants and carry no airports.
pub fn validate_fields(entry: &RosterEntry) -> Result<(), ValidationError> {
    match entry.duty_type {
        DutyType::FlightDuty => {
            if entry.origin.is_none() {
                return Err(ValidationError::new("origin", "Flight duty requires an origin airport"));
            }
            if entry.destination.is_none() {
                return Err(ValidationError::new("destination", "Flight duty requires a destination airport"));
            }
            if entry.arrival_time.is_none() {
                return Err(ValidationError::new("arrival_time", "Flight duty requires an arrival time"));
            }
        }
        DutyType::Layover => {
            if entry.destination.is_some() {
                return Err(ValidationError::new("destination", "Layover does not take a destination"));
            }
        }
        DutyType::Standby => {}
        DutyType::Training | DutyType::OffDuty | DutyType::MedicalCheck | DutyType::Meeting => {
            if entry.arrival_time.is_none() {
                return Err(ValidationError::new("arrival_time", "This duty requires an end time"));
            }
            if entry.origin.is_some() || entry.destination.is_some() {
                return Err(ValidationError::new("origin", "This duty does not take airports"));
            }
        }
    }
    Ok(())
}

/// Interval overlap test against the existing entries of the same local
/// calendar day.
///
/// The candidate conflicts with an existing entry when its start falls in
/// `[existing.start, existing.end)`, OR its end falls in
/// `(existing.start, existing.end]`, OR it fully contains the existing
/// interval. This tri-condition is asymmetric at the boundaries and is
/// kept exactly as the product behaves: back-to-back duties touching at
/// one endpoint do not conflict.
///
/// `exclude_id` skips the entry being edited so it cannot collide with its
/// own stored version. Pairs where the existing entry has no arrival
/// instant cannot be evaluated and report no overlap; a candidate without
/// an arrival can still conflict by starting inside an existing interval.
///
/// Instants are absolute, so the comparison itself is timezone-independent;
/// the effective timezone matters for grouping and scheduling, not here.
pub fn has_overlap(candidate: &RosterEntry, existing: &[RosterEntry], exclude_id: Option<&str>) -> bool {
    for entry in existing {
        if exclude_id.is_some_and(|id| id == entry.id) {
            continue;
        }
        let Some(entry_end) = entry.arrival_time else { continue };
        let entry_start = entry.departure_time;

        let start_within = candidate.departure_time >= entry_start && candidate.departure_time < entry_end;
        if start_within {
            return true;
        }
        if let Some(candidate_end) = candidate.arrival_time {
            let end_within = candidate_end > entry_start && candidate_end <= entry_end;
            let contains = candidate.departure_time <= entry_start && candidate_end >= entry_end;
            if end_within || contains {
                return true;
            }
        }
    }
    false
}

/// Full pre-persist check: required fields first, then overlap. A missing
/// field short-circuits before overlap is even considered.
pub fn validate(candidate: &RosterEntry, existing: &[RosterEntry], exclude_id: Option<&str>) -> Result<(), ValidationError> {
    validate_fields(candidate)?;
    if has_overlap(candidate, existing, exclude_id) {
        return Err(ValidationError::new("departure_time", "This duty overlaps an existing entry"));
    }
    Ok(())
}
