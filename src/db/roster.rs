//! Roster entry repository.
//!
//! The only component that touches roster SQL. Translates between the
//! app's view of an entry (nested origin/destination/aircraft objects) and
//! the flat storage row (foreign-key strings), and provides the CRUD
//! surface. Reads enrich rows with joined reference data; a foreign key
//! with no matching reference row yields `None` for that side rather than
//! an error. Rows flagged `pending_deletion` are filtered from every read.
//!
//! The repository never schedules notifications; that stays with the
//! scheduler so this module has no dependency on the notification
//! subsystem.

use crate::db::aircrafts::{AircraftType, SCHEMA_AIRCRAFTS};
use crate::db::airports::{Airport, SCHEMA_AIRPORTS};
use crate::db::db::Db;
use crate::libs::duty::{DutyType, RosterEntry};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::str::FromStr;
use tracing::debug;

pub(crate) const SCHEMA_ROSTER_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS roster_entries (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    duty_type TEXT NOT NULL,
    origin TEXT REFERENCES airports(id),
    destination TEXT REFERENCES airports(id),
    departure_time TIMESTAMP NOT NULL,
    arrival_time TIMESTAMP,
    flight_number TEXT,
    aircraft_type TEXT REFERENCES aircrafts(id),
    notes TEXT,
    synced INTEGER NOT NULL DEFAULT 0,
    pending_deletion INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_ENTRY: &str = "INSERT INTO roster_entries
    (id, user_id, duty_type, origin, destination, departure_time, arrival_time, flight_number, aircraft_type, notes, synced, pending_deletion)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPDATE_ENTRY: &str = "UPDATE roster_entries SET
    duty_type = ?2, origin = ?3, destination = ?4, departure_time = ?5, arrival_time = ?6,
    flight_number = ?7, aircraft_type = ?8, notes = ?9, synced = ?10,
    updated_at = CURRENT_TIMESTAMP
    WHERE id = ?1";
const DELETE_ENTRY: &str = "DELETE FROM roster_entries WHERE id = ?1";
const MARK_SYNCED: &str = "UPDATE roster_entries SET synced = 1, updated_at = CURRENT_TIMESTAMP WHERE id = ?1";

const ENTRY_COLUMNS: &str = "
    r.id, r.user_id, r.duty_type, r.departure_time, r.arrival_time, r.flight_number, r.notes,
    r.synced, r.pending_deletion, r.created_at, r.updated_at,
    o.id, o.iata, o.icao, o.name, o.city, o.country, o.latitude, o.longitude, o.tz_database,
    d.id, d.iata, d.icao, d.name, d.city, d.country, d.latitude, d.longitude, d.tz_database,
    a.id, a.model, a.manufacturer, a.iata_code, a.icao_code";
const ENTRY_JOINS: &str = "
    FROM roster_entries r
    LEFT JOIN airports o ON r.origin = o.id
    LEFT JOIN airports d ON r.destination = d.id
    LEFT JOIN aircrafts a ON r.aircraft_type = a.id";

pub struct RosterEntries {
    conn: Connection,
}

impl RosterEntries {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        // Reference tables first; roster_entries declares FKs into them.
        db.conn.execute(SCHEMA_AIRPORTS, [])?;
        db.conn.execute(SCHEMA_AIRCRAFTS, [])?;
        db.conn.execute(SCHEMA_ROSTER_ENTRIES, [])?;
        Ok(Self { conn: db.conn })
    }

    /// Inserts a new entry and returns its id.
    ///
    /// The id is caller-supplied (the smart constructors generate a UUID)
    /// and must be unique; `user_id` must be non-empty. Does not schedule
    /// notifications.
    pub fn insert(&mut self, entry: &RosterEntry) -> Result<String> {
        if entry.user_id.is_empty() {
            return Err(msg_error_anyhow!(Message::RosterUserRequired));
        }
        let result = self.conn.execute(
            INSERT_ENTRY,
            params![
                entry.id,
                entry.user_id,
                entry.duty_type.to_string(),
                entry.origin.as_ref().map(|a| a.id.as_str()),
                entry.destination.as_ref().map(|a| a.id.as_str()),
                entry.departure_time,
                entry.arrival_time,
                entry.flight_number,
                entry.aircraft_type.as_ref().map(|a| a.id.as_str()),
                entry.notes,
                entry.synced,
                entry.pending_deletion,
            ],
        );
        match result {
            Ok(_) => {
                debug!(id = %entry.id, duty = %entry.duty_type, "inserted roster entry");
                Ok(entry.id.clone())
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(msg_error_anyhow!(Message::RosterEntryIdTaken(entry.id.clone())))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full replace of the mutable fields of an existing entry.
    ///
    /// Returns the number of rows affected. A missing id reports 0 rather
    /// than erroring; the caller decides whether that matters. `id`,
    /// `user_id` and `created_at` never change.
    pub fn update(&mut self, id: &str, entry: &RosterEntry) -> Result<usize> {
        let affected = self.conn.execute(
            UPDATE_ENTRY,
            params![
                id,
                entry.duty_type.to_string(),
                entry.origin.as_ref().map(|a| a.id.as_str()),
                entry.destination.as_ref().map(|a| a.id.as_str()),
                entry.departure_time,
                entry.arrival_time,
                entry.flight_number,
                entry.aircraft_type.as_ref().map(|a| a.id.as_str()),
                entry.notes,
                entry.synced,
            ],
        )?;
        debug!(id, affected, "updated roster entry");
        Ok(affected)
    }

    /// Removes the entry. Idempotent: deleting a missing id is not an
    /// error, so offline retries stay harmless.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let affected = self.conn.execute(DELETE_ENTRY, params![id])?;
        debug!(id, affected, "deleted roster entry");
        Ok(())
    }

    pub fn fetch(&mut self, id: &str) -> Result<Option<RosterEntry>> {
        let sql = format!("SELECT {} {} WHERE r.id = ?1 AND r.pending_deletion = 0", ENTRY_COLUMNS, ENTRY_JOINS);
        self.conn.query_row(&sql, params![id], map_entry_row).optional().map_err(Into::into)
    }

    /// All non-pending-deletion entries for a user, enriched with joined
    /// reference data. No ordering guarantee; calendar grouping is the
    /// caller's concern.
    pub fn fetch_for_user(&mut self, user_id: &str) -> Result<Vec<RosterEntry>> {
        let sql = format!("SELECT {} {} WHERE r.user_id = ?1 AND r.pending_deletion = 0", ENTRY_COLUMNS, ENTRY_JOINS);
        self.query_entries(&sql, user_id)
    }

    /// Entries not yet pushed to the remote system. Hook for future
    /// bidirectional sync; nothing in this crate performs the push.
    pub fn fetch_unsynced(&mut self, user_id: &str) -> Result<Vec<RosterEntry>> {
        let sql = format!(
            "SELECT {} {} WHERE r.user_id = ?1 AND r.synced = 0 AND r.pending_deletion = 0",
            ENTRY_COLUMNS, ENTRY_JOINS
        );
        self.query_entries(&sql, user_id)
    }

    /// Flags an entry as pushed to the remote system.
    pub fn mark_synced(&mut self, id: &str) -> Result<usize> {
        let affected = self.conn.execute(MARK_SYNCED, params![id])?;
        Ok(affected)
    }

    fn query_entries(&mut self, sql: &str, user_id: &str) -> Result<Vec<RosterEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let entry_iter = stmt.query_map(params![user_id], map_entry_row)?;

        let mut entries = Vec::new();
        for entry in entry_iter {
            entries.push(entry?);
        }
        Ok(entries)
    }
}

fn map_entry_row(row: &Row) -> rusqlite::Result<RosterEntry> {
    let duty_type_text: String = row.get(2)?;
    let duty_type = DutyType::from_str(&duty_type_text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into()))?;

    Ok(RosterEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        duty_type,
        departure_time: row.get::<_, DateTime<Utc>>(3)?,
        arrival_time: row.get::<_, Option<DateTime<Utc>>>(4)?,
        flight_number: row.get(5)?,
        notes: row.get(6)?,
        synced: row.get(7)?,
        pending_deletion: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
        origin: map_joined_airport(row, 11)?,
        destination: map_joined_airport(row, 20)?,
        aircraft_type: map_joined_aircraft(row, 29)?,
    })
}

// LEFT JOIN: a dangling or absent foreign key produces NULL columns, which
// surface as None rather than an error.
fn map_joined_airport(row: &Row, base: usize) -> rusqlite::Result<Option<Airport>> {
    let id: Option<String> = row.get(base)?;
    let Some(id) = id else { return Ok(None) };
    Ok(Some(Airport {
        id,
        iata: row.get(base + 1)?,
        icao: row.get(base + 2)?,
        name: row.get(base + 3)?,
        city: row.get(base + 4)?,
        country: row.get(base + 5)?,
        latitude: row.get(base + 6)?,
        longitude: row.get(base + 7)?,
        tz_database: row.get(base + 8)?,
    }))
}

fn map_joined_aircraft(row: &Row, base: usize) -> rusqlite::Result<Option<AircraftType>> {
    let id: Option<String> = row.get(base)?;
    let Some(id) = id else { return Ok(None) };
    Ok(Some(AircraftType {
        id,
        model: row.get(base + 1)?,
        manufacturer: row.get(base + 2)?,
        iata_code: row.get(base + 3)?,
        icao_code: row.get(base + 4)?,
    }))
}
