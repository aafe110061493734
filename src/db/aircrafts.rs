use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub(crate) const SCHEMA_AIRCRAFTS: &str = "CREATE TABLE IF NOT EXISTS aircrafts (
    id TEXT PRIMARY KEY,
    model TEXT NOT NULL,
    manufacturer TEXT,
    iata_code TEXT,
    icao_code TEXT
)";
const COUNT_AIRCRAFTS: &str = "SELECT COUNT(*) FROM aircrafts";
const INSERT_AIRCRAFT: &str = "INSERT INTO aircrafts (id, model, manufacturer, iata_code, icao_code) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_AIRCRAFT_BY_ID: &str = "SELECT id, model, manufacturer, iata_code, icao_code FROM aircrafts WHERE id = ?1";
const SELECT_ALL_AIRCRAFTS: &str = "SELECT id, model, manufacturer, iata_code, icao_code FROM aircrafts ORDER BY model";

/// Reference aircraft type record. Immutable after seed load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftType {
    pub id: String,
    pub model: String,
    pub manufacturer: Option<String>,
    pub iata_code: Option<String>,
    pub icao_code: Option<String>,
}

pub struct Aircrafts {
    conn: Connection,
}

impl Aircrafts {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_AIRCRAFTS, [])?;
        Ok(Self { conn: db.conn })
    }

    /// The aircraft-type dataset bundled with the app.
    pub fn bundled() -> Result<Vec<AircraftType>> {
        serde_json::from_str(include_str!("../../data/aircrafts.json")).map_err(|_| msg_error_anyhow!(Message::SeedDatasetInvalid("aircrafts".to_string())))
    }

    /// Seeds the aircrafts table, inserting rows only when the table is
    /// empty. Safe to run on every app start.
    pub fn seed(&mut self, aircrafts: &[AircraftType]) -> Result<usize> {
        if self.count()? > 0 {
            debug!("aircrafts already seeded, skipping");
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        for aircraft in aircrafts {
            tx.execute(
                INSERT_AIRCRAFT,
                params![aircraft.id, aircraft.model, aircraft.manufacturer, aircraft.iata_code, aircraft.icao_code],
            )?;
        }
        tx.commit()?;
        debug!(count = aircrafts.len(), "seeded aircrafts");
        Ok(aircrafts.len())
    }

    pub fn count(&mut self) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_AIRCRAFTS, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn get(&mut self, id: &str) -> Result<Option<AircraftType>> {
        self.conn
            .query_row(SELECT_AIRCRAFT_BY_ID, params![id], map_aircraft_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(&mut self) -> Result<Vec<AircraftType>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_AIRCRAFTS)?;
        let aircraft_iter = stmt.query_map([], map_aircraft_row)?;

        let mut aircrafts = Vec::new();
        for aircraft in aircraft_iter {
            aircrafts.push(aircraft?);
        }
        Ok(aircrafts)
    }
}

fn map_aircraft_row(row: &rusqlite::Row) -> rusqlite::Result<AircraftType> {
    Ok(AircraftType {
        id: row.get(0)?,
        model: row.get(1)?,
        manufacturer: row.get(2)?,
        iata_code: row.get(3)?,
        icao_code: row.get(4)?,
    })
}
