use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub(crate) const SCHEMA_AIRPORTS: &str = "CREATE TABLE IF NOT EXISTS airports (
    id TEXT PRIMARY KEY,
    iata TEXT,
    icao TEXT,
    name TEXT NOT NULL,
    city TEXT,
    country TEXT,
    latitude REAL,
    longitude REAL,
    tz_database TEXT NOT NULL
)";
const COUNT_AIRPORTS: &str = "SELECT COUNT(*) FROM airports";
const INSERT_AIRPORT: &str = "INSERT INTO airports (id, iata, icao, name, city, country, latitude, longitude, tz_database)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const SELECT_AIRPORT_BY_ID: &str = "SELECT id, iata, icao, name, city, country, latitude, longitude, tz_database FROM airports WHERE id = ?1";
const SELECT_AIRPORT_BY_IATA: &str = "SELECT id, iata, icao, name, city, country, latitude, longitude, tz_database FROM airports WHERE iata = ?1";
const SELECT_ALL_AIRPORTS: &str = "SELECT id, iata, icao, name, city, country, latitude, longitude, tz_database FROM airports ORDER BY iata";

/// Reference airport record. Immutable after seed load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: String,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// IANA timezone identifier, e.g. `Asia/Singapore`.
    pub tz_database: String,
}

pub struct Airports {
    conn: Connection,
}

impl Airports {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_AIRPORTS, [])?;
        Ok(Self { conn: db.conn })
    }

    /// The airport dataset bundled with the app.
    pub fn bundled() -> Result<Vec<Airport>> {
        serde_json::from_str(include_str!("../../data/airports.json")).map_err(|_| msg_error_anyhow!(Message::SeedDatasetInvalid("airports".to_string())))
    }

    /// Seeds the airports table, inserting rows only when the table is
    /// empty. Safe to run on every app start.
    pub fn seed(&mut self, airports: &[Airport]) -> Result<usize> {
        if self.count()? > 0 {
            debug!("airports already seeded, skipping");
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        for airport in airports {
            tx.execute(
                INSERT_AIRPORT,
                params![
                    airport.id,
                    airport.iata,
                    airport.icao,
                    airport.name,
                    airport.city,
                    airport.country,
                    airport.latitude,
                    airport.longitude,
                    airport.tz_database
                ],
            )?;
        }
        tx.commit()?;
        debug!(count = airports.len(), "seeded airports");
        Ok(airports.len())
    }

    pub fn count(&mut self) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_AIRPORTS, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn get(&mut self, id: &str) -> Result<Option<Airport>> {
        self.conn
            .query_row(SELECT_AIRPORT_BY_ID, params![id], map_airport_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn get_by_iata(&mut self, iata: &str) -> Result<Option<Airport>> {
        self.conn
            .query_row(SELECT_AIRPORT_BY_IATA, params![iata], map_airport_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(&mut self) -> Result<Vec<Airport>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_AIRPORTS)?;
        let airport_iter = stmt.query_map([], map_airport_row)?;

        let mut airports = Vec::new();
        for airport in airport_iter {
            airports.push(airport?);
        }
        Ok(airports)
    }
}

fn map_airport_row(row: &rusqlite::Row) -> rusqlite::Result<Airport> {
    Ok(Airport {
        id: row.get(0)?,
        iata: row.get(1)?,
        icao: row.get(2)?,
        name: row.get(3)?,
        city: row.get(4)?,
        country: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
        tz_database: row.get(8)?,
    })
}
