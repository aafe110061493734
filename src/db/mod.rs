//! Database layer for the crewroster core.
//!
//! A thin persistence layer over SQLite: one repository struct per table,
//! each owning its own connection and ensuring its schema on construction,
//! so initialization is idempotent and safe to run on every app start.
//! Reference tables (airports, aircrafts) are seeded once from bundled
//! datasets; the roster_entries table holds the mutable duty records with
//! foreign keys into both.

/// Core database connection and schema initialization.
pub mod db;

/// Airport reference data: seed-once, read-only repository.
pub mod airports;

/// Aircraft type reference data: seed-once, read-only repository.
pub mod aircrafts;

/// Roster entry CRUD with joined reference-data enrichment.
pub mod roster;
