//! # Crewroster - offline-first flight-crew roster core
//!
//! A local-first roster store for a flight-crew assistant app. Keeps duty
//! entries in an embedded SQLite database, validates prospective duties
//! against required-field rules and same-day overlaps, and schedules local
//! reminder notifications in the timezone the duty actually departs from.
//!
//! ## Features
//!
//! - **Local Relational Store**: idempotent schema creation and one-shot
//!   reference-data seeding (airports, aircraft types)
//! - **Roster Repository**: CRUD over duty entries with joined airport and
//!   aircraft reference data
//! - **Duty Validation**: per-duty-type required fields and interval overlap
//!   detection, timezone-aware
//! - **Reminder Scheduling**: pre-duty and red-eye reminders keyed by entry
//!   id, cancel-then-replace on edits
//! - **Settings Store**: persisted reminder preferences
//!
//! ## Usage
//!
//! ```rust,no_run
//! use crewroster::db::{airports::Airports, roster::RosterEntries};
//!
//! let mut airports = Airports::new()?;
//! airports.seed(&Airports::bundled()?)?;
//!
//! let mut roster = RosterEntries::new()?;
//! let entries = roster.fetch_for_user("crew-1")?;
//! # anyhow::Ok(())
//! ```
//!
//! The crate has no process entry point of its own; it is consumed as a
//! library by the app's screens.

pub mod db;
pub mod libs;
