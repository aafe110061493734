//! Core library modules for the crewroster crate.
//!
//! The roster domain model, the pure validation engine, the reminder
//! scheduler, persisted settings, and the small infrastructure pieces
//! (data directory resolution, message catalog) they share.

pub mod data_storage;
pub mod duty;
pub mod messages;
pub mod scheduler;
pub mod settings;
pub mod validation;
