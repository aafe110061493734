use crate::db::{aircrafts, airports, roster};
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "roster.db";

/// Handle to the local roster database.
///
/// Constructed explicitly at startup (or by a repository); nothing is
/// opened at module load. `init` is idempotent and safe to run on every
/// app start; failures here mean the storage itself is unusable and are
/// propagated as fatal.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let conn: Connection = Connection::open(db_file_path)?;
        // The bundled SQLite is compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1;
        // restore the stock default so dangling reference rows are tolerated
        // as documented (reads surface them as None via LEFT JOIN).
        conn.pragma_update(None, "foreign_keys", false)?;

        Ok(Db { conn })
    }

    /// Creates the three roster tables if absent.
    ///
    /// Repository constructors ensure their own tables as well, so calling
    /// this is only required when the app wants schema creation up front.
    pub fn init(&self) -> Result<()> {
        self.conn.execute(airports::SCHEMA_AIRPORTS, [])?;
        self.conn.execute(aircrafts::SCHEMA_AIRCRAFTS, [])?;
        self.conn.execute(roster::SCHEMA_ROSTER_ENTRIES, [])?;
        Ok(())
    }
}
