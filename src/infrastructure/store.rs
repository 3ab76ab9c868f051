//! SQLite persistence for individual donations

use crate::domain::record::{DonationRecord, RecordRow, RecordSink};
use crate::error::{DonsError, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use tracing::{debug, info};

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS donations (date TEXT, name TEXT, donation REAL, comment TEXT)";
const DROP_TABLE: &str = "DROP TABLE IF EXISTS donations";
const INSERT: &str =
    "INSERT INTO donations (date, name, donation, comment) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ALL: &str = "SELECT date, name, donation, comment FROM donations";

fn storage_error(path: &Path) -> impl Fn(rusqlite::Error) -> DonsError + '_ {
    move |source| DonsError::Storage {
        path: path.to_path_buf(),
        source,
    }
}

struct SqliteRecords {
    conn: Connection,
    path: PathBuf,
}

impl RecordSink for SqliteRecords {
    fn insert(&self, record: &DonationRecord) -> Result<()> {
        let (date, name, donation, comment) = record.to_row();
        self.conn
            .execute(INSERT, params![date, name, donation, comment])
            .map_err(storage_error(&self.path))?;
        debug!(path = %self.path.display(), date = %date, "donation inserted");
        Ok(())
    }
}

/// Single-table donation store backed by one SQLite file.
///
/// Rows have no identity: inserting the same record twice stores it twice,
/// and listing returns rows in whatever order SQLite yields them.
pub struct DonationStore {
    inner: Rc<SqliteRecords>,
}

impl DonationStore {
    /// Open (or create) the store at `path`. With `drop_existing`, any previous
    /// table is discarded first; dropping a table that does not exist is fine.
    pub fn open(path: &Path, drop_existing: bool) -> Result<Self> {
        let conn = Connection::open(path).map_err(storage_error(path))?;
        Self::prepare(conn, path.to_path_buf(), drop_existing)
    }

    /// Store that lives only as long as this value
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(storage_error(&path))?;
        Self::prepare(conn, path, false)
    }

    fn prepare(conn: Connection, path: PathBuf, drop_existing: bool) -> Result<Self> {
        if drop_existing {
            conn.execute(DROP_TABLE, []).map_err(storage_error(&path))?;
            info!(path = %path.display(), "donations table dropped");
        }
        conn.execute(CREATE_TABLE, []).map_err(storage_error(&path))?;
        info!(path = %path.display(), "donation store opened");

        Ok(DonationStore {
            inner: Rc::new(SqliteRecords { conn, path }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Append one row, committed immediately
    pub fn insert(&self, record: &DonationRecord) -> Result<()> {
        self.inner.insert(record)
    }

    /// Every stored row, each attached back to this store
    pub fn list_all(&self) -> Result<Vec<DonationRecord>> {
        let to_storage = storage_error(&self.inner.path);
        let mut stmt = self.inner.conn.prepare(SELECT_ALL).map_err(&to_storage)?;
        let rows = stmt
            .query_map([], |row| -> rusqlite::Result<RecordRow> {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(&to_storage)?;

        let mut records = Vec::new();
        for row in rows {
            let row = row.map_err(&to_storage)?;
            records.push(DonationRecord::from_row(row)?.attach(self.handle()));
        }
        Ok(records)
    }

    /// Non-owning handle records use to save themselves
    pub fn handle(&self) -> Weak<dyn RecordSink> {
        Rc::downgrade(&self.inner) as Weak<dyn RecordSink>
    }

    /// Close the connection. Records listed from this store stop saving.
    pub fn close(self) -> Result<()> {
        match Rc::try_unwrap(self.inner) {
            Ok(records) => {
                let path = records.path;
                records
                    .conn
                    .close()
                    .map_err(|(_, source)| DonsError::Storage { path, source })
            }
            // A save in progress still holds the connection; it closes when released
            Err(_) => Ok(()),
        }
    }
}
