use std::path::Path;

use anyhow::{Context as _, Result};
use rusqlite::{Connection, params};

/// One logged command and the output it produced. Rows are append-only and
/// read back in insertion order.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub command: String,
    pub output: String,
}

/// Opens (creating if needed) the logbook database at `path`.
///
/// # Errors
/// Returns an error if the parent directory cannot be created or the
/// database cannot be opened.
pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create logbook dir {}", parent.display()))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("open logbook db {}", path.display()))?;
    init_records_table(&conn)?;
    Ok(conn)
}

/// Creates the records table if it does not exist. Safe to call on every
/// open; existing rows are preserved.
///
/// # Errors
/// Returns an error if the schema statement fails.
pub fn init_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            command TEXT NOT NULL,
            output TEXT NOT NULL
        );",
    )
    .context("create records table")
}

/// Appends one record and returns its assigned id. Ids grow monotonically
/// and are never reused, even after deletes.
///
/// # Errors
/// Returns an error if the insert fails.
pub fn append(conn: &Connection, command: &str, output: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO records (command, output) VALUES (?1, ?2)",
        params![command, output],
    )
    .context("insert record")?;
    Ok(conn.last_insert_rowid())
}

/// Reads every record in insertion order (ascending id).
///
/// # Errors
/// Returns an error if the query fails.
pub fn read_all(conn: &Connection) -> Result<Vec<Record>> {
    let mut stmt = conn
        .prepare("SELECT id, command, output FROM records ORDER BY id ASC")
        .context("prepare records query")?;
    let rows = stmt
        .query_map([], map_row)
        .context("query records")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("read records")?;
    Ok(rows)
}

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        command: row.get(1)?,
        output: row.get(2)?,
    })
}
