//! Schema bootstrap for the `actors` table.
//!
//! # Responsibility
//! - Create the single `actors` table on a fresh database.
//! - Refuse databases written by a newer schema.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Bootstrap runs inside one transaction.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const ACTORS_TABLE_SQL: &str = include_str!("0001_actors.sql");

/// Creates the `actors` table when the database has no schema yet.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(ACTORS_TABLE_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
