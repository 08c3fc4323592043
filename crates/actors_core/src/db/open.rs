//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open the database named by a `DbConfig`.
//! - Make sure the `actors` table exists before returning.
//!
//! # Invariants
//! - Returned connections have the schema fully applied.

use super::schema::ensure_schema;
use super::{DbConfig, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the database described by `config` and bootstraps its schema.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &DbConfig) -> DbResult<Connection> {
    let mode = if config.is_in_memory() { "memory" } else { "file" };
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode={} target={}",
        mode,
        config.descriptor()
    );

    let opened = if config.is_in_memory() {
        Connection::open_in_memory()
    } else {
        Connection::open(&config.database)
    };

    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens a private in-memory database with the schema applied.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_db(&DbConfig::in_memory())
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(conn)?;
    Ok(())
}
