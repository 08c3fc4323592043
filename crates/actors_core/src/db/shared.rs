//! Process-wide shared database connection.
//!
//! # Responsibility
//! - Hand out cloneable `DbHandle`s that wrap one SQLite connection.
//! - Keep a single process-wide handle created on first use.
//!
//! # Invariants
//! - The first `shared_connection` call connects; later calls return the
//!   same handle and ignore a differing configuration (a warning is logged).
//!   This is a single shared resource, not a connection pool.
//! - A failed connection attempt is recorded as an absent connection. Every
//!   operation through that handle fails with `DbError::Unavailable` until
//!   `reset_shared_connection` is called.
//! - Calls are serialized by a mutex; nothing here is async.

use super::{open_db, DbConfig, DbError, DbResult};
use log::{info, warn};
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static SHARED_CONNECTION: Lazy<Mutex<Option<SharedState>>> = Lazy::new(|| Mutex::new(None));

struct SharedState {
    config: DbConfig,
    handle: DbHandle,
}

/// Cloneable handle to one (possibly absent) SQLite connection.
///
/// Clones observe the same connection.
#[derive(Clone)]
pub struct DbHandle {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl DbHandle {
    /// Connects with `config`; a failure yields an unavailable handle.
    pub fn open(config: &DbConfig) -> Self {
        match open_db(config) {
            Ok(conn) => Self::from_connection(conn),
            Err(_) => Self::unavailable(),
        }
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(Some(conn))),
        }
    }

    /// Handle without a connection.
    pub fn unavailable() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.lock().is_some()
    }

    /// Returns whether both handles share one connection slot.
    pub fn same_connection(&self, other: &DbHandle) -> bool {
        Arc::ptr_eq(&self.conn, &other.conn)
    }

    /// Runs `op` against the connection.
    ///
    /// # Errors
    /// - `DbError::Unavailable` when the handle has no connection.
    /// - `DbError::Sqlite` when `op` fails.
    pub fn with_connection<T>(
        &self,
        op: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> DbResult<T> {
        let guard = self.lock();
        let conn = guard.as_ref().ok_or(DbError::Unavailable)?;
        Ok(op(conn)?)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the process-wide handle, connecting on first use.
pub fn shared_connection(config: &DbConfig) -> DbHandle {
    let mut state = SHARED_CONNECTION
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(existing) = state.as_ref() {
        if existing.config != *config {
            warn!(
                "event=db_shared module=db status=reuse configured={} requested={} note=ignoring_new_config",
                existing.config.descriptor(),
                config.descriptor()
            );
        }
        return existing.handle.clone();
    }

    let handle = DbHandle::open(config);
    info!(
        "event=db_shared module=db status=init target={} connected={}",
        config.descriptor(),
        handle.is_connected()
    );
    *state = Some(SharedState {
        config: config.clone(),
        handle: handle.clone(),
    });
    handle
}

/// Drops the process-wide handle so the next call connects again.
///
/// Handles already given out keep their connection until dropped.
pub fn reset_shared_connection() {
    let mut state = SHARED_CONNECTION
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if state.take().is_some() {
        info!("event=db_shared module=db status=reset");
    }
}
