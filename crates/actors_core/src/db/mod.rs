//! SQLite storage bootstrap and the process-wide shared connection.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the actors table.
//! - Own the init-once/reset lifecycle of the shared connection.
//!
//! # Invariants
//! - Application data is never read or written before `ensure_schema`
//!   succeeds.
//! - Driver errors stay inside `DbError`; repositories convert them to
//!   sentinel values.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod config;
mod open;
pub mod schema;
mod shared;

pub use config::{DbConfig, IN_MEMORY_DATABASE};
pub use open::{open_db, open_db_in_memory};
pub use shared::{reset_shared_connection, shared_connection, DbHandle};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The handle has no connection, e.g. after a failed connection attempt.
    Unavailable,
    Config(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Unavailable => write!(f, "database connection is not available"),
            Self::Config(message) => write!(f, "invalid database configuration: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Unavailable | Self::Config(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
