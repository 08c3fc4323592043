//! Database connection configuration.
//!
//! # Responsibility
//! - Describe how to reach the actors database.
//! - Load that description from YAML (or JSON) text and files.
//!
//! # Invariants
//! - `Debug` output and log descriptors never contain the password.
//! - With the SQLite driver `database` is the database file path, or
//!   `:memory:` for a private in-memory database. `host`, `user`,
//!   `password` and `port` only appear in the connection descriptor.

use crate::db::{DbError, DbResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::path::Path;

/// Database name that selects an in-memory SQLite database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            database: IN_MEMORY_DATABASE.to_string(),
            user: String::new(),
            password: String::new(),
            port: 0,
        }
    }
}

impl DbConfig {
    /// Configuration for a database stored at `path`.
    pub fn for_file(path: impl AsRef<Path>) -> Self {
        Self {
            database: path.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// Configuration for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY_DATABASE
    }

    /// Parses configuration from YAML text. JSON objects are accepted too.
    pub fn from_yaml_str(text: &str) -> DbResult<Self> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|err| DbError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            DbError::Config(format!("failed to read `{}`: {err}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Password-free description used in log events.
    pub fn descriptor(&self) -> String {
        let user = if self.user.is_empty() {
            String::new()
        } else {
            format!("{}@", self.user)
        };
        format!("{user}{}:{}/{}", self.host, self.port, self.database)
    }

    fn validate(&self) -> DbResult<()> {
        if self.database.trim().is_empty() {
            return Err(DbError::Config("database cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Debug for DbConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .finish()
    }
}
