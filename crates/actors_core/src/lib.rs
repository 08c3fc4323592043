//! Core domain logic for the actor registry.
//! This crate is the single source of truth for actor invariants and for
//! the repository contract shared by every storage backend.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{reset_shared_connection, shared_connection, DbConfig, DbError, DbHandle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::actor::{Actor, ActorId, ActorShort, ListField, ListInput, ValidationError};
pub use model::parse::{
    from_delimited_text, from_mapping, from_text, surname_of, ActorParseError, ParseResult,
};
pub use model::record::{ActorRecord, RecordField, ShortRecord};
pub use repo::file_repo::{
    FileActorRepository, FileError, JsonActorRepository, JsonCodec, RecordCodec,
    YamlActorRepository, YamlCodec,
};
pub use repo::sqlite_repo::SqliteActorRepository;
pub use repo::{ActorRepository, InvalidFieldError};
pub use service::actor_service::ActorService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
