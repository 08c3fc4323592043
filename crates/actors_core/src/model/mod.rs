//! Actor domain model and its external representations.
//!
//! # Responsibility
//! - Define validated entities (`ActorShort`, `Actor`).
//! - Convert mappings, delimited lines and JSON text into entities.
//! - Define the record shapes persisted by repository backends.
//!
//! # Invariants
//! - An `Actor` value that exists has passed every field check.
//! - Record keys are shared by all backends and parsers.

pub mod actor;
pub mod parse;
pub mod record;
