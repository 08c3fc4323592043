//! Core use-case services.
//!
//! # Responsibility
//! - Work with validated `Actor` entities on top of any repository backend.
//! - Keep callers independent of the storage medium.

pub mod actor_service;
