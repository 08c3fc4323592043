//! Repository contract and its storage backends.
//!
//! # Responsibility
//! - Define the storage-agnostic `ActorRepository` contract.
//! - Provide JSON-file, YAML-file and SQLite implementations.
//!
//! # Invariants
//! - Storage failures never escape a repository; they are logged and turned
//!   into `None`, `false`, `0` or an empty page.
//! - Only an unknown sort field is reported as an error.
//! - New IDs never collide with an ID still present in the data set.

use crate::model::actor::ActorId;
use crate::model::record::{ActorRecord, ShortRecord};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod file_repo;
pub mod sqlite_repo;

/// `sort_by_field` was given a field that records do not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFieldError {
    pub field: String,
}

impl Display for InvalidFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown record field `{}`", self.field)
    }
}

impl Error for InvalidFieldError {}

/// Storage-agnostic CRUD, paging and sorting over actor records.
pub trait ActorRepository {
    /// Returns the full record with `id`, if present.
    fn get_by_id(&self, id: ActorId) -> Option<ActorRecord>;

    /// Returns page `page_number` (1-based) of short records.
    ///
    /// Covers positions `[(page_number - 1) * page_size, page_number * page_size)`
    /// of the current order. Out-of-range pages are short or empty.
    fn get_page(&self, page_size: usize, page_number: usize) -> Vec<ShortRecord>;

    /// Stable reorder of every record by `field`, persisted immediately.
    ///
    /// No-op on an empty data set, whatever `field` is.
    fn sort_by_field(&mut self, field: &str, descending: bool) -> Result<(), InvalidFieldError>;

    /// Stores `record` under a fresh ID and returns it, `None` on failure.
    fn add(&mut self, record: ActorRecord) -> Option<ActorId>;

    /// Replaces the record with `id`; the stored ID stays `id` whatever
    /// `record.id` says. Returns whether a record matched.
    fn update(&mut self, id: ActorId, record: ActorRecord) -> bool;

    /// Removes the record with `id`. Returns whether a record matched.
    fn delete(&mut self, id: ActorId) -> bool;

    fn count(&self) -> usize;
}

/// Offset and length of a 1-based page, `None` when the page is empty
/// by construction (`page_size == 0` or `page_number == 0`).
pub(crate) fn page_window(page_size: usize, page_number: usize) -> Option<(usize, usize)> {
    if page_size == 0 || page_number == 0 {
        return None;
    }
    let offset = (page_number - 1).checked_mul(page_size)?;
    Some((offset, page_size))
}
