//! Actor use-case service.
//!
//! # Responsibility
//! - Translate between validated entities and repository records.
//! - Offer text import on top of the parsing adapters.
//!
//! # Invariants
//! - Only validated actors are written through the service.
//! - Records read back are re-validated before they reach the caller.

use crate::model::actor::{Actor, ActorId, ValidationError};
use crate::model::parse::{from_text, ParseResult};
use crate::model::record::ShortRecord;
use crate::repo::{ActorRepository, InvalidFieldError};

/// Entity-level wrapper around one repository backend.
pub struct ActorService<R: ActorRepository> {
    repo: R,
}

impl<R: ActorRepository> ActorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Stores `actor` under a repository-assigned ID.
    ///
    /// The actor's own ID is replaced by the backend; `None` means the
    /// backend failed to store it.
    pub fn create_actor(&mut self, actor: &Actor) -> Option<ActorId> {
        self.repo.add(actor.to_record())
    }

    /// Parses `text` (JSON object or delimited line) and stores the actor.
    ///
    /// # Errors
    /// - Any `ActorParseError` from parsing; nothing is stored then.
    pub fn import_line(&mut self, text: &str) -> ParseResult<Option<ActorId>> {
        let actor = from_text(text)?;
        Ok(self.create_actor(&actor))
    }

    /// Loads the actor with `id` and validates the stored record.
    ///
    /// # Errors
    /// - `ValidationError` when the stored record breaks an invariant.
    pub fn get_actor(&self, id: ActorId) -> Result<Option<Actor>, ValidationError> {
        self.repo.get_by_id(id).map(Actor::try_from).transpose()
    }

    /// Replaces the stored actor with `id` by `actor`.
    pub fn update_actor(&mut self, id: ActorId, actor: &Actor) -> bool {
        self.repo.update(id, actor.to_record())
    }

    pub fn delete_actor(&mut self, id: ActorId) -> bool {
        self.repo.delete(id)
    }

    pub fn list_page(&self, page_size: usize, page_number: usize) -> Vec<ShortRecord> {
        self.repo.get_page(page_size, page_number)
    }

    pub fn sort_by(&mut self, field: &str, descending: bool) -> Result<(), InvalidFieldError> {
        self.repo.sort_by_field(field, descending)
    }

    pub fn count(&self) -> usize {
        self.repo.count()
    }
}
