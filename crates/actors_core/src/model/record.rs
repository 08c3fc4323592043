//! Persisted record shapes shared by every repository backend.
//!
//! # Responsibility
//! - Define the full and short record layouts used on disk and in SQL.
//! - Convert between validated `Actor` entities and records.
//! - Resolve sortable field names to typed comparators.
//!
//! # Invariants
//! - Serialized keys are exactly `ID`, `Фамилия`, `Стаж`, `ФИО`, `Звание`,
//!   `Награды`, in that order.
//! - Records are raw data: repositories store them without entity
//!   validation; `Actor::try_from` re-validates on the way out.

use crate::model::actor::{Actor, ActorId, ActorShort, ListInput, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Full repository record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    #[serde(rename = "ID")]
    pub id: ActorId,
    #[serde(rename = "Фамилия", default)]
    pub surname: String,
    #[serde(rename = "Стаж")]
    pub tenure: f64,
    #[serde(rename = "ФИО")]
    pub fio: String,
    #[serde(rename = "Звание", default)]
    pub titles: Vec<String>,
    #[serde(rename = "Награды", default)]
    pub awards: Vec<String>,
}

/// Short projection returned by paging queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortRecord {
    #[serde(rename = "ID")]
    pub id: ActorId,
    #[serde(rename = "Фамилия")]
    pub surname: String,
    #[serde(rename = "Стаж")]
    pub tenure: f64,
}

impl From<&ActorRecord> for ShortRecord {
    fn from(record: &ActorRecord) -> Self {
        Self {
            id: record.id,
            surname: record.surname.clone(),
            tenure: record.tenure,
        }
    }
}

impl From<&ActorShort> for ShortRecord {
    fn from(short: &ActorShort) -> Self {
        Self {
            id: short.id(),
            surname: short.surname().to_string(),
            tenure: short.tenure(),
        }
    }
}

impl Actor {
    /// Builds the full repository record for this actor.
    pub fn to_record(&self) -> ActorRecord {
        ActorRecord {
            id: self.actor_id(),
            surname: self.surname().to_string(),
            tenure: self.staz(),
            fio: self.fio().to_string(),
            titles: self.zvan().to_vec(),
            awards: self.awards().to_vec(),
        }
    }

    /// Builds the short projection record for this actor.
    pub fn to_short_record(&self) -> ShortRecord {
        ShortRecord::from(self.short())
    }
}

impl TryFrom<ActorRecord> for Actor {
    type Error = ValidationError;

    /// Re-validates a stored record. The stored surname is ignored and
    /// derived again from `fio`.
    fn try_from(record: ActorRecord) -> Result<Self, Self::Error> {
        Actor::new(
            record.id,
            &record.fio,
            record.tenure,
            ListInput::Sequence(record.titles),
            ListInput::Sequence(record.awards),
        )
    }
}

/// Record field addressable by `sort_by_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Id,
    Surname,
    Tenure,
    Fio,
    Titles,
    Awards,
}

impl RecordField {
    /// Resolves a record key or one of its ASCII aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "ID" | "id" => Some(Self::Id),
            "Фамилия" | "surname" | "fam" => Some(Self::Surname),
            "Стаж" | "tenure" | "staz" => Some(Self::Tenure),
            "ФИО" | "fio" | "full_name" => Some(Self::Fio),
            "Звание" | "titles" | "zvan" => Some(Self::Titles),
            "Награды" | "awards" => Some(Self::Awards),
            _ => None,
        }
    }

    /// Serialized record key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Surname => "Фамилия",
            Self::Tenure => "Стаж",
            Self::Fio => "ФИО",
            Self::Titles => "Звание",
            Self::Awards => "Награды",
        }
    }

    /// Column name in the `actors` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Surname => "fam",
            Self::Tenure => "staz",
            Self::Fio => "fio",
            Self::Titles => "zvan",
            Self::Awards => "awards",
        }
    }

    /// Ascending comparison of two records by this field.
    pub fn compare(self, left: &ActorRecord, right: &ActorRecord) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            Self::Surname => left.surname.cmp(&right.surname),
            Self::Tenure => left.tenure.total_cmp(&right.tenure),
            Self::Fio => left.fio.cmp(&right.fio),
            Self::Titles => left.titles.cmp(&right.titles),
            Self::Awards => left.awards.cmp(&right.awards),
        }
    }
}
