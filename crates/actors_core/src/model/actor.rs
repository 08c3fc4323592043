//! Actor domain model.
//!
//! # Responsibility
//! - Define the validated `ActorShort` identity block and the full `Actor`.
//! - Enforce field invariants at construction and in every setter.
//!
//! # Invariants
//! - `id` is a positive integer and never changes after construction.
//! - `tenure` is finite and within `[TENURE_MIN, TENURE_MAX]`.
//! - `surname` and `fio` are stored trimmed and never blank.
//! - `fio` has at least `FIO_MIN_CHARS` characters and an internal space.
//! - Title/award entries are stored trimmed and never blank.
//! - `Actor::surname()` always equals the first token of `Actor::fio()`.

use crate::model::parse::surname_of;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable integer identifier of an actor.
pub type ActorId = i64;

/// Lower tenure bound (inclusive), in years.
pub const TENURE_MIN: f64 = 0.0;
/// Upper tenure bound (inclusive), in years.
pub const TENURE_MAX: f64 = 100.0;
/// Minimum character count of a trimmed full name.
pub const FIO_MIN_CHARS: usize = 5;

/// Sequence-typed fields of `Actor` that support add/remove mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    /// Honorary titles (`Звание`).
    Titles,
    /// Awards (`Награды`).
    Awards,
}

impl ListField {
    /// Record key used for this field in mappings and files.
    pub fn key(self) -> &'static str {
        match self {
            Self::Titles => "Звание",
            Self::Awards => "Награды",
        }
    }
}

/// Entity invariant violation. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NonPositiveId(i64),
    TenureOutOfRange(f64),
    EmptySurname,
    EmptyFio,
    FioTooShort(String),
    FioWithoutSpace(String),
    EmptyEntry(ListField),
    /// A dynamic input value has the wrong JSON type for `field`.
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Record key of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId(_) => "ID",
            Self::TenureOutOfRange(_) => "Стаж",
            Self::EmptySurname => "Фамилия",
            Self::EmptyFio | Self::FioTooShort(_) | Self::FioWithoutSpace(_) => "ФИО",
            Self::EmptyEntry(field) => field.key(),
            Self::WrongType { field, .. } => field,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(id) => write!(f, "ID must be a positive integer, got {id}"),
            Self::TenureOutOfRange(value) => write!(
                f,
                "Стаж must be a number in [{TENURE_MIN}, {TENURE_MAX}], got {value}"
            ),
            Self::EmptySurname => write!(f, "Фамилия must be a non-empty string"),
            Self::EmptyFio => write!(f, "ФИО must be a non-empty string"),
            Self::FioTooShort(value) => write!(
                f,
                "ФИО must have at least {FIO_MIN_CHARS} characters, got `{value}`"
            ),
            Self::FioWithoutSpace(value) => write!(
                f,
                "ФИО must separate first and last name with a space, got `{value}`"
            ),
            Self::EmptyEntry(field) => {
                write!(f, "{} entries must be non-empty strings", field.key())
            }
            Self::WrongType { field, expected } => write!(f, "{field} must be {expected}"),
        }
    }
}

impl Error for ValidationError {}

/// Raw input for a titles/awards sequence during bulk construction.
///
/// Blank entries are dropped when the input is ingested; they never raise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListInput {
    #[default]
    Absent,
    Single(String),
    Sequence(Vec<String>),
}

impl ListInput {
    /// Interprets a dynamic JSON value for `field`.
    ///
    /// `null`/missing is absent, a string is a single entry, an array keeps
    /// its string elements (non-string elements are dropped). Any other
    /// JSON type is rejected.
    pub fn from_json(value: Option<&Value>, field: ListField) -> Result<Self, ValidationError> {
        match value {
            None | Some(Value::Null) => Ok(Self::Absent),
            Some(Value::String(text)) => Ok(Self::Single(text.clone())),
            Some(Value::Array(items)) => Ok(Self::Sequence(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )),
            Some(_) => Err(ValidationError::WrongType {
                field: field.key(),
                expected: "a string or a list of strings",
            }),
        }
    }

    fn into_entries(self) -> Vec<String> {
        let raw = match self {
            Self::Absent => Vec::new(),
            Self::Single(text) => vec![text],
            Self::Sequence(items) => items,
        };
        raw.iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&str> for ListInput {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ListInput {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ListInput {
    fn from(value: Vec<String>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Vec<&str>> for ListInput {
    fn from(value: Vec<&str>) -> Self {
        Self::Sequence(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for ListInput {
    fn from(value: &[String]) -> Self {
        Self::Sequence(value.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for ListInput {
    fn from(value: [&str; N]) -> Self {
        Self::Sequence(value.iter().map(|item| item.to_string()).collect())
    }
}

impl<T: Into<ListInput>> From<Option<T>> for ListInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Short projection of an actor: identity, surname and tenure.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorShort {
    id: ActorId,
    surname: String,
    tenure: f64,
}

impl ActorShort {
    /// Creates a validated short projection.
    ///
    /// # Errors
    /// - `NonPositiveId` when `id <= 0`.
    /// - `EmptySurname` when `surname` is blank.
    /// - `TenureOutOfRange` when `tenure` is not finite or out of bounds.
    pub fn new(id: ActorId, surname: &str, tenure: f64) -> Result<Self, ValidationError> {
        let id = validate_id(id)?;
        let surname = surname.trim();
        if surname.is_empty() {
            return Err(ValidationError::EmptySurname);
        }
        let tenure = validate_tenure(tenure)?;
        Ok(Self {
            id,
            surname: surname.to_string(),
            tenure,
        })
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn tenure(&self) -> f64 {
        self.tenure
    }

    /// Replaces tenure after validating the new value.
    pub fn set_staz(&mut self, tenure: f64) -> Result<(), ValidationError> {
        self.tenure = validate_tenure(tenure)?;
        Ok(())
    }

    /// One-line rendering of the short projection.
    pub fn short_str(&self) -> String {
        format!(
            "ID: {}, Фамилия: {}, Стаж (лет): {}",
            self.id, self.surname, self.tenure
        )
    }
}

impl Display for ActorShort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short_str())
    }
}

/// Full actor entity.
///
/// Composes an `ActorShort` identity block; the block's surname is derived
/// from `fio` and updated together with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    short: ActorShort,
    fio: String,
    zvan: Vec<String>,
    awards: Vec<String>,
}

impl Actor {
    /// Creates a fully validated actor.
    ///
    /// Titles and awards follow the bulk ingestion policy of `ListInput`:
    /// blank entries are dropped without error.
    pub fn new(
        id: ActorId,
        fio: &str,
        staz: f64,
        zvan: impl Into<ListInput>,
        awards: impl Into<ListInput>,
    ) -> Result<Self, ValidationError> {
        let fio = validate_fio(fio)?;
        let short = ActorShort::new(id, &surname_of(&fio), staz)?;
        Ok(Self {
            short,
            fio,
            zvan: zvan.into().into_entries(),
            awards: awards.into().into_entries(),
        })
    }

    /// Borrows the identity block.
    pub fn short(&self) -> &ActorShort {
        &self.short
    }

    pub fn actor_id(&self) -> ActorId {
        self.short.id()
    }

    pub fn surname(&self) -> &str {
        self.short.surname()
    }

    pub fn fio(&self) -> &str {
        &self.fio
    }

    pub fn staz(&self) -> f64 {
        self.short.tenure()
    }

    pub fn zvan(&self) -> &[String] {
        &self.zvan
    }

    pub fn awards(&self) -> &[String] {
        &self.awards
    }

    /// Replaces the full name and re-derives the surname.
    pub fn set_fio(&mut self, fio: &str) -> Result<(), ValidationError> {
        let fio = validate_fio(fio)?;
        let short = ActorShort::new(self.short.id(), &surname_of(&fio), self.short.tenure())?;
        self.short = short;
        self.fio = fio;
        Ok(())
    }

    pub fn set_staz(&mut self, staz: f64) -> Result<(), ValidationError> {
        self.short.set_staz(staz)
    }

    /// Appends one entry to `field`, rejecting blank values.
    pub fn add_entry(&mut self, field: ListField, value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyEntry(field));
        }
        self.entries_mut(field).push(value.to_string());
        Ok(())
    }

    /// Removes the first occurrence of `value` from `field`.
    ///
    /// Returns whether an entry was removed; absent values are a no-op.
    pub fn remove_entry(&mut self, field: ListField, value: &str) -> bool {
        let value = value.trim();
        let entries = self.entries_mut(field);
        match entries.iter().position(|entry| entry == value) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_zvan(&mut self, title: &str) -> Result<(), ValidationError> {
        self.add_entry(ListField::Titles, title)
    }

    pub fn remove_zvan(&mut self, title: &str) -> bool {
        self.remove_entry(ListField::Titles, title)
    }

    pub fn add_award(&mut self, award: &str) -> Result<(), ValidationError> {
        self.add_entry(ListField::Awards, award)
    }

    pub fn remove_award(&mut self, award: &str) -> bool {
        self.remove_entry(ListField::Awards, award)
    }

    /// One-line rendering of the short projection.
    pub fn short_str(&self) -> String {
        self.short.short_str()
    }

    fn entries_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Titles => &mut self.zvan,
            ListField::Awards => &mut self.awards,
        }
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, ФИО: {}, Стаж (лет): {}, Звания: {:?}, Награды: {:?}",
            self.actor_id(),
            self.fio,
            self.staz(),
            self.zvan,
            self.awards
        )
    }
}

fn validate_id(id: ActorId) -> Result<ActorId, ValidationError> {
    if id <= 0 {
        return Err(ValidationError::NonPositiveId(id));
    }
    Ok(id)
}

fn validate_tenure(tenure: f64) -> Result<f64, ValidationError> {
    if !tenure.is_finite() || !(TENURE_MIN..=TENURE_MAX).contains(&tenure) {
        return Err(ValidationError::TenureOutOfRange(tenure));
    }
    Ok(tenure)
}

fn validate_fio(fio: &str) -> Result<String, ValidationError> {
    let fio = fio.trim();
    if fio.is_empty() {
        return Err(ValidationError::EmptyFio);
    }
    if fio.chars().count() < FIO_MIN_CHARS {
        return Err(ValidationError::FioTooShort(fio.to_string()));
    }
    if !fio.contains(char::is_whitespace) {
        return Err(ValidationError::FioWithoutSpace(fio.to_string()));
    }
    Ok(fio.to_string())
}
