//! Parsing adapters that turn external representations into `Actor`s.
//!
//! # Responsibility
//! - Build validated actors from JSON-style mappings, delimited text lines
//!   and free text that may hold either form.
//! - Keep shape errors (`Malformed`, `Format`, `MissingField`) apart from
//!   value errors (`Validation`).
//!
//! # Invariants
//! - Parsers never return a partially validated actor.
//! - Delimited lines have the layout
//!   `id,fullname,tenure[,title;title...][,award;award...]`.

use crate::model::actor::{Actor, ListField, ListInput, ValidationError};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const KEY_ID: &str = "ID";
pub const KEY_SURNAME: &str = "Фамилия";
pub const KEY_TENURE: &str = "Стаж";
pub const KEY_FIO: &str = "ФИО";
pub const KEY_TITLES: &str = "Звание";
pub const KEY_AWARDS: &str = "Награды";

const FIELD_SEPARATOR: char = ',';
const LIST_SEPARATOR: char = ';';
const MIN_DELIMITED_FIELDS: usize = 3;
const MAX_DELIMITED_FIELDS: usize = 5;

pub type ParseResult<T> = Result<T, ActorParseError>;

/// Failure to build an actor from external input.
#[derive(Debug)]
pub enum ActorParseError {
    /// Delimited text has the wrong shape or a non-numeric number field.
    Malformed(String),
    /// JSON text cannot be parsed or is not an object.
    Format(String),
    /// A required key is absent from the mapping.
    MissingField(&'static str),
    /// Input had the right shape but violates an entity invariant.
    Validation(ValidationError),
}

impl Display for ActorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed actor line: {message}"),
            Self::Format(message) => write!(f, "invalid actor JSON: {message}"),
            Self::MissingField(key) => write!(f, "missing required field `{key}`"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ActorParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Malformed(_) | Self::Format(_) | Self::MissingField(_) => None,
        }
    }
}

impl From<ValidationError> for ActorParseError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Builds an actor from a mapping keyed by record keys.
///
/// `ID`, `ФИО` and `Стаж` are required; `Звание` and `Награды` are optional
/// and follow the bulk ingestion policy.
pub fn from_mapping(data: &Map<String, Value>) -> ParseResult<Actor> {
    let id = required(data, KEY_ID)?
        .as_i64()
        .ok_or(ValidationError::WrongType {
            field: KEY_ID,
            expected: "an integer",
        })?;
    let fio = required(data, KEY_FIO)?
        .as_str()
        .ok_or(ValidationError::WrongType {
            field: KEY_FIO,
            expected: "a string",
        })?;
    let tenure = required(data, KEY_TENURE)?
        .as_f64()
        .ok_or(ValidationError::WrongType {
            field: KEY_TENURE,
            expected: "a number",
        })?;
    let titles = ListInput::from_json(data.get(KEY_TITLES), ListField::Titles)?;
    let awards = ListInput::from_json(data.get(KEY_AWARDS), ListField::Awards)?;

    Ok(Actor::new(id, fio, tenure, titles, awards)?)
}

/// Builds an actor from `id,fullname,tenure[,titles][,awards]`.
///
/// Empty list fields (`3,Name Surname,7,,Award`) yield empty sequences.
/// Lines with fewer than three or more than five fields are rejected as
/// [`ActorParseError::Malformed`]; extra fields are never silently dropped.
pub fn from_delimited_text(text: &str) -> ParseResult<Actor> {
    let fields: Vec<&str> = text.trim().split(FIELD_SEPARATOR).collect();
    if fields.len() < MIN_DELIMITED_FIELDS {
        return Err(ActorParseError::Malformed(format!(
            "expected at least {MIN_DELIMITED_FIELDS} comma-separated fields, got {}",
            fields.len()
        )));
    }
    if fields.len() > MAX_DELIMITED_FIELDS {
        return Err(ActorParseError::Malformed(format!(
            "expected at most {MAX_DELIMITED_FIELDS} comma-separated fields, got {}",
            fields.len()
        )));
    }

    let id = fields[0].trim().parse::<i64>().map_err(|err| {
        ActorParseError::Malformed(format!("{KEY_ID} `{}` is not an integer: {err}", fields[0]))
    })?;
    let tenure = fields[2].trim().parse::<f64>().map_err(|err| {
        ActorParseError::Malformed(format!(
            "{KEY_TENURE} `{}` is not a number: {err}",
            fields[2]
        ))
    })?;
    let titles = split_list(fields.get(3).copied());
    let awards = split_list(fields.get(4).copied());

    Ok(Actor::new(id, fields[1], tenure, titles, awards)?)
}

/// Parses either a JSON object (text starting with `{`) or a delimited line.
pub fn from_text(text: &str) -> ParseResult<Actor> {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return from_delimited_text(trimmed);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|err| ActorParseError::Format(err.to_string()))?;
    match value {
        Value::Object(map) => from_mapping(&map),
        other => Err(ActorParseError::Format(format!(
            "expected a JSON object, got `{other}`"
        ))),
    }
}

/// Returns the first whitespace-delimited token of a full name.
///
/// Empty or blank input yields an empty string.
pub fn surname_of(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn required<'a>(data: &'a Map<String, Value>, key: &'static str) -> ParseResult<&'a Value> {
    data.get(key).ok_or(ActorParseError::MissingField(key))
}

fn split_list(field: Option<&str>) -> ListInput {
    match field {
        Some(text) => ListInput::Sequence(
            text.split(LIST_SEPARATOR)
                .map(str::to_string)
                .collect(),
        ),
        None => ListInput::Absent,
    }
}
