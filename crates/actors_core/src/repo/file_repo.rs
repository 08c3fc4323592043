//! File-backed actor repositories (JSON and YAML).
//!
//! # Responsibility
//! - Keep the whole record set in memory, loaded once at construction.
//! - Write the whole record set back to disk after every mutation.
//! - Share all CRUD logic between encodings; a `RecordCodec` supplies
//!   only the decode/encode pair.
//!
//! # Invariants
//! - A missing or unreadable file loads as an empty data set.
//! - A mutation is applied in memory only after its save succeeded.
//! - Files are written synchronously; there is no cross-process locking.

use crate::model::actor::ActorId;
use crate::model::record::{ActorRecord, RecordField, ShortRecord};
use crate::repo::{page_window, ActorRepository, InvalidFieldError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Error raised while reading, decoding, encoding or writing a data file.
#[derive(Debug)]
pub enum FileError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl Display for FileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::Yaml(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Yaml(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FileError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FileError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for FileError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

/// Encoding of a record file.
pub trait RecordCodec {
    /// Short name used in log events.
    const FORMAT: &'static str;

    fn decode(text: &str) -> Result<Vec<ActorRecord>, FileError>;
    fn encode(records: &[ActorRecord]) -> Result<String, FileError>;
}

/// Pretty-printed JSON array of records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    const FORMAT: &'static str = "json";

    fn decode(text: &str) -> Result<Vec<ActorRecord>, FileError> {
        Ok(serde_json::from_str(text)?)
    }

    fn encode(records: &[ActorRecord]) -> Result<String, FileError> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}

/// Block-style YAML sequence of records.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl RecordCodec for YamlCodec {
    const FORMAT: &'static str = "yaml";

    fn decode(text: &str) -> Result<Vec<ActorRecord>, FileError> {
        Ok(serde_yaml::from_str(text)?)
    }

    fn encode(records: &[ActorRecord]) -> Result<String, FileError> {
        Ok(serde_yaml::to_string(records)?)
    }
}

pub type JsonActorRepository = FileActorRepository<JsonCodec>;
pub type YamlActorRepository = FileActorRepository<YamlCodec>;

/// In-memory record set mirrored to one file.
pub struct FileActorRepository<C: RecordCodec> {
    path: PathBuf,
    records: Vec<ActorRecord>,
    codec: PhantomData<fn() -> C>,
}

impl<C: RecordCodec> FileActorRepository<C> {
    /// Loads `path` eagerly. Load failures are logged and yield no records.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_records::<C>(&path);
        Self {
            path,
            records,
            codec: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in their current order.
    pub fn records(&self) -> &[ActorRecord] {
        &self.records
    }

    /// Writes the current record set to the file.
    pub fn save(&self) -> Result<(), FileError> {
        write_records::<C>(&self.path, &self.records)
    }

    fn next_id(&self) -> ActorId {
        self.records.iter().map(|record| record.id).max().unwrap_or(0) + 1
    }

    fn position(&self, id: ActorId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Persists `next` and adopts it only when the write succeeds.
    fn commit(&mut self, op: &str, next: Vec<ActorRecord>) -> bool {
        match write_records::<C>(&self.path, &next) {
            Ok(()) => {
                self.records = next;
                debug!(
                    "event=repo_save module=repo status=ok backend={} op={} count={}",
                    C::FORMAT,
                    op,
                    self.records.len()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=repo_save module=repo status=error backend={} op={} path={} error={}",
                    C::FORMAT,
                    op,
                    self.path.display(),
                    err
                );
                false
            }
        }
    }
}

impl<C: RecordCodec> ActorRepository for FileActorRepository<C> {
    fn get_by_id(&self, id: ActorId) -> Option<ActorRecord> {
        self.records.iter().find(|record| record.id == id).cloned()
    }

    fn get_page(&self, page_size: usize, page_number: usize) -> Vec<ShortRecord> {
        let Some((offset, limit)) = page_window(page_size, page_number) else {
            return Vec::new();
        };
        self.records
            .iter()
            .skip(offset)
            .take(limit)
            .map(ShortRecord::from)
            .collect()
    }

    fn sort_by_field(&mut self, field: &str, descending: bool) -> Result<(), InvalidFieldError> {
        if self.records.is_empty() {
            return Ok(());
        }
        let field = RecordField::from_name(field).ok_or_else(|| InvalidFieldError {
            field: field.to_string(),
        })?;

        let mut next = self.records.clone();
        if descending {
            next.sort_by(|left, right| field.compare(right, left));
        } else {
            next.sort_by(|left, right| field.compare(left, right));
        }

        if !self.commit("sort", next) {
            warn!(
                "event=repo_sort module=repo status=error backend={} field={} note=order_not_persisted",
                C::FORMAT,
                field.key()
            );
        }
        Ok(())
    }

    fn add(&mut self, mut record: ActorRecord) -> Option<ActorId> {
        let id = self.next_id();
        record.id = id;
        let mut next = self.records.clone();
        next.push(record);
        self.commit("add", next).then_some(id)
    }

    fn update(&mut self, id: ActorId, mut record: ActorRecord) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        record.id = id;
        let mut next = self.records.clone();
        next[index] = record;
        self.commit("update", next)
    }

    fn delete(&mut self, id: ActorId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let mut next = self.records.clone();
        next.remove(index);
        self.commit("delete", next)
    }

    fn count(&self) -> usize {
        self.records.len()
    }
}

fn load_records<C: RecordCodec>(path: &Path) -> Vec<ActorRecord> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=repo_load module=repo status=empty backend={} path={} reason=file_missing",
                C::FORMAT,
                path.display()
            );
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=repo_load module=repo status=error backend={} path={} error={}",
                C::FORMAT,
                path.display(),
                err
            );
            return Vec::new();
        }
    };

    match C::decode(&text) {
        Ok(records) => {
            info!(
                "event=repo_load module=repo status=ok backend={} count={}",
                C::FORMAT,
                records.len()
            );
            records
        }
        Err(err) => {
            warn!(
                "event=repo_load module=repo status=error backend={} path={} error_code=decode_failed error={}",
                C::FORMAT,
                path.display(),
                err
            );
            Vec::new()
        }
    }
}

fn write_records<C: RecordCodec>(path: &Path, records: &[ActorRecord]) -> Result<(), FileError> {
    let text = C::encode(records)?;
    std::fs::write(path, text)?;
    Ok(())
}
