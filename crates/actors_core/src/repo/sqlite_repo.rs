//! SQLite-backed actor repository.
//!
//! # Responsibility
//! - Map each repository operation to one parameterized statement on the
//!   `actors` table.
//! - Convert every driver failure into a logged sentinel result.
//!
//! # Invariants
//! - `zvan` and `awards` columns hold JSON arrays of strings.
//! - IDs come from `AUTOINCREMENT` and are never reused.
//! - Row order lives in the `position` column: new rows go last, and
//!   `sort_by_field` rewrites every position in one statement, so the order
//!   is shared by every repository on the same database.
//! - Sorting is stable: ties keep their previous relative order.

use crate::db::{shared_connection, DbConfig, DbHandle, DbResult};
use crate::model::actor::ActorId;
use crate::model::record::{ActorRecord, RecordField, ShortRecord};
use crate::repo::{page_window, ActorRepository, InvalidFieldError};
use log::{error, warn};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

const ACTOR_SELECT_SQL: &str = "SELECT id, fam, staz, fio, zvan, awards FROM actors";
const SHORT_SELECT_SQL: &str = "SELECT id, fam, staz FROM actors";
const STORED_ORDER_SQL: &str = "ORDER BY position ASC, id ASC";

/// Repository over the `actors` table of a shared connection.
pub struct SqliteActorRepository {
    db: DbHandle,
}

impl SqliteActorRepository {
    pub fn new(db: DbHandle) -> Self {
        Self { db }
    }

    /// Uses the process-wide connection, connecting on first use.
    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(shared_connection(config))
    }

    pub fn handle(&self) -> &DbHandle {
        &self.db
    }

    /// Unwraps a storage result, logging failures and falling back.
    fn settle<T>(&self, op: &str, result: DbResult<T>, fallback: T) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                error!(
                    "event=repo_query module=repo status=error backend=sqlite op={} error={}",
                    op, err
                );
                fallback
            }
        }
    }
}

impl ActorRepository for SqliteActorRepository {
    fn get_by_id(&self, id: ActorId) -> Option<ActorRecord> {
        let result = self.db.with_connection(|conn| {
            conn.query_row(
                &format!("{ACTOR_SELECT_SQL} WHERE id = ?1 ORDER BY id LIMIT 1;"),
                params![id],
                parse_actor_row,
            )
            .optional()
        });
        self.settle("get_by_id", result, None)
    }

    fn get_page(&self, page_size: usize, page_number: usize) -> Vec<ShortRecord> {
        let Some((offset, limit)) = page_window(page_size, page_number) else {
            return Vec::new();
        };
        let (Ok(offset), Ok(limit)) = (i64::try_from(offset), i64::try_from(limit)) else {
            return Vec::new();
        };

        let sql = format!("{SHORT_SELECT_SQL} {STORED_ORDER_SQL} LIMIT ?1 OFFSET ?2;");
        let result = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![limit, offset], parse_short_row)?;
            let page = rows.collect::<rusqlite::Result<Vec<_>>>();
            page
        });
        self.settle("get_page", result, Vec::new())
    }

    fn sort_by_field(&mut self, field: &str, descending: bool) -> Result<(), InvalidFieldError> {
        if self.count() == 0 {
            return Ok(());
        }
        let field = RecordField::from_name(field).ok_or_else(|| InvalidFieldError {
            field: field.to_string(),
        })?;

        let direction = if descending { "DESC" } else { "ASC" };
        let sql = format!(
            "UPDATE actors
             SET position = ranked.new_position
             FROM (
                SELECT id, ROW_NUMBER() OVER (ORDER BY {} {direction}, position ASC, id ASC) AS new_position
                FROM actors
             ) AS ranked
             WHERE actors.id = ranked.id;",
            field.column()
        );
        let result = self.db.with_connection(|conn| conn.execute(&sql, []));
        if !self.settle("sort_by_field", result.map(|_| true), false) {
            warn!(
                "event=repo_sort module=repo status=error backend=sqlite field={} note=order_not_persisted",
                field.key()
            );
        }
        Ok(())
    }

    fn add(&mut self, record: ActorRecord) -> Option<ActorId> {
        let result = self.db.with_connection(|conn| {
            conn.query_row(
                "INSERT INTO actors (fam, staz, fio, zvan, awards, position)
                 VALUES (
                    ?1, ?2, ?3, ?4, ?5,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM actors)
                 )
                 RETURNING id;",
                params![
                    record.surname.as_str(),
                    record.tenure,
                    record.fio.as_str(),
                    encode_list(&record.titles)?,
                    encode_list(&record.awards)?,
                ],
                |row| row.get::<_, ActorId>(0),
            )
        });
        self.settle("add", result.map(Some), None)
    }

    fn update(&mut self, id: ActorId, record: ActorRecord) -> bool {
        let result = self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE actors
                 SET
                    fam = ?1,
                    staz = ?2,
                    fio = ?3,
                    zvan = ?4,
                    awards = ?5
                 WHERE id = ?6;",
                params![
                    record.surname.as_str(),
                    record.tenure,
                    record.fio.as_str(),
                    encode_list(&record.titles)?,
                    encode_list(&record.awards)?,
                    id,
                ],
            )
        });
        self.settle("update", result, 0) > 0
    }

    fn delete(&mut self, id: ActorId) -> bool {
        let result = self
            .db
            .with_connection(|conn| conn.execute("DELETE FROM actors WHERE id = ?1;", [id]));
        self.settle("delete", result, 0) > 0
    }

    fn count(&self) -> usize {
        let result = self.db.with_connection(|conn| {
            conn.query_row("SELECT COUNT(*) FROM actors;", [], |row| row.get::<_, i64>(0))
        });
        usize::try_from(self.settle("count", result, 0)).unwrap_or(0)
    }
}

fn parse_actor_row(row: &Row<'_>) -> rusqlite::Result<ActorRecord> {
    Ok(ActorRecord {
        id: row.get("id")?,
        surname: row.get("fam")?,
        tenure: row.get("staz")?,
        fio: row.get("fio")?,
        titles: decode_list(row, 4)?,
        awards: decode_list(row, 5)?,
    })
}

fn parse_short_row(row: &Row<'_>) -> rusqlite::Result<ShortRecord> {
    Ok(ShortRecord {
        id: row.get("id")?,
        surname: row.get("fam")?,
        tenure: row.get("staz")?,
    })
}

fn encode_list(items: &[String]) -> rusqlite::Result<String> {
    serde_json::to_string(items)
        .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))
}

fn decode_list(row: &Row<'_>, index: usize) -> rusqlite::Result<Vec<String>> {
    let text: String = row.get(index)?;
    serde_json::from_str(&text)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err)))
}
