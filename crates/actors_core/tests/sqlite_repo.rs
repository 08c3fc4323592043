use actors_core::db::schema::SCHEMA_VERSION;
use actors_core::db::open_db;
use actors_core::{
    Actor, ActorRecord, ActorRepository, DbConfig, DbError, DbHandle, InvalidFieldError,
    JsonActorRepository, SqliteActorRepository,
};
use rusqlite::Connection;

fn record(fio: &str, tenure: f64) -> ActorRecord {
    Actor::new(1, fio, tenure, ["Honored Artist"], ["Oscar", "BAFTA"])
        .expect("fixture actor is valid")
        .to_record()
}

fn memory_repo() -> SqliteActorRepository {
    SqliteActorRepository::new(DbHandle::open(&DbConfig::in_memory()))
}

fn seeded() -> SqliteActorRepository {
    let mut repo = memory_repo();
    assert_eq!(repo.add(record("Cruz Tom Sergeevich", 20.0)), Some(1));
    assert_eq!(repo.add(record("Pitt Brad William", 15.0)), Some(2));
    assert_eq!(repo.add(record("Cavill Henry Leonidovich", 7.0)), Some(3));
    repo
}

fn ids<R: ActorRepository>(repo: &R) -> Vec<i64> {
    repo.get_page(100, 1).iter().map(|short| short.id).collect()
}

fn tenures(repo: &SqliteActorRepository) -> Vec<f64> {
    repo.get_page(100, 1)
        .into_iter()
        .map(|short| short.tenure)
        .collect()
}

#[test]
fn add_and_get_roundtrip_preserves_lists() {
    let mut repo = memory_repo();
    let payload = record("Cruz Tom Sergeevich", 20.0);

    let id = repo.add(payload.clone()).unwrap();
    let loaded = repo.get_by_id(id).unwrap();

    assert_eq!(loaded, payload);
    assert_eq!(loaded.awards, vec!["Oscar".to_string(), "BAFTA".to_string()]);
    assert!(repo.get_by_id(id + 1).is_none());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut repo = seeded();

    assert!(repo.delete(2));
    assert_eq!(repo.add(record("Hanks Tom Jeffrey", 30.0)), Some(4));

    assert!(repo.delete(4));
    assert_eq!(repo.add(record("Streep Meryl Louise", 45.0)), Some(5));
}

#[test]
fn update_and_delete_report_matches() {
    let mut repo = seeded();

    let mut payload = record("Pitt Brad William", 16.0);
    payload.id = 77;
    assert!(repo.update(2, payload));
    let stored = repo.get_by_id(2).unwrap();
    assert_eq!(stored.id, 2);
    assert_eq!(stored.tenure, 16.0);

    assert!(!repo.update(42, record("Nobody Here", 1.0)));
    assert!(!repo.delete(42));
    assert!(repo.delete(1));
    assert_eq!(repo.count(), 2);
}

#[test]
fn get_page_uses_limit_and_offset() {
    let repo = seeded();

    let page_ids = |page: usize| -> Vec<i64> {
        repo.get_page(2, page).iter().map(|short| short.id).collect()
    };
    assert_eq!(page_ids(1), vec![1, 2]);
    assert_eq!(page_ids(2), vec![3]);
    assert!(page_ids(3).is_empty());
    assert!(repo.get_page(2, 0).is_empty());

    let first = repo.get_page(1, 1);
    assert_eq!(first[0].surname, "Cruz");
    assert_eq!(first[0].tenure, 20.0);
}

#[test]
fn sort_changes_page_order() {
    let mut repo = seeded();

    repo.sort_by_field("tenure", false).unwrap();
    assert_eq!(tenures(&repo), vec![7.0, 15.0, 20.0]);

    repo.sort_by_field("Стаж", true).unwrap();
    assert_eq!(tenures(&repo), vec![20.0, 15.0, 7.0]);

    let err = repo.sort_by_field("height", false).unwrap_err();
    assert_eq!(
        err,
        InvalidFieldError {
            field: "height".to_string()
        }
    );
    assert_eq!(tenures(&repo), vec![20.0, 15.0, 7.0]);
}

#[test]
fn sort_is_stable_and_shared_through_the_handle() {
    let handle = DbHandle::open(&DbConfig::in_memory());
    let mut repo = SqliteActorRepository::new(handle.clone());
    let other = SqliteActorRepository::new(handle);
    assert_eq!(repo.add(record("Cruz Tom Sergeevich", 10.0)), Some(1));
    assert_eq!(repo.add(record("Cruz Ann Petrovna", 20.0)), Some(2));
    assert_eq!(repo.add(record("Pitt Brad William", 10.0)), Some(3));

    repo.sort_by_field("tenure", true).expect("tenure is sortable");
    assert_eq!(ids(&repo), vec![2, 1, 3]);

    repo.sort_by_field("surname", false).expect("surname is sortable");
    assert_eq!(ids(&repo), vec![2, 1, 3]);
    assert_eq!(ids(&other), vec![2, 1, 3]);

    assert_eq!(repo.add(record("Cavill Henry Leonidovich", 7.0)), Some(4));
    assert_eq!(ids(&other), vec![2, 1, 3, 4]);
    let second_page: Vec<i64> = other.get_page(2, 2).iter().map(|short| short.id).collect();
    assert_eq!(second_page, vec![3, 4]);
}

#[test]
fn sort_order_matches_file_backend() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut json = JsonActorRepository::open(dir.path().join("actors.json"));
    let mut sqlite = memory_repo();
    sort_twice(&mut json);
    sort_twice(&mut sqlite);

    assert_eq!(ids(&json), vec![2, 1]);
    assert_eq!(ids(&sqlite), ids(&json));
}

fn sort_twice<R: ActorRepository>(repo: &mut R) {
    repo.add(record("Cruz Tom Sergeevich", 10.0))
        .expect("seed first actor");
    repo.add(record("Cruz Ann Petrovna", 20.0))
        .expect("seed second actor");
    repo.sort_by_field("tenure", true).expect("sort by tenure");
    repo.sort_by_field("Фамилия", false).expect("sort by surname");
}

#[test]
fn sort_on_empty_table_is_a_no_op() {
    let mut repo = memory_repo();

    repo.sort_by_field("height", false).unwrap();
    assert!(repo.get_page(10, 1).is_empty());
}

#[test]
fn invalid_records_are_rejected_with_sentinel() {
    let mut repo = memory_repo();
    let mut payload = record("Cruz Tom Sergeevich", 20.0);
    payload.tenure = 500.0;

    assert_eq!(repo.add(payload), None);
    assert_eq!(repo.count(), 0);
}

#[test]
fn unavailable_handle_degrades_to_sentinels() {
    let mut repo = SqliteActorRepository::new(DbHandle::unavailable());

    assert!(!repo.handle().is_connected());
    assert_eq!(repo.add(record("Cruz Tom Sergeevich", 20.0)), None);
    assert!(repo.get_by_id(1).is_none());
    assert!(repo.get_page(10, 1).is_empty());
    assert!(!repo.update(1, record("Cruz Tom Sergeevich", 20.0)));
    assert!(!repo.delete(1));
    assert_eq!(repo.count(), 0);
    repo.sort_by_field("tenure", false).unwrap();
}

#[test]
fn failed_connection_is_recorded_as_unavailable() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = DbConfig::for_file(dir.path().join("no-such-dir").join("actors.db"));

    let handle = DbHandle::open(&config);
    assert!(!handle.is_connected());
    let err = handle.with_connection(|_| Ok(())).unwrap_err();
    assert!(matches!(err, DbError::Unavailable));
}

#[test]
fn file_database_persists_between_handles() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = DbConfig::for_file(dir.path().join("actors.db"));

    let mut repo = SqliteActorRepository::new(DbHandle::open(&config));
    let id = repo
        .add(record("Cruz Tom Sergeevich", 20.0))
        .expect("insert into file database");
    drop(repo);

    let reopened = SqliteActorRepository::new(DbHandle::open(&config));
    assert_eq!(reopened.get_by_id(id).unwrap().fio, "Cruz Tom Sergeevich");
    assert_eq!(reopened.count(), 1);
}

#[test]
fn open_db_creates_actors_table_and_version() {
    let conn = open_db(&DbConfig::in_memory()).expect("open in-memory db");

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("read user_version");
    assert_eq!(version, SCHEMA_VERSION);
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'actors');",
            [],
            |row| row.get(0),
        )
        .expect("query sqlite_master");
    assert_eq!(exists, 1);
}

#[test]
fn open_db_rejects_newer_schema() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).expect("open raw sqlite file");
    conn
        .execute_batch("PRAGMA user_version = 999;")
        .expect("bump user_version");
    drop(conn);

    let err = open_db(&DbConfig::for_file(&path)).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}
