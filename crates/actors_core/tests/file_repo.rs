use actors_core::{
    Actor, ActorRecord, ActorRepository, FileActorRepository, InvalidFieldError,
    JsonActorRepository, JsonCodec, RecordCodec, YamlActorRepository, YamlCodec,
};
use std::path::Path;

fn record(fio: &str, tenure: f64) -> ActorRecord {
    Actor::new(1, fio, tenure, ["Honored Artist"], ["Oscar"])
        .expect("fixture actor is valid")
        .to_record()
}

fn seeded<C: RecordCodec>(path: &Path) -> FileActorRepository<C> {
    let mut repo = FileActorRepository::<C>::open(path);
    assert_eq!(repo.add(record("Cruz Tom Sergeevich", 20.0)), Some(1));
    assert_eq!(repo.add(record("Pitt Brad William", 15.0)), Some(2));
    assert_eq!(repo.add(record("Cavill Henry Leonidovich", 7.0)), Some(3));
    repo
}

fn tenures(repo: &impl ActorRepository) -> Vec<f64> {
    repo.get_page(100, 1)
        .into_iter()
        .map(|short| short.tenure)
        .collect()
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let repo = JsonActorRepository::open(dir.path().join("absent.json"));

    assert_eq!(repo.count(), 0);
    assert!(repo.get_page(10, 1).is_empty());
    assert!(repo.get_by_id(1).is_none());
}

#[test]
fn malformed_files_load_as_empty() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let json_path = dir.path().join("broken.json");
    let yaml_path = dir.path().join("broken.yaml");
    std::fs::write(&json_path, "[{\"ID\": 1,").expect("write fixture file");
    std::fs::write(&yaml_path, "- ID: [unclosed").expect("write fixture file");

    assert_eq!(JsonActorRepository::open(&json_path).count(), 0);
    assert_eq!(YamlActorRepository::open(&yaml_path).count(), 0);
}

#[test]
fn add_assigns_sequential_ids_and_ignores_caller_id() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut repo = JsonActorRepository::open(dir.path().join("actors.json"));

    let mut payload = record("Cruz Tom Sergeevich", 20.0);
    payload.id = 99;
    assert_eq!(repo.add(payload), Some(1));
    assert_eq!(repo.get_by_id(1).unwrap().fio, "Cruz Tom Sergeevich");
    assert!(repo.get_by_id(99).is_none());
}

#[test]
fn add_after_delete_never_reuses_a_present_id() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut repo = seeded::<JsonCodec>(&dir.path().join("actors.json"));

    assert!(repo.delete(2));
    assert_eq!(repo.add(record("Hanks Tom Jeffrey", 30.0)), Some(4));
    let ids: Vec<i64> = repo.get_page(10, 1).iter().map(|short| short.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[test]
fn delete_and_update_report_matches() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut repo = seeded::<JsonCodec>(&dir.path().join("actors.json"));

    assert!(!repo.delete(42));
    assert!(!repo.update(42, record("Nobody Here", 1.0)));
    assert_eq!(repo.count(), 3);

    assert!(repo.delete(1));
    assert!(!repo.delete(1));
    assert_eq!(repo.count(), 2);
}

#[test]
fn update_forces_the_lookup_id() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut repo = seeded::<JsonCodec>(&dir.path().join("actors.json"));

    let mut payload = record("Pitt Brad William", 16.0);
    payload.id = 77;
    assert!(repo.update(2, payload));

    let stored = repo.get_by_id(2).unwrap();
    assert_eq!(stored.id, 2);
    assert_eq!(stored.tenure, 16.0);
    assert!(repo.get_by_id(77).is_none());
    assert_eq!(repo.count(), 3);
}

#[test]
fn get_page_slices_in_order() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut repo = seeded::<JsonCodec>(&dir.path().join("actors.json"));
    repo.add(record("Hanks Tom Jeffrey", 30.0));
    repo.add(record("Streep Meryl Louise", 45.0));

    let total = repo.count();
    for page_size in 1..=6 {
        let mut rebuilt = Vec::new();
        for page_number in 1..=7 {
            let page = repo.get_page(page_size, page_number);
            let expected =
                page_size.min(total.saturating_sub((page_number - 1) * page_size));
            assert_eq!(page.len(), expected, "size={page_size} page={page_number}");
            rebuilt.extend(page.into_iter().map(|short| short.id));
        }
        assert_eq!(rebuilt, vec![1, 2, 3, 4, 5]);
    }

    let first = repo.get_page(2, 1);
    assert_eq!(first[0].surname, "Cruz");
    assert_eq!(first[1].surname, "Pitt");
    assert!(repo.get_page(2, 0).is_empty());
    assert!(repo.get_page(0, 1).is_empty());
}

#[test]
fn sort_by_tenure_ascending_and_descending() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("actors.json");
    let mut repo = seeded::<JsonCodec>(&path);

    repo.sort_by_field("tenure", false).unwrap();
    assert_eq!(tenures(&repo), vec![7.0, 15.0, 20.0]);
    assert_eq!(tenures(&JsonActorRepository::open(&path)), vec![7.0, 15.0, 20.0]);

    repo.sort_by_field("Стаж", true).unwrap();
    assert_eq!(tenures(&repo), vec![20.0, 15.0, 7.0]);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut repo = JsonActorRepository::open(dir.path().join("actors.json"));
    repo.add(record("Cruz Tom Sergeevich", 10.0));
    repo.add(record("Pitt Brad William", 5.0));
    repo.add(record("Cavill Henry Leonidovich", 10.0));

    repo.sort_by_field("tenure", false).unwrap();
    let ids: Vec<i64> = repo.get_page(10, 1).iter().map(|short| short.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    repo.sort_by_field("tenure", true).unwrap();
    let ids: Vec<i64> = repo.get_page(10, 1).iter().map(|short| short.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn sort_rejects_unknown_field_unless_empty() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut empty = YamlActorRepository::open(dir.path().join("empty.yaml"));
    empty.sort_by_field("height", false).unwrap();
    empty.sort_by_field("tenure", true).unwrap();
    assert!(!dir.path().join("empty.yaml").exists());

    let mut repo = seeded::<YamlCodec>(&dir.path().join("actors.yaml"));
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
fn json_round_trip_reloads_identical_records() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("actors.json");
    let repo = seeded::<JsonCodec>(&path);

    let reloaded = JsonActorRepository::open(&path);
    assert_eq!(reloaded.records(), repo.records());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[0]["ФИО"], "Cruz Tom Sergeevich");
    assert_eq!(raw.as_array().unwrap().len(), 3);
}

#[test]
fn yaml_round_trip_reloads_identical_records() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("actors.yaml");
    let mut repo = seeded::<YamlCodec>(&path);
    repo.update(
        3,
        Actor::new(3, "Кавилл Генри Леонидович", 7.0, "", ["MTV Award", "BAFTA"])
            .expect("fixture actor is valid")
            .to_record(),
    );

    let reloaded = YamlActorRepository::open(&path);
    assert_eq!(reloaded.records(), repo.records());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Кавилл Генри Леонидович"));
    assert!(text.starts_with("- ID: 1"));
}

#[test]
fn failed_save_leaves_memory_untouched() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("missing-dir").join("actors.json");
    let mut repo = JsonActorRepository::open(&path);

    assert_eq!(repo.add(record("Cruz Tom Sergeevich", 20.0)), None);
    assert_eq!(repo.count(), 0);
}
