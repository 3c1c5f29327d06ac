use taskman_core::{JsonFileBackend, ListFilter, TaskStore};
use tempfile::TempDir;

fn backend(dir: &TempDir) -> JsonFileBackend {
    JsonFileBackend::from_path(dir.path().join("tasks.json"))
}

#[test]
fn tasks_survive_a_store_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = TaskStore::open(backend(&dir));
        store.add("Write report", "", "2024-01-15").unwrap();
        let t = store.add("Write tests", "", "2024-01-20").unwrap();
        store.complete(&t.id).unwrap();
    }

    let store = TaskStore::open(backend(&dir));
    let all = store.list(ListFilter::All);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "TASK001");
    assert_eq!(all[0].title, "Write report");
    assert!(!all[0].completed);
    assert!(all[1].completed);
}

#[test]
fn id_sequence_continues_across_reopens() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = TaskStore::open(backend(&dir));
        store.add("a", "", "2024-01-15").unwrap();
        store.add("b", "", "2024-01-15").unwrap();
    }

    let mut store = TaskStore::open(backend(&dir));
    let t = store.add("c", "", "2024-01-15").unwrap();
    assert_eq!(t.id, "TASK003");
}

#[test]
fn invalid_json_file_opens_as_an_empty_store() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{ definitely not json").unwrap();

    let store = TaskStore::open(backend(&dir));
    assert!(store.is_empty());
    assert_eq!(store.statistics().total, 0);
}

#[test]
fn first_mutation_after_corrupt_load_replaces_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "][").unwrap();

    let mut store = TaskStore::open(JsonFileBackend::from_path(path.clone()));
    store.add("fresh", "", "2024-01-15").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.trim_start().starts_with('['));
    assert!(raw.contains("\"fresh\""));
}

#[test]
fn wrapped_legacy_file_is_rewritten_as_a_bare_array_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(
        &path,
        r#"{
            "tasks": [{
                "task_id": "TASK001",
                "title": "Carried over",
                "description": "",
                "due_date": "2024-01-15",
                "completed": false,
                "created_at": "2024-01-01T00:00:00"
            }],
            "last_updated": "2024-01-01T00:00:00"
        }"#,
    )
    .unwrap();

    let mut store = TaskStore::open(JsonFileBackend::from_path(path.clone()));
    assert_eq!(store.len(), 1);

    let t = store.add("New one", "", "2024-02-01").unwrap();
    assert_eq!(t.id, "TASK002");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.trim_start().starts_with('['));
    assert!(raw.contains("\"Carried over\""));
}
