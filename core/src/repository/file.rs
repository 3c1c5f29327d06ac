use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::model::task::Task;
use crate::repository::traits::TaskBackend;

const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Both file shapes seen in the wild: the canonical bare array of records,
/// and an older wrapper object carrying the array under `tasks` (its
/// `last_updated` sibling is ignored).
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskFile {
    Records(Vec<Task>),
    Wrapped { tasks: Vec<Task> },
}

#[derive(Clone)]
pub struct JsonFileBackend {
    file_path: PathBuf,
}

impl JsonFileBackend {
    /// Default location: `<base_dir>/tasks.json`, with `~/.taskman` as the
    /// base when none is given. The directory is created up front; the file
    /// itself is not, so a fresh install loads as an empty collection.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".taskman")
            }
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        Ok(JsonFileBackend { file_path: path })
    }

    /// Points the backend at an explicit file, bypassing the default
    /// directory convention.
    pub fn from_path(file_path: PathBuf) -> Self {
        JsonFileBackend { file_path }
    }

    pub fn file_path(&self) -> &std::path::Path {
        &self.file_path
    }
}

impl TaskBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<Task>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.file_path)
            .with_context(|| format!("failed to read {}", self.file_path.display()))?;
        let parsed: TaskFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.file_path.display()))?;

        Ok(match parsed {
            TaskFile::Records(tasks) => tasks,
            TaskFile::Wrapped { tasks } => tasks,
        })
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        // Write the snapshot next to the target and rename over it, so a
        // crash mid-write never leaves a half-written tasks file behind.
        let tmp_path = self.file_path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)
                .with_context(|| format!("failed to create {}", tmp_path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, tasks)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend_in(dir: &TempDir) -> JsonFileBackend {
        JsonFileBackend::from_path(dir.path().join("tasks.json"))
    }

    fn task(id: &str, title: &str) -> Task {
        Task::new(id.to_string(), title, "", "2024-01-15").unwrap()
    }

    #[test]
    fn test_missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let backend = backend_in(&dir);
        assert_eq!(backend.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let backend = backend_in(&dir);
        let tasks = vec![task("TASK001", "Write report"), task("TASK002", "Write tests")];

        backend.save(&tasks).unwrap();
        assert_eq!(backend.load().unwrap(), tasks);
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let backend = backend_in(&dir);
        backend.save(&[task("TASK001", "a")]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["tasks.json".to_string()]);
    }

    #[test]
    fn test_non_ascii_text_survives_the_file() {
        let dir = TempDir::new().unwrap();
        let backend = backend_in(&dir);
        let tasks = vec![task("TASK001", "ประชุมทีม — café ☕")];

        backend.save(&tasks).unwrap();
        assert_eq!(backend.load().unwrap()[0].title, "ประชุมทีม — café ☕");
    }

    #[test]
    fn test_load_accepts_wrapped_legacy_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"{
                "tasks": [{
                    "task_id": "TASK001",
                    "title": "Old record",
                    "description": "from the wrapper era",
                    "due_date": "2024-01-15",
                    "completed": true,
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-02T00:00:00Z"
                }],
                "last_updated": "2024-01-02T00:00:00Z"
            }"#,
        )
        .unwrap();

        let tasks = JsonFileBackend::from_path(path).load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "TASK001");
        assert!(tasks[0].completed);
    }

    #[test]
    fn test_load_reports_invalid_json_as_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json at all").unwrap();

        assert!(JsonFileBackend::from_path(path).load().is_err());
    }

    #[test]
    fn test_load_reports_records_missing_required_fields_as_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"[{"title": "no id or due date"}]"#).unwrap();

        assert!(JsonFileBackend::from_path(path).load().is_err());
    }

    #[test]
    fn test_save_writes_canonical_bare_array() {
        let dir = TempDir::new().unwrap();
        let backend = backend_in(&dir);
        backend.save(&[task("TASK001", "a")]).unwrap();

        let raw = fs::read_to_string(backend.file_path()).unwrap();
        assert!(raw.trim_start().starts_with('['));
    }
}
