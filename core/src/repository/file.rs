use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use uuid::Uuid;

use crate::error::ListError;
use crate::model::task::TaskRecord;
use crate::repository::traits::{apply_order, NewTask, TaskStore};

const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Keeps the whole list as a pretty-printed JSON array, in display order.
#[derive(Clone)]
pub struct FileTaskStore {
    file_path: PathBuf,
}

impl FileTaskStore {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;
        let file_path = data_dir.join(DEFAULT_FILE_NAME);

        if !file_path.exists() {
            let store = FileTaskStore { file_path };
            store.write_tasks(&[])?;
            debug!(path = %store.file_path.display(), "initialized task file");
            return Ok(store);
        }

        Ok(FileTaskStore { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_tasks(&self) -> Result<Vec<TaskRecord>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("opening {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)
            .with_context(|| format!("parsing {}", self.file_path.display()))?;
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[TaskRecord]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

impl TaskStore for FileTaskStore {
    fn list_all(&self) -> Result<Vec<TaskRecord>> {
        self.read_tasks()
    }

    fn insert(&self, task: NewTask) -> Result<TaskRecord> {
        let mut tasks = self.read_tasks()?;
        let record = task.into_record();
        tasks.push(record.clone());
        self.write_tasks(&tasks)?;
        Ok(record)
    }

    fn set_completed(&self, id: &Uuid, completed: bool) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or(ListError::NotFound(*id))?;
        task.completed = completed;
        self.write_tasks(&tasks)
    }

    fn remove(&self, id: &Uuid) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        let initial_len = tasks.len();
        tasks.retain(|t| t.id != *id);

        if tasks.len() == initial_len {
            return Err(ListError::NotFound(*id).into());
        }

        self.write_tasks(&tasks)
    }

    fn save_order(&self, ids: &[Uuid]) -> Result<()> {
        let tasks = self.read_tasks()?;
        self.write_tasks(&apply_order(tasks, ids))
    }
}
