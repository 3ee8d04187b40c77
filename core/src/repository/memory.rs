use std::cell::RefCell;

use anyhow::Result;
use uuid::Uuid;

use crate::error::ListError;
use crate::model::task::TaskRecord;
use crate::repository::traits::{apply_order, NewTask, TaskStore};

/// Process-local store with no I/O. Single-threaded, like the list it backs.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RefCell<Vec<TaskRecord>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TaskRecord>) -> Self {
        Self {
            tasks: RefCell::new(records),
        }
    }

    pub fn snapshot(&self) -> Vec<TaskRecord> {
        self.tasks.borrow().clone()
    }
}

impl TaskStore for MemoryTaskStore {
    fn list_all(&self) -> Result<Vec<TaskRecord>> {
        Ok(self.snapshot())
    }

    fn insert(&self, task: NewTask) -> Result<TaskRecord> {
        let record = task.into_record();
        self.tasks.borrow_mut().push(record.clone());
        Ok(record)
    }

    fn set_completed(&self, id: &Uuid, completed: bool) -> Result<()> {
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or(ListError::NotFound(*id))?;
        task.completed = completed;
        Ok(())
    }

    fn remove(&self, id: &Uuid) -> Result<()> {
        let mut tasks = self.tasks.borrow_mut();
        let pos = tasks
            .iter()
            .position(|t| t.id == *id)
            .ok_or(ListError::NotFound(*id))?;
        tasks.remove(pos);
        Ok(())
    }

    fn save_order(&self, ids: &[Uuid]) -> Result<()> {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        *self.tasks.borrow_mut() = apply_order(tasks, ids);
        Ok(())
    }
}
