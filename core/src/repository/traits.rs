use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::task::TaskRecord;

/// Fields the caller supplies when persisting a new task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub text: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn into_record(self) -> TaskRecord {
        TaskRecord::new(&self.text)
            .with_description(self.description)
            .with_due_date(self.due_date)
    }
}

/// Durable storage behind the task list. A missing id is reported as
/// `ListError::NotFound` wrapped in the returned error.
pub trait TaskStore {
    fn list_all(&self) -> Result<Vec<TaskRecord>>;
    /// Returns the record exactly as stored, id and timestamp included.
    fn insert(&self, task: NewTask) -> Result<TaskRecord>;
    fn set_completed(&self, id: &Uuid, completed: bool) -> Result<()>;
    fn remove(&self, id: &Uuid) -> Result<()>;

    /// Persists the user's chosen order. Stores without an order concept
    /// keep their own.
    fn save_order(&self, _ids: &[Uuid]) -> Result<()> {
        Ok(())
    }
}

/// Puts `records` into the order given by `ids`. Records not named keep their
/// relative order after the named ones; unknown ids are skipped.
pub(crate) fn apply_order(records: Vec<TaskRecord>, ids: &[Uuid]) -> Vec<TaskRecord> {
    let mut remaining: Vec<Option<TaskRecord>> = records.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(remaining.len());
    for id in ids {
        if let Some(slot) = remaining.iter_mut().find(|r| matches!(r, Some(t) if t.id == *id)) {
            ordered.extend(slot.take());
        }
    }
    ordered.extend(remaining.into_iter().flatten());
    ordered
}
