use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ListError;
use crate::gesture::DragOutcome;
use crate::model::filter::FilterCriteria;
use crate::model::task::TaskRecord;
use crate::model::todo_list::{DerivedView, TodoList};
use crate::repository::{NewTask, TaskStore};

/// Couples the in-memory list to its store. Each mutation is written to the
/// store first and applied to the list only once the store accepted it.
pub struct TaskService<S: TaskStore> {
    store: S,
    list: TodoList,
}

impl<S: TaskStore> TaskService<S> {
    pub fn load(store: S) -> Result<Self> {
        let list = TodoList::from_records(store.list_all()?);
        info!(tasks = list.len(), "task list loaded");
        Ok(Self { store, list })
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Blank text is ignored: `Ok(None)` and the store is never called.
    pub fn add(
        &mut self,
        text: &str,
        description: Option<String>,
        due_date: Option<NaiveDate>,
    ) -> Result<Option<TaskRecord>> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank task text");
            return Ok(None);
        }

        let record = self.store.insert(NewTask {
            text: text.to_string(),
            description,
            due_date,
        })?;
        self.list.insert_record(record.clone())?;
        Ok(Some(record))
    }

    /// Returns the new completed flag.
    pub fn toggle(&mut self, id: &Uuid) -> Result<bool> {
        let current = self.list.get(id).ok_or(ListError::NotFound(*id))?.completed;
        self.store.set_completed(id, !current)?;
        Ok(self.list.toggle(id)?)
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<TaskRecord> {
        if self.list.get(id).is_none() {
            return Err(ListError::NotFound(*id).into());
        }
        self.store.remove(id)?;
        Ok(self.list.delete(id)?)
    }

    /// Removes every completed task and returns how many went. A store failure
    /// part way leaves the already-removed tasks gone from both sides.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let ids = self.list.completed_ids();
        for id in &ids {
            self.store.remove(id)?;
            self.list.delete(id)?;
        }
        if !ids.is_empty() {
            info!(removed = ids.len(), "cleared completed tasks");
        }
        Ok(ids.len())
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let mut reordered = self.list.clone();
        reordered.reorder(from, to)?;
        self.commit_order(reordered)
    }

    /// Applies the outcome of a drag made on a row of the view for `criteria`.
    pub fn apply_drag(
        &mut self,
        criteria: &FilterCriteria,
        display_index: usize,
        outcome: DragOutcome,
    ) -> Result<Option<(usize, usize)>> {
        let mut reordered = self.list.clone();
        let moved = reordered.apply_drag(criteria, display_index, outcome)?;
        if moved.is_some() {
            self.commit_order(reordered)?;
        }
        Ok(moved)
    }

    pub fn view(&self, criteria: &FilterCriteria) -> DerivedView<'_> {
        self.list.derive_view(criteria)
    }

    pub fn count_active(&self) -> usize {
        self.list.count_active()
    }

    /// Finds the single task whose id starts with `prefix`.
    pub fn resolve_id(&self, prefix: &str) -> Result<Uuid> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(anyhow!("Task id is required"));
        }
        let matches: Vec<Uuid> = self
            .list
            .records()
            .iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .map(|t| t.id)
            .collect();

        match matches.len() {
            1 => Ok(matches[0]),
            0 => Err(anyhow!("No task matches id '{}'", prefix)),
            n => Err(anyhow!("Id '{}' is ambiguous ({} tasks match)", prefix, n)),
        }
    }

    /// Saves the order of `reordered` and adopts it only if the store agreed.
    fn commit_order(&mut self, reordered: TodoList) -> Result<()> {
        let ids: Vec<Uuid> = reordered.records().iter().map(|t| t.id).collect();
        self.store.save_order(&ids)?;
        self.list = reordered;
        Ok(())
    }
}
