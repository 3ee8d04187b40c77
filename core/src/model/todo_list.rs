use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ListError;
use crate::gesture::DragOutcome;
use crate::model::filter::FilterCriteria;
use crate::model::task::TaskRecord;

/// Filtered projection of the list, in list order. Borrowed, never mutated.
pub type DerivedView<'a> = Vec<&'a TaskRecord>;

/// The authoritative, user-ordered list of tasks.
///
/// Ids are unique at all times. Every rejected operation leaves the list
/// exactly as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoList {
    records: Vec<TaskRecord>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list from stored records, keeping the first record of any
    /// duplicated id.
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id) {
                kept.push(record);
            } else {
                warn!(id = %record.id, "dropping duplicate task id");
            }
        }
        Self { records: kept }
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<&TaskRecord> {
        self.records.iter().find(|t| t.id == *id)
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.records.iter().position(|t| t.id == *id)
    }

    /// Appends a new active task. Blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<TaskRecord> {
        self.try_add(text).ok()
    }

    pub fn try_add(&mut self, text: &str) -> Result<TaskRecord, ListError> {
        if text.trim().is_empty() {
            debug!("ignoring blank task text");
            return Err(ListError::EmptyInput);
        }
        let record = TaskRecord::new(text);
        self.insert_record(record.clone())?;
        Ok(record)
    }

    /// Appends a record whose id was assigned elsewhere (e.g. by a store).
    pub fn insert_record(&mut self, record: TaskRecord) -> Result<(), ListError> {
        if record.text.trim().is_empty() {
            return Err(ListError::EmptyInput);
        }
        if self.get(&record.id).is_some() {
            return Err(ListError::DuplicateId(record.id));
        }
        debug!(id = %record.id, "task added");
        self.records.push(record);
        Ok(())
    }

    /// Flips the completed flag in place and returns the new value.
    pub fn toggle(&mut self, id: &Uuid) -> Result<bool, ListError> {
        let task = self
            .records
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or(ListError::NotFound(*id))?;
        task.toggle();
        debug!(id = %id, completed = task.completed, "task toggled");
        Ok(task.completed)
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<TaskRecord, ListError> {
        let pos = self.position(id).ok_or(ListError::NotFound(*id))?;
        debug!(id = %id, "task deleted");
        Ok(self.records.remove(pos))
    }

    /// Removes every completed task and returns them, in list order.
    pub fn clear_completed(&mut self) -> Vec<TaskRecord> {
        let (done, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|t| t.completed);
        self.records = remaining;
        if !done.is_empty() {
            debug!(removed = done.len(), "completed tasks cleared");
        }
        done
    }

    pub fn completed_ids(&self) -> Vec<Uuid> {
        self.records.iter().filter(|t| t.completed).map(|t| t.id).collect()
    }

    /// Moves the element at `from` so that it ends up at `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        let len = self.records.len();
        for index in [from, to] {
            if index >= len {
                return Err(ListError::OutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let task = self.records.remove(from);
        self.records.insert(to, task);
        debug!(from, to, "task reordered");
        Ok(())
    }

    pub fn derive_view(&self, criteria: &FilterCriteria) -> DerivedView<'_> {
        derive_view(&self.records, criteria)
    }

    /// Active tasks over the whole list, regardless of any filter.
    pub fn count_active(&self) -> usize {
        self.records.iter().filter(|t| !t.completed).count()
    }

    pub fn count_completed(&self) -> usize {
        self.records.len() - self.count_active()
    }

    /// Applies a one-slot drag made on row `display_index` of the view derived
    /// from `criteria`. The dragged task takes the list position of its
    /// displayed neighbour, so it swaps places with that neighbour on screen
    /// even when hidden tasks sit between them.
    ///
    /// Returns the `(from, to)` list indices that were applied, or `None` when
    /// nothing moved.
    pub fn apply_drag(
        &mut self,
        criteria: &FilterCriteria,
        display_index: usize,
        outcome: DragOutcome,
    ) -> Result<Option<(usize, usize)>, ListError> {
        let view: Vec<Uuid> = self.derive_view(criteria).iter().map(|t| t.id).collect();
        if display_index >= view.len() {
            return Err(ListError::OutOfRange {
                index: display_index,
                len: view.len(),
            });
        }

        let neighbour = match outcome {
            DragOutcome::NoOp => return Ok(None),
            DragOutcome::MoveUp if display_index == 0 => return Ok(None),
            DragOutcome::MoveUp => display_index - 1,
            DragOutcome::MoveDown if display_index + 1 == view.len() => return Ok(None),
            DragOutcome::MoveDown => display_index + 1,
        };

        let from = self.position(&view[display_index]).ok_or(ListError::NotFound(view[display_index]))?;
        let to = self.position(&view[neighbour]).ok_or(ListError::NotFound(view[neighbour]))?;
        self.reorder(from, to)?;
        Ok(Some((from, to)))
    }
}

/// Pure projection: the records accepted by `criteria`, in their list order.
pub fn derive_view<'a>(records: &'a [TaskRecord], criteria: &FilterCriteria) -> DerivedView<'a> {
    records.iter().filter(|t| criteria.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::StatusFilter;
    use pretty_assertions::assert_eq;

    fn list_of(items: &[(&str, bool)]) -> TodoList {
        let records = items
            .iter()
            .map(|(text, completed)| {
                let mut t = TaskRecord::new(text);
                t.completed = *completed;
                t
            })
            .collect();
        TodoList::from_records(records)
    }

    fn texts(list: &TodoList) -> Vec<&str> {
        list.records().iter().map(|t| t.text.as_str()).collect()
    }

    fn view_texts<'a>(view: &DerivedView<'a>) -> Vec<&'a str> {
        view.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_add_appends_active_record() {
        let mut list = list_of(&[("A", false)]);
        let added = list.add("  Buy milk  ").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(added.text, "Buy milk");
        assert!(!added.completed);
        assert_eq!(list.records().last().unwrap().id, added.id);
    }

    #[test]
    fn test_add_blank_is_silent_noop() {
        let mut list = list_of(&[("A", false)]);
        let before = list.clone();
        assert!(list.add("").is_none());
        assert!(list.add("   ").is_none());
        assert!(list.add("\t\n").is_none());
        assert_eq!(list, before);
        assert_eq!(list.try_add(" "), Err(ListError::EmptyInput));
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let mut list = TodoList::new();
        let a = list.add("same").unwrap();
        let b = list.add("same").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_insert_record_rejects_duplicate_id() {
        let mut list = TodoList::new();
        let record = TaskRecord::new("A");
        list.insert_record(record.clone()).unwrap();
        assert_eq!(list.insert_record(record.clone()), Err(ListError::DuplicateId(record.id)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_from_records_drops_duplicates() {
        let a = TaskRecord::new("A");
        let mut dup = TaskRecord::with_id(a.id, "A again");
        dup.completed = true;
        let b = TaskRecord::new("B");
        let list = TodoList::from_records(vec![a.clone(), dup, b]);
        assert_eq!(texts(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut list = list_of(&[("A", false), ("B", true)]);
        let id = list.records()[1].id;
        assert_eq!(list.toggle(&id), Ok(false));
        assert_eq!(list.toggle(&id), Ok(true));
        assert_eq!(texts(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_toggle_after_delete_is_not_found() {
        let mut list = list_of(&[("A", false), ("B", false), ("C", false)]);
        let id = list.records()[1].id;
        let removed = list.delete(&id).unwrap();
        assert_eq!(removed.text, "B");
        assert_eq!(texts(&list), vec!["A", "C"]);
        assert_eq!(list.toggle(&id), Err(ListError::NotFound(id)));
        assert_eq!(list.delete(&id), Err(ListError::NotFound(id)));
    }

    #[test]
    fn test_clear_completed_scenario() {
        let mut list = list_of(&[("A", false), ("B", true), ("C", false)]);
        let removed = list.clear_completed();
        assert_eq!(removed.len(), 1);
        assert_eq!(texts(&list), vec!["A", "C"]);
        assert_eq!(list.count_active(), 2);

        let snapshot = list.clone();
        assert!(list.clear_completed().is_empty());
        assert_eq!(list, snapshot);
    }

    #[test]
    fn test_reorder_moves_and_shifts() {
        let mut list = list_of(&[("A", false), ("B", false), ("C", false), ("D", false)]);
        list.reorder(0, 2).unwrap();
        assert_eq!(texts(&list), vec!["B", "C", "A", "D"]);
        list.reorder(3, 0).unwrap();
        assert_eq!(texts(&list), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_round_trip_restores_order() {
        let mut list = list_of(&[("A", false), ("B", false), ("C", false), ("D", false), ("E", false)]);
        let original = list.clone();
        list.reorder(1, 3).unwrap();
        assert_ne!(list, original);
        list.reorder(3, 1).unwrap();
        assert_eq!(list, original);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let mut list = list_of(&[("A", false), ("B", false)]);
        let before = list.clone();
        assert_eq!(list.reorder(2, 0), Err(ListError::OutOfRange { index: 2, len: 2 }));
        assert_eq!(list.reorder(0, 5), Err(ListError::OutOfRange { index: 5, len: 2 }));
        assert_eq!(list, before);

        let mut empty = TodoList::new();
        assert_eq!(empty.reorder(0, 0), Err(ListError::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut list = list_of(&[("A", false), ("B", false)]);
        let before = list.clone();
        list.reorder(1, 1).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_derive_view_active_only_preserves_order() {
        let list = list_of(&[("A", false), ("B", true), ("C", false), ("D", true), ("E", false)]);
        let view = list.derive_view(&FilterCriteria::new(StatusFilter::Active, ""));
        assert_eq!(view_texts(&view), vec!["A", "C", "E"]);
        assert!(view.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_derive_view_search_and_status() {
        let list = list_of(&[
            ("Complete online JavaScript course", true),
            ("Jog around the park 3x", false),
            ("Complete Todo App on Frontend Mentor", false),
        ]);
        let view = list.derive_view(&FilterCriteria::new(StatusFilter::All, "complete"));
        assert_eq!(
            view_texts(&view),
            vec!["Complete online JavaScript course", "Complete Todo App on Frontend Mentor"]
        );
        let view = list.derive_view(&FilterCriteria::new(StatusFilter::Active, "complete"));
        assert_eq!(view_texts(&view), vec!["Complete Todo App on Frontend Mentor"]);
    }

    #[test]
    fn test_count_active_ignores_view() {
        let list = list_of(&[("A", false), ("B", true), ("C", false)]);
        let before = list.count_active();
        let _ = list.derive_view(&FilterCriteria::new(StatusFilter::Completed, "zzz"));
        let _ = list.derive_view(&FilterCriteria::new(StatusFilter::Active, "a"));
        assert_eq!(list.count_active(), before);
        assert_eq!(before, 2);
        assert_eq!(list.count_completed(), 1);
    }

    #[test]
    fn test_apply_drag_unfiltered_matches_adjacent_reorder() {
        let mut list = list_of(&[("A", false), ("B", false), ("C", false)]);
        let all = FilterCriteria::default();
        assert_eq!(list.apply_drag(&all, 2, DragOutcome::MoveUp), Ok(Some((2, 1))));
        assert_eq!(texts(&list), vec!["A", "C", "B"]);
        assert_eq!(list.apply_drag(&all, 0, DragOutcome::MoveDown), Ok(Some((0, 1))));
        assert_eq!(texts(&list), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_apply_drag_filtered_jumps_hidden_rows() {
        let mut list = list_of(&[("A", false), ("B", true), ("C", false)]);
        let active = FilterCriteria::new(StatusFilter::Active, "");
        assert_eq!(list.apply_drag(&active, 1, DragOutcome::MoveUp), Ok(Some((2, 0))));
        assert_eq!(texts(&list), vec!["C", "A", "B"]);
        assert_eq!(view_texts(&list.derive_view(&active)), vec!["C", "A"]);
    }

    #[test]
    fn test_apply_drag_at_edges_and_noop() {
        let mut list = list_of(&[("A", false), ("B", false)]);
        let before = list.clone();
        let all = FilterCriteria::default();
        assert_eq!(list.apply_drag(&all, 0, DragOutcome::MoveUp), Ok(None));
        assert_eq!(list.apply_drag(&all, 1, DragOutcome::MoveDown), Ok(None));
        assert_eq!(list.apply_drag(&all, 1, DragOutcome::NoOp), Ok(None));
        assert_eq!(
            list.apply_drag(&all, 2, DragOutcome::MoveUp),
            Err(ListError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(list, before);
    }
}
