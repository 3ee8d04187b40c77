use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use swipetodo_core::{
    parse_args, parse_due_date, Config, DragOutcome, DragReorderInterpreter, FileTaskStore,
    FilterCriteria, StatusFilter, TaskRecord, TaskService,
};

/// Rows above the first task inside the list block: border and header.
const LIST_HEADER_ROWS: u16 = 2;

pub enum InputMode {
    Normal,
    Adding,
    Searching,
}

pub struct App {
    pub service: TaskService<FileTaskStore>,
    pub criteria: FilterCriteria,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub drag: DragReorderInterpreter,
    pub message: Option<String>,
    pub dark: bool,
    /// Set by the renderer so pointer events can be mapped to rows.
    pub list_area: Rect,
    drag_origin_y: u16,
    row_height: f64,
}

impl App {
    pub fn new(service: TaskService<FileTaskStore>, config: &Config) -> App {
        let mut state = TableState::default();
        if !service.list().is_empty() {
            state.select(Some(0));
        }
        App {
            service,
            criteria: FilterCriteria::default(),
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            drag: DragReorderInterpreter::new(config.drag_threshold),
            message: None,
            dark: true,
            list_area: Rect::default(),
            drag_origin_y: 0,
            row_height: config.row_height,
        }
    }

    pub fn visible(&self) -> Vec<&TaskRecord> {
        self.service.view(&self.criteria)
    }

    pub fn visible_len(&self) -> usize {
        self.visible().len()
    }

    pub fn items_left(&self) -> usize {
        self.service.count_active()
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        };
        self.state.select(Some(i));
    }

    fn selected_id(&self) -> Option<uuid::Uuid> {
        let i = self.state.selected()?;
        self.visible().get(i).map(|t| t.id)
    }

    /// Keeps the selection on a visible row after the view changed.
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.state.select(None);
        } else {
            let i = self.state.selected().unwrap_or(0).min(len - 1);
            self.state.select(Some(i));
        }
    }

    fn report<T>(&mut self, result: anyhow::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.message = Some(e.to_string());
                None
            }
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.service.toggle(&id);
            self.report(result);
            self.clamp_selection();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.service.delete(&id);
            self.report(result);
            self.clamp_selection();
        }
    }

    pub fn clear_completed(&mut self) {
        let result = self.service.clear_completed();
        if let Some(removed) = self.report(result) {
            self.message = Some(format!("Cleared {} completed", removed));
        }
        self.clamp_selection();
    }

    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.criteria.status.next());
    }

    pub fn set_filter(&mut self, status: StatusFilter) {
        self.criteria.status = status;
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.criteria.search.clear();
        self.clamp_selection();
    }

    /// Moves the selected row one slot by replaying a drag just past the
    /// threshold, so keys and pointer share the same rules.
    pub fn move_selected(&mut self, up: bool) {
        let Some(row) = self.state.selected() else { return };
        let nudge = self.drag.threshold() + 1.0;
        self.drag.on_gesture_start(row, self.visible_len());
        self.drag.on_gesture_move(if up { -nudge } else { nudge });
        self.finish_gesture(row);
    }

    pub fn pointer_down(&mut self, column: u16, y: u16) {
        let Some(row) = self.row_at(column, y) else { return };
        self.state.select(Some(row));
        self.drag_origin_y = y;
        self.drag.on_gesture_start(row, self.visible_len());
    }

    pub fn pointer_move(&mut self, y: u16) {
        let rows = y as f64 - self.drag_origin_y as f64;
        self.drag.on_gesture_move(rows * self.row_height);
    }

    pub fn pointer_up(&mut self) {
        if let Some(row) = self.drag.row() {
            self.finish_gesture(row);
        }
    }

    fn finish_gesture(&mut self, row: usize) {
        let outcome = self.drag.on_gesture_end();
        let result = self.service.apply_drag(&self.criteria, row, outcome);
        if let Some(Some(_)) = self.report(result) {
            let target = match outcome {
                DragOutcome::MoveUp => row - 1,
                DragOutcome::MoveDown => row + 1,
                DragOutcome::NoOp => row,
            };
            self.state.select(Some(target));
        }
    }

    fn row_at(&self, column: u16, y: u16) -> Option<usize> {
        let area = self.list_area;
        let first_row_y = area.y + LIST_HEADER_ROWS;
        let inside = column > area.x
            && column + 1 < area.x + area.width
            && y >= first_row_y
            && y + 1 < area.y + area.height;
        if !inside {
            return None;
        }
        let row = self.state.offset() + (y - first_row_y) as usize;
        (row < self.visible_len()).then_some(row)
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
        self.input = self.criteria.search.clone();
        self.cursor_position = self.input.chars().count();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
        self.sync_search();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
            self.sync_search();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Search narrows the list while typing.
    fn sync_search(&mut self) {
        if let InputMode::Searching = self.input_mode {
            self.criteria.search = self.input.clone();
            self.clamp_selection();
        }
    }

    pub fn submit_command(&mut self) {
        if let InputMode::Adding = self.input_mode {
            self.submit_add();
            self.input.clear();
            self.cursor_position = 0;
        }
        self.exit_input_mode();
    }

    fn submit_add(&mut self) {
        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let parsed = parse_args(&args);

        let due = parsed.metadata.get("due").and_then(|d| parse_due_date(d).ok());
        let description = parsed.metadata.get("description").cloned();

        let result = self.service.add(&parsed.text, description, due);
        if let Some(Some(task)) = self.report(result) {
            let row = self.visible().iter().position(|t| t.id == task.id);
            match row {
                Some(row) => self.state.select(Some(row)),
                None => self.clamp_selection(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipetodo_core::config::DEFAULT_ROW_HEIGHT;
    use swipetodo_core::TaskStore;
    use tempfile::TempDir;

    /// App over a fresh task file holding `texts`, with the list drawn at
    /// rows 6..16 (first task row at y = 8).
    fn app_with(dir: &TempDir, texts: &[&str]) -> App {
        let store = FileTaskStore::new(dir.path()).unwrap();
        let mut service = TaskService::load(store).unwrap();
        for text in texts {
            service.add(text, None, None).unwrap();
        }
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let mut app = App::new(service, &config);
        app.list_area = Rect::new(0, 6, 40, 10);
        app
    }

    fn order(app: &App) -> Vec<String> {
        app.service.list().records().iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_row_at_maps_screen_rows() {
        let dir = TempDir::new().unwrap();
        let app = app_with(&dir, &["A", "B", "C"]);
        assert_eq!(app.row_at(5, 8), Some(0));
        assert_eq!(app.row_at(5, 10), Some(2));
        assert_eq!(app.row_at(5, 11), None); // below the last task
        assert_eq!(app.row_at(5, 7), None); // header
        assert_eq!(app.row_at(0, 8), None); // left border
        assert_eq!(app.row_at(39, 8), None); // right border
    }

    #[test]
    fn test_pointer_drag_two_rows_up_moves_one_slot() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["A", "B", "C"]);

        app.pointer_down(5, 10);
        assert_eq!(app.state.selected(), Some(2));
        app.pointer_move(8);
        assert_eq!(app.drag.visual_offset(), -2.0 * DEFAULT_ROW_HEIGHT);
        app.pointer_up();

        assert_eq!(order(&app), vec!["A", "C", "B"]);
        assert_eq!(app.state.selected(), Some(1));
        assert_eq!(app.drag.visual_offset(), 0.0);

        let stored: Vec<String> = app.service.store().list_all().unwrap().into_iter().map(|t| t.text).collect();
        assert_eq!(stored, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_pointer_drag_one_row_stays_put() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["A", "B", "C"]);

        app.pointer_down(5, 9);
        app.pointer_move(10);
        app.pointer_up();

        assert_eq!(order(&app), vec!["A", "B", "C"]);
        assert_eq!(app.state.selected(), Some(1));
    }

    #[test]
    fn test_pointer_outside_list_starts_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["A", "B"]);
        app.pointer_down(5, 3);
        assert!(!app.drag.is_dragging());
        app.pointer_move(12);
        app.pointer_up();
        assert_eq!(order(&app), vec!["A", "B"]);
    }

    #[test]
    fn test_keyboard_move_follows_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["A", "B", "C"]);
        app.state.select(Some(0));

        app.move_selected(false);
        assert_eq!(order(&app), vec!["B", "A", "C"]);
        assert_eq!(app.state.selected(), Some(1));

        app.move_selected(true);
        app.move_selected(true);
        assert_eq!(order(&app), vec!["A", "B", "C"]);
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_theme_toggle() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[]);
        assert!(app.dark);
        app.toggle_theme();
        assert!(!app.dark);
        app.toggle_theme();
        assert!(app.dark);
    }
}
