pub mod app;
pub mod ui;

use std::io;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use swipetodo_core::{Config, FileTaskStore, StatusFilter, TaskService};

use crate::tui::app::{App, InputMode};

pub fn run(service: TaskService<FileTaskStore>, config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(service, config);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.message = None;
                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Char('J') => app.move_selected(false),
                        KeyCode::Char('K') => app.move_selected(true),
                        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                        KeyCode::Char('c') => app.clear_completed(),
                        KeyCode::Char('a') => app.enter_add_mode(),
                        KeyCode::Char('/') => app.enter_search_mode(),
                        KeyCode::Char('f') | KeyCode::Tab => app.cycle_filter(),
                        KeyCode::Char('t') => app.toggle_theme(),
                        KeyCode::Char('1') => app.set_filter(StatusFilter::All),
                        KeyCode::Char('2') => app.set_filter(StatusFilter::Active),
                        KeyCode::Char('3') => app.set_filter(StatusFilter::Completed),
                        KeyCode::Esc => app.clear_search(),
                        _ => {}
                    },
                    InputMode::Adding | InputMode::Searching => match key.code {
                        KeyCode::Enter => app.submit_command(),
                        KeyCode::Esc => app.exit_input_mode(),
                        KeyCode::Char(c) => app.input_char(c),
                        KeyCode::Backspace => app.delete_char(),
                        KeyCode::Left => app.move_cursor_left(),
                        KeyCode::Right => app.move_cursor_right(),
                        _ => {}
                    },
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => app.pointer_down(mouse.column, mouse.row),
                MouseEventKind::Drag(MouseButton::Left) => app.pointer_move(mouse.row),
                MouseEventKind::Up(MouseButton::Left) => app.pointer_up(),
                MouseEventKind::ScrollDown => app.next(),
                MouseEventKind::ScrollUp => app.previous(),
                _ => {}
            },
            _ => {}
        }
    }
}
