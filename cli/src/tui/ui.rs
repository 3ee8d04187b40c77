use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Paragraph, Row, Table, Wrap},
    Frame,
};
use swipetodo_core::StatusFilter;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

struct Theme {
    primary: Color,
    text: Color,
    muted: Color,
    accent: Color,
    error: Color,
}

const LIGHT: Theme = Theme {
    primary: Color::Blue,
    text: Color::Black,
    muted: Color::Gray,
    accent: Color::Magenta,
    error: Color::Red,
};

const DARK: Theme = Theme {
    primary: Color::Cyan,
    text: Color::White,
    muted: Color::DarkGray,
    accent: Color::Yellow,
    error: Color::LightRed,
};

fn theme(app: &App) -> &'static Theme {
    if app.dark { &DARK } else { &LIGHT }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let theme = theme(app);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Input / search
            Constraint::Min(3),    // List
            Constraint::Length(1), // Counter + filters
            Constraint::Length(1), // Help
        ])
        .split(size);

    let icon = if app.dark { "☀" } else { "☾" };
    let header = Paragraph::new(format!("T O D O   {}", icon))
        .style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    draw_input(f, app, main_chunks[1]);
    draw_task_list(f, app, main_chunks[2]);
    draw_status_line(f, app, main_chunks[3]);

    let help = match &app.message {
        Some(msg) => Paragraph::new(msg.as_str()).style(Style::default().fg(theme.error)),
        None => Paragraph::new(
            "a: Add | /: Search | space: Toggle | d: Delete | c: Clear completed | J/K or drag: Move | f: Filter | t: Theme | q: Quit",
        )
        .style(Style::default().fg(theme.muted)),
    };
    f.render_widget(help.alignment(Alignment::Center), main_chunks[4]);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = theme(app);
    let (title, text, style) = match app.input_mode {
        InputMode::Adding => (" New todo ", app.input.as_str(), Style::default().fg(theme.accent)),
        InputMode::Searching => (" Search ", app.input.as_str(), Style::default().fg(theme.accent)),
        InputMode::Normal if app.criteria.has_search() => {
            (" Search (Esc clears) ", app.criteria.search.as_str(), Style::default().fg(theme.text))
        }
        InputMode::Normal => (" Create a new todo... (a) ", "", Style::default().fg(theme.muted)),
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    if !matches!(app.input_mode, InputMode::Normal) {
        let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + before_cursor.width() as u16;
        f.set_cursor_position(Position::new(x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
    }
}

fn draw_task_list(f: &mut Frame, app: &mut App, area: Rect) {
    app.list_area = area;
    let theme = theme(app);
    let block = Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let dragged_row = app.drag.row();
    let offset = app.drag.visual_offset();
    let rows: Vec<Row> = app
        .visible()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let status_icon = if task.completed { "✔" } else { "○" };
            let mut text_style = if task.completed {
                Style::default().fg(theme.muted).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(theme.text)
            };
            let mut marker = String::new();
            if dragged_row == Some(i) {
                text_style = text_style.fg(theme.accent).add_modifier(Modifier::BOLD);
                marker = match offset {
                    o if o < 0.0 => format!(" ↑ {:.0}", -o),
                    o if o > 0.0 => format!(" ↓ {:.0}", o),
                    _ => " ↕".to_string(),
                };
            }
            let due_str = task.due_date.map(|d| d.format("%m-%d").to_string()).unwrap_or_default();

            Row::new(vec![
                Span::styled(status_icon, Style::default().fg(theme.primary)),
                Span::styled(format!("{}{}", task.text, marker), text_style),
                Span::raw(due_str),
            ])
        })
        .collect();

    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(app.criteria.empty_message(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(app.criteria.empty_hint(), Style::default().fg(theme.muted))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(3), // Status
            Constraint::Min(10),   // Text
            Constraint::Length(6), // Due
        ],
    )
    .header(Row::new(vec!["", "Task", "Due"]).style(Style::default().fg(theme.accent)))
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_status_line(f: &mut Frame, app: &App, area: Rect) {
    let theme = theme(app);
    let mut spans = vec![
        Span::styled(format!(" {} items left ", app.items_left()), Style::default().fg(theme.muted)),
        Span::raw("  "),
    ];
    for (i, status) in StatusFilter::ALL.iter().enumerate() {
        let style = if *status == app.criteria.status {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!("{}:{}", i + 1, status), style));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
