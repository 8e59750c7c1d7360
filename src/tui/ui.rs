use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode};
use crate::commands::HEADERS;
use crate::models::TaskStatus;
use crate::theme::{status_color, ROW_TEXT};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(4), // Help + status
        ])
        .split(f.area());

    let rows: Vec<Row> = app
        .tasks()
        .iter()
        .map(|t| {
            let style = Style::default()
                .fg(Color::from(ROW_TEXT))
                .bg(Color::from(status_color(t.status)));
            Row::new(vec![
                Cell::from(t.id.to_string()),
                Cell::from(t.name.clone()),
                Cell::from(t.status.to_string()),
                Cell::from(t.last_modified()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(26),
    ];

    let mut title = format!("Task Manager - {}", app.view.client().base_url());
    if app.in_flight > 0 {
        title.push_str(&format!(" (syncing {})", app.in_flight));
    }

    let table = Table::new(rows, widths)
        .header(
            Row::new(HEADERS.to_vec())
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => "q: Quit | j/k: Move | g: Generate Task | r: Refresh | s/Enter: Change Status",
        InputMode::Picking(_) => "j/k: Choose | Enter: Apply | Esc: Cancel",
    };
    let footer = Paragraph::new(vec![
        Line::from(Span::styled(help_text, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Yellow),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, chunks[1]);

    if let InputMode::Picking(id) = app.input_mode {
        let height = TaskStatus::ALL.len() as u16 + 2;
        let area = centered_rect(40, height, f.area());
        f.render_widget(Clear, area);

        let items: Vec<ListItem> = TaskStatus::ALL
            .iter()
            .map(|s| {
                ListItem::new(s.as_str()).style(
                    Style::default()
                        .fg(Color::from(ROW_TEXT))
                        .bg(Color::from(status_color(*s))),
                )
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Update Task {} Status", id)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut app.picker_state);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
