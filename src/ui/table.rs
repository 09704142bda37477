use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::{AppState, Focus};

/// Render the current page of users in name order.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &AppState) {
    let d = &app.dashboard;
    let visible = d.visible_users();
    let table_focused = app.focus == Focus::Table;

    let rows = visible.iter().enumerate().map(|(i, u)| {
        let style = if table_focused && i == app.selected_row {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else if d.editing == Some(u.id) {
            Style::default().fg(app.theme.title)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from("[Edit] [Delete]"),
        ])
        .style(style)
    });

    let widths = [Constraint::Percentage(35), Constraint::Percentage(40), Constraint::Min(15)];
    let header = Row::new(vec![
        format!("Name {}", d.sort.indicator()),
        "Email".to_string(),
        "Actions".to_string(),
    ])
    .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if d.store.is_empty() {
        "Users (none yet)".to_string()
    } else {
        format!("Users ({})", d.store.len())
    };
    let border = if table_focused { app.theme.highlight_fg } else { app.theme.border };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(border)))
        .column_spacing(1);

    f.render_widget(table, area);
}
