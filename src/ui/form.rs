use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{AppState, Focus};
use crate::error::ValidationError;

/// Render the create/edit form: two inputs, their inline errors and the submit button.
pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let d = &app.dashboard;
    let title = match d.editing {
        Some(id) => format!("Edit user #{id}"),
        None => "New user".to_string(),
    };

    let mut lines: Vec<Line> = Vec::new();
    push_field(&mut lines, app, "Name", &d.form.name, Focus::Name, d.errors.name.as_ref());
    push_field(&mut lines, app, "Email", &d.form.email, Focus::Email, d.errors.email.as_ref());

    let button = format!("[ {} ]", d.submit_label());
    let button_style = if app.focus == Focus::Submit {
        Style::default()
            .fg(app.theme.highlight_fg)
            .bg(app.theme.highlight_bg)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(button, button_style)));
    if d.is_editing() {
        lines.push(Line::from(Span::styled(
            "Esc: cancel edit",
            Style::default().fg(app.theme.muted),
        )));
    }

    let border = if app.focus.is_form() { app.theme.highlight_fg } else { app.theme.border };
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}

fn push_field<'a>(
    lines: &mut Vec<Line<'a>>,
    app: &AppState,
    label: &'a str,
    value: &str,
    field: Focus,
    error: Option<&ValidationError>,
) {
    let focused = app.focus == field;
    lines.push(Line::from(Span::styled(
        label,
        Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
    )));
    let cursor = if focused { "▏" } else { "" };
    let marker = if focused { "▶ " } else { "  " };
    let input_style = if focused {
        Style::default().fg(app.theme.highlight_fg)
    } else {
        Style::default().fg(app.theme.text)
    };
    lines.push(Line::from(Span::styled(format!("{marker}{value}{cursor}"), input_style)));
    match error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!("  {err}"),
            Style::default().fg(app.theme.error),
        ))),
        None => lines.push(Line::raw("")),
    }
}
