//! Shared UI components (status bar, pagination, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, Focus, ModalState};

/// Render the bottom status bar with mode, counts and the last action.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let d = &app.dashboard;
    let mode = if d.is_editing() { "EDIT" } else { "CREATE" };
    let focus = match app.focus {
        Focus::Name => "name",
        Focus::Email => "email",
        Focus::Submit => "submit",
        Focus::Table => "table",
    };
    let mut msg = format!(
        "mode: {mode}  focus: {focus}  users:{}  page:{}/{}",
        d.store.len(),
        d.page,
        d.total_pages().max(1)
    );
    if let Some(status) = &app.status {
        msg.push_str("  | ");
        msg.push_str(status);
    }
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// One entry per page; the active page is highlighted.
pub fn render_pagination(f: &mut Frame, area: Rect, app: &AppState) {
    let d = &app.dashboard;
    let mut spans: Vec<Span> = Vec::new();
    for page in 1..=d.total_pages() {
        let label = format!(" {page} ");
        if page == d.page {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .bg(app.theme.highlight_bg)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(app.theme.text)));
        }
        spans.push(Span::raw(" "));
    }
    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Pages")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let min_w = 40u16.min(max_w);
        let approx_lines = (message.len() as u16 / (min_w.saturating_sub(4).max(10))).max(1);
        let max_h = area.height.saturating_sub(6).max(5);
        let height = (approx_lines + 4).min(max_h).max(5);
        let rect = centered_rect(min_w, height, area);
        let p = Paragraph::new(message.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Info")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

fn action_label(action: KeyAction) -> Option<(&'static str, &'static str)> {
    let entry = match action {
        KeyAction::Quit => ("General", "Quit"),
        KeyAction::OpenHelp => ("General", "Help"),
        KeyAction::FocusNext => ("General", "Next field"),
        KeyAction::FocusPrev => ("General", "Previous field"),
        KeyAction::Activate => ("Form", "Submit / edit row"),
        KeyAction::CancelEdit => ("Form", "Cancel edit"),
        KeyAction::EditSelection => ("Table", "Edit row"),
        KeyAction::DeleteSelection => ("Table", "Delete row"),
        KeyAction::ToggleSort => ("Table", "Toggle name sort"),
        KeyAction::MoveUp => ("Table", "Move up"),
        KeyAction::MoveDown => ("Table", "Move down"),
        KeyAction::PrevPage => ("Table", "Previous page"),
        KeyAction::NextPage => ("Table", "Next page"),
        KeyAction::FirstPage => ("Table", "First page"),
        KeyAction::LastPage => ("Table", "Last page"),
        KeyAction::Ignore => return None,
    };
    Some(entry)
}

/// Render the help modal built from the active keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = 26u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let mut sections: BTreeMap<&'static str, BTreeMap<&'static str, BTreeSet<String>>> =
        BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        if let Some((section, label)) = action_label(action) {
            sections
                .entry(section)
                .or_default()
                .entry(label)
                .or_default()
                .insert(Keymap::format_key(mods, code));
        }
    }
    sections
        .entry("Table")
        .or_default()
        .entry("Jump to page")
        .or_default()
        .insert("1-9".to_string());

    let col1_w = sections
        .values()
        .flat_map(|s| s.keys())
        .map(|k| k.len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for (section, entries) in &sections {
        lines.push(Line::from(Span::styled(
            format!("{section}:"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (label, keys) in entries {
            let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
            lines.push(Line::from(vec![
                Span::raw(format!("  {:>width$} │ ", label, width = col1_w)),
                Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
            ]));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(vec![
        Span::raw("Typing in Name/Email inserts text; use Tab to reach the table. Close: "),
        Span::styled("Esc / Enter", Style::default().add_modifier(Modifier::ITALIC)),
    ]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
