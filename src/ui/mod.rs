pub mod components;
pub mod form;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    app.clamp_selection();

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(9), Constraint::Length(1)])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(root[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(body[1]);

    let p = Paragraph::new(
        "User Management Dashboard  Tab: focus; Enter: submit/edit; e: edit; d: delete; s: sort; ←/→: page; ?: help; q: quit",
    )
    .block(
        Block::default()
            .title("user-dashboard")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    form::render_form(f, body[0], app);
    table::render_users_table(f, right[0], app);
    components::render_pagination(f, right[1], app);
    components::render_status_bar(f, root[2], app);

    let area = f.area();
    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::Help { scroll } => components::render_help_modal(f, area, app, scroll),
            ModalState::Info { .. } => components::render_info_modal(f, area, app, &state),
        }
    }
}
