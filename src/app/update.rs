//! Event loop and key dispatch.
//!
//! `handle_key` is the only place key events turn into dashboard operations,
//! so tests can drive the whole UI without a terminal.
//!
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, Focus, ModalState};
use crate::dashboard::Submitted;
use crate::ui;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    tracing::info!("dashboard started");
    while !app.should_quit {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }
    }
    tracing::info!(records = app.dashboard.store.len(), "dashboard closed");
    Ok(())
}

/// Apply one key press to the application state.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    if app.modal.is_some() {
        handle_modal_key(app, key);
        return;
    }
    match app.focus {
        Focus::Name | Focus::Email => handle_field_key(app, key),
        Focus::Submit => handle_form_action(app, key),
        Focus::Table => handle_table_key(app, key),
    }
}

fn is_text_input(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn handle_field_key(app: &mut AppState, key: KeyEvent) {
    let field = match app.focus {
        Focus::Name => &mut app.dashboard.form.name,
        _ => &mut app.dashboard.form.email,
    };
    if let KeyCode::Char(c) = key.code
        && is_text_input(&key)
    {
        field.push(c);
        return;
    }
    if key.code == KeyCode::Backspace {
        field.pop();
        return;
    }
    handle_form_action(app, key);
}

/// Keys shared by every form widget: focus movement, submit, cancel.
fn handle_form_action(app: &mut AppState, key: KeyEvent) {
    match app.keymap.resolve(&key) {
        Some(KeyAction::FocusNext) => app.focus = app.focus.next(),
        Some(KeyAction::FocusPrev) => app.focus = app.focus.prev(),
        Some(KeyAction::Activate) => submit(app),
        Some(KeyAction::CancelEdit) => cancel_edit(app),
        // Text fields consume plain characters first, so here these only
        // fire from the Submit button or through modified keys like Ctrl+c
        Some(KeyAction::Quit) => app.should_quit = true,
        Some(KeyAction::OpenHelp) => app.modal = Some(ModalState::Help { scroll: 0 }),
        _ => {}
    }
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.is_empty()
        && let Some(page) = c.to_digit(10).filter(|d| *d > 0)
    {
        go_to_page(app, page as usize);
        return;
    }
    let Some(action) = app.keymap.resolve(&key) else {
        return;
    };
    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::OpenHelp => app.modal = Some(ModalState::Help { scroll: 0 }),
        KeyAction::FocusNext => app.focus = app.focus.next(),
        KeyAction::FocusPrev => app.focus = app.focus.prev(),
        KeyAction::Activate | KeyAction::EditSelection => edit_selection(app),
        KeyAction::CancelEdit => cancel_edit(app),
        KeyAction::DeleteSelection => delete_selection(app),
        KeyAction::ToggleSort => {
            app.dashboard.toggle_sort();
            app.clamp_selection();
        }
        KeyAction::MoveUp => app.selected_row = app.selected_row.saturating_sub(1),
        KeyAction::MoveDown => {
            app.selected_row += 1;
            app.clamp_selection();
        }
        KeyAction::PrevPage => {
            let page = app.dashboard.page.saturating_sub(1);
            go_to_page(app, page);
        }
        KeyAction::NextPage => {
            let page = app.dashboard.page + 1;
            go_to_page(app, page);
        }
        KeyAction::FirstPage => go_to_page(app, 1),
        KeyAction::LastPage => {
            let page = app.dashboard.total_pages();
            go_to_page(app, page);
        }
        KeyAction::Ignore => {}
    }
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) {
    let close = match app.modal.as_mut() {
        Some(ModalState::Help { scroll }) => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *scroll = scroll.saturating_sub(1);
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *scroll = scroll.saturating_add(1);
                false
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => true,
            _ => false,
        },
        Some(ModalState::Info { .. }) => matches!(key.code, KeyCode::Esc | KeyCode::Enter),
        None => false,
    };
    if close {
        app.modal = None;
    }
}

fn submit(app: &mut AppState) {
    match app.dashboard.submit() {
        Ok(Submitted::Created(id)) => {
            app.status = Some(format!("Added user #{id}"));
            app.focus = Focus::Name;
        }
        Ok(Submitted::Updated(id)) => {
            app.status = Some(format!("Updated user #{id}"));
            app.focus = Focus::Table;
        }
        Ok(Submitted::Missing(id)) => {
            app.status = Some(format!("User #{id} no longer exists"));
            app.focus = Focus::Table;
        }
        Err(errors) => {
            app.status = Some("Fix the highlighted fields".to_string());
            app.focus = if errors.name.is_some() { Focus::Name } else { Focus::Email };
        }
    }
    app.clamp_selection();
}

fn cancel_edit(app: &mut AppState) {
    if app.dashboard.cancel_edit() {
        app.status = Some("Edit cancelled".to_string());
    }
}

fn no_selection(app: &mut AppState) {
    app.modal = Some(ModalState::Info {
        message: "No user selected. Add one with the form first.".to_string(),
    });
}

fn edit_selection(app: &mut AppState) {
    let Some(id) = app.selected_user() else {
        return no_selection(app);
    };
    if app.dashboard.start_edit(id) {
        app.status = Some(format!("Editing user #{id}"));
        app.focus = Focus::Name;
    }
}

fn delete_selection(app: &mut AppState) {
    let Some(id) = app.selected_user() else {
        return no_selection(app);
    };
    if let Some(user) = app.dashboard.delete(id) {
        app.status = Some(format!("Deleted {}", user.name));
        app.clamp_selection();
    }
}

fn go_to_page(app: &mut AppState, page: usize) {
    app.dashboard.go_to_page(page);
    app.clamp_selection();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut AppState, name: &str, email: &str) {
        app.focus = Focus::Name;
        type_str(app, name);
        press(app, KeyCode::Tab);
        type_str(app, email);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn typing_letters_bound_to_actions_goes_into_field() {
        let mut app = AppState::default();
        type_str(&mut app, "qdes");
        assert_eq!(app.dashboard.form.name, "qdes");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.dashboard.form.name, "qde");
    }

    #[test]
    fn enter_in_form_creates_user() {
        let mut app = AppState::default();
        add(&mut app, "Bob", "bob@x.com");
        assert_eq!(app.dashboard.store.len(), 1);
        assert_eq!(app.focus, Focus::Name);
        assert!(app.dashboard.form.name.is_empty());
    }

    #[test]
    fn invalid_submit_moves_focus_to_first_bad_field() {
        let mut app = AppState::default();
        add(&mut app, "Bob", "bob");
        assert_eq!(app.dashboard.store.len(), 0);
        assert_eq!(app.focus, Focus::Email);
        assert!(app.dashboard.errors.email.is_some());
    }

    #[test]
    fn esc_while_creating_keeps_typed_text() {
        let mut app = AppState::default();
        type_str(&mut app, "Half");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.dashboard.form.name, "Half");
        assert_eq!(app.status, None);
    }

    #[test]
    fn table_keys_edit_delete_and_sort() {
        let mut app = AppState::default();
        add(&mut app, "Bob", "bob@x.com");
        add(&mut app, "Amy", "amy@x.com");
        app.focus = Focus::Table;
        assert_eq!(app.dashboard.visible_users()[0].name, "Amy");

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.dashboard.visible_users()[0].name, "Bob");

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.focus, Focus::Name);
        assert_eq!(app.dashboard.form.name, "Bob");

        app.focus = Focus::Table;
        press(&mut app, KeyCode::Esc);
        assert!(!app.dashboard.is_editing());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.dashboard.store.len(), 1);
        assert_eq!(app.status.as_deref(), Some("Deleted Bob"));
    }

    #[test]
    fn digit_jumps_to_page_and_q_quits_from_table() {
        let mut app = AppState::default();
        for i in 0..12 {
            add(&mut app, &format!("user{i:02}"), &format!("u{i}@x.com"));
        }
        app.focus = Focus::Table;
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.dashboard.page, 3);
        assert_eq!(app.dashboard.visible_users().len(), 2);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.dashboard.page, 2);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn row_action_on_empty_table_explains_itself() {
        let mut app = AppState::default();
        app.focus = Focus::Table;
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.modal, Some(ModalState::Info { .. })));
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());
    }

    #[test]
    fn help_modal_swallows_keys_until_closed() {
        let mut app = AppState::default();
        app.focus = Focus::Table;
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.modal, Some(ModalState::Help { .. })));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
    }
}
