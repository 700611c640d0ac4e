use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::Storage;

use super::app::{App, FormField, Mode};

/// Handle a key event in the current mode
pub fn handle_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.notice = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Filter => handle_filter(app, key),
    }
}

fn handle_navigate<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('a') => app.mode = Mode::Add,
        KeyCode::Char('/') => app.mode = Mode::Search,
        KeyCode::Char('c') => app.mode = Mode::Filter,
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            let rows = app.visible_rows().len();
            app.cursor = rows.saturating_sub(1);
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_under_cursor(),
        KeyCode::Esc => {
            // Esc drops any active filters
            app.search.clear();
            app.category_filter.clear();
            app.clamp_cursor();
        }
        _ => {}
    }
}

fn handle_add<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Tab => app.form.focus = app.form.focus.next(),
        KeyCode::BackTab => app.form.focus = app.form.focus.prev(),
        KeyCode::Enter => app.submit_form(),
        _ if app.form.focus == FormField::Priority => match key.code {
            KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l') => {
                app.form.cycle_priority_up()
            }
            KeyCode::Left | KeyCode::Char('h') => app.form.cycle_priority_down(),
            _ => {}
        },
        _ => {
            if let Some(field) = app.form.focused_field_mut() {
                match key.code {
                    KeyCode::Char(c) => field.insert(c),
                    KeyCode::Backspace => field.backspace(),
                    KeyCode::Delete => field.delete(),
                    KeyCode::Left => field.left(),
                    KeyCode::Right => field.right(),
                    KeyCode::Home => field.home(),
                    KeyCode::End => field.end(),
                    _ => {}
                }
            }
        }
    }
}

fn handle_search<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Char(c) => app.search.insert(c),
        KeyCode::Backspace => app.search.backspace(),
        KeyCode::Delete => app.search.delete(),
        KeyCode::Left => app.search.left(),
        KeyCode::Right => app.search.right(),
        KeyCode::Home => app.search.home(),
        KeyCode::End => app.search.end(),
        _ => {}
    }
    app.clamp_cursor();
}

fn handle_filter<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.category_filter.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Char(c) => app.category_filter.insert(c),
        KeyCode::Backspace => app.category_filter.backspace(),
        KeyCode::Delete => app.category_filter.delete(),
        KeyCode::Left => app.category_filter.left(),
        KeyCode::Right => app.category_filter.right(),
        KeyCode::Home => app.category_filter.home(),
        KeyCode::End => app.category_filter.end(),
        _ => {}
    }
    app.clamp_cursor();
}
