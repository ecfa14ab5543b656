//! Keyboard handling.
//!
//! Keys are routed in a fixed priority order: the help overlay first, then
//! input editing, then the detail view, then the main view. Each handler only
//! calls `App` transitions; nothing here touches the terminal or git.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Pane, View};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyEventResult {
    /// Continue the event loop normally
    Continue,
    /// Should quit the application
    Quit,
}

/// Handle a key press event.
///
/// Returns `KeyEventResult::Quit` if the application should exit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyEventResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyEventResult::Quit;
    }

    if app.ui.show_help {
        handle_help_key(app, key);
    } else if app.ui.input_mode() {
        handle_input_key(app, key);
    } else if app.ui.view == View::Detail {
        handle_detail_key(app, key);
    } else {
        return handle_main_key(app, key);
    }
    KeyEventResult::Continue
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_help(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_help(-1),
        _ => {}
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.commit_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                && !ch.is_control() =>
        {
            app.input_push(ch);
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.exit_detail(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_detail_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_detail_up(),
        KeyCode::Char('y') => app.yank_commit_hash(),
        _ => {}
    }
}

fn handle_main_key(app: &mut App, key: KeyEvent) -> KeyEventResult {
    let sidebar_focused = app.ui.sidebar_visible && app.ui.focused_pane == Pane::Sidebar;
    match key.code {
        KeyCode::Char('q') => return KeyEventResult::Quit,
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('y') => app.yank_command(),
        KeyCode::Tab => app.toggle_sidebar(),
        KeyCode::Char('h') | KeyCode::Left => app.focus_sidebar(),
        KeyCode::Char('l') | KeyCode::Right => app.focus_results(),
        KeyCode::Char('[') => app.jump_section(false),
        KeyCode::Char(']') => app.jump_section(true),
        KeyCode::Char('j') | KeyCode::Down => move_selection(app, sidebar_focused, 1),
        KeyCode::Char('k') | KeyCode::Up => move_selection(app, sidebar_focused, -1),
        KeyCode::Char(' ') if sidebar_focused => app.activate_selected_flag(),
        KeyCode::Enter if sidebar_focused => app.activate_selected_flag(),
        KeyCode::Enter => app.open_selected_commit(),
        KeyCode::Char('d') | KeyCode::Delete if sidebar_focused => app.clear_selected_flag(),
        _ => {}
    }
    KeyEventResult::Continue
}

fn move_selection(app: &mut App, sidebar_focused: bool, delta: isize) {
    if sidebar_focused {
        app.move_flag_selection(delta);
    } else {
        app.move_result_selection(delta);
    }
}
