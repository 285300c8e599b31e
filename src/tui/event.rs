// event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::tui::app::{App, Mode, Popup};

pub enum Action {
    None,
    Quit,
    Submit(String),
    ResetChat,
    RatePositive,
    RateNegative,
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(app: &mut App, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => Action::None,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    // global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // popups take priority
    match app.popup {
        Popup::Themes => return handle_theme_popup(app, key),
        Popup::ResetConfirm => return handle_reset_popup(app, key),
        Popup::Resources => return handle_resources_popup(app, key),
        Popup::None => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Insert => handle_insert_key(app, key),
    }
}

fn handle_theme_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_popup();
            Action::None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.theme_scroll_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.theme_scroll_up();
            Action::None
        }
        KeyCode::Enter => {
            app.select_theme();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_reset_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.close_popup();
            Action::ResetChat
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.close_popup();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_resources_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
            app.close_popup();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        // quit
        KeyCode::Char('q') => Action::Quit,

        // enter insert mode
        KeyCode::Char('i') | KeyCode::Char('a') => {
            app.enter_insert();
            Action::None
        }

        // transcript scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up();
            Action::None
        }
        KeyCode::Char('G') => {
            app.scroll_to_bottom();
            Action::None
        }

        // rate the latest reply
        KeyCode::Char('+') => Action::RatePositive,
        KeyCode::Char('-') => Action::RateNegative,

        // popups
        KeyCode::Char('t') => {
            app.open_theme_popup();
            Action::None
        }
        KeyCode::Char('c') => {
            app.open_reset_popup();
            Action::None
        }
        KeyCode::Char('r') => {
            app.open_resources_popup();
            Action::None
        }

        _ => Action::None,
    }
}

fn handle_insert_key(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => {
                app.input_move_start();
                Action::None
            }
            KeyCode::Char('e') => {
                app.input_move_end();
                Action::None
            }
            KeyCode::Char('u') => {
                app.input_clear();
                Action::None
            }
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => {
            app.exit_insert();
            Action::None
        }
        KeyCode::Enter => match app.submit_input() {
            Some(text) => Action::Submit(text),
            None => Action::None,
        },
        KeyCode::Char(c) => {
            app.input_insert_char(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.input_delete_char();
            Action::None
        }
        KeyCode::Delete => {
            app.input_delete_char_forward();
            Action::None
        }
        KeyCode::Left => {
            app.input_move_left();
            Action::None
        }
        KeyCode::Right => {
            app.input_move_right();
            Action::None
        }
        KeyCode::Home => {
            app.input_move_start();
            Action::None
        }
        KeyCode::End => {
            app.input_move_end();
            Action::None
        }
        _ => Action::None,
    }
}
