// app state for the tui

use crate::Chat;
use crate::tui::theme::{Theme, ThemeKind, detect_theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Themes,
    ResetConfirm,
    Resources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Ok,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub time: String,
    pub message: String,
}

pub struct App {
    pub running: bool,
    pub mode: Mode,
    pub popup: Popup,
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    // conversation state
    pub chat: Chat,
    // partial reply while a stream is being consumed
    pub streaming: Option<String>,
    pub loading: bool,

    // message input
    pub input: String,
    pub input_cursor: usize,

    // logs
    pub logs: Vec<LogEntry>,

    // scroll (distance from the bottom of the transcript)
    pub chat_scroll: usize,
    pub theme_scroll: usize,
}

impl App {
    pub fn new() -> Self {
        let theme_kind = detect_theme();

        let mut app = Self {
            running: true,
            mode: Mode::Insert,
            popup: Popup::None,
            theme_kind,
            theme: Theme::from_kind(theme_kind),
            chat: Chat::new(),
            streaming: None,
            loading: false,
            input: String::new(),
            input_cursor: 0,
            logs: Vec::new(),
            chat_scroll: 0,
            theme_scroll: theme_kind.index(),
        };

        app.log(LogLevel::Ok, "aura ready".to_string());
        app
    }

    pub fn log(&mut self, level: LogLevel, message: String) {
        self.logs.push(LogEntry {
            level,
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            message,
        });
    }

    // mode switching
    pub fn enter_insert(&mut self) {
        self.mode = Mode::Insert;
    }

    pub fn exit_insert(&mut self) {
        self.mode = Mode::Normal;
    }

    // input editing (cursor is a byte offset, kept on char boundaries)
    pub fn input_insert_char(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    pub fn input_delete_char(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input.remove(prev);
            self.input_cursor = prev;
        }
    }

    pub fn input_delete_char_forward(&mut self) {
        if self.input_cursor < self.input.len() {
            self.input.remove(self.input_cursor);
        }
    }

    pub fn input_move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input_cursor = prev;
        }
    }

    pub fn input_move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.input_cursor = next;
        }
    }

    pub fn input_move_start(&mut self) {
        self.input_cursor = 0;
    }

    pub fn input_move_end(&mut self) {
        self.input_cursor = self.input.len();
    }

    pub fn input_clear(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }

    /// take the input for submission, empty input is ignored
    pub fn submit_input(&mut self) -> Option<String> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input_clear();
        Some(text)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.input_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.input[self.input_cursor..]
            .chars()
            .next()
            .map(|c| self.input_cursor + c.len_utf8())
    }

    // transcript scrolling
    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll = 0;
    }

    // popups
    pub fn open_theme_popup(&mut self) {
        self.theme_scroll = self.theme_kind.index();
        self.popup = Popup::Themes;
    }

    pub fn open_reset_popup(&mut self) {
        self.popup = Popup::ResetConfirm;
    }

    pub fn open_resources_popup(&mut self) {
        self.popup = Popup::Resources;
    }

    pub fn close_popup(&mut self) {
        self.popup = Popup::None;
    }

    pub fn theme_scroll_up(&mut self) {
        if self.theme_scroll > 0 {
            self.theme_scroll -= 1;
        }
    }

    pub fn theme_scroll_down(&mut self) {
        if self.theme_scroll < ThemeKind::ALL.len() - 1 {
            self.theme_scroll += 1;
        }
    }

    pub fn select_theme(&mut self) {
        let kind = ThemeKind::ALL[self.theme_scroll];
        self.theme_kind = kind;
        self.theme = Theme::from_kind(kind);
        self.popup = Popup::None;
    }
}
