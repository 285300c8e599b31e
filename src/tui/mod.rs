// terminal ui

mod app;
mod ascii;
mod event;
mod theme;
mod ui;

pub use app::App;
pub use theme::ThemeKind;

use crossterm::{
    cursor::SetCursorStyle,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::time::Duration;

use crate::core::Accumulator;
use crate::{Error, Gemini};
use app::{LogLevel, Mode};
use event::{Action, handle_event, poll_event};

pub async fn run(gemini: Gemini) -> Result<(), Error> {
    // setup terminal
    enable_raw_mode().map_err(|e| Error::Server(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| Error::Server(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| Error::Server(e.to_string()))?;

    // run app
    let result = run_app(&mut terminal, gemini).await;

    // restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    gemini: Gemini,
) -> Result<(), Error> {
    let mut app = App::new();
    let mut last_mode = app.mode;

    loop {
        // update cursor style before render
        if app.mode != last_mode {
            let cursor_style = match app.mode {
                Mode::Insert => SetCursorStyle::BlinkingBar,
                Mode::Normal => SetCursorStyle::BlinkingBlock,
            };
            execute!(terminal.backend_mut(), cursor_style).ok();
            last_mode = app.mode;
        }

        terminal
            .draw(|frame| ui::render(frame, &mut app))
            .map_err(|e| Error::Server(e.to_string()))?;

        if let Some(event) =
            poll_event(Duration::from_millis(100)).map_err(|e| Error::Server(e.to_string()))?
        {
            match handle_event(&mut app, event) {
                Action::Quit => break,
                Action::Submit(text) => {
                    send_message(terminal, &mut app, &gemini, &text).await?;
                    app.scroll_to_bottom();
                }
                Action::ResetChat => {
                    app.chat.reset();
                    app.scroll_to_bottom();
                    app.log(LogLevel::Info, "conversation reset".to_string());
                }
                Action::RatePositive => {
                    if app.chat.mark_positive() {
                        app.log(LogLevel::Ok, "feedback recorded: helpful".to_string());
                    }
                }
                Action::RateNegative => {
                    if app.chat.mark_negative() {
                        app.log(LogLevel::Ok, "feedback recorded: not helpful".to_string());
                    }
                }
                Action::None => {}
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// one full user turn: risk check, then a streamed model exchange with the
/// transcript view refreshed after every fragment
async fn send_message(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    gemini: &Gemini,
    text: &str,
) -> Result<(), Error> {
    // risk phrases never reach the model
    if app.chat.try_safety_reply(text) {
        app.log(
            LogLevel::Warn,
            "risk phrase detected, safety resources shown".to_string(),
        );
        return Ok(());
    }

    app.chat.push_user(text);
    app.loading = true;
    app.streaming = Some(String::new());
    app.scroll_to_bottom();
    terminal
        .draw(|frame| ui::render(frame, app))
        .map_err(|e| Error::Server(e.to_string()))?;

    let history = app.chat.ensure_session().contents().to_vec();

    match gemini.send_message(&history, text).await {
        Ok(mut stream) => {
            let mut acc = Accumulator::new();
            let mut failed = false;

            loop {
                match stream.next().await {
                    Ok(Some(fragment)) => {
                        if !acc.push(fragment) {
                            break;
                        }
                        app.streaming = Some(acc.text().to_string());
                        terminal
                            .draw(|frame| ui::render(frame, app))
                            .map_err(|e| Error::Server(e.to_string()))?;
                    }
                    Ok(None) => break,
                    Err(e) => {
                        app.log(LogLevel::Error, format!("stream error: {e}"));
                        app.chat.fail_turn(&e);
                        failed = true;
                        break;
                    }
                }
            }

            if !failed {
                if acc.is_blocked() {
                    app.log(LogLevel::Warn, "reply blocked by safety policy".to_string());
                }
                app.chat.commit_reply(text, acc.finish());
            }
        }
        Err(e) => {
            app.log(LogLevel::Error, format!("model request failed: {e}"));
            app.chat.fail_turn(&e);
        }
    }

    app.loading = false;
    app.streaming = None;
    Ok(())
}
