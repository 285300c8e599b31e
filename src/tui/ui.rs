// ui rendering

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::core::Role;
use crate::tui::app::{App, LogLevel, Mode, Popup};
use crate::tui::ascii::AURA_LOGO;
use crate::tui::theme::ThemeKind;

pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;

    // clear with bg color
    frame.render_widget(Clear, frame.area());
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    // main layout: header + transcript/logs + input + footer
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // header with logo
            Constraint::Min(8),    // transcript + logs
            Constraint::Length(3), // input
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(main[1]);

    render_header(frame, app, main[0]);
    render_transcript(frame, app, content[0]);
    render_logs(frame, app, content[1]);
    render_input(frame, app, main[2]);
    render_footer(frame, app, main[3]);

    // popups on top
    match app.popup {
        Popup::Themes => render_theme_popup(frame, app),
        Popup::ResetConfirm => render_reset_popup(frame, app),
        Popup::Resources => render_resources_popup(frame, app),
        Popup::None => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .style(theme.base());
    frame.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .margin(1)
        .split(area);

    let logo_lines: Vec<Line> = AURA_LOGO
        .iter()
        .map(|&line| Line::styled(line, theme.accent()))
        .collect();
    frame.render_widget(Paragraph::new(logo_lines).style(theme.base()), inner[0]);

    let mode_str = match app.mode {
        Mode::Normal => "normal",
        Mode::Insert => "insert",
    };
    let status = if app.loading {
        "Aura está pensando... 💬"
    } else {
        "pronta para conversar"
    };

    let info_lines = vec![
        Line::from(vec![
            Span::styled("| ", theme.muted()),
            Span::styled("aura", theme.accent()),
            Span::styled(" - seu companheiro virtual", theme.muted()),
        ]),
        Line::from(vec![
            Span::styled("| Modelo: ", theme.muted()),
            Span::styled("gemini-1.5-flash", theme.base()),
            Span::styled("  | Modo: ", theme.muted()),
            Span::styled(mode_str, theme.accent()),
        ]),
        Line::from(vec![
            Span::styled("| ", theme.muted()),
            Span::styled(status, theme.base()),
        ]),
        Line::from(vec![
            Span::styled("| ", theme.muted()),
            Span::styled("sou uma IA, não substituo um terapeuta", theme.muted()),
        ]),
    ];
    frame.render_widget(Paragraph::new(info_lines).style(theme.base()), inner[1]);
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" conversa ", theme.title()));
    frame.render_widget(block, area);

    let width = area.width.saturating_sub(2).max(1) as usize;
    let height = area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for turn in &app.chat.transcript {
        let (label, style) = match turn.role {
            Role::User => ("você", theme.user()),
            Role::Assistant => ("aura", theme.aura()),
        };
        lines.push(Line::from(Span::styled(label, style)));
        for content_line in turn.content.lines() {
            lines.push(Line::styled(content_line.to_string(), theme.base()));
        }
        lines.push(Line::default());
    }

    // in-flight partial reply
    if let Some(partial) = &app.streaming {
        lines.push(Line::from(Span::styled("aura", theme.aura())));
        let mut partial_lines: Vec<String> = partial.lines().map(str::to_string).collect();
        if partial_lines.is_empty() {
            partial_lines.push(String::new());
        }
        let last = partial_lines.len() - 1;
        for (i, content_line) in partial_lines.into_iter().enumerate() {
            if i == last {
                lines.push(Line::styled(format!("{content_line}▌"), theme.base()));
            } else {
                lines.push(Line::styled(content_line, theme.base()));
            }
        }
    }

    // keep the view pinned to the bottom unless the user scrolled up
    let total = wrapped_height(&lines, width);
    let offset = total
        .saturating_sub(height + app.chat_scroll)
        .min(u16::MAX as usize) as u16;

    let paragraph = Paragraph::new(lines)
        .style(theme.base())
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(
        paragraph,
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        },
    );
}

// rough wrapped row count, good enough to pin the scroll to the bottom
fn wrapped_height(lines: &[Line], width: usize) -> usize {
    lines
        .iter()
        .map(|line| {
            let len: usize = line
                .spans
                .iter()
                .map(|span| span.content.chars().count())
                .sum();
            len.div_ceil(width).max(1)
        })
        .sum()
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" atividade ", theme.title()));
    frame.render_widget(block, area);

    let height = area.height.saturating_sub(2) as usize;
    let start = app.logs.len().saturating_sub(height);

    let lines: Vec<Line> = app.logs[start..]
        .iter()
        .map(|entry| {
            let style = match entry.level {
                LogLevel::Ok => theme.success(),
                LogLevel::Info => theme.muted(),
                LogLevel::Warn => theme.warning(),
                LogLevel::Error => theme.error(),
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), theme.muted()),
                Span::styled(entry.message.clone(), style),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(theme.base()),
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        },
    );
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let border_style = if app.mode == Mode::Insert {
        theme.accent()
    } else {
        theme.border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" mensagem ", theme.title()));

    let paragraph = Paragraph::new(app.input.as_str())
        .style(theme.base())
        .block(block);
    frame.render_widget(paragraph, area);

    if app.mode == Mode::Insert {
        let cursor_col = app.input[..app.input_cursor].chars().count() as u16;
        frame.set_cursor_position((
            area.x + 1 + cursor_col.min(area.width.saturating_sub(2)),
            area.y + 1,
        ));
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mut parts = vec![
        Span::styled(" Enter ", theme.base().bg(theme.accent).fg(theme.bg)),
        Span::styled(" enviar  ", theme.muted()),
        Span::styled("[i]", theme.accent()),
        Span::styled(" escrever  ", theme.muted()),
        Span::styled("[c]", theme.accent()),
        Span::styled(" limpar  ", theme.muted()),
        Span::styled("[r]", theme.accent()),
        Span::styled(" recursos  ", theme.muted()),
        Span::styled("[t]", theme.accent()),
        Span::styled(" temas  ", theme.muted()),
        Span::styled("[q]", theme.accent()),
        Span::styled(" sair", theme.muted()),
    ];

    if app.chat.can_rate() {
        parts.push(Span::styled("  |  essa resposta foi útil? ", theme.muted()));
        parts.push(Span::styled("[+]", theme.success()));
        parts.push(Span::styled(" sim ", theme.muted()));
        parts.push(Span::styled("[-]", theme.error()));
        parts.push(Span::styled(" não", theme.muted()));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)).style(theme.base()), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_theme_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(30, ThemeKind::ALL.len() as u16 + 2, frame.area());

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .title(Span::styled(" temas ", theme.title()))
        .style(theme.base());
    frame.render_widget(block, area);

    let lines: Vec<Line> = ThemeKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            if i == app.theme_scroll {
                Line::styled(format!("> {}", kind.name()), theme.selected())
            } else {
                Line::styled(format!("  {}", kind.name()), theme.base())
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(theme.base()),
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        },
    );
}

fn render_reset_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(44, 5, frame.area());

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.warning())
        .title(Span::styled(" limpar conversa ", theme.title()))
        .style(theme.base());
    frame.render_widget(block, area);

    let lines = vec![
        Line::styled("Apagar a conversa atual e recomeçar?", theme.base()),
        Line::default(),
        Line::from(vec![
            Span::styled("[y]", theme.success()),
            Span::styled(" sim   ", theme.muted()),
            Span::styled("[n]", theme.error()),
            Span::styled(" não", theme.muted()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(theme.base())
            .alignment(Alignment::Center),
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        },
    );
}

fn render_resources_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 14, frame.area());

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .title(Span::styled(" recursos úteis ", theme.title()))
        .style(theme.base());
    frame.render_widget(block, area);

    let lines = vec![
        Line::styled("Em momentos de crise:", theme.title()),
        Line::styled(
            "- CVV (Centro de Valorização da Vida): disque 188",
            theme.base(),
        ),
        Line::styled("  ligação gratuita, 24 horas por dia", theme.muted()),
        Line::styled("- SUS: procure um CAPS perto de você", theme.base()),
        Line::default(),
        Line::styled("Dicas rápidas de bem-estar:", theme.title()),
        Line::styled(
            "- pausa e respire: inspire 4s, segure 4s, expire 6s",
            theme.base(),
        ),
        Line::styled("- movimente-se: uma caminhada leve já ajuda", theme.base()),
        Line::styled("- converse com alguém de confiança", theme.base()),
        Line::default(),
        Line::styled("pressione Esc para fechar", theme.muted()),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(theme.base())
            .wrap(Wrap { trim: false }),
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        },
    );
}
