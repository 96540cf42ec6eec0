mod popup;
mod results;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Mode, Status};
use crate::layout::{self, Panel};

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Draw the whole screen. Geometry comes from the frame on every call.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let root = layout::root_panel(area);

    match &app.browser {
        Some(browser) if app.mode == Mode::ResultsBrowser => {
            results::render(frame, browser, root);
        }
        _ => render_idle(frame, app, root),
    }

    render_status_bar(frame, app, layout::status_line(area));

    for panel in app.layout.panels() {
        match panel {
            Panel::Help => popup::render_help(frame, area),
            Panel::KindPicker => popup::render_picker(frame, area),
            Panel::QueryEditor => popup::render_editor(frame, app, area),
            Panel::Detail => popup::render_detail(frame, app, area),
        }
    }
}

fn render_idle(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::raw("  "), key("s"), Span::raw("  search")]),
        Line::from(vec![Span::raw("  "), key("?"), Span::raw("  help")]),
        Line::from(vec![Span::raw("  "), key("q"), Span::raw("  quit")]),
    ];

    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" ghs - {} search ", app.client_name()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(request) = app.searching() {
        let spin = SPINNER[app.spinner % SPINNER.len()];
        Line::from(vec![Span::styled(
            format!(
                "{} Searching {} for \"{}\" (page {})... esc: cancel",
                spin,
                request.kind(),
                request.query(),
                request.page()
            ),
            Style::default().fg(Color::Yellow),
        )])
    } else {
        match &app.status {
            Some(Status::Error(msg)) => Line::from(vec![Span::styled(
                format!("Error: {}", msg),
                Style::default().fg(Color::Red),
            )]),
            Some(Status::Info(msg)) => Line::from(vec![Span::styled(
                msg.clone(),
                Style::default().fg(Color::Green),
            )]),
            None => {
                let help = match app.mode {
                    Mode::Idle => "s: search | ?: help | q: quit",
                    Mode::Help => "any key: close",
                    Mode::KindPicker => "C/c/i/r/u: pick kind | other: cancel",
                    Mode::QueryEditor => "Enter: search | Backspace: delete | Esc: cancel",
                    Mode::ResultsBrowser => {
                        "j/k/g/G: nav | n/p: page | Enter: detail | o/O: open | y: yank | q: back"
                    }
                };
                Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
            }
        }
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}
