use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::layout::{panel_rect, Panel};
use crate::types::SearchKind;

fn popup_block(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" {} ", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<8}", key), Style::default().fg(Color::Yellow)),
        Span::raw(text.to_string()),
    ])
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let area = panel_rect(Panel::Help, area);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        key_line("s", "search"),
        key_line("?", "help"),
        key_line("q", "quit / back"),
        key_line("j / k", "move down / up"),
        key_line("g / G", "first / last"),
        key_line("n / p", "next / previous page"),
        key_line("Enter", "details"),
        key_line("o", "open in browser"),
        key_line("O", "open search on web"),
        key_line("y", "copy URL"),
        key_line("Esc", "cancel"),
    ];

    frame.render_widget(Paragraph::new(lines).block(popup_block("Help".into())), area);
}

pub fn render_picker(frame: &mut Frame, area: Rect) {
    let area = panel_rect(Panel::KindPicker, area);
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    lines.extend(SearchKind::ALL.iter().map(|kind| {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{}:", kind.key()), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}", kind)),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from("  > "));
    let prompt_row = lines.len() as u16;

    frame.render_widget(
        Paragraph::new(lines).block(popup_block("Search".into())),
        area,
    );

    if prompt_row < area.height.saturating_sub(1) {
        frame.set_cursor_position((area.x + 5, area.y + prompt_row));
    }
}

pub fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    let area = panel_rect(Panel::QueryEditor, area);
    frame.render_widget(Clear, area);

    let title = match app.kind {
        Some(kind) => format!("search {}", kind),
        None => "search".to_string(),
    };

    if let Some(request) = app.searching() {
        let line = Line::from(Span::styled(
            format!("Searching \"{}\"...", request.query()),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(line).block(popup_block(title)), area);
        return;
    }

    // Keep the end of a long query in view
    let inner_width = area.width.saturating_sub(3) as usize;
    let len = app.query.len();
    let shown: String = app
        .query
        .text()
        .chars()
        .skip(len.saturating_sub(inner_width))
        .collect();
    let caret_x = area.x + 1 + shown.chars().count() as u16;

    frame.render_widget(
        Paragraph::new(Line::from(shown)).block(popup_block(title)),
        area,
    );

    if area.height >= 3 && area.width >= 3 {
        frame.set_cursor_position((caret_x, area.y + 1));
    }
}

pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.selected_item() else {
        return;
    };
    let area = panel_rect(Panel::Detail, area);
    frame.render_widget(Clear, area);

    let text = app.detail_text().unwrap_or_default();
    let mut title = item.display_name.clone();
    let max_title = area.width.saturating_sub(6) as usize;
    if title.chars().count() > max_title {
        title = title.chars().take(max_title.saturating_sub(3)).collect();
        title.push_str("...");
    }

    let detail = Paragraph::new(text)
        .block(popup_block(title))
        .scroll((app.detail_scroll, 0));
    frame.render_widget(detail, area);
}
