use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::browser::ResultBrowser;
use crate::layout::visible_rows;

pub fn render(frame: &mut Frame, browser: &ResultBrowser, area: Rect) {
    let request = browser.request();
    let results = browser.results();
    let title = format!(
        " {}: {} · {} results · page {}/{} ",
        request.kind(),
        request.query(),
        results.total_count,
        request.page(),
        request.last_page(results.total_count)
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    if results.is_empty() {
        let empty = Paragraph::new("No results")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let name_width = (w / 2).clamp(10, 50);
    let range = browser.visible_range(visible_rows(area));

    let items: Vec<ListItem> = results.items[range.clone()]
        .iter()
        .zip(range)
        .map(|(item, i)| {
            let selected = i == browser.selected();
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let name = truncate(&item.display_name, name_width);
            let mut spans = vec![Span::styled(format!("{:<name_width$}", name), style)];
            if let Some(detail) = &item.detail {
                let room = w.saturating_sub(name_width + 2);
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    truncate(detail, room),
                    Style::default().fg(Color::Gray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
