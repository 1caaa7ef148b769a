use crate::app::{App, ViewMode};
use ratatui::{
    layout::Alignment,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub mod discover;
pub mod library;
pub mod queue;
pub mod search;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let panel_block = Block::default()
        .borders(ratatui::widgets::Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", app.view_mode.title()),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner_area = panel_block.inner(area);
    f.render_widget(panel_block, area);

    let w = inner_area.width as usize;
    let h = inner_area.height as usize;
    let mut lines: Vec<Line> = Vec::new();

    // Input bar: the search box, the library filter, or a hint
    let (input_text, input_color) = match app.view_mode {
        ViewMode::Search if app.search_active => {
            (format!(" {}▏", &app.search_query), theme.green)
        }
        ViewMode::Search if !app.search_query.is_empty() => {
            (format!(" {}", &app.search_query), theme.overlay)
        }
        ViewMode::Library if app.filter_active => {
            (format!(" {}▏", &app.library_filter), theme.green)
        }
        ViewMode::Library if !app.library_filter.is_empty() => {
            (format!(" {}", &app.library_filter), theme.overlay)
        }
        ViewMode::Library => (" Press f to filter...".to_string(), theme.overlay),
        _ => (" Press / to search YouTube...".to_string(), theme.overlay),
    };

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  ", Style::default().fg(input_color)),
        Span::styled(input_text, Style::default().fg(input_color)),
    ]));

    // Elegant thin separator - centered
    lines.push(
        Line::from(Span::styled(
            "─".repeat(w.min(60)),
            Style::default().fg(theme.surface),
        ))
        .alignment(Alignment::Center),
    );

    // Tab bar with filled dot indicators
    let tab_colors = [theme.green, theme.blue, theme.magenta, theme.cyan];
    let mut tab_spans = Vec::new();
    for (i, view) in ViewMode::ALL.iter().enumerate() {
        let active = app.view_mode == *view;
        let dot = if active { "●" } else { "○" };
        let color = tab_colors[i];
        tab_spans.push(Span::styled(format!("{} ", dot), Style::default().fg(color)));
        tab_spans.push(Span::styled(
            view.title(),
            if active {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            },
        ));
        if i + 1 < ViewMode::ALL.len() {
            tab_spans.push(Span::styled("    ", Style::default()));
        }
    }
    lines.push(Line::from(tab_spans).alignment(Alignment::Center));
    lines.push(Line::from(""));

    // Header consumed 5 lines; sub-views add a 3-line title of their own.
    let content_h = h.saturating_sub(8);

    match app.view_mode {
        ViewMode::Queue => queue::render(app, w, content_h, &mut lines),
        ViewMode::Library => library::render(app, w, content_h, &mut lines),
        ViewMode::Discover => discover::render(app, w, content_h, &mut lines),
        ViewMode::Search => search::render(app, w, content_h, &mut lines),
    }

    let panel_widget =
        Paragraph::new(lines).block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(panel_widget, inner_area);
}
