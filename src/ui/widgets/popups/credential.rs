use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Centered blocking notice for a missing YouTube API key. Unlike toasts
/// this sits in the middle of the screen and eats the next keypress.
pub fn render(f: &mut Frame, app: &App) {
    let Some(ref message) = app.credential_notice else {
        return;
    };
    let theme = &app.theme;

    let width = 62.min(f.area().width.saturating_sub(4));
    // Rough wrap estimate; Paragraph::wrap handles the actual folding.
    let text_w = width.saturating_sub(4).max(1) as usize;
    let msg_lines = message.len().div_ceil(text_w) as u16;
    let height = (msg_lines + 5).min(f.area().height.saturating_sub(2));
    let x = (f.area().width.saturating_sub(width)) / 2;
    let y = (f.area().height.saturating_sub(height)) / 2;
    let area = Rect::new(x, y, width, height);

    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.push(
        Line::styled(message.clone(), Style::default().fg(theme.text)).alignment(Alignment::Center),
    );
    lines.push(Line::from(""));
    lines.push(
        Line::styled(
            "Press any key to dismiss",
            Style::default().fg(theme.overlay),
        )
        .alignment(Alignment::Center),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.yellow))
        .title(Span::styled(
            " 🔑 YouTube API Key Required ",
            Style::default()
                .fg(theme.yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset));

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(p, area);
}
