use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let play_icon = if app.playback.is_playing() { "⏸" } else { "▶" };
    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    let prev_str = "   ⏮   ";
    let next_str = "   ⏭   ";
    let play_str = format!("   {}   ", play_icon);

    // Split Controls Area: Top for Buttons, Bottom for Volume
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Volume Bar
        ])
        .split(area);

    // 1. Buttons (Top) - 3-Column Layout for seamless centering
    let button_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(36), // Fixed width keeps the controls dead center
            Constraint::Fill(1),
        ])
        .split(chunks[0]);

    let center_spans = Line::from(vec![
        Span::styled(prev_str, btn_style),
        Span::raw("   "),
        Span::styled(play_str, btn_style),
        Span::raw("   "),
        Span::styled(next_str, btn_style),
    ]);
    let center_widget = Paragraph::new(center_spans)
        .alignment(Alignment::Center)
        .block(Block::default());
    f.render_widget(center_widget, button_layout[1]);

    // 2. Volume Bar (Bottom) - if we have space
    if chunks.len() >= 3 && chunks[2].height > 0 {
        let vol_ratio = app.playback.volume as f64 / 100.0;
        let bar_width = 20;
        let filled_width = (bar_width as f64 * vol_ratio).round() as usize;

        let mut bar_spans = Vec::new();
        bar_spans.push(Span::styled("- ", Style::default().fg(theme.overlay)));

        for i in 0..bar_width {
            if i < filled_width {
                bar_spans.push(Span::styled("━", Style::default().fg(theme.magenta)));
            } else {
                bar_spans.push(Span::styled("─", Style::default().fg(theme.surface)));
            }
        }

        bar_spans.push(Span::styled(" +", Style::default().fg(theme.overlay)));

        // Match button layout for perfect alignment
        let volume_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(36),
                Constraint::Fill(1),
            ])
            .split(chunks[2]);

        let vol_widget = Paragraph::new(Line::from(bar_spans))
            .alignment(Alignment::Center)
            .block(Block::default());
        f.render_widget(vol_widget, volume_layout[1]);
    }
}
