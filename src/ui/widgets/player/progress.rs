use crate::app::App;
use crate::ui::utils::format_time;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render_progress(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    if app.queue.current_song().is_none() {
        return;
    }

    let gauge_area_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let playback = &app.playback;
    let ratio = if playback.duration_secs > 0.0 {
        playback.position_secs / playback.duration_secs
    } else {
        0.0
    };

    let width = gauge_area_rect.width as usize;
    let occupied_width = (width as f64 * ratio.clamp(0.0, 1.0)) as usize;
    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);

    let mut bar_spans: Vec<Span> = Vec::with_capacity(width);
    for i in 0..width {
        if i < occupied_width {
            if i == occupied_width.saturating_sub(1) {
                // Playhead knob
                bar_spans.push(Span::styled("●", fill_style));
            } else {
                bar_spans.push(Span::styled("━", fill_style));
            }
        } else {
            bar_spans.push(Span::styled("─", empty_style));
        }
    }

    let gauge_p = Paragraph::new(Line::from(bar_spans))
        .alignment(Alignment::Left)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(gauge_p, gauge_area_rect);
}

pub fn render_time(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    if app.queue.current_song().is_none() {
        return;
    }

    let playback = &app.playback;
    // Remote durations arrive with the first poll; show a dash until then.
    let duration = if playback.duration_secs > 0.0 {
        format_time(playback.duration_secs)
    } else {
        "-:--".to_string()
    };
    let time_str = format!("{} / {}", format_time(playback.position_secs), duration);

    let time_label = Paragraph::new(time_str)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.overlay));
    f.render_widget(time_label, area);
}
