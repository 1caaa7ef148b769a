use crate::app::App;
use crate::player::PlaybackPhase;
use crate::song::Backend;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let max_width = area.width.saturating_sub(4) as usize;

    let Some(song) = app.queue.current_song() else {
        let idle = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing queued",
                Style::default().fg(theme.overlay),
            )),
            Line::from(Span::styled(
                "Press / to search or 2 for your library",
                Style::default().fg(theme.surface),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(idle, area);
        return;
    };

    // Backend badge: which engine this song plays through 🎵
    let badge = match song.backend() {
        Backend::Local => Span::styled(
            "\u{00A0}Local\u{00A0}",
            Style::default()
                .fg(theme.base)
                .bg(theme.green)
                .add_modifier(Modifier::BOLD),
        ),
        Backend::Remote => Span::styled(
            "\u{00A0}YouTube\u{00A0}",
            Style::default()
                .fg(theme.base)
                .bg(theme.red)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let mut badge_line = vec![badge];
    if app.playback.phase == PlaybackPhase::Loading {
        badge_line.push(Span::styled(" • ", Style::default().fg(theme.overlay)));
        badge_line.push(Span::styled("Loading…", Style::default().fg(theme.yellow)));
    }

    let info_text = vec![
        Line::from(Span::styled(
            format!("🎵 {}", truncate(&song.name, max_width.saturating_sub(2))),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("🎤 "),
            Span::styled(
                truncate(&song.artist, max_width.saturating_sub(2)),
                Style::default().fg(theme.magenta),
            ),
        ]),
        Line::from(""),
        Line::from(badge_line),
    ];

    let info = Paragraph::new(info_text)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(info, area);
}
