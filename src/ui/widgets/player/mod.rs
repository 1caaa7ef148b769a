use crate::app::App;
use ratatui::{
    layout::Alignment,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    style::Modifier,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub mod art;
pub mod controls;
pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    // --- MUSIC CARD ---
    let music_title = Line::from(vec![Span::styled(
        " Now Playing ",
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )]);

    let music_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(music_title)
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner_music_area = music_block.inner(area);
    f.render_widget(music_block, area);

    let m_height = inner_music_area.height;

    let music_constraints = if m_height < 10 {
        // Tiny Mode: info takes what is left, single-line controls
        vec![
            Constraint::Min(0),                                          // 0: Spacer (collapses)
            Constraint::Length(m_height.saturating_sub(2).max(1)),       // 1: Info
            Constraint::Length(0),                                       // 2: Gauge (Hidden)
            Constraint::Length(0),                                       // 3: Time (Hidden)
            Constraint::Length(1),                                       // 4: Controls
        ]
    } else {
        vec![
            Constraint::Min(0),    // 0: Breathing room (Elastic!)
            Constraint::Length(4), // 1: Info
            Constraint::Length(1), // 2: Gauge
            Constraint::Length(1), // 3: Time
            Constraint::Length(3), // 4: Controls
        ]
    };

    let music_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(music_constraints)
        .split(inner_music_area);

    // 0. Art Placeholder (elastic region, only when it has real height)
    if music_chunks[0].height >= 3 {
        art::render(f, music_chunks[0], app);
    }

    // 1. Info
    info::render(f, music_chunks[1], app);

    // 2. Gauge
    if music_chunks[2].height > 0 {
        progress::render_progress(f, music_chunks[2], app);
    }

    // 3. Time
    if music_chunks[3].height > 0 {
        progress::render_time(f, music_chunks[3], app);
    }

    // 4. Controls
    if music_chunks[4].height > 0 {
        controls::render(f, music_chunks[4], app);
    }
}
