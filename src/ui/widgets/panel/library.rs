use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
};

pub fn render(app: &mut App, width: usize, height: usize, lines: &mut Vec<Line>) {
    let theme = &app.theme;

    // Match Queue layout: 25% artist column
    let artist_w = width / 4;
    let content_h = height;

    let green = theme.green;
    let pink = theme.red;
    let cream = theme.yellow;
    let muted = theme.overlay;
    let grid = theme.surface;

    // ━━━ CENTERED TITLE ━━━
    lines.push(Line::from(""));
    let library_title = if app.library_filter.is_empty() {
        format!("  LIBRARY  ·  {} songs  ", app.library.len())
    } else {
        format!(
            "  LIBRARY  ·  {} / {} songs  ",
            app.library_view.len(),
            app.library.len()
        )
    };
    lines.push(
        Line::from(Span::styled(library_title, Style::default().fg(green)))
            .alignment(Alignment::Center),
    );
    lines.push(Line::from(""));

    // ━━━ CONTENT ━━━
    if app.library.is_empty() {
        lines.push(
            Line::from(Span::styled(
                "No local music found",
                Style::default().fg(muted),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                format!("Scanned: {}", app.music_directory),
                Style::default().fg(grid),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                "Set music_directory in config.toml",
                Style::default().fg(grid),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    if app.library_view.is_empty() {
        lines.push(
            Line::from(Span::styled(
                format!("No matches for \"{}\"", app.library_filter),
                Style::default().fg(muted),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                "Esc clears the filter",
                Style::default().fg(grid),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    let current_id = app.queue.current_song().map(|s| s.id.clone());
    let start_idx = app
        .library_selected
        .saturating_sub(content_h / 2)
        .min(app.library_view.len().saturating_sub(content_h));

    for (display_idx, &song_idx) in app
        .library_view
        .iter()
        .skip(start_idx)
        .take(content_h)
        .enumerate()
    {
        let Some(song) = app.library.get(song_idx) else {
            continue;
        };
        let actual_idx = start_idx + display_idx;
        let is_sel = actual_idx == app.library_selected;
        let is_current = current_id.as_deref() == Some(song.id.as_str());

        // Prefix width: "  ● " (4) + "♪ " (2) = 6 chars
        let prefix_w = 6;
        let title_w = width.saturating_sub(artist_w + prefix_w);

        let title = truncate(&song.name, title_w.saturating_sub(1));
        let artist = truncate(&song.artist, artist_w.saturating_sub(1));

        let (marker, m_color, t_style, a_style) = if is_sel {
            (
                "●",
                cream,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.text),
            )
        } else if is_current {
            (
                "◉",
                pink,
                Style::default().fg(pink),
                Style::default().fg(pink),
            )
        } else {
            (
                "○",
                grid,
                Style::default().fg(theme.text),
                Style::default().fg(muted),
            )
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", marker), Style::default().fg(m_color)),
            Span::styled(
                "♪ ",
                Style::default().fg(if is_current { pink } else { green }),
            ),
            Span::styled(
                format!("{:title_w$}", title, title_w = title_w.saturating_sub(1)),
                t_style,
            ),
            Span::styled(
                format!("{:artist_w$}", artist, artist_w = artist_w),
                a_style,
            ),
        ]));
    }
}
