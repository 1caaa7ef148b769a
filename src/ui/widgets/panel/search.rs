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
    let search_title = if app.search_query.is_empty() {
        "  SEARCH  ".to_string()
    } else {
        format!("  SEARCH RESULTS: \"{}\"  ", app.search_query)
    };
    lines.push(
        Line::from(Span::styled(search_title, Style::default().fg(green)))
            .alignment(Alignment::Center),
    );
    lines.push(Line::from(""));

    // ━━━ CONTENT ━━━
    if !app.has_credential {
        lines.push(
            Line::from(Span::styled(
                "YouTube search needs an API key",
                Style::default().fg(muted),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                "Add youtube_api_key to config.toml or set YOUTUBE_API_KEY",
                Style::default().fg(grid),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    if app.search_in_flight {
        lines.push(
            Line::from(Span::styled(
                "Searching YouTube...",
                Style::default().fg(muted),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    if app.search_results.is_empty() && !app.search_query.is_empty() {
        lines.push(
            Line::from(Span::styled("No results found", Style::default().fg(muted)))
                .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                "Try a different search",
                Style::default().fg(grid),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    if app.search_results.is_empty() {
        lines.push(
            Line::from(Span::styled(
                "Press / and type to search YouTube",
                Style::default().fg(muted),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    let current_id = app.queue.current_song().map(|s| s.id.clone());
    let start_idx = app
        .search_selected
        .saturating_sub(content_h / 2)
        .min(app.search_results.len().saturating_sub(content_h));

    for (display_idx, song) in app
        .search_results
        .iter()
        .skip(start_idx)
        .take(content_h)
        .enumerate()
    {
        let actual_idx = start_idx + display_idx;
        let is_sel = actual_idx == app.search_selected;
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
