use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Three sections, one cursor. The flattened `discover_items` list drives
/// navigation, so rows are built with their flat index attached and the
/// scroll window slides over rows (headers included).
pub fn render(app: &mut App, width: usize, height: usize, lines: &mut Vec<Line>) {
    let theme = &app.theme;

    let artist_w = width / 4;
    let content_h = height;

    let green = theme.green;
    let pink = theme.red;
    let cream = theme.yellow;
    let muted = theme.overlay;
    let grid = theme.surface;
    let cyan = theme.cyan;

    // ━━━ CENTERED TITLE ━━━
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled("  DISCOVER  ", Style::default().fg(green)))
            .alignment(Alignment::Center),
    );
    lines.push(Line::from(""));

    let header_style = Style::default().fg(cyan).add_modifier(Modifier::BOLD);
    let mut rows: Vec<(Option<usize>, Line)> = Vec::new();

    // ━━━ TRENDING ━━━
    rows.push((
        None,
        Line::from(Span::styled(
            format!("  TRENDING IN {}", app.trending_region.to_uppercase()),
            header_style,
        )),
    ));
    if !app.has_credential {
        rows.push((
            None,
            Line::from(Span::styled(
                "  YouTube trending needs an API key",
                Style::default().fg(muted),
            )),
        ));
        rows.push((
            None,
            Line::from(Span::styled(
                "  Add youtube_api_key to config.toml or set YOUTUBE_API_KEY",
                Style::default().fg(grid),
            )),
        ));
    } else if !app.trending_loaded {
        rows.push((
            None,
            Line::from(Span::styled(
                "  Loading trending music...",
                Style::default().fg(muted),
            )),
        ));
    } else if app.trending.is_empty() {
        rows.push((
            None,
            Line::from(Span::styled(
                "  Nothing trending right now",
                Style::default().fg(muted),
            )),
        ));
    } else {
        for (i, song) in app.trending.iter().enumerate() {
            let is_sel = app.discover_selected == i;
            let prefix_w = 10; // "  ● " + rank + "♪ "
            let title_w = width.saturating_sub(artist_w + prefix_w);
            let title = truncate(&song.name, title_w.saturating_sub(1));
            let artist = truncate(&song.artist, artist_w.saturating_sub(1));
            let (marker, m_color, t_style) = if is_sel {
                (
                    "●",
                    cream,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", grid, Style::default().fg(theme.text))
            };
            rows.push((
                Some(i),
                Line::from(vec![
                    Span::styled(format!("  {} ", marker), Style::default().fg(m_color)),
                    Span::styled(
                        format!("{:>2}  ", i + 1),
                        Style::default().fg(if is_sel { green } else { muted }),
                    ),
                    Span::styled("♪ ", Style::default().fg(pink)),
                    Span::styled(
                        format!("{:title_w$}", title, title_w = title_w.saturating_sub(1)),
                        t_style,
                    ),
                    Span::styled(
                        format!("{:artist_w$}", artist, artist_w = artist_w),
                        Style::default().fg(if is_sel { theme.text } else { muted }),
                    ),
                ]),
            ));
        }
    }

    // ━━━ FOR YOU ━━━
    if !app.for_you.is_empty() {
        let base = app.trending.len();
        rows.push((None, Line::from("")));
        rows.push((
            None,
            Line::from(Span::styled("  MADE FOR YOU", header_style)),
        ));
        for (i, song) in app.for_you.iter().enumerate() {
            let flat = base + i;
            let is_sel = app.discover_selected == flat;
            let prefix_w = 6;
            let title_w = width.saturating_sub(artist_w + prefix_w);
            let title = truncate(&song.name, title_w.saturating_sub(1));
            let artist = truncate(&song.artist, artist_w.saturating_sub(1));
            let (marker, m_color, t_style) = if is_sel {
                (
                    "●",
                    cream,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", grid, Style::default().fg(theme.text))
            };
            rows.push((
                Some(flat),
                Line::from(vec![
                    Span::styled(format!("  {} ", marker), Style::default().fg(m_color)),
                    Span::styled("♪ ", Style::default().fg(green)),
                    Span::styled(
                        format!("{:title_w$}", title, title_w = title_w.saturating_sub(1)),
                        t_style,
                    ),
                    Span::styled(
                        format!("{:artist_w$}", artist, artist_w = artist_w),
                        Style::default().fg(if is_sel { theme.text } else { muted }),
                    ),
                ]),
            ));
        }
    }

    // ━━━ GENRE STATIONS ━━━
    if !app.stations.is_empty() {
        let base = app.trending.len() + app.for_you.len();
        rows.push((None, Line::from("")));
        rows.push((
            None,
            Line::from(Span::styled("  GENRE STATIONS", header_style)),
        ));
        for (i, station) in app.stations.iter().enumerate() {
            let flat = base + i;
            let is_sel = app.discover_selected == flat;
            let (marker, m_color, n_style) = if is_sel {
                (
                    "●",
                    cream,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", grid, Style::default().fg(theme.text))
            };
            rows.push((
                Some(flat),
                Line::from(vec![
                    Span::styled(format!("  {} ", marker), Style::default().fg(m_color)),
                    Span::styled("♫ ", Style::default().fg(cyan)),
                    Span::styled(format!("{} Station", station.genre), n_style),
                    Span::styled(
                        format!("  ·  {} songs", station.songs.len()),
                        Style::default().fg(muted),
                    ),
                ]),
            ));
        }
    }

    if app.for_you.is_empty() && app.stations.is_empty() {
        rows.push((None, Line::from("")));
        rows.push((
            None,
            Line::from(Span::styled(
                "  Local songs unlock stations and picks",
                Style::default().fg(grid),
            )),
        ));
    }

    // Scroll window keyed on the selected row's position.
    let selected_pos = rows
        .iter()
        .position(|(idx, _)| *idx == Some(app.discover_selected))
        .unwrap_or(0);
    let start = selected_pos
        .saturating_sub(content_h / 2)
        .min(rows.len().saturating_sub(content_h));

    for (_, line) in rows.into_iter().skip(start).take(content_h) {
        lines.push(line);
    }
}
