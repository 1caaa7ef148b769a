use crate::app::App;
use crate::song::Backend;
use crate::ui::utils::truncate;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
};

pub fn render(app: &mut App, width: usize, height: usize, lines: &mut Vec<Line>) {
    let theme = &app.theme;

    // Unified aesthetic: spacious, centered, clean
    let tag_w = 8; // "YouTube" is the widest source tag
    let artist_w = width / 4;
    let title_w = width.saturating_sub(artist_w + tag_w + 10);
    let content_h = height;

    let green = theme.green;
    let pink = theme.red;
    let cream = theme.yellow;
    let muted = theme.overlay;
    let grid = theme.surface;
    let cyan = theme.cyan;

    // ━━━ CENTERED TITLE ━━━
    lines.push(Line::from(""));
    let queue_count = app.queue.len();
    lines.push(
        Line::from(Span::styled(
            format!("  QUEUE  ·  {} songs  ", queue_count),
            Style::default().fg(green),
        ))
        .alignment(Alignment::Center),
    );
    lines.push(Line::from(""));

    // ━━━ CONTENT ━━━
    if app.queue.is_empty() {
        lines.push(
            Line::from(Span::styled("Empty queue", Style::default().fg(muted)))
                .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                "Pick songs from Library, Discover or Search",
                Style::default().fg(grid),
            ))
            .alignment(Alignment::Center),
        );
        return;
    }

    let playing_idx = app.queue.current_index();
    let start_idx = app
        .queue_selected
        .saturating_sub(content_h / 2)
        .min(app.queue.len().saturating_sub(content_h));

    for (display_idx, song) in app
        .queue
        .songs()
        .iter()
        .skip(start_idx)
        .take(content_h)
        .enumerate()
    {
        let actual_idx = start_idx + display_idx;
        let is_sel = actual_idx == app.queue_selected;
        let is_current = playing_idx == Some(actual_idx);
        let num = actual_idx + 1;

        let title = truncate(&song.name, title_w.saturating_sub(2));
        let artist = truncate(&song.artist, artist_w.saturating_sub(1));
        let tag = song.backend().label();
        let tag_color = match song.backend() {
            Backend::Local => green,
            Backend::Remote => pink,
        };

        // Selection markers: ● for selected, ◉ for playing, ○ for normal
        let (marker, m_color, t_style, a_style, tag_style) = if is_sel {
            (
                "●",
                cream,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.text),
                Style::default().fg(cyan),
            )
        } else if is_current {
            (
                "◉",
                pink,
                Style::default().fg(pink),
                Style::default().fg(pink),
                Style::default().fg(pink),
            )
        } else {
            (
                "○",
                grid,
                Style::default().fg(theme.text),
                Style::default().fg(muted),
                Style::default().fg(tag_color),
            )
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", marker), Style::default().fg(m_color)),
            Span::styled(
                format!("{:>2}  ", num),
                Style::default().fg(if is_sel { green } else { muted }),
            ),
            Span::styled(
                "♪ ",
                Style::default().fg(if is_current { pink } else { green }),
            ),
            Span::styled(
                format!("{:title_w$}", title, title_w = title_w.saturating_sub(2)),
                t_style,
            ),
            Span::styled(
                format!("{:artist_w$}", artist, artist_w = artist_w),
                a_style,
            ),
            Span::styled(format!("{:>tag_w$}", tag, tag_w = tag_w), tag_style),
        ]));
    }
}
