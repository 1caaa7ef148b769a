use crate::app::{App, ViewMode};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;

    // 🎹 WhichKey-style floating popup, bottom-right

    // Context-specific keybindings with icons. String keys so remapped
    // configs show their real bindings.
    let (title, keys): (&str, Vec<(String, &str, &str)>) = match app.view_mode {
        ViewMode::Queue => (
            "Queue",
            vec![
                (
                    format!(
                        "{}/{}",
                        app.keys.display(&app.keys.nav_down),
                        app.keys.display(&app.keys.nav_up)
                    ),
                    "📋",
                    "Navigate",
                ),
                (app.keys.display(&app.keys.select), "▶️", "Play selected"),
            ],
        ),
        ViewMode::Library => (
            "Library",
            vec![
                (
                    format!(
                        "{}/{}",
                        app.keys.display(&app.keys.nav_down),
                        app.keys.display(&app.keys.nav_up)
                    ),
                    "📋",
                    "Navigate",
                ),
                (app.keys.display(&app.keys.select), "▶️", "Play"),
                (
                    app.keys.display(&app.keys.add_to_queue),
                    "➕",
                    "Add to Queue",
                ),
                (
                    app.keys.display(&app.keys.filter_library),
                    "🔎",
                    "Filter library",
                ),
            ],
        ),
        ViewMode::Discover => (
            "Discover",
            vec![
                (
                    format!(
                        "{}/{}",
                        app.keys.display(&app.keys.nav_down),
                        app.keys.display(&app.keys.nav_up)
                    ),
                    "📋",
                    "Navigate",
                ),
                (app.keys.display(&app.keys.select), "▶️", "Play pick"),
                (
                    app.keys.display(&app.keys.add_to_queue),
                    "➕",
                    "Add to Queue",
                ),
            ],
        ),
        ViewMode::Search => (
            "Search",
            vec![
                (
                    app.keys.display(&app.keys.search_global),
                    "🔍",
                    "Type a query",
                ),
                (
                    format!(
                        "{}/{}",
                        app.keys.display(&app.keys.nav_down),
                        app.keys.display(&app.keys.nav_up)
                    ),
                    "📋",
                    "Navigate",
                ),
                (app.keys.display(&app.keys.select), "▶️", "Play result"),
                (
                    app.keys.display(&app.keys.add_to_queue),
                    "➕",
                    "Add to Queue",
                ),
            ],
        ),
    };

    let global_keys: Vec<(String, &str, &str)> = vec![
        (app.keys.display(&app.keys.play_pause), "▶️", "Play/Pause"),
        (app.keys.display(&app.keys.next_track), "⏭️", "Next track"),
        (
            app.keys.display(&app.keys.prev_track),
            "⏮️",
            "Previous track",
        ),
        (
            format!(
                "{}/{}",
                app.keys.display(&app.keys.seek_backward),
                app.keys.display(&app.keys.seek_forward)
            ),
            "⏩",
            "Seek ±5s",
        ),
        (
            format!(
                "{}/{}",
                app.keys.display(&app.keys.volume_up),
                app.keys.display(&app.keys.volume_down)
            ),
            "🔊",
            "Volume",
        ),
        (
            app.keys.display(&app.keys.search_global),
            "🔍",
            "Search YouTube",
        ),
        (format!("1-{}", ViewMode::ALL.len()), "🖼️", "Views"),
        (app.keys.display(&app.keys.tab_next), "🔄", "Next view"),
        (app.keys.display(&app.keys.quit), "🚪", "Quit"),
    ];

    // Build popup content first to calculate exact height
    let mut lines: Vec<Line> = Vec::new();

    for (key, icon, desc) in &keys {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<7} ", key),
                Style::default()
                    .fg(theme.yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ", Style::default().fg(theme.overlay)),
            Span::styled(format!("{} ", icon), Style::default()),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }

    if !keys.is_empty() {
        lines.push(Line::from(""));
    }

    // Global section - left aligned with divider
    lines.push(Line::from(Span::styled(
        "────── Global ──────",
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (key, icon, desc) in &global_keys {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<7} ", key),
                Style::default()
                    .fg(theme.green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ", Style::default().fg(theme.overlay)),
            Span::styled(format!("{} ", icon), Style::default()),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }

    // Calculate popup size - fit content exactly 📏
    let content_width = keys
        .iter()
        .chain(global_keys.iter())
        .map(|(k, _i, d)| {
            // padding(1) + key(min 7) + padding(1) + spacer(3) + icon/space(3) + desc
            2 + k.len().max(7) + 3 + 3 + d.len()
        })
        .max()
        .unwrap_or(20)
        .max(22); // "────── Global ──────" length

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height); // +2 for borders
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    // Position at bottom-right
    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}
