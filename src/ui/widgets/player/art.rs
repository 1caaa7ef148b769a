use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

/// Glyph placeholder where album art would sit. Thumbnails stay on the
/// remote side and local tags rarely carry images, so the pane holds a
/// note glyph that follows the transport instead.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    // Early exit if area too small
    if area.height < 3 {
        return;
    }

    let (glyph, color) = if app.playback.is_playing() {
        ("♪ ♫ ♪", theme.magenta)
    } else if app.queue.current_song().is_some() {
        ("♪", theme.overlay)
    } else {
        ("·", theme.surface)
    };

    // Vertical centering: pad down to the middle row
    let pad = "\n".repeat(((area.height - 1) / 2) as usize);
    let p = Paragraph::new(format!("{pad}{glyph}"))
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().fg(color).bg(Color::Reset)));
    f.render_widget(p, area);
}
