use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SLIDE_MS: u128 = 300;

pub fn render(f: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else {
        return;
    };
    let theme = &app.theme;
    let now = std::time::Instant::now();

    // Auto-dismiss handled in App::on_tick(). Messages carry emoji, so
    // measure display cells, not bytes.
    let message = &toast.message;
    let width =
        (UnicodeWidthStr::width(message.as_str()) as u16 + 6).min(f.area().width.saturating_sub(4));
    let height = 3;
    let target_x = f.area().width.saturating_sub(width + 1); // Top-right fixed
    let mut x = target_x;

    let entrance_elapsed = now.duration_since(toast.start_time).as_millis();
    let time_remaining = toast.deadline.saturating_duration_since(now).as_millis();

    // Animation: Slide In/Out 🌊
    if entrance_elapsed < SLIDE_MS {
        // Entrance: slide in from the right edge (cubic out)
        let t = entrance_elapsed as f32 / SLIDE_MS as f32;
        let ease = 1.0 - (1.0 - t).powi(3);
        x += (width as f32 * (1.0 - ease)) as u16;
    } else if time_remaining < SLIDE_MS {
        // Exit: slide back out during the last 300ms (cubic in)
        let t = (SLIDE_MS - time_remaining) as f32 / SLIDE_MS as f32;
        x += (width as f32 * t.powi(3)) as u16;
    }
    // Else: hold position

    if x >= f.area().width {
        return;
    }

    let y = 1; // Near top
    let full_area = Rect::new(x, y, width, height);
    // Clip to screen bounds to avoid panic
    let visible_area = full_area.intersection(f.area());
    if visible_area.is_empty() {
        return;
    }

    f.render_widget(Clear, visible_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let style = Style::default().fg(theme.blue).add_modifier(Modifier::BOLD);

    let text = Paragraph::new(Line::from(vec![Span::styled(message.as_str(), style)]))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(text, visible_area);
}
