pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::Frame;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);

    // 2. Content Layout
    let wide_mode = area.width >= 90;
    let content_layout = layout::get_content_layout(main_layout.body_area, wide_mode, area.height);

    // 3. Render Music Card
    widgets::player::render(f, content_layout.player, app);

    // 4. Render Panel (Queue / Library / Discover / Search)
    if let Some(panel_area) = content_layout.panel {
        widgets::panel::render(f, panel_area, app);
    }

    // 5. Render Footer Hint (if no popup active)
    if !app.show_keyhints {
        use ratatui::layout::Alignment;
        use ratatui::style::{Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        let theme = &app.theme;
        let hint = Line::from(vec![
            Span::styled(
                " ? ",
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.overlay)),
        ]);
        let footer = Paragraph::new(hint).alignment(Alignment::Right);
        f.render_widget(footer, main_layout.footer_area);
    }

    // 6. Render Popups (Overlays)
    // Note: widgets::popups::render handles active states internally
    widgets::popups::render(f, app);
}
