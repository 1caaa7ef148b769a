use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // Footer needs 1 line at the bottom always.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct ContentLayout {
    pub player: Rect,
    pub panel: Option<Rect>,
    pub is_horizontal: bool,
}

pub fn get_content_layout(area: Rect, wide_mode: bool, height: u16) -> ContentLayout {
    if wide_mode {
        // Horizontal Mode: the list panel dominates, player card on the left
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Player card
                Constraint::Min(10),        // Queue/Library/Discover/Search
            ])
            .split(area);
        ContentLayout {
            player: chunks[0],
            panel: Some(chunks[1]),
            is_horizontal: true,
        }
    } else if height < 22 {
        // Too short for stack: player card only
        ContentLayout {
            player: area,
            panel: None,
            is_horizontal: false,
        }
    } else {
        // Stack Mode: player on top, panel below
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        ContentLayout {
            player: chunks[0],
            panel: Some(chunks[1]),
            is_horizontal: false,
        }
    }
}
