use crate::app::App;
use ratatui::Frame;

pub mod credential;
pub mod help;
pub mod toast;

pub fn render(f: &mut Frame, app: &mut App) {
    // TOAST NOTIFICATION
    if let Some(ref _val) = app.toast {
        toast::render(f, app);
    }

    // FOOTER / WHICHKEY POPUP
    if app.show_keyhints {
        help::render(f, app);
    }

    // CREDENTIAL NOTICE: drawn last; while it is up, any key dismisses
    // it and nothing else reacts (see input_handler).
    if app.credential_notice.is_some() {
        credential::render(f, app);
    }
}
