pub mod panel;
pub mod player;
pub mod popups;
