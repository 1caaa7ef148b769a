pub mod api;
pub mod app;
pub mod discover;
pub mod library;
pub mod player;
pub mod queue;
pub mod song;
pub mod ui;
