use crate::api::YoutubeClient;
use crate::app::events::AppEvent;
use crate::app::{App, ViewMode};
use crate::player::Coordinator;
use crate::song::Song;
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;

/// Push the queue's current song at the coordinator. Every queue mutation
/// funnels through here so the transport can never drift from the queue.
pub fn apply_selection(app: &mut App, coordinator: &mut Coordinator) {
    app.queue_selected = app.queue.current_index().unwrap_or(0);
    let song = app.queue.current_song().cloned();
    if let Err(e) = coordinator.sync_selection(song.as_ref()) {
        app.show_toast(&format!("⚠ {e}"));
    }
}

/// Insert-and-play: the entry point for picking a song in search, discover
/// or library. Already-queued songs are re-selected, not duplicated.
fn play_song(app: &mut App, coordinator: &mut Coordinator, song: Song) {
    app.queue.select_or_insert(song);
    app.refresh_discover();
    apply_selection(app, coordinator);
}

fn queue_song(app: &mut App, coordinator: &mut Coordinator, song: Song) {
    let name = song.name.clone();
    let added = app.queue.append(vec![song]);
    if added > 0 {
        app.show_toast(&format!("➕ Queued: {}", name));
    } else {
        app.show_toast(&format!("Already queued: {}", name));
    }
    app.refresh_discover();
    // Appending to an empty queue auto-selects, which must start playback.
    apply_selection(app, coordinator);
}

fn dispatch_search(app: &mut App, client: &YoutubeClient, tx: &UnboundedSender<AppEvent>) {
    let query = app.search_query.trim().to_string();
    if query.is_empty() {
        return;
    }
    app.search_in_flight = true;
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        // Only the missing-credential error escapes the client; transport
        // trouble already collapsed to an empty result set inside.
        match client.search(&query).await {
            Ok(songs) => {
                let _ = tx.send(AppEvent::SearchResults { query, songs });
            }
            Err(e) => {
                let _ = tx.send(AppEvent::CredentialMissing {
                    message: e.to_string(),
                });
            }
        }
    });
}

pub fn handle_key(
    key: KeyEvent,
    app: &mut App,
    coordinator: &mut Coordinator,
    client: &YoutubeClient,
    tx: &UnboundedSender<AppEvent>,
) {
    // Blocking credential notice: any key dismisses, nothing else reacts.
    if app.credential_notice.is_some() {
        app.credential_notice = None;
        return;
    }

    // Typing into the search box captures everything until Enter/Esc.
    if app.search_active {
        match key.code {
            KeyCode::Esc => {
                app.search_active = false;
            }
            KeyCode::Backspace => {
                app.search_query.pop();
            }
            KeyCode::Enter => {
                app.search_active = false;
                dispatch_search(app, client, tx);
            }
            KeyCode::Char(c) => app.search_query.push(c),
            _ => {}
        }
        return;
    }

    // Same for the library filter box.
    if app.filter_active {
        match key.code {
            KeyCode::Esc => {
                app.filter_active = false;
                app.library_filter.clear();
                app.refresh_library_view();
            }
            KeyCode::Backspace => {
                app.library_filter.pop();
                app.refresh_library_view();
            }
            KeyCode::Enter => {
                app.filter_active = false;
            }
            KeyCode::Char(c) => {
                app.library_filter.push(c);
                app.refresh_library_view();
            }
            _ => {}
        }
        return;
    }

    let keys = app.keys.clone();

    // Quit ('q')
    if keys.matches(key, &keys.quit) {
        // Close popups first, then quit (Neovim-style)
        if app.show_keyhints {
            app.show_keyhints = false;
        } else {
            app.is_running = false;
        }
        return;
    }

    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return;
    }

    // Global Popup Close (Esc)
    if key.code == KeyCode::Esc && app.show_keyhints {
        app.show_keyhints = false;
        return;
    }

    // View Switchers
    if keys.matches(key, &keys.view_queue) {
        app.view_mode = ViewMode::Queue;
        return;
    }
    if keys.matches(key, &keys.view_library) {
        app.view_mode = ViewMode::Library;
        return;
    }
    if keys.matches(key, &keys.view_discover) {
        app.view_mode = ViewMode::Discover;
        return;
    }
    if keys.matches(key, &keys.view_search) {
        app.view_mode = ViewMode::Search;
        return;
    }
    if keys.matches(key, &keys.tab_next) {
        app.next_view();
        return;
    }
    if keys.matches(key, &keys.tab_prev) {
        app.prev_view();
        return;
    }

    // Global search: '/' jumps to the search view ready for typing
    if keys.matches(key, &keys.search_global) {
        app.view_mode = ViewMode::Search;
        app.search_active = true;
        return;
    }

    if keys.matches(key, &keys.filter_library) && app.view_mode == ViewMode::Library {
        app.filter_active = true;
        return;
    }

    // List Navigation (j/k + arrows)
    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.move_cursor(-1);
        return;
    }
    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        app.move_cursor(1);
        return;
    }

    // Select (Enter): per-view semantics
    if keys.matches(key, &keys.select) {
        match app.view_mode {
            ViewMode::Queue => {
                if app.queue.select_by_index(app.queue_selected) {
                    apply_selection(app, coordinator);
                }
            }
            ViewMode::Library => {
                if let Some(song) = app.selected_library_song().cloned() {
                    play_song(app, coordinator, song);
                }
            }
            ViewMode::Discover => {
                // Station rows resolve to the station's first song.
                if let Some(song) = app.selected_discover_song().cloned() {
                    play_song(app, coordinator, song);
                }
            }
            ViewMode::Search => {
                if let Some(song) = app.search_results.get(app.search_selected).cloned() {
                    play_song(app, coordinator, song);
                }
            }
        }
        return;
    }

    // Add to queue without playing ('a')
    if keys.matches(key, &keys.add_to_queue) {
        let song = match app.view_mode {
            ViewMode::Queue => None,
            ViewMode::Library => app.selected_library_song().cloned(),
            ViewMode::Discover => app.selected_discover_song().cloned(),
            ViewMode::Search => app.search_results.get(app.search_selected).cloned(),
        };
        if let Some(song) = song {
            queue_song(app, coordinator, song);
        }
        return;
    }

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        coordinator.toggle_play_pause();
        return;
    }

    // Next Track ('n')
    if keys.matches(key, &keys.next_track) {
        if !app.queue.is_empty() {
            app.queue.next();
            apply_selection(app, coordinator);
            app.show_toast("⏭ Next Track");
        }
        return;
    }

    // Prev Track ('p')
    if keys.matches(key, &keys.prev_track) {
        if !app.queue.is_empty() {
            app.queue.previous();
            apply_selection(app, coordinator);
            app.show_toast("⏮ Previous Track");
        }
        return;
    }

    // Seek ('h'/'l')
    if keys.matches(key, &keys.seek_backward) {
        coordinator.seek_relative(-5.0);
        return;
    }
    if keys.matches(key, &keys.seek_forward) {
        coordinator.seek_relative(5.0);
        return;
    }

    // Volume ('+'/'-')
    if keys.matches(key, &keys.volume_up) {
        coordinator.volume_up();
        app.show_toast(&format!("🔊 Volume: {}%", coordinator.snapshot().volume));
        return;
    }
    if keys.matches(key, &keys.volume_down) {
        coordinator.volume_down();
        app.show_toast(&format!("🔉 Volume: {}%", coordinator.snapshot().volume));
    }
}
