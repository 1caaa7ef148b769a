use crate::app::keys::KeyConfig;
use crate::discover::{self, Station};
use crate::player::PlaybackState;
use crate::queue::Queue;
use crate::song::Song;
use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::Instant;

/// View mode for the right panel 🎛️
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewMode {
    #[default]
    Queue,
    Library,
    Discover,
    Search,
}

impl ViewMode {
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Queue => "Queue",
            ViewMode::Library => "Library",
            ViewMode::Discover => "Discover",
            ViewMode::Search => "Search",
        }
    }

    pub const ALL: [ViewMode; 4] = [
        ViewMode::Queue,
        ViewMode::Library,
        ViewMode::Discover,
        ViewMode::Search,
    ];
}

/// One row in the flattened Discover cursor list. The view renders three
/// sections (trending, for-you, stations) but navigation walks one list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscoverItem {
    Trending(usize),
    ForYou(usize),
    Station(usize),
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,

    pub is_running: bool,
    /// Transport snapshot, refreshed from the coordinator every frame.
    pub playback: PlaybackState,

    /// The one queue both backends share 📋
    pub queue: Queue,
    pub queue_selected: usize,

    /// Local library 📂
    pub library: Vec<Song>,
    pub library_selected: usize,
    pub library_filter: String,
    pub filter_active: bool,
    /// Indices into `library` surviving the current filter.
    pub library_view: Vec<usize>,

    /// YouTube search 🔍
    pub search_query: String,
    pub search_active: bool,
    pub search_in_flight: bool,
    pub search_results: Vec<Song>,
    pub search_selected: usize,

    /// Discover 🧭
    pub trending: Vec<Song>,
    /// False until the first trending response lands, so the view can
    /// tell "still loading" apart from "nothing trending".
    pub trending_loaded: bool,
    pub trending_region: String,
    pub stations: Vec<Station>,
    pub for_you: Vec<Song>,
    pub discover_items: Vec<DiscoverItem>,
    pub discover_selected: usize,

    pub view_mode: ViewMode,
    pub show_keyhints: bool,
    pub toast: Option<Toast>,
    /// Blocking notice shown when search is attempted without an API key.
    /// Dismissed by any key; nothing else reacts to input while it is up.
    pub credential_notice: Option<String>,
    pub has_credential: bool,

    pub music_directory: String,
}

impl App {
    pub fn new(keys: KeyConfig, music_directory: String, region: String, has_credential: bool) -> Self {
        Self {
            theme: crate::ui::theme::load_current_theme(),
            keys,
            is_running: true,
            playback: PlaybackState::default(),
            queue: Queue::new(),
            queue_selected: 0,
            library: Vec::new(),
            library_selected: 0,
            library_filter: String::new(),
            filter_active: false,
            library_view: Vec::new(),
            search_query: String::new(),
            search_active: false,
            search_in_flight: false,
            search_results: Vec::new(),
            search_selected: 0,
            trending: Vec::new(),
            trending_loaded: false,
            trending_region: region,
            stations: Vec::new(),
            for_you: Vec::new(),
            discover_items: Vec::new(),
            discover_selected: 0,
            view_mode: ViewMode::default(),
            show_keyhints: false,
            toast: None,
            credential_notice: None,
            has_credential,
            music_directory,
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let duration = std::time::Duration::from_millis(2000); // 2s display time
        let deadline = now + duration;

        if let Some(ref mut current) = self.toast {
            // Update message and extend deadline, but keep start_time so
            // rapid updates don't restart the entrance animation.
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self) {
        // Handle Toast Expiry
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }

    pub fn next_view(&mut self) {
        let pos = ViewMode::ALL
            .iter()
            .position(|v| *v == self.view_mode)
            .unwrap_or(0);
        self.view_mode = ViewMode::ALL[(pos + 1) % ViewMode::ALL.len()];
    }

    pub fn prev_view(&mut self) {
        let pos = ViewMode::ALL
            .iter()
            .position(|v| *v == self.view_mode)
            .unwrap_or(0);
        self.view_mode = ViewMode::ALL[(pos + ViewMode::ALL.len() - 1) % ViewMode::ALL.len()];
    }

    /// Replace the library after a scan and rebuild everything derived
    /// from it (filter view, stations, recommendations).
    pub fn set_library(&mut self, songs: Vec<Song>) {
        self.library = songs;
        self.library_selected = 0;
        self.refresh_library_view();
        self.refresh_discover();
    }

    /// Every local song the app knows about: the scanned library plus any
    /// locals that entered the queue directly (e.g. CLI arguments).
    pub fn local_pool(&self) -> Vec<Song> {
        let mut pool = self.library.clone();
        for song in self.queue.songs() {
            if song.local_path().is_some() && !pool.iter().any(|p| p.id == song.id) {
                pool.push(song.clone());
            }
        }
        pool
    }

    /// Rebuild genre stations and the for-you sampler from the local pool.
    /// Cheap enough to run on every library or queue change.
    pub fn refresh_discover(&mut self) {
        let pool = self.local_pool();
        self.stations = discover::build_stations(&pool);
        self.for_you = discover::for_you(&pool);
        self.rebuild_discover_items();
    }

    pub fn set_trending(&mut self, songs: Vec<Song>) {
        self.trending = songs;
        self.trending_loaded = true;
        self.rebuild_discover_items();
    }

    fn rebuild_discover_items(&mut self) {
        self.discover_items.clear();
        for i in 0..self.trending.len() {
            self.discover_items.push(DiscoverItem::Trending(i));
        }
        for i in 0..self.for_you.len() {
            self.discover_items.push(DiscoverItem::ForYou(i));
        }
        for i in 0..self.stations.len() {
            self.discover_items.push(DiscoverItem::Station(i));
        }
        if self.discover_selected >= self.discover_items.len() {
            self.discover_selected = self.discover_items.len().saturating_sub(1);
        }
    }

    /// Re-run the fuzzy filter over the library. An empty filter shows
    /// everything in scan order.
    pub fn refresh_library_view(&mut self) {
        if self.library_filter.is_empty() {
            self.library_view = (0..self.library.len()).collect();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = self
                .library
                .iter()
                .enumerate()
                .filter_map(|(idx, song)| {
                    let haystack = format!("{} {}", song.name, song.artist);
                    matcher
                        .fuzzy_match(&haystack, &self.library_filter)
                        .map(|score| (score, idx))
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            self.library_view = scored.into_iter().map(|(_, idx)| idx).collect();
        }
        if self.library_selected >= self.library_view.len() {
            self.library_selected = self.library_view.len().saturating_sub(1);
        }
    }

    /// The library song under the cursor, through the filter view.
    pub fn selected_library_song(&self) -> Option<&Song> {
        self.library_view
            .get(self.library_selected)
            .and_then(|&idx| self.library.get(idx))
    }

    /// The discover entry under the cursor, resolved to a song. Station
    /// rows resolve to the station's first song.
    pub fn selected_discover_song(&self) -> Option<&Song> {
        match self.discover_items.get(self.discover_selected)? {
            DiscoverItem::Trending(i) => self.trending.get(*i),
            DiscoverItem::ForYou(i) => self.for_you.get(*i),
            DiscoverItem::Station(i) => self.stations.get(*i).and_then(|s| s.songs.first()),
        }
    }

    /// Length of the cursor list for the active view.
    pub fn active_list_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Queue => self.queue.len(),
            ViewMode::Library => self.library_view.len(),
            ViewMode::Discover => self.discover_items.len(),
            ViewMode::Search => self.search_results.len(),
        }
    }

    pub fn active_cursor(&self) -> usize {
        match self.view_mode {
            ViewMode::Queue => self.queue_selected,
            ViewMode::Library => self.library_selected,
            ViewMode::Discover => self.discover_selected,
            ViewMode::Search => self.search_selected,
        }
    }

    pub fn move_cursor(&mut self, delta: i64) {
        let len = self.active_list_len();
        if len == 0 {
            return;
        }
        let cursor = self.active_cursor() as i64 + delta;
        let clamped = cursor.clamp(0, len as i64 - 1) as usize;
        match self.view_mode {
            ViewMode::Queue => self.queue_selected = clamped,
            ViewMode::Library => self.library_selected = clamped,
            ViewMode::Discover => self.discover_selected = clamped,
            ViewMode::Search => self.search_selected = clamped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keys::KeyConfig;
    use std::path::PathBuf;

    fn test_app() -> App {
        App::new(
            KeyConfig::default(),
            "/tmp/music".to_string(),
            "PK".to_string(),
            false,
        )
    }

    fn local(name: &str) -> Song {
        Song::local(
            PathBuf::from(format!("/music/{name}.mp3")),
            name.to_string(),
            "Artist".to_string(),
        )
    }

    #[test]
    fn test_view_cycling_is_a_full_loop() {
        let mut app = test_app();
        assert_eq!(app.view_mode, ViewMode::Queue);
        for _ in 0..ViewMode::ALL.len() {
            app.next_view();
        }
        assert_eq!(app.view_mode, ViewMode::Queue);
        app.prev_view();
        assert_eq!(app.view_mode, ViewMode::Search);
    }

    #[test]
    fn test_library_filter_narrows_and_clears() {
        let mut app = test_app();
        app.set_library(vec![local("Midnight Techno"), local("Morning Raga")]);
        assert_eq!(app.library_view.len(), 2);

        app.library_filter = "techno".to_string();
        app.refresh_library_view();
        assert_eq!(app.library_view.len(), 1);
        assert_eq!(app.selected_library_song().unwrap().name, "Midnight Techno");

        app.library_filter.clear();
        app.refresh_library_view();
        assert_eq!(app.library_view.len(), 2);
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut app = test_app();
        app.set_library(vec![local("a"), local("b"), local("c")]);
        app.view_mode = ViewMode::Library;
        app.move_cursor(-5);
        assert_eq!(app.library_selected, 0);
        app.move_cursor(10);
        assert_eq!(app.library_selected, 2);
    }

    #[test]
    fn test_discover_items_follow_sections() {
        let mut app = test_app();
        app.set_library(vec![local("Deep House Mix"), local("Acoustic Folk Song")]);
        app.set_trending(vec![Song::remote(
            "vid1".to_string(),
            "Trending Hit".to_string(),
            "Channel".to_string(),
            None,
        )]);
        assert!(matches!(app.discover_items[0], DiscoverItem::Trending(0)));
        assert!(app
            .discover_items
            .iter()
            .any(|i| matches!(i, DiscoverItem::Station(_))));
    }

    #[test]
    fn test_toast_expires_on_tick() {
        let mut app = test_app();
        app.show_toast("hello");
        assert!(app.toast.is_some());
        app.toast.as_mut().unwrap().deadline = Instant::now() - std::time::Duration::from_millis(1);
        app.on_tick();
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_toast_update_keeps_start_time() {
        let mut app = test_app();
        app.show_toast("first");
        let started = app.toast.as_ref().unwrap().start_time;
        app.show_toast("second");
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.start_time, started);
    }
}
