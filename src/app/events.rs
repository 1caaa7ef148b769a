use crate::player::EngineEvent;
use crate::song::Song;
use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    Engine(EngineEvent),
    /// Fired every 250ms while a remote track is bound.
    RemotePoll,
    /// The startup music-directory walk finished.
    LibraryScanned(Vec<Song>),
    SearchResults { query: String, songs: Vec<Song> },
    TrendingResults { region: String, songs: Vec<Song> },
    CredentialMissing { message: String },
    Tick,
}
