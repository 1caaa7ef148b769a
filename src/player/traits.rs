use crate::song::{Backend, Song};

/// Engine-reported playback transitions. Commands are requests; these
/// events are the authoritative answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Playing,
    Paused,
    Ended,
}

/// Everything an engine has to say flows through the app event channel
/// as one of these, tagged with the backend that produced it so stale
/// reports from a torn-down engine can be ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StateChanged {
        backend: Backend,
        state: EngineState,
    },
    Progress {
        backend: Backend,
        position_secs: f64,
        duration_secs: f64,
    },
    /// Async load finished. Carries the song id so a completion that
    /// arrives after the user has already moved on is dropped.
    Loaded {
        backend: Backend,
        song_id: String,
        duration_secs: f64,
    },
    LoadFailed {
        backend: Backend,
        song_id: String,
        reason: String,
    },
}

/// The unified control surface for one playback backend. 🎵
///
/// Methods are fire-and-forget: they issue the command and return; the
/// engine confirms (or refuses) via `EngineEvent`s on the app channel.
/// Only the coordinator may call these.
pub trait PlaybackEngine {
    fn backend(&self) -> Backend;

    /// Bind a song and start playing it. Errors here are immediate
    /// dispatch failures (bad handle, dead process); load errors that
    /// surface later arrive as `LoadFailed` events.
    fn load(&mut self, song: &Song) -> anyhow::Result<()>;

    fn play(&mut self);
    fn pause(&mut self);

    /// Unbind the current media and go quiet. Called on every song
    /// change, including swaps to the other backend.
    fn stop(&mut self);

    fn seek(&mut self, position_secs: f64);

    /// Ask the engine to report position/duration via a `Progress`
    /// event. The local engine answers on every UI tick; the remote
    /// engine answers poll requests.
    fn request_progress(&mut self);

    /// Volume in 0..=100.
    fn set_volume(&mut self, volume: u8);
}
