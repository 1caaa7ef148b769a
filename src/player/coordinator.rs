use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::app::events::AppEvent;
use crate::player::traits::{EngineEvent, EngineState, PlaybackEngine};
use crate::song::{Backend, Song};

const REMOTE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Transport lifecycle. `Loading` covers the window between dispatching a
/// load and the engine confirming playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Loading,
    Playing,
    Paused,
}

/// What the UI reads every frame. Derived from engine events, never from
/// command dispatch, so it reflects what the engines actually did.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    pub active_backend: Option<Backend>,
    pub phase: PlaybackPhase,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: u8,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            active_backend: None,
            phase: PlaybackPhase::Idle,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: 80,
        }
    }
}

/// Identity of the song a load was dispatched for. Engine events are
/// checked against this so late completions of an abandoned load never
/// touch the current state.
struct BoundSong {
    id: String,
    backend: Backend,
}

/// Owns both engines and everything transport. Exactly one engine is live
/// at a time; every swap tears the old binding down before the new one is
/// established. Queue traversal stays out of here: the caller moves the
/// queue and hands the resulting selection to `sync_selection`.
pub struct Coordinator {
    local: Option<Box<dyn PlaybackEngine>>,
    remote: Option<Box<dyn PlaybackEngine>>,
    bound: Option<BoundSong>,
    state: PlaybackState,
    poll_task: Option<JoinHandle<()>>,
    tx: UnboundedSender<AppEvent>,
}

impl Coordinator {
    /// Either engine may be absent (no audio device, mpv not installed);
    /// its backend is then reported unavailable instead of failing startup.
    pub fn new(
        local: Option<Box<dyn PlaybackEngine>>,
        remote: Option<Box<dyn PlaybackEngine>>,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            local,
            remote,
            bound: None,
            state: PlaybackState::default(),
            poll_task: None,
            tx,
        }
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    pub fn backend_available(&self, backend: Backend) -> bool {
        match backend {
            Backend::Local => self.local.is_some(),
            Backend::Remote => self.remote.is_some(),
        }
    }

    fn engine_mut(&mut self, backend: Backend) -> Option<&mut Box<dyn PlaybackEngine>> {
        match backend {
            Backend::Local => self.local.as_mut(),
            Backend::Remote => self.remote.as_mut(),
        }
    }

    fn live_engine_mut(&mut self) -> Option<&mut Box<dyn PlaybackEngine>> {
        let backend = self.state.active_backend?;
        if self.bound.is_none() {
            return None;
        }
        self.engine_mut(backend)
    }

    /// Tear down whatever was live. The previously active engine goes
    /// quiet first, then the other one for good measure.
    fn stop_all(&mut self) {
        self.stop_remote_poll();
        let first = self.state.active_backend.unwrap_or(Backend::Local);
        let second = match first {
            Backend::Local => Backend::Remote,
            Backend::Remote => Backend::Local,
        };
        for backend in [first, second] {
            if let Some(engine) = self.engine_mut(backend) {
                engine.stop();
            }
        }
    }

    /// React to the queue's current song changing. No-op when the same
    /// song is already bound; otherwise full teardown, reset, and a load
    /// dispatched to the matching engine. Errors mean the load could not
    /// even be dispatched and the transport is left idle.
    pub fn sync_selection(&mut self, song: Option<&Song>) -> Result<()> {
        match (&self.bound, song) {
            (Some(bound), Some(song)) if bound.id == song.id => return Ok(()),
            (None, None) => return Ok(()),
            _ => {}
        }

        self.stop_all();
        self.bound = None;
        self.state.active_backend = None;
        self.state.phase = PlaybackPhase::Idle;
        self.state.position_secs = 0.0;
        self.state.duration_secs = 0.0;

        let Some(song) = song else { return Ok(()) };

        let backend = song.backend();
        self.bound = Some(BoundSong {
            id: song.id.clone(),
            backend,
        });
        self.state.active_backend = Some(backend);
        self.state.phase = PlaybackPhase::Loading;

        let result = match self.engine_mut(backend) {
            Some(engine) => engine.load(song),
            None => Err(anyhow!("{} playback is unavailable", backend.label())),
        };

        if let Err(e) = result {
            tracing::error!("Cannot play {}: {e:#}", song.name);
            self.bound = None;
            self.state.active_backend = None;
            self.state.phase = PlaybackPhase::Idle;
            return Err(e);
        }
        tracing::info!("Loading {} via {} backend", song.name, backend.label());
        Ok(())
    }

    /// Fold an engine report into the transport state. Returns false when
    /// the event was stale (wrong backend, or a load completion for a song
    /// that is no longer bound) and was ignored.
    pub fn on_engine_event(&mut self, event: &EngineEvent) -> bool {
        let Some(active) = self.state.active_backend else {
            return false;
        };

        match event {
            EngineEvent::StateChanged { backend, state } => {
                if *backend != active {
                    return false;
                }
                match state {
                    EngineState::Playing => {
                        self.state.phase = PlaybackPhase::Playing;
                        if *backend == Backend::Remote {
                            self.start_remote_poll();
                        }
                    }
                    EngineState::Paused => {
                        self.state.phase = PlaybackPhase::Paused;
                        self.stop_remote_poll();
                    }
                    EngineState::Ended => {
                        // Leave the binding empty so re-selecting even the
                        // same song loads it again from the top.
                        self.stop_remote_poll();
                        self.bound = None;
                        self.state.active_backend = None;
                        self.state.phase = PlaybackPhase::Idle;
                    }
                }
                true
            }
            EngineEvent::Progress {
                backend,
                position_secs,
                duration_secs,
            } => {
                if *backend != active || self.bound.is_none() {
                    return false;
                }
                self.state.position_secs = *position_secs;
                if *duration_secs > 0.0 {
                    self.state.duration_secs = *duration_secs;
                }
                true
            }
            EngineEvent::Loaded {
                backend,
                song_id,
                duration_secs,
            } => {
                if *backend != active || !self.is_bound_to(song_id) {
                    return false;
                }
                if *duration_secs > 0.0 {
                    self.state.duration_secs = *duration_secs;
                }
                true
            }
            EngineEvent::LoadFailed {
                backend,
                song_id,
                reason,
            } => {
                if *backend != active || !self.is_bound_to(song_id) {
                    return false;
                }
                tracing::error!("Engine failed to load {song_id}: {reason}");
                self.stop_remote_poll();
                self.bound = None;
                self.state.active_backend = None;
                self.state.phase = PlaybackPhase::Idle;
                true
            }
        }
    }

    fn is_bound_to(&self, song_id: &str) -> bool {
        self.bound.as_ref().map(|b| b.id.as_str()) == Some(song_id)
    }

    /// Request-style toggle: dispatches play or pause to the live engine
    /// and waits for the engine's own state event to flip the phase.
    pub fn toggle_play_pause(&mut self) {
        let playing = self.state.is_playing();
        let Some(engine) = self.live_engine_mut() else {
            return;
        };
        if playing {
            engine.pause();
        } else {
            engine.play();
        }
    }

    /// Clamped when the duration is known, floor-clamped otherwise. The
    /// position is updated optimistically so the scrubber tracks the key
    /// press instead of the engine's round-trip.
    pub fn seek(&mut self, position_secs: f64) {
        let duration = self.state.duration_secs;
        let target = if duration > 0.0 {
            position_secs.clamp(0.0, duration)
        } else {
            position_secs.max(0.0)
        };
        let Some(engine) = self.live_engine_mut() else {
            return;
        };
        engine.seek(target);
        self.state.position_secs = target;
    }

    pub fn seek_relative(&mut self, delta_secs: f64) {
        let target = self.state.position_secs + delta_secs;
        self.seek(target);
    }

    pub fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        self.state.volume = volume;
        if let Some(engine) = self.local.as_mut() {
            engine.set_volume(volume);
        }
        if let Some(engine) = self.remote.as_mut() {
            engine.set_volume(volume);
        }
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.state.volume.saturating_add(5));
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.state.volume.saturating_sub(5));
    }

    /// UI tick: the local engine reports progress on every natural tick,
    /// which is also where its end-of-track detection lives.
    pub fn on_tick(&mut self) {
        if self.state.active_backend == Some(Backend::Local) && self.bound.is_some() {
            if let Some(engine) = self.local.as_mut() {
                engine.request_progress();
            }
        }
    }

    /// Poll timer fired. Guarded so a tick that was already in flight when
    /// the poll stopped cannot reach a torn-down engine.
    pub fn on_remote_poll(&mut self) {
        if self.state.active_backend == Some(Backend::Remote)
            && self.state.is_playing()
            && self.bound.is_some()
        {
            if let Some(engine) = self.remote.as_mut() {
                engine.request_progress();
            }
        }
    }

    /// Starting is idempotent: any earlier timer is aborted first, so two
    /// cannot run at once no matter how fast play/pause toggles.
    fn start_remote_poll(&mut self) {
        self.stop_remote_poll();
        let tx = self.tx.clone();
        self.poll_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(REMOTE_POLL_INTERVAL);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::RemotePoll).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop_remote_poll(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll_task.is_some()
    }

    /// Full teardown on quit: poll timer cancelled, both engines stopped.
    pub fn shutdown(&mut self) {
        self.stop_all();
        self.bound = None;
        self.state = PlaybackState {
            volume: self.state.volume,
            ..PlaybackState::default()
        };
    }
}
