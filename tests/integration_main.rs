use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use tarang::api::{ApiError, YoutubeClient};
use tarang::app::events::AppEvent;
use tarang::library;
use tarang::player::{Coordinator, EngineEvent, EngineState, PlaybackEngine, PlaybackPhase};
use tarang::queue::Queue;
use tarang::song::{Backend, Song};

/// What a fake engine was told to do, in dispatch order.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(String),
    Play,
    Pause,
    Stop,
    Seek(u64), // millis, keeps the variant comparable
    SetVolume(u8),
    RequestProgress,
}

type CallLog = Arc<Mutex<Vec<(Backend, Call)>>>;

/// Engine double that records commands instead of making noise.
struct RecordingEngine {
    backend: Backend,
    log: CallLog,
}

impl RecordingEngine {
    fn boxed(backend: Backend, log: &CallLog) -> Box<dyn PlaybackEngine> {
        Box::new(Self {
            backend,
            log: Arc::clone(log),
        })
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push((self.backend, call));
    }
}

impl PlaybackEngine for RecordingEngine {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn load(&mut self, song: &Song) -> anyhow::Result<()> {
        self.record(Call::Load(song.id.clone()));
        Ok(())
    }

    fn play(&mut self) {
        self.record(Call::Play);
    }

    fn pause(&mut self) {
        self.record(Call::Pause);
    }

    fn stop(&mut self) {
        self.record(Call::Stop);
    }

    fn seek(&mut self, position_secs: f64) {
        self.record(Call::Seek((position_secs * 1000.0).round() as u64));
    }

    fn request_progress(&mut self) {
        self.record(Call::RequestProgress);
    }

    fn set_volume(&mut self, volume: u8) {
        self.record(Call::SetVolume(volume));
    }
}

fn local_song(name: &str) -> Song {
    Song::local(
        PathBuf::from(format!("/music/{name}.mp3")),
        name.to_string(),
        "Artist".to_string(),
    )
}

fn remote_song(id: &str, name: &str) -> Song {
    Song::remote(id.to_string(), name.to_string(), "Channel".to_string(), None)
}

/// Coordinator wired to two recording engines and a live event channel.
fn rig() -> (Coordinator, CallLog, UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let coordinator = Coordinator::new(
        Some(RecordingEngine::boxed(Backend::Local, &log)),
        Some(RecordingEngine::boxed(Backend::Remote, &log)),
        tx,
    );
    (coordinator, log, rx)
}

fn playing(backend: Backend) -> EngineEvent {
    EngineEvent::StateChanged {
        backend,
        state: EngineState::Playing,
    }
}

#[test]
fn test_engine_swap_silences_old_engine_first() {
    let (mut coordinator, log, _rx) = rig();
    let mut queue = Queue::new();
    queue.append(vec![local_song("a"), remote_song("vid-b", "b")]);

    // Song A is local and mid-flight.
    coordinator.sync_selection(queue.current_song()).unwrap();
    assert!(coordinator.on_engine_event(&playing(Backend::Local)));
    assert!(coordinator.on_engine_event(&EngineEvent::Progress {
        backend: Backend::Local,
        position_secs: 42.0,
        duration_secs: 180.0,
    }));
    assert_eq!(coordinator.snapshot().position_secs, 42.0);

    log.lock().unwrap().clear();
    queue.next();
    coordinator.sync_selection(queue.current_song()).unwrap();

    // Local went quiet before the remote load was dispatched.
    let calls = log.lock().unwrap().clone();
    let local_stop = calls
        .iter()
        .position(|(b, c)| *b == Backend::Local && *c == Call::Stop)
        .expect("local engine was never stopped");
    let remote_load = calls
        .iter()
        .position(|(b, c)| *b == Backend::Remote && matches!(c, Call::Load(_)))
        .expect("remote engine never got the load");
    assert!(local_stop < remote_load);

    // Progress reset with the swap, and nothing is playing yet.
    let snap = coordinator.snapshot();
    assert_eq!(snap.active_backend, Some(Backend::Remote));
    assert_eq!(snap.phase, PlaybackPhase::Loading);
    assert_eq!(snap.position_secs, 0.0);
    assert_eq!(snap.duration_secs, 0.0);
}

#[test]
fn test_commands_are_requests_until_the_engine_confirms() {
    let (mut coordinator, log, _rx) = rig();
    let song = local_song("a");

    coordinator.sync_selection(Some(&song)).unwrap();
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Loading);
    assert!(!coordinator.snapshot().is_playing());

    // Only the engine's own report flips the phase.
    assert!(coordinator.on_engine_event(&playing(Backend::Local)));
    assert!(coordinator.snapshot().is_playing());

    // Toggling dispatches a pause but does not assume it happened.
    coordinator.toggle_play_pause();
    assert!(coordinator.snapshot().is_playing());
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .any(|(b, c)| *b == Backend::Local && *c == Call::Pause));

    assert!(coordinator.on_engine_event(&EngineEvent::StateChanged {
        backend: Backend::Local,
        state: EngineState::Paused,
    }));
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Paused);
}

#[test]
fn test_stale_load_completions_are_dropped() {
    let (mut coordinator, _log, _rx) = rig();
    let song_a = local_song("a");
    let song_b = local_song("b");

    coordinator.sync_selection(Some(&song_a)).unwrap();
    // User skipped ahead before A finished loading.
    coordinator.sync_selection(Some(&song_b)).unwrap();

    // A's late completion and failure must both bounce off.
    assert!(!coordinator.on_engine_event(&EngineEvent::Loaded {
        backend: Backend::Local,
        song_id: song_a.id.clone(),
        duration_secs: 240.0,
    }));
    assert!(!coordinator.on_engine_event(&EngineEvent::LoadFailed {
        backend: Backend::Local,
        song_id: song_a.id.clone(),
        reason: "decode error".to_string(),
    }));
    let snap = coordinator.snapshot();
    assert_eq!(snap.phase, PlaybackPhase::Loading);
    assert_eq!(snap.duration_secs, 0.0);

    // B's completion lands.
    assert!(coordinator.on_engine_event(&EngineEvent::Loaded {
        backend: Backend::Local,
        song_id: song_b.id.clone(),
        duration_secs: 240.0,
    }));
    assert_eq!(coordinator.snapshot().duration_secs, 240.0);
}

#[test]
fn test_load_failure_parks_the_transport_idle() {
    let (mut coordinator, _log, _rx) = rig();
    let song = remote_song("vid-a", "a");

    coordinator.sync_selection(Some(&song)).unwrap();
    assert!(coordinator.on_engine_event(&EngineEvent::LoadFailed {
        backend: Backend::Remote,
        song_id: song.id.clone(),
        reason: "video unavailable".to_string(),
    }));

    let snap = coordinator.snapshot();
    assert_eq!(snap.phase, PlaybackPhase::Idle);
    assert_eq!(snap.active_backend, None);
}

#[test]
fn test_ended_clears_binding_so_the_same_song_reloads() {
    let (mut coordinator, log, _rx) = rig();
    let mut queue = Queue::new();
    queue.append(vec![local_song("only")]);

    coordinator.sync_selection(queue.current_song()).unwrap();
    assert!(coordinator.on_engine_event(&EngineEvent::StateChanged {
        backend: Backend::Local,
        state: EngineState::Ended,
    }));
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Idle);

    // Single-song queue: next() wraps straight back around.
    queue.next();
    assert_eq!(queue.current_index(), Some(0));
    coordinator.sync_selection(queue.current_song()).unwrap();

    let loads = log
        .lock()
        .unwrap()
        .iter()
        .filter(|(b, c)| *b == Backend::Local && matches!(c, Call::Load(_)))
        .count();
    assert_eq!(loads, 2);
}

#[tokio::test]
async fn test_remote_poll_follows_the_playing_state() {
    let (mut coordinator, _log, mut rx) = rig();
    let song = remote_song("vid-a", "a");

    coordinator.sync_selection(Some(&song)).unwrap();
    assert!(!coordinator.is_polling());

    coordinator.on_engine_event(&playing(Backend::Remote));
    assert!(coordinator.is_polling());

    // The timer must actually fire.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let mut saw_poll = false;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, AppEvent::RemotePoll) {
            saw_poll = true;
        }
    }
    assert!(saw_poll);

    // Pause stops it, resume restarts it, teardown kills it.
    coordinator.on_engine_event(&EngineEvent::StateChanged {
        backend: Backend::Remote,
        state: EngineState::Paused,
    });
    assert!(!coordinator.is_polling());

    coordinator.on_engine_event(&playing(Backend::Remote));
    assert!(coordinator.is_polling());

    coordinator.shutdown();
    assert!(!coordinator.is_polling());
}

#[tokio::test]
async fn test_poll_stops_on_song_change() {
    let (mut coordinator, _log, _rx) = rig();

    coordinator
        .sync_selection(Some(&remote_song("vid-a", "a")))
        .unwrap();
    coordinator.on_engine_event(&playing(Backend::Remote));
    assert!(coordinator.is_polling());

    // Swapping to a local song must not leave the remote timer running.
    coordinator.sync_selection(Some(&local_song("b"))).unwrap();
    assert!(!coordinator.is_polling());
}

#[test]
fn test_empty_queue_transport_is_inert() {
    let (mut coordinator, log, _rx) = rig();
    let mut queue = Queue::new();

    queue.next();
    queue.previous();
    assert_eq!(queue.current_index(), None);

    coordinator.sync_selection(queue.current_song()).unwrap();
    coordinator.toggle_play_pause();
    coordinator.seek(30.0);
    coordinator.on_tick();

    assert!(log.lock().unwrap().is_empty());
    let snap = coordinator.snapshot();
    assert_eq!(snap.phase, PlaybackPhase::Idle);
    assert_eq!(snap.active_backend, None);
}

#[test]
fn test_seek_is_optimistic_and_clamped() {
    let (mut coordinator, log, _rx) = rig();
    let song = local_song("a");

    coordinator.sync_selection(Some(&song)).unwrap();
    coordinator.on_engine_event(&EngineEvent::Loaded {
        backend: Backend::Local,
        song_id: song.id.clone(),
        duration_secs: 100.0,
    });
    coordinator.on_engine_event(&playing(Backend::Local));

    // Past the end clamps to the duration, and the snapshot moves before
    // any engine confirmation.
    coordinator.seek(150.0);
    assert_eq!(coordinator.snapshot().position_secs, 100.0);
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .any(|(b, c)| *b == Backend::Local && *c == Call::Seek(100_000)));

    coordinator.seek_relative(-30.0);
    assert_eq!(coordinator.snapshot().position_secs, 70.0);

    coordinator.seek(-5.0);
    assert_eq!(coordinator.snapshot().position_secs, 0.0);
}

#[test]
fn test_volume_steps_clamp_and_reach_both_engines() {
    let (mut coordinator, log, _rx) = rig();

    coordinator.set_volume(98);
    coordinator.volume_up();
    assert_eq!(coordinator.snapshot().volume, 100);
    coordinator.volume_up();
    assert_eq!(coordinator.snapshot().volume, 100);

    for _ in 0..25 {
        coordinator.volume_down();
    }
    assert_eq!(coordinator.snapshot().volume, 0);

    // Both engines hear every change, live or not.
    let calls = log.lock().unwrap().clone();
    assert!(calls.contains(&(Backend::Local, Call::SetVolume(100))));
    assert!(calls.contains(&(Backend::Remote, Call::SetVolume(100))));
    assert!(calls.contains(&(Backend::Local, Call::SetVolume(0))));
    assert!(calls.contains(&(Backend::Remote, Call::SetVolume(0))));
}

#[test]
fn test_select_or_insert_plays_next_to_current() {
    let (mut coordinator, log, _rx) = rig();
    let mut queue = Queue::new();
    queue.append(vec![local_song("a"), local_song("b"), local_song("c")]);
    coordinator.sync_selection(queue.current_song()).unwrap();

    // A brand-new pick lands right after the current song and plays.
    let pick = remote_song("vid-x", "x");
    queue.select_or_insert(pick.clone());
    coordinator.sync_selection(queue.current_song()).unwrap();

    assert_eq!(queue.len(), 4);
    assert_eq!(queue.current_index(), Some(1));
    assert_eq!(queue.current_song().unwrap().id, pick.id);
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .any(|(b, c)| *b == Backend::Remote && *c == Call::Load(pick.id.clone())));

    // Re-picking something already queued moves the selection only.
    queue.select_or_insert(local_song("c"));
    assert_eq!(queue.len(), 4);
    assert_eq!(queue.current_song().unwrap().name, "c");
}

#[tokio::test]
async fn test_search_without_credential_is_blocking_and_harmless() {
    let client = YoutubeClient::new(reqwest::Client::new(), None);
    let mut queue = Queue::new();
    queue.append(vec![local_song("a")]);

    let err = client.search("lofi").await.unwrap_err();
    assert!(matches!(err, ApiError::MissingCredential));
    // The message carries its own remediation.
    let message = err.to_string();
    assert!(message.contains("youtube_api_key"));
    assert!(message.contains("YOUTUBE_API_KEY"));

    // Nothing about playback state changed.
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.current_index(), Some(0));
}

#[test]
fn test_cli_files_parse_and_first_becomes_selected() {
    let files = vec![
        PathBuf::from("/tmp/Nusrat Fateh Ali Khan - Tumhe Dillagi.mp3"),
        PathBuf::from("/tmp/rainy_day_demo.flac"),
        PathBuf::from("/tmp/notes.txt"),
    ];
    let songs = library::songs_from_files(&files);
    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0].artist, "Nusrat Fateh Ali Khan");
    assert_eq!(songs[0].name, "Tumhe Dillagi");
    assert_eq!(songs[1].artist, "Unknown Artist");
    assert_eq!(songs[1].name, "rainy_day_demo");

    let mut queue = Queue::new();
    let added = queue.append(songs);
    assert_eq!(added, 2);
    assert_eq!(queue.current_index(), Some(0));
}

#[test]
fn test_wraparound_traversal_returns_home() {
    let mut queue = Queue::new();
    queue.append(vec![local_song("a"), local_song("b"), local_song("c")]);

    for _ in 0..3 {
        queue.next();
    }
    assert_eq!(queue.current_index(), Some(0));

    queue.previous();
    assert_eq!(queue.current_index(), Some(2));
}
