use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::process::{Child, Command};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::events::AppEvent;
use crate::player::traits::{EngineEvent, EngineState, PlaybackEngine};
use crate::song::{Backend, Song};

// request_id values for the poll round-trip; mpv echoes them back on
// the matching response line.
const REQ_TIME_POS: u64 = 1;
const REQ_DURATION: u64 = 2;
// observe_property id, reported as "id" on property-change events.
const OBS_PAUSE: u64 = 1;

/// YouTube playback through an idle mpv process driven over its JSON IPC
/// socket. One line in, one JSON message out; a reader task translates
/// mpv events into `EngineEvent`s and a writer task serializes commands.
pub struct RemoteEngine {
    _child: Child,
    socket_path: PathBuf,
    cmd_tx: UnboundedSender<String>,
    /// Song id the last `load` bound, shared with the reader task so
    /// load events carry the right identity.
    current_song: Arc<Mutex<Option<String>>>,
    volume: u8,
}

impl RemoteEngine {
    /// Starts mpv and connects to its IPC socket. A spawn failure means
    /// mpv is not installed; the caller degrades remote playback to
    /// unavailable instead of aborting.
    pub async fn spawn(tx: UnboundedSender<AppEvent>) -> Result<Self> {
        let socket_path =
            std::env::temp_dir().join(format!("tarang-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let child = Command::new("mpv")
            .arg("--idle=yes")
            .arg("--no-video")
            .arg("--no-terminal")
            .arg("--volume=80")
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .context("Failed to start mpv (is it installed and on PATH?)")?;

        // mpv creates the socket shortly after startup; retry the connect
        // rather than racing it.
        let stream = Self::connect_with_retry(&socket_path).await?;
        let (read_half, write_half) = stream.into_split();

        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(async move {
            let mut writer = write_half;
            while let Some(line) = cmd_rx.recv().await {
                if writer.write_all(line.as_bytes()).await.is_err() {
                    break;
                }
            }
        });

        let current_song = Arc::new(Mutex::new(None));
        tokio::spawn(Self::read_events(read_half, tx, Arc::clone(&current_song)));

        let engine = Self {
            _child: child,
            socket_path,
            cmd_tx,
            current_song,
            volume: 80,
        };
        engine.send_cmd(json!({ "command": ["observe_property", OBS_PAUSE, "pause"] }))?;
        Ok(engine)
    }

    async fn connect_with_retry(socket_path: &PathBuf) -> Result<UnixStream> {
        for _ in 0..40 {
            match UnixStream::connect(socket_path).await {
                Ok(stream) => return Ok(stream),
                Err(_) => tokio::time::sleep(Duration::from_millis(50)).await,
            }
        }
        Err(anyhow!(
            "mpv IPC socket never appeared at {}",
            socket_path.display()
        ))
    }

    fn send_cmd(&self, cmd: Value) -> Result<()> {
        self.cmd_tx
            .send(format!("{cmd}\n"))
            .map_err(|_| anyhow!("mpv control channel closed"))
    }

    fn send_cmd_quiet(&self, cmd: Value) {
        if self.send_cmd(cmd).is_err() {
            tracing::warn!("mpv command dropped, connection lost");
        }
    }

    fn bound_song_id(current_song: &Arc<Mutex<Option<String>>>) -> Option<String> {
        current_song.lock().ok().and_then(|guard| guard.clone())
    }

    /// Translates the mpv event stream. `file_active` gates pause-property
    /// reports so the idle process never looks like it is playing.
    async fn read_events(
        read_half: tokio::net::unix::OwnedReadHalf,
        tx: UnboundedSender<AppEvent>,
        current_song: Arc<Mutex<Option<String>>>,
    ) {
        let send = |event: EngineEvent| {
            let _ = tx.send(AppEvent::Engine(event));
        };

        let mut file_active = false;
        let mut duration_cache = 0.0_f64;

        let mut reader = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = reader.next_line().await {
            let Ok(msg) = serde_json::from_str::<Value>(&line) else {
                continue;
            };

            if let Some(event) = msg.get("event").and_then(Value::as_str) {
                match event {
                    "start-file" => {
                        file_active = true;
                        duration_cache = 0.0;
                    }
                    "file-loaded" => {
                        if let Some(song_id) = Self::bound_song_id(&current_song) {
                            send(EngineEvent::Loaded {
                                backend: Backend::Remote,
                                song_id,
                                duration_secs: 0.0,
                            });
                        }
                        // Loads always start unpaused, and mpv only reports
                        // pause *changes*, so announce playback here.
                        send(EngineEvent::StateChanged {
                            backend: Backend::Remote,
                            state: EngineState::Playing,
                        });
                    }
                    "end-file" => {
                        file_active = false;
                        match msg.get("reason").and_then(Value::as_str) {
                            Some("eof") => send(EngineEvent::StateChanged {
                                backend: Backend::Remote,
                                state: EngineState::Ended,
                            }),
                            Some("error") => {
                                if let Some(song_id) = Self::bound_song_id(&current_song) {
                                    let reason = msg
                                        .get("file_error")
                                        .and_then(Value::as_str)
                                        .unwrap_or("playback error")
                                        .to_string();
                                    send(EngineEvent::LoadFailed {
                                        backend: Backend::Remote,
                                        song_id,
                                        reason,
                                    });
                                }
                            }
                            // "stop" and friends are our own teardown
                            _ => {}
                        }
                    }
                    "property-change" => {
                        let is_pause = msg.get("id").and_then(Value::as_u64) == Some(OBS_PAUSE);
                        if is_pause && file_active {
                            if let Some(paused) = msg.get("data").and_then(Value::as_bool) {
                                send(EngineEvent::StateChanged {
                                    backend: Backend::Remote,
                                    state: if paused {
                                        EngineState::Paused
                                    } else {
                                        EngineState::Playing
                                    },
                                });
                            }
                        }
                    }
                    _ => {}
                }
                continue;
            }

            // Poll responses; duration is requested first so the cache is
            // fresh when the time-pos answer produces the Progress event.
            match msg.get("request_id").and_then(Value::as_u64) {
                Some(REQ_DURATION) => {
                    if let Some(secs) = msg.get("data").and_then(Value::as_f64) {
                        duration_cache = secs;
                    }
                }
                Some(REQ_TIME_POS) => {
                    if let Some(secs) = msg.get("data").and_then(Value::as_f64) {
                        send(EngineEvent::Progress {
                            backend: Backend::Remote,
                            position_secs: secs,
                            duration_secs: duration_cache,
                        });
                    }
                }
                _ => {}
            }
        }
        tracing::info!("mpv event stream closed");
    }
}

impl PlaybackEngine for RemoteEngine {
    fn backend(&self) -> Backend {
        Backend::Remote
    }

    fn load(&mut self, song: &Song) -> Result<()> {
        let video_id = song.video_id().context("Song has no video id")?;
        let url = format!("https://www.youtube.com/watch?v={video_id}");

        if let Ok(mut guard) = self.current_song.lock() {
            *guard = Some(song.id.clone());
        }
        self.send_cmd(json!({ "command": ["loadfile", url, "replace"] }))?;
        self.send_cmd(json!({ "command": ["set_property", "pause", false] }))?;
        self.send_cmd(json!({ "command": ["set_property", "volume", self.volume] }))?;
        Ok(())
    }

    fn play(&mut self) {
        self.send_cmd_quiet(json!({ "command": ["set_property", "pause", false] }));
    }

    fn pause(&mut self) {
        self.send_cmd_quiet(json!({ "command": ["set_property", "pause", true] }));
    }

    fn stop(&mut self) {
        if let Ok(mut guard) = self.current_song.lock() {
            *guard = None;
        }
        self.send_cmd_quiet(json!({ "command": ["stop"] }));
    }

    fn seek(&mut self, position_secs: f64) {
        self.send_cmd_quiet(json!({ "command": ["seek", position_secs, "absolute"] }));
    }

    fn request_progress(&mut self) {
        self.send_cmd_quiet(json!({
            "command": ["get_property", "duration"],
            "request_id": REQ_DURATION,
        }));
        self.send_cmd_quiet(json!({
            "command": ["get_property", "time-pos"],
            "request_id": REQ_TIME_POS,
        }));
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        self.send_cmd_quiet(json!({ "command": ["set_property", "volume", self.volume] }));
    }
}

impl Drop for RemoteEngine {
    fn drop(&mut self) {
        // kill_on_drop reaps the process; the socket file is ours to clean.
        let _ = std::fs::remove_file(&self.socket_path);
    }
}
