use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::events::AppEvent;
use crate::player::traits::{EngineEvent, EngineState, PlaybackEngine};
use crate::song::{Backend, Song};

/// What the engine currently has loaded. Position is interpolated from a
/// monotonic anchor instead of asking the sink, which rodio cannot do.
struct BoundTrack {
    song_id: String,
    path: PathBuf,
    duration_secs: f64,
    /// Position accumulated up to the last play/seek anchor.
    base_secs: f64,
    /// Set while audio is flowing; None while paused.
    started: Option<Instant>,
}

impl BoundTrack {
    fn position_secs(&self) -> f64 {
        let mut pos = self.base_secs;
        if let Some(started) = self.started {
            pos += started.elapsed().as_secs_f64();
        }
        if self.duration_secs > 0.0 {
            pos = pos.min(self.duration_secs);
        }
        pos
    }
}

/// File playback through rodio. The output stream handle has to outlive
/// every sink, so the engine keeps it for its whole lifetime.
pub struct LocalEngine {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    bound: Option<BoundTrack>,
    volume: u8,
    tx: UnboundedSender<AppEvent>,
}

impl LocalEngine {
    /// Fails when no audio output device is available; the caller treats
    /// that as "local backend unavailable" rather than a fatal error.
    pub fn new(tx: UnboundedSender<AppEvent>) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open an audio output device")?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            bound: None,
            volume: 80,
            tx,
        })
    }

    fn send(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(event));
    }

    fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode {}", path.display()))
    }

    fn fresh_sink(&self) -> Result<Sink> {
        let sink = Sink::try_new(&self.handle).context("Failed to create audio sink")?;
        sink.set_volume(f32::from(self.volume) / 100.0);
        Ok(sink)
    }

    /// Decoders report duration for most formats; where they can't, probe
    /// the file tags off the event loop and report back as a `Loaded` event.
    fn probe_duration(&self, song_id: String, path: PathBuf) {
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            use lofty::file::AudioFile;
            match lofty::read_from_path(&path) {
                Ok(tagged) => {
                    let secs = tagged.properties().duration().as_secs_f64();
                    let _ = tx.send(AppEvent::Engine(EngineEvent::Loaded {
                        backend: Backend::Local,
                        song_id,
                        duration_secs: secs,
                    }));
                }
                Err(e) => {
                    tracing::warn!("Duration probe failed for {}: {e}", path.display());
                }
            }
        });
    }
}

impl PlaybackEngine for LocalEngine {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    fn load(&mut self, song: &Song) -> Result<()> {
        let path = song
            .local_path()
            .context("Song has no local file path")?
            .to_path_buf();

        self.stop();

        let decoder = Self::decode(&path)?;
        let duration_secs = decoder
            .total_duration()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        let sink = self.fresh_sink()?;
        sink.append(decoder);
        self.sink = Some(sink);
        self.bound = Some(BoundTrack {
            song_id: song.id.clone(),
            path: path.clone(),
            duration_secs,
            base_secs: 0.0,
            started: Some(Instant::now()),
        });

        if duration_secs > 0.0 {
            self.send(EngineEvent::Loaded {
                backend: Backend::Local,
                song_id: song.id.clone(),
                duration_secs,
            });
        } else {
            self.probe_duration(song.id.clone(), path);
        }
        self.send(EngineEvent::StateChanged {
            backend: Backend::Local,
            state: EngineState::Playing,
        });
        Ok(())
    }

    fn play(&mut self) {
        let Some(bound) = &mut self.bound else { return };
        if let Some(sink) = &self.sink {
            sink.play();
            if bound.started.is_none() {
                bound.started = Some(Instant::now());
            }
            self.send(EngineEvent::StateChanged {
                backend: Backend::Local,
                state: EngineState::Playing,
            });
        }
    }

    fn pause(&mut self) {
        let Some(bound) = &mut self.bound else { return };
        if let Some(sink) = &self.sink {
            sink.pause();
            if let Some(started) = bound.started.take() {
                bound.base_secs += started.elapsed().as_secs_f64();
            }
            self.send(EngineEvent::StateChanged {
                backend: Backend::Local,
                state: EngineState::Paused,
            });
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.bound = None;
    }

    /// Rodio sinks cannot rewind, so a seek decodes the file again and
    /// fast-forwards to the target before swapping sinks.
    fn seek(&mut self, position_secs: f64) {
        let Some(bound) = &mut self.bound else { return };
        let was_paused = self
            .sink
            .as_ref()
            .map(|s| s.is_paused())
            .unwrap_or(true);

        let source = match Self::decode(&bound.path) {
            Ok(decoder) => decoder.skip_duration(Duration::from_secs_f64(position_secs.max(0.0))),
            Err(e) => {
                tracing::warn!("Seek re-decode failed: {e:#}");
                return;
            }
        };

        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::error!("Seek sink rebuild failed: {e}");
                return;
            }
        };
        sink.set_volume(f32::from(self.volume) / 100.0);
        sink.append(source);
        if was_paused {
            sink.pause();
        }
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }

        bound.base_secs = position_secs.max(0.0);
        bound.started = if was_paused { None } else { Some(Instant::now()) };
    }

    fn request_progress(&mut self) {
        if self.bound.is_none() {
            return;
        }

        // An empty sink means the decoder ran out: the track finished.
        if self.sink.as_ref().map(|s| s.empty()).unwrap_or(false) {
            self.sink = None;
            self.bound = None;
            self.send(EngineEvent::StateChanged {
                backend: Backend::Local,
                state: EngineState::Ended,
            });
            return;
        }

        if let Some(bound) = &self.bound {
            self.send(EngineEvent::Progress {
                backend: Backend::Local,
                position_secs: bound.position_secs(),
                duration_secs: bound.duration_secs,
            });
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if let Some(sink) = &self.sink {
            sink.set_volume(f32::from(self.volume) / 100.0);
        }
    }
}
