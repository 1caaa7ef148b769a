use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which playback technology a song belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    Local,
    Remote,
}

impl Backend {
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Local => "Local",
            Backend::Remote => "YouTube",
        }
    }
}

/// The backend-specific media handle. Exactly one variant per song,
/// so a local song can never carry a video id and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayableRef {
    LocalPath(PathBuf),
    RemoteVideo(String),
}

/// One entry in the queue. Immutable once built; replacing a song
/// means replacing the queue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album_art: Option<String>,
    pub playable: PlayableRef,
}

impl Song {
    /// Build a local-file song. The id is derived from the path, which keeps
    /// it stable for the session and makes re-adding the same file idempotent.
    pub fn local(path: PathBuf, name: String, artist: String) -> Self {
        Self {
            id: format!("local:{}", path.display()),
            name,
            artist,
            album_art: None,
            playable: PlayableRef::LocalPath(path),
        }
    }

    /// Build a remote song from a YouTube video id.
    pub fn remote(video_id: String, name: String, artist: String, album_art: Option<String>) -> Self {
        Self {
            id: video_id.clone(),
            name,
            artist,
            album_art,
            playable: PlayableRef::RemoteVideo(video_id),
        }
    }

    pub fn backend(&self) -> Backend {
        match self.playable {
            PlayableRef::LocalPath(_) => Backend::Local,
            PlayableRef::RemoteVideo(_) => Backend::Remote,
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match &self.playable {
            PlayableRef::LocalPath(p) => Some(p.as_path()),
            PlayableRef::RemoteVideo(_) => None,
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        match &self.playable {
            PlayableRef::LocalPath(_) => None,
            PlayableRef::RemoteVideo(v) => Some(v.as_str()),
        }
    }
}
