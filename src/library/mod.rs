use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::song::Song;

pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "flac", "wav", "ogg", "m4a", "aac"];

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Build a song from a filename alone, no tag reading. "Artist - Title.mp3"
/// splits into artist and title; anything else keeps the stem as the title
/// with "Unknown Artist".
pub fn song_from_path(path: &Path) -> Song {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown");

    let (artist, name) = match stem.split_once(" - ") {
        Some((artist, title)) => (artist.trim().to_string(), title.trim().to_string()),
        None => ("Unknown Artist".to_string(), stem.trim().to_string()),
    };

    Song::local(path.to_path_buf(), name, artist)
}

/// Recursive scan of the music directory, audio files only, dotfiles
/// skipped, sorted by title for the library view.
pub fn scan_music_directory(dir: &Path) -> Vec<Song> {
    if !dir.is_dir() {
        tracing::info!("Music directory {} does not exist, skipping scan", dir.display());
        return Vec::new();
    }

    let mut songs: Vec<Song> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .map(|e| e.into_path())
        .filter(|p| is_audio_file(p))
        .map(|p| song_from_path(&p))
        .collect();

    songs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    tracing::info!("Library scan found {} songs under {}", songs.len(), dir.display());
    songs
}

/// The CLI upload path: user-supplied files, filtered to audio, in the
/// order they were given.
pub fn songs_from_files(paths: &[PathBuf]) -> Vec<Song> {
    paths
        .iter()
        .filter(|p| {
            let audio = is_audio_file(p);
            if !audio {
                tracing::warn!("Skipping non-audio file {}", p.display());
            }
            audio
        })
        .map(|p| song_from_path(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_title_filename_splits() {
        let song = song_from_path(Path::new("/music/Artist - Title.mp3"));
        assert_eq!(song.name, "Title");
        assert_eq!(song.artist, "Artist");
    }

    #[test]
    fn test_plain_filename_falls_back_to_unknown_artist() {
        let song = song_from_path(Path::new("/music/JustATitle.wav"));
        assert_eq!(song.name, "JustATitle");
        assert_eq!(song.artist, "Unknown Artist");
    }

    #[test]
    fn test_separator_whitespace_is_trimmed() {
        let song = song_from_path(Path::new("/music/ Some Band  -  A Song .flac"));
        assert_eq!(song.artist, "Some Band");
        assert_eq!(song.name, "A Song");
    }

    #[test]
    fn test_audio_extension_filter() {
        assert!(is_audio_file(Path::new("a.mp3")));
        assert!(is_audio_file(Path::new("b.FLAC")));
        assert!(!is_audio_file(Path::new("c.txt")));
        assert!(!is_audio_file(Path::new("noext")));
    }

    #[test]
    fn test_cli_files_keep_input_order_and_drop_non_audio() {
        let songs = songs_from_files(&[
            PathBuf::from("/tmp/Artist - Title.mp3"),
            PathBuf::from("/tmp/readme.txt"),
            PathBuf::from("/tmp/JustATitle.wav"),
        ]);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].name, "Title");
        assert_eq!(songs[1].name, "JustATitle");
    }
}
