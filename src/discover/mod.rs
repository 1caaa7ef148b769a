use rand::seq::SliceRandom;

use crate::song::{Backend, Song};

/// Keyword buckets checked in order; a song lands in the first genre
/// whose keyword appears in its lowercased "name artist" string.
pub const GENRE_KEYWORDS: [(&str, &[&str]); 6] = [
    (
        "Electronic",
        &["electro", "techno", "house", "edm", "dance", "trance"],
    ),
    ("Rock", &["rock", "metal", "punk", "alternative", "indie"]),
    ("Chill", &["chill", "ambient", "lofi", "acoustic", "instrumental"]),
    ("Hip Hop", &["hip hop", "rap", "trap"]),
    ("Pop", &["pop", "synthpop"]),
    ("Classical", &["classical", "orchestra", "symphony"]),
];

pub fn classify(song: &Song) -> Option<&'static str> {
    let identifier = format!("{} {}", song.name, song.artist).to_lowercase();
    GENRE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| identifier.contains(kw)))
        .map(|(genre, _)| *genre)
}

#[derive(Debug, Clone)]
pub struct Station {
    pub genre: &'static str,
    pub songs: Vec<Song>,
}

/// Genre stations over the local songs in the pool, fixed genre order,
/// empty stations dropped. Recomputed when the pool changes, not per frame.
pub fn build_stations(pool: &[Song]) -> Vec<Station> {
    let mut stations: Vec<Station> = GENRE_KEYWORDS
        .iter()
        .map(|(genre, _)| Station {
            genre,
            songs: Vec::new(),
        })
        .collect();

    for song in pool.iter().filter(|s| s.backend() == Backend::Local) {
        if let Some(genre) = classify(song) {
            if let Some(station) = stations.iter_mut().find(|st| st.genre == genre) {
                station.songs.push(song.clone());
            }
        }
    }

    stations.retain(|st| !st.songs.is_empty());
    stations
}

/// Up to ten local songs, shuffled, for the "For You" shelf.
pub fn for_you(pool: &[Song]) -> Vec<Song> {
    let locals: Vec<&Song> = pool
        .iter()
        .filter(|s| s.backend() == Backend::Local)
        .collect();
    let mut rng = rand::thread_rng();
    locals
        .choose_multiple(&mut rng, 10)
        .map(|s| (*s).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn local(name: &str, artist: &str) -> Song {
        Song::local(
            PathBuf::from(format!("/music/{name}.mp3")),
            name.to_string(),
            artist.to_string(),
        )
    }

    #[test]
    fn test_classify_matches_keywords() {
        assert_eq!(classify(&local("Techno Dreams", "DJ X")), Some("Electronic"));
        assert_eq!(classify(&local("Moonlight Sonata", "Orchestra Y")), Some("Classical"));
        assert_eq!(classify(&local("Plain Song", "Someone")), None);
    }

    #[test]
    fn test_classify_first_match_wins() {
        // "dance" (Electronic) is checked before "pop" (Pop)
        assert_eq!(classify(&local("Dance Pop Anthem", "Band")), Some("Electronic"));
    }

    #[test]
    fn test_classify_uses_artist_too() {
        assert_eq!(classify(&local("Untitled", "Lofi Collective")), Some("Chill"));
    }

    #[test]
    fn test_stations_skip_remote_and_empty_genres() {
        let pool = vec![
            local("Heavy Metal Thunder", "Band"),
            Song::remote("vid1".into(), "Techno Hit".into(), "Channel".into(), None),
        ];
        let stations = build_stations(&pool);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].genre, "Rock");
        assert_eq!(stations[0].songs.len(), 1);
    }

    #[test]
    fn test_for_you_caps_at_ten_locals() {
        let mut pool: Vec<Song> = (0..25).map(|i| local(&format!("song{i}"), "a")).collect();
        pool.push(Song::remote("vid".into(), "remote".into(), "c".into(), None));
        let picks = for_you(&pool);
        assert_eq!(picks.len(), 10);
        assert!(picks.iter().all(|s| s.backend() == Backend::Local));
    }
}
