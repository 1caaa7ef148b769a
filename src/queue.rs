use crate::song::Song;

/// Ordered list of songs plus the currently selected index.
///
/// Insertion order defines next/prev traversal. Duplicates by id are
/// disallowed on every mutation path: adding a song whose id is already
/// present re-selects the existing entry instead of growing the queue.
#[derive(Debug, Default)]
pub struct Queue {
    songs: Vec<Song>,
    current: Option<usize>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current.and_then(|i| self.songs.get(i))
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.songs.iter().position(|s| s.id == id)
    }

    /// Append songs in input order, skipping ids already queued. If nothing
    /// was selected beforehand, the first appended song becomes current.
    /// Returns how many songs were actually added.
    pub fn append(&mut self, songs: Vec<Song>) -> usize {
        let had_selection = self.current.is_some();
        let mut first_added = None;
        let mut added = 0;

        for song in songs {
            if self.position_of(&song.id).is_some() {
                continue;
            }
            self.songs.push(song);
            if first_added.is_none() {
                first_added = Some(self.songs.len() - 1);
            }
            added += 1;
        }

        if !had_selection {
            if let Some(idx) = first_added {
                self.current = Some(idx);
            }
        }
        added
    }

    /// Select by index. Out of bounds is a silent no-op.
    pub fn select_by_index(&mut self, index: usize) -> bool {
        if index < self.songs.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Single entry point for search and discover selection: re-select the
    /// existing entry when the id is already queued, otherwise insert right
    /// after the current song (or at the end when nothing is selected) and
    /// select the new entry.
    pub fn select_or_insert(&mut self, song: Song) {
        if let Some(existing) = self.position_of(&song.id) {
            self.current = Some(existing);
            return;
        }

        let insert_at = match self.current {
            Some(cur) => cur + 1,
            None => self.songs.len(),
        };
        self.songs.insert(insert_at, song);
        self.current = Some(insert_at);
    }

    /// Advance with wraparound. Empty queue is a no-op; with songs queued
    /// but nothing selected, lands on index 0.
    pub fn next(&mut self) {
        if self.songs.is_empty() {
            return;
        }
        self.current = Some(match self.current {
            Some(cur) => (cur + 1) % self.songs.len(),
            None => 0,
        });
    }

    /// Retreat with wraparound. Same empty/unselected handling as `next`.
    pub fn previous(&mut self) {
        if self.songs.is_empty() {
            return;
        }
        self.current = Some(match self.current {
            Some(cur) => (cur + self.songs.len() - 1) % self.songs.len(),
            None => 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn local(name: &str) -> Song {
        Song::local(
            PathBuf::from(format!("/music/{name}.mp3")),
            name.to_string(),
            "Test Artist".to_string(),
        )
    }

    fn remote(id: &str, name: &str) -> Song {
        Song::remote(id.to_string(), name.to_string(), "Test Channel".to_string(), None)
    }

    #[test]
    fn test_append_selects_first_when_nothing_selected() {
        let mut q = Queue::new();
        let added = q.append(vec![local("a"), local("b")]);
        assert_eq!(added, 2);
        assert_eq!(q.current_index(), Some(0));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_append_keeps_existing_selection() {
        let mut q = Queue::new();
        q.append(vec![local("a"), local("b")]);
        q.select_by_index(1);
        q.append(vec![local("c")]);
        assert_eq!(q.current_index(), Some(1));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn test_append_skips_duplicate_ids() {
        let mut q = Queue::new();
        q.append(vec![local("a")]);
        let added = q.append(vec![local("a"), local("b")]);
        assert_eq!(added, 1);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_select_by_index_out_of_bounds_is_noop() {
        let mut q = Queue::new();
        q.append(vec![local("a")]);
        let before = q.current_index();
        assert!(!q.select_by_index(5));
        assert_eq!(q.current_index(), before);
    }

    #[test]
    fn test_select_or_insert_existing_reselects_without_growth() {
        let mut q = Queue::new();
        q.append(vec![local("a"), local("b"), local("c")]);
        q.select_by_index(2);
        let dup = local("a");
        q.select_or_insert(dup);
        assert_eq!(q.len(), 3);
        assert_eq!(q.current_index(), Some(0));
    }

    #[test]
    fn test_select_or_insert_places_after_current() {
        let mut q = Queue::new();
        q.append(vec![local("a"), local("b"), local("c")]);
        q.select_by_index(0);
        q.select_or_insert(remote("xyz", "new"));
        assert_eq!(q.len(), 4);
        assert_eq!(q.current_index(), Some(1));
        assert_eq!(q.songs()[1].id, "xyz");
        assert_eq!(q.songs()[2].name, "b");
    }

    #[test]
    fn test_select_or_insert_on_empty_appends_and_selects() {
        let mut q = Queue::new();
        q.select_or_insert(remote("xyz", "new"));
        assert_eq!(q.len(), 1);
        assert_eq!(q.current_index(), Some(0));
    }

    #[test]
    fn test_next_previous_wraparound_is_bijective() {
        let mut q = Queue::new();
        q.append(vec![local("a"), local("b"), local("c")]);
        for start in 0..3 {
            q.select_by_index(start);
            q.next();
            q.previous();
            assert_eq!(q.current_index(), Some(start));
        }
    }

    #[test]
    fn test_next_wraps_to_start() {
        let mut q = Queue::new();
        q.append(vec![local("a"), local("b")]);
        q.select_by_index(1);
        q.next();
        assert_eq!(q.current_index(), Some(0));
    }

    #[test]
    fn test_previous_wraps_to_end() {
        let mut q = Queue::new();
        q.append(vec![local("a"), local("b")]);
        q.select_by_index(0);
        q.previous();
        assert_eq!(q.current_index(), Some(1));
    }

    #[test]
    fn test_next_previous_from_unselected_both_land_on_zero() {
        let mut q = Queue {
            songs: vec![local("a"), local("b"), local("c")],
            current: None,
        };
        q.next();
        assert_eq!(q.current_index(), Some(0));

        let mut q = Queue {
            songs: vec![local("a"), local("b"), local("c")],
            current: None,
        };
        q.previous();
        assert_eq!(q.current_index(), Some(0));
    }

    #[test]
    fn test_empty_queue_navigation_is_noop() {
        let mut q = Queue::new();
        q.next();
        q.previous();
        assert_eq!(q.current_index(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_single_song_next_wraps_to_itself() {
        let mut q = Queue::new();
        q.append(vec![local("solo")]);
        q.next();
        assert_eq!(q.current_index(), Some(0));
    }
}
