//! Query, filter, search and statistics helpers
//!
//! Pure functions over an assembled [`Collection`]. Results borrow from the
//! collection and follow its document order; nothing here mutates state.

use chrono::NaiveDate;

use crate::model::{Collection, Track};

/// Criteria for [`filter_tracks`]. Unset criteria impose no constraint;
/// set criteria are combined with AND.
///
/// Genre and key are exact matches, case-insensitively (matching the source
/// software's behavior); artist and kind are case-insensitive substring
/// matches; ranges are inclusive on both bounds.
///
/// ```
/// use rekordbox_collection_reader::TrackFilter;
///
/// let filter = TrackFilter::new()
///     .genre("Techno")
///     .bpm_range(138.0, 142.0)
///     .min_play_count(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrackFilter {
    genre: Option<String>,
    bpm_range: Option<(f64, f64)>,
    key: Option<String>,
    artist: Option<String>,
    min_play_count: Option<u32>,
    date_range: Option<(NaiveDate, NaiveDate)>,
    kind: Option<String>,
}

impl TrackFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact genre match (case-insensitive)
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// BPM range, inclusive on both bounds
    pub fn bpm_range(mut self, low: f64, high: f64) -> Self {
        self.bpm_range = Some((low, high));
        self
    }

    /// Exact musical key match (case-insensitive)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Case-insensitive substring match on the artist name
    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn min_play_count(mut self, count: u32) -> Self {
        self.min_play_count = Some(count);
        self
    }

    /// Date-added range, inclusive on both bounds
    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_range = Some((from, to));
        self
    }

    /// Case-insensitive substring match on the file kind, e.g. "WAV"
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    fn matches(&self, track: &Track) -> bool {
        if let Some(genre) = &self.genre {
            match &track.genre {
                Some(g) if g.eq_ignore_ascii_case(genre) => {}
                _ => return false,
            }
        }
        if let Some((low, high)) = self.bpm_range {
            match track.bpm {
                Some(bpm) if low <= bpm && bpm <= high => {}
                _ => return false,
            }
        }
        if let Some(key) = &self.key {
            match &track.key {
                Some(k) if k.eq_ignore_ascii_case(key) => {}
                _ => return false,
            }
        }
        if let Some(artist) = &self.artist {
            if !contains_ignore_case(&track.artist, artist) {
                return false;
            }
        }
        if let Some(min) = self.min_play_count {
            if track.play_count < min {
                return false;
            }
        }
        if let Some((from, to)) = self.date_range {
            match track.date_added {
                Some(date) if from <= date && date <= to => {}
                _ => return false,
            }
        }
        if let Some(kind) = &self.kind {
            if !contains_ignore_case(&track.kind, kind) {
                return false;
            }
        }
        true
    }
}

/// Tracks matching every set criterion, in collection order
pub fn filter_tracks<'a>(collection: &'a Collection, filter: &TrackFilter) -> Vec<&'a Track> {
    collection
        .tracks()
        .filter(|track| filter.matches(track))
        .collect()
}

/// Case-insensitive substring search across name, artist and album
pub fn search<'a>(collection: &'a Collection, query: &str) -> Vec<&'a Track> {
    let query = query.to_lowercase();
    collection
        .tracks()
        .filter(|track| {
            track.name.to_lowercase().contains(&query)
                || track.artist.to_lowercase().contains(&query)
                || track.album.to_lowercase().contains(&query)
        })
        .collect()
}

/// Tracks of the first playlist with the given name under a pre-order
/// traversal, or `None` when no playlist matches. An existing but empty
/// playlist returns `Some` with an empty list.
pub fn get_playlist<'a>(collection: &'a Collection, name: &str) -> Option<Vec<&'a Track>> {
    let playlist = collection.playlists().find_playlist(name)?;
    Some(
        playlist
            .track_ids()
            .iter()
            .filter_map(|&id| collection.get_track(id))
            .collect(),
    )
}

/// Names of every playlist (folders excluded), pre-order
pub fn get_playlist_names(collection: &Collection) -> Vec<&str> {
    collection
        .playlists()
        .iter_playlists()
        .map(|playlist| playlist.name())
        .collect()
}

/// Track counts per genre; tracks without a genre are excluded
pub fn genre_counts(collection: &Collection) -> Vec<(String, usize)> {
    count_by(collection.tracks().filter_map(|track| track.genre.clone()))
}

/// Track counts per exact BPM value; tracks without a BPM are excluded
pub fn bpm_distribution(collection: &Collection) -> Vec<(f64, usize)> {
    count_by(collection.tracks().filter_map(|track| track.bpm))
}

/// Track counts per musical key; tracks without a key are excluded
pub fn key_distribution(collection: &Collection) -> Vec<(String, usize)> {
    count_by(collection.tracks().filter_map(|track| track.key.clone()))
}

/// Artists with their track counts, most tracks first
pub fn artists_by_track_count(collection: &Collection) -> Vec<(String, usize)> {
    count_by(collection.tracks().map(|track| track.artist.clone()))
}

/// Frequency count preserving first-seen order, then sorted by count
/// descending. The sort is stable, so tied counts keep document order.
fn count_by<K: PartialEq>(items: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(key, _)| *key == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_orders_ties_by_first_seen() {
        let counts = count_by(["b", "a", "a", "c"].into_iter());
        assert_eq!(counts, vec![("a", 2), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Charlotte de Witte", "WITTE"));
        assert!(contains_ignore_case("Charlotte de Witte", "witte"));
        assert!(!contains_ignore_case("Charlotte de Witte", "beyer"));
    }
}
