use std::collections::HashMap;

use serde::Serialize;

use super::{PlaylistNode, Track};

/// The complete parsed collection: all tracks plus the playlist tree.
///
/// Built once by the parser and read-only afterwards. Tracks keep their
/// document order; lookups by id go through an internal index. The value is
/// freely shareable across readers since nothing mutates it post-parse.
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    product_name: String,
    product_version: String,
    tracks: Vec<Track>,
    #[serde(skip)]
    by_id: HashMap<u32, usize>,
    playlists: PlaylistNode,
}

impl Collection {
    pub(crate) fn new(
        product_name: String,
        product_version: String,
        tracks: Vec<Track>,
        playlists: PlaylistNode,
    ) -> Self {
        let by_id = tracks
            .iter()
            .enumerate()
            .map(|(idx, track)| (track.id, idx))
            .collect();
        Self {
            product_name,
            product_version,
            tracks,
            by_id,
            playlists,
        }
    }

    /// Software name from the `PRODUCT` element, "rekordbox" when absent
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Software version from the `PRODUCT` element
    pub fn product_version(&self) -> &str {
        &self.product_version
    }

    /// All tracks in document order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Look up a track by its `TrackID`
    pub fn get_track(&self, id: u32) -> Option<&Track> {
        self.by_id.get(&id).map(|&idx| &self.tracks[idx])
    }

    pub fn contains_track(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Root of the playlist tree
    pub fn playlists(&self) -> &PlaylistNode {
        &self.playlists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlaylistNode, Track};

    fn track(id: u32, name: &str) -> Track {
        Track {
            id,
            name: name.to_string(),
            artist: String::new(),
            album: String::new(),
            genre: None,
            bpm: None,
            key: None,
            duration_secs: 0,
            location: String::new(),
            date_added: None,
            play_count: 0,
            rating: 0,
            kind: String::new(),
            size: 0,
            bit_rate: 0,
            sample_rate: 0,
            comments: String::new(),
            label: String::new(),
            remixer: String::new(),
            composer: String::new(),
            grouping: String::new(),
            mix: String::new(),
            year: 0,
            disc_number: 0,
            track_number: 0,
            tempos: Vec::new(),
            cue_points: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_and_order() {
        let collection = Collection::new(
            "rekordbox".to_string(),
            "6.8.5".to_string(),
            vec![track(7, "first"), track(2, "second")],
            PlaylistNode::folder("ROOT".to_string(), Vec::new()),
        );

        assert_eq!(collection.track_count(), 2);
        assert_eq!(collection.get_track(7).unwrap().name, "first");
        assert_eq!(collection.get_track(2).unwrap().name, "second");
        assert!(collection.get_track(99).is_none());

        // Iteration follows document order, not id order
        let names: Vec<&str> = collection.tracks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
