use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::camelot::camelot_key;

/// One tempo grid anchor point on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tempo {
    /// Anchor position in seconds from the start of the file
    pub inizio: f64,

    /// Beats per minute at this anchor
    pub bpm: f64,

    /// Time signature, e.g. "4/4"
    pub metro: String,

    /// Beat number within the bar (1-based)
    pub battito: u32,
}

/// Classification of a position mark.
///
/// rekordbox does not enforce the 0-7 hot cue slot range, and duplicate
/// slots occur in real exports. Slots are carried as declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueKind {
    /// Numbered quick-access cue (slot 0-7 by convention)
    HotCue { slot: i32 },

    /// Unnumbered marker, unbounded per track
    MemoryCue,

    /// Stored loop, numbered or not
    Loop { slot: Option<i32> },
}

/// RGB color assigned to a cue point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl CueColor {
    /// Render as a `#rrggbb` hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// A cue point or memory marker on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionMark {
    /// Cue label, empty when unnamed
    pub name: String,

    /// Position in seconds
    pub start: f64,

    pub kind: CueKind,

    pub color: Option<CueColor>,
}

impl PositionMark {
    pub fn is_hot_cue(&self) -> bool {
        matches!(self.kind, CueKind::HotCue { .. })
    }

    pub fn is_memory_cue(&self) -> bool {
        matches!(self.kind, CueKind::MemoryCue)
    }

    pub fn is_loop(&self) -> bool {
        matches!(self.kind, CueKind::Loop { .. })
    }
}

/// A track in the collection with all its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier within the collection (the XML `TrackID`)
    pub id: u32,

    /// Track title
    pub name: String,

    /// Artist name, empty when untagged
    pub artist: String,

    /// Album name, empty when untagged
    pub album: String,

    pub genre: Option<String>,

    /// Average BPM. Taken from the `AverageBpm` attribute when present,
    /// otherwise from the first tempo grid entry.
    pub bpm: Option<f64>,

    /// Musical key (tonality), e.g. "Am"
    pub key: Option<String>,

    /// Track length in seconds
    pub duration_secs: u32,

    /// File path, URL-decoded with the file://localhost prefix stripped
    pub location: String,

    /// Date the track was added to the collection
    pub date_added: Option<NaiveDate>,

    pub play_count: u32,

    /// Raw rating 0-255 (255 = 5 stars), clamped during parse
    pub rating: u8,

    /// File format, e.g. "WAV File"
    pub kind: String,

    /// File size in bytes
    pub size: u64,

    /// Bit rate in kbps
    pub bit_rate: u32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    pub comments: String,

    /// Record label
    pub label: String,

    pub remixer: String,

    pub composer: String,

    pub grouping: String,

    pub mix: String,

    pub year: u32,

    pub disc_number: u32,

    pub track_number: u32,

    /// Tempo grid anchors in document order
    pub tempos: Vec<Tempo>,

    /// Cue points and memory markers in document order
    pub cue_points: Vec<PositionMark>,
}

impl Track {
    /// Hot cues only. Slots are as declared in the export; callers must not
    /// assume uniqueness or the 0-7 range.
    pub fn hot_cues(&self) -> Vec<&PositionMark> {
        self.cue_points.iter().filter(|c| c.is_hot_cue()).collect()
    }

    /// Memory cues only
    pub fn memory_cues(&self) -> Vec<&PositionMark> {
        self.cue_points
            .iter()
            .filter(|c| c.is_memory_cue())
            .collect()
    }

    /// Camelot wheel position derived from the musical key, or `None` when
    /// the key is unset or not a recognized spelling.
    pub fn camelot_key(&self) -> Option<&'static str> {
        self.key.as_deref().and_then(camelot_key)
    }

    /// Rating as 0-5 stars, rounded to the nearest star
    pub fn star_rating(&self) -> u8 {
        (f64::from(self.rating) / 255.0 * 5.0).round() as u8
    }

    /// Duration as `M:SS`
    pub fn duration_formatted(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }
}
