//! Rekordbox Collection Reader
//!
//! Parses a rekordbox XML collection export (tracks, tempo grids, cue
//! points, playlist tree) into an immutable, typed [`Collection`], and
//! provides pure query and statistics helpers over it. The library is
//! read-only: there is no write-back path, and a parsed collection is never
//! mutated.
//!
//! ```no_run
//! use rekordbox_collection_reader::{parse_collection, search, TrackFilter};
//!
//! let collection = parse_collection("collection.xml")?;
//!
//! for track in search(&collection, "strobe") {
//!     println!("{} - {}", track.artist, track.name);
//! }
//!
//! let peak_time = rekordbox_collection_reader::filter_tracks(
//!     &collection,
//!     &TrackFilter::new().genre("Techno").bpm_range(138.0, 145.0),
//! );
//! println!("{} peak time tracks", peak_time.len());
//! # Ok::<(), rekordbox_collection_reader::ParseError>(())
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod query;

pub use error::ParseError;
pub use model::{
    camelot_key, Collection, CueColor, CueKind, NodeKind, PlaylistNode, PositionMark, Tempo, Track,
};
pub use parser::{parse_collection, parse_collection_reader};
pub use query::{
    artists_by_track_count, bpm_distribution, filter_tracks, genre_counts, get_playlist,
    get_playlist_names, key_distribution, search, TrackFilter,
};
