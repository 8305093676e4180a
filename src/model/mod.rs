//! Typed model for a parsed rekordbox collection
//!
//! Everything here is immutable once the parser has produced it: the
//! `Collection` owns its tracks and the playlist tree, and hands out shared
//! references only.

mod camelot;
mod collection;
mod playlist;
mod track;

pub use camelot::camelot_key;
pub use collection::Collection;
pub use playlist::{NodeKind, PlaylistNode};
pub use track::{CueColor, CueKind, PositionMark, Tempo, Track};
