//! Parse error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort parsing a collection document.
///
/// Only structural problems surface here: an unreadable file, malformed XML,
/// a missing required top-level section, or a `TRACK` without a usable
/// `TrackID`. Malformed optional fields never error; they degrade to the
/// field's documented default.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The collection file could not be opened or read.
    #[error("failed to read collection file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML in collection document")]
    Xml(#[from] quick_xml::Error),

    /// A required top-level section (`COLLECTION` or `PLAYLISTS`) is absent.
    #[error("document is missing the required <{0}> section")]
    MissingSection(&'static str),

    /// The `PLAYLISTS` section holds no root `NODE`.
    #[error("<PLAYLISTS> section contains no root <NODE>")]
    MissingPlaylistRoot,

    /// A `TRACK` in the collection has no parseable integer `TrackID`.
    #[error("<TRACK> element without a valid TrackID attribute")]
    MissingTrackId,
}
