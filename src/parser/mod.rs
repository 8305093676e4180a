//! Rekordbox collection XML parsing
//!
//! A single streaming pass over the export document. Tracks are assembled
//! first, then the playlist tree, then dangling track references are
//! resolved out. Only I/O failures, malformed XML, a missing required
//! section, or a `TRACK` without an id abort the parse; everything else
//! degrades to field defaults.

mod attr;
mod playlist;
mod track;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ParseError;
use crate::model::{Collection, Track};

use attr::Attrs;
use playlist::PlaylistTreeBuilder;
use track::{finalize_track, parse_position_mark, parse_tempo, parse_track};

/// Parse a rekordbox XML export file into a [`Collection`].
///
/// Fails with [`ParseError::Io`] when the path is unreadable and with a
/// structural error when the document lacks its `COLLECTION` or `PLAYLISTS`
/// section. Malformed optional fields never fail the parse.
pub fn parse_collection<P: AsRef<Path>>(path: P) -> Result<Collection, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_collection_reader(BufReader::new(file))
}

/// Parse a rekordbox XML export from any buffered reader.
pub fn parse_collection_reader<R: BufRead>(input: R) -> Result<Collection, ParseError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut product_name = String::from("rekordbox");
    let mut product_version = String::new();

    let mut saw_collection = false;
    let mut saw_playlists = false;
    let mut in_collection = false;
    let mut in_playlists = false;

    let mut tracks: Vec<Track> = Vec::new();
    let mut track_slots: HashMap<u32, usize> = HashMap::new();
    let mut current_track: Option<Track> = None;
    let mut tree = PlaylistTreeBuilder::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PRODUCT" => {
                    let attrs = Attrs::from_element(&e);
                    read_product(&attrs, &mut product_name, &mut product_version);
                }
                b"COLLECTION" => {
                    saw_collection = true;
                    in_collection = true;
                }
                b"PLAYLISTS" => {
                    saw_playlists = true;
                    in_playlists = true;
                }
                b"TRACK" if in_collection => {
                    current_track = Some(parse_track(&Attrs::from_element(&e))?);
                }
                b"TRACK" if in_playlists => {
                    tree.track_ref(&Attrs::from_element(&e));
                }
                b"TEMPO" => {
                    if let Some(track) = current_track.as_mut() {
                        track.tempos.push(parse_tempo(&Attrs::from_element(&e)));
                    }
                }
                b"POSITION_MARK" => {
                    if let Some(track) = current_track.as_mut() {
                        track
                            .cue_points
                            .push(parse_position_mark(&Attrs::from_element(&e)));
                    }
                }
                b"NODE" if in_playlists => {
                    tree.open_node(&Attrs::from_element(&e));
                }
                _ => {}
            },

            Event::Empty(e) => match e.name().as_ref() {
                b"PRODUCT" => {
                    let attrs = Attrs::from_element(&e);
                    read_product(&attrs, &mut product_name, &mut product_version);
                }
                b"COLLECTION" => saw_collection = true,
                b"PLAYLISTS" => saw_playlists = true,
                b"TRACK" if in_collection => {
                    let track = parse_track(&Attrs::from_element(&e))?;
                    store_track(&mut tracks, &mut track_slots, track);
                }
                b"TRACK" if in_playlists => {
                    tree.track_ref(&Attrs::from_element(&e));
                }
                b"TEMPO" => {
                    if let Some(track) = current_track.as_mut() {
                        track.tempos.push(parse_tempo(&Attrs::from_element(&e)));
                    }
                }
                b"POSITION_MARK" => {
                    if let Some(track) = current_track.as_mut() {
                        track
                            .cue_points
                            .push(parse_position_mark(&Attrs::from_element(&e)));
                    }
                }
                b"NODE" if in_playlists => {
                    tree.leaf_node(&Attrs::from_element(&e));
                }
                _ => {}
            },

            Event::End(e) => match e.name().as_ref() {
                b"TRACK" => {
                    if let Some(track) = current_track.take() {
                        store_track(&mut tracks, &mut track_slots, track);
                    }
                }
                b"COLLECTION" => in_collection = false,
                b"PLAYLISTS" => in_playlists = false,
                b"NODE" if in_playlists => tree.close_node(),
                _ => {}
            },

            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if !saw_collection {
        return Err(ParseError::MissingSection("COLLECTION"));
    }
    if !saw_playlists {
        return Err(ParseError::MissingSection("PLAYLISTS"));
    }
    let mut root = tree.finish().ok_or(ParseError::MissingPlaylistRoot)?;

    // Drop playlist references to tracks the collection does not contain
    root.retain_track_ids(&|id| {
        let keep = track_slots.contains_key(&id);
        if !keep {
            log::debug!("dropping dangling playlist reference to track {id}");
        }
        keep
    });

    log::info!("parsed collection: {} tracks", tracks.len());
    Ok(Collection::new(product_name, product_version, tracks, root))
}

fn read_product(attrs: &Attrs, name: &mut String, version: &mut String) {
    if let Some(value) = attrs.get("Name") {
        *name = value.to_string();
    }
    *version = attrs.string("Version");
}

/// Record a completed track. A repeated `TrackID` replaces the earlier
/// track in place, keeping one entry per identifier.
fn store_track(tracks: &mut Vec<Track>, slots: &mut HashMap<u32, usize>, mut track: Track) {
    finalize_track(&mut track);
    match slots.get(&track.id) {
        Some(&slot) => {
            log::debug!("replacing duplicate track id {}", track.id);
            tracks[slot] = track;
        }
        None => {
            slots.insert(track.id, tracks.len());
            tracks.push(track);
        }
    }
}
