//! Per-track element builders
//!
//! One `TRACK` element becomes one [`Track`]; its nested `TEMPO` and
//! `POSITION_MARK` children are attached by the assembler as they stream by.

use super::attr::Attrs;
use crate::error::ParseError;
use crate::model::{CueColor, CueKind, PositionMark, Tempo, Track};

/// Parse a `TRACK` element's attributes into a [`Track`] with empty tempo
/// and cue lists.
///
/// `TrackID` is the only required attribute; a track without a parseable
/// integer id aborts the document parse.
pub(crate) fn parse_track(attrs: &Attrs) -> Result<Track, ParseError> {
    let id = attrs
        .get("TrackID")
        .and_then(|raw| raw.parse::<u32>().ok())
        .ok_or(ParseError::MissingTrackId)?;

    Ok(Track {
        id,
        name: attrs.string("Name"),
        artist: attrs.string("Artist"),
        album: attrs.string("Album"),
        genre: attrs.opt_string("Genre"),
        bpm: attrs.opt_float("AverageBpm"),
        key: attrs.opt_string("Tonality"),
        duration_secs: attrs.int("TotalTime"),
        location: decode_location(attrs.get("Location").unwrap_or_default()),
        date_added: attrs.date("DateAdded"),
        play_count: attrs.int("PlayCount"),
        rating: attrs.rating("Rating"),
        kind: attrs.string("Kind"),
        size: attrs.int("Size"),
        bit_rate: attrs.int("BitRate"),
        sample_rate: attrs.int("SampleRate"),
        comments: attrs.string("Comments"),
        label: attrs.string("Label"),
        remixer: attrs.string("Remixer"),
        composer: attrs.string("Composer"),
        grouping: attrs.string("Grouping"),
        mix: attrs.string("Mix"),
        year: attrs.int("Year"),
        disc_number: attrs.int("DiscNumber"),
        track_number: attrs.int("TrackNumber"),
        tempos: Vec::new(),
        cue_points: Vec::new(),
    })
}

/// Fill in the BPM from the tempo grid when `AverageBpm` was absent.
///
/// The source format derives it from the first grid entry only, not a mean
/// across entries; that quirk is preserved deliberately.
pub(crate) fn finalize_track(track: &mut Track) {
    if track.bpm.is_none() {
        track.bpm = track.tempos.first().map(|tempo| tempo.bpm);
    }
}

/// Parse a `TEMPO` element into one grid anchor
pub(crate) fn parse_tempo(attrs: &Attrs) -> Tempo {
    Tempo {
        inizio: attrs.float("Inizio"),
        bpm: attrs.float("Bpm"),
        metro: attrs.get("Metro").unwrap_or("4/4").to_string(),
        battito: attrs.parse_or("Battito", 1),
    }
}

/// Parse a `POSITION_MARK` element, classifying it by kind.
///
/// `Type="4"` marks a loop; otherwise a non-negative `Num` is a hot cue
/// slot and `Num="-1"` (or absent) a memory cue.
pub(crate) fn parse_position_mark(attrs: &Attrs) -> PositionMark {
    let num: i32 = attrs.parse_or("Num", -1);
    let mark_type: u32 = attrs.int("Type");

    let kind = if mark_type == 4 {
        CueKind::Loop {
            slot: (num >= 0).then_some(num),
        }
    } else if num >= 0 {
        CueKind::HotCue { slot: num }
    } else {
        CueKind::MemoryCue
    };

    let color = match (
        attrs.parse_opt::<u8>("Red"),
        attrs.parse_opt::<u8>("Green"),
        attrs.parse_opt::<u8>("Blue"),
    ) {
        (Some(red), Some(green), Some(blue)) => Some(CueColor { red, green, blue }),
        _ => None,
    };

    PositionMark {
        name: attrs.string("Name"),
        start: attrs.float("Start"),
        kind,
        color,
    }
}

/// Turn a rekordbox `Location` URL into a plain file path
fn decode_location(location: &str) -> String {
    let stripped = location
        .strip_prefix("file://localhost")
        .unwrap_or(location);
    match urlencoding::decode(stripped) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => stripped.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::BytesStart;

    fn attrs(pairs: &[(&str, &str)]) -> Attrs {
        let mut element = BytesStart::new("TRACK");
        for pair in pairs {
            element.push_attribute(*pair);
        }
        Attrs::from_element(&element)
    }

    #[test]
    fn test_track_requires_id() {
        assert!(matches!(
            parse_track(&attrs(&[("Name", "No Id")])),
            Err(ParseError::MissingTrackId)
        ));
        assert!(matches!(
            parse_track(&attrs(&[("TrackID", "abc")])),
            Err(ParseError::MissingTrackId)
        ));
    }

    #[test]
    fn test_track_scalars() {
        let track = parse_track(&attrs(&[
            ("TrackID", "3"),
            ("Name", "Doppler"),
            ("Artist", "Charlotte de Witte"),
            ("AverageBpm", "140.00"),
            ("Tonality", "Am"),
            ("Rating", "300"),
            ("DateAdded", "never"),
        ]))
        .unwrap();

        assert_eq!(track.id, 3);
        assert_eq!(track.bpm, Some(140.0));
        assert_eq!(track.key.as_deref(), Some("Am"));
        assert_eq!(track.rating, 255);
        assert_eq!(track.date_added, None);
        assert_eq!(track.genre, None);
    }

    #[test]
    fn test_bpm_falls_back_to_first_tempo() {
        let mut track = parse_track(&attrs(&[("TrackID", "1")])).unwrap();
        track.tempos = vec![
            parse_tempo(&attrs(&[("Inizio", "0.05"), ("Bpm", "126.00")])),
            parse_tempo(&attrs(&[("Inizio", "64.0"), ("Bpm", "132.00")])),
        ];
        finalize_track(&mut track);
        // First grid entry wins, not the mean
        assert_eq!(track.bpm, Some(126.0));
    }

    #[test]
    fn test_bpm_attribute_wins_over_grid() {
        let mut track =
            parse_track(&attrs(&[("TrackID", "1"), ("AverageBpm", "128.00")])).unwrap();
        track.tempos = vec![parse_tempo(&attrs(&[("Bpm", "126.00")]))];
        finalize_track(&mut track);
        assert_eq!(track.bpm, Some(128.0));
    }

    #[test]
    fn test_position_mark_classification() {
        let hot = parse_position_mark(&attrs(&[("Num", "2"), ("Start", "64.0")]));
        assert_eq!(hot.kind, CueKind::HotCue { slot: 2 });

        let memory = parse_position_mark(&attrs(&[("Num", "-1"), ("Start", "30.0")]));
        assert_eq!(memory.kind, CueKind::MemoryCue);

        let implicit_memory = parse_position_mark(&attrs(&[("Start", "30.0")]));
        assert_eq!(implicit_memory.kind, CueKind::MemoryCue);

        let hot_loop = parse_position_mark(&attrs(&[("Type", "4"), ("Num", "5")]));
        assert_eq!(hot_loop.kind, CueKind::Loop { slot: Some(5) });

        let memory_loop = parse_position_mark(&attrs(&[("Type", "4"), ("Num", "-1")]));
        assert_eq!(memory_loop.kind, CueKind::Loop { slot: None });
    }

    #[test]
    fn test_out_of_range_slot_retained() {
        let mark = parse_position_mark(&attrs(&[("Num", "11")]));
        assert_eq!(mark.kind, CueKind::HotCue { slot: 11 });
    }

    #[test]
    fn test_position_mark_color() {
        let colored = parse_position_mark(&attrs(&[
            ("Num", "0"),
            ("Red", "40"),
            ("Green", "226"),
            ("Blue", "20"),
        ]));
        assert_eq!(colored.color.unwrap().to_hex(), "#28e214");

        // Partial colors count as no color
        let partial = parse_position_mark(&attrs(&[("Num", "0"), ("Red", "255")]));
        assert_eq!(partial.color, None);
    }

    #[test]
    fn test_decode_location() {
        assert_eq!(
            decode_location("file://localhost/Users/dj/Music%20Library/track.wav"),
            "/Users/dj/Music Library/track.wav"
        );
        assert_eq!(
            decode_location("file://localhost/Users/dj/Track%20%28Original%20Mix%29.wav"),
            "/Users/dj/Track (Original Mix).wav"
        );
        // Already-plain paths pass through
        assert_eq!(
            decode_location("/Users/dj/Music/track.wav"),
            "/Users/dj/Music/track.wav"
        );
    }
}
