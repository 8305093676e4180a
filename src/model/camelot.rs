//! Musical key to Camelot wheel conversion
//!
//! rekordbox reports tonality as a standard key name ("Am", "F#", "Bb").
//! Harmonic mixing uses the Camelot wheel instead: positions 1-12, suffixed
//! "A" for minor and "B" for major. The table below covers the 24 keys plus
//! the alternative spellings rekordbox is known to emit.

/// Convert a musical key name to its Camelot wheel position.
///
/// Returns `None` for spellings not in the table; callers treat that as an
/// unset Camelot key rather than an error.
pub fn camelot_key(key: &str) -> Option<&'static str> {
    let position = match key {
        // Minor keys
        "Abm" => "1A",
        "Ebm" => "2A",
        "Bbm" => "3A",
        "Fm" => "4A",
        "Cm" => "5A",
        "Gm" => "6A",
        "Dm" => "7A",
        "Am" => "8A",
        "Em" => "9A",
        "Bm" => "10A",
        "F#m" => "11A",
        "Dbm" => "12A",
        // Major keys
        "B" => "1B",
        "F#" => "2B",
        "Db" => "3B",
        "Ab" => "4B",
        "Eb" => "5B",
        "Bb" => "6B",
        "F" => "7B",
        "C" => "8B",
        "G" => "9B",
        "D" => "10B",
        "A" => "11B",
        "E" => "12B",
        // Alternative notations
        "G#m" => "1A",
        "D#m" => "2A",
        "A#m" => "3A",
        "C#m" => "12A",
        "Gb" => "2B",
        "C#" => "3B",
        "G#" => "4B",
        "D#" => "5B",
        "A#" => "6B",
        _ => return None,
    };
    Some(position)
}
