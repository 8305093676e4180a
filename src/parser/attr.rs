//! Attribute extraction and field coercion
//!
//! Every scalar in the export is an XML attribute. Missing or malformed
//! values never error here; they coerce to the field's documented default
//! so one bad attribute cannot take down a track or the document.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use quick_xml::events::BytesStart;

/// Date format used by rekordbox for `DateAdded`
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unescaped attribute map for one element
pub(crate) struct Attrs(HashMap<String, String>);

impl Attrs {
    pub fn from_element(element: &BytesStart) -> Self {
        let mut map = HashMap::new();
        for attr in element.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            // Unescape so &amp; and friends decode; fall back to the raw
            // bytes if the entity is broken.
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            map.insert(key, value);
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// String attribute, empty when absent
    pub fn string(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// String attribute treating absent and empty as unset
    pub fn opt_string(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Numeric attribute with a caller-supplied default
    pub fn parse_or<T: FromStr + Copy>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::debug!("ignoring malformed attribute {key}={raw:?}");
                default
            }),
            None => default,
        }
    }

    /// Numeric attribute treating absent or malformed as unset
    pub fn parse_opt<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|raw| raw.parse().ok())
    }

    /// Integer attribute defaulting to zero
    pub fn int<T: FromStr + Copy + Default>(&self, key: &str) -> T {
        self.parse_or(key, T::default())
    }

    /// Float attribute defaulting to zero
    pub fn float(&self, key: &str) -> f64 {
        self.parse_or(key, 0.0)
    }

    /// Float attribute treating absent or malformed as unset
    pub fn opt_float(&self, key: &str) -> Option<f64> {
        self.parse_opt(key)
    }

    /// Rating attribute: parsed wide, then clamped into 0-255
    pub fn rating(&self, key: &str) -> u8 {
        let raw: i64 = self.int(key);
        raw.clamp(0, 255) as u8
    }

    /// Date attribute in the export's fixed format; unparsable is unset
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        let raw = self.get(key)?;
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                if !raw.is_empty() {
                    log::debug!("ignoring malformed date attribute {key}={raw:?}");
                }
                None
            }
        }
    }
}
