/// Shared data structures for the application state
///
/// Raw dataset records arrive as loosely-shaped JSON. Two shapes exist in
/// the wild: legacy records with flat `date`/`url` fields, and records that
/// also carry an `extracted` object with a structured `date_range` and a
/// `latlon` pair. `Photo::from_record` folds both into one canonical view.
/// It never fails: every field has a fallback.
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::map::LatLng;

/// Year used when neither the structured range nor the legacy date parses
pub const DEFAULT_YEAR: i32 = 1900;

/// Width marker expected in full-size image URLs
pub const FULL_WIDTH_MARKER: &str = "w=1200";

/// Replacement producing the thumbnail rendition
pub const THUMBNAIL_WIDTH_MARKER: &str = "w=400";

/// Stable identifier of a photo record (datasets use numbers or strings)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum PhotoId {
    Number(i64),
    Text(String),
    /// Assigned at load to records without a usable id, from their index.
    /// Never equal to an id read from the dataset.
    #[serde(skip)]
    Generated(usize),
}

impl PhotoId {
    /// Read an id from a JSON value; floats, objects and empty strings are rejected
    pub fn from_value(value: &Value) -> Option<Self> {
        match PhotoId::deserialize(value) {
            Ok(PhotoId::Text(text)) if text.is_empty() => None,
            Ok(id) => Some(id),
            Err(_) => None,
        }
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoId::Number(n) => write!(f, "{}", n),
            PhotoId::Text(s) => f.write_str(s),
            PhotoId::Generated(index) => write!(f, "photo-{}", index),
        }
    }
}

impl From<i64> for PhotoId {
    fn from(n: i64) -> Self {
        PhotoId::Number(n)
    }
}

impl From<&str> for PhotoId {
    fn from(s: &str) -> Self {
        PhotoId::Text(s.to_string())
    }
}

/// Canonical view of one photo record
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    /// Resolved year (structured range, then legacy date, then 1900)
    pub year: i32,
    /// Resolved coordinates, (0, 0) when the record has none
    pub position: LatLng,
    /// Derived from the full image URL, never stored
    pub thumbnail_url: String,
    pub full_image_url: String,
    pub description: String,
    /// Free-text display date, `None` when absent or empty
    pub date: Option<String>,
    /// Grouping label shown as the panel heading
    pub folder: Option<String>,
}

impl Photo {
    /// Normalize a raw record.
    ///
    /// `index` is the record's position in the dataset and only matters
    /// when the record has no usable `id`.
    pub fn from_record(record: &Value, index: usize) -> Self {
        let id = record
            .get("id")
            .and_then(PhotoId::from_value)
            .unwrap_or(PhotoId::Generated(index));

        let full_image_url = text_field(record, "url").unwrap_or_default();

        Photo {
            id,
            title: text_field(record, "title").unwrap_or_default(),
            year: resolve_year(record),
            position: resolve_position(record),
            thumbnail_url: thumbnail_url(&full_image_url),
            full_image_url,
            description: text_field(record, "note")
                .or_else(|| text_field(record, "description"))
                .unwrap_or_default(),
            date: text_field(record, "date"),
            folder: text_field(record, "folder"),
        }
    }

    /// Date shown in lists and the viewer: the free-text date, else the year
    pub fn date_label(&self) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => self.year.to_string(),
        }
    }

    /// True when the server provides a scaled-down rendition for the thumbnail
    pub fn has_server_thumbnail(&self) -> bool {
        self.full_image_url.contains(FULL_WIDTH_MARKER)
    }
}

/// Derive the thumbnail URL by swapping the width marker.
/// URLs without the marker are reused verbatim.
pub fn thumbnail_url(full_image_url: &str) -> String {
    full_image_url.replacen(FULL_WIDTH_MARKER, THUMBNAIL_WIDTH_MARKER, 1)
}

/// Resolve the year: structured `extracted.date_range[0]` prefix,
/// then the legacy `date` field, then `DEFAULT_YEAR`
pub fn resolve_year(record: &Value) -> i32 {
    structured_year(record)
        .or_else(|| legacy_year(record))
        .unwrap_or(DEFAULT_YEAR)
}

/// Resolve `extracted.latlon`, falling back to (0, 0)
pub fn resolve_position(record: &Value) -> LatLng {
    record
        .get("extracted")
        .and_then(|extracted| extracted.get("latlon"))
        .and_then(Value::as_array)
        .and_then(|pair| {
            let lat = pair.first()?.as_f64()?;
            let lng = pair.get(1)?.as_f64()?;
            Some(LatLng::new(lat, lng))
        })
        .unwrap_or_default()
}

fn structured_year(record: &Value) -> Option<i32> {
    let first = record
        .get("extracted")?
        .get("date_range")?
        .get(0)?
        .as_str()?;
    let prefix: String = first.chars().take(4).collect();
    leading_int(&prefix)
}

fn legacy_year(record: &Value) -> Option<i32> {
    let year = match record.get("date")? {
        Value::String(date) => leading_int(date)?,
        Value::Number(n) => {
            let f = n.as_f64().filter(|f| f.is_finite())?.trunc();
            // Out-of-range numbers are malformed, not extreme years
            if f < i32::MIN as f64 || f > i32::MAX as f64 {
                return None;
            }
            f as i32
        }
        _ => return None,
    };

    // A legacy year of 0 is treated as missing
    (year != 0).then_some(year)
}

/// Parse the integer at the start of `s` ("1905-1910" -> 1905).
/// Leading whitespace and a sign are accepted; anything else after the
/// digits is ignored.
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value: i32 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Non-empty string field; numbers are rendered as text
fn text_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
