//! Textual GPX post-processing.
//!
//! Directions services hand back GPX documents that are large, namespaced and
//! not always tidy. Both operations here work on the raw text instead of a
//! parsed tree: track points are found with a small tag scanner, and ride
//! metadata is spliced in at the literal `<metadata>` tag.
//!
//! The scanner grammar, per `<trkpt ...>` start tag:
//!
//! ```text
//! tag       := "<trkpt" (ws | ">" | "/") attribute* ">"
//! attribute := ws* name ws* "=" ws* quote value quote
//! ```
//!
//! A tag contributes a point only when it carries a `lat` attribute that comes
//! before a `lon` attribute. Everything else in the document is ignored.

use crate::constants::{DEFAULT_EXPORT_STEM, METADATA_ANCHOR};
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, RideMetadata};

const TRKPT_OPEN: &str = "<trkpt";

/// Extract every `<trkpt lat=".." lon="..">` position in document order.
///
/// Returns an empty vector when the text has no track points. Fails with
/// [`AppError::Parse`] only when a `lat`/`lon` value is not a finite number;
/// well-formedness and namespaces are not checked.
pub fn extract_track_points(gpx: &str) -> Result<Vec<GeoPoint>> {
    let mut points = Vec::new();
    let mut cursor = 0;

    while let Some(found) = gpx[cursor..].find(TRKPT_OPEN) {
        let tag_start = cursor + found;
        let body_start = tag_start + TRKPT_OPEN.len();
        cursor = body_start;

        // Reject longer names such as <trkptx
        match gpx[body_start..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => {}
            _ => continue,
        }

        let Some(body_len) = tag_body_len(&gpx[body_start..]) else {
            // Unterminated tag: nothing after this can be a complete element
            break;
        };
        let body = &gpx[body_start..body_start + body_len];
        cursor = body_start + body_len + 1;

        let attributes = scan_attributes(body);
        let lat = attributes.iter().position(|a| a.name == "lat");
        let lon = attributes.iter().position(|a| a.name == "lon");

        match (lat, lon) {
            (Some(lat), Some(lon)) if lat < lon => {
                let lat = parse_coordinate(&attributes[lat], body_start)?;
                let lon = parse_coordinate(&attributes[lon], body_start)?;
                points.push(GeoPoint::from_raw(lat, lon));
            }
            _ => {
                tracing::debug!(
                    offset = tag_start,
                    "Skipping trkpt without lat-then-lon attributes at byte {}",
                    tag_start
                );
            }
        }
    }

    Ok(points)
}

/// Length of a start tag's body up to (not including) the closing `>`,
/// skipping over `>` characters inside quoted values.
fn tag_body_len(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

struct Attribute<'a> {
    name: &'a str,
    value: &'a str,
    /// Byte offset of the value within the tag body
    offset: usize,
}

/// Scan `name="value"` pairs out of a tag body. Stops at the first thing that
/// does not look like an attribute and keeps what it has so far.
fn scan_attributes(body: &str) -> Vec<Attribute<'_>> {
    let bytes = body.as_bytes();
    let mut attributes = Vec::new();
    let mut i = 0;

    let skip_ws = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    loop {
        i = skip_ws(i);
        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'/'
        {
            i += 1;
        }
        if i == name_start {
            break;
        }
        let name = &body[name_start..i];

        i = skip_ws(i);
        if bytes.get(i) != Some(&b'=') {
            break;
        }
        i = skip_ws(i + 1);

        let quote = match bytes.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => q,
            _ => break,
        };
        let value_start = i + 1;
        let Some(value_len) = bytes[value_start..].iter().position(|&b| b == quote) else {
            break;
        };

        attributes.push(Attribute {
            name,
            value: &body[value_start..value_start + value_len],
            offset: value_start,
        });
        i = value_start + value_len + 1;
    }

    attributes
}

fn parse_coordinate(attribute: &Attribute<'_>, body_start: usize) -> Result<f64> {
    match attribute.value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AppError::Parse(format!(
            "{} value '{}' at byte {} is not a number",
            attribute.name,
            attribute.value,
            body_start + attribute.offset
        ))),
    }
}

/// Render the ride metadata block. Field values are written as given.
pub fn metadata_fragment(metadata: &RideMetadata) -> String {
    format!(
        "\n<metadata>\n  <name>{name}</name>\n  <desc>Motorcycle route for {bike}</desc>\n  \
         <extensions>\n    <ride>\n      <bike_model>{bike}</bike_model>\n      \
         <emergency_contact>{contact}</emergency_contact>\n      \
         <emergency_phone>{phone}</emergency_phone>\n    </ride>\n  </extensions>\n</metadata>\n",
        name = metadata.ride_name,
        bike = metadata.bike_model,
        contact = metadata.emergency_contact,
        phone = metadata.emergency_phone,
    )
}

/// Insert the ride metadata block in front of the first `<metadata>` tag.
///
/// Fails with [`AppError::MissingAnchor`] when the text has no `<metadata>`
/// tag; there is no fallback insertion point.
pub fn inject_metadata(gpx: &str, metadata: &RideMetadata) -> Result<String> {
    let anchor = gpx
        .find(METADATA_ANCHOR)
        .ok_or(AppError::MissingAnchor(METADATA_ANCHOR))?;

    let fragment = metadata_fragment(metadata);
    let mut out = String::with_capacity(gpx.len() + fragment.len());
    out.push_str(&gpx[..anchor]);
    out.push_str(&fragment);
    out.push_str(&gpx[anchor..]);
    Ok(out)
}

/// File name for sharing a ride's GPX: whitespace becomes `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped.
pub fn export_file_name(ride_name: &str) -> String {
    let words: Vec<String> = ride_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect();

    let joined = words.join("_");
    let stem = joined.trim_matches(|c: char| c == '.' || c == '_');
    if stem.is_empty() {
        format!("{}.gpx", DEFAULT_EXPORT_STEM)
    } else {
        format!("{}.gpx", stem)
    }
}
