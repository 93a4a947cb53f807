//! KML (Keyhole Markup Language) parser.
//!
//! Scans every `<Placemark>` in the document, namespace-agnostic. All
//! coordinates feed the route geometry; a placemark whose geometry is a
//! single coordinate and that carries a name or description becomes a
//! labeled waypoint.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{MalformedInput, Result};
use crate::track::{GeoPoint, TrackData, Waypoint};
use crate::waypoints;
use crate::xml::read_nonempty_text;

/// Parse a KML XML string into [`TrackData`].
///
/// If the file yields route points but no waypoints, a representative set is
/// synthesized (see [`waypoints::synthesize`]).
pub fn parse_kml(xml: &str) -> Result<TrackData> {
    let mut reader = Reader::from_str(xml);
    let mut data = TrackData::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"Placemark" {
                    parse_placemark(&mut reader, &mut data)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    if data.waypoints.is_empty() && !data.route_points.is_empty() {
        data.waypoints = waypoints::synthesize(&data.route_points);
    }

    Ok(data)
}

/// Parse one `<Placemark>` subtree.
///
/// The first `<name>`, `<description>`, and `<coordinates>` encountered in
/// document order win, at any nesting depth; repeats are ignored. Geometry
/// containers (Point, LineString, MultiGeometry, ...) are descended into
/// rather than skipped so nested coordinates are found.
fn parse_placemark(reader: &mut Reader<&[u8]>, data: &mut TrackData) -> Result<()> {
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut coords: Option<Vec<GeoPoint>> = None;
    // First element wins even when its text is blank; track seen state
    // separately so a later element never fills in
    let mut name_seen = false;
    let mut description_seen = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" if !name_seen => {
                    name_seen = true;
                    name = read_nonempty_text(reader, &e)?;
                }
                b"description" if !description_seen => {
                    description_seen = true;
                    description = read_nonempty_text(reader, &e)?;
                }
                b"coordinates" if coords.is_none() => {
                    let text = crate::xml::read_text_owned(reader, &e)?;
                    coords = Some(parse_coordinates(&text)?);
                }
                _ => {}
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"Placemark" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    let coords = coords.unwrap_or_default();
    data.route_points.extend_from_slice(&coords);

    // A single-coordinate placemark with a label is a point of interest;
    // multi-coordinate geometries contribute to the route only.
    if coords.len() == 1 && (name.is_some() || description.is_some()) {
        data.waypoints
            .push(Waypoint::new(coords[0], placemark_label(name, description)));
    }

    Ok(())
}

/// Parse a `<coordinates>` text blob: whitespace-separated `lon,lat[,alt]`
/// tuples. Tuples with fewer than two components are skipped.
fn parse_coordinates(text: &str) -> Result<Vec<GeoPoint>> {
    let mut points = Vec::new();

    for tuple in text.split_whitespace() {
        let mut parts = tuple.split(',');
        let (Some(lon), Some(lat)) = (parts.next(), parts.next()) else {
            continue;
        };
        let lon: f64 = lon.parse().map_err(|_| MalformedInput::InvalidCoordinate {
            value: tuple.to_string(),
        })?;
        let lat: f64 = lat.parse().map_err(|_| MalformedInput::InvalidCoordinate {
            value: tuple.to_string(),
        })?;
        points.push(GeoPoint::new(lat, lon));
    }

    Ok(points)
}

fn placemark_label(name: Option<String>, description: Option<String>) -> String {
    match (name, description) {
        (Some(name), Some(desc)) => format!("{name}: {desc}"),
        (Some(name), None) => name,
        (None, Some(desc)) => desc,
        (None, None) => "Point".to_string(),
    }
}
