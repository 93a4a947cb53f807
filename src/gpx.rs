//! GPX (GPS Exchange Format) parser.
//!
//! Walks the `<trk>`/`<rte>`/`<wpt>` grammar with an event-driven quick-xml
//! reader and flattens everything into a [`TrackData`]: every track and route
//! point lands in `route_points` in file order, named track points and
//! standalone `<wpt>` elements become labeled waypoints.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{MalformedInput, Result};
use crate::track::{GeoPoint, TrackData, Waypoint};
use crate::waypoints;

/// Parse a GPX XML string into [`TrackData`].
///
/// If the file yields route points but no waypoints, a representative set is
/// synthesized (see [`waypoints::synthesize`]).
pub fn parse_gpx(xml: &str) -> Result<TrackData> {
    let mut reader = Reader::from_str(xml);
    let mut data = TrackData::default();
    // Standalone <wpt> entries come before <trk>/<rte> in schema order but
    // are appended after track-derived waypoints
    let mut standalone: Vec<Waypoint> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"trk" => parse_track(&mut reader, &mut data)?,
                b"rte" => parse_route(&mut reader, &mut data)?,
                b"wpt" => {
                    let pt = parse_point(&e, &mut reader)?;
                    standalone.push(Waypoint::new(pt.coords, poi_label(pt.name, pt.desc)));
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"wpt" {
                    let coords = parse_lat_lon(&e, "wpt")?;
                    standalone.push(Waypoint::new(coords, poi_label(None, None)));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    data.waypoints.extend(standalone);

    if data.waypoints.is_empty() && !data.route_points.is_empty() {
        data.waypoints = waypoints::synthesize(&data.route_points);
    }

    Ok(data)
}

/// Parse lat/lon attributes from a point element's start tag.
fn parse_lat_lon(e: &BytesStart<'_>, element: &'static str) -> Result<GeoPoint> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| MalformedInput::Xml(e.into()))?;
        let key = attr.key.local_name();
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match key.as_ref() {
            b"lat" => {
                lat = Some(val.parse::<f64>().map_err(|_| {
                    MalformedInput::InvalidAttribute {
                        element,
                        attribute: "lat",
                        value: val.to_string(),
                    }
                })?);
            }
            b"lon" => {
                lon = Some(val.parse::<f64>().map_err(|_| {
                    MalformedInput::InvalidAttribute {
                        element,
                        attribute: "lon",
                        value: val.to_string(),
                    }
                })?);
            }
            _ => {}
        }
    }

    let lat = lat.ok_or(MalformedInput::MissingAttribute {
        element,
        attribute: "lat",
    })?;
    let lon = lon.ok_or(MalformedInput::MissingAttribute {
        element,
        attribute: "lon",
    })?;

    Ok(GeoPoint::new(lat, lon))
}

struct ParsedPoint {
    coords: GeoPoint,
    name: Option<String>,
    desc: Option<String>,
}

/// Parse a point element (wpt, rtept, trkpt) and its children.
/// Called after receiving `Event::Start` for the point element.
fn parse_point(start: &BytesStart<'_>, reader: &mut Reader<&[u8]>) -> Result<ParsedPoint> {
    let coords = parse_lat_lon(start, "point")?;
    let end_name = start.name().0.to_vec();

    let mut name: Option<String> = None;
    let mut desc: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => name = crate::xml::read_nonempty_text(reader, &e)?,
                b"desc" => desc = crate::xml::read_nonempty_text(reader, &e)?,
                _ => {
                    // Skip ele, time, extensions, and anything else
                    reader
                        .read_to_end(e.name())
                        .map_err(MalformedInput::Xml)?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(ParsedPoint { coords, name, desc })
}

/// Parse a `<trk>` element: every trkpt joins the route, named ones are
/// promoted to waypoints.
fn parse_track(reader: &mut Reader<&[u8]>, data: &mut TrackData) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"trkseg" => parse_segment(reader, data)?,
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(MalformedInput::Xml)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trk" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }
    Ok(())
}

/// Parse a `<trkseg>` element.
fn parse_segment(reader: &mut Reader<&[u8]>, data: &mut TrackData) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"trkpt" => {
                    let pt = parse_point(&e, reader)?;
                    data.route_points.push(pt.coords);
                    // A track point with a name or description doubles as a
                    // point of interest
                    if let Some(label) = pt.name.or(pt.desc) {
                        data.waypoints.push(Waypoint::new(pt.coords, label));
                    }
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(MalformedInput::Xml)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    data.route_points.push(parse_lat_lon(&e, "trkpt")?);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trkseg" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }
    Ok(())
}

/// Parse a `<rte>` element. Route points contribute geometry only; their
/// names are not promoted.
fn parse_route(reader: &mut Reader<&[u8]>, data: &mut TrackData) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"rtept" => {
                    let pt = parse_point(&e, reader)?;
                    data.route_points.push(pt.coords);
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(MalformedInput::Xml)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"rtept" {
                    data.route_points.push(parse_lat_lon(&e, "rtept")?);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"rte" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }
    Ok(())
}

/// Label for a standalone `<wpt>` point of interest.
fn poi_label(name: Option<String>, desc: Option<String>) -> String {
    match (name, desc) {
        (Some(name), Some(desc)) => format!("{name}: {desc}"),
        (Some(name), None) => name,
        (None, Some(desc)) => format!("Point: {desc}"),
        (None, None) => "Point".to_string(),
    }
}
