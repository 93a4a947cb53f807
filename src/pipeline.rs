//! Orchestration: file bytes in, rendered summary out.

use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::error::{MalformedInput, Result, TrackError};
use crate::geometry::RenderGeometry;
use crate::track::Waypoint;
use crate::{gpx, kml, link, render};

/// Supported track file formats, selected by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    Gpx,
    Kml,
}

impl TrackFormat {
    /// Determine the format from a filename. Extensions are matched
    /// case-insensitively; anything but `.gpx`/`.kml` is rejected before any
    /// parsing happens.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if extension.eq_ignore_ascii_case("gpx") {
            Ok(Self::Gpx)
        } else if extension.eq_ignore_ascii_case("kml") {
            Ok(Self::Kml)
        } else {
            Err(TrackError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

/// Everything the transport layer needs to reply with: the rendered image,
/// a caption, the waypoint labels, and an optional directions link.
#[derive(Debug, Serialize)]
pub struct TrackSummary {
    #[serde(skip)]
    pub image_png: Vec<u8>,
    pub caption: String,
    pub waypoints: Vec<Waypoint>,
    pub maps_link: Option<String>,
}

/// Run the full pipeline for one uploaded file: pick a parser by extension,
/// parse, normalize, render, and build the deep-link.
///
/// Pure per invocation; independent files may be processed concurrently.
pub fn process_track(file_name: &str, contents: &[u8]) -> Result<TrackSummary> {
    let format = TrackFormat::from_file_name(file_name)?;
    let text = std::str::from_utf8(contents).map_err(MalformedInput::Utf8)?;

    let track = match format {
        TrackFormat::Gpx => gpx::parse_gpx(text)?,
        TrackFormat::Kml => kml::parse_kml(text)?,
    };
    if track.route_points.is_empty() {
        return Err(TrackError::EmptyRoute);
    }
    debug!(
        "parsed {:?} file '{}': {} route points, {} waypoints",
        format,
        file_name,
        track.route_points.len(),
        track.waypoints.len()
    );

    let geometry = RenderGeometry::normalize(&track.route_points)?;
    let image_png = render::render_track(&track.route_points, &track.waypoints, &geometry)?;
    let maps_link = link::build_maps_link(&track.route_points);
    info!(
        "rendered '{}' to {} bytes of PNG",
        file_name,
        image_png.len()
    );

    let caption = format!(
        "Track from {file_name}\nRoute points: {}",
        track.route_points.len()
    );

    Ok(TrackSummary {
        image_png,
        caption,
        waypoints: track.waypoints,
        maps_link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(
            TrackFormat::from_file_name("hike.gpx").unwrap(),
            TrackFormat::Gpx
        );
        assert_eq!(
            TrackFormat::from_file_name("Hike.KML").unwrap(),
            TrackFormat::Kml
        );
        assert!(matches!(
            TrackFormat::from_file_name("hike.fit"),
            Err(TrackError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            TrackFormat::from_file_name("noextension"),
            Err(TrackError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = process_track("track.gpx", &[0x80, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(
            err,
            TrackError::MalformedInput(MalformedInput::Utf8(_))
        ));
    }

    #[test]
    fn test_structurally_valid_but_empty_file() {
        let xml = br#"<?xml version="1.0"?><gpx version="1.1"></gpx>"#;
        let err = process_track("empty.gpx", xml).unwrap_err();
        assert!(matches!(err, TrackError::EmptyRoute));
    }
}
